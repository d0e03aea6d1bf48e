//! Whole-file rendering and the files written next to it.

use sif_model::*;

/// Two bodies sharing one equation, as in a 2D heat transfer case.
fn heat_transfer_case() -> Simulation {
    let mut sim = Simulation::with_settings(
        DataMap::new()
            .with("Coordinate System", "Cartesian 2D")
            .with("Simulation Type", "Steady state")
            .with("Steady State Max Iterations", 10),
    );

    let air = sim
        .add_material("air", DataMap::new().with("Density", 1.1885))
        .unwrap();
    let water = sim
        .add_material("water", DataMap::new().with("Density", 1000.0))
        .unwrap();
    let heat = sim
        .add_solver(
            "HeatSolver",
            DataMap::new()
                .with("Equation", "HeatSolver")
                .with("Stabilize", true),
        )
        .unwrap();
    let eqn = sim.add_equation("main", &[heat], DataMap::new()).unwrap();
    let t0 = sim
        .add_initial_condition("T0", DataMap::new().with("Temperature", 273.15))
        .unwrap();

    let bdy_water = sim.add_body("water", [1]).unwrap();
    let bdy_air = sim.add_body("air", [2]).unwrap();
    for (body, material) in [(bdy_water, water), (bdy_air, air)] {
        let body = sim.get_mut(body).unwrap();
        body.material = Some(material);
        body.initial_condition = Some(t0);
        body.equation = Some(eqn);
    }

    let bottom = sim.add_boundary("bottom", [3]).unwrap();
    sim.get_mut(bottom).unwrap().fixed_temperature = Some(353.15);
    let top = sim.add_boundary("top", [4]).unwrap();
    sim.get_mut(top).unwrap().fixed_temperature = Some(293.15);

    sim
}

/// Section titles, in file order.
fn section_titles(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with(' ') && !line.starts_with('!'))
        .filter(|line| *line != "End")
        .collect()
}

#[test]
fn full_file_layout() {
    let text = render_sif(&heat_transfer_case()).unwrap();
    let expected = "\
Header
  CHECK KEYWORDS Warn
  Mesh DB \".\" \".\"
End

Simulation
  Coordinate System = Cartesian 2D
  Simulation Type = Steady state
  Steady State Max Iterations = 10
End

Constants
  Stefan Boltzmann = 5.6704e-8
End

! water
Body 1
  Target Bodies(1) = 1
  Equation = 1  ! main
  Material = 2  ! water
  Initial Condition = 1  ! T0
End

! air
Body 2
  Target Bodies(1) = 2
  Equation = 1  ! main
  Material = 1  ! air
  Initial Condition = 1  ! T0
End

! air
Material 1
  Density = 1.1885
End

! water
Material 2
  Density = 1000.0
End

! T0
Initial Condition 1
  Temperature = 273.15
End

! HeatSolver
Solver 1
  Equation = HeatSolver
  Stabilize = True
End

! main
Equation 1
  Active Solvers(1) = 1
End

! bottom
Boundary 1
  Target Boundaries(1) = 3
  Temperature = 353.15
End

! top
Boundary 2
  Target Boundaries(1) = 4
  Temperature = 293.15
End

";
    assert_eq!(text, expected);
}

#[test]
fn one_section_per_entity_in_kind_then_id_order() {
    let sim = heat_transfer_case();
    let text = render_sif(&sim).unwrap();

    assert_eq!(
        section_titles(&text),
        [
            "Header",
            "Simulation",
            "Constants",
            "Body 1",
            "Body 2",
            "Material 1",
            "Material 2",
            "Initial Condition 1",
            "Solver 1",
            "Equation 1",
            "Boundary 1",
            "Boundary 2",
        ]
    );

    let opened = section_titles(&text).len();
    let closed = text.lines().filter(|line| *line == "End").count();
    assert_eq!(opened, closed);
    assert!(text.trim_end().ends_with("End"));
}

#[test]
fn body_force_sections_use_spaced_keyword() {
    let mut sim = Simulation::new();
    let heating = sim
        .add_body_force("heating", DataMap::new().with("Heat Source", 1.0e3))
        .unwrap();
    let body = sim.add_body("coil", [1]).unwrap();
    sim.get_mut(body).unwrap().body_force = Some(heating);

    let text = render_sif(&sim).unwrap();
    assert!(text.contains("\nBody Force 1\n  Heat Source = 1000.0\nEnd\n"));
    assert!(text.contains("  Body Force = 1  ! heating\n"));
}

#[test]
fn header_options_are_rendered_when_set() {
    let mut sim = Simulation::new();
    sim.header_mut().check_keywords = "Abort".to_string();
    sim.header_mut().results_directory = Some("results".to_string());

    let text = render_sif(&sim).unwrap();
    assert!(text.starts_with("Header\n  CHECK KEYWORDS Abort\n  Mesh DB \".\" \".\"\n"));
    assert!(text.contains("  Results Directory \"results\"\n"));
    assert!(!text.contains("Include Path"));
}

#[test]
fn unsupported_value_names_the_key() {
    let mut sim = Simulation::new();
    sim.add_material(
        "broken",
        DataMap::new().with("Conductivity", Value::List(vec![])),
    )
    .unwrap();

    let err = render_sif(&sim).unwrap_err();
    assert!(matches!(err, SifError::UnsupportedValue { ref key, .. } if key == "Conductivity"));
}

#[test]
fn write_sif_creates_case_file() {
    let dir = tempfile::tempdir().unwrap();
    let sim = heat_transfer_case();

    let path = sim.write_sif(dir.path()).unwrap();
    assert_eq!(path, dir.path().join(SIF_FILE));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_sif(&sim).unwrap());
    assert!(!dir.path().join("case.sif.tmp").exists());
}

#[test]
fn failed_render_leaves_previous_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(SIF_FILE);
    std::fs::write(&path, "previous").unwrap();

    let mut sim = Simulation::new();
    sim.settings_mut().insert("Timestep Sizes", f64::INFINITY);
    assert!(sim.write_sif(dir.path()).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn write_sif_into_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = Simulation::new().write_sif(&missing).unwrap_err();
    assert!(matches!(err, SifError::Io { .. }));
}

#[test]
fn startinfo_names_the_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = Simulation::new().write_startinfo(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), STARTINFO_FILE);
    assert_eq!(std::fs::read_to_string(path).unwrap(), "case.sif\n1\n");
}

#[test]
fn boundary_ids_table() {
    let dir = tempfile::tempdir().unwrap();
    let sim = heat_transfer_case();
    let path = sim.write_boundary_ids(dir.path()).unwrap();

    let text = std::fs::read_to_string(path).unwrap();
    let table: serde_yaml::Mapping = serde_yaml::from_str(&text).unwrap();
    assert_eq!(table.get("bottom").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(table.get("top").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(text, "bottom: 1\ntop: 2\n");
}

#[test]
fn failed_replace_removes_temporary_file() {
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory in place of the target cannot be replaced.
    let blocker = dir.path().join(SIF_FILE);
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), "x").unwrap();

    let err = heat_transfer_case().write_sif(dir.path()).unwrap_err();
    assert!(matches!(err, SifError::Io { .. }));
    assert!(!dir.path().join("case.sif.tmp").exists());
    assert!(blocker.join("keep").exists());
}
