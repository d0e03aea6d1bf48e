//! Section data of the individual entity kinds.

use sif_model::*;

fn heat_solver_data() -> DataMap {
    DataMap::new()
        .with("Equation", "HeatSolver")
        .with("Procedure", "\"HeatSolve\" \"HeatSolver\"")
        .with("Variable", "\"Temperature\"")
        .with("Variable Dofs", 1)
}

#[test]
fn body_renders_references_in_fixed_order() {
    let mut sim = Simulation::new();
    let t0 = sim
        .add_initial_condition("T0", DataMap::new().with("Temperature", 1.0))
        .unwrap();
    let solver = sim.add_solver("test_solver", heat_solver_data()).unwrap();
    let eqn = sim.add_equation("main", &[solver], DataMap::new()).unwrap();
    let material = sim
        .add_material(
            "test_material",
            DataMap::new()
                .with("Density", 1.0)
                .with("Heat Capacity", 1.0)
                .with("Heat Conductivity", 1.0),
        )
        .unwrap();
    let body = sim.add_body("test_material", [1]).unwrap();
    {
        let body = sim.get_mut(body).unwrap();
        body.material = Some(material);
        body.initial_condition = Some(t0);
        body.equation = Some(eqn);
    }

    let data = sim.get(body).unwrap().section_data(&sim).unwrap();
    let entries: Vec<(&str, &Value)> = data.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("Target Bodies(1)", &Value::from("1")),
            ("Equation", &Value::from("1  ! main")),
            ("Material", &Value::from("1  ! test_material")),
            ("Initial Condition", &Value::from("1  ! T0")),
        ]
    );
}

#[test]
fn body_reference_is_annotated_with_target_name() {
    let mut sim = Simulation::new();
    let water = sim.add_material("water", DataMap::new()).unwrap();
    let body = sim.add_body("pool", [4, 7]).unwrap();
    sim.get_mut(body).unwrap().material = Some(water);

    let data = sim.get(body).unwrap().section_data(&sim).unwrap();
    assert_eq!(data.get("Material"), Some(&Value::from("1  ! water")));
    assert_eq!(data.get("Target Bodies(2)"), Some(&Value::from("4 7")));
}

#[test]
fn unlinked_body_has_only_targets_and_raw_data() {
    let mut sim = Simulation::new();
    let body = sim.add_body("crucible", [3]).unwrap();
    sim.get_mut(body)
        .unwrap()
        .data_mut()
        .insert("Name", "\"crucible\"");

    let data = sim.get(body).unwrap().section_data(&sim).unwrap();
    let keys: Vec<&str> = data.keys().collect();
    assert_eq!(keys, ["Target Bodies(1)", "Name"]);
}

#[test]
fn raw_data_never_overwrites_structural_keys() {
    let mut sim = Simulation::new();
    let water = sim.add_material("water", DataMap::new()).unwrap();
    let body = sim.add_body("pool", [1]).unwrap();
    {
        let body = sim.get_mut(body).unwrap();
        body.material = Some(water);
        body.data_mut().insert("Material", 42);
        body.data_mut().insert("Target Bodies(1)", "99");
    }

    let data = sim.get(body).unwrap().section_data(&sim).unwrap();
    assert_eq!(data.get("Material"), Some(&Value::from("1  ! water")));
    assert_eq!(data.get("Target Bodies(1)"), Some(&Value::from("1")));
    assert_eq!(data.len(), 2);
}

#[test]
fn equation_lists_active_solvers_in_given_order() {
    let mut sim = Simulation::new();
    let heat = sim.add_solver("heat", heat_solver_data()).unwrap();
    let output = sim.add_solver("output", DataMap::new()).unwrap();
    let eqn = sim
        .add_equation(
            "main",
            &[output, heat],
            DataMap::new().with("Convection", "None"),
        )
        .unwrap();

    let data = sim.get(eqn).unwrap().section_data(&sim).unwrap();
    let entries: Vec<(&str, &Value)> = data.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("Active Solvers(2)", &Value::from("2 1")),
            ("Convection", &Value::from("None")),
        ]
    );
}

#[test]
fn equation_with_single_solver() {
    let mut sim = Simulation::new();
    let heat = sim.add_solver("heat", heat_solver_data()).unwrap();
    let eqn = sim.add_equation("main", &[], DataMap::new()).unwrap();
    sim.get_mut(eqn).unwrap().push_solver(heat);

    let data = sim.get(eqn).unwrap().section_data(&sim).unwrap();
    assert_eq!(data.get("Active Solvers(1)"), Some(&Value::from("1")));
}

#[test]
fn boundary_with_raw_data() {
    let mut sim = Simulation::new();
    let boundary = sim.add_boundary("test_boundary", [1]).unwrap();
    sim.get_mut(boundary)
        .unwrap()
        .data_mut()
        .insert("Temperature", 1.0);

    let data = sim.get(boundary).unwrap().section_data(&sim).unwrap();
    let entries: Vec<(&str, &Value)> = data.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("Target Boundaries(1)", &Value::from("1")),
            ("Temperature", &Value::Real(1.0)),
        ]
    );
}

#[test]
fn boundary_conditions_render_before_raw_data() {
    let mut sim = Simulation::new();
    let crucible = sim.add_body("crucible", [1]).unwrap();
    let _melt = sim.add_body("melt", [2]).unwrap();
    let boundary = sim.add_boundary("surface", [5, 6]).unwrap();
    {
        let boundary = sim.get_mut(boundary).unwrap();
        boundary.radiation = Some(Radiation::DiffuseGray);
        boundary.fixed_heat_flux = Some(-150.0);
        boundary.save_line = true;
        boundary.normal_target_body = Some(crucible);
        boundary.data_mut().insert("Heat Flux", 1.0);
    }

    let data = sim.get(boundary).unwrap().section_data(&sim).unwrap();
    let keys: Vec<&str> = data.keys().collect();
    assert_eq!(
        keys,
        [
            "Target Boundaries(2)",
            "Radiation",
            "Heat Flux BC",
            "Heat Flux",
            "Save Line",
            "Normal Target Body",
        ]
    );
    assert_eq!(data.get("Heat Flux"), Some(&Value::Real(-150.0)));
    assert_eq!(data.get("Heat Flux BC"), Some(&Value::Bool(true)));
    assert_eq!(data.get("Normal Target Body"), Some(&Value::Int(1)));
}

#[test]
fn idealized_radiation_and_convection() {
    let mut sim = Simulation::new();
    let boundary = sim.add_boundary("outside", [9]).unwrap();
    {
        let boundary = sim.get_mut(boundary).unwrap();
        boundary.fixed_temperature = Some(293.15);
        boundary.radiation = Some(Radiation::Idealized {
            external_temperature: 300.0,
        });
        boundary.heat_transfer = Some(HeatTransfer {
            coefficient: 10.0,
            external_temperature: 300.0,
        });
        boundary.zero_potential = true;
    }

    let data = sim.get(boundary).unwrap().section_data(&sim).unwrap();
    assert_eq!(data.get("Radiation"), Some(&Value::from("Idealized")));
    assert_eq!(data.get("Temperature"), Some(&Value::Real(293.15)));
    assert_eq!(data.get("External Temperature"), Some(&Value::Real(300.0)));
    assert_eq!(data.get("Heat Transfer Coefficient"), Some(&Value::Real(10.0)));
    assert_eq!(data.get("Potential Re"), Some(&Value::Int(0)));
    assert_eq!(data.get("Potential Im"), Some(&Value::Int(0)));
}

#[test]
fn initial_condition_is_its_raw_data() {
    let mut sim = Simulation::new();
    let t0 = sim
        .add_initial_condition("T0", DataMap::new().with("Temperature", 1.0))
        .unwrap();
    let data = sim.get(t0).unwrap().section_data(&sim).unwrap();
    assert_eq!(data, DataMap::new().with("Temperature", 1.0));
}

#[test]
fn section_data_is_idempotent() {
    let mut sim = Simulation::new();
    let water = sim.add_material("water", DataMap::new()).unwrap();
    let solver = sim.add_solver("heat", heat_solver_data()).unwrap();
    let eqn = sim.add_equation("main", &[solver], DataMap::new()).unwrap();
    let body = sim.add_body("pool", [1]).unwrap();
    {
        let body = sim.get_mut(body).unwrap();
        body.material = Some(water);
        body.equation = Some(eqn);
    }

    let body = sim.get(body).unwrap();
    assert_eq!(
        body.section_data(&sim).unwrap(),
        body.section_data(&sim).unwrap()
    );
    let eqn = sim.get(eqn).unwrap();
    assert_eq!(eqn.section_data(&sim).unwrap(), eqn.section_data(&sim).unwrap());
}

#[test]
fn reference_from_another_simulation_fails_rendering() {
    let mut other = Simulation::new();
    let foreign = other.add_material("air", DataMap::new()).unwrap();

    let mut sim = Simulation::new();
    let body = sim.add_body("room", [1]).unwrap();
    sim.get_mut(body).unwrap().material = Some(foreign);

    let err = sim.get(body).unwrap().section_data(&sim).unwrap_err();
    assert!(matches!(
        err,
        SifError::ForeignReference { kind: "Material", ref owner } if owner == "room"
    ));
}

#[test]
fn handle_from_original_fails_in_its_clone() {
    let mut original = Simulation::new();
    original.add_body("room", [1]).unwrap();
    let mut copy = original.clone();

    let late = original
        .add_material("only_in_original", DataMap::new())
        .unwrap();
    copy.add_material("only_in_copy", DataMap::new()).unwrap();

    let room = copy.find::<Body>("room").unwrap();
    copy.get_mut(room).unwrap().material = Some(late);

    let err = copy.get(room).unwrap().section_data(&copy).unwrap_err();
    assert!(matches!(
        err,
        SifError::ForeignReference { kind: "Material", ref owner } if owner == "room"
    ));
}

#[test]
fn cloned_references_render_against_the_clone() {
    let mut original = Simulation::new();
    let heat = original.add_solver("heat", heat_solver_data()).unwrap();
    let eqn = original
        .add_equation("main", &[heat], DataMap::new())
        .unwrap();
    let pool = original.add_body("pool", [1]).unwrap();
    original.get_mut(pool).unwrap().equation = Some(eqn);

    let copy = original.clone();
    let pool = copy.find::<Body>("pool").unwrap();
    let data = copy.get(pool).unwrap().section_data(&copy).unwrap();
    assert_eq!(data.get("Equation"), Some(&Value::from("1  ! main")));
    assert_eq!(render_sif(&copy).unwrap(), render_sif(&original).unwrap());
}

#[test]
fn conflicting_ambient_temperatures_are_rejected() {
    let mut sim = Simulation::new();
    let boundary = sim.add_boundary("outside", [9]).unwrap();
    {
        let boundary = sim.get_mut(boundary).unwrap();
        boundary.radiation = Some(Radiation::Idealized {
            external_temperature: 300.0,
        });
        boundary.heat_transfer = Some(HeatTransfer {
            coefficient: 10.0,
            external_temperature: 250.0,
        });
    }

    let err = sim.get(boundary).unwrap().section_data(&sim).unwrap_err();
    assert!(matches!(
        err,
        SifError::UnsupportedValue { ref key, .. } if key == "External Temperature"
    ));
}

#[test]
fn convection_alone_sets_the_ambient() {
    let mut sim = Simulation::new();
    let boundary = sim.add_boundary("outside", [9]).unwrap();
    sim.get_mut(boundary).unwrap().heat_transfer = Some(HeatTransfer {
        coefficient: 10.0,
        external_temperature: 250.0,
    });

    let data = sim.get(boundary).unwrap().section_data(&sim).unwrap();
    assert_eq!(data.get("External Temperature"), Some(&Value::Real(250.0)));
}

#[test]
fn body_without_targets_is_rejected() {
    let mut sim = Simulation::new();
    let body = sim.add_body("nowhere", Vec::<u32>::new()).unwrap();
    let err = sim.get(body).unwrap().section_data(&sim).unwrap_err();
    assert!(matches!(
        err,
        SifError::UnsupportedValue { ref key, .. } if key == "Target Bodies"
    ));
}

#[test]
fn equation_without_solvers_is_rejected() {
    let mut sim = Simulation::new();
    sim.add_equation("idle", &[], DataMap::new()).unwrap();
    let err = render_sif(&sim).unwrap_err();
    assert!(matches!(
        err,
        SifError::UnsupportedValue { ref key, .. } if key == "Active Solvers"
    ));
}
