//! Case validation logic.

use std::collections::HashSet;

use crate::schema::{BoundaryDef, CaseDef, HeatTransferDef, RadiationDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Check names and cross-references of a case before building it.
pub fn validate_case(case: &CaseDef) -> Result<(), ValidationError> {
    let materials = unique_names("materials", case.materials.iter().map(|m| &m.name))?;
    let solvers = unique_names("solvers", case.solvers.iter().map(|s| &s.name))?;
    let equations = unique_names("equations", case.equations.iter().map(|e| &e.name))?;
    let initial_conditions = unique_names(
        "initial_conditions",
        case.initial_conditions.iter().map(|ic| &ic.name),
    )?;
    let body_forces = unique_names("body_forces", case.body_forces.iter().map(|bf| &bf.name))?;
    let bodies = unique_names("bodies", case.bodies.iter().map(|b| &b.name))?;
    unique_names("boundaries", case.boundaries.iter().map(|b| &b.name))?;

    for equation in &case.equations {
        not_empty(
            format!("equation '{}' solvers", equation.name),
            &equation.solvers,
        )?;
        for solver in &equation.solvers {
            require(&solvers, solver, || {
                format!("equation '{}' solvers", equation.name)
            })?;
        }
    }

    for body in &case.bodies {
        let context = |field: &str| format!("body '{}' {}", body.name, field);
        not_empty(context("targets"), &body.targets)?;
        if let Some(name) = &body.equation {
            require(&equations, name, || context("equation"))?;
        }
        if let Some(name) = &body.material {
            require(&materials, name, || context("material"))?;
        }
        if let Some(name) = &body.body_force {
            require(&body_forces, name, || context("body_force"))?;
        }
        if let Some(name) = &body.initial_condition {
            require(&initial_conditions, name, || context("initial_condition"))?;
        }
    }

    for boundary in &case.boundaries {
        if let Some(name) = &boundary.normal_target_body {
            require(&bodies, name, || {
                format!("boundary '{}' normal_target_body", boundary.name)
            })?;
        }
        not_empty(
            format!("boundary '{}' targets", boundary.name),
            &boundary.targets,
        )?;
        validate_boundary_numbers(boundary)?;
    }

    Ok(())
}

fn unique_names<'a>(
    context: &str,
    names: impl Iterator<Item = &'a String>,
) -> Result<HashSet<&'a str>, ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("{context}.name"),
                value: format!("{name:?}"),
                reason: "must not be empty".to_string(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: name.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(seen)
}

fn require(
    known: &HashSet<&str>,
    name: &str,
    context: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    if known.contains(name) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            name: name.to_string(),
            context: context(),
        })
    }
}

fn validate_boundary_numbers(boundary: &BoundaryDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("boundary '{}' {}", boundary.name, name);
    finite(field("fixed_temperature"), boundary.fixed_temperature)?;
    finite(field("fixed_heat_flux"), boundary.fixed_heat_flux)?;
    if let Some(RadiationDef::Idealized {
        external_temperature,
    }) = boundary.radiation
    {
        finite(field("radiation.external_temperature"), Some(external_temperature))?;
    }
    if let Some(HeatTransferDef {
        coefficient,
        external_temperature,
    }) = boundary.heat_transfer
    {
        finite(field("heat_transfer.coefficient"), Some(coefficient))?;
        finite(
            field("heat_transfer.external_temperature"),
            Some(external_temperature),
        )?;
    }
    // Radiation and convection write the same solver key.
    if let (
        Some(RadiationDef::Idealized {
            external_temperature: radiation,
        }),
        Some(HeatTransferDef {
            external_temperature: convection,
            ..
        }),
    ) = (boundary.radiation, boundary.heat_transfer)
    {
        if radiation != convection {
            return Err(ValidationError::InvalidValue {
                field: field("heat_transfer.external_temperature"),
                value: convection.to_string(),
                reason: format!("must match radiation.external_temperature ({radiation})"),
            });
        }
    }
    Ok(())
}

fn not_empty<T>(field: String, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::InvalidValue {
            field,
            value: "[]".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn finite(field: String, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::InvalidValue {
            field,
            value: v.to_string(),
            reason: "must be finite".to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn case_from(yaml: &str) -> CaseDef {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn empty_case_is_valid() {
        validate_case(&CaseDef::default()).unwrap();
    }

    #[test]
    fn duplicate_material_name() {
        let case = case_from(
            "materials:\n  - name: water\n  - name: water\n",
        );
        let err = validate_case(&case).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateName { ref context, .. } if context == "materials"));
    }

    #[test]
    fn equation_with_unknown_solver() {
        let case = case_from(
            "solvers:\n  - name: heat\nequations:\n  - name: main\n    solvers: [heat, flux]\n",
        );
        let err = validate_case(&case).unwrap_err();
        assert!(matches!(err, ValidationError::MissingReference { ref name, .. } if name == "flux"));
    }

    #[test]
    fn body_with_unknown_material() {
        let case = case_from(
            "bodies:\n  - name: pool\n    targets: [1]\n    material: water\n",
        );
        let err = validate_case(&case).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing reference: water in body 'pool' material"
        );
    }

    #[test]
    fn empty_name_is_invalid() {
        let case = case_from("initial_conditions:\n  - name: ''\n");
        assert!(matches!(
            validate_case(&case).unwrap_err(),
            ValidationError::InvalidValue { .. }
        ));
    }

    #[test]
    fn body_without_targets() {
        let case = case_from("bodies:\n  - name: pool\n    targets: []\n");
        let err = validate_case(&case).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "body 'pool' targets"));
    }

    #[test]
    fn equation_without_solvers() {
        let case = case_from("equations:\n  - name: main\n    solvers: []\n");
        assert!(matches!(
            validate_case(&case).unwrap_err(),
            ValidationError::InvalidValue { .. }
        ));
    }

    #[test]
    fn radiation_and_convection_ambients_must_agree() {
        let case = case_from(
            "\
boundaries:
  - name: outside
    targets: [9]
    radiation:
      type: Idealized
      external_temperature: 300.0
    heat_transfer:
      coefficient: 10.0
      external_temperature: 250.0
",
        );
        let err = validate_case(&case).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { ref field, .. }
                if field == "boundary 'outside' heat_transfer.external_temperature"
        ));

        let agreeing = case_from(
            "\
boundaries:
  - name: outside
    targets: [9]
    radiation:
      type: Idealized
      external_temperature: 300.0
    heat_transfer:
      coefficient: 10.0
      external_temperature: 300.0
",
        );
        validate_case(&agreeing).unwrap();
    }

    #[test]
    fn non_finite_boundary_temperature() {
        let mut case = CaseDef::default();
        case.boundaries.push(BoundaryDef {
            name: "top".to_string(),
            targets: vec![4],
            fixed_temperature: Some(f64::NAN),
            fixed_heat_flux: None,
            radiation: None,
            heat_transfer: None,
            zero_potential: false,
            save_scalars: false,
            save_line: false,
            normal_target_body: None,
            data: Default::default(),
        });
        assert!(matches!(
            validate_case(&case).unwrap_err(),
            ValidationError::InvalidValue { .. }
        ));
    }
}
