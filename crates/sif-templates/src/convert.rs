//! YAML to [`Value`] conversion.

use serde_yaml::{Mapping, Value as Yaml};
use sif_core::{DataMap, SifError, SifResult, Value};

fn unsupported(key: &str, found: impl Into<String>) -> SifError {
    SifError::UnsupportedValue {
        key: key.to_string(),
        found: found.into(),
    }
}

/// Convert one YAML value. `key` names the entry in errors.
///
/// Scalars and flat sequences of scalars are accepted; nulls, mappings,
/// nested sequences and tagged values are rejected.
pub fn value_from_yaml(key: &str, yaml: &Yaml) -> SifResult<Value> {
    match yaml {
        Yaml::Sequence(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if item.is_sequence() {
                    return Err(unsupported(key, "nested sequence"));
                }
                values.push(scalar_from_yaml(key, item)?);
            }
            Ok(Value::List(values))
        }
        other => scalar_from_yaml(key, other),
    }
}

fn scalar_from_yaml(key: &str, yaml: &Yaml) -> SifResult<Value> {
    match yaml {
        Yaml::Bool(b) => Ok(Value::Bool(*b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_u64() {
                Err(unsupported(key, format!("integer {n} out of range")))
            } else {
                n.as_f64()
                    .map(Value::Real)
                    .ok_or_else(|| unsupported(key, format!("number {n}")))
            }
        }
        Yaml::String(s) => Ok(Value::Str(s.clone())),
        Yaml::Null => Err(unsupported(key, "null")),
        Yaml::Sequence(_) => Err(unsupported(key, "nested sequence")),
        Yaml::Mapping(_) => Err(unsupported(key, "mapping")),
        Yaml::Tagged(tagged) => Err(unsupported(key, format!("tagged value {}", tagged.tag))),
    }
}

/// Convert a YAML document holding a mapping of string keys into a
/// [`DataMap`], keeping order. A null document is an empty map.
///
/// `context` prefixes keys in error messages (e.g. the preset name).
pub fn data_from_yaml(context: &str, yaml: &Yaml) -> SifResult<DataMap> {
    match yaml {
        Yaml::Mapping(mapping) => data_from_mapping(context, mapping),
        Yaml::Null => Ok(DataMap::new()),
        _ => Err(unsupported(context, "expected a mapping")),
    }
}

/// [`data_from_yaml`] for an already unpacked mapping.
pub fn data_from_mapping(context: &str, mapping: &Mapping) -> SifResult<DataMap> {
    let mut data = DataMap::new();
    for (key, value) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| unsupported(context, format!("non-string key {key:?}")))?;
        let qualified = format!("{context}.{key}");
        data.insert(key, value_from_yaml(&qualified, value)?);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Yaml {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn scalars_map_to_variants() {
        let data = data_from_yaml(
            "water",
            &yaml("Density: 1000.0\nDofs: 1\nSolid: false\nVariable: '\"Temperature\"'\n"),
        )
        .unwrap();
        let entries: Vec<_> = data.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("Density", &Value::Real(1000.0)),
                ("Dofs", &Value::Int(1)),
                ("Solid", &Value::Bool(false)),
                ("Variable", &Value::Str("\"Temperature\"".to_string())),
            ]
        );
    }

    #[test]
    fn flat_sequences_become_lists() {
        let v = value_from_yaml("Gravity", &yaml("[0, -1, 0, 9.82]")).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Int(0),
                Value::Int(-1),
                Value::Int(0),
                Value::Real(9.82)
            ])
        );
    }

    #[test]
    fn null_names_the_qualified_key() {
        let err = data_from_yaml("air", &yaml("Density: ~\n")).unwrap_err();
        assert!(matches!(err, SifError::UnsupportedValue { ref key, .. } if key == "air.Density"));
    }

    #[test]
    fn nested_structures_are_rejected() {
        assert!(value_from_yaml("k", &yaml("{a: 1}")).is_err());
        assert!(value_from_yaml("k", &yaml("[[1, 2]]")).is_err());
    }

    #[test]
    fn empty_document_is_empty_map() {
        assert!(data_from_yaml("x", &Yaml::Null).unwrap().is_empty());
    }
}
