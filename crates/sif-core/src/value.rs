//! Tagged configuration values and their rendering in solver input files.

use crate::error::{SifError, SifResult};

/// A single configuration value of an entity's data map.
///
/// Strings are written verbatim: any quoting the solver input needs is part
/// of the string itself (see [`Value::quoted`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// A string wrapped in double quotes, e.g. `"Temperature"`.
    pub fn quoted(s: impl AsRef<str>) -> Self {
        Value::Str(format!("\"{}\"", s.as_ref()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// Render a value as it appears to the right of `=` in a solver input line.
///
/// `key` is only used to name the offending entry on failure.
pub fn render_value(key: &str, value: &Value) -> SifResult<String> {
    match value {
        Value::List(items) => {
            if items.is_empty() {
                return Err(SifError::UnsupportedValue {
                    key: key.to_string(),
                    found: "empty list".to_string(),
                });
            }
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                if let Value::List(_) = item {
                    return Err(SifError::UnsupportedValue {
                        key: key.to_string(),
                        found: "nested list".to_string(),
                    });
                }
                parts.push(render_scalar(key, item)?);
            }
            Ok(parts.join(" "))
        }
        scalar => render_scalar(key, scalar),
    }
}

fn render_scalar(key: &str, value: &Value) -> SifResult<String> {
    match value {
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        Value::Int(v) => Ok(v.to_string()),
        Value::Real(v) => render_real(key, *v),
        Value::Str(s) => Ok(s.clone()),
        Value::List(_) => Err(SifError::UnsupportedValue {
            key: key.to_string(),
            found: "nested list".to_string(),
        }),
    }
}

fn render_real(key: &str, v: f64) -> SifResult<String> {
    if !v.is_finite() {
        return Err(SifError::NonFinite {
            key: key.to_string(),
            value: v,
        });
    }
    // Debug keeps a decimal point on integral values and switches to
    // exponent notation for very small/large magnitudes.
    Ok(format!("{v:?}"))
}
