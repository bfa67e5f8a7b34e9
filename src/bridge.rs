//! # Type Bridge
//!
//! Maps declared parameter types to query-string coercion and to OpenAPI
//! schema types.
//!
//! Coercion is driven by the parameter's declared [`ParamType`], never by the
//! runtime type of its default. A parameter without a default receives the raw
//! query string unchanged.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::command::{Param, ParamType};
use crate::error::{Error, Result};

/// Schema type name used in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema type for a parameter.
///
/// # Errors
///
/// `UnsupportedType` for `Path` and `Choice` parameters.
pub fn schema_type(param: &Param) -> Result<SchemaType> {
    match &param.ty {
        ParamType::String | ParamType::Uuid => Ok(SchemaType::String),
        ParamType::Integer => Ok(SchemaType::Integer),
        ParamType::Float => Ok(SchemaType::Number),
        ParamType::Boolean => Ok(SchemaType::Boolean),
        other @ (ParamType::Path | ParamType::Choice(_)) => Err(Error::UnsupportedType {
            parameter: param.name.clone(),
            type_name: other.to_string(),
        }),
    }
}

const TRUTHY: [&str; 6] = ["1", "true", "t", "yes", "y", "on"];
const FALSY: [&str; 6] = ["0", "false", "f", "no", "n", "off"];

fn parse_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_ascii_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Convert a raw query value for `param`.
///
/// # Errors
///
/// `TypeMismatch` when the value is not representable in the declared type.
pub fn coerce(raw: &str, param: &Param) -> Result<Value> {
    if param.default_value().is_none() {
        return Ok(Value::String(raw.to_string()));
    }
    let mismatch = |expected: &'static str| Error::TypeMismatch {
        parameter: param.name.clone(),
        value: raw.to_string(),
        expected,
    };
    match &param.ty {
        ParamType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| mismatch("integer")),
        ParamType::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::from)
            .ok_or_else(|| mismatch("number")),
        ParamType::Boolean => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| mismatch("boolean")),
        ParamType::Choice(options) => {
            if options.iter().any(|o| o == raw) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(mismatch("choice"))
            }
        }
        ParamType::String | ParamType::Uuid | ParamType::Path => Ok(Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_default_coerces_to_integer() {
        let p = Param::option_int("count", 3);
        assert_eq!(coerce("5", &p).unwrap(), json!(5));
        assert!(coerce("5", &p).unwrap().is_i64());
    }

    #[test]
    fn test_float_default_coerces_to_number() {
        let p = Param::option_float("ratio", 1.0);
        assert_eq!(coerce("2.5", &p).unwrap(), json!(2.5));
        assert_eq!(coerce("3", &p).unwrap(), json!(3.0));
        assert!(coerce("inf", &p).is_err());
    }

    #[test]
    fn test_boolean_vocabulary() {
        let p = Param::flag("loud", false);
        for raw in ["true", "True", "1", "yes", "on"] {
            assert_eq!(coerce(raw, &p).unwrap(), json!(true), "{raw}");
        }
        for raw in ["false", "FALSE", "0", "no", "off"] {
            assert_eq!(coerce(raw, &p).unwrap(), json!(false), "{raw}");
        }
        assert!(coerce("maybe", &p).is_err());
    }

    #[test]
    fn test_no_default_returns_raw_string() {
        let p = Param::option("count", ParamType::Integer);
        assert_eq!(coerce("abc", &p).unwrap(), json!("abc"));
        let name = Param::option_str("name");
        assert_eq!(coerce("Bob", &name).unwrap(), json!("Bob"));
    }

    #[test]
    fn test_type_mismatch() {
        let p = Param::option_int("count", 1);
        assert_eq!(
            coerce("abc", &p),
            Err(Error::TypeMismatch {
                parameter: "count".into(),
                value: "abc".into(),
                expected: "integer",
            })
        );
    }

    #[test]
    fn test_choice_membership() {
        let p = Param::option("color", ParamType::Choice(vec!["red".into(), "blue".into()]))
            .default("red");
        assert_eq!(coerce("blue", &p).unwrap(), json!("blue"));
        assert!(coerce("green", &p).is_err());
    }

    #[test]
    fn test_schema_type_mapping() {
        assert_eq!(schema_type(&Param::option_str("s")).unwrap(), SchemaType::String);
        assert_eq!(
            schema_type(&Param::option("id", ParamType::Uuid)).unwrap(),
            SchemaType::String
        );
        assert_eq!(schema_type(&Param::option_int("i", 0)).unwrap(), SchemaType::Integer);
        assert_eq!(schema_type(&Param::option_float("f", 0.0)).unwrap(), SchemaType::Number);
        assert_eq!(schema_type(&Param::flag("b", true)).unwrap(), SchemaType::Boolean);
    }

    #[test]
    fn test_unsupported_types() {
        let path = Param::argument("src", ParamType::Path);
        assert_eq!(
            schema_type(&path),
            Err(Error::UnsupportedType {
                parameter: "src".into(),
                type_name: "PATH".into(),
            })
        );
        let choice = Param::option("mode", ParamType::Choice(vec!["a".into()]));
        assert!(matches!(schema_type(&choice), Err(Error::UnsupportedType { .. })));
    }
}
