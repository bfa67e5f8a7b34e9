use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::bridge::{schema_type, SchemaType};
use crate::command::{Command, Param};
use crate::error::Result;

/// Separator between the help text and the YAML block of a doc string.
const DOC_SEPARATOR: &str = "\n---\n";

/// Schema of a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub ty: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: &'static str,
    pub schema: ParameterSchema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSpec {
    pub description: String,
    pub content: BTreeMap<String, MediaType>,
}

/// OpenAPI operation fields derived from one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecFragment {
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    pub parameters: Vec<ParameterSpec>,
    pub responses: BTreeMap<String, ResponseSpec>,
}

/// The envelope schema shared by every route.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "required": ["status"],
        "properties": {
            "status": {
                "type": "string",
                "enum": ["success", "failure"],
                "description": "Indication of whether the API call was a success or a failure."
            },
            "return": {
                "description": "Value from return statement."
            },
            "stdout": {
                "type": "string",
                "description": "Output of echo calls."
            }
        }
    })
}

/// Describe one parameter as a query parameter.
///
/// `default` is only emitted when present and non-null; `description` only for
/// options that carry help text.
pub fn to_param(param: &Param) -> Result<ParameterSpec> {
    let description = if param.is_option() {
        param.help.clone().filter(|h| !h.is_empty())
    } else {
        None
    };
    Ok(ParameterSpec {
        name: param.name.clone(),
        location: "query",
        schema: ParameterSchema {
            ty: schema_type(param)?,
            default: param.default_value().cloned(),
        },
        description,
    })
}

/// Build the specification fragment for a command.
///
/// # Errors
///
/// `UnsupportedType` if any parameter type has no schema mapping.
pub fn build_spec(command: &Command) -> Result<SpecFragment> {
    let parameters = command
        .params()
        .iter()
        .map(to_param)
        .collect::<Result<Vec<_>>>()?;

    let mut content = BTreeMap::new();
    content.insert(
        "application/json".to_string(),
        MediaType {
            schema: response_schema(),
        },
    );
    let mut responses = BTreeMap::new();
    responses.insert(
        "200".to_string(),
        ResponseSpec {
            description: format!("Result of running `{}`.", command.name),
            content,
        },
    );

    Ok(SpecFragment {
        tags: vec![command.name.clone()],
        summary: command.help_text().to_string(),
        parameters,
        responses,
    })
}

/// Serialize a fragment to the documentation string attached to a route.
pub fn render(fragment: &SpecFragment, help: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(fragment)?;
    if help.is_empty() {
        Ok(yaml)
    } else {
        Ok([help, yaml.as_str()].join(DOC_SEPARATOR))
    }
}
