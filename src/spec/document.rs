use serde::Serialize;
use std::collections::BTreeMap;

use super::fragment::SpecFragment;

pub const OPENAPI_VERSION: &str = "3.0.3";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// A fragment plus the per-route `operationId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: String,
    #[serde(flatten)]
    pub fragment: SpecFragment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathItem {
    pub get: Operation,
}

/// OpenAPI document listing every registered route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiDocument {
    pub openapi: &'static str,
    pub info: Info,
    pub paths: BTreeMap<String, PathItem>,
}

impl ApiDocument {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi: OPENAPI_VERSION,
            info: Info {
                title: title.into(),
                version: version.into(),
            },
            paths: BTreeMap::new(),
        }
    }

    /// Register the `get` operation for `path`.
    pub fn add_operation(&mut self, path: &str, fragment: SpecFragment) {
        let operation_id = path.trim_matches('/').replace('/', "_");
        self.paths.insert(
            path.to_string(),
            PathItem {
                get: Operation {
                    operation_id,
                    fragment,
                },
            },
        );
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a plain struct, map or string; serialization cannot fail.
        serde_json::to_value(self).unwrap_or_default()
    }
}
