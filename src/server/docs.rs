//! Documentation service: the OpenAPI document, the Swagger UI page and the
//! root redirect.
//!
//! Everything is rendered once when the application is assembled.

use crate::dispatcher::HandlerResponse;
use crate::error::{Error, Result};
use crate::router::Router;
use crate::spec::ApiDocument;
use http::StatusCode;
use minijinja::{context, Environment};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::router::{SPEC_FILE, UI_DIR};

/// Intern a header value for the process lifetime.
///
/// `may_minihttp` only accepts `&'static str` header lines. Values are leaked
/// once per distinct string, so rebuilding an application with the same
/// prefix reuses the earlier allocation.
fn intern(value: String) -> &'static str {
    static INTERNED: OnceLock<Mutex<HashMap<String, &'static str>>> = OnceLock::new();
    let table = INTERNED.get_or_init(|| Mutex::new(HashMap::new()));
    let mut table = match table.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(&interned) = table.get(&value) {
        return interned;
    }
    let leaked: &'static str = Box::leak(value.clone().into_boxed_str());
    table.insert(value, leaked);
    leaked
}

const UI_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "{{ spec_url }}", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

fn render_ui(title: &str, spec_url: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("apidocs", UI_TEMPLATE)
        .map_err(|e| Error::Serialize(e.to_string()))?;
    let tmpl = env
        .get_template("apidocs")
        .map_err(|e| Error::Serialize(e.to_string()))?;
    tmpl.render(context! { title => title, spec_url => spec_url })
        .map_err(|e| Error::Serialize(e.to_string()))
}

/// Pre-rendered documentation endpoints.
#[derive(Debug)]
pub struct DocService {
    prefix: String,
    /// `{prefix}/apispec.json`
    pub spec_path: String,
    /// `{prefix}/apidocs/`
    pub ui_path: String,
    /// `Location: {prefix}/apidocs/`
    location_header: &'static str,
    location: &'static str,
    document: ApiDocument,
    spec_json: Vec<u8>,
    ui_html: Vec<u8>,
}

impl DocService {
    /// Render the document for every route of `router`.
    pub fn new(router: &Router, title: &str, version: &str) -> Result<Self> {
        let prefix = router.prefix().to_string();
        let mut document = ApiDocument::new(title, version);
        for route in router.routes() {
            document.add_operation(&route.path, route.fragment.clone());
        }
        let spec_json = serde_json::to_vec_pretty(&document)?;
        let spec_path = format!("{prefix}/{SPEC_FILE}");
        let ui_path = format!("{prefix}/{UI_DIR}/");
        let ui_html = render_ui(title, &spec_path)?.into_bytes();

        let location = intern(ui_path.clone());
        let location_header = intern(format!("Location: {ui_path}"));

        Ok(Self {
            prefix,
            spec_path,
            ui_path,
            location_header,
            location,
            document,
            spec_json,
            ui_html,
        })
    }

    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    /// `Location` header line for the root redirect.
    pub fn location_header(&self) -> &'static str {
        self.location_header
    }

    fn is_root(&self, path: &str) -> bool {
        if self.prefix.is_empty() {
            path == "/" || path.is_empty()
        } else {
            path.strip_suffix('/').unwrap_or(path) == self.prefix
        }
    }

    fn is_ui(&self, path: &str) -> bool {
        path == self.ui_path || Some(path) == self.ui_path.strip_suffix('/')
    }

    /// Serve `path` if it is one of the documentation endpoints.
    pub fn handle(&self, path: &str) -> Option<HandlerResponse> {
        if self.is_root(path) {
            return Some(HandlerResponse::redirect(self.location));
        }
        if path == self.spec_path {
            return Some(HandlerResponse {
                status: StatusCode::OK,
                content_type: "application/json",
                location: None,
                body: self.spec_json.clone(),
            });
        }
        if self.is_ui(path) {
            return Some(HandlerResponse {
                status: StatusCode::OK,
                content_type: "text/html",
                location: None,
                body: self.ui_html.clone(),
            });
        }
        None
    }
}
