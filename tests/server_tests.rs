use clirest::cli::demo_app;
use clirest::{App, OutputStyle, RestConfig};
use serde_json::json;

mod common;
use common::http::{get, request};
use common::test_server::start;

#[test]
fn test_hello_world_envelope() {
    let (handle, addr) = start(demo_app(RestConfig::default()).unwrap());
    let resp = get(&addr, "/hello");
    handle.stop();
    assert_eq!(resp.status, 200);
    assert!(resp
        .header("content-type")
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        resp.json(),
        json!({"status": "success", "stdout": "Hello World!"})
    );
}

#[test]
fn test_hello2_query_parameters() {
    let (handle, addr) = start(demo_app(RestConfig::default().url_prefix("api")).unwrap());
    let resp = get(&addr, "/api/hello2?count=3&name=Bob");
    let default_count = get(&addr, "/api/hello2/?name=Ann");
    handle.stop();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json()["stdout"], "Hello Bob!\nHello Bob!\nHello Bob!");
    assert_eq!(default_count.json()["stdout"], "Hello Ann!");
}

#[test]
fn test_group_routes() {
    let (handle, addr) = start(demo_app(RestConfig::default()).unwrap());
    let init = get(&addr, "/cli/initdb");
    let drop = get(&addr, "/cli/dropdb");
    let group = get(&addr, "/cli");
    handle.stop();
    assert_eq!(init.json()["stdout"], "Initialized the database");
    assert_eq!(drop.json()["stdout"], "Dropped the database");
    assert_eq!(group.status, 404);
}

#[test]
fn test_root_redirects_to_docs() {
    let (handle, addr) = start(demo_app(RestConfig::default().url_prefix("api")).unwrap());
    let root = get(&addr, "/api/");
    let bare = get(&addr, "/api");
    handle.stop();
    assert_eq!(root.status, 302);
    assert_eq!(root.header("location"), Some("/api/apidocs/"));
    assert_eq!(bare.status, 302);
}

#[test]
fn test_redirect_without_commands() {
    let service = App::builder(RestConfig::default()).build().unwrap();
    let (handle, addr) = start(service);
    let resp = get(&addr, "/");
    let spec = get(&addr, "/apispec.json");
    handle.stop();
    assert_eq!(resp.status, 302);
    assert_eq!(resp.header("location"), Some("/apidocs/"));
    assert_eq!(spec.json()["paths"], json!({}));
}

#[test]
fn test_apispec_lists_every_route() {
    let (handle, addr) = start(demo_app(RestConfig::default().url_prefix("api")).unwrap());
    let resp = get(&addr, "/api/apispec.json");
    let ui = get(&addr, "/api/apidocs/");
    handle.stop();

    assert_eq!(resp.status, 200);
    let doc = resp.json();
    assert_eq!(doc["openapi"], "3.0.3");
    let paths: Vec<&String> = doc["paths"].as_object().unwrap().keys().collect();
    assert_eq!(
        paths,
        vec![
            "/api/cli/dropdb",
            "/api/cli/initdb",
            "/api/hello",
            "/api/hello2",
            "/api/math/add"
        ]
    );
    let op = &doc["paths"]["/api/hello2"]["get"];
    assert_eq!(op["tags"], json!(["hello2"]));
    assert_eq!(
        op["parameters"][0],
        json!({
            "name": "count",
            "in": "query",
            "schema": {"type": "integer", "default": 1},
            "description": "Number of greetings."
        })
    );
    assert_eq!(op["parameters"][1]["schema"], json!({"type": "string"}));

    assert_eq!(ui.status, 200);
    assert!(ui.body.contains("/api/apispec.json"));
}

#[test]
fn test_unknown_path_and_wrong_method() {
    let (handle, addr) = start(demo_app(RestConfig::default()).unwrap());
    let missing = get(&addr, "/nope");
    let post = request(&addr, "POST", "/hello");
    handle.stop();
    assert_eq!(missing.status, 404);
    assert_eq!(missing.json()["error"], "Not Found");
    assert_eq!(post.status, 405);
}

#[test]
fn test_type_mismatch_is_bad_request() {
    let (handle, addr) = start(demo_app(RestConfig::default()).unwrap());
    let resp = get(&addr, "/hello2?count=many&name=Bob");
    handle.stop();
    assert_eq!(resp.status, 400);
    let body = resp.json();
    assert_eq!(body["error"], "TypeMismatch");
    assert!(body["message"].as_str().unwrap().contains("count"));
}

#[test]
fn test_raw_html_mode() {
    let config = RestConfig::default().json(false).style(OutputStyle::Html);
    let (handle, addr) = start(demo_app(config).unwrap());
    let resp = get(&addr, "/hello2?count=2&name=Bob");
    let add = get(&addr, "/math/add?a=2&b=3");
    handle.stop();
    assert!(resp.header("content-type").unwrap().starts_with("text/html"));
    assert_eq!(resp.body, "<p>Hello Bob!</p><p>Hello Bob!</p>");
    assert!(add.header("content-type").unwrap().starts_with("text/plain"));
    assert_eq!(add.body, "5.0");
}

#[test]
fn test_envelopes_match_documented_schema() {
    let schema = clirest::spec::response_schema();
    let validator = jsonschema::validator_for(&schema).unwrap();

    let (handle, addr) = start(demo_app(RestConfig::default()).unwrap());
    let bodies = [
        get(&addr, "/hello").json(),
        get(&addr, "/hello2?name=Bob").json(),
        get(&addr, "/math/add?a=1&b=2").json(),
    ];
    handle.stop();
    for body in &bodies {
        assert!(validator.is_valid(body), "{body} does not match {schema}");
    }
    assert_eq!(bodies[2]["return"], json!(3.0));
    assert!(!validator.is_valid(&json!({"status": "maybe"})));
}
