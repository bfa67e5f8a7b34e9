use super::{normalize_prefix, MountOptions, Router};
use crate::command::{Command, Param, ParamType};
use crate::error::Error;
use http::Method;

fn noop(name: &str) -> Command {
    Command::leaf(name, |_, _| Ok(None))
}

fn cli() -> Command {
    Command::group("cli")
        .subcommand(noop("initdb"))
        .subcommand(noop("dropdb"))
}

#[test]
fn test_normalize_prefix() {
    assert_eq!(normalize_prefix(""), "");
    assert_eq!(normalize_prefix("/"), "");
    assert_eq!(normalize_prefix("api"), "/api");
    assert_eq!(normalize_prefix("/api/v1/"), "/api/v1");
}

#[test]
fn test_top_level_leaf() {
    let mut router = Router::new("");
    assert_eq!(router.mount(&noop("hello"), MountOptions::default()).unwrap(), 1);
    assert_eq!(router.routes()[0].path, "/hello");
    assert!(router.route(&Method::GET, "/hello").is_some());
    assert!(router.route(&Method::GET, "/hello/").is_some());
    assert!(router.route(&Method::GET, "/hello//").is_none());
}

#[test]
fn test_group_paths() {
    let mut router = Router::new("");
    router.mount(&cli(), MountOptions::default()).unwrap();
    let paths: Vec<_> = router.routes().iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/cli/initdb", "/cli/dropdb"]);
    assert!(router.route(&Method::GET, "/cli").is_none());
    let m = router.route(&Method::GET, "/cli/dropdb").unwrap();
    assert_eq!(m.route.command.name, "dropdb");
    assert_eq!(m.route.groups, vec!["cli"]);
}

#[test]
fn test_nested_groups_and_prefix() {
    let tree = Command::group("ops").subcommand(
        Command::group("db")
            .subcommand(noop("migrate"))
            .subcommand(Command::group("empty")),
    );
    let mut router = Router::new("/api/");
    assert_eq!(router.mount(&tree, MountOptions::default()).unwrap(), 1);
    assert_eq!(router.routes()[0].path, "/api/ops/db/migrate");
    assert_eq!(router.routes()[0].groups, vec!["ops", "db"]);
}

#[test]
fn test_method_must_be_get() {
    let mut router = Router::new("");
    router.mount(&noop("hello"), MountOptions::default()).unwrap();
    assert!(router.route(&Method::POST, "/hello").is_none());
    assert!(router.has_path("/hello/"));
    assert!(!router.has_path("/nope"));
}

#[test]
fn test_duplicate_sibling_rejected() {
    let tree = Command::group("cli")
        .subcommand(noop("initdb"))
        .subcommand(noop("initdb"));
    let mut router = Router::new("");
    assert!(matches!(
        router.mount(&tree, MountOptions::default()),
        Err(Error::InvalidCommand(_))
    ));
    assert!(router.routes().is_empty());
}

#[test]
fn test_duplicate_route_across_mounts_rejected() {
    let mut router = Router::new("");
    router.mount(&cli(), MountOptions::default()).unwrap();
    let err = router.mount(&cli(), MountOptions::default()).unwrap_err();
    assert!(err.to_string().contains("/cli/initdb"));
    assert_eq!(router.routes().len(), 2);
}

#[test]
fn test_bad_names_rejected() {
    let mut router = Router::new("");
    for name in ["", "a/b", "has space"] {
        assert!(matches!(
            router.mount(&noop(name), MountOptions::default()),
            Err(Error::InvalidCommand(_))
        ));
    }
}

#[test]
fn test_documentation_paths_are_reserved() {
    for prefix in ["", "api"] {
        let mut router = Router::new(prefix);
        for name in ["apidocs", "apispec.json"] {
            let err = router.mount(&noop(name), MountOptions::default()).unwrap_err();
            assert!(matches!(err, Error::InvalidCommand(_)));
            assert!(err.to_string().contains("reserved"));
        }
        let tree = Command::group("tools").subcommand(noop("ok")).subcommand(noop("apidocs"));
        assert!(router.mount(&tree, MountOptions::default()).is_err());
        assert!(router.routes().is_empty());
    }

    // only the exact documentation paths are taken
    let mut router = Router::new("api");
    let nested = Command::group("apidocs").subcommand(noop("apispec.json"));
    assert_eq!(router.mount(&nested, MountOptions::default()).unwrap(), 1);
    assert!(router.has_path("/api/apidocs/apispec.json"));
}

#[test]
fn test_unsupported_type_fails_at_mount() {
    let tree = Command::group("files").subcommand(noop("ls")).subcommand(
        Command::leaf("cat", |_, _| Ok(None)).param(Param::argument("file", ParamType::Path)),
    );
    let mut router = Router::new("");
    assert!(matches!(
        router.mount(&tree, MountOptions::default()),
        Err(Error::UnsupportedType { .. })
    ));
    // nothing from the failed tree is registered
    assert!(router.routes().is_empty());
}

#[test]
fn test_doc_string_cached_on_entry() {
    let mut router = Router::new("");
    let hello = noop("hello").help("Say hello.");
    router.mount(&hello, MountOptions::default()).unwrap();
    let entry = &router.routes()[0];
    assert!(entry.doc.starts_with("Say hello.\n---\n"));
    assert_eq!(entry.fragment.tags, vec!["hello"]);
}
