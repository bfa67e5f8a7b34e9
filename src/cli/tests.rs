//! Unit tests for CLI commands

use crate::cli::{demo_app, request_target, Cli, Commands};
use crate::echo::OutputStyle;
use crate::runtime_config::RestConfig;
use clap::Parser;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["clirest", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            port, raw, style, ..
        } => {
            assert!(!raw);
            assert_eq!(style, OutputStyle::Plain);
            assert!(port > 0);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_flags() {
    let cli = Cli::try_parse_from([
        "clirest", "serve", "--port", "8081", "--prefix", "api", "--raw", "--style", "html",
    ])
    .unwrap();
    match cli.command {
        Commands::Serve {
            port,
            prefix,
            raw,
            style,
            ..
        } => {
            assert_eq!(port, 8081);
            assert_eq!(prefix, "api");
            assert!(raw);
            assert_eq!(style, OutputStyle::Html);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_bad_style_rejected() {
    assert!(Cli::try_parse_from(["clirest", "serve", "--style", "markdown"]).is_err());
}

#[test]
fn test_call_params() {
    let cli = Cli::try_parse_from(["clirest", "call", "/hello2", "count=3", "name=Bob"]).unwrap();
    match cli.command {
        Commands::Call { path, params } => {
            assert_eq!(path, "/hello2");
            assert_eq!(
                params,
                vec![
                    ("count".to_string(), "3".to_string()),
                    ("name".to_string(), "Bob".to_string())
                ]
            );
        }
        _ => panic!("Expected Call command"),
    }
    assert!(Cli::try_parse_from(["clirest", "call", "/hello2", "oops"]).is_err());
}

#[test]
fn test_request_target_encodes_query() {
    assert_eq!(request_target("hello", &[]), "/hello");
    let params = vec![("name".to_string(), "Bob Smith".to_string())];
    assert_eq!(request_target("/hello2", &params), "/hello2?name=Bob+Smith");
}

#[test]
fn test_demo_app_call_path() {
    let service = demo_app(RestConfig::default().url_prefix("api")).unwrap();
    let params = vec![
        ("count".to_string(), "2".to_string()),
        ("name".to_string(), "Bob Smith".to_string()),
    ];
    let res = service.handle("GET", &request_target("/api/hello2", &params));
    assert_eq!(res.body_json()["stdout"], "Hello Bob Smith!\nHello Bob Smith!");
}
