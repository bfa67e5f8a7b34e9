//! Demonstration command tree served by the `clirest` binary.

use crate::command::{Command, Param};
use serde_json::json;

/// Number of greetings `hello2` will print at most.
const MAX_GREETINGS: i64 = 100;

pub fn hello() -> Command {
    Command::leaf("hello", |_, out| {
        out.echo("Hello World!");
        Ok(None)
    })
    .help("Print a greeting.")
}

pub fn hello2() -> Command {
    Command::leaf("hello2", |kwargs, out| {
        let count = kwargs.i64("count")?.clamp(0, MAX_GREETINGS);
        let name = kwargs.str("name")?;
        for _ in 0..count {
            out.echo(format!("Hello {name}!"));
        }
        Ok(None)
    })
    .help("Simple program that greets NAME for a total of COUNT times.")
    .param(Param::option_int("count", 1).help("Number of greetings."))
    .param(Param::option_str("name").help("The person to greet."))
}

pub fn cli() -> Command {
    Command::group("cli")
        .help("Database maintenance.")
        .subcommand(
            Command::leaf("initdb", |_, out| {
                out.echo("Initialized the database");
                Ok(None)
            })
            .help("Create the database."),
        )
        .subcommand(
            Command::leaf("dropdb", |_, out| {
                out.echo("Dropped the database");
                Ok(None)
            })
            .help("Remove the database."),
        )
}

pub fn math() -> Command {
    Command::group("math").subcommand(
        Command::leaf("add", |kwargs, out| {
            let (a, b) = (kwargs.f64("a")?, kwargs.f64("b")?);
            let sum = a + b;
            out.echo(format!("{a} + {b} = {sum}"));
            Ok(Some(json!(sum)))
        })
        .help("Add two numbers and return the sum.")
        .param(Param::option_float("a", 0.0).help("First operand."))
        .param(Param::option_float("b", 0.0).help("Second operand.")),
    )
}

/// Every top-level demo command.
pub fn commands() -> Vec<Command> {
    vec![hello(), hello2(), cli(), math()]
}
