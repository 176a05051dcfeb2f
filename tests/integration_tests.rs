//! Integration tests for cmdshell
//!
//! These tests drive complete shell sessions over a scripted console and
//! assert on the argument sets delivered to handlers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::rc::Rc;

use chrono::{Duration, NaiveDate};
use cmdshell::casts;
use cmdshell::command::{Args, Command};
use cmdshell::console::Console;
use cmdshell::error::{Error, Result};
use cmdshell::prompt::Prompt;
use cmdshell::shell::Shell;
use cmdshell::value::Value;

/// Console fed from a fixed script of input lines, capturing all output.
struct ScriptConsole {
    inputs: VecDeque<String>,
    output: String,
}

impl ScriptConsole {
    fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(ToString::to_string).collect(),
            output: String::new(),
        }
    }
}

impl Console for ScriptConsole {
    fn display(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        self.inputs
            .pop_front()
            .ok_or_else(|| std::io::Error::new(ErrorKind::UnexpectedEof, "script exhausted").into())
    }
}

/// Dispatch and registration logs show up with `RUST_LOG=debug cargo test`.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn recorder() -> (Rc<RefCell<Vec<Args>>>, impl FnMut(Args) -> Result<()>) {
    init_logging();
    let calls: Rc<RefCell<Vec<Args>>> = Rc::default();
    let calls_in_handler = Rc::clone(&calls);
    (calls, move |args| {
        calls_in_handler.borrow_mut().push(args);
        Ok(())
    })
}

/// An aliased command with one unnamed prompt delivers the prompted value
/// positionally.
#[test]
fn test_alias_invocation_with_positional_prompt() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell
        .add_command(
            Command::new("greet", "Greet someone", handler)
                .add_alias("hi")
                .add_parameter(Prompt::new("Name? ")),
        )
        .unwrap();

    let mut console = ScriptConsole::new(&["hi", "Ada", "quit"]);
    shell.start(&mut console).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].positional, vec![Value::from("Ada")]);
    assert!(calls[0].named.is_empty());
    assert!(console.output.contains("Name? "));
}

/// A global set on the shell reaches a command with no prompts of its own.
#[test]
fn test_global_flows_into_handler() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell.set_global("user", "root");
    shell
        .add_command(Command::new("whoami", "Show the current user", handler))
        .unwrap();

    let mut console = ScriptConsole::new(&["whoami", "quit"]);
    shell.start(&mut console).unwrap();

    assert_eq!(calls.borrow()[0].get("user"), Some(&Value::from("root")));
}

/// A prompt named like a global shadows it for that invocation, and only
/// for that invocation.
#[test]
fn test_named_prompt_shadows_global_per_invocation() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell.set_global("user", "root");
    shell
        .add_command(
            Command::new("su", "Switch user", handler)
                .add_parameter(Prompt::new("User? ").named("user")),
        )
        .unwrap();

    let mut console = ScriptConsole::new(&["su", "alice", "quit"]);
    shell.start(&mut console).unwrap();

    assert_eq!(calls.borrow()[0].get("user"), Some(&Value::from("alice")));
    // The shadowing was per-invocation: the shell's table still holds root.
    assert_eq!(shell.globals().get("user"), Some(&Value::from("root")));
}

/// An unregistered alias is reported inline and the session keeps going.
#[test]
fn test_unknown_command_keeps_session_alive() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell
        .add_command(Command::new("greet", "Greet someone", handler))
        .unwrap();

    let mut console = ScriptConsole::new(&["gret", "greet", "quit"]);
    shell.start(&mut console).unwrap();

    assert!(console.output.contains("Invalid command: gret"));
    assert_eq!(calls.borrow().len(), 1);
}

/// `quit` returns from `start()` without reading further input.
#[test]
fn test_quit_stops_reading() {
    init_logging();
    let mut shell = Shell::new(None);
    let mut console = ScriptConsole::new(&["quit", "never-read"]);

    shell.start(&mut console).unwrap();

    assert!(matches!(console.read_line().as_deref(), Ok("never-read")));
}

/// Positional values arrive in prompt-definition order, before named
/// values, even when named prompts are interleaved between them.
#[test]
fn test_binding_order_with_interleaved_prompts() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell.set_global("region", "eu-west-1");
    shell
        .add_command(
            Command::new("deploy", "Deploy a service", handler)
                .add_parameter(Prompt::new("Service? "))
                .add_parameter(Prompt::new("Env? ").named("env"))
                .add_parameter(Prompt::new("Version? ")),
        )
        .unwrap();

    let mut console = ScriptConsole::new(&["deploy", "api", "prod", "1.4.2", "quit"]);
    shell.start(&mut console).unwrap();

    let calls = calls.borrow();
    assert_eq!(
        calls[0].positional,
        vec![Value::from("api"), Value::from("1.4.2")]
    );
    assert_eq!(calls[0].get("env"), Some(&Value::from("prod")));
    assert_eq!(calls[0].get("region"), Some(&Value::from("eu-west-1")));
}

/// The date and duration convenience prompts feed typed values through a
/// full session.
#[test]
fn test_date_and_duration_prompts_in_session() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell
        .add_command(
            Command::new("log-time", "Log time against a date", handler)
                .add_parameter(casts::date_prompt().named("day"))
                .add_parameter(casts::duration_prompt().named("spent")),
        )
        .unwrap();

    let mut console = ScriptConsole::new(&["log-time", "2024-06-15", "1d 02:30:00", "quit"]);
    shell.start(&mut console).unwrap();

    let calls = calls.borrow();
    assert_eq!(
        calls[0].get("day"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()))
    );
    assert_eq!(
        calls[0].get("spent"),
        Some(&Value::Duration(
            Duration::days(1) + Duration::hours(2) + Duration::minutes(30)
        ))
    );
}

/// A malformed date aborts the invocation, is reported, and the next
/// command still runs.
#[test]
fn test_bad_cast_reported_then_session_continues() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell
        .add_command(
            Command::new("when", "Pick a date", handler)
                .add_parameter(casts::date_prompt().named("day")),
        )
        .unwrap();

    let mut console = ScriptConsole::new(&["when", "tomorrow", "when", "2024-01-02", "quit"]);
    shell.start(&mut console).unwrap();

    assert!(console.output.contains("Invalid date `tomorrow`"));
    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].get("day"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()))
    );
}

/// A failing handler does not end the session.
#[test]
fn test_handler_failure_is_survivable() {
    init_logging();
    let mut shell = Shell::new(None);
    shell
        .add_command(Command::new("flaky", "Fails once in a while", |_| {
            Err(Error::handler("backend unavailable"))
        }))
        .unwrap();

    let mut console = ScriptConsole::new(&["flaky", "cmds", "quit"]);
    shell.start(&mut console).unwrap();

    assert!(console.output.contains("Command failed: backend unavailable"));
    assert!(console.output.contains("flaky : Fails once in a while"));
}

/// Invoking the same command twice with the same input yields identical
/// argument sets; prompts memoize nothing.
#[test]
fn test_invocations_are_stateless() {
    let (calls, handler) = recorder();

    let mut shell = Shell::new(None);
    shell.set_global("user", "root");
    shell
        .add_command(
            Command::new("tag", "Tag a build", handler)
                .add_parameter(Prompt::new("Tag? "))
                .add_parameter(Prompt::new("Owner? ").named("owner")),
        )
        .unwrap();

    let mut console =
        ScriptConsole::new(&["tag", "v1", "ops", "tag", "v1", "ops", "quit"]);
    shell.start(&mut console).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

/// The banner and hint appear for a named shell, and the multi-word
/// built-in alias resolves.
#[test]
fn test_named_shell_banner_and_multiword_alias() {
    init_logging();
    let mut shell = Shell::new(Some("build console"));
    let mut console = ScriptConsole::new(&["show commands", "exit"]);

    shell.start(&mut console).unwrap();

    assert!(console.output.contains("You have entered the build console"));
    assert!(console
        .output
        .contains("Type 'cmds' to see the list of available commands"));
    assert!(console.output.contains("commands : Show available commands"));
    assert!(console.output.contains("quit : Quit"));
    assert!(console.output.contains("Leaving the build console"));
}
