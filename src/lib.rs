//! Cmdshell
//!
//! This crate provides building blocks for interactive, text-prompt-driven
//! command-line interfaces. A program registers named commands — each with
//! aliases, a description, an ordered list of prompts and a handler — and
//! hands control to a shell loop that resolves user input to a command,
//! collects and casts its parameter values and invokes the handler.
//!
//! # Key Features
//!
//! - **Alias Resolution**: Commands carry any number of aliases; every one
//!   resolves to the same command
//! - **Parameter Prompts**: Ordered prompts with named or positional
//!   binding and pluggable cast functions
//! - **Global Values**: Shell-wide named values passed to every handler,
//!   overridden by same-named command prompts
//! - **Pluggable Console**: The loop talks to a narrow display/read-line
//!   trait, so any console, pipe or test harness slots in
//! - **Convenience Casts**: Ready-made date and time-delta prompts
//!
//! # Examples
//!
//! ```no_run
//! use cmdshell::command::Command;
//! use cmdshell::console::StdConsole;
//! use cmdshell::prompt::Prompt;
//! use cmdshell::shell::Shell;
//!
//! let mut shell = Shell::new(Some("inventory console"));
//! shell.set_global("user", "root");
//! shell.add_command(
//!     Command::new("greet", "Greet someone", |args| {
//!         println!("Hello {}!", args.positional[0]);
//!         Ok(())
//!     })
//!     .add_alias("hi")
//!     .add_parameter(Prompt::new("Name? ")),
//! )?;
//! shell.start(&mut StdConsole::new())?;
//! # Ok::<(), cmdshell::error::Error>(())
//! ```

pub mod casts;
pub mod command;
pub mod console;
pub mod error;
pub mod prompt;
pub mod shell;
pub mod value;
