use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, warn};

use crate::command::{ActionKind, Command};
use crate::console::Console;
use crate::error::{Error, Result};
use crate::value::Value;

/// The interactive read-eval loop: a registry of commands keyed by alias, a
/// table of global values, and `start()`.
///
/// Two commands are built in and registered at construction: `quit`/`exit`
/// terminates the loop, and `commands` (aliases `cmds` and `show commands`)
/// lists every registered command. Registering them up front means a user
/// command that collides with a built-in alias is rejected at
/// [`Shell::add_command`] time like any other duplicate.
pub struct Shell {
    name: Option<String>,
    commands: Vec<Command>,
    registry: IndexMap<String, usize>,
    globals: IndexMap<String, Value>,
}

impl Shell {
    pub fn new(name: Option<&str>) -> Self {
        let mut shell = Self {
            name: name.map(ToString::to_string),
            commands: Vec::new(),
            registry: IndexMap::new(),
            globals: IndexMap::new(),
        };

        shell.insert_unchecked(
            Command::builtin(
                "commands",
                "Show available commands",
                crate::command::Action::ListCommands,
            )
            .add_alias("cmds")
            .add_alias("show commands"),
        );
        shell.insert_unchecked(
            Command::builtin("quit", "Quit", crate::command::Action::Quit).add_alias("exit"),
        );

        shell
    }

    /// Registers a command under every one of its aliases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAlias`] if any alias is already registered
    /// (or repeated within the command itself) and [`Error::EmptyAlias`]
    /// for an empty alias. On failure nothing is registered: either all of
    /// the command's aliases go in, or none do.
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for alias in command.aliases() {
            if alias.is_empty() {
                return Err(Error::EmptyAlias);
            }
            if self.registry.contains_key(alias.as_str()) || !seen.insert(alias.as_str()) {
                return Err(Error::DuplicateAlias(alias.clone()));
            }
        }

        self.insert_unchecked(command);
        Ok(())
    }

    /// Sets a value passed with the named arguments to every command
    /// invocation. A prompt with the same name overrides it for that
    /// invocation.
    pub fn set_global(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.globals.insert(name.into(), value.into());
    }

    /// Looks up a command by alias. Exact, case-sensitive match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] if the alias is not registered.
    pub fn resolve(&self, alias: &str) -> Result<&Command> {
        self.registry
            .get(alias)
            .map(|&index| &self.commands[index])
            .ok_or_else(|| Error::UnknownCommand(alias.to_string()))
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn globals(&self) -> &IndexMap<String, Value> {
        &self.globals
    }

    /// Runs the read-eval loop until the user invokes the quit command.
    ///
    /// Each iteration displays the ` # ` marker, reads one line, trims it
    /// and resolves it against the alias registry. Unknown commands, cast
    /// failures and handler failures are all reported through the console
    /// and the loop continues; this is the single recovery boundary.
    /// Nothing leaves `start()` except an explicit quit or a console
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails.
    pub fn start(&mut self, console: &mut dyn Console) -> Result<()> {
        if let Some(name) = &self.name {
            console.display(&format!("You have entered the {name}\n"))?;
            console.display("Type 'cmds' to see the list of available commands\n")?;
        }

        loop {
            console.display(" # ")?;
            let line = console.read_line()?;
            let input = line.trim();

            let Some(index) = self.registry.get(input).copied() else {
                warn!("no command registered for `{input}`");
                console.display(&format!("Invalid command: {input}\n"))?;
                continue;
            };

            debug!(
                "resolved `{input}` to `{}`",
                self.commands[index].default_alias()
            );

            match self.commands[index].action_kind() {
                ActionKind::Quit => {
                    self.farewell(console)?;
                    return Ok(());
                }
                ActionKind::ListCommands => self.list_commands(console)?,
                ActionKind::Run => {
                    let Self {
                        commands, globals, ..
                    } = self;
                    if let Err(invocation_error) = commands[index].invoke(globals, console) {
                        console.display(&format!("{invocation_error}\n"))?;
                    }
                }
            }
        }
    }

    fn list_commands(&self, console: &mut dyn Console) -> Result<()> {
        for command in &self.commands {
            console.display(&format!(
                "{} : {}\n",
                command.default_alias(),
                command.description()
            ))?;
        }
        Ok(())
    }

    fn farewell(&self, console: &mut dyn Console) -> Result<()> {
        match &self.name {
            Some(name) => console.display(&format!("Leaving the {name}\n")),
            None => console.display("See YA!\n"),
        }
    }

    fn insert_unchecked(&mut self, command: Command) {
        let index = self.commands.len();
        for alias in command.aliases() {
            self.registry.insert(alias.clone(), index);
        }
        debug!(
            "registered `{}` with aliases: {}",
            command.default_alias(),
            command.aliases().iter().join(", ")
        );
        self.commands.push(command);
    }
}
