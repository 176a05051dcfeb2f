use indexmap::IndexMap;
use log::debug;

use crate::console::Console;
use crate::error::Result;
use crate::prompt::Prompt;
use crate::value::Value;

pub type Handler = Box<dyn FnMut(Args) -> Result<()>>;

/// The merged argument set delivered to a command handler: positional
/// values in prompt-definition order, followed by the named values (globals
/// overlaid with command-local prompt values).
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub positional: Vec<Value>,
    pub named: IndexMap<String, Value>,
}

impl Args {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }
}

pub(crate) enum Action {
    Run(Handler),
    Quit,
    ListCommands,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActionKind {
    Run,
    Quit,
    ListCommands,
}

/// A named, aliased unit of work: a description, an ordered list of prompts
/// and a handler invoked with the collected values.
///
/// The alias given at construction stays the default alias shown in
/// listings regardless of later additions. Prompt order is significant: it
/// fixes both the order questions are asked in and the order positional
/// values are delivered to the handler.
pub struct Command {
    aliases: Vec<String>,
    description: String,
    prompts: Vec<Prompt>,
    pub(crate) action: Action,
}

impl Command {
    pub fn new(
        default_alias: impl Into<String>,
        description: impl Into<String>,
        handler: impl FnMut(Args) -> Result<()> + 'static,
    ) -> Self {
        Self {
            aliases: vec![default_alias.into()],
            description: description.into(),
            prompts: Vec::new(),
            action: Action::Run(Box::new(handler)),
        }
    }

    pub(crate) fn builtin(
        default_alias: impl Into<String>,
        description: impl Into<String>,
        action: Action,
    ) -> Self {
        Self {
            aliases: vec![default_alias.into()],
            description: description.into(),
            prompts: Vec::new(),
            action,
        }
    }

    /// Adds another alias that can be used to invoke the command, e.g. some
    /// users prefer `quit`, others `exit`.
    #[must_use]
    pub fn add_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds a prompt whose value is passed to the handler. Accepts a
    /// [`Prompt`] or a plain string (which becomes an unnamed prompt with
    /// the identity cast).
    #[must_use]
    pub fn add_parameter(mut self, prompt: impl Into<Prompt>) -> Self {
        self.prompts.push(prompt.into());
        self
    }

    pub fn default_alias(&self) -> &str {
        &self.aliases[0]
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn action_kind(&self) -> ActionKind {
        match self.action {
            Action::Run(_) => ActionKind::Run,
            Action::Quit => ActionKind::Quit,
            Action::ListCommands => ActionKind::ListCommands,
        }
    }

    /// Runs the prompts in definition order, merges the collected values
    /// with the given globals and calls the handler.
    ///
    /// Unnamed prompt values are delivered positionally, in definition
    /// order, before any named values. The named set starts as a copy of
    /// the globals; a prompt named like a global overwrites it for this
    /// invocation only.
    ///
    /// # Errors
    ///
    /// Any prompt acquisition failure (console or cast) aborts the
    /// invocation before the handler runs. Handler failures are returned to
    /// the caller; the shell loop reports them and keeps running.
    pub fn invoke(
        &mut self,
        globals: &IndexMap<String, Value>,
        console: &mut dyn Console,
    ) -> Result<()> {
        let mut positional: Vec<Value> = Vec::new();
        let mut named: IndexMap<String, Value> = globals.clone();

        for prompt in &self.prompts {
            let (name, value) = prompt.acquire(console)?;
            match name {
                Some(name) => {
                    named.insert(name.to_string(), value);
                }
                None => positional.push(value),
            }
        }

        debug!(
            "invoking `{}` with {} positional and {} named argument(s)",
            self.default_alias(),
            positional.len(),
            named.len()
        );

        match &mut self.action {
            Action::Run(handler) => handler(Args { positional, named }),
            _ => Ok(()),
        }
    }
}
