use std::borrow::Cow;

use crate::console::Console;
use crate::error::Result;
use crate::value::Value;

type Producer = Box<dyn Fn() -> String>;
type CastFn = Box<dyn Fn(&str) -> Result<Value>>;

/// The source of a prompt's display text: a fixed string, or a producer
/// evaluated at every acquisition so the text can embed current state.
pub enum PromptText {
    Literal(String),
    Producer(Producer),
}

/// A single question put to the user, producing one typed value.
///
/// A prompt holds its display text, an optional parameter name (named
/// binding if present, positional otherwise) and a cast function applied to
/// the raw input line. The default cast passes the input through as
/// [`Value::Text`]. Prompts carry no state between invocations of their
/// owning command.
pub struct Prompt {
    text: PromptText,
    name: Option<String>,
    cast: CastFn,
}

impl Prompt {
    /// Creates an unnamed prompt with fixed text and the identity cast.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: PromptText::Literal(text.into()),
            name: None,
            cast: Box::new(|input| Ok(Value::Text(input.to_string()))),
        }
    }

    /// Creates a prompt whose text is re-produced at every acquisition.
    pub fn dynamic(producer: impl Fn() -> String + 'static) -> Self {
        Self {
            text: PromptText::Producer(Box::new(producer)),
            name: None,
            cast: Box::new(|input| Ok(Value::Text(input.to_string()))),
        }
    }

    /// Binds this prompt's value to the named handler parameter instead of
    /// delivering it positionally.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_cast(mut self, cast: impl Fn(&str) -> Result<Value> + 'static) -> Self {
        self.cast = Box::new(cast);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Asks the question once: resolves the prompt text, displays it, blocks
    /// for one line of input and applies the cast.
    ///
    /// Returns the parameter name (`None` for positional prompts) paired
    /// with the cast value.
    ///
    /// # Errors
    ///
    /// Returns an error if the console fails or the cast rejects the input.
    /// A cast failure propagates to the caller; the owning command aborts
    /// the invocation rather than re-prompting.
    pub fn acquire(&self, console: &mut dyn Console) -> Result<(Option<&str>, Value)> {
        let text: Cow<'_, str> = match &self.text {
            PromptText::Literal(literal) => Cow::Borrowed(literal),
            PromptText::Producer(producer) => Cow::Owned(producer()),
        };

        console.display(&text)?;
        let raw = console.read_line()?;
        let value = (self.cast)(&raw)?;

        Ok((self.name.as_deref(), value))
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
