//! Error types and reporting for the command-line front end.
//!
//! The trie itself never fails; everything here concerns reading commands,
//! dictionaries and configuration. Errors carry a kind, a message, and
//! optionally a hint or the column in the input line where parsing stopped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed command line (quoting)
    Parse,
    /// Unknown command or bad arguments
    Command,
    /// Dictionary file could not be read
    Load,
    /// Invalid configuration value
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Parse => write!(f, "Parse error"),
            ErrorKind::Command => write!(f, "Command error"),
            ErrorKind::Load => write!(f, "Load error"),
            ErrorKind::Config => write!(f, "Config error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrieError {
    pub kind: ErrorKind,
    pub message: String,
    /// Hint shown under the message, e.g. a suggested command
    pub context: Option<String>,
    /// Character position in the input line
    pub position: Option<usize>,
}

impl TrieError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        TrieError {
            kind,
            message: message.into(),
            context: None,
            position: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_position(mut self, pos: usize) -> Self {
        self.position = Some(pos);
        self
    }

    /// Exit-style status the REPL records for this error.
    pub fn status(&self) -> i32 {
        match self.kind {
            ErrorKind::Parse => 2,
            _ => 1,
        }
    }

    /// Format the error with a caret under the offending column of `input`.
    pub fn display_with_input(&self, input: &str) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);
        let chars: Vec<char> = input.chars().collect();

        if let Some(pos) = self.position {
            if pos < chars.len() {
                let start = pos.saturating_sub(15);
                let end = (pos + 15).min(chars.len());
                let snippet: String = chars[start..end].iter().collect();

                msg.push_str(&format!("\n  near: '{}'", snippet));
                msg.push('\n');

                let offset = pos - start;
                msg.push_str(&format!("  {}{}", " ".repeat(offset + 7), "^"));
            } else {
                msg.push_str(&format!("\n  at position {} (end of input)", pos));
            }
        } else if let Some(context) = &self.context {
            msg.push_str(&format!("\n  hint: {}", context));
        }

        msg
    }

    pub fn display_simple(&self) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);
        if let Some(context) = &self.context {
            msg.push_str(&format!("\n  hint: {}", context));
        }
        msg
    }
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_simple())
    }
}

impl std::error::Error for TrieError {}

pub type TrieResult<T> = Result<T, TrieError>;
