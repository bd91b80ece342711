//! Instruction-level failures and their wire form
//!
//! A failed instruction still produces a result: the kind-specific text below
//! wrapped in the exception sentinel, e.g.
//! `__EXCEPTION__:message:<<NO_CLASS Bogus.>>`.

use thiserror::Error;

/// Prefix marking a result string as an exception
pub const EXCEPTION_PREFIX: &str = "__EXCEPTION__:message:<<";

/// Suffix closing an exception result string
pub const EXCEPTION_SUFFIX: &str = ">>";

/// Why an instruction failed. `Display` gives the kind-specific text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Exception {
    #[error("INVALID_STATEMENT: [\"{id}\", \"{command}\"].")]
    InvalidStatement { id: String, command: String },

    /// Carries the rendered instruction, see [`crate::codec::render`]
    #[error("MALFORMED_INSTRUCTION {0}.")]
    MalformedInstruction(String),

    #[error("NO_CLASS {0}.")]
    NoSuchClass(String),

    #[error("NO_INSTANCE {0}.")]
    NoSuchInstance(String),

    #[error("NO_METHOD_IN_CLASS {method}[{arg_count}] {class}.")]
    NoSuchMethod {
        method: String,
        arg_count: usize,
        class: String,
    },

    /// The note is empty when the constructor gave no reason
    #[error("COULD_NOT_INVOKE_CONSTRUCTOR {class} {note}.")]
    ConstructorFailed { class: String, note: String },

    /// Raised by fixture code itself
    #[error("{0}.")]
    Fixture(String),
}

impl Exception {
    pub fn invalid_statement(id: &str, command: &str) -> Self {
        Self::InvalidStatement {
            id: id.to_string(),
            command: command.to_string(),
        }
    }

    pub fn no_such_method(method: &str, arg_count: usize, class: &str) -> Self {
        Self::NoSuchMethod {
            method: method.to_string(),
            arg_count,
            class: class.to_string(),
        }
    }

    pub fn constructor_failed(class: &str, note: Option<&str>) -> Self {
        Self::ConstructorFailed {
            class: class.to_string(),
            note: note.unwrap_or_default().to_string(),
        }
    }

    /// Short machine-readable kind, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidStatement { .. } => "INVALID_STATEMENT",
            Self::MalformedInstruction(_) => "MALFORMED_INSTRUCTION",
            Self::NoSuchClass(_) => "NO_CLASS",
            Self::NoSuchInstance(_) => "NO_INSTANCE",
            Self::NoSuchMethod { .. } => "NO_METHOD_IN_CLASS",
            Self::ConstructorFailed { .. } => "COULD_NOT_INVOKE_CONSTRUCTOR",
            Self::Fixture(_) => "FIXTURE",
        }
    }

    /// The sentinel-wrapped result string sent back to the client
    pub fn to_result(&self) -> String {
        format!("{EXCEPTION_PREFIX}{self}{EXCEPTION_SUFFIX}")
    }
}

/// Whether a result string reports an exception
pub fn is_exception(result: &str) -> bool {
    result.starts_with(EXCEPTION_PREFIX)
}
