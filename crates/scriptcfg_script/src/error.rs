use rquickjs::convert::Coerced;
use rquickjs::CaughtError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One compiler message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// 1-based line within the script, when the engine reports one
    pub line: Option<u32>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The script is not valid code.
#[derive(Debug, Clone, Error)]
#[error("failed to compile '{}': {}", path.display(), summary(diagnostics))]
pub struct CompileError {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

fn summary(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(Diagnostic::to_string)
        .unwrap_or_else(|| "no diagnostics reported".to_string())
}

/// The script compiled, ran, and threw.
///
/// Displays as the thrown message, untouched.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
    pub stack: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("configuration entry '{name}' cannot be stored: {reason}")]
    Unsupported { name: String, reason: String },

    #[error("script engine failure: {0}")]
    Engine(String),
}

impl From<rquickjs::Error> for ScriptError {
    fn from(err: rquickjs::Error) -> Self {
        ScriptError::Engine(err.to_string())
    }
}

/// Message, stack and line of whatever the engine caught.
pub(crate) struct Thrown {
    pub message: String,
    pub stack: Option<String>,
    pub line: Option<i32>,
}

impl Thrown {
    pub fn from_caught(caught: CaughtError<'_>) -> Self {
        match caught {
            CaughtError::Exception(exception) => Self {
                message: exception.message().unwrap_or_default(),
                stack: exception.stack(),
                line: exception
                    .as_object()
                    .get::<_, Option<i32>>("lineNumber")
                    .ok()
                    .flatten(),
            },
            CaughtError::Value(value) => {
                let message = if let Some(text) = value.as_string() {
                    text.to_string().ok()
                } else {
                    value
                        .as_object()
                        .and_then(|object| object.get::<_, Option<String>>("message").ok())
                        .flatten()
                };
                let message = message
                    .or_else(|| value.get::<Coerced<String>>().ok().map(|c| c.0))
                    .unwrap_or_default();

                Self {
                    message,
                    stack: None,
                    line: None,
                }
            }
            CaughtError::Error(err) => Self {
                message: err.to_string(),
                stack: None,
                line: None,
            },
        }
    }
}

impl From<Thrown> for ExecutionError {
    fn from(thrown: Thrown) -> Self {
        Self {
            message: thrown.message,
            stack: thrown.stack,
        }
    }
}
