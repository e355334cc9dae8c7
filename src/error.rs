use std::fmt;
use thiserror::Error;

/// Classifies an [`ErrorData`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Halt parsing at this reduction.
    Stop = 1,
    /// A recoverable semantic error; reduction continues with the payload in place of a value.
    SemanticError = 2,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Stop => write!(f, "stop"),
            ErrorCode::SemanticError => write!(f, "semantic-error"),
        }
    }
}

/// The payload recorded into a slot when a capturing action reports a [`SemanticError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorData {
    pub code: ErrorCode,
    pub message: Option<String>,
}

impl ErrorData {
    pub fn is_semantic_error(&self) -> bool {
        self.code == ErrorCode::SemanticError
    }
}

impl fmt::Display for ErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message} ({})", self.code),
            None => write!(f, "({})", self.code),
        }
    }
}

/// The domain error a semantic action reports to its rule.
///
/// Capturing binders record its [`ErrorData`] in place of the action's value, rather than failing the reduction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Semantic error: {data}")]
pub struct SemanticError {
    data: ErrorData,
}

impl SemanticError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            data: ErrorData {
                code: ErrorCode::SemanticError,
                message: Some(message.into()),
            },
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.data.code = code;
        self
    }

    pub fn data(&self) -> &ErrorData {
        &self.data
    }

    pub fn into_data(self) -> ErrorData {
        self.data
    }
}

impl Default for SemanticError {
    fn default() -> Self {
        Self {
            data: ErrorData {
                code: ErrorCode::SemanticError,
                message: None,
            },
        }
    }
}

/// Failure to reconstruct a typed argument from its erased slot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Argument {index} is out of range (slots={len}).")]
    OutOfRange { index: usize, len: usize },

    #[error("Argument {index} is empty (expected={expected}).")]
    EmptySlot { index: usize, expected: &'static str },

    #[error("Argument {index} has the wrong type (expected={expected}, found={found}).")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl ExtractError {
    pub fn index(&self) -> usize {
        match self {
            ExtractError::OutOfRange { index, .. }
            | ExtractError::EmptySlot { index, .. }
            | ExtractError::TypeMismatch { index, .. } => *index,
        }
    }
}

/// Failure of a semantic action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Rule '{rule}' cannot extract its arguments: {source}")]
    Rule {
        rule: String,
        #[source]
        source: ExtractError,
    },

    #[error("Action failed: {0}")]
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    /// Wrap any failure the binders do not recognize.
    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ActionError::Failed(error.into())
    }

    pub fn extract_error(&self) -> Option<&ExtractError> {
        match self {
            ActionError::Extract(error) | ActionError::Rule { source: error, .. } => Some(error),
            _ => None,
        }
    }
}
