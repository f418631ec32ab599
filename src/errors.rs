//! Error type shared by tree construction, the ensembles and prediction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

/// The kind of a column or of an observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValueKind::Numeric => write!(f, "numeric"),
            ValueKind::Categorical => write!(f, "categorical"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    /// Invalid hyperparameters, e.g. an even forest size.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("type mismatch on '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    /// Unknown column, missing observation value or inconsistent column length.
    #[error("schema error: {0}")]
    Schema(String),
    #[error("SerdeJson error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl TreeError {
    pub(crate) fn type_mismatch(column: &str, expected: ValueKind, found: ValueKind) -> Self {
        TreeError::TypeMismatch {
            column: column.to_string(),
            expected,
            found,
        }
    }
}
