//! Error type shared by the layout pipeline, the input parsers and the CLI.

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The host asked to abandon the layout pass.
    #[error("layout cancelled")]
    Cancelled,

    /// Some vertices cannot be reached from the root and the policy rejects them.
    #[error("{count} vertices are unreachable from the root: {}", .vertices.join(", "))]
    Unreachable { count: usize, vertices: Vec<String> },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{0}")]
    InvalidAddress(String),

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
