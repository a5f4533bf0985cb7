use thiserror::Error;

/// Failures surfaced by a conversion.
///
/// Everything except [`ToolError::Unexpected`] is shown to the user verbatim;
/// unexpected failures are logged in full and reported with a generic message.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(
        "No valid pages selected by \"{expression}\". Check the range syntax (e.g. \"1-3, 5, 8\") \
         and that the pages exist; the document has {total_pages} page(s)."
    )]
    InvalidSelection {
        expression: String,
        total_pages: u32,
    },

    #[error("Could not read '{name}': {detail}")]
    DocumentLoad { name: String, detail: String },

    #[error("{0}")]
    InputRejected(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ToolError {
    pub fn document_load(name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ToolError::DocumentLoad {
            name: name.into(),
            detail: err.to_string(),
        }
    }

    pub fn unexpected(context: &str, err: impl std::fmt::Display) -> Self {
        ToolError::Unexpected(format!("{}: {}", context, err))
    }

    /// The message a user sees when the conversion fails.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::Unexpected(_) => {
                "Something went wrong while converting your file. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
