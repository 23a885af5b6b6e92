use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The resource could not be read, or no delimiter strategy produced a table.
    #[error("Failed to load '{path}': {reason}")]
    Load { path: String, reason: String },

    #[error("Table '{table}' is missing expected column '{column}'")]
    Schema { table: String, column: String },

    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EngineError {
    pub fn load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn schema(table: impl Into<String>, column: impl Into<String>) -> Self {
        EngineError::Schema {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Failures that stop a page from rendering and are reported to the user.
    pub fn halts_page(&self) -> bool {
        matches!(
            self,
            EngineError::Load { .. } | EngineError::Schema { .. } | EngineError::EmptyDataset(_)
        )
    }
}
