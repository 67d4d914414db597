use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("row has {found} cells but table has {expected} columns")]
    RowWidth { expected: usize, found: usize },
    #[error("column '{0}' not found")]
    ColumnNotFound(String),
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
