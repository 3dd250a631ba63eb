use thiserror::Error;

/// Conditions that end an extraction run without a menu.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("an extraction is already running on this pipeline")]
    AlreadyProcessing,

    #[error("no dishes found on the menu")]
    NoDishesFound,

    #[error("extraction cancelled")]
    Cancelled,
}
