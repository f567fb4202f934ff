use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Element is missing an id")]
    MissingId,

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Element {child} records parent {recorded:?} but lives under {actual:?}")]
    ParentMismatch {
        child: String,
        recorded: Option<String>,
        actual: Option<String>,
    },

    #[error("Unknown breakpoint: {0}")]
    UnknownBreakpoint(String),
}
