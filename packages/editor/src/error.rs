//! Edit-mode errors.
//!
//! Nothing here is fatal: the page keeps working and edit mode can be
//! toggled again. Errors end up as log records, see [`EditorError::report`].

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("clicked element missing data-edit-id")]
    MissingEditId,

    #[error("unauthorized parent origin: {}", .0.as_deref().unwrap_or("none"))]
    UnauthorizedOrigin(Option<String>),

    #[error("ignoring message from untrusted origin: {0}")]
    UntrustedSender(String),

    #[error("error saving changes: {0}")]
    SaveRejected(String),

    #[error("error during fetch for {edit_id}: {reason}")]
    Transport { edit_id: String, reason: String },

    #[error("invalid apply-edit response for {edit_id}: {reason}")]
    InvalidResponse { edit_id: String, reason: String },

    #[error("save requested without an active edit session")]
    NoActiveSession,

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EditorError {
    /// Log the error at the level its kind calls for.
    ///
    /// Malformed input from the page or the parent is a warning; anything
    /// that loses a save or a message is an error.
    pub fn report(&self) {
        match self {
            EditorError::MissingEditId
            | EditorError::NoActiveSession
            | EditorError::InvalidMessage(_) => tracing::warn!("[INLINE EDITOR] {self}"),
            _ => tracing::error!("[visual-editor] {self}"),
        }
    }
}
