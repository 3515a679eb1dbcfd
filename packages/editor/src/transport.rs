//! The two outward channels of edit mode: the parent frame and the
//! apply-edit endpoint.

use crate::error::EditorError;
use crate::messages::{ApplyEditRequest, ApplyEditResponse, OutboundMessage};
use crate::origin::resolve_parent_origin;

/// The frame that embeds the page.
pub trait ParentFrame {
    /// First entry of `location.ancestorOrigins`, where supported.
    fn ancestor_origin(&self) -> Option<String>;

    /// `document.referrer`.
    fn referrer(&self) -> Option<String>;

    /// Post `message` to the parent, restricted to `target_origin`.
    fn post_message(&self, message: &OutboundMessage, target_origin: &str) -> Result<(), EditorError>;

    fn parent_origin(&self) -> Option<String> {
        resolve_parent_origin(self.ancestor_origin().as_deref(), self.referrer().as_deref())
    }
}

/// Async client for `POST /api/apply-edit`.
pub trait ApplyEditClient {
    fn apply_edit(
        &self,
        request: &ApplyEditRequest,
    ) -> impl std::future::Future<Output = Result<ApplyEditResponse, EditorError>>;
}

/// Post `message` to the parent if its origin is in `allowed_origins`.
///
/// Returns the origin the message went to. Nothing is sent to an
/// unresolved or unknown origin.
pub fn post_to_allowed_parent<F: ParentFrame>(
    frame: &F,
    allowed_origins: &[String],
    message: &OutboundMessage,
) -> Result<String, EditorError> {
    match frame.parent_origin() {
        Some(origin) if allowed_origins.iter().any(|allowed| *allowed == origin) => {
            frame.post_message(message, &origin)?;
            Ok(origin)
        }
        other => Err(EditorError::UnauthorizedOrigin(other)),
    }
}
