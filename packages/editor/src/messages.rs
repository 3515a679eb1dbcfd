//! # Wire types — cross-frame messages and the apply-edit endpoint
//!
//! The parent frame and the page talk through `window.postMessage`. Every
//! message is a JSON-like object with a `type` discriminator.
//!
//! | Direction | `type` | Body |
//! |-----------|--------|------|
//! | in  | `enable-edit-mode` | optional `translations` mapping |
//! | in  | `disable-edit-mode` | — |
//! | in  | `edit-save` | `payload.newText` |
//! | out | `editEnter` / `imageEditEnter` | `payload.currentText` |
//! | out | `editApplied` | `payload.{editId, fileContent, beforeCode, afterCode}` |
//!
//! The HTTP side is a single `POST` whose request and response are
//! [`ApplyEditRequest`] and [`ApplyEditResponse`].

use serde::{Deserialize, Serialize};

use crate::translations::TranslationOverrides;

/// A message received from the parent frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "enable-edit-mode")]
    EnableEditMode {
        #[serde(default)]
        translations: Option<TranslationOverrides>,
    },
    #[serde(rename = "disable-edit-mode")]
    DisableEditMode,
    #[serde(rename = "edit-save")]
    EditSave { payload: SavePayload },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub new_text: String,
}

/// A message posted to the parent frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum OutboundMessage {
    EditEnter(EnterPayload),
    ImageEditEnter(EnterPayload),
    EditApplied(AppliedPayload),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterPayload {
    /// Text content, or the `src` of an image.
    pub current_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPayload {
    pub edit_id: String,
    pub file_content: Option<String>,
    pub before_code: Option<String>,
    pub after_code: Option<String>,
}

impl OutboundMessage {
    /// The enter message for a freshly opened session.
    pub fn enter(current_text: String, is_image: bool) -> Self {
        let payload = EnterPayload { current_text };
        if is_image {
            OutboundMessage::ImageEditEnter(payload)
        } else {
            OutboundMessage::EditEnter(payload)
        }
    }
}

/// Body of `POST /api/apply-edit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditRequest {
    pub edit_id: String,
    pub new_full_text: String,
}

/// Response of `POST /api/apply-edit`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditResponse {
    pub success: bool,
    #[serde(default)]
    pub new_file_content: Option<String>,
    #[serde(default)]
    pub before_code: Option<String>,
    #[serde(default)]
    pub after_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
