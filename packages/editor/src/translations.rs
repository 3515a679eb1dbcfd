//! Tooltip strings shown over elements that cannot be edited in place.
//!
//! The parent frame may localise these when it enables edit mode. Overrides
//! are merged field by field, so a partial mapping only replaces the keys it
//! names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The active tooltip strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    #[serde(default = "default_disabled_tooltip_text")]
    pub disabled_tooltip_text: String,
    #[serde(default = "default_disabled_tooltip_text_image")]
    pub disabled_tooltip_text_image: String,
}

/// A partial set of strings received with `enable-edit-mode`.
///
/// Decoding never fails: unknown keys are ignored and known keys holding
/// anything but a string are dropped with a warning, so a bad mapping
/// cannot keep edit mode from being enabled.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct TranslationOverrides {
    pub disabled_tooltip_text: Option<String>,
    pub disabled_tooltip_text_image: Option<String>,
}

impl From<Value> for TranslationOverrides {
    fn from(value: Value) -> Self {
        let text = |key: &str| match value.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                tracing::warn!("ignoring non-string translation {key}: {other}");
                None
            }
        };
        Self {
            disabled_tooltip_text: text("disabledTooltipText"),
            disabled_tooltip_text_image: text("disabledTooltipTextImage"),
        }
    }
}

fn default_disabled_tooltip_text() -> String {
    "This text can be changed only through chat.".to_string()
}

fn default_disabled_tooltip_text_image() -> String {
    "This image can only be changed through chat.".to_string()
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            disabled_tooltip_text: default_disabled_tooltip_text(),
            disabled_tooltip_text_image: default_disabled_tooltip_text_image(),
        }
    }
}

impl Translations {
    /// Apply every key present in `overrides`, keeping the rest.
    pub fn merge(&mut self, overrides: &TranslationOverrides) {
        if let Some(text) = &overrides.disabled_tooltip_text {
            self.disabled_tooltip_text = text.clone();
        }
        if let Some(text) = &overrides.disabled_tooltip_text_image {
            self.disabled_tooltip_text_image = text.clone();
        }
    }

    /// Tooltip text for a disabled element.
    pub fn tooltip_text(&self, is_image: bool) -> &str {
        if is_image {
            &self.disabled_tooltip_text_image
        } else {
            &self.disabled_tooltip_text
        }
    }
}
