//! # Edit-mode configuration — `edit-mode.toml`
//!
//! Everything the controller needs to know about its surroundings: which
//! parent origins may talk to it, where the apply-edit endpoint lives, which
//! attributes mark editable and disabled elements, and the default tooltip
//! strings.
//!
//! ## Structure
//!
//! ```toml
//! apply_edit_url = "/api/apply-edit"
//! allowed_origins = ["https://horizons.hostinger.com"]
//! verify_inbound_origin = true
//! tooltip_margin = 5.0
//!
//! [selectors]
//! root_id = "root"
//! edit_id_attribute = "data-edit-id"
//!
//! [translations]
//! disabledTooltipText = "This text can be changed only through chat."
//! ```
//!
//! Every field has a default, so an empty file is the production
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::translations::Translations;

/// Top-level edit-mode configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Path (or absolute URL) of the apply-edit endpoint.
    #[serde(default = "default_apply_edit_url")]
    pub apply_edit_url: String,
    /// Parent origins allowed to exchange messages with the page. Matched
    /// as exact strings.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Drop inbound messages whose sender origin is not allow-listed.
    #[serde(default = "default_verify_inbound_origin")]
    pub verify_inbound_origin: bool,
    /// Minimum distance in pixels between the tooltip and the viewport edge.
    #[serde(default = "default_tooltip_margin")]
    pub tooltip_margin: f64,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default)]
    pub translations: Translations,
}

/// Element ids and attribute names that make up the page contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Id of the root container carrying the enabled flag.
    pub root_id: String,
    pub enabled_attribute: String,
    pub edit_id_attribute: String,
    pub disabled_attribute: String,
    /// Id given to the injected `<style>` element.
    pub style_id: String,
    /// Id of the inline popup; events inside it are never intercepted.
    pub popup_id: String,
    pub tooltip_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            enabled_attribute: "data-edit-mode-enabled".to_string(),
            edit_id_attribute: "data-edit-id".to_string(),
            disabled_attribute: "data-edit-disabled".to_string(),
            style_id: "inline-editor-styles".to_string(),
            popup_id: "inline-editor-popup".to_string(),
            tooltip_id: "inline-editor-disabled-tooltip".to_string(),
        }
    }
}

fn default_apply_edit_url() -> String {
    "/api/apply-edit".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    [
        "https://horizons.hostinger.com",
        "https://horizons.hostinger.dev",
        "https://horizons-frontend-local.hostinger.dev",
        "http://localhost:4000",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_verify_inbound_origin() -> bool {
    true
}

fn default_tooltip_margin() -> f64 {
    5.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            apply_edit_url: default_apply_edit_url(),
            allowed_origins: default_allowed_origins(),
            verify_inbound_origin: default_verify_inbound_origin(),
            tooltip_margin: default_tooltip_margin(),
            selectors: Selectors::default(),
            translations: Translations::default(),
        }
    }
}

impl EditorConfig {
    /// Builder method to replace the allow-list.
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to point saves at another endpoint.
    pub fn with_apply_edit_url(mut self, url: impl Into<String>) -> Self {
        self.apply_edit_url = url.into();
        self
    }

    /// Builder method to toggle the inbound sender check.
    pub fn with_inbound_origin_check(mut self, verify: bool) -> Self {
        self.verify_inbound_origin = verify;
        self
    }

    /// Whether `origin` is on the allow-list.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, EditorError> {
        toml::from_str(s).map_err(|e| EditorError::Config(e.to_string()))
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, EditorError> {
        toml::to_string_pretty(self).map_err(|e| EditorError::Config(e.to_string()))
    }
}
