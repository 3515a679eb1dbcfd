//! HTTP client for the apply-edit endpoint.
//!
//! On wasm32 `reqwest` goes through the browser's `fetch`, so the endpoint
//! must be an absolute URL: relative paths from the configuration are
//! resolved against the page URL with [`HttpApplyEdit::for_page`].

use url::Url;

use crate::error::EditorError;
use crate::messages::{ApplyEditRequest, ApplyEditResponse};
use crate::transport::ApplyEditClient;

#[derive(Clone, Debug)]
pub struct HttpApplyEdit {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpApplyEdit {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Resolve `path` (absolute or relative) against `page_url`.
    pub fn for_page(page_url: &str, path: &str) -> Result<Self, EditorError> {
        let endpoint = Url::parse(page_url)
            .and_then(|page| page.join(path))
            .map_err(|e| EditorError::Config(format!("apply-edit url {path}: {e}")))?;
        Ok(Self::new(endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ApplyEditClient for HttpApplyEdit {
    async fn apply_edit(&self, request: &ApplyEditRequest) -> Result<ApplyEditResponse, EditorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| EditorError::Transport {
                edit_id: request.edit_id.clone(),
                reason: e.to_string(),
            })?;

        // The status code is not inspected: the endpoint reports failures
        // through `success`, and a non-JSON error page fails to decode.
        response
            .json::<ApplyEditResponse>()
            .await
            .map_err(|e| EditorError::InvalidResponse {
                edit_id: request.edit_id.clone(),
                reason: e.to_string(),
            })
    }
}
