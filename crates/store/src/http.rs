//! HTTP plumbing shared by the collaborator clients.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Builds a client with the configured timeout.
pub(crate) fn build_client(service: &'static str, timeout_secs: u64) -> StoreResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|source| StoreError::Transport { service, source })
}

/// Appends percent-encoded path segments to a base URL.
pub(crate) fn endpoint(service: &'static str, base: &str, segments: &[&str]) -> StoreResult<Url> {
    let invalid = || StoreError::InvalidUrl {
        service,
        url: base.to_string(),
    };

    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Reads a JSON body, turning a non-success status into an error.
///
/// `Ok(None)` means the collaborator answered 404.
pub(crate) async fn read_json(
    service: &'static str,
    response: Response,
) -> StoreResult<Option<Value>> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<Value>()
        .await
        .map(Some)
        .map_err(|e| StoreError::Decode {
            service,
            message: e.to_string(),
        })
}
