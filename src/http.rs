//! Outbound HTTP plumbing shared by the service clients

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Build the client shared by every upstream call.
///
/// Timeouts stay at reqwest's defaults.
pub fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .with_context(|| "Failed to create HTTP client")
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.context("request failed")?;
    let status = response.status();
    if !status.is_success() {
        bail!("unexpected status {status}");
    }
    Ok(response)
}

/// Send `request`, require a 2xx status and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    send(request)
        .await?
        .json::<T>()
        .await
        .context("malformed response body")
}

/// Send `request`, require a 2xx status and return the body as text
pub async fn get_text(request: RequestBuilder) -> Result<String> {
    send(request)
        .await?
        .text()
        .await
        .context("unreadable response body")
}
