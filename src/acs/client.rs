//! Call Automation REST client.
//!
//! # API Reference
//!
//! - `POST {endpoint}/calling/callConnections:answer`
//! - `POST {endpoint}/calling/callConnections/{id}:play`
//! - `POST {endpoint}/calling/callConnections/{id}:recognize`
//! - `POST {endpoint}/calling/callConnections/{id}:transferToParticipant`
//!
//! All operations take the `api-version` query parameter and are signed
//! with the resource access key (see [`super::auth`]).

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::auth::sign_request;
use super::connection_string::ConnectionString;
use super::error::{AcsError, AcsResult};
use super::models::{
    AnswerCallRequest, PhoneNumberIdentifier, PlayOptions, PlayRequest, RecognizeOptions,
    RecognizeRequest, TransferToParticipantRequest,
};

/// Default REST `api-version`.
pub const DEFAULT_API_VERSION: &str = "2023-10-15";

/// Control operations consumed by the IVR dispatcher.
///
/// Implemented over HTTP by [`CallAutomationClient`]; tests substitute a
/// recording implementation.
#[async_trait]
pub trait CallAutomationApi: Send + Sync {
    /// Answer an incoming call; subsequent call events go to `callback_uri`.
    async fn answer_call(&self, incoming_call_context: &str, callback_uri: &str)
    -> AcsResult<()>;

    /// Play a text prompt to every participant of the call.
    async fn play_to_all(&self, call_connection_id: &str, play: &PlayOptions) -> AcsResult<()>;

    /// Start speech or DTMF recognition on the call.
    async fn start_recognizing(
        &self,
        call_connection_id: &str,
        options: &RecognizeOptions,
    ) -> AcsResult<()>;

    /// Transfer the call to a PSTN number.
    async fn transfer_call_to_participant(
        &self,
        call_connection_id: &str,
        target: &PhoneNumberIdentifier,
    ) -> AcsResult<()>;
}

/// HTTP implementation of [`CallAutomationApi`].
#[derive(Debug, Clone)]
pub struct CallAutomationClient {
    http: reqwest::Client,
    connection: ConnectionString,
    api_version: String,
}

impl CallAutomationClient {
    /// Create a client from an `endpoint=...;accesskey=...` connection string.
    pub fn from_connection_string(
        connection_string: &str,
        api_version: impl Into<String>,
    ) -> AcsResult<Self> {
        Ok(Self::with_http_client(
            reqwest::Client::new(),
            ConnectionString::parse(connection_string)?,
            api_version,
        ))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(
        http: reqwest::Client,
        connection: ConnectionString,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            connection,
            api_version: api_version.into(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        self.connection.endpoint()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build `{endpoint}/calling/{segments...}?api-version=...`.
    fn operation_url(&self, segments: &[&str]) -> AcsResult<Url> {
        let mut url = self.connection.endpoint().clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AcsError::InvalidConnectionString("endpoint cannot be a base URL".to_string())
            })?;
            path.pop_if_empty().push("calling");
            for segment in segments {
                path.push(segment);
            }
        }
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn call_connection_url(&self, call_connection_id: &str, action: &str) -> AcsResult<Url> {
        self.operation_url(&["callConnections", &format!("{call_connection_id}:{action}")])
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: Url, body: &T) -> AcsResult<()> {
        let payload = serde_json::to_vec(body)?;
        let signed = sign_request(
            self.connection.access_key(),
            &Method::POST,
            &url,
            &payload,
            OffsetDateTime::now_utc(),
        )?;

        debug!(url = %url, "Call Automation request");

        let response = self
            .http
            .post(url.clone())
            .header("Content-Type", "application/json")
            .header("x-ms-date", &signed.date)
            .header("x-ms-content-sha256", &signed.content_hash)
            .header("Authorization", &signed.authorization)
            .header("Repeatability-Request-ID", Uuid::new_v4().to_string())
            .header("Repeatability-First-Sent", &signed.date)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read error body: {e}>"));
            return Err(AcsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(url = %url, status = %status, "Call Automation request accepted");
        Ok(())
    }
}

#[async_trait]
impl CallAutomationApi for CallAutomationClient {
    async fn answer_call(
        &self,
        incoming_call_context: &str,
        callback_uri: &str,
    ) -> AcsResult<()> {
        let url = self.operation_url(&["callConnections:answer"])?;
        self.post_json(
            url,
            &AnswerCallRequest {
                incoming_call_context,
                callback_uri,
            },
        )
        .await
    }

    async fn play_to_all(&self, call_connection_id: &str, play: &PlayOptions) -> AcsResult<()> {
        let url = self.call_connection_url(call_connection_id, "play")?;
        self.post_json(url, &PlayRequest::from(play)).await
    }

    async fn start_recognizing(
        &self,
        call_connection_id: &str,
        options: &RecognizeOptions,
    ) -> AcsResult<()> {
        let url = self.call_connection_url(call_connection_id, "recognize")?;
        self.post_json(url, &RecognizeRequest::from(options)).await
    }

    async fn transfer_call_to_participant(
        &self,
        call_connection_id: &str,
        target: &PhoneNumberIdentifier,
    ) -> AcsResult<()> {
        let url = self.call_connection_url(call_connection_id, "transferToParticipant")?;
        self.post_json(url, &TransferToParticipantRequest::from(target))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CallAutomationClient {
        CallAutomationClient::from_connection_string(
            "endpoint=https://contoso.communication.azure.com/;accesskey=c2VjcmV0",
            DEFAULT_API_VERSION,
        )
        .unwrap()
    }

    #[test]
    fn test_answer_url() {
        let url = client()
            .operation_url(&["callConnections:answer"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://contoso.communication.azure.com/calling/callConnections:answer?api-version=2023-10-15"
        );
    }

    #[test]
    fn test_call_connection_url() {
        let url = client()
            .call_connection_url("421f0b00-abcd", "play")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://contoso.communication.azure.com/calling/callConnections/421f0b00-abcd:play?api-version=2023-10-15"
        );
    }

    #[test]
    fn test_call_connection_id_is_escaped() {
        let url = client()
            .call_connection_url("a/b c", "recognize")
            .unwrap();
        assert!(url.path().ends_with("/callConnections/a%2Fb%20c:recognize"));
    }

    #[test]
    fn test_endpoint_with_base_path() {
        let client = CallAutomationClient::from_connection_string(
            "endpoint=https://proxy.example.com/acs;accesskey=c2VjcmV0",
            "2024-09-15",
        )
        .unwrap();
        let url = client.operation_url(&["callConnections:answer"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example.com/acs/calling/callConnections:answer?api-version=2024-09-15"
        );
    }
}
