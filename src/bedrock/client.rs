use std::time::{Duration, SystemTime};

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_credential_types::provider::ProvideCredentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4::SigningParams;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::Client;

use super::error::AgentError;
use super::types::{AgentResponse, ApiErrorBody, InvokeAgentBody, InvokeAgentRequest};

// All Bedrock runtime endpoints sign with service name "bedrock".
const SIGNING_SERVICE: &str = "bedrock";

/// Anything that can perform one InvokeAgent exchange.
///
/// Command logic is generic over this trait so it can run against a mock.
pub trait AgentInvoker {
    async fn invoke(&self, req: &InvokeAgentRequest) -> Result<AgentResponse, AgentError>;
}

pub struct AgentClient {
    credentials: Credentials,
    region: String,
    client: Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(credentials: Credentials, region: impl Into<String>) -> Self {
        let region = region.into();
        let base_url = format!("https://bedrock-agent-runtime.{region}.amazonaws.com");
        Self::with_base_url(credentials, region, base_url)
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(
        credentials: Credentials,
        region: impl Into<String>,
        base_url: String,
    ) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            credentials,
            region: region.into(),
            client,
            base_url,
        }
    }

    /// Resolve credentials from the default AWS chain (environment variables,
    /// profile, instance metadata) and build a client for the given region.
    pub async fn from_env(region: impl Into<String>) -> Result<Self, AgentError> {
        let region = region.into();
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;
        let provider = shared
            .credentials_provider()
            .ok_or_else(|| AgentError::Credentials("no AWS credentials configured".into()))?;
        let credentials = provider
            .provide_credentials()
            .await
            .map_err(|e| AgentError::Credentials(e.to_string()))?;
        Ok(Self::new(credentials, region))
    }

    /// SigV4 headers for a request against the agent runtime.
    fn sign_headers(
        &self,
        method: &str,
        url: &str,
        body: &[u8],
    ) -> Result<Vec<(String, String)>, AgentError> {
        let identity = Identity::new(self.credentials.clone(), self.credentials.expiry());

        let signing_params = SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SIGNING_SERVICE)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| AgentError::Signing(e.to_string()))?;

        let signable_request = SignableRequest::new(
            method,
            url,
            std::iter::empty::<(&str, &str)>(),
            SignableBody::Bytes(body),
        )
        .map_err(|e| AgentError::Signing(e.to_string()))?;

        let (signing_instructions, _) = sign(signable_request, &signing_params.into())
            .map_err(|e| AgentError::Signing(e.to_string()))?
            .into_parts();

        Ok(signing_instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}

impl AgentInvoker for AgentClient {
    /// One InvokeAgent exchange: sign, POST, classify or return the payload.
    async fn invoke(&self, req: &InvokeAgentRequest) -> Result<AgentResponse, AgentError> {
        let url = format!("{}{}", self.base_url, req.path());
        let body = serde_json::to_vec(&InvokeAgentBody::from(req))?;

        let mut request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body.clone());
        for (name, value) in self.sign_headers("POST", &url, &body)? {
            request = request.header(&name, &value);
        }

        let response = request.send().await?;
        let status = response.status();

        let (request_id, session_id, content_type, error_type) = {
            let header = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            (
                header("x-amzn-requestid"),
                header("x-amz-bedrock-agent-session-id"),
                header("content-type"),
                header("x-amzn-errortype"),
            )
        };

        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(text);
            return Err(AgentError::classify(
                status.as_u16(),
                error_type.as_deref(),
                message,
            ));
        }

        let body = response.bytes().await?;
        Ok(AgentResponse {
            status: status.as_u16(),
            request_id,
            session_id,
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_credentials() -> Credentials {
        Credentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
            None,
            None,
            "test",
        )
    }

    fn request() -> InvokeAgentRequest {
        InvokeAgentRequest {
            agent_id: "BWLIU13QYP".into(),
            agent_alias_id: "CAX1BYK1MK".into(),
            session_id: "11111111-2222-3333-4444-555555555555".into(),
            input_text: "What topics are covered in the training videos?".into(),
        }
    }

    fn client(server: &MockServer) -> AgentClient {
        AgentClient::with_base_url(test_credentials(), "us-east-1", server.uri())
    }

    const INVOKE_PATH: &str =
        "/agents/BWLIU13QYP/agentAliases/CAX1BYK1MK/sessions/11111111-2222-3333-4444-555555555555/text";

    #[tokio::test]
    async fn invoke_success_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-amzn-requestid", "req-123")
                    .insert_header(
                        "x-amz-bedrock-agent-session-id",
                        "11111111-2222-3333-4444-555555555555",
                    )
                    .set_body_raw(
                        b"agent says hello".to_vec(),
                        "application/vnd.amazon.eventstream",
                    ),
            )
            .mount(&server)
            .await;

        let resp = client(&server).invoke(&request()).await.unwrap();
        assert_eq!(resp.status, 200);
        assert!(!resp.body.is_empty());
        assert_eq!(resp.body_text(), "agent says hello");
        assert_eq!(resp.request_id.as_deref(), Some("req-123"));
        assert_eq!(
            resp.session_id.as_deref(),
            Some("11111111-2222-3333-4444-555555555555")
        );
        assert_eq!(
            resp.content_type.as_deref(),
            Some("application/vnd.amazon.eventstream")
        );
    }

    #[tokio::test]
    async fn invoke_request_is_sigv4_signed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"ok".to_vec(), "text/plain"))
            .mount(&server)
            .await;

        client(&server).invoke(&request()).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let auth = received[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(auth.starts_with("AWS4-HMAC-SHA256"));
        assert!(auth.contains("us-east-1/bedrock/aws4_request"));
        assert!(received[0].headers.get("x-amz-date").is_some());
    }

    #[tokio::test]
    async fn invoke_sends_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"ok".to_vec(), "text/plain"))
            .mount(&server)
            .await;

        client(&server).invoke(&request()).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(
            body["inputText"],
            "What topics are covered in the training videos?"
        );
        assert_eq!(body["enableTrace"], false);
        assert!(body["sessionState"]["sessionAttributes"].is_object());
    }

    #[tokio::test]
    async fn not_found_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(
                ResponseTemplate::new(404)
                    .insert_header("x-amzn-errortype", "ResourceNotFoundException:http://x/")
                    .set_body_raw(
                        br#"{"message": "Agent BWLIU13QYP not found"}"#.to_vec(),
                        "application/json",
                    ),
            )
            .mount(&server)
            .await;

        let err = client(&server).invoke(&request()).await.unwrap_err();
        match err {
            AgentError::NotFound(message) => {
                assert_eq!(message, "Agent BWLIU13QYP not found");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn access_denied_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-amzn-errortype", "AccessDeniedException")
                    .set_body_raw(
                        br#"{"message": "not authorized to invoke agent"}"#.to_vec(),
                        "application/json",
                    ),
            )
            .mount(&server)
            .await;

        let err = client(&server).invoke(&request()).await.unwrap_err();
        assert!(matches!(err, AgentError::AccessDenied(_)));
        assert_eq!(err.diagnostic(), "Access denied. Check your IAM permissions.");
    }

    #[tokio::test]
    async fn validation_error_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .insert_header("x-amzn-errortype", "ValidationException")
                    .set_body_raw(
                        br#"{"message": "1 validation error detected"}"#.to_vec(),
                        "application/json",
                    ),
            )
            .mount(&server)
            .await;

        let err = client(&server).invoke(&request()).await.unwrap_err();
        assert!(matches!(err, AgentError::Validation(_)));
    }

    #[tokio::test]
    async fn throttling_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("x-amzn-errortype", "ThrottlingException")
                    .set_body_raw(
                        br#"{"message": "Rate exceeded"}"#.to_vec(),
                        "application/json",
                    ),
            )
            .mount(&server)
            .await;

        let err = client(&server).invoke(&request()).await.unwrap_err();
        assert!(matches!(err, AgentError::Throttled(_)));
    }

    #[tokio::test]
    async fn other_statuses_fall_through_to_api_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVOKE_PATH))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_raw(b"internal failure".to_vec(), "text/plain"),
            )
            .mount(&server)
            .await;

        let err = client(&server).invoke(&request()).await.unwrap_err();
        match err {
            AgentError::Api { status, message } => {
                assert_eq!(status, 500);
                // Non-JSON body is kept as the raw message.
                assert_eq!(message, "internal failure");
            }
            other => panic!("expected Api, got {other:?}"),
        }
        assert_eq!(
            AgentError::Api {
                status: 500,
                message: String::new()
            }
            .diagnostic(),
            "Unexpected error."
        );
    }

    #[tokio::test]
    async fn network_failure_maps_to_network_variant() {
        // Nothing is listening on this port.
        let client = AgentClient::with_base_url(
            test_credentials(),
            "us-east-1",
            "http://127.0.0.1:1".to_string(),
        );
        let err = client.invoke(&request()).await.unwrap_err();
        assert!(matches!(err, AgentError::Network(_)));
        assert_eq!(err.diagnostic(), "Unexpected error.");
    }
}
