use crate::core::{ConfigProvider, ObituaryPublisher, ObituaryRequest, ObituaryResult};
use crate::domain::model::{EndpointKind, Environment};
use crate::utils::error::{PublishError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

pub const API_ENDPOINT: &str = "/v1/obituaries/";
pub const API_KEY_HEADER: &str = "x-api-key";

/// 依環境名稱取得 API Gateway 位址，無法辨識的名稱回退到 prod
pub fn resolve_base_url(environment: &str) -> &'static str {
    resolve_base_url_for(EndpointKind::Gateway, environment)
}

pub fn resolve_base_url_for(kind: EndpointKind, environment: &str) -> &'static str {
    match environment.parse::<Environment>() {
        Ok(env) => kind.base_url(env),
        Err(_) => {
            tracing::warn!(
                "Unrecognized environment '{}', falling back to prod",
                environment
            );
            kind.base_url(Environment::Prod)
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublisherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PublisherClient {
    pub fn new(api_key: impl Into<String>, environment: &str) -> Self {
        Self::with_endpoint(api_key, EndpointKind::Gateway, environment)
    }

    pub fn with_endpoint(api_key: impl Into<String>, kind: EndpointKind, environment: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: resolve_base_url_for(kind, environment).to_string(),
        }
    }

    /// 直接指定 base URL (本地測試或私有部署)
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        Ok(Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        match config.base_url_override() {
            Some(base_url) => Self::with_base_url(config.api_key(), base_url),
            None => Ok(Self::with_endpoint(
                config.api_key(),
                config.endpoint_kind(),
                config.environment().as_str(),
            )),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, API_ENDPOINT)
    }
}

#[async_trait]
impl ObituaryPublisher for PublisherClient {
    async fn publish(&self, request: &ObituaryRequest) -> Result<ObituaryResult> {
        if self.api_key.trim().is_empty() {
            return Err(PublishError::config("API key is required"));
        }

        let url = self.endpoint_url();
        tracing::debug!("Publishing obituary to: {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to read error response body ({}): {}", status, e);
                    String::new()
                }
            };
            return Err(PublishError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let result: ObituaryResult =
            serde_json::from_str(&body).map_err(|e| PublishError::UnknownError {
                message: format!("Failed to decode API response: {}", e),
            })?;

        if let Some(warnings) = result.warnings.as_ref().filter(|w| !w.is_empty()) {
            tracing::warn!(
                "Obituary {} published with warnings: {:?}",
                result.obituary_id,
                warnings
            );
        }

        Ok(result)
    }
}

/// 單次發布：解析環境、送出請求、回傳結果
pub async fn publish(
    api_key: &str,
    environment: &str,
    request: &ObituaryRequest,
) -> Result<ObituaryResult> {
    PublisherClient::new(api_key, environment)
        .publish(request)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::example::build_example_payload;
    use httpmock::prelude::*;

    #[test]
    fn test_resolve_base_url_known_environments() {
        assert_eq!(
            resolve_base_url("dev"),
            "https://h8j5wx2ek8.execute-api.us-east-1.amazonaws.com/dev"
        );
        assert_eq!(
            resolve_base_url("stage"),
            "https://osw92dhpje.execute-api.us-east-1.amazonaws.com/stage"
        );
        assert_eq!(
            resolve_base_url("prod"),
            "https://eqvuex5md7.execute-api.us-east-1.amazonaws.com/prod"
        );
    }

    #[test]
    fn test_resolve_base_url_falls_back_to_prod() {
        for env in ["", "production", "DEV", "qa"] {
            assert_eq!(resolve_base_url(env), resolve_base_url("prod"));
        }
        assert_eq!(
            resolve_base_url_for(EndpointKind::Direct, "staging"),
            "https://obit-intake.prod.legint.net/api"
        );
    }

    #[test]
    fn test_endpoint_url() {
        let client = PublisherClient::new("key", "dev");
        assert_eq!(
            client.endpoint_url(),
            "https://h8j5wx2ek8.execute-api.us-east-1.amazonaws.com/dev/v1/obituaries/"
        );

        let local = PublisherClient::with_base_url("key", "http://127.0.0.1:9000/").unwrap();
        assert_eq!(local.endpoint_url(), "http://127.0.0.1:9000/v1/obituaries/");
        assert!(PublisherClient::with_base_url("key", "not a url").is_err());
    }

    #[tokio::test]
    async fn test_publish_decodes_warnings() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/obituaries/");
            then.status(201).json_body(serde_json::json!({
                "obituary_id": "obit-9",
                "redirector_url": "https://www.legacy.com/obit-9",
                "warnings": ["owner_reference_id not recognized"]
            }));
        });

        let client = PublisherClient::with_base_url("key", &server.base_url()).unwrap();
        let result = client.publish(&build_example_payload()).await.unwrap();

        api_mock.assert();
        assert_eq!(result.obituary_id, "obit-9");
        assert_eq!(
            result.warnings,
            Some(vec!["owner_reference_id not recognized".to_string()])
        );
    }

    #[tokio::test]
    async fn test_publish_rejects_empty_api_key_without_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200);
        });

        let client = PublisherClient::with_base_url("  ", &server.base_url()).unwrap();
        let err = client.publish(&build_example_payload()).await.unwrap_err();

        assert!(matches!(err, PublishError::ConfigError { .. }));
        api_mock.assert_hits(0);
    }

    /// 回應標頭宣告的長度大於實際內容後即關閉連線
    fn spawn_truncating_server() -> std::net::SocketAddr {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_lowercase();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            stream
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial",
                )
                .unwrap();
            stream.flush().unwrap();
        });

        address
    }

    #[tokio::test]
    async fn test_truncated_error_body_still_reports_status() {
        let address = spawn_truncating_server();

        let client = PublisherClient::with_base_url("key", &format!("http://{}", address)).unwrap();
        let err = client.publish(&build_example_payload()).await.unwrap_err();

        match err {
            PublishError::HttpError { status, body } => {
                assert_eq!(status, 500);
                assert!(body.is_empty());
            }
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_unknown_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/obituaries/");
            then.status(200).body("<html>ok</html>");
        });

        let client = PublisherClient::with_base_url("key", &server.base_url()).unwrap();
        let err = client.publish(&build_example_payload()).await.unwrap_err();

        assert!(matches!(err, PublishError::UnknownError { .. }));
    }
}
