//! HTTP client shared by search engines and the completion API

use super::request::{HttpMethod, HttpRequest, HttpResponse};
use super::user_agent::generate_user_agent;
use crate::config::OutgoingSettings;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper with agent-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let default_timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .with_context(|| format!("invalid request_timeout: {}", settings.request_timeout))?;

        let mut builder = Client::builder()
            .timeout(default_timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout,
            user_agent: generate_user_agent(),
        })
    }

    /// Execute a request, honoring its own timeout when it carries one
    pub async fn execute(&self, request: HttpRequest) -> reqwest::Result<HttpResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        self.execute_with_timeout(request, timeout).await
    }

    /// Execute a request with an explicit timeout
    pub async fn execute_with_timeout(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> reqwest::Result<HttpResponse> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder
            .timeout(timeout)
            .headers(self.header_map(&request));

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(ref json) = request.json {
            req_builder = req_builder.json(json);
        }

        debug!("{:?} {} (timeout {:?})", request.method, request.url, timeout);

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Client defaults with the request's own headers replacing them by name
    fn header_map(&self, request: &HttpRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }

        for (key, value) in &request.headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Skipping invalid header {}", key),
            }
        }

        headers
    }

    async fn parse_response(response: Response) -> reqwest::Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            text,
            url,
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert!(client.unwrap().user_agent().starts_with("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_execute_sends_params_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(query_param("q", "rust lang"))
            .and(header("X-API-KEY", "secret"))
            .and(body_json(serde_json::json!({"q": "rust lang"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = HttpRequest::post(format!("{}/search", server.uri()))
            .param("q", "rust lang")
            .header("X-API-KEY", "secret")
            .json(serde_json::json!({"q": "rust lang"}));

        let response = client.execute(request).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.text, "created");
        assert!(response.is_success());
    }

    fn header_values(request: &wiremock::Request, name: &str) -> Vec<String> {
        request
            .headers
            .iter()
            .filter(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter().map(|v| v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_request_user_agent_replaces_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = HttpRequest::get(server.uri()).header("User-Agent", "custom-agent/1.0");
        client.execute(request).await.unwrap();
        client.execute(HttpRequest::get(server.uri())).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(header_values(&received[0], "user-agent"), vec!["custom-agent/1.0"]);

        // The mock server splits header values on commas
        let default_agent: Vec<String> = client
            .user_agent()
            .split(',')
            .map(|part| part.trim().to_string())
            .collect();
        assert_eq!(header_values(&received[1], "user-agent"), default_agent);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let settings = OutgoingSettings {
            request_timeout: -1.0,
            ..OutgoingSettings::default()
        };
        assert!(HttpClient::with_settings(&settings).is_err());
    }

    #[tokio::test]
    async fn test_request_timeout_is_enforced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = HttpRequest::get(server.uri()).timeout(Duration::from_millis(50));

        let err = client.execute(request).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
