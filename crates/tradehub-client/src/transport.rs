//! HTTP 전송 seam.
//!
//! 리포지토리는 [`Transport`] trait에만 의존합니다. 운영에서는 reqwest 기반
//! [`HttpTransport`]를, 테스트에서는 지연/실패를 흉내 내는 더블을 사용합니다.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error};
use tradehub_core::{HubError, HubResult};

/// 쿼리 파라미터 목록.
pub type QueryParams = [(String, String)];

/// 단일 응답을 돌려주는 일반 HTTP 클라이언트.
///
/// 모든 호출은 한 번만 수행됩니다. 재시도나 캐시는 없습니다.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET 요청.
    async fn get(&self, url: &str, query: Option<&QueryParams>) -> HubResult<Value>;

    /// POST 요청.
    async fn post(&self, url: &str, body: &Value) -> HubResult<Value>;

    /// PUT 요청.
    async fn put(&self, url: &str, body: &Value) -> HubResult<Value>;

    /// DELETE 요청.
    async fn delete(&self, url: &str) -> HubResult<Value>;
}

/// reqwest 기반 전송.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// 새 전송을 생성합니다.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// 설정된 클라이언트로 생성합니다.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> HubResult<Value> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(%method, url, error = %e, "Request failed");
            HubError::transport(e.status().map(|s| s.as_u16()))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            error!(%method, url, "Resource not found");
            return Err(HubError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            error!(%method, url, status = status.as_u16(), "Request returned error status");
            return Err(HubError::transport(Some(status.as_u16())));
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(%method, url, error = %e, "Failed to read response body");
            HubError::transport(Some(status.as_u16()))
        })?;

        debug!(%method, url, status = status.as_u16(), bytes = bytes.len(), "Request completed");

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(%method, url, error = %e, "Failed to decode response body");
            HubError::from(e)
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: Option<&QueryParams>) -> HubResult<Value> {
        self.send(Method::GET, url, query, None).await
    }

    async fn post(&self, url: &str, body: &Value) -> HubResult<Value> {
        self.send(Method::POST, url, None, Some(body)).await
    }

    async fn put(&self, url: &str, body: &Value) -> HubResult<Value> {
        self.send(Method::PUT, url, None, Some(body)).await
    }

    async fn delete(&self, url: &str) -> HubResult<Value> {
        self.send(Method::DELETE, url, None, None).await
    }
}
