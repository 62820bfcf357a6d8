//! 일반 리소스 리포지토리.
//!
//! 다섯 가지 CRUD 동작은 모든 리소스에서 동일합니다. 리소스별로 다른 것은 기본 경로와
//! 레코드 타입 `T`뿐입니다.

use reqwest::Url;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, Instrument};
use tradehub_core::{resource_span, EndpointConfig, HubError, HubResult, Resource};

use crate::transport::{QueryParams, Transport};

/// 리소스 `T`에 대한 CRUD 클라이언트.
pub struct ResourceRepository<T: Resource> {
    base_url: String,
    transport: Arc<dyn Transport>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceRepository<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> std::fmt::Debug for ResourceRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRepository")
            .field("resource", &T::NAME)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl<T: Resource> ResourceRepository<T> {
    /// 기본 URL로 생성합니다. 끝의 `/`는 제거됩니다.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            _resource: PhantomData,
        }
    }

    /// 엔드포인트 맵에서 `T`의 기본 URL을 해석해 생성합니다.
    pub fn from_endpoints(
        endpoints: &EndpointConfig,
        transport: Arc<dyn Transport>,
    ) -> HubResult<Self> {
        let url = endpoints.resource_url(T::API_KEY, T::CONTROLLER_KEY, T::PATH)?;
        Ok(Self::new(url, transport))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{id}`. 식별자는 경로 세그먼트 하나로 퍼센트 인코딩됩니다.
    fn item_url(&self, id: &str) -> HubResult<String> {
        let invalid = || HubError::NotConfigured(format!("{}: 잘못된 기본 URL", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(id);
        Ok(url.to_string())
    }

    /// 식별자로 레코드 하나를 가져옵니다.
    pub async fn get_by_id(&self, id: &str) -> HubResult<T> {
        let url = self.item_url(id)?;
        async {
            debug!(url = %url, "Fetching record");
            let body = self.transport.get(&url, None).await?;
            decode(body)
        }
        .instrument(resource_span!("get_by_id", T::NAME, id))
        .await
    }

    /// 전체 레코드를 가져옵니다.
    pub async fn get_all(&self, filter: Option<&QueryParams>) -> HubResult<Vec<T>> {
        async {
            debug!(
                url = %self.base_url,
                filters = filter.map_or(0, |f| f.len()),
                "Fetching records"
            );
            let body = self.transport.get(&self.base_url, filter).await?;
            match body {
                Value::Null => Ok(Vec::new()),
                other => decode(other),
            }
        }
        .instrument(resource_span!("get_all", T::NAME))
        .await
    }

    /// 새 레코드를 만듭니다. 식별자는 서버가 부여합니다.
    pub async fn create(&self, record: &T) -> HubResult<T> {
        async {
            debug!(url = %self.base_url, "Creating record");
            let body = serde_json::to_value(record)?;
            let body = self.transport.post(&self.base_url, &body).await?;
            decode(body)
        }
        .instrument(resource_span!("create", T::NAME))
        .await
    }

    /// 레코드의 식별자로 갱신합니다.
    pub async fn update(&self, record: &T) -> HubResult<T> {
        let id = record.id().ok_or_else(|| {
            HubError::InvalidInput(format!(
                "{}: 식별자가 없는 레코드는 갱신할 수 없습니다",
                T::NAME
            ))
        })?;
        let url = self.item_url(&id)?;
        async {
            debug!(url = %url, "Updating record");
            let body = serde_json::to_value(record)?;
            let body = self.transport.put(&url, &body).await?;
            decode(body)
        }
        .instrument(resource_span!("update", T::NAME, id))
        .await
    }

    /// 식별자로 레코드를 삭제합니다.
    pub async fn delete(&self, id: &str) -> HubResult<()> {
        let url = self.item_url(id)?;
        async {
            debug!(url = %url, "Deleting record");
            self.transport.delete(&url).await?;
            Ok::<(), HubError>(())
        }
        .instrument(resource_span!("delete", T::NAME, id))
        .await
    }
}

fn decode<R: serde::de::DeserializeOwned>(body: Value) -> HubResult<R> {
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Agent;
    use crate::transport::HttpTransport;
    use serde_json::json;
    use std::collections::HashMap;

    fn repository(server: &mockito::Server) -> ResourceRepository<Agent> {
        ResourceRepository::new(
            format!("{}/api/agents/", server.url()),
            Arc::new(HttpTransport::new()),
        )
    }

    #[test]
    fn test_from_endpoints_joins_path() {
        let endpoints = EndpointConfig::new(
            HashMap::from([("TRADE_ZERO".to_string(), "http://localhost:8080".to_string())]),
            HashMap::from([("TRADE_ZERO".to_string(), "api".to_string())]),
        );
        let repo: ResourceRepository<Agent> =
            ResourceRepository::from_endpoints(&endpoints, Arc::new(HttpTransport::new())).unwrap();
        assert_eq!(repo.base_url(), "http://localhost:8080/api/agents");

        let err = ResourceRepository::<Agent>::from_endpoints(
            &EndpointConfig::default(),
            Arc::new(HttpTransport::new()),
        )
        .unwrap_err();
        assert!(matches!(err, HubError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_crud_round() {
        let mut server = mockito::Server::new_async().await;
        let get = server
            .mock("GET", "/api/agents/7")
            .with_status(200)
            .with_body(r#"{"id": 7, "name": "alpha"}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/agents")
            .with_status(200)
            .with_body(r#"[{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]"#)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/api/agents")
            .match_body(mockito::Matcher::PartialJson(json!({ "name": "new" })))
            .with_status(201)
            .with_body(r#"{"id": "3", "name": "new"}"#)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/api/agents/3")
            .with_status(200)
            .with_body(r#"{"id": "3", "name": "renamed"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/agents/3")
            .with_status(200)
            .create_async()
            .await;

        let repo = repository(&server);

        let agent = repo.get_by_id("7").await.unwrap();
        assert_eq!(agent.id.as_deref(), Some("7"));

        assert_eq!(repo.get_all(None).await.unwrap().len(), 2);

        let created = repo
            .create(&Agent {
                id: None,
                name: Some("new".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.id.as_deref(), Some("3"));

        let renamed = repo
            .update(&Agent {
                name: Some("renamed".to_string()),
                ..created
            })
            .await
            .unwrap();
        assert_eq!(renamed.name.as_deref(), Some("renamed"));

        repo.delete("3").await.unwrap();

        for mock in [get, list, create, update, delete] {
            mock.assert_async().await;
        }
    }

    #[test]
    fn test_item_url_encodes_identifier() {
        let repo = ResourceRepository::<Agent>::new(
            "http://localhost:8080/api/agents/",
            Arc::new(HttpTransport::new()),
        );

        assert_eq!(repo.item_url("7").unwrap(), "http://localhost:8080/api/agents/7");
        assert_eq!(
            repo.item_url("a/b?c#d").unwrap(),
            "http://localhost:8080/api/agents/a%2Fb%3Fc%23d"
        );

        let relative = ResourceRepository::<Agent>::new("agents", Arc::new(HttpTransport::new()));
        let err = relative.item_url("7").unwrap_err();
        assert!(err.is_configuration_fault());
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let server = mockito::Server::new_async().await;
        let err = repository(&server).update(&Agent::default()).await.unwrap_err();
        assert!(matches!(err, HubError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_errors_are_not_swallowed() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/api/agents/404")
            .with_status(404)
            .create_async()
            .await;
        let _failure = server
            .mock("GET", "/api/agents")
            .with_status(503)
            .create_async()
            .await;

        let repo = repository(&server);
        assert!(matches!(repo.get_by_id("404").await, Err(HubError::NotFound(_))));

        let err = repo.get_all(None).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(503));
    }
}
