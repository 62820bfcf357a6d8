//! 일반 리소스 폼 화면 기반.
//!
//! 스키마/검증은 모두 [`DynamicForm`]에 위임합니다. 이 모듈은 라우트 데이터로 리소스를
//! 심고, 제출 값을 리포지토리로 저장하는 부분만 담당합니다.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tradehub_core::{merge_values, HubResult, Resource};
use tradehub_form::{DynamicForm, FormMode, FormPhase, Navigator, Submission};

use crate::repository::ResourceRepository;
use crate::resources::FormSchemaSource;

/// 라우트가 폼 화면에 넘겨주는 데이터.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteContext<T> {
    /// 라우트 식별자 (편집 라우트)
    pub id: Option<String>,
    /// 미리 가져온 레코드
    pub resource: Option<T>,
}

impl<T> Default for RouteContext<T> {
    fn default() -> Self {
        Self {
            id: None,
            resource: None,
        }
    }
}

impl<T: Resource> RouteContext<T> {
    /// 생성 라우트.
    pub fn create() -> Self {
        Self::default()
    }

    /// 편집 라우트의 레코드를 미리 가져옵니다. 식별자가 없으면 생성 라우트입니다.
    pub async fn resolve(repository: &ResourceRepository<T>, id: Option<&str>) -> HubResult<Self> {
        match id {
            Some(id) => Ok(Self {
                id: Some(id.to_string()),
                resource: Some(repository.get_by_id(id).await?),
            }),
            None => Ok(Self::create()),
        }
    }
}

/// 리소스 `T`의 폼 화면 상태.
#[derive(Debug)]
pub struct ResourceForm<T: FormSchemaSource> {
    resource: T,
    form: DynamicForm,
    cancel: CancellationToken,
}

impl<T: FormSchemaSource> ResourceForm<T> {
    /// 라우트 데이터로 화면을 구성합니다.
    ///
    /// 식별자가 있으면 보기 모드, 없으면 빈 리소스로 편집 모드에서 시작합니다.
    pub fn mount(route: RouteContext<T>) -> Self {
        let resource = route.resource.unwrap_or_default();
        let id = route.id.or_else(|| resource.id());

        let mut form = DynamicForm::with_id(id);
        form.set_schemas(resource.form_items());
        debug!(resource = T::NAME, id = ?form.id(), "Form mounted");

        Self {
            resource,
            form,
            cancel: CancellationToken::new(),
        }
    }

    pub fn resource(&self) -> &T {
        &self.resource
    }

    pub fn form(&self) -> &DynamicForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut DynamicForm {
        &mut self.form
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self.form.phase() {
            FormPhase::Ready(mode) => Some(mode),
            FormPhase::Uninitialized => None,
        }
    }

    /// 리소스를 바꾸고 스키마를 다시 만듭니다. 이전 편집 상태는 버립니다.
    pub fn reseed(&mut self, resource: T) {
        self.form.set_id(resource.id());
        self.form.set_schemas(resource.form_items());
        self.resource = resource;
    }

    /// 제출을 시도합니다.
    pub fn submit(&mut self) -> Submission {
        self.form.handle_submit()
    }

    /// 제출하고 저장합니다.
    ///
    /// 제출이 억제되면 (보기 모드 포함) `None`을 반환합니다. 저장 중 화면이 해제되어도
    /// 마찬가지입니다. 성공하면 저장된 레코드로 다시 심고 보기 모드로 전환합니다.
    pub async fn save(&mut self, repository: &ResourceRepository<T>) -> HubResult<Option<T>> {
        let values = match self.form.handle_submit() {
            Submission::Emitted(values) => values,
            Submission::Suppressed => return Ok(None),
        };

        let record = merge_values(&self.resource, &values)?;
        let persist = async {
            match record.id() {
                Some(_) => repository.update(&record).await,
                None => repository.create(&record).await,
            }
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = persist => Some(result),
        };

        let persisted = match result {
            Some(result) if !self.cancel.is_cancelled() => result?,
            _ => {
                debug!(resource = T::NAME, "Late response ignored after teardown");
                return Ok(None);
            }
        };

        info!(resource = T::NAME, id = ?persisted.id(), "Record saved");
        self.reseed(persisted.clone());
        Ok(Some(persisted))
    }

    /// 히스토리에서 뒤로 갑니다.
    pub fn cancel(&self, navigator: &dyn Navigator) {
        self.form.cancel(navigator);
    }

    pub fn teardown_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Agent;
    use crate::transport::HttpTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_mount_modes() {
        let create = ResourceForm::<Agent>::mount(RouteContext::create());
        assert_eq!(create.mode(), Some(FormMode::Edit));
        assert_eq!(create.form().state().unwrap().get("name"), Some(&json!("")));

        let edit = ResourceForm::mount(RouteContext {
            id: Some("5".to_string()),
            resource: Some(Agent {
                id: Some("5".to_string()),
                name: Some("Alpha".to_string()),
            }),
        });
        assert_eq!(edit.mode(), Some(FormMode::View));
        assert_eq!(edit.form().state().unwrap().get("name"), Some(&json!("Alpha")));
    }

    #[tokio::test]
    async fn test_save_creates_then_switches_to_view() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/api/agents")
            .match_body(mockito::Matcher::Json(json!({ "name": "Alice" })))
            .with_status(201)
            .with_body(r#"{"id": "10", "name": "Alice"}"#)
            .create_async()
            .await;

        let repository = ResourceRepository::<Agent>::new(
            format!("{}/api/agents", server.url()),
            Arc::new(HttpTransport::new()),
        );
        let mut screen = ResourceForm::<Agent>::mount(RouteContext::create());

        assert_eq!(screen.save(&repository).await.unwrap(), None);

        screen
            .form_mut()
            .state_mut()
            .unwrap()
            .set_value("name", json!("Alice"))
            .unwrap();
        let saved = screen.save(&repository).await.unwrap().unwrap();

        assert_eq!(saved.id.as_deref(), Some("10"));
        assert_eq!(screen.mode(), Some(FormMode::View));
        assert_eq!(screen.form().id(), Some("10"));
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_in_view_mode_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let update = server
            .mock("PUT", "/api/agents/5")
            .expect(0)
            .create_async()
            .await;

        let repository = ResourceRepository::<Agent>::new(
            format!("{}/api/agents", server.url()),
            Arc::new(HttpTransport::new()),
        );
        let mut screen = ResourceForm::mount(RouteContext {
            id: Some("5".to_string()),
            resource: Some(Agent {
                id: Some("5".to_string()),
                name: Some("Alpha".to_string()),
            }),
        });

        assert_eq!(screen.save(&repository).await.unwrap(), None);
        assert_eq!(screen.mode(), Some(FormMode::View));
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_fetches_edit_route() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/api/agents/3")
            .with_status(200)
            .with_body(r#"{"id": "3", "name": "Gamma"}"#)
            .create_async()
            .await;

        let repository = ResourceRepository::<Agent>::new(
            format!("{}/api/agents", server.url()),
            Arc::new(HttpTransport::new()),
        );

        let route = RouteContext::resolve(&repository, Some("3")).await.unwrap();
        assert_eq!(route.resource.unwrap().name.as_deref(), Some("Gamma"));

        let route = RouteContext::resolve(&repository, None).await.unwrap();
        assert_eq!(route, RouteContext::create());
    }
}
