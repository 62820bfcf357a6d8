//! 에이전트 리스트/폼 화면을 mock 백엔드에 연결한 통합 테스트.

use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tradehub_client::resources::Agent;
use tradehub_client::{
    HttpTransport, LoadOutcome, ResourceForm, ResourceList, ResourceRepository, RouteContext,
};
use tradehub_core::EndpointConfig;
use tradehub_form::{FormMode, Navigator, Submission, Widget};

#[derive(Default)]
struct HistoryNavigator(Mutex<Vec<String>>);

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        self.0.lock().unwrap().push(path.to_string());
    }

    fn back(&self) {
        self.0.lock().unwrap().pop();
    }
}

fn repository(server: &mockito::Server) -> ResourceRepository<Agent> {
    let endpoints = EndpointConfig::new(
        HashMap::from([("TRADE_ZERO".to_string(), server.url())]),
        HashMap::from([("TRADE_ZERO".to_string(), "api".to_string())]),
    );
    ResourceRepository::from_endpoints(&endpoints, Arc::new(HttpTransport::new()))
        .expect("agent endpoint")
}

#[tokio::test]
async fn test_create_agent_from_empty_form() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/agents")
        .match_body(mockito::Matcher::Json(json!({ "name": "Alice" })))
        .with_status(201)
        .with_body(r#"{"id": "a-1", "name": "Alice"}"#)
        .create_async()
        .await;
    let list_mock = server
        .mock("GET", "/api/agents")
        .with_status(200)
        .with_body(r#"[{"id": "a-1", "name": "Alice"}]"#)
        .create_async()
        .await;

    let repository = repository(&server);
    let navigator = HistoryNavigator::default();

    let list = ResourceList::<Agent>::new();
    list.add(&navigator);
    assert_eq!(*navigator.0.lock().unwrap(), vec!["/agents/form".to_string()]);

    let mut screen = ResourceForm::<Agent>::mount(RouteContext::create());
    let field = screen.form().state().unwrap().field("name").unwrap();
    assert!(!field.is_valid());
    assert!(!field.show_required_error());

    // 입력 없이 제출
    assert_eq!(screen.submit(), Submission::Suppressed);
    let field = screen.form().state().unwrap().field("name").unwrap();
    assert!(field.is_touched());
    assert!(field.show_required_error());
    assert_eq!(screen.form().validation_errors(), vec!["NOME"]);

    let widgets = screen.form().widgets().unwrap();
    let Widget::Text(name) = &widgets[0].widget else {
        panic!("agent form starts with the name input");
    };
    name.input(screen.form_mut().state_mut().unwrap(), "Alice").unwrap();
    assert!(screen.form().state().unwrap().is_valid());

    let saved = screen.save(&repository).await.unwrap().expect("saved agent");
    assert_eq!(saved.id.as_deref(), Some("a-1"));
    assert_eq!(screen.mode(), Some(FormMode::View));
    create.assert_async().await;

    screen.cancel(&navigator);
    assert!(navigator.0.lock().unwrap().is_empty());

    let mut list = ResourceList::<Agent>::new();
    assert_eq!(list.load(&repository).await.unwrap(), LoadOutcome::Loaded(1));
    assert_eq!(list.table_rows().unwrap(), vec![vec!["a-1".to_string(), "Alice".to_string()]]);
    list_mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_route_updates_existing_agent() {
    let mut server = mockito::Server::new_async().await;
    let _get = server
        .mock("GET", "/api/agents/a-2")
        .with_status(200)
        .with_body(r#"{"id": "a-2", "name": "Bob"}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/agents/a-2")
        .match_body(mockito::Matcher::Json(json!({ "id": "a-2", "name": "Bobby" })))
        .with_status(200)
        .with_body(r#"{"id": "a-2", "name": "Bobby"}"#)
        .create_async()
        .await;

    let repository = repository(&server);
    let route = RouteContext::resolve(&repository, Some("a-2")).await.unwrap();
    let mut screen = ResourceForm::mount(route);
    assert_eq!(screen.mode(), Some(FormMode::View));

    let widgets = screen.form().widgets().unwrap();
    let Widget::Text(name) = &widgets[0].widget else {
        panic!("name input");
    };
    assert!(!name.input(screen.form_mut().state_mut().unwrap(), "Bobby").unwrap());

    screen.form_mut().enable_edit();
    assert!(name.input(screen.form_mut().state_mut().unwrap(), "Bobby").unwrap());

    let saved = screen.save(&repository).await.unwrap().expect("updated agent");
    assert_eq!(saved.name.as_deref(), Some("Bobby"));
    assert_eq!(screen.mode(), Some(FormMode::View));
    update.assert_async().await;
}

#[tokio::test]
async fn test_backend_failure_surfaces_to_screen() {
    let mut server = mockito::Server::new_async().await;
    let _failure = server
        .mock("POST", "/api/agents")
        .with_status(500)
        .create_async()
        .await;

    let repository = repository(&server);
    let mut screen = ResourceForm::<Agent>::mount(RouteContext::create());
    screen
        .form_mut()
        .state_mut()
        .unwrap()
        .set_value("name", json!("Carol"))
        .unwrap();

    let err = screen.save(&repository).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(screen.mode(), Some(FormMode::Edit));
}
