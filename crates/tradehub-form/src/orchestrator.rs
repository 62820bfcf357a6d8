//! 동적 폼 오케스트레이터.
//!
//! 스키마 목록 하나에 대한 편집 상태의 수명주기를 관리합니다.
//!
//! ```text
//! Uninitialized ──set_schemas(non-empty)──▶ Ready(View | Edit)
//!      ▲                                       │
//!      └──────────set_schemas(...)─────────────┘ (항상 처음부터 재생성)
//! ```
//!
//! 식별자가 있으면 보기 모드(비활성)로, 없으면 편집 모드(활성)로 시작합니다.

use tracing::debug;
use tradehub_core::{render_order, FormItemSchema, FormValues, HubResult};

use crate::mapper::build_state;
use crate::resolver::{resolve_all, WidgetDescriptor};
use crate::state::EditableFormState;

/// 화면 이동 seam.
pub trait Navigator: Send + Sync {
    /// 경로로 이동합니다.
    fn navigate(&self, path: &str);

    /// 히스토리에서 한 단계 뒤로 갑니다.
    fn back(&self);
}

/// 폼 모드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// 읽기 전용 (기존 레코드)
    View,
    /// 편집 가능
    Edit,
}

/// 오케스트레이터 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Uninitialized,
    Ready(FormMode),
}

/// 제출 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// 모든 필드가 유효해 값 매핑을 내보냄
    Emitted(FormValues),
    /// 검증 실패로 제출이 억제됨 (모든 필드 touched)
    Suppressed,
}

/// 스키마 목록 하나를 소유하는 폼.
#[derive(Debug, Default)]
pub struct DynamicForm {
    schemas: Vec<FormItemSchema>,
    id: Option<String>,
    state: Option<EditableFormState>,
    mode: Option<FormMode>,
}

impl DynamicForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 식별자와 함께 생성합니다.
    pub fn with_id(id: Option<String>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// 현재 단계 반환.
    pub fn phase(&self) -> FormPhase {
        match (self.state.is_some(), self.mode) {
            (true, Some(mode)) => FormPhase::Ready(mode),
            _ => FormPhase::Uninitialized,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn schemas(&self) -> &[FormItemSchema] {
        &self.schemas
    }

    pub fn state(&self) -> Option<&EditableFormState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut EditableFormState> {
        self.state.as_mut()
    }

    /// 스키마 목록을 교체합니다.
    ///
    /// 이전 상태는 병합하지 않고 버립니다. 빈 목록이면 `Uninitialized`로 돌아갑니다.
    pub fn set_schemas(&mut self, schemas: Vec<FormItemSchema>) {
        self.schemas = schemas;
        self.state = None;
        self.mode = None;

        if self.schemas.is_empty() {
            debug!("Empty schema list, form uninitialized");
            return;
        }

        let mut state = build_state(&self.schemas);
        let mode = self.initial_mode();
        if mode == FormMode::View {
            state.disable();
        }

        debug!(fields = state.len(), ?mode, "Form state rebuilt");
        self.state = Some(state);
        self.mode = Some(mode);
    }

    /// 식별자를 바꿉니다. 준비된 상태라면 모드를 다시 정합니다.
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
        if self.state.is_some() {
            match self.initial_mode() {
                FormMode::View => self.disable_edit(),
                FormMode::Edit => self.enable_edit(),
            }
        }
    }

    fn initial_mode(&self) -> FormMode {
        if self.id.is_some() {
            FormMode::View
        } else {
            FormMode::Edit
        }
    }

    /// 보기 → 편집. 모든 필드를 활성화합니다.
    pub fn enable_edit(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.enable();
            self.mode = Some(FormMode::Edit);
            debug!("Form switched to edit mode");
        }
    }

    /// 편집 → 보기. 마지막 값은 유지합니다.
    pub fn disable_edit(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.disable();
            self.mode = Some(FormMode::View);
            debug!("Form switched to view mode");
        }
    }

    /// 히스토리에서 뒤로 갑니다. 상태는 바꾸지 않습니다.
    pub fn cancel(&self, navigator: &dyn Navigator) {
        navigator.back();
    }

    /// 제출을 시도합니다.
    ///
    /// 모두 유효하면 현재 값 매핑을 내보내고 상태는 그대로 둡니다.
    /// 하나라도 무효이면 모든 필드를 touched로 표시하고 내보내지 않습니다.
    /// 보기 모드(비활성 상태)에서는 아무것도 내보내지 않습니다.
    pub fn handle_submit(&mut self) -> Submission {
        let Some(state) = self.state.as_mut() else {
            return Submission::Suppressed;
        };
        if !state.is_enabled() {
            debug!("Form submit ignored in view mode");
            return Submission::Suppressed;
        }

        if state.is_valid() {
            Submission::Emitted(state.raw_values())
        } else {
            state.mark_all_touched();
            debug!(invalid = ?self.validation_errors(), "Form submit suppressed");
            Submission::Suppressed
        }
    }

    /// 현재 무효인 필드의 라벨 목록 (렌더링 순서). 비활성 필드는 검증 대상이 아닙니다.
    pub fn validation_errors(&self) -> Vec<String> {
        let Some(state) = self.state.as_ref().filter(|s| s.is_enabled()) else {
            return Vec::new();
        };

        render_order(&self.schemas)
            .into_iter()
            .filter(|schema| state.field(&schema.key).is_some_and(|f| !f.is_valid()))
            .map(|schema| schema.label.clone())
            .collect()
    }

    /// 렌더링 순서로 해석된 위젯 목록.
    pub fn widgets(&self) -> HubResult<Vec<WidgetDescriptor>> {
        match self.state.as_ref() {
            Some(state) => resolve_all(&self.schemas, state),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Widget;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingNavigator {
        backs: AtomicUsize,
    }

    impl Navigator for CountingNavigator {
        fn navigate(&self, _path: &str) {}

        fn back(&self) {
            self.backs.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn alice_schema() -> Vec<FormItemSchema> {
        vec![FormItemSchema::text("name", "Nome")
            .required()
            .with_order(1)
            .with_value("")]
    }

    #[test]
    fn test_required_name_scenario() {
        let mut form = DynamicForm::new();
        form.set_schemas(alice_schema());
        assert_eq!(form.phase(), FormPhase::Ready(FormMode::Edit));

        let field = form.state().unwrap().field("name").unwrap();
        assert!(!field.is_valid());
        assert!(!field.show_required_error());

        assert_eq!(form.handle_submit(), Submission::Suppressed);
        let field = form.state().unwrap().field("name").unwrap();
        assert!(field.is_touched());
        assert!(field.show_required_error());
        assert_eq!(form.validation_errors(), vec!["Nome"]);

        let widgets = form.widgets().unwrap();
        let Widget::Text(name) = &widgets[0].widget else { panic!("text widget") };
        name.input(form.state_mut().unwrap(), "Alice").unwrap();
        assert!(form.state().unwrap().is_valid());

        let mut expected = FormValues::new();
        expected.insert("name".to_string(), json!("Alice"));
        assert_eq!(form.handle_submit(), Submission::Emitted(expected));
    }

    #[test]
    fn test_id_starts_in_view_mode() {
        let mut form = DynamicForm::with_id(Some("agent-1".to_string()));
        form.set_schemas(alice_schema());

        assert_eq!(form.phase(), FormPhase::Ready(FormMode::View));
        assert!(!form.state().unwrap().is_enabled());

        form.enable_edit();
        assert_eq!(form.phase(), FormPhase::Ready(FormMode::Edit));
        assert!(form.state().unwrap().is_enabled());

        form.disable_edit();
        assert!(!form.state().unwrap().is_enabled());
    }

    #[test]
    fn test_set_id_switches_mode() {
        let mut form = DynamicForm::new();
        form.set_schemas(alice_schema());
        form.set_id(Some("a".to_string()));
        assert_eq!(form.phase(), FormPhase::Ready(FormMode::View));
        form.set_id(None);
        assert_eq!(form.phase(), FormPhase::Ready(FormMode::Edit));
    }

    #[test]
    fn test_schema_replacement_discards_state() {
        let mut form = DynamicForm::new();
        form.set_schemas(alice_schema());
        form.state_mut()
            .unwrap()
            .set_value("name", json!("typed"))
            .unwrap();

        form.set_schemas(vec![
            FormItemSchema::text("name", "Nome").with_value("reloaded"),
            FormItemSchema::checkbox("active", "Ativo"),
        ]);

        let state = form.state().unwrap();
        assert_eq!(state.get("name"), Some(&json!("reloaded")));
        assert!(!state.field("name").unwrap().is_dirty());
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_empty_schema_is_uninitialized() {
        let mut form = DynamicForm::new();
        assert_eq!(form.phase(), FormPhase::Uninitialized);

        form.set_schemas(alice_schema());
        form.set_schemas(Vec::new());
        assert_eq!(form.phase(), FormPhase::Uninitialized);
        assert_eq!(form.handle_submit(), Submission::Suppressed);
        assert!(form.widgets().unwrap().is_empty());
    }

    #[test]
    fn test_validation_errors_follow_render_order() {
        let mut form = DynamicForm::new();
        form.set_schemas(vec![
            FormItemSchema::text("b", "Segundo").required().with_order(2),
            FormItemSchema::text("a", "Primeiro").required().with_order(1),
            FormItemSchema::text("c", "Opcional").with_order(0),
        ]);

        assert_eq!(form.validation_errors(), vec!["Primeiro", "Segundo"]);
    }

    #[test]
    fn test_cancel_goes_back_without_mutation() {
        let navigator = CountingNavigator::default();
        let mut form = DynamicForm::new();
        form.set_schemas(alice_schema());
        let before = form.state().cloned();

        form.cancel(&navigator);

        assert_eq!(navigator.backs.load(Ordering::SeqCst), 1);
        assert_eq!(form.state().cloned(), before);
    }

    #[test]
    fn test_view_mode_suppresses_submit() {
        let mut form = DynamicForm::with_id(Some("x".to_string()));
        form.set_schemas(vec![
            FormItemSchema::text("name", "Nome").required().with_value("Ana"),
            FormItemSchema::text("alias", "Apelido").required(),
        ]);

        assert!(form.validation_errors().is_empty());
        assert_eq!(form.handle_submit(), Submission::Suppressed);
        assert!(!form.state().unwrap().field("alias").unwrap().is_touched());

        form.enable_edit();
        assert_eq!(form.validation_errors(), vec!["Apelido"]);
        form.state_mut().unwrap().set_value("alias", json!("A")).unwrap();

        let Submission::Emitted(values) = form.handle_submit() else {
            panic!("valid form in edit mode should emit");
        };
        assert_eq!(values["name"], json!("Ana"));

        form.disable_edit();
        assert_eq!(form.handle_submit(), Submission::Suppressed);
    }
}
