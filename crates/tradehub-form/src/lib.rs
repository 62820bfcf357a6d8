//! 스키마 기반 폼 엔진.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 스키마 목록에서 편집 상태 컨테이너 생성 (mapper)
//! - 컨트롤 종류별 위젯 디스크립터 해석 (resolver)
//! - 보기/편집 모드, 검증 에러 집계, 제출/취소 수명주기 (orchestrator)
//!
//! # 예제
//!
//! ```rust,ignore
//! use tradehub_core::FormItemSchema;
//! use tradehub_form::{DynamicForm, Submission};
//!
//! let mut form = DynamicForm::new();
//! form.set_schemas(vec![FormItemSchema::text("name", "Nome").required()]);
//!
//! if let Submission::Emitted(values) = form.handle_submit() {
//!     // 리포지토리로 저장
//! }
//! ```

pub mod mapper;
pub mod orchestrator;
pub mod resolver;
pub mod state;

// 주요 타입 재내보내기
pub use mapper::build_state;
pub use orchestrator::{DynamicForm, FormMode, FormPhase, Navigator, Submission};
pub use resolver::{
    resolve, resolve_all, CheckboxInput, DropdownInput, FieldBinding, MultiSelectInput,
    TextInput, Widget, WidgetDescriptor,
};
pub use state::{show_error, EditableFormState, FieldState, ValidationTag};
