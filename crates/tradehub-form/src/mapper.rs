//! 스키마 목록 → 편집 상태 변환.

use tracing::warn;
use tradehub_core::FormItemSchema;

use crate::state::EditableFormState;

/// 스키마 목록에서 편집 상태를 생성합니다.
///
/// 각 키의 초기값은 `value`이며, 없으면 컨트롤 종류의 기본값입니다.
/// `required` 필드에는 필수 값 규칙이 붙습니다. 같은 스키마 목록이면 항상 같은 상태를 만듭니다.
///
/// 중복 키는 마지막 선언이 이깁니다.
pub fn build_state(schemas: &[FormItemSchema]) -> EditableFormState {
    let mut state = EditableFormState::new();

    for schema in schemas {
        if state.insert(&schema.key, schema.initial_value(), schema.required) {
            warn!(key = %schema.key, "Duplicate form item key, keeping last declaration");
        }
    }

    state
}
