//! 편집 가능한 폼 상태 컨테이너.
//!
//! 스키마 키마다 현재 값, 검증 결과, touched/dirty 플래그를 보관합니다.
//! 파생 표시 상태(`show_error` 등)는 저장하지 않고 매번 현재 상태에서 계산합니다.

use serde_json::Value;
use std::collections::HashMap;
use tradehub_core::{is_empty_value, FormValues, HubError, HubResult};

/// 검증 실패 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationTag {
    /// 필수 값 누락
    Required,
}

/// 필드 하나의 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    value: Value,
    required: bool,
    touched: bool,
    dirty: bool,
    failure: Option<ValidationTag>,
}

impl FieldState {
    fn new(value: Value, required: bool) -> Self {
        let mut field = Self {
            value,
            required,
            touched: false,
            dirty: false,
            failure: None,
        };
        field.validate();
        field
    }

    fn validate(&mut self) {
        self.failure = if self.required && is_empty_value(&self.value) {
            Some(ValidationTag::Required)
        } else {
            None
        };
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn failure(&self) -> Option<ValidationTag> {
        self.failure
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// 에러 표시 여부.
    pub fn show_error(&self) -> bool {
        show_error(!self.is_valid(), self.dirty, self.touched)
    }

    /// 필수 값 에러 표시 여부.
    pub fn show_required_error(&self) -> bool {
        self.show_error() && self.failure == Some(ValidationTag::Required)
    }
}

/// `invalid AND (dirty OR touched)`.
pub fn show_error(invalid: bool, dirty: bool, touched: bool) -> bool {
    invalid && (dirty || touched)
}

/// 폼 전체 상태.
///
/// 전체가 활성화되어 있거나 전체가 비활성화되어 있습니다. 필드 단위 활성화는 없습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableFormState {
    fields: HashMap<String, FieldState>,
    order: Vec<String>,
    enabled: bool,
}

impl Default for EditableFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditableFormState {
    /// 빈 활성 상태를 생성합니다.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            order: Vec::new(),
            enabled: true,
        }
    }

    /// 필드를 추가합니다. 같은 키가 이미 있으면 교체하고 `true`를 반환합니다.
    pub(crate) fn insert(&mut self, key: &str, value: Value, required: bool) -> bool {
        let replaced = self
            .fields
            .insert(key.to_string(), FieldState::new(value, required))
            .is_some();
        if !replaced {
            self.order.push(key.to_string());
        }
        replaced
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// 필드 상태 반환.
    pub fn field(&self, key: &str) -> Option<&FieldState> {
        self.fields.get(key)
    }

    /// 현재 값 반환.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).map(|f| &f.value)
    }

    /// 값을 설정하고 재검증합니다. 필드는 dirty가 됩니다.
    ///
    /// 상태에 없는 키는 스키마 설정 에러입니다.
    pub fn set_value(&mut self, key: &str, value: Value) -> HubResult<()> {
        let field = self.fields.get_mut(key).ok_or_else(|| {
            HubError::SchemaConfiguration(format!("상태에 없는 키입니다: {key}"))
        })?;
        field.value = value;
        field.dirty = true;
        field.validate();
        Ok(())
    }

    /// 필드를 touched로 표시합니다.
    pub fn touch(&mut self, key: &str) -> HubResult<()> {
        let field = self.fields.get_mut(key).ok_or_else(|| {
            HubError::SchemaConfiguration(format!("상태에 없는 키입니다: {key}"))
        })?;
        field.touched = true;
        Ok(())
    }

    /// 모든 필드를 touched로 표시합니다.
    pub fn mark_all_touched(&mut self) {
        for field in self.fields.values_mut() {
            field.touched = true;
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 모든 필드가 유효한지 확인합니다.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldState::is_valid)
    }

    /// 키 목록 (선언 순서).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 비활성 여부와 관계없이 모든 키의 현재 값을 반환합니다.
    pub fn raw_values(&self) -> FormValues {
        self.order
            .iter()
            .filter_map(|key| {
                self.fields
                    .get(key)
                    .map(|field| (key.clone(), field.value.clone()))
            })
            .collect()
    }
}
