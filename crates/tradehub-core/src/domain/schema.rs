//! 폼 아이템 스키마 정의.
//!
//! 하나의 편집 가능한 필드를 기술하는 값 객체입니다. 컨트롤 종류는 닫힌 태그 유니온이며,
//! 종류별 속성(마스크, 옵션, 바이너리 여부)은 각 변형의 페이로드에 담깁니다.
//!
//! 스키마는 리소스별 스키마 팩토리가 렌더링 요청마다 새로 만들고,
//! 엔진에 전달된 뒤에는 변경되지 않습니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::mask::MaskPattern;
use crate::error::{HubError, HubResult};

/// 검증 실패 시 기본 메시지.
pub const DEFAULT_ERROR_MESSAGE: &str = "Campo inválido";

/// 기본 레이아웃 클래스.
pub const DEFAULT_CLASS_NAME: &str = "col-4";

/// 제출 시 내보내는 키 → 값 매핑.
pub type FormValues = serde_json::Map<String, Value>;

/// 선택 옵션 (드롭다운/다중 선택).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// 저장되는 값
    pub key: String,
    /// 표시 라벨
    pub label: String,
}

impl SelectOption {
    /// 새 옵션을 생성합니다.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// 텍스트 입력 속성.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// 입력 마스크
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskPattern>,
    /// HTML 입력 타입 ("number"이면 숫자로 저장)
    #[serde(default, rename = "type")]
    pub input_type: String,
}

/// 체크박스 속성.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxProps {
    /// true면 불리언을, false면 선택된 값 목록을 저장
    #[serde(default)]
    pub binary: bool,
}

/// 드롭다운 속성.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownProps {
    /// 선택 옵션
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// 라벨 텍스트 필터 사용 여부
    #[serde(default)]
    pub filter: bool,
    /// 필터 대상 속성 (비어 있으면 라벨)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_by: Option<String>,
    /// 선택 해제 버튼 표시 여부
    #[serde(default)]
    pub show_clear: bool,
}

/// 다중 선택 값 표시 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionDisplay {
    /// 칩
    #[default]
    Chip,
    /// 쉼표 구분
    Comma,
}

/// 다중 선택 속성.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSelectProps {
    /// 선택 옵션
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// 라벨 텍스트 필터 사용 여부
    #[serde(default)]
    pub filter: bool,
    /// 선택 값 표시 방식
    #[serde(default)]
    pub display: SelectionDisplay,
}

/// 컨트롤 종류 (태그 + 종류별 페이로드).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "controlType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlKind {
    /// 자유/마스크 텍스트 입력
    #[serde(rename = "TEXT_INPUT", alias = "TEXT")]
    Text(TextProps),
    /// 불리언 토글
    Checkbox(CheckboxProps),
    /// 단일 선택
    Dropdown(DropdownProps),
    /// 다중 선택
    MultiSelect(MultiSelectProps),
}

/// 페이로드 없는 컨트롤 종류 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlTag {
    Text,
    Checkbox,
    Dropdown,
    MultiSelect,
}

impl fmt::Display for ControlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ControlTag::Text => "TEXT_INPUT",
            ControlTag::Checkbox => "CHECKBOX",
            ControlTag::Dropdown => "DROPDOWN",
            ControlTag::MultiSelect => "MULTI_SELECT",
        };
        f.write_str(tag)
    }
}

impl ControlKind {
    /// 태그 반환.
    pub fn tag(&self) -> ControlTag {
        match self {
            ControlKind::Text(_) => ControlTag::Text,
            ControlKind::Checkbox(_) => ControlTag::Checkbox,
            ControlKind::Dropdown(_) => ControlTag::Dropdown,
            ControlKind::MultiSelect(_) => ControlTag::MultiSelect,
        }
    }

    /// 값이 없을 때 사용하는 종류별 기본값.
    pub fn default_value(&self) -> Value {
        match self {
            ControlKind::Text(_) | ControlKind::Dropdown(_) => Value::String(String::new()),
            ControlKind::Checkbox(props) if props.binary => Value::Bool(false),
            ControlKind::Checkbox(_) | ControlKind::MultiSelect(_) => Value::Array(Vec::new()),
        }
    }
}

/// 필드 하나의 스키마.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormItemSchema {
    /// 리소스 속성 이름과 같은 고유 키
    pub key: String,

    /// 표시 라벨
    #[serde(default)]
    pub label: String,

    /// 컨트롤 종류
    #[serde(flatten)]
    pub control: ControlKind,

    /// 현재/기본 값
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// 필수 여부
    #[serde(default)]
    pub required: bool,

    /// 렌더링 순서 (동률이면 선언 순서)
    #[serde(default = "default_order")]
    pub order: i32,

    /// 읽기 전용 여부
    #[serde(default)]
    pub read_only: bool,

    /// 플레이스홀더
    #[serde(default)]
    pub placeholder: String,

    /// 검증 실패 메시지
    #[serde(default = "default_error_message")]
    pub error_message: String,

    /// 레이아웃 클래스
    #[serde(default = "default_class_name")]
    pub class_name: String,
}

fn default_order() -> i32 {
    1
}

fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

impl FormItemSchema {
    /// 주어진 컨트롤 종류로 새 스키마를 생성합니다.
    pub fn new(key: impl Into<String>, label: impl Into<String>, control: ControlKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control,
            value: None,
            required: false,
            order: default_order(),
            read_only: false,
            placeholder: String::new(),
            error_message: default_error_message(),
            class_name: default_class_name(),
        }
    }

    /// 텍스트 입력 스키마를 생성합니다.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ControlKind::Text(TextProps::default()))
    }

    /// 숫자 텍스트 입력 스키마를 생성합니다.
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            key,
            label,
            ControlKind::Text(TextProps {
                mask: None,
                input_type: "number".to_string(),
            }),
        )
    }

    /// 바이너리 체크박스 스키마를 생성합니다.
    pub fn checkbox(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ControlKind::Checkbox(CheckboxProps { binary: true }))
    }

    /// 드롭다운 스키마를 생성합니다.
    pub fn dropdown(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(
            key,
            label,
            ControlKind::Dropdown(DropdownProps {
                options,
                ..Default::default()
            }),
        )
    }

    /// 다중 선택 스키마를 생성합니다.
    pub fn multi_select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(
            key,
            label,
            ControlKind::MultiSelect(MultiSelectProps {
                options,
                ..Default::default()
            }),
        )
    }

    /// 현재 값을 설정합니다. `None`으로 직렬화되는 값은 "값 없음"으로 취급됩니다.
    ///
    /// 직렬화에 실패한 값은 경고를 남기고 "값 없음"으로 둡니다.
    pub fn with_value<V: Serialize>(mut self, value: V) -> Self {
        self.value = match serde_json::to_value(value) {
            Ok(Value::Null) => None,
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Schema value could not be serialized");
                None
            }
        };
        self
    }

    /// 필수 필드로 지정합니다.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 렌더링 순서를 설정합니다.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// 읽기 전용으로 지정합니다.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// 플레이스홀더를 설정합니다.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// 검증 실패 메시지를 설정합니다.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// 레이아웃 클래스를 설정합니다.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// 마스크를 설정합니다. 텍스트 입력 외에는 무시됩니다.
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        if let ControlKind::Text(props) = &mut self.control {
            props.mask = Some(mask);
        }
        self
    }

    /// 라벨 필터를 활성화합니다. 선택형 컨트롤 외에는 무시됩니다.
    pub fn with_filter(mut self) -> Self {
        match &mut self.control {
            ControlKind::Dropdown(props) => props.filter = true,
            ControlKind::MultiSelect(props) => props.filter = true,
            _ => {}
        }
        self
    }

    /// 드롭다운 필터를 켜고 검색 대상 속성(`key`, `label`, 쉼표 구분)을 지정합니다.
    pub fn with_filter_by(mut self, fields: impl Into<String>) -> Self {
        if let ControlKind::Dropdown(props) = &mut self.control {
            props.filter = true;
            props.filter_by = Some(fields.into());
        }
        self
    }

    /// 체크박스를 목록 저장 방식으로 바꿉니다.
    pub fn non_binary(mut self) -> Self {
        if let ControlKind::Checkbox(props) = &mut self.control {
            props.binary = false;
        }
        self
    }

    /// 컨트롤 종류 태그 반환.
    pub fn tag(&self) -> ControlTag {
        self.control.tag()
    }

    /// 상태에 심을 초기값 (`value`가 없으면 종류별 기본값).
    pub fn initial_value(&self) -> Value {
        match &self.value {
            Some(Value::Null) | None => self.control.default_value(),
            Some(v) => v.clone(),
        }
    }

    /// JSON 목록에서 스키마를 읽습니다.
    ///
    /// 등록되지 않은 컨트롤 종류는 설정 에러입니다.
    pub fn list_from_json(value: Value) -> HubResult<Vec<FormItemSchema>> {
        serde_json::from_value(value).map_err(|e| HubError::SchemaConfiguration(e.to_string()))
    }
}

/// 렌더링 순서로 정렬된 스키마 참조 목록 (안정 정렬).
pub fn render_order(schemas: &[FormItemSchema]) -> Vec<&FormItemSchema> {
    let mut ordered: Vec<&FormItemSchema> = schemas.iter().collect();
    ordered.sort_by_key(|s| s.order);
    ordered
}

/// 값이 "없음"인지 확인합니다 (`null`, 빈 문자열, 빈 목록).
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
