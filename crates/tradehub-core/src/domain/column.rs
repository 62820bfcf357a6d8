//! 테이블 컬럼 디스크립터.
//!
//! 리소스 타입과 무관하게 테이블 한 컬럼을 렌더링하는 방법을 기술합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pipe::{value_text, PipeType};

/// 값이 없는 셀의 표시 문자열.
pub const MISSING_PLACEHOLDER: &str = "-";

/// 컬럼 렌더링 종류.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    /// 평범한 값
    #[default]
    Default,
    /// 점 경로로 접근하는 중첩 값
    Nested,
    /// 행 동작 버튼
    DefaultButtons,
    /// 호출자 정의 템플릿
    CustomTemplate,
}

/// `DEFAULT_BUTTONS` 컬럼의 버튼.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnButton {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub style_class: String,
    /// 클릭 시 호출자에게 돌려주는 동작 태그
    pub action: String,
    #[serde(default)]
    pub disabled: bool,
}

impl ColumnButton {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: String::new(),
            style_class: String::new(),
            action: action.into(),
            disabled: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_style_class(mut self, style_class: impl Into<String>) -> Self {
        self.style_class = style_class.into();
        self
    }
}

/// 테이블 컬럼 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// 행 레코드에 대한 점 경로 (`"account.name"`)
    pub field: String,
    /// 헤더 텍스트
    pub header: String,
    #[serde(default)]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe_type: Option<PipeType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ColumnButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl ColumnDescriptor {
    /// 기본 컬럼을 생성합니다.
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            column_type: ColumnType::Default,
            pipe_type: None,
            buttons: Vec::new(),
            template: None,
        }
    }

    /// 중첩 컬럼을 생성합니다.
    pub fn nested(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            column_type: ColumnType::Nested,
            ..Self::new(field, header)
        }
    }

    /// 버튼 컬럼을 생성합니다.
    pub fn buttons(header: impl Into<String>, buttons: Vec<ColumnButton>) -> Self {
        Self {
            column_type: ColumnType::DefaultButtons,
            buttons,
            ..Self::new("", header)
        }
    }

    /// 포맷팅 파이프를 설정합니다.
    pub fn with_pipe(mut self, pipe: PipeType) -> Self {
        self.pipe_type = Some(pipe);
        self
    }

    /// 커스텀 템플릿 컬럼으로 바꿉니다.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.column_type = ColumnType::CustomTemplate;
        self.template = Some(template.into());
        self
    }

    /// 행에서 이 컬럼의 원시 값을 꺼냅니다.
    pub fn value(&self, row: &Value) -> Value {
        resolve_field(row, &self.field)
    }

    /// 행에서 이 컬럼의 표시 텍스트를 만듭니다.
    ///
    /// 버튼/템플릿 컬럼은 셀 텍스트가 없으므로 빈 문자열입니다.
    pub fn format_cell(&self, row: &Value) -> String {
        match self.column_type {
            ColumnType::DefaultButtons | ColumnType::CustomTemplate => String::new(),
            ColumnType::Default | ColumnType::Nested => {
                let raw = self.value(row);
                match self.pipe_type {
                    Some(pipe) if !raw.is_null() && raw != MISSING_PLACEHOLDER => {
                        pipe.transform(&raw)
                    }
                    _ => value_text(&raw),
                }
            }
        }
    }
}

/// 점 경로로 행 값을 찾습니다.
///
/// 경로 중간이 없거나 `null`이면 `"-"`를 반환하고, 실패하지 않습니다.
/// 마지막 값이 `null`이어도 `"-"`입니다.
pub fn resolve_field(row: &Value, field: &str) -> Value {
    let mut current = row;
    for segment in field.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) if !value.is_null() => current = value,
            _ => return Value::String(MISSING_PLACEHOLDER.to_string()),
        }
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dot_path_resolution() {
        let row = json!({ "a": { "b": 5 } });

        assert_eq!(resolve_field(&row, "a.b"), json!(5));
        assert_eq!(resolve_field(&row, "a.c"), json!("-"));
        assert_eq!(resolve_field(&row, "x.y.z"), json!("-"));
        assert_eq!(resolve_field(&row, "a"), json!({ "b": 5 }));
    }

    #[test]
    fn test_null_segments_yield_placeholder() {
        let row = json!({ "account": null, "name": null, "tags": ["x", "y"] });

        assert_eq!(resolve_field(&row, "account.name"), json!("-"));
        assert_eq!(resolve_field(&row, "name"), json!("-"));
        assert_eq!(resolve_field(&row, "tags.1"), json!("y"));
    }

    #[test]
    fn test_format_cell_applies_pipe() {
        let row = json!({ "owner": { "cpf": "12345678901" }, "createdAt": "2024-01-02" });

        let cpf = ColumnDescriptor::nested("owner.cpf", "CPF").with_pipe(PipeType::Cpf);
        assert_eq!(cpf.format_cell(&row), "123.456.789-01");

        let date = ColumnDescriptor::new("createdAt", "Criado").with_pipe(PipeType::Date);
        assert_eq!(date.format_cell(&row), "02/01/2024");

        let missing = ColumnDescriptor::new("updatedAt", "Atualizado").with_pipe(PipeType::Date);
        assert_eq!(missing.format_cell(&row), "-");
    }

    #[test]
    fn test_button_column_has_no_text() {
        let column = ColumnDescriptor::buttons(
            "Ações",
            vec![ColumnButton::new("Editar", "edit").with_icon("pi pi-pencil")],
        );
        assert_eq!(column.column_type, ColumnType::DefaultButtons);
        assert_eq!(column.format_cell(&json!({ "id": 1 })), "");
    }

    #[test]
    fn test_column_type_serde() {
        let json = serde_json::to_string(&ColumnType::DefaultButtons).unwrap();
        assert_eq!(json, "\"DEFAULT_BUTTONS\"");
    }
}
