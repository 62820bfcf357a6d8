//! 컨트롤 종류 → 위젯 해석.
//!
//! 컨트롤 종류는 닫힌 열거형이므로 해석은 완전한 `match`입니다. 새 종류를 추가하면
//! 위젯이 등록될 때까지 컴파일되지 않습니다.
//!
//! 각 위젯은 자신의 키에 묶인 [`FieldBinding`]만 가지며, 다른 키의 상태를 읽거나 쓰지 않습니다.

use serde_json::{Number, Value};
use tradehub_core::{
    render_order, ControlKind, FormItemSchema, HubError, HubResult, MaskPattern, SelectOption,
    SelectionDisplay,
};

use crate::state::EditableFormState;

/// 키 하나에 묶인 양방향 상태 접근자.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    key: String,
    read_only: bool,
}

impl FieldBinding {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// 현재 값 반환.
    pub fn value<'s>(&self, state: &'s EditableFormState) -> HubResult<&'s Value> {
        state.get(&self.key).ok_or_else(|| self.missing())
    }

    /// 사용자 입력을 씁니다.
    ///
    /// 상태가 비활성이거나 필드가 읽기 전용이면 무시하고 `false`를 반환합니다.
    pub fn write(&self, state: &mut EditableFormState, value: Value) -> HubResult<bool> {
        if !state.contains(&self.key) {
            return Err(self.missing());
        }
        if self.read_only || !state.is_enabled() {
            return Ok(false);
        }
        state.set_value(&self.key, value)?;
        Ok(true)
    }

    /// 포커스를 잃었을 때 호출합니다.
    pub fn blur(&self, state: &mut EditableFormState) -> HubResult<()> {
        state.touch(&self.key)
    }

    pub fn show_error(&self, state: &EditableFormState) -> bool {
        state.field(&self.key).is_some_and(|f| f.show_error())
    }

    pub fn show_required_error(&self, state: &EditableFormState) -> bool {
        state.field(&self.key).is_some_and(|f| f.show_required_error())
    }

    fn missing(&self) -> HubError {
        HubError::SchemaConfiguration(format!("상태에 없는 키입니다: {}", self.key))
    }
}

/// 텍스트 입력 위젯.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub binding: FieldBinding,
    pub mask: Option<MaskPattern>,
    /// 숫자 입력이면 값을 숫자로 저장
    pub numeric: bool,
}

impl TextInput {
    /// 원시 텍스트 입력을 처리합니다.
    pub fn input(&self, state: &mut EditableFormState, raw: &str) -> HubResult<bool> {
        let text = match self.mask {
            Some(mask) => mask.apply(raw),
            None => raw.to_string(),
        };
        let value = if self.numeric {
            parse_number(&text)
        } else {
            Value::String(text)
        };
        self.binding.write(state, value)
    }

    /// 표시 텍스트 반환.
    pub fn display(&self, state: &EditableFormState) -> HubResult<String> {
        Ok(tradehub_core::value_text(self.binding.value(state)?))
    }
}

fn parse_number(text: &str) -> Value {
    let normalized = text.trim().replace(',', ".");
    if let Ok(n) = normalized.parse::<i64>() {
        return Value::Number(n.into());
    }
    normalized
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// 체크박스 위젯.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxInput {
    pub binding: FieldBinding,
    /// true면 불리언, false면 자신의 키를 담는 목록
    pub binary: bool,
}

impl CheckboxInput {
    pub fn is_checked(&self, state: &EditableFormState) -> HubResult<bool> {
        let value = self.binding.value(state)?;
        Ok(match value {
            Value::Bool(b) => *b,
            Value::Array(items) => items.iter().any(|v| v == self.binding.key()),
            _ => false,
        })
    }

    /// 체크 상태를 뒤집습니다.
    pub fn toggle(&self, state: &mut EditableFormState) -> HubResult<bool> {
        let checked = !self.is_checked(state)?;
        self.set_checked(state, checked)
    }

    pub fn set_checked(&self, state: &mut EditableFormState, checked: bool) -> HubResult<bool> {
        let value = if self.binary {
            Value::Bool(checked)
        } else if checked {
            Value::Array(vec![Value::String(self.binding.key().to_string())])
        } else {
            Value::Array(Vec::new())
        };
        self.binding.write(state, value)
    }
}

/// 드롭다운 위젯.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownInput {
    pub binding: FieldBinding,
    pub options: Vec<SelectOption>,
    pub filter: bool,
    /// 필터 대상 속성 (`key`, `label`, 쉼표 구분). 없으면 라벨
    pub filter_by: Option<String>,
    pub show_clear: bool,
}

impl DropdownInput {
    /// 옵션을 선택합니다. `None`이면 선택을 해제합니다.
    pub fn select(&self, state: &mut EditableFormState, key: Option<&str>) -> HubResult<bool> {
        let value = match key {
            Some(key) => {
                find_option(&self.options, key)?;
                Value::String(key.to_string())
            }
            None => Value::String(String::new()),
        };
        self.binding.write(state, value)
    }

    /// 선택된 옵션 반환.
    pub fn selected<'a>(&'a self, state: &EditableFormState) -> HubResult<Option<&'a SelectOption>> {
        let value = self.binding.value(state)?;
        Ok(self
            .options
            .iter()
            .find(|o| value == &Value::String(o.key.clone())))
    }

    /// 필터가 켜져 있으면 `filter_by` 속성에 검색어가 포함된 옵션만, 아니면 전체 옵션을 반환합니다.
    pub fn visible_options(&self, query: &str) -> Vec<&SelectOption> {
        filter_options(&self.options, self.filter, self.filter_by.as_deref(), query)
    }
}

/// 다중 선택 위젯.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectInput {
    pub binding: FieldBinding,
    pub options: Vec<SelectOption>,
    pub filter: bool,
    pub display: SelectionDisplay,
}

impl MultiSelectInput {
    /// 선택된 옵션 키 목록 (선택 순서).
    pub fn selected(&self, state: &EditableFormState) -> HubResult<Vec<String>> {
        Ok(match self.binding.value(state)? {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        })
    }

    /// 옵션 선택을 뒤집습니다.
    pub fn toggle(&self, state: &mut EditableFormState, key: &str) -> HubResult<bool> {
        find_option(&self.options, key)?;
        let mut selected = self.selected(state)?;
        match selected.iter().position(|k| k == key) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(key.to_string()),
        }
        self.binding.write(
            state,
            Value::Array(selected.into_iter().map(Value::String).collect()),
        )
    }

    pub fn visible_options(&self, query: &str) -> Vec<&SelectOption> {
        filter_options(&self.options, self.filter, None, query)
    }
}

fn find_option<'a>(options: &'a [SelectOption], key: &str) -> HubResult<&'a SelectOption> {
    options
        .iter()
        .find(|o| o.key == key)
        .ok_or_else(|| HubError::InvalidInput(format!("없는 옵션입니다: {key}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionField {
    Key,
    Label,
}

/// `filterBy` 목록을 해석합니다. 알 수 없는 이름은 무시하고, 남는 것이 없으면 라벨입니다.
fn option_fields(filter_by: Option<&str>) -> Vec<OptionField> {
    let fields: Vec<OptionField> = filter_by
        .unwrap_or_default()
        .split(',')
        .filter_map(|name| match name.trim() {
            "key" | "value" => Some(OptionField::Key),
            "label" => Some(OptionField::Label),
            _ => None,
        })
        .collect();
    if fields.is_empty() {
        vec![OptionField::Label]
    } else {
        fields
    }
}

fn filter_options<'a>(
    options: &'a [SelectOption],
    filter: bool,
    filter_by: Option<&str>,
    query: &str,
) -> Vec<&'a SelectOption> {
    let query = query.trim().to_lowercase();
    if !filter || query.is_empty() {
        return options.iter().collect();
    }

    let fields = option_fields(filter_by);
    options
        .iter()
        .filter(|o| {
            fields.iter().any(|field| {
                let text = match field {
                    OptionField::Key => &o.key,
                    OptionField::Label => &o.label,
                };
                text.to_lowercase().contains(&query)
            })
        })
        .collect()
}

/// 종류별 위젯.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Text(TextInput),
    Checkbox(CheckboxInput),
    Dropdown(DropdownInput),
    MultiSelect(MultiSelectInput),
}

/// 스키마 아이템 하나를 렌더링하는 위젯 디스크립터.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDescriptor {
    pub key: String,
    pub label: String,
    pub placeholder: String,
    pub read_only: bool,
    pub required: bool,
    pub error_message: String,
    pub class_name: String,
    pub widget: Widget,
}

impl WidgetDescriptor {
    /// 위젯의 상태 접근자 반환.
    pub fn binding(&self) -> &FieldBinding {
        match &self.widget {
            Widget::Text(w) => &w.binding,
            Widget::Checkbox(w) => &w.binding,
            Widget::Dropdown(w) => &w.binding,
            Widget::MultiSelect(w) => &w.binding,
        }
    }

    /// 현재 표시해야 할 에러 메시지 반환.
    pub fn error(&self, state: &EditableFormState) -> Option<&str> {
        self.binding()
            .show_error(state)
            .then_some(self.error_message.as_str())
    }
}

/// 스키마 아이템을 위젯으로 해석합니다.
///
/// 스키마 키가 상태에 없으면 스키마 설정 에러입니다.
pub fn resolve(schema: &FormItemSchema, state: &EditableFormState) -> HubResult<WidgetDescriptor> {
    if !state.contains(&schema.key) {
        return Err(HubError::SchemaConfiguration(format!(
            "상태에 없는 키입니다: {} ({})",
            schema.key,
            schema.tag()
        )));
    }

    let binding = FieldBinding {
        key: schema.key.clone(),
        read_only: schema.read_only,
    };

    let widget = match &schema.control {
        ControlKind::Text(props) => Widget::Text(TextInput {
            binding,
            mask: props.mask,
            numeric: props.input_type.eq_ignore_ascii_case("number"),
        }),
        ControlKind::Checkbox(props) => Widget::Checkbox(CheckboxInput {
            binding,
            binary: props.binary,
        }),
        ControlKind::Dropdown(props) => Widget::Dropdown(DropdownInput {
            binding,
            options: props.options.clone(),
            filter: props.filter,
            filter_by: props.filter_by.clone(),
            show_clear: props.show_clear,
        }),
        ControlKind::MultiSelect(props) => Widget::MultiSelect(MultiSelectInput {
            binding,
            options: props.options.clone(),
            filter: props.filter,
            display: props.display,
        }),
    };

    Ok(WidgetDescriptor {
        key: schema.key.clone(),
        label: schema.label.clone(),
        placeholder: schema.placeholder.clone(),
        read_only: schema.read_only,
        required: schema.required,
        error_message: schema.error_message.clone(),
        class_name: schema.class_name.clone(),
        widget,
    })
}

/// 스키마 목록을 렌더링 순서로 해석합니다.
pub fn resolve_all(
    schemas: &[FormItemSchema],
    state: &EditableFormState,
) -> HubResult<Vec<WidgetDescriptor>> {
    render_order(schemas)
        .into_iter()
        .map(|schema| resolve(schema, state))
        .collect()
}
