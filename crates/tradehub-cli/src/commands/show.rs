//! 레코드 하나를 보기 모드 폼으로 출력.

use anyhow::Result;
use std::sync::Arc;
use tradehub_client::{ResourceForm, RouteContext, Transport};
use tradehub_core::{value_text, EndpointConfig};
use tradehub_form::{EditableFormState, Widget, WidgetDescriptor};

use super::{dispatch, repository, ResourceKind, ScreenResource};

pub async fn run(
    kind: ResourceKind,
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    id: &str,
) -> Result<()> {
    dispatch!(kind, show_resource(endpoints, transport, id))
}

async fn show_resource<T: ScreenResource>(
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    id: &str,
) -> Result<()> {
    let repository = repository::<T>(endpoints, transport)?;
    let route = RouteContext::resolve(&repository, Some(id)).await?;
    let screen = ResourceForm::mount(route);

    let Some(state) = screen.form().state() else {
        println!("{}: 편집 가능한 필드가 없습니다", T::NAME);
        return Ok(());
    };

    for widget in screen.form().widgets()? {
        println!("{}: {}", widget.label, display_value(&widget, state)?);
    }

    Ok(())
}

/// 위젯 종류에 맞춘 표시 값.
fn display_value(descriptor: &WidgetDescriptor, state: &EditableFormState) -> Result<String> {
    let text = match &descriptor.widget {
        Widget::Text(text) => text.display(state)?,
        Widget::Checkbox(checkbox) => {
            if checkbox.is_checked(state)? {
                "✓".to_string()
            } else {
                "✗".to_string()
            }
        }
        Widget::Dropdown(dropdown) => match dropdown.selected(state)? {
            Some(option) => option.label.clone(),
            None => value_text(descriptor.binding().value(state)?),
        },
        Widget::MultiSelect(multi) => {
            let selected = multi.selected(state)?;
            multi
                .options
                .iter()
                .filter(|o| selected.contains(&o.key))
                .map(|o| o.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    };

    Ok(if text.is_empty() { "-".to_string() } else { text })
}
