//! 리스크 관리 규칙.

use serde::{Deserialize, Serialize};
use tradehub_core::{lenient, ColumnDescriptor, FormItemSchema, Resource, SelectOption};

use super::{row_actions, FormSchemaSource, TableSource};

/// 리스크 관리 규칙.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskManagement {
    #[serde(
        default,
        deserialize_with = "lenient::identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub trade_asset: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub max_drawdown: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub max_daily_loss: Option<f64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub max_positions: Option<i64>,
    /// 허용되는 에이전트 행동 (`hold`, `open`, `close`)
    #[serde(default)]
    pub valid_inputs: Vec<String>,
    #[serde(default)]
    pub active: bool,
}

impl Resource for RiskManagement {
    const NAME: &'static str = "risk-management";
    const API_KEY: &'static str = "RISK_MANAGEMENT";
    const CONTROLLER_KEY: &'static str = "RISK_MANAGEMENT";
    const PATH: &'static str = "risk-management";
    const ROUTE: &'static str = "risk-management";

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// 에이전트 행동 옵션.
pub fn input_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("hold", "Manter"),
        SelectOption::new("open", "Abrir"),
        SelectOption::new("close", "Fechar"),
    ]
}

impl FormSchemaSource for RiskManagement {
    fn form_items(&self) -> Vec<FormItemSchema> {
        vec![
            FormItemSchema::text("name", "NOME")
                .with_value(&self.name)
                .required()
                .with_order(1),
            FormItemSchema::text("tradeAsset", "ATIVO")
                .with_value(&self.trade_asset)
                .with_order(2),
            FormItemSchema::number("maxDrawdown", "DRAW DOWN MAXIMO")
                .with_value(self.max_drawdown)
                .required()
                .with_order(3),
            FormItemSchema::number("maxDailyLoss", "PERDA DIARIA MAXIMA")
                .with_value(self.max_daily_loss)
                .with_order(4),
            FormItemSchema::number("maxPositions", "POSIÇÕES MAXIMAS")
                .with_value(self.max_positions)
                .with_order(5),
            FormItemSchema::multi_select("validInputs", "ENTRADAS VALIDAS", input_options())
                .with_value(&self.valid_inputs)
                .required()
                .with_order(6),
            FormItemSchema::checkbox("active", "ATIVO")
                .with_value(self.active)
                .with_order(7),
        ]
    }
}

impl TableSource for RiskManagement {
    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "NOME"),
            ColumnDescriptor::new("tradeAsset", "ATIVO"),
            ColumnDescriptor::new("maxDrawdown", "DRAW DOWN"),
            ColumnDescriptor::new("validInputs", "ENTRADAS"),
            ColumnDescriptor::new("active", "ATIVO"),
            row_actions(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradehub_form::{DynamicForm, Submission, Widget};

    #[test]
    fn test_valid_inputs_required_as_multi_select() {
        let mut form = DynamicForm::new();
        form.set_schemas(RiskManagement::default().form_items());
        form.state_mut()
            .unwrap()
            .set_value("name", serde_json::json!("conservador"))
            .unwrap();
        form.state_mut()
            .unwrap()
            .set_value("maxDrawdown", serde_json::json!(5.0))
            .unwrap();

        assert_eq!(form.handle_submit(), Submission::Suppressed);
        assert_eq!(form.validation_errors(), vec!["ENTRADAS VALIDAS"]);

        let widgets = form.widgets().unwrap();
        let inputs = widgets
            .iter()
            .find_map(|w| match &w.widget {
                Widget::MultiSelect(m) => Some(m.clone()),
                _ => None,
            })
            .unwrap();
        inputs.toggle(form.state_mut().unwrap(), "hold").unwrap();

        let Submission::Emitted(values) = form.handle_submit() else {
            panic!("valid form should emit");
        };
        let merged = tradehub_core::merge_values(&RiskManagement::default(), &values).unwrap();
        assert_eq!(merged.valid_inputs, vec!["hold"]);
        assert_eq!(merged.max_drawdown, Some(5.0));
    }
}
