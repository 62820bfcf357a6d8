//! 트레이딩 에이전트.

use serde::{Deserialize, Serialize};
use tradehub_core::{lenient, ColumnDescriptor, FormItemSchema, Resource};

use super::{row_actions, FormSchemaSource, TableSource};

/// 트레이딩 에이전트.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(
        default,
        alias = "agentDimUuid",
        deserialize_with = "lenient::identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Resource for Agent {
    const NAME: &'static str = "agent";
    const API_KEY: &'static str = "TRADE_ZERO";
    const CONTROLLER_KEY: &'static str = "TRADE_ZERO";
    const PATH: &'static str = "agents";
    const ROUTE: &'static str = "agents";

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

impl FormSchemaSource for Agent {
    fn form_items(&self) -> Vec<FormItemSchema> {
        vec![FormItemSchema::text("name", "NOME")
            .with_value(&self.name)
            .required()
            .with_order(1)]
    }
}

impl TableSource for Agent {
    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "ID"),
            ColumnDescriptor::new("name", "NOME"),
            row_actions(),
        ]
    }
}
