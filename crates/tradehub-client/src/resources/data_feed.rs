//! 데이터 피드 캔들 항목.

use serde::{Deserialize, Serialize};
use tradehub_core::{lenient, ColumnDescriptor, FormItemSchema, PipeType, Resource};

use super::{row_actions, FormSchemaSource, TableSource};

/// 데이터 피드 항목.
///
/// 달력 속성(`year`, `quarter_` 등)은 백엔드가 `datetime`에서 계산하므로 폼에서 편집하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFeed {
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
    #[serde(default)]
    pub trade_time_frame: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month_: Option<String>,
    #[serde(default)]
    pub day_of_month: Option<String>,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub week_of_year: Option<String>,
    #[serde(default)]
    pub quarter_: Option<String>,
    #[serde(default)]
    pub start_of_week: Option<String>,
    #[serde(default)]
    pub start_of_month: Option<String>,
    #[serde(default)]
    pub is_weekend: Option<String>,
}

impl Resource for DataFeed {
    const NAME: &'static str = "datafeed";
    const API_KEY: &'static str = "DATA_FEED";
    const CONTROLLER_KEY: &'static str = "DATA_FEED";
    const PATH: &'static str = "datafeeds";
    const ROUTE: &'static str = "datafeeds";

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

impl FormSchemaSource for DataFeed {
    fn form_items(&self) -> Vec<FormItemSchema> {
        vec![
            FormItemSchema::text("name", "NOME")
                .with_value(&self.name)
                .required()
                .with_order(1),
            FormItemSchema::text("trade_asset", "ATIVO")
                .with_value(&self.trade_asset)
                .required()
                .with_order(2),
            FormItemSchema::text("trade_time_frame", "TIME FRAME")
                .with_value(&self.trade_time_frame)
                .required()
                .with_order(3),
            FormItemSchema::text("datetime", "DATA/HORA")
                .with_value(&self.datetime)
                .with_placeholder("YYYY-MM-DDTHH:MM:SS")
                .with_order(4),
        ]
    }
}

impl TableSource for DataFeed {
    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "NOME"),
            ColumnDescriptor::new("trade_asset", "ATIVO"),
            ColumnDescriptor::new("trade_time_frame", "TIME FRAME"),
            ColumnDescriptor::new("datetime", "DATA").with_pipe(PipeType::Date),
            ColumnDescriptor::new("datetime", "HORA").with_pipe(PipeType::Time),
            ColumnDescriptor::new("is_weekend", "FIM DE SEMANA"),
            row_actions(),
        ]
    }
}
