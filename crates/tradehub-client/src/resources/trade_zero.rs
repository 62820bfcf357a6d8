//! Trade-zero 학습 차원/팩트.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tradehub_core::{lenient, ColumnDescriptor, FormItemSchema, PipeType, Resource};

use super::{row_actions, FormSchemaSource, TableSource};

/// 학습 환경 차원.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeZeroDimension {
    #[serde(
        default,
        deserialize_with = "lenient::identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub trade_zero_dim_uuid: Option<String>,
    /// 자산 목록 또는 단일 자산 코드
    #[serde(default)]
    pub trade_asset: Option<Value>,
    #[serde(default)]
    pub trade_time_frame: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub balance_initial: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub drawdown: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub max_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub max_hold: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub look_back: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub look_forward: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub back_propagate_size: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub max_episode: Option<i64>,
}

impl Resource for TradeZeroDimension {
    const NAME: &'static str = "tradezero-dimension";
    const API_KEY: &'static str = "TRADE_ZERO";
    const CONTROLLER_KEY: &'static str = "TRADE_ZERO";
    const PATH: &'static str = "tradezero-dimensions";
    const ROUTE: &'static str = "tradezero-dimensions";

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

impl FormSchemaSource for TradeZeroDimension {
    fn form_items(&self) -> Vec<FormItemSchema> {
        vec![
            FormItemSchema::text("tradeZeroDimUuid", "UUID")
                .with_value(&self.trade_zero_dim_uuid)
                .required()
                .with_order(1),
            FormItemSchema::text("tradeAsset", "ASSET")
                .with_value(&self.trade_asset)
                .required()
                .with_order(2),
            FormItemSchema::text("tradeTimeFrame", "TRADE TIME FRAME")
                .with_value(&self.trade_time_frame)
                .required()
                .with_order(3),
            FormItemSchema::number("balanceInitial", "BALANÇO INICIAL")
                .with_value(self.balance_initial)
                .required()
                .with_order(4),
            FormItemSchema::number("drawdown", "DRAW DOWN")
                .with_value(self.drawdown)
                .required()
                .with_order(5),
            FormItemSchema::number("maxVolume", "VOLUME MAXIMO")
                .with_value(self.max_volume)
                .required()
                .with_order(6),
            FormItemSchema::number("maxHold", "MAX HOLD")
                .with_value(self.max_hold)
                .required()
                .with_order(7),
            FormItemSchema::number("lookBack", "LOOK BACK")
                .with_value(self.look_back)
                .required()
                .with_order(8),
            FormItemSchema::number("lookForward", "LOOK FORWARD")
                .with_value(self.look_forward)
                .required()
                .with_order(9),
            FormItemSchema::number("backPropagateSize", "BACK PROPAGATE SIZE")
                .with_value(self.back_propagate_size)
                .required()
                .with_order(10),
            FormItemSchema::number("maxEpisode", "MAX EPISODE")
                .with_value(self.max_episode)
                .required()
                .with_order(11),
        ]
    }
}

impl TableSource for TradeZeroDimension {
    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("tradeZeroDimUuid", "UUID"),
            ColumnDescriptor::new("tradeAsset", "ASSET"),
            ColumnDescriptor::new("tradeTimeFrame", "TIME FRAME"),
            ColumnDescriptor::new("balanceInitial", "BALANÇO INICIAL"),
            ColumnDescriptor::new("maxEpisode", "MAX EPISODE"),
            row_actions(),
        ]
    }
}

/// 에이전트 학습 결과 팩트.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeZeroFact {
    #[serde(
        default,
        deserialize_with = "lenient::identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub trade_zero_fact_uuid: Option<String>,
    #[serde(default)]
    pub trade_zero_dim_uuid: Option<String>,
    #[serde(default)]
    pub agent_dim_uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub epoch: Option<i64>,
    #[serde(default)]
    pub trained: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for TradeZeroFact {
    const NAME: &'static str = "tradezero-fact";
    const API_KEY: &'static str = "TRADE_ZERO";
    const CONTROLLER_KEY: &'static str = "TRADE_ZERO";
    const PATH: &'static str = "tradezero-facts";
    const ROUTE: &'static str = "tradezero-facts";

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

impl FormSchemaSource for TradeZeroFact {
    fn form_items(&self) -> Vec<FormItemSchema> {
        vec![
            FormItemSchema::text("tradeZeroFactUuid", "Trade Zero Fact UUID")
                .with_value(&self.trade_zero_fact_uuid)
                .required()
                .with_order(1),
            FormItemSchema::text("tradeZeroDimUuid", "Trade Zero Dim UUID")
                .with_value(&self.trade_zero_dim_uuid)
                .required()
                .with_order(2),
            FormItemSchema::text("agentDimUuid", "Agent Dim UUID")
                .with_value(&self.agent_dim_uuid)
                .required()
                .with_order(3),
            FormItemSchema::number("epoch", "Epoch")
                .with_value(self.epoch)
                .required()
                .with_order(4),
            FormItemSchema::checkbox("trained", "Trained")
                .with_value(self.trained)
                .required()
                .with_order(5),
        ]
    }
}

impl TableSource for TradeZeroFact {
    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("tradeZeroFactUuid", "tradeZeroFactUuid"),
            ColumnDescriptor::new("tradeZeroDimUuid", "tradeZeroDimUuid"),
            ColumnDescriptor::new("agentDimUuid", "agentDimUuid"),
            ColumnDescriptor::new("epoch", "epoch"),
            ColumnDescriptor::new("trained", "trained"),
            ColumnDescriptor::new("createdAt", "criado em").with_pipe(PipeType::Date),
            row_actions(),
        ]
    }
}
