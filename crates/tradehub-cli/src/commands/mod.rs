//! CLI 명령어 구현 모듈.

pub mod delete;
pub mod list;
pub mod schema;
pub mod show;

use anyhow::Result;
use clap::ValueEnum;
use std::sync::Arc;
use tradehub_client::{FormSchemaSource, ResourceRepository, TableSource, Transport};
use tradehub_core::EndpointConfig;

/// CLI에서 다루는 리소스 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Agent,
    TradezeroDimension,
    TradezeroFact,
    Datafeed,
    RiskManagement,
}

/// 리스트와 폼 화면을 모두 가진 리소스.
pub trait ScreenResource: FormSchemaSource + TableSource + std::fmt::Debug {}

impl<T: FormSchemaSource + TableSource + std::fmt::Debug> ScreenResource for T {}

/// 리소스 종류에 맞는 타입으로 제네릭 함수를 호출합니다.
macro_rules! dispatch {
    ($kind:expr, $func:ident ( $($arg:expr),* $(,)? )) => {{
        use tradehub_client::resources::{
            Agent, DataFeed, RiskManagement, TradeZeroDimension, TradeZeroFact,
        };
        match $kind {
            $crate::commands::ResourceKind::Agent => $func::<Agent>($($arg),*).await,
            $crate::commands::ResourceKind::TradezeroDimension => {
                $func::<TradeZeroDimension>($($arg),*).await
            }
            $crate::commands::ResourceKind::TradezeroFact => {
                $func::<TradeZeroFact>($($arg),*).await
            }
            $crate::commands::ResourceKind::Datafeed => $func::<DataFeed>($($arg),*).await,
            $crate::commands::ResourceKind::RiskManagement => {
                $func::<RiskManagement>($($arg),*).await
            }
        }
    }};
}

pub(crate) use dispatch;

/// 엔드포인트 맵으로 리포지토리를 만듭니다.
pub fn repository<T: ScreenResource>(
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
) -> Result<ResourceRepository<T>> {
    Ok(ResourceRepository::from_endpoints(endpoints, transport)?)
}
