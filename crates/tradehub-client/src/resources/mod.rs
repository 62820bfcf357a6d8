//! 구체 리소스.
//!
//! 각 리소스는 레코드 모델, 스키마 팩토리([`FormSchemaSource`]), 테이블 컬럼([`TableSource`])을
//! 제공합니다. CRUD 동작은 모두 [`crate::ResourceRepository`]가 담당합니다.

pub mod agent;
pub mod data_feed;
pub mod risk_management;
pub mod trade_zero;

pub use agent::Agent;
pub use data_feed::DataFeed;
pub use risk_management::RiskManagement;
pub use trade_zero::{TradeZeroDimension, TradeZeroFact};

use tradehub_core::{ColumnButton, ColumnDescriptor, FormItemSchema, Resource};

/// 편집 동작 태그.
pub const ACTION_EDIT: &str = "edit";
/// 삭제 동작 태그.
pub const ACTION_DELETE: &str = "delete";

/// 현재 레코드에서 폼 스키마 목록을 만드는 스키마 팩토리.
pub trait FormSchemaSource: Resource {
    fn form_items(&self) -> Vec<FormItemSchema>;
}

/// 리스트 화면의 컬럼 정의.
pub trait TableSource: Resource {
    fn columns() -> Vec<ColumnDescriptor>;
}

/// 행 동작 버튼 컬럼.
pub fn row_actions() -> ColumnDescriptor {
    ColumnDescriptor::buttons(
        "Ações",
        vec![
            ColumnButton::new("Editar", ACTION_EDIT)
                .with_icon("pi pi-pencil")
                .with_style_class("p-button-rounded p-button-text"),
            ColumnButton::new("Excluir", ACTION_DELETE)
                .with_icon("pi pi-trash")
                .with_style_class("p-button-rounded p-button-text p-button-danger"),
        ],
    )
}
