//! 리스트/폼 화면 수명주기 기반.
//!
//! 구체 화면은 리소스 타입으로 이 기반을 특수화합니다. 두 기반 모두 해제 신호
//! ([`tokio_util::sync::CancellationToken`]) 이후 도착한 응답을 무시합니다.

pub mod form;
pub mod list;

pub use form::{ResourceForm, RouteContext};
pub use list::{LoadOutcome, ResourceList, RowSource};
