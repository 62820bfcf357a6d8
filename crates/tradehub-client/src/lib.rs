//! 관리자 프런트엔드의 리소스 클라이언트.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - HTTP 전송 seam과 reqwest 구현
//! - 일반 리소스 리포지토리 (get/list/create/update/delete)
//! - 구체 리소스 모델, 스키마 팩토리, 테이블 컬럼
//! - 리스트/폼 화면 기반 (로드, 투영, 이동, 해제)
//!
//! # 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tradehub_client::{resources::Agent, HttpTransport, ResourceList, ResourceRepository};
//!
//! let endpoints = tradehub_core::bootstrap::endpoints()?;
//! let repository = ResourceRepository::<Agent>::from_endpoints(endpoints, Arc::new(HttpTransport::new()))?;
//!
//! let mut list = ResourceList::<Agent>::new();
//! list.load(&repository).await?;
//! ```

pub mod repository;
pub mod resources;
pub mod screen;
pub mod transport;

// 주요 타입 재내보내기
pub use repository::ResourceRepository;
pub use resources::{FormSchemaSource, TableSource};
pub use screen::{LoadOutcome, ResourceForm, ResourceList, RouteContext, RowSource};
pub use transport::{HttpTransport, QueryParams, Transport};
