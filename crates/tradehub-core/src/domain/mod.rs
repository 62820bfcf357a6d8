//! 도메인 모델.
//!
//! 폼 아이템 스키마, 테이블 컬럼 디스크립터, 리소스 레코드 trait을 정의합니다.

pub mod column;
pub mod lenient;
pub mod mask;
pub mod pipe;
pub mod resource;
pub mod schema;

pub use column::*;
pub use mask::*;
pub use pipe::*;
pub use resource::*;
pub use schema::*;
