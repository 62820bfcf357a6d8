//! # Trade Hub Core
//!
//! 관리자 프런트엔드의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 폼 엔진과 리소스 클라이언트가 공유하는 기본 타입을 제공합니다:
//! - 폼 아이템 스키마 (필드 디스크립터, 컨트롤 종류, 마스크)
//! - 테이블 컬럼 디스크립터와 셀 포맷팅
//! - 리소스 레코드 trait
//! - 엔드포인트 설정과 부트스트랩
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
