//! 관리자 프런트엔드의 에러 타입.
//!
//! 폼 엔진, 리포지토리, 부트스트랩 전반에서 사용되는 에러를 정의합니다.
//! 검증 실패는 에러가 아니라 폼 제출 결과로 표현되므로 여기에 없습니다.

use thiserror::Error;

/// 사용자에게 노출되는 일반 전송 에러 메시지.
pub const TRANSPORT_ERROR_MESSAGE: &str = "요청 처리 중 오류가 발생했습니다";

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum HubError {
    /// 스키마/위젯 불일치 (프로그래머 에러)
    #[error("스키마 설정 에러: {0}")]
    SchemaConfiguration(String),

    /// 정규화된 전송 에러
    #[error("{message}")]
    Transport {
        /// HTTP 상태 코드 (네트워크 실패 시 None)
        status: Option<u16>,
        /// 사용자용 메시지
        message: String,
    },

    /// 리소스를 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 설정되지 않은 리소스 키
    #[error("설정되지 않음: {0}")]
    NotConfigured(String),

    /// 런타임 설정 로드 실패
    #[error("부트스트랩 설정 에러: {0}")]
    BootstrapConfig(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 공통 Result 타입.
pub type HubResult<T> = Result<T, HubError>;

impl HubError {
    /// 상태 코드를 가진 정규화된 전송 에러를 생성합니다.
    pub fn transport(status: Option<u16>) -> Self {
        HubError::Transport {
            status,
            message: TRANSPORT_ERROR_MESSAGE.to_string(),
        }
    }

    /// 런타임에 처리하지 않고 수정해야 하는 설정 결함인지 확인합니다.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            HubError::SchemaConfiguration(_)
                | HubError::BootstrapConfig(_)
                | HubError::NotConfigured(_)
        )
    }

    /// 리포지토리 호출에서 발생한 에러인지 확인합니다.
    pub fn is_transport(&self) -> bool {
        matches!(self, HubError::Transport { .. } | HubError::NotFound(_))
    }

    /// HTTP 상태 코드 반환.
    pub fn status(&self) -> Option<u16> {
        match self {
            HubError::Transport { status, .. } => *status,
            HubError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::Serialization(err.to_string())
    }
}

impl From<::config::ConfigError> for HubError {
    fn from(err: ::config::ConfigError) -> Self {
        HubError::BootstrapConfig(err.to_string())
    }
}
