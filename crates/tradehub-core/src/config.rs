//! 설정 관리.
//!
//! 런타임에 로드되는 엔드포인트 문서와 프로세스 전역 부트스트랩 상태를 정의합니다.
//!
//! 문서 형식:
//!
//! ```json
//! {
//!   "API": { "TRADE_ZERO": "http://localhost:8080" },
//!   "CONTROLLER": { "TRADE_ZERO": "api" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{HubError, HubResult};

/// 환경 변수 오버라이드 접두사 (`TRADEHUB__API__TRADE_ZERO`).
pub const ENV_PREFIX: &str = "TRADEHUB";

/// URL이 `/`로 끝나도록 정규화합니다. 비어 있으면 `/`를 반환합니다.
pub fn normalize_url(url: &str) -> String {
    if url.is_empty() {
        "/".to_string()
    } else if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// 애플리케이션 설정 문서.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 리소스 키 → 기본 URL
    #[serde(rename = "API", alias = "api")]
    pub api: HashMap<String, String>,
    /// 경로 키 → 컨트롤러 하위 경로
    #[serde(rename = "CONTROLLER", alias = "controller", default)]
    pub controller: HashMap<String, String>,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 형식은 확장자(json, toml, yaml)로 결정됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> HubResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HubError::BootstrapConfig(format!(
                "설정 파일이 없습니다: {}",
                path.display()
            )));
        }

        let config = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// JSON 문자열에서 설정을 로드합니다.
    pub fn from_json(json: &str) -> HubResult<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::from_str(json, ::config::FileFormat::Json))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 엔드포인트 맵을 생성합니다.
    pub fn endpoints(&self) -> EndpointConfig {
        EndpointConfig::new(self.api.clone(), self.controller.clone())
    }
}

/// 불변 엔드포인트 맵.
///
/// 키는 대소문자를 구분하지 않습니다. 설정 로더가 키를 소문자로 바꿀 수 있기 때문입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    api: HashMap<String, String>,
    controller: HashMap<String, String>,
}

impl EndpointConfig {
    /// 새 엔드포인트 맵을 생성합니다.
    pub fn new(api: HashMap<String, String>, controller: HashMap<String, String>) -> Self {
        let upper = |map: HashMap<String, String>| {
            map.into_iter()
                .map(|(k, v)| (k.to_uppercase(), v))
                .collect::<HashMap<_, _>>()
        };
        Self {
            api: upper(api),
            controller: upper(controller),
        }
    }

    /// 리소스 키의 정규화된 기본 경로 반환.
    pub fn resolve_base_path(&self, key: &str) -> HubResult<String> {
        self.api
            .get(&key.to_uppercase())
            .map(|url| normalize_url(url))
            .ok_or_else(|| HubError::NotConfigured(format!("API.{key}")))
    }

    /// 컨트롤러 하위 경로 반환.
    pub fn resolve_controller(&self, key: &str) -> HubResult<String> {
        self.controller
            .get(&key.to_uppercase())
            .map(|path| normalize_url(path))
            .ok_or_else(|| HubError::NotConfigured(format!("CONTROLLER.{key}")))
    }

    /// `base + "/" + controller + "/"` 형태의 엔드포인트 반환.
    pub fn endpoint(&self, api_key: &str, controller_key: &str) -> HubResult<String> {
        Ok(format!(
            "{}{}",
            self.resolve_base_path(api_key)?,
            self.resolve_controller(controller_key)?
        ))
    }

    /// 엔드포인트 뒤에 리소스 경로를 붙인 URL 반환.
    pub fn resource_url(
        &self,
        api_key: &str,
        controller_key: &str,
        segment: &str,
    ) -> HubResult<String> {
        let endpoint = self.endpoint(api_key, controller_key)?;
        Ok(format!("{endpoint}{}", segment.trim_start_matches('/')))
    }
}

static ENDPOINTS: OnceLock<EndpointConfig> = OnceLock::new();

/// 프로세스 전역 설정 부트스트랩.
///
/// 애플리케이션이 상호작용 가능해지기 전에 한 번만 호출합니다.
pub mod bootstrap {
    use super::*;

    /// 파일에서 설정을 로드하고 전역 엔드포인트 맵을 채웁니다.
    pub fn init<P: AsRef<Path>>(path: P) -> HubResult<&'static EndpointConfig> {
        let config = AppConfig::load(path)?;
        init_from(config.endpoints())
    }

    /// 이미 로드된 엔드포인트 맵으로 전역 상태를 채웁니다.
    pub fn init_from(config: EndpointConfig) -> HubResult<&'static EndpointConfig> {
        ENDPOINTS
            .set(config)
            .map_err(|_| HubError::BootstrapConfig("설정이 이미 초기화되었습니다".to_string()))?;
        tracing::info!("Endpoint configuration initialized");
        endpoints()
    }

    /// 전역 엔드포인트 맵 반환.
    pub fn endpoints() -> HubResult<&'static EndpointConfig> {
        ENDPOINTS
            .get()
            .ok_or_else(|| HubError::NotConfigured("bootstrap".to_string()))
    }
}
