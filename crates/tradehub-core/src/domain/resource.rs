//! 리소스 레코드 trait.
//!
//! 백엔드가 소유하는 엔티티의 일반 형태입니다. 프런트엔드는 현재 화면 수명 동안만
//! 일시적인 복사본을 가집니다.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::schema::FormValues;
use crate::error::{HubError, HubResult};

/// 식별자와 비즈니스 속성을 가진 영속 엔티티.
///
/// 구체 리소스는 경로 정보만 제공하고, CRUD 동작은 일반 리포지토리가 담당합니다.
pub trait Resource:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// 로그/CLI에서 사용하는 리소스 이름
    const NAME: &'static str;
    /// 엔드포인트 맵의 `API` 키
    const API_KEY: &'static str;
    /// 엔드포인트 맵의 `CONTROLLER` 키
    const CONTROLLER_KEY: &'static str;
    /// 컨트롤러 아래 리소스 경로
    const PATH: &'static str;
    /// 화면 라우트 세그먼트
    const ROUTE: &'static str;

    /// 식별자 반환 (새 레코드면 None).
    fn id(&self) -> Option<String>;
}

/// 리소스를 JSON 레코드로 변환합니다.
pub fn to_record<T: Resource>(resource: &T) -> HubResult<Value> {
    Ok(serde_json::to_value(resource)?)
}

/// 폼 값을 리소스 위에 덮어써 새 리소스를 만듭니다.
///
/// 폼에 없는 속성(식별자 등)은 원래 값을 유지합니다.
pub fn merge_values<T: Resource>(resource: &T, values: &FormValues) -> HubResult<T> {
    let mut record = match to_record(resource)? {
        Value::Object(map) => map,
        other => {
            return Err(HubError::Serialization(format!(
                "{}는 객체로 직렬화되어야 합니다: {other}",
                T::NAME
            )))
        }
    };

    for (key, value) in values {
        record.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(record))
        .map_err(|e| HubError::InvalidInput(format!("{}: {e}", T::NAME)))
}
