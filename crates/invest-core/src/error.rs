//! 백엔드 공통 에러 타입.
//!
//! 서비스 경계에서 호출자에게 노출되는 에러 분류를 정의합니다.
//! 각 분류는 HTTP 스타일 상태 코드로 매핑됩니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum InvestError {
    /// 잘못되었거나 중복된 입력
    #[error("{0}")]
    Validation(String),

    /// 참조한 엔티티가 없음
    #[error("{0}")]
    NotFound(String),

    /// 외부 데이터 제공자 에러 (연결 불가, 예상치 못한 응답 형식)
    #[error("외부 데이터 에러: {0}")]
    Upstream(String),

    /// 쓰기 트랜잭션 에러
    #[error("저장소 에러: {0}")]
    Persistence(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type InvestResult<T> = Result<T, InvestError>;

/// 호출자에게 노출되는 일반 에러 메시지.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred, please try again later";

impl InvestError {
    /// HTTP 스타일 상태 코드를 반환합니다.
    pub fn status_code(&self) -> u16 {
        match self {
            InvestError::Validation(_) => 400,
            InvestError::NotFound(_) => 404,
            InvestError::Upstream(_)
            | InvestError::Persistence(_)
            | InvestError::Config(_)
            | InvestError::Serialization(_) => 500,
        }
    }

    /// 호출자에게 보여줄 메시지.
    ///
    /// 400/404 계열은 구체적인 메시지를, 500 계열은 내부 정보를 숨긴
    /// 일반 메시지를 반환합니다.
    pub fn public_message(&self) -> String {
        match self {
            InvestError::Validation(msg) | InvestError::NotFound(msg) => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for InvestError {
    fn from(err: serde_json::Error) -> Self {
        InvestError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for InvestError {
    fn from(err: config::ConfigError) -> Self {
        InvestError::Config(err.to_string())
    }
}
