//! 데이터 모듈 오류 타입.

use invest_core::InvestError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터베이스 연결 오류
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// 쿼리 실행 오류
    #[error("Query error: {0}")]
    QueryError(String),

    /// 레코드를 찾을 수 없음
    #[error("{0}")]
    NotFound(String),

    /// 중복 레코드
    #[error("{0}")]
    DuplicateError(String),

    /// 잘못된 입력
    #[error("{0}")]
    InvalidData(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 마이그레이션 오류
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// 연결 풀 소진
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 외부 응답 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DataError::NotFound("Row not found".to_string()),
            sqlx::Error::PoolTimedOut => DataError::PoolExhausted,
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().unwrap_or_default();
                if code == "23505" {
                    // PostgreSQL 고유 제약 조건 위반
                    DataError::DuplicateError(db_err.message().to_string())
                } else {
                    DataError::QueryError(db_err.message().to_string())
                }
            }
            _ => DataError::QueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<InvestError> for DataError {
    fn from(err: InvestError) -> Self {
        match err {
            InvestError::Validation(msg) => DataError::InvalidData(msg),
            InvestError::NotFound(msg) => DataError::NotFound(msg),
            InvestError::Upstream(msg) => DataError::FetchError(msg),
            InvestError::Serialization(msg) => DataError::SerializationError(msg),
            InvestError::Config(msg) => DataError::ConfigError(msg),
            InvestError::Persistence(msg) => DataError::QueryError(msg),
        }
    }
}

impl From<DataError> for InvestError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => InvestError::NotFound(msg),
            DataError::DuplicateError(msg) | DataError::InvalidData(msg) => {
                InvestError::Validation(msg)
            }
            DataError::FetchError(msg) | DataError::ParseError(msg) => InvestError::Upstream(msg),
            DataError::SerializationError(msg) => InvestError::Serialization(msg),
            DataError::ConfigError(msg) => InvestError::Config(msg),
            other => InvestError::Persistence(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
