//! 에러 타입 정의.

use invest_core::NormalizeError;
use invest_data::DataError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 데이터 소스 에러 (전송 실패, HTTP 오류, 응답 형식 오류)
    #[error("Data source error: {0}")]
    DataSource(String),

    /// 스냅샷 정규화 에러
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// 저장 트랜잭션 에러
    #[error("Persistence error: {0}")]
    Persistence(#[from] DataError),
}

impl CollectorError {
    /// 데이터 조회 단계의 실패인지 여부
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::DataSource(_))
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
