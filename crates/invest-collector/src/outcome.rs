//! 갱신 결과.
//!
//! 호출자는 성공 또는 실패만 봅니다. 실패 원인의 상세 내용은 로그에만 남습니다.

use invest_core::{AssetClass, GENERIC_FAILURE_MESSAGE};
use serde::Serialize;

use crate::error::CollectorError;

/// HTTP 스타일 상태 코드와 메시지.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub status: u16,
    pub message: String,
}

impl RefreshOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
        }
    }

    /// 자산 분류별 성공 결과
    pub fn updated(asset: AssetClass) -> Self {
        let message = match asset {
            AssetClass::Equity => "Stocks updated successfully",
            AssetClass::Fund => "FIIs updated successfully.",
        };
        Self::success(message)
    }

    /// 파이프라인 에러를 호출자용 실패 결과로 변환합니다.
    ///
    /// 조회 단계 실패는 제공자 메시지를, 그 외는 일반 메시지를 사용합니다.
    pub fn from_error(asset: AssetClass, err: &CollectorError) -> Self {
        if !err.is_fetch_failure() {
            return Self::failure(GENERIC_FAILURE_MESSAGE);
        }

        let message = match asset {
            AssetClass::Equity => "Error fetching stock data from StatusInvest.",
            AssetClass::Fund => "Error fetching FII data from StatusInvest.",
        };
        Self::failure(message)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
