//! 시장 데이터 Provider 모듈.
//!
//! ## StatusInvest
//! - `StatusInvestClient`: 고급 검색 API에서 주식/FII 전체 스냅샷을 한 번에 조회
//! - 재시도나 부분 결과 없이 성공 또는 실패만 반환

pub mod status_invest;

use async_trait::async_trait;
use invest_core::{AssetClass, Snapshot};

use crate::error::Result;

pub use status_invest::StatusInvestClient;

/// 스냅샷 Provider trait.
///
/// 갱신 파이프라인은 이 trait을 통해 데이터를 가져오므로 테스트에서는
/// 고정 스냅샷을 반환하는 구현으로 대체할 수 있습니다.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 자산 분류의 전체 스냅샷을 조회합니다.
    ///
    /// HTTP 상태 실패, 본문 파싱 실패, 전송 실패는 모두 에러로 반환됩니다.
    async fn fetch_snapshot(&self, asset_class: AssetClass) -> Result<Snapshot>;
}
