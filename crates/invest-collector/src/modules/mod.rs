//! 갱신 파이프라인 모듈.

pub mod equity_sync;
pub mod fund_sync;
pub mod reconcile;

use invest_data::{SnapshotProvider, UnitOfWork};

use crate::RefreshOutcome;

pub use equity_sync::{refresh_equities, sync_equities};
pub use fund_sync::{refresh_funds, sync_funds};
pub use reconcile::{
    plan_equities, plan_funds, reconcile_equities, reconcile_funds, ReconcileCounts, ReconcilePlan,
};

/// 주식과 FII를 차례로 갱신합니다. 한쪽이 실패해도 다른 쪽은 실행됩니다.
pub async fn run_all<P, U>(provider: &P, uow: &U) -> Vec<RefreshOutcome>
where
    P: SnapshotProvider + ?Sized,
    U: UnitOfWork,
{
    tracing::info!("=== 전체 갱신 시작 ===");

    tracing::info!("Step 1/2: 주식 갱신");
    let equities = refresh_equities(provider, uow).await;

    tracing::info!("Step 2/2: FII 갱신");
    let funds = refresh_funds(provider, uow).await;

    tracing::info!("=== 전체 갱신 완료 ===");
    vec![equities, funds]
}
