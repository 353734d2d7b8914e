//! 주식 갱신 모듈.

use std::time::Instant;

use invest_core::{normalize_equities, rank_equities, refresh_span, AssetClass};
use invest_data::{SnapshotProvider, UnitOfWork};
use tracing::Instrument;

use super::reconcile::reconcile_equities;
use crate::error::CollectorError;
use crate::{RefreshOutcome, RefreshStats, Result};

/// 주식 스냅샷 갱신
///
/// 실패는 모두 여기서 로그로 남기고 호출자용 결과로 변환합니다.
pub async fn refresh_equities<P, U>(provider: &P, uow: &U) -> RefreshOutcome
where
    P: SnapshotProvider + ?Sized,
    U: UnitOfWork,
{
    let span = refresh_span!(AssetClass::Equity, provider.name());

    async {
        match sync_equities(provider, uow).await {
            Ok(stats) => {
                stats.log_summary("주식 갱신");
                RefreshOutcome::updated(AssetClass::Equity)
            }
            Err(e) => {
                tracing::error!(error = %e, "주식 갱신 실패");
                RefreshOutcome::from_error(AssetClass::Equity, &e)
            }
        }
    }
    .instrument(span)
    .await
}

/// 조회 → 정규화 → 순위 계산 → 병합 저장
pub async fn sync_equities<P, U>(provider: &P, uow: &U) -> Result<RefreshStats>
where
    P: SnapshotProvider + ?Sized,
    U: UnitOfWork,
{
    let start = Instant::now();
    let mut stats = RefreshStats::new();

    tracing::info!("주식 갱신 시작");

    // 1. 스냅샷 조회
    let snapshot = provider
        .fetch_snapshot(AssetClass::Equity)
        .await
        .map_err(|e| CollectorError::DataSource(e.to_string()))?;
    stats.fetched = snapshot.len();

    // 2. 정규화
    let records = normalize_equities(snapshot)?;

    // 3. 전체 스냅샷 기준 순위
    let ranked = rank_equities(records);
    tracing::debug!(count = ranked.len(), "순위 계산 완료");

    // 4. 병합 저장
    let counts = reconcile_equities(uow, ranked).await?;
    stats.inserted = counts.inserted;
    stats.updated = counts.updated;

    stats.elapsed = start.elapsed();
    Ok(stats)
}
