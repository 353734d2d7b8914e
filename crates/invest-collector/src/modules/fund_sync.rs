//! 펀드(FII) 갱신 모듈.

use std::time::Instant;

use invest_core::{normalize_funds, refresh_span, AssetClass};
use invest_data::{SnapshotProvider, UnitOfWork};
use tracing::Instrument;

use super::reconcile::reconcile_funds;
use crate::error::CollectorError;
use crate::{RefreshOutcome, RefreshStats, Result};

/// FII 스냅샷 갱신
pub async fn refresh_funds<P, U>(provider: &P, uow: &U) -> RefreshOutcome
where
    P: SnapshotProvider + ?Sized,
    U: UnitOfWork,
{
    let span = refresh_span!(AssetClass::Fund, provider.name());

    async {
        match sync_funds(provider, uow).await {
            Ok(stats) => {
                stats.log_summary("FII 갱신");
                RefreshOutcome::updated(AssetClass::Fund)
            }
            Err(e) => {
                tracing::error!(error = %e, "FII 갱신 실패");
                RefreshOutcome::from_error(AssetClass::Fund, &e)
            }
        }
    }
    .instrument(span)
    .await
}

/// 조회 → 정규화 → 병합 저장
pub async fn sync_funds<P, U>(provider: &P, uow: &U) -> Result<RefreshStats>
where
    P: SnapshotProvider + ?Sized,
    U: UnitOfWork,
{
    let start = Instant::now();
    let mut stats = RefreshStats::new();

    tracing::info!("FII 갱신 시작");

    let snapshot = provider
        .fetch_snapshot(AssetClass::Fund)
        .await
        .map_err(|e| CollectorError::DataSource(e.to_string()))?;
    stats.fetched = snapshot.len();

    let records = normalize_funds(snapshot)?;

    let counts = reconcile_funds(uow, records).await?;
    stats.inserted = counts.inserted;
    stats.updated = counts.updated;

    stats.elapsed = start.elapsed();
    Ok(stats)
}
