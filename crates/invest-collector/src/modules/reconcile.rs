//! 스냅샷 병합.
//!
//! 스냅샷 레코드를 기존 엔티티와 ticker로 맞춰, 있으면 필드 단위로 덮어쓰고
//! 없으면 새로 만듭니다. 스냅샷에 없는 기존 엔티티는 건드리지 않습니다.
//! 조회, 갱신, 삽입은 하나의 트랜잭션에서 실행됩니다.

use std::collections::HashMap;

use invest_core::{Equity, EquityPatch, Fund, FundPatch, FundRecord, HasTicker, RankedEquity};
use invest_data::{with_transaction, EquityStore, FundStore, UnitOfWork};
use tracing::debug;

use crate::error::Result;

/// 병합 계획: 갱신할 기존 엔티티와 삽입할 새 엔티티.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan<T> {
    pub updates: Vec<T>,
    pub inserts: Vec<T>,
}

impl<T> Default for ReconcilePlan<T> {
    fn default() -> Self {
        Self {
            updates: Vec::new(),
            inserts: Vec::new(),
        }
    }
}

/// 저장 결과 행 수.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileCounts {
    pub inserted: u64,
    pub updated: u64,
}

fn index_by_ticker<T: HasTicker>(existing: Vec<T>) -> HashMap<String, T> {
    existing
        .into_iter()
        .map(|entity| (entity.ticker().to_string(), entity))
        .collect()
}

/// 순위가 매겨진 주식 레코드의 병합 계획.
///
/// 밸류에이션은 병합 후의 값으로 다시 계산되고, 순위는 이번 스냅샷의 값으로 교체됩니다.
pub fn plan_equities(ranked: Vec<RankedEquity>, existing: Vec<Equity>) -> ReconcilePlan<Equity> {
    let existing = index_by_ticker(existing);
    let mut plan = ReconcilePlan::default();

    for RankedEquity { record, ranks } in ranked {
        let patch = EquityPatch::from(&record);
        match existing.get(&record.ticker) {
            Some(current) => plan.updates.push(current.apply(&patch).with_ranks(ranks)),
            None => plan.inserts.push(Equity::create(record.ticker, &patch).with_ranks(ranks)),
        }
    }

    plan
}

/// 펀드 레코드의 병합 계획.
pub fn plan_funds(records: Vec<FundRecord>, existing: Vec<Fund>) -> ReconcilePlan<Fund> {
    let existing = index_by_ticker(existing);
    let mut plan = ReconcilePlan::default();

    for record in records {
        let patch = FundPatch::from(&record);
        match existing.get(&record.ticker) {
            Some(current) => plan.updates.push(current.apply(&patch)),
            None => plan.inserts.push(Fund::create(record.ticker, &patch)),
        }
    }

    plan
}

/// 주식 스냅샷을 저장소에 병합합니다.
pub async fn reconcile_equities<U: UnitOfWork>(
    uow: &U,
    ranked: Vec<RankedEquity>,
) -> Result<ReconcileCounts> {
    let tickers: Vec<String> = ranked.iter().map(|r| r.record.ticker.clone()).collect();

    let counts = with_transaction(uow, move |tx| {
        Box::pin(async move {
            let existing = tx.find_equities(&tickers).await?;
            debug!(snapshot = tickers.len(), existing = existing.len(), "기존 주식 매칭");

            let plan = plan_equities(ranked, existing);
            let mut counts = ReconcileCounts::default();
            if !plan.updates.is_empty() {
                counts.updated = tx.update_equities(&plan.updates).await?;
            }
            if !plan.inserts.is_empty() {
                counts.inserted = tx.insert_equities(&plan.inserts).await?;
            }
            Ok(counts)
        })
    })
    .await?;

    Ok(counts)
}

/// 펀드 스냅샷을 저장소에 병합합니다.
pub async fn reconcile_funds<U: UnitOfWork>(
    uow: &U,
    records: Vec<FundRecord>,
) -> Result<ReconcileCounts> {
    let tickers: Vec<String> = records.iter().map(|r| r.ticker.clone()).collect();

    let counts = with_transaction(uow, move |tx| {
        Box::pin(async move {
            let existing = tx.find_funds(&tickers).await?;
            debug!(snapshot = tickers.len(), existing = existing.len(), "기존 FII 매칭");

            let plan = plan_funds(records, existing);
            let mut counts = ReconcileCounts::default();
            if !plan.updates.is_empty() {
                counts.updated = tx.update_funds(&plan.updates).await?;
            }
            if !plan.inserts.is_empty() {
                counts.inserted = tx.insert_funds(&plan.inserts).await?;
            }
            Ok(counts)
        })
    })
    .await?;

    Ok(counts)
}
