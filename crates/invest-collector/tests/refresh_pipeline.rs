//! 갱신 파이프라인 통합 테스트 (고정 스냅샷 Provider + 인메모리 Unit of Work).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use invest_collector::{refresh_equities, refresh_funds, run_all, RefreshOutcome};
use invest_core::{AssetClass, Equity, Fund, Snapshot, GENERIC_FAILURE_MESSAGE};
use invest_data::{DataError, FailPoint, MemoryUnitOfWork, SnapshotProvider};
use serde_json::{json, Value};

/// 고정 응답을 돌려주는 Provider.
struct FixedProvider {
    equities: Option<Value>,
    funds: Option<Value>,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn equities(list: Value) -> Self {
        Self {
            equities: Some(json!({ "list": list })),
            funds: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn funds(list: Value) -> Self {
        Self {
            equities: None,
            funds: Some(json!({ "list": list })),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            equities: None,
            funds: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SnapshotProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_snapshot(&self, asset_class: AssetClass) -> invest_data::Result<Snapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let body = match asset_class {
            AssetClass::Equity => self.equities.clone(),
            AssetClass::Fund => self.funds.clone(),
        };
        match body {
            Some(body) => Ok(serde_json::from_value(body)?),
            None => Err(DataError::FetchError("HTTP 500 Internal Server Error".into())),
        }
    }
}

fn example_snapshot() -> Value {
    json!([
        {"ticker": "AAA", "lpa": 1.0, "price": 10.0, "roic": 0.5},
        {"ticker": "BBB", "lpa": 2.0, "price": 20.0, "roic": 0.2}
    ])
}

fn persisted_equity(ticker: &str) -> Equity {
    Equity::create(
        ticker,
        &invest_core::EquityPatch {
            companyname: Some(Some(format!("{ticker} S.A."))),
            price: Some(12.0),
            lpa: Some(1.0),
            vpa: Some(10.0),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn test_new_equities_are_ranked() {
    let provider = FixedProvider::equities(example_snapshot());
    let uow = MemoryUnitOfWork::new();

    let outcome = refresh_equities(&provider, &uow).await;

    assert_eq!(outcome, RefreshOutcome::success("Stocks updated successfully"));

    let aaa = uow.equity("AAA").unwrap();
    let bbb = uow.equity("BBB").unwrap();

    // EY 동률(0.1)은 입력 순서로 구분
    assert_eq!(aaa.ey_rank, Some(1));
    assert_eq!(bbb.ey_rank, Some(2));
    assert_eq!(aaa.roic_rank, Some(1));
    assert_eq!(bbb.roic_rank, Some(2));
    assert_eq!(aaa.magic_formula_rank, Some(2));
    assert_eq!(bbb.magic_formula_rank, Some(4));

    // VPA가 없으면 내재가치는 0
    assert_eq!(aaa.graham_formula, 0.0);
    assert_eq!(aaa.discount_to_graham, 0.0);
}

#[tokio::test]
async fn test_refresh_is_idempotent() {
    let provider = FixedProvider::equities(example_snapshot());
    let uow = MemoryUnitOfWork::new();

    assert!(refresh_equities(&provider, &uow).await.is_success());
    let first = uow.equities();

    assert!(refresh_equities(&provider, &uow).await.is_success());
    let second = uow.equities();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(uow.commit_count(), 2);
}

#[tokio::test]
async fn test_absent_tickers_are_untouched() {
    let legacy = persisted_equity("OLD3");
    let provider = FixedProvider::equities(example_snapshot());
    let uow = MemoryUnitOfWork::new().with_equities(vec![legacy.clone()]);

    assert!(refresh_equities(&provider, &uow).await.is_success());

    assert_eq!(uow.equities().len(), 3);
    assert_eq!(uow.equity("OLD3"), Some(legacy));
}

#[tokio::test]
async fn test_merge_keeps_fields_missing_from_snapshot() {
    let provider = FixedProvider::equities(json!([
        {"ticker": "PETR4", "price": 20.0, "lpa": 2.0, "vpa": 8.0, "roic": 0.1}
    ]));
    let uow = MemoryUnitOfWork::new().with_equities(vec![persisted_equity("PETR4")]);

    assert!(refresh_equities(&provider, &uow).await.is_success());

    let petr = uow.equity("PETR4").unwrap();
    assert_eq!(petr.companyname.as_deref(), Some("PETR4 S.A."));
    assert_eq!(petr.price, Some(20.0));

    // √(22.5 × 2 × 8) = √360 = 18.97
    assert_eq!(petr.graham_formula, 18.97);
    assert_eq!(petr.discount_to_graham, 5.15);
    assert_eq!(petr.magic_formula_rank, Some(2));
}

#[tokio::test]
async fn test_snapshot_null_clears_stored_text() {
    let provider = FixedProvider::equities(json!([
        {"ticker": "PETR4", "price": 20.0, "companyname": null, "sectorname": null}
    ]));
    let uow = MemoryUnitOfWork::new().with_equities(vec![persisted_equity("PETR4")]);

    assert!(refresh_equities(&provider, &uow).await.is_success());

    let petr = uow.equity("PETR4").unwrap();
    assert_eq!(petr.companyname, None);
    assert_eq!(petr.sectorname, None);
    assert_eq!(petr.price, Some(20.0));
}

#[tokio::test]
async fn test_provider_ey_does_not_fail_refresh() {
    let provider = FixedProvider::equities(json!([
        {"ticker": "AAA", "lpa": 1.0, "price": 10.0, "roic": 0.5, "ey": null},
        {"ticker": "BBB", "lpa": 2.0, "price": 10.0, "roic": 0.2, "ey": 10.0}
    ]));
    let uow = MemoryUnitOfWork::new();

    let outcome = refresh_equities(&provider, &uow).await;

    assert_eq!(outcome, RefreshOutcome::success("Stocks updated successfully"));
    // EY는 LPA / 가격으로 다시 계산되어 BBB(0.2)가 AAA(0.1)보다 앞섬
    assert_eq!(uow.equity("BBB").unwrap().ey_rank, Some(1));
    assert_eq!(uow.equity("AAA").unwrap().ey_rank, Some(2));
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let existing = persisted_equity("VALE3");
    let provider = FixedProvider::failing();
    let uow = MemoryUnitOfWork::new().with_equities(vec![existing.clone()]);

    let outcome = refresh_equities(&provider, &uow).await;

    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.message, "Error fetching stock data from StatusInvest.");
    assert_eq!(uow.equities(), vec![existing]);
    assert_eq!(uow.commit_count(), 0);
}

#[tokio::test]
async fn test_write_failure_rolls_back() {
    let existing = persisted_equity("AAA");
    let provider = FixedProvider::equities(example_snapshot());
    let uow = MemoryUnitOfWork::new()
        .with_equities(vec![existing.clone()])
        .fail_on(FailPoint::Insert);

    let outcome = refresh_equities(&provider, &uow).await;

    assert_eq!(outcome, RefreshOutcome::failure(GENERIC_FAILURE_MESSAGE));
    assert_eq!(uow.equities(), vec![existing]);
    assert_eq!(uow.rollback_count(), 1);
}

#[tokio::test]
async fn test_commit_failure_leaves_store_unchanged() {
    let provider = FixedProvider::equities(example_snapshot());
    let uow = MemoryUnitOfWork::new().fail_on(FailPoint::Commit);

    let outcome = refresh_equities(&provider, &uow).await;

    assert_eq!(outcome.status, 500);
    assert!(uow.equities().is_empty());
}

#[tokio::test]
async fn test_invalid_record_fails_whole_snapshot() {
    let provider = FixedProvider::equities(json!([
        {"ticker": "AAA", "price": 10.0},
        {"price": 5.0}
    ]));
    let uow = MemoryUnitOfWork::new();

    let outcome = refresh_equities(&provider, &uow).await;

    assert_eq!(outcome, RefreshOutcome::failure(GENERIC_FAILURE_MESSAGE));
    assert!(uow.equities().is_empty());
    assert_eq!(uow.commit_count(), 0);
}

#[tokio::test]
async fn test_fund_refresh_merges() {
    let existing = Fund {
        ticker: "HGLG11".to_string(),
        gestao_f: Some("Ativa".to_string()),
        price: Some(150.0),
        ..Default::default()
    };
    let provider = FixedProvider::funds(json!([
        {"ticker": "HGLG11", "price": 160.0, "dy": 8.5},
        {"ticker": "MXRF11", "price": 10.2, "dy": 12.1, "gestao": 1.0}
    ]));
    let uow = MemoryUnitOfWork::new().with_funds(vec![existing]);

    let outcome = refresh_funds(&provider, &uow).await;

    assert_eq!(outcome, RefreshOutcome::success("FIIs updated successfully."));

    let hglg = uow.fund("HGLG11").unwrap();
    assert_eq!(hglg.price, Some(160.0));
    assert_eq!(hglg.dy, Some(8.5));
    assert_eq!(hglg.gestao_f.as_deref(), Some("Ativa"));

    let mxrf = uow.fund("MXRF11").unwrap();
    assert_eq!(mxrf.gestao, Some(1));
    assert_eq!(mxrf.p_vp, Some(0.0));
}

#[tokio::test]
async fn test_fund_fetch_failure_message() {
    let provider = FixedProvider::failing();
    let uow = MemoryUnitOfWork::new();

    let outcome = refresh_funds(&provider, &uow).await;

    assert_eq!(outcome, RefreshOutcome::failure("Error fetching FII data from StatusInvest."));
    assert!(uow.funds().is_empty());
}

#[tokio::test]
async fn test_run_all_continues_after_failure() {
    let provider = FixedProvider::funds(json!([{"ticker": "KNRI11", "price": 140.0}]));
    let uow = MemoryUnitOfWork::new();

    let outcomes = run_all(&provider, &uow).await;

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].is_success());
    assert!(outcomes[1].is_success());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(uow.funds().len(), 1);
}
