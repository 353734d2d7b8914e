//! 인메모리 Unit of Work.
//!
//! 파이프라인 테스트용 저장소입니다. 트랜잭션은 공유 상태의 작업 사본에서
//! 동작하며, 커밋 시점에만 공유 상태를 교체합니다. 특정 지점에서 실패를
//! 주입할 수 있습니다.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use invest_core::{Equity, Fund, HasTicker};

use super::unit_of_work::{EquityStore, FundStore, Transaction, UnitOfWork};
use crate::error::{DataError, Result};

/// 실패 주입 지점.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Begin,
    Find,
    Update,
    Insert,
    Commit,
}

#[derive(Debug, Default)]
struct MemoryState {
    equities: BTreeMap<String, Equity>,
    funds: BTreeMap<String, Fund>,
    fail_on: Option<FailPoint>,
    commits: usize,
    rollbacks: usize,
}

/// 인메모리 Unit of Work. 복제본은 같은 상태를 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnitOfWork {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 주식 데이터
    pub fn with_equities(self, equities: impl IntoIterator<Item = Equity>) -> Self {
        {
            let mut state = self.lock();
            for equity in equities {
                state.equities.insert(equity.ticker.clone(), equity);
            }
        }
        self
    }

    /// 초기 펀드 데이터
    pub fn with_funds(self, funds: impl IntoIterator<Item = Fund>) -> Self {
        {
            let mut state = self.lock();
            for fund in funds {
                state.funds.insert(fund.ticker.clone(), fund);
            }
        }
        self
    }

    /// 지정한 지점에서 실패하도록 설정합니다.
    pub fn fail_on(self, point: FailPoint) -> Self {
        self.set_failure(Some(point));
        self
    }

    pub fn set_failure(&self, point: Option<FailPoint>) {
        self.lock().fail_on = point;
    }

    /// 커밋된 주식 (ticker 순)
    pub fn equities(&self) -> Vec<Equity> {
        self.lock().equities.values().cloned().collect()
    }

    /// 커밋된 펀드 (ticker 순)
    pub fn funds(&self) -> Vec<Fund> {
        self.lock().funds.values().cloned().collect()
    }

    pub fn equity(&self, ticker: &str) -> Option<Equity> {
        self.lock().equities.get(ticker).cloned()
    }

    pub fn fund(&self, ticker: &str) -> Option<Fund> {
        self.lock().funds.get(ticker).cloned()
    }

    pub fn commit_count(&self) -> usize {
        self.lock().commits
    }

    pub fn rollback_count(&self) -> usize {
        self.lock().rollbacks
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> Result<MemoryTransaction> {
        let state = self.lock();
        if state.fail_on == Some(FailPoint::Begin) {
            return Err(injected(FailPoint::Begin));
        }

        Ok(MemoryTransaction {
            shared: Arc::clone(&self.state),
            equities: state.equities.clone(),
            funds: state.funds.clone(),
            fail_on: state.fail_on,
        })
    }
}

/// 작업 사본을 가진 인메모리 트랜잭션.
#[derive(Debug)]
pub struct MemoryTransaction {
    shared: Arc<Mutex<MemoryState>>,
    equities: BTreeMap<String, Equity>,
    funds: BTreeMap<String, Fund>,
    fail_on: Option<FailPoint>,
}

impl MemoryTransaction {
    fn check(&self, point: FailPoint) -> Result<()> {
        if self.fail_on == Some(point) {
            return Err(injected(point));
        }
        Ok(())
    }

    fn shared(&self) -> MutexGuard<'_, MemoryState> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected(point: FailPoint) -> DataError {
    DataError::QueryError(format!("injected failure at {:?}", point))
}

fn find_in<T: Clone>(rows: &BTreeMap<String, T>, tickers: &[String]) -> Vec<T> {
    tickers.iter().filter_map(|t| rows.get(t).cloned()).collect()
}

fn upsert_into<T: Clone + HasTicker>(rows: &mut BTreeMap<String, T>, items: &[T]) -> u64 {
    for item in items {
        rows.insert(item.ticker().to_string(), item.clone());
    }
    items.len() as u64
}

fn insert_into<T: Clone + HasTicker>(rows: &mut BTreeMap<String, T>, items: &[T]) -> Result<u64> {
    if let Some(dup) = items.iter().find(|item| rows.contains_key(item.ticker())) {
        return Err(DataError::DuplicateError(format!("ticker {} already exists", dup.ticker())));
    }
    Ok(upsert_into(rows, items))
}

#[async_trait]
impl EquityStore for MemoryTransaction {
    async fn find_equities(&mut self, tickers: &[String]) -> Result<Vec<Equity>> {
        self.check(FailPoint::Find)?;
        Ok(find_in(&self.equities, tickers))
    }

    async fn update_equities(&mut self, equities: &[Equity]) -> Result<u64> {
        self.check(FailPoint::Update)?;
        Ok(upsert_into(&mut self.equities, equities))
    }

    async fn insert_equities(&mut self, equities: &[Equity]) -> Result<u64> {
        self.check(FailPoint::Insert)?;
        insert_into(&mut self.equities, equities)
    }
}

#[async_trait]
impl FundStore for MemoryTransaction {
    async fn find_funds(&mut self, tickers: &[String]) -> Result<Vec<Fund>> {
        self.check(FailPoint::Find)?;
        Ok(find_in(&self.funds, tickers))
    }

    async fn update_funds(&mut self, funds: &[Fund]) -> Result<u64> {
        self.check(FailPoint::Update)?;
        Ok(upsert_into(&mut self.funds, funds))
    }

    async fn insert_funds(&mut self, funds: &[Fund]) -> Result<u64> {
        self.check(FailPoint::Insert)?;
        insert_into(&mut self.funds, funds)
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> Result<()> {
        self.check(FailPoint::Commit)?;

        let mut state = self.shared();
        state.equities = self.equities.clone();
        state.funds = self.funds.clone();
        state.commits += 1;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        self.shared().rollbacks += 1;
        Ok(())
    }
}
