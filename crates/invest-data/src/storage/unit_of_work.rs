//! Unit of Work 추상화.
//!
//! 갱신 파이프라인의 조회/수정/삽입은 하나의 트랜잭션 안에서 실행되어야 합니다.
//! `with_transaction`은 트랜잭션을 열고, 작업이 성공하면 커밋하고
//! 실패하면 롤백합니다. 어떤 경로로 끝나든 부분 쓰기는 남지 않습니다.

use async_trait::async_trait;
use futures::future::BoxFuture;
use invest_core::{Equity, Fund};
use tracing::{debug, warn};

use crate::error::Result;

/// 트랜잭션 안에서의 주식 저장소 연산.
#[async_trait]
pub trait EquityStore: Send {
    /// ticker 목록에 해당하는 주식을 한 번에 조회합니다.
    async fn find_equities(&mut self, tickers: &[String]) -> Result<Vec<Equity>>;

    /// 기존 주식을 갱신합니다. 갱신된 행 수를 반환합니다.
    async fn update_equities(&mut self, equities: &[Equity]) -> Result<u64>;

    /// 새 주식을 삽입합니다. 삽입된 행 수를 반환합니다.
    async fn insert_equities(&mut self, equities: &[Equity]) -> Result<u64>;
}

/// 트랜잭션 안에서의 펀드 저장소 연산.
#[async_trait]
pub trait FundStore: Send {
    async fn find_funds(&mut self, tickers: &[String]) -> Result<Vec<Fund>>;

    async fn update_funds(&mut self, funds: &[Fund]) -> Result<u64>;

    async fn insert_funds(&mut self, funds: &[Fund]) -> Result<u64>;
}

/// 열린 트랜잭션.
#[async_trait]
pub trait Transaction: EquityStore + FundStore + Sized {
    /// 커밋합니다.
    async fn commit(self) -> Result<()>;

    /// 롤백합니다.
    async fn rollback(self) -> Result<()>;
}

/// 트랜잭션 생성기.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Tx: Transaction;

    /// 새 트랜잭션을 시작합니다.
    async fn begin(&self) -> Result<Self::Tx>;
}

/// 트랜잭션 범위 안에서 작업을 실행합니다.
///
/// 작업이 `Ok`를 반환하면 커밋하고, `Err`를 반환하면 롤백한 뒤 원래 에러를
/// 돌려줍니다. 커밋 자체가 실패해도 에러가 반환됩니다.
///
/// ```rust,ignore
/// let inserted = with_transaction(&uow, move |tx| {
///     Box::pin(async move { tx.insert_equities(&equities).await })
/// })
/// .await?;
/// ```
pub async fn with_transaction<U, T, F>(uow: &U, work: F) -> Result<T>
where
    U: UnitOfWork,
    T: Send,
    F: for<'t> FnOnce(&'t mut U::Tx) -> BoxFuture<'t, Result<T>> + Send,
{
    let mut tx = uow.begin().await?;

    match work(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            debug!("트랜잭션 커밋");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "롤백 실패");
            }
            debug!(error = %err, "트랜잭션 롤백");
            Err(err)
        }
    }
}
