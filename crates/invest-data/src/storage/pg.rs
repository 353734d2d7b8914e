//! PostgreSQL Unit of Work 구현.

use async_trait::async_trait;
use invest_core::{Equity, Fund};
use sqlx::{PgPool, Postgres};
use tracing::debug;

use super::postgres::Database;
use super::unit_of_work::{EquityStore, FundStore, Transaction, UnitOfWork};
use crate::error::Result;
use crate::repository::{EquityRepository, FundRepository};

/// 연결 풀에서 직렬화 격리 수준의 트랜잭션을 엽니다.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn from_database(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        debug!("트랜잭션 시작 (SERIALIZABLE)");
        Ok(PgTransaction { tx })
    }
}

/// 열린 PostgreSQL 트랜잭션.
///
/// 커밋 없이 drop되면 sqlx가 롤백합니다.
pub struct PgTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl EquityStore for PgTransaction {
    async fn find_equities(&mut self, tickers: &[String]) -> Result<Vec<Equity>> {
        EquityRepository::find_by_tickers(&mut *self.tx, tickers).await
    }

    async fn update_equities(&mut self, equities: &[Equity]) -> Result<u64> {
        EquityRepository::update_many(&mut *self.tx, equities).await
    }

    async fn insert_equities(&mut self, equities: &[Equity]) -> Result<u64> {
        EquityRepository::insert_many(&mut *self.tx, equities).await
    }
}

#[async_trait]
impl FundStore for PgTransaction {
    async fn find_funds(&mut self, tickers: &[String]) -> Result<Vec<Fund>> {
        FundRepository::find_by_tickers(&mut *self.tx, tickers).await
    }

    async fn update_funds(&mut self, funds: &[Fund]) -> Result<u64> {
        FundRepository::update_many(&mut *self.tx, funds).await
    }

    async fn insert_funds(&mut self, funds: &[Fund]) -> Result<u64> {
        FundRepository::insert_many(&mut *self.tx, funds).await
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
