//! 시장 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - StatusInvest 스냅샷 Provider
//! - PostgreSQL 연결 풀과 마이그레이션
//! - 테이블별 Repository
//! - 갱신 파이프라인용 Unit of Work

pub mod error;
pub mod provider;
pub mod repository;
pub mod storage;

pub use error::{DataError, Result};

pub use provider::{SnapshotProvider, StatusInvestClient};

pub use repository::{
    EquityRepository, FavoriteRepository, FundRepository, UserLayoutRepository, UserRepository,
};

pub use storage::{
    with_transaction, Database, EquityStore, FundStore, PgTransaction, PgUnitOfWork, Transaction,
    UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::{FailPoint, MemoryTransaction, MemoryUnitOfWork};
