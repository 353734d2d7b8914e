//! 저장소 모듈.
//!
//! - `postgres`: 연결 풀과 마이그레이션
//! - `unit_of_work`: 트랜잭션 추상화와 `with_transaction`
//! - `pg`: PostgreSQL 트랜잭션 구현
//! - `memory`: 테스트용 인메모리 구현 (`test-utils` feature)

pub mod pg;
pub mod postgres;
pub mod unit_of_work;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use pg::{PgTransaction, PgUnitOfWork};
pub use postgres::Database;
pub use unit_of_work::{with_transaction, EquityStore, FundStore, Transaction, UnitOfWork};
