//! 데이터베이스 Repository 모듈.
//!
//! 테이블별 연산을 정적 메서드 구조체로 제공합니다.

mod equities;
mod favorites;
mod funds;
mod user_layouts;
mod users;

pub use equities::{EquityRepository, EQUITY_COLUMNS};
pub use favorites::FavoriteRepository;
pub use funds::{FundRepository, FUND_COLUMNS};
pub use user_layouts::UserLayoutRepository;
pub use users::UserRepository;
