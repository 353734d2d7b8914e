//! 스냅샷 갱신 파이프라인.
//!
//! 이 crate는 다음을 제공합니다:
//! - 주식 갱신: 조회 → 정규화 → 순위 계산 → 병합 저장
//! - 펀드 갱신: 조회 → 정규화 → 병합 저장
//! - 갱신 결과(`RefreshOutcome`)와 통계(`RefreshStats`)
//! - `invest-collector` CLI 바이너리

pub mod error;
pub mod modules;
pub mod outcome;
pub mod stats;

pub use error::{CollectorError, Result};
pub use modules::{refresh_equities, refresh_funds, run_all};
pub use outcome::RefreshOutcome;
pub use stats::RefreshStats;
