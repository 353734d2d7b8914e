//! # Invest Core
//!
//! 주식/FII 추적 백엔드의 핵심 도메인 모델 및 계산 로직을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 주식(Equity), 부동산 펀드(Fund) 엔티티와 병합 규칙
//! - 그레이엄 공식 기반 내재가치 계산
//! - 스냅샷 정규화 및 마법공식(Magic Formula) 순위 계산
//! - 사용자, 관심종목, 사용자 레이아웃 모델
//! - 설정 관리 및 로깅 인프라

pub mod config;
pub mod credential;
pub mod domain;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use credential::{hash_password, verify_password, CredentialError};
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use secrecy::SecretString;
