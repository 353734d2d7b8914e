//! 그레이엄 공식 기반 내재가치 계산.
//!
//! - 내재가치 = √(22.5 × LPA × VPA)
//! - 할인율 = (가격 − 내재가치) / 가격 × 100
//!
//! LPA는 주당순이익, VPA는 주당순자산입니다. 계산할 수 없는 경우 에러 대신
//! 0.0을 반환합니다.

/// 그레이엄 공식의 상수 (P/L 15 × P/VP 1.5).
pub const GRAHAM_MULTIPLIER: f64 = 22.5;

/// 소수점 둘째 자리로 반올림.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 그레이엄 내재가치.
///
/// 두 입력이 모두 있고 음수가 아닐 때만 계산하며, 그 외에는 0.0입니다.
pub fn graham_formula(lpa: Option<f64>, vpa: Option<f64>) -> f64 {
    match (lpa, vpa) {
        (Some(lpa), Some(vpa)) if lpa >= 0.0 && vpa >= 0.0 => {
            round2((GRAHAM_MULTIPLIER * lpa * vpa).sqrt())
        }
        _ => 0.0,
    }
}

/// 내재가치 대비 할인율 (%).
///
/// 가격이 0이 아니고 내재가치가 0이 아닐 때만 계산하며, 그 외에는 0.0입니다.
pub fn discount_to_graham(price: Option<f64>, graham: f64) -> f64 {
    match price {
        Some(price) if price != 0.0 && graham != 0.0 => {
            round2((price - graham) / price * 100.0)
        }
        _ => 0.0,
    }
}

/// 한 종목의 밸류에이션 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    /// 그레이엄 내재가치
    pub graham_formula: f64,
    /// 내재가치 대비 할인율 (%)
    pub discount_to_graham: f64,
}

impl Valuation {
    /// LPA, VPA, 가격으로 밸류에이션을 계산합니다.
    pub fn compute(lpa: Option<f64>, vpa: Option<f64>, price: Option<f64>) -> Self {
        let graham = graham_formula(lpa, vpa);
        Self {
            graham_formula: graham,
            discount_to_graham: discount_to_graham(price, graham),
        }
    }
}
