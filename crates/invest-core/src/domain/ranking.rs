//! 마법 공식(Magic Formula) 횡단면 랭킹.
//!
//! 전체 스냅샷을 이익수익률(EY)과 ROIC 기준으로 각각 내림차순 정렬해
//! 1..N 순위를 매기고, 두 순위의 합을 종합 순위로 사용합니다.
//!
//! 동률은 입력 순서대로 서로 다른 순위를 받습니다 (안정 정렬).
//! 종합 순위는 단순 합이므로 동률과 빈 번호가 있을 수 있습니다.

use serde::{Deserialize, Serialize};

use super::equity::EquityRecord;

/// 한 종목의 순위.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranks {
    /// 이익수익률 순위 (1 = 가장 높음)
    pub ey_rank: i32,
    /// ROIC 순위 (1 = 가장 높음)
    pub roic_rank: i32,
    /// ey_rank + roic_rank (낮을수록 좋음)
    pub magic_formula_rank: i32,
}

impl Ranks {
    /// 두 순위로 종합 순위를 계산합니다.
    pub fn new(ey_rank: i32, roic_rank: i32) -> Self {
        Self {
            ey_rank,
            roic_rank,
            magic_formula_rank: ey_rank.saturating_add(roic_rank),
        }
    }
}

/// 순위가 매겨진 주식 레코드.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEquity {
    pub record: EquityRecord,
    pub ranks: Ranks,
}

/// 정렬 키. NaN은 최하위, -0.0은 0.0과 같게 취급합니다.
fn sort_key(value: f64) -> f64 {
    if value.is_nan() {
        f64::NEG_INFINITY
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// 지표 내림차순 순위를 입력 순서에 맞춰 반환합니다.
///
/// `result[i]`는 `items[i]`의 순위이며, 결과는 항상 {1..N}의 순열입니다.
pub fn rank_descending<T, F>(items: &[T], metric: F) -> Vec<i32>
where
    F: Fn(&T) -> f64,
{
    let keys: Vec<f64> = items.iter().map(|item| sort_key(metric(item))).collect();

    let mut order: Vec<usize> = (0..items.len()).collect();
    // sort_by는 안정 정렬
    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));

    let mut ranks = vec![0; items.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = i32::try_from(position + 1).unwrap_or(i32::MAX);
    }
    ranks
}

/// 전체 스냅샷의 EY/ROIC/종합 순위를 계산합니다.
///
/// 매 갱신마다 전체 스냅샷을 대상으로 다시 계산해야 합니다.
pub fn rank_equities(records: Vec<EquityRecord>) -> Vec<RankedEquity> {
    let ey_ranks = rank_descending(&records, |r| r.ey);
    let roic_ranks = rank_descending(&records, |r| r.roic);

    records
        .into_iter()
        .zip(ey_ranks.into_iter().zip(roic_ranks))
        .map(|(record, (ey_rank, roic_rank))| RankedEquity {
            record,
            ranks: Ranks::new(ey_rank, roic_rank),
        })
        .collect()
}
