//! 밸류에이션과 랭킹 속성 테스트

use std::collections::HashSet;

use invest_core::{
    discount_to_graham, graham_formula, normalize_equities, rank_descending, rank_equities,
    round2, Snapshot,
};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn graham_matches_formula_for_non_negative_inputs(
        lpa in 0.0f64..1_000.0,
        vpa in 0.0f64..1_000.0
    ) {
        let expected = round2((22.5 * lpa * vpa).sqrt());
        prop_assert_eq!(graham_formula(Some(lpa), Some(vpa)), expected);
    }

    #[test]
    fn graham_is_zero_for_negative_inputs(lpa in -1_000.0f64..-0.001, vpa in -1_000.0f64..1_000.0) {
        prop_assert_eq!(graham_formula(Some(lpa), Some(vpa)), 0.0);
        prop_assert_eq!(graham_formula(Some(vpa.abs()), Some(lpa)), 0.0);
        prop_assert_eq!(graham_formula(None, Some(vpa)), 0.0);
    }

    #[test]
    fn discount_matches_formula(price in 0.01f64..10_000.0, graham in 0.01f64..10_000.0) {
        let expected = round2((price - graham) / price * 100.0);
        prop_assert_eq!(discount_to_graham(Some(price), graham), expected);
        prop_assert_eq!(discount_to_graham(Some(price), 0.0), 0.0);
        prop_assert_eq!(discount_to_graham(Some(0.0), graham), 0.0);
    }

    #[test]
    fn ranks_are_a_bijection(values in proptest::collection::vec(-10.0f64..10.0, 0..200)) {
        let ranks = rank_descending(&values, |v| *v);
        let n = values.len() as i32;

        let unique: HashSet<i32> = ranks.iter().copied().collect();
        prop_assert_eq!(unique.len(), values.len());
        prop_assert!(ranks.iter().all(|r| (1..=n).contains(r)));

        if let Some(best) = ranks.iter().position(|r| *r == 1) {
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(values[best], max);
        }
    }

    #[test]
    fn composite_is_sum_of_ranks(
        rows in proptest::collection::vec((0.01f64..100.0, -5.0f64..5.0, -1.0f64..1.0), 1..100)
    ) {
        let list: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (price, lpa, roic))| json!({
                "ticker": format!("T{:03}", i),
                "price": price,
                "lpa": lpa,
                "roic": roic,
            }))
            .collect();
        let snapshot: Snapshot = serde_json::from_value(json!({ "list": list })).unwrap();

        let ranked = rank_equities(normalize_equities(snapshot).unwrap());
        prop_assert_eq!(ranked.len(), rows.len());
        for r in &ranked {
            prop_assert_eq!(r.ranks.magic_formula_rank, r.ranks.ey_rank + r.ranks.roic_rank);
        }
    }
}

#[test]
fn two_record_example() {
    let snapshot: Snapshot = serde_json::from_value(json!({
        "list": [
            {"ticker": "AAA", "lpa": 1.0, "price": 10.0, "roic": 0.5},
            {"ticker": "BBB", "lpa": 2.0, "price": 20.0, "roic": 0.2}
        ]
    }))
    .unwrap();

    let ranked = rank_equities(normalize_equities(snapshot).unwrap());
    let (aaa, bbb) = (&ranked[0], &ranked[1]);

    assert_eq!(aaa.record.ey, 0.1);
    assert_eq!(bbb.record.ey, 0.1);
    // 동률은 입력 순서대로
    assert_eq!(aaa.ranks.ey_rank, 1);
    assert_eq!(bbb.ranks.ey_rank, 2);
    assert_eq!(aaa.ranks.roic_rank, 1);
    assert_eq!(bbb.ranks.roic_rank, 2);
    assert_eq!(aaa.ranks.magic_formula_rank, 2);
    assert_eq!(bbb.ranks.magic_formula_rank, 4);
}
