//! 즐겨찾기와 목록 표시용 `favorita` 장식.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::asset::HasTicker;

/// 사용자의 즐겨찾기 종목 (주식 또는 펀드).
///
/// 사용자와 ticker 쌍마다 자산 분류별로 하나만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub ticker: String,
    /// 매수 상한가
    pub ceiling_price: Option<f64>,
    /// 목표가
    pub target_price: Option<f64>,
}

/// 사용자가 설정하는 가격 기준.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoriteThresholds {
    pub ceiling_price: Option<f64>,
    pub target_price: Option<f64>,
}

/// 목록 항목에 `favorita` 플래그를 덧붙인 표현.
///
/// 저장되는 필드가 아니라 조회 시점에 계산됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listed<T> {
    #[serde(flatten)]
    pub item: T,
    pub favorita: bool,
}

/// 사용자의 즐겨찾기 ticker 집합으로 각 항목을 장식합니다.
pub fn mark_favorites<T: HasTicker>(items: Vec<T>, favorites: &HashSet<String>) -> Vec<Listed<T>> {
    items
        .into_iter()
        .map(|item| {
            let favorita = favorites.contains(item.ticker());
            Listed { item, favorita }
        })
        .collect()
}

/// 즐겨찾기 항목을 앞으로 옮깁니다. 그 외 순서는 유지됩니다.
pub fn favorites_first<T>(listed: &mut [Listed<T>]) {
    listed.sort_by_key(|l| !l.favorita);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetClass, Fund};

    fn fund(ticker: &str) -> Fund {
        Fund {
            ticker: ticker.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mark_favorites() {
        let favorites: HashSet<String> = ["BBB11".to_string()].into_iter().collect();
        let listed = mark_favorites(vec![fund("AAA11"), fund("BBB11")], &favorites);

        assert!(!listed[0].favorita);
        assert!(listed[1].favorita);
    }

    #[test]
    fn test_favorites_first_is_stable() {
        let favorites: HashSet<String> =
            ["CCC11".to_string(), "BBB11".to_string()].into_iter().collect();
        let mut listed = mark_favorites(
            vec![fund("AAA11"), fund("BBB11"), fund("DDD11"), fund("CCC11")],
            &favorites,
        );
        favorites_first(&mut listed);

        let order: Vec<&str> = listed.iter().map(|l| l.item.ticker.as_str()).collect();
        assert_eq!(order, vec!["BBB11", "CCC11", "AAA11", "DDD11"]);
    }

    #[test]
    fn test_listed_json_is_flat() {
        let listed = Listed {
            item: fund("HGLG11"),
            favorita: true,
        };
        let json = serde_json::to_value(&listed).unwrap();
        assert_eq!(json["ticker"], "HGLG11");
        assert_eq!(json["favorita"], true);
    }

    #[test]
    fn test_already_favorited_message() {
        assert_eq!(
            AssetClass::Equity.already_favorited_message(),
            "This stock is already favorited by this user"
        );
        assert_eq!(
            AssetClass::Fund.already_favorited_message(),
            "This FII is already favorited by this user"
        );
    }
}
