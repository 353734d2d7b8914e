//! 자산 분류.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 갱신 대상 자산 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// 주식
    Equity,
    /// 부동산 펀드 (FII)
    Fund,
}

impl AssetClass {
    /// 제공자 쿼리의 `CategoryType` 값.
    pub fn category_type(&self) -> u8 {
        match self {
            AssetClass::Equity => 1,
            AssetClass::Fund => 2,
        }
    }

    /// 영속 테이블 이름.
    pub fn table_name(&self) -> &'static str {
        match self {
            AssetClass::Equity => "stocks",
            AssetClass::Fund => "fiis",
        }
    }

    /// 호출자에게 보여줄 단수 명칭.
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Equity => "Stock",
            AssetClass::Fund => "FII",
        }
    }

    /// 엔티티가 없을 때의 메시지.
    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label())
    }

    /// 이미 존재할 때의 메시지.
    pub fn already_exists_message(&self) -> String {
        format!("{} already exists", self.label())
    }

    /// 이미 즐겨찾기에 있을 때의 메시지.
    pub fn already_favorited_message(&self) -> String {
        let noun = match self {
            AssetClass::Equity => "stock",
            AssetClass::Fund => "FII",
        };
        format!("This {} is already favorited by this user", noun)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Equity => write!(f, "equity"),
            AssetClass::Fund => write!(f, "fund"),
        }
    }
}

/// ticker로 식별되는 레코드.
pub trait HasTicker {
    /// 고유 ticker
    fn ticker(&self) -> &str;
}
