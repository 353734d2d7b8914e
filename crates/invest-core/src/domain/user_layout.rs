//! 사용자별 화면 레이아웃 상태.

use serde::{Deserialize, Serialize};

use crate::error::{InvestError, InvestResult};

/// 레이아웃 이름 최대 길이.
pub const MAX_LAYOUT_NAME_LEN: usize = 50;

/// 사용자와 레이아웃 이름 쌍마다 하나만 존재하며, 저장 시 덮어씁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct UserLayout {
    pub id: i32,
    pub user_id: i32,
    pub layout: String,
    /// 직렬화된 UI 상태 (해석하지 않음)
    pub estado: Option<String>,
}

/// 레이아웃 이름 검증.
pub fn validate_layout_name(layout: &str) -> InvestResult<()> {
    if layout.trim().is_empty() {
        return Err(InvestError::Validation("Layout name is required".into()));
    }
    if layout.chars().count() > MAX_LAYOUT_NAME_LEN {
        return Err(InvestError::Validation(format!(
            "Layout name must be at most {} characters",
            MAX_LAYOUT_NAME_LEN
        )));
    }
    Ok(())
}
