//! User Layout Repository

use invest_core::{validate_layout_name, InvestError, InvestResult, UserLayout};
use sqlx::PgPool;
use tracing::debug;

use super::users::UserRepository;
use crate::error::DataError;

/// User Layout Repository
pub struct UserLayoutRepository;

impl UserLayoutRepository {
    /// 레이아웃 저장. 같은 (사용자, 레이아웃) 쌍이 있으면 덮어씁니다.
    pub async fn save(
        pool: &PgPool,
        user_id: i32,
        layout: &str,
        estado: &str,
    ) -> InvestResult<UserLayout> {
        validate_layout_name(layout)?;

        if UserRepository::find_by_id(pool, user_id).await?.is_none() {
            return Err(InvestError::NotFound("User not found".into()));
        }

        let saved = sqlx::query_as::<_, UserLayout>(
            r#"
            INSERT INTO user_layouts (user_id, layout, estado)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, layout) DO UPDATE SET estado = EXCLUDED.estado
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(layout)
        .bind(estado)
        .fetch_one(pool)
        .await
        .map_err(DataError::from)?;

        debug!(user_id, layout, "레이아웃 저장");
        Ok(saved)
    }

    /// 저장된 레이아웃 상태 조회
    pub async fn get(pool: &PgPool, user_id: i32, layout: &str) -> InvestResult<String> {
        let estado: Option<Option<String>> = sqlx::query_scalar(
            "SELECT estado FROM user_layouts WHERE user_id = $1 AND layout = $2",
        )
        .bind(user_id)
        .bind(layout)
        .fetch_optional(pool)
        .await
        .map_err(DataError::from)?;

        estado
            .flatten()
            .ok_or_else(|| InvestError::NotFound("Layout not found".into()))
    }
}
