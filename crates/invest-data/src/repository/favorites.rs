//! Favorite Repository
//!
//! 사용자별 즐겨찾기 관련 데이터베이스 연산을 담당합니다.
//! 주식은 `favorites`, 펀드는 `favorites_fii` 테이블을 사용합니다.

use std::collections::HashSet;

use invest_core::{AssetClass, Favorite, FavoriteThresholds, InvestError, InvestResult};
use sqlx::PgPool;
use tracing::{debug, info};

use super::users::UserRepository;
use crate::error::{DataError, Result};

/// 자산 분류별 테이블 정보.
struct FavoriteTable {
    table: &'static str,
    ticker_column: &'static str,
}

fn table_for(asset: AssetClass) -> FavoriteTable {
    match asset {
        AssetClass::Equity => FavoriteTable {
            table: "favorites",
            ticker_column: "stock_ticker",
        },
        AssetClass::Fund => FavoriteTable {
            table: "favorites_fii",
            ticker_column: "fii_ticker",
        },
    }
}

/// Favorite Repository
pub struct FavoriteRepository;

impl FavoriteRepository {
    /// 사용자의 즐겨찾기 ticker 집합
    pub async fn tickers(
        pool: &PgPool,
        asset: AssetClass,
        user_id: i32,
    ) -> Result<HashSet<String>> {
        let t = table_for(asset);
        let sql = format!("SELECT {} FROM {} WHERE user_id = $1", t.ticker_column, t.table);

        let rows: Vec<(String,)> = sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?;

        Ok(rows.into_iter().map(|(ticker,)| ticker).collect())
    }

    /// 사용자의 즐겨찾기 목록
    pub async fn list(pool: &PgPool, asset: AssetClass, user_id: i32) -> Result<Vec<Favorite>> {
        let t = table_for(asset);
        let sql = format!(
            "SELECT id, user_id, {} AS ticker, ceiling_price, target_price FROM {} \
             WHERE user_id = $1 ORDER BY id",
            t.ticker_column, t.table
        );

        let favorites = sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(favorites)
    }

    /// 즐겨찾기 추가
    ///
    /// 사용자나 종목이 없으면 Not-found, 이미 추가된 종목이면 Validation 에러입니다.
    pub async fn add(
        pool: &PgPool,
        asset: AssetClass,
        user_id: i32,
        ticker: &str,
        thresholds: FavoriteThresholds,
    ) -> InvestResult<Favorite> {
        let t = table_for(asset);

        if UserRepository::find_by_id(pool, user_id).await?.is_none() {
            return Err(InvestError::NotFound("User not found".into()));
        }

        let exists_sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE ticker = $1)",
            asset.table_name()
        );
        let (asset_exists,): (bool,) = sqlx::query_as(&exists_sql)
            .bind(ticker)
            .fetch_one(pool)
            .await
            .map_err(DataError::from)?;
        if !asset_exists {
            return Err(InvestError::NotFound(asset.not_found_message()));
        }

        let insert_sql = format!(
            "INSERT INTO {} (user_id, {}, ceiling_price, target_price) VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, {} AS ticker, ceiling_price, target_price",
            t.table, t.ticker_column, t.ticker_column
        );

        let favorite = sqlx::query_as::<_, Favorite>(&insert_sql)
            .bind(user_id)
            .bind(ticker)
            .bind(thresholds.ceiling_price)
            .bind(thresholds.target_price)
            .fetch_one(pool)
            .await
            .map_err(|e| match DataError::from(e) {
                DataError::DuplicateError(_) => {
                    InvestError::Validation(asset.already_favorited_message())
                }
                other => other.into(),
            })?;

        info!(%asset, user_id, ticker, "즐겨찾기 추가");
        Ok(favorite)
    }

    /// 즐겨찾기 삭제
    pub async fn remove(
        pool: &PgPool,
        asset: AssetClass,
        user_id: i32,
        ticker: &str,
    ) -> InvestResult<()> {
        let t = table_for(asset);
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND {} = $2",
            t.table, t.ticker_column
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(ticker)
            .execute(pool)
            .await
            .map_err(DataError::from)?;

        if result.rows_affected() == 0 {
            return Err(InvestError::NotFound("Favorite not found".into()));
        }

        debug!(%asset, user_id, ticker, "즐겨찾기 삭제");
        Ok(())
    }

    /// 가격 기준 수정. 지정하지 않은 값은 유지됩니다.
    pub async fn update_thresholds(
        pool: &PgPool,
        asset: AssetClass,
        user_id: i32,
        ticker: &str,
        thresholds: FavoriteThresholds,
    ) -> InvestResult<Favorite> {
        let t = table_for(asset);
        let sql = format!(
            r#"
            UPDATE {table}
            SET ceiling_price = COALESCE($3, ceiling_price),
                target_price = COALESCE($4, target_price)
            WHERE user_id = $1 AND {column} = $2
            RETURNING id, user_id, {column} AS ticker, ceiling_price, target_price
            "#,
            table = t.table,
            column = t.ticker_column
        );

        sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_id)
            .bind(ticker)
            .bind(thresholds.ceiling_price)
            .bind(thresholds.target_price)
            .fetch_optional(pool)
            .await
            .map_err(DataError::from)?
            .ok_or_else(|| InvestError::NotFound("Favorite not found".into()))
    }
}
