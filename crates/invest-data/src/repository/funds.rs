//! Fund Repository
//!
//! `fiis` 테이블 연산을 담당합니다.

use std::collections::HashSet;

use invest_core::{
    favorites_first, mark_favorites, AssetClass, Fund, FundPatch, InvestError, InvestResult, Listed,
};
use sqlx::query_builder::Separated;
use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::favorites::FavoriteRepository;
use crate::error::{DataError, Result};

const BATCH_ROWS: usize = 1000;

/// 영속 컬럼 (바인딩 순서와 동일).
pub const FUND_COLUMNS: [&str; 23] = [
    "ticker",
    "companyid",
    "companyname",
    "price",
    "sectorid",
    "sectorname",
    "subsectorid",
    "subsectorname",
    "segment",
    "segmentid",
    "gestao",
    "gestao_f",
    "dy",
    "p_vp",
    "valorpatrimonialcota",
    "liquidezmediadiaria",
    "percentualcaixa",
    "dividend_cagr",
    "cota_cagr",
    "numerocotistas",
    "numerocotas",
    "patrimonio",
    "lastdividend",
];

/// Fund Repository
pub struct FundRepository;

impl FundRepository {
    /// ticker로 단건 조회
    pub async fn find_by_ticker<'e, E>(executor: E, ticker: &str) -> Result<Option<Fund>>
    where
        E: PgExecutor<'e>,
    {
        let fund = sqlx::query_as::<_, Fund>("SELECT * FROM fiis WHERE ticker = $1")
            .bind(ticker)
            .fetch_optional(executor)
            .await?;

        Ok(fund)
    }

    /// ticker 목록으로 일괄 조회
    pub async fn find_by_tickers(conn: &mut PgConnection, tickers: &[String]) -> Result<Vec<Fund>> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let funds = sqlx::query_as::<_, Fund>("SELECT * FROM fiis WHERE ticker = ANY($1)")
            .bind(tickers)
            .fetch_all(&mut *conn)
            .await?;

        debug!(requested = tickers.len(), found = funds.len(), "기존 FII 조회");
        Ok(funds)
    }

    /// 전체 목록 조회
    pub async fn list(pool: &PgPool) -> Result<Vec<Fund>> {
        let funds = sqlx::query_as::<_, Fund>("SELECT * FROM fiis ORDER BY ticker")
            .fetch_all(pool)
            .await?;

        Ok(funds)
    }

    /// 새 펀드 일괄 삽입
    pub async fn insert_many(conn: &mut PgConnection, funds: &[Fund]) -> Result<u64> {
        let mut inserted = 0;

        for chunk in funds.chunks(BATCH_ROWS) {
            let mut builder = insert_builder(chunk);
            inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        }

        Ok(inserted)
    }

    /// 기존 펀드 일괄 갱신
    pub async fn update_many(conn: &mut PgConnection, funds: &[Fund]) -> Result<u64> {
        let set_clause = FUND_COLUMNS[1..]
            .iter()
            .map(|column| format!("{column} = EXCLUDED.{column}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut updated = 0;

        for chunk in funds.chunks(BATCH_ROWS) {
            let mut builder = insert_builder(chunk);
            builder.push(" ON CONFLICT (ticker) DO UPDATE SET ");
            builder.push(&set_clause);
            updated += builder.build().execute(&mut *conn).await?.rows_affected();
        }

        Ok(updated)
    }

    /// 단건 조회. 없으면 Not-found.
    pub async fn view(pool: &PgPool, ticker: &str) -> InvestResult<Fund> {
        Self::find_by_ticker(pool, ticker)
            .await?
            .ok_or_else(|| InvestError::NotFound(AssetClass::Fund.not_found_message()))
    }

    /// 관리자 생성
    pub async fn create(pool: &PgPool, ticker: &str, patch: &FundPatch) -> InvestResult<Fund> {
        let mut tx = pool.begin().await.map_err(DataError::from)?;

        if Self::find_by_ticker(&mut *tx, ticker).await?.is_some() {
            return Err(InvestError::Validation(AssetClass::Fund.already_exists_message()));
        }

        let fund = Fund::create(ticker, patch);
        Self::insert_many(&mut *tx, std::slice::from_ref(&fund)).await?;
        tx.commit().await.map_err(DataError::from)?;

        info!(ticker = %fund.ticker, "FII 생성");
        Ok(fund)
    }

    /// 관리자 수정
    pub async fn edit(pool: &PgPool, ticker: &str, patch: &FundPatch) -> InvestResult<Fund> {
        let mut tx = pool.begin().await.map_err(DataError::from)?;

        let current = Self::find_by_ticker(&mut *tx, ticker)
            .await?
            .ok_or_else(|| InvestError::NotFound(AssetClass::Fund.not_found_message()))?;

        let edited = current.apply(patch);
        Self::update_many(&mut *tx, std::slice::from_ref(&edited)).await?;
        tx.commit().await.map_err(DataError::from)?;

        info!(ticker = %edited.ticker, "FII 수정");
        Ok(edited)
    }

    /// 즐겨찾기를 앞에 둔 전체 목록
    pub async fn list_for_user(pool: &PgPool, user_id: i32) -> InvestResult<Vec<Listed<Fund>>> {
        let funds = Self::list(pool).await?;
        let favorites: HashSet<String> =
            FavoriteRepository::tickers(pool, AssetClass::Fund, user_id).await?;

        let mut listed = mark_favorites(funds, &favorites);
        favorites_first(&mut listed);
        Ok(listed)
    }
}

fn insert_builder(chunk: &[Fund]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(format!("INSERT INTO fiis ({}) ", FUND_COLUMNS.join(", ")));
    builder.push_values(chunk, |mut row, fund| bind_fund(&mut row, fund));
    builder
}

fn bind_fund<'args>(row: &mut Separated<'_, 'args, Postgres, &'static str>, f: &'args Fund) {
    row.push_bind(f.ticker.as_str())
        .push_bind(f.companyid.as_deref())
        .push_bind(f.companyname.as_deref())
        .push_bind(f.price)
        .push_bind(f.sectorid)
        .push_bind(f.sectorname.as_deref())
        .push_bind(f.subsectorid)
        .push_bind(f.subsectorname.as_deref())
        .push_bind(f.segment.as_deref())
        .push_bind(f.segmentid)
        .push_bind(f.gestao)
        .push_bind(f.gestao_f.as_deref())
        .push_bind(f.dy)
        .push_bind(f.p_vp)
        .push_bind(f.valorpatrimonialcota)
        .push_bind(f.liquidezmediadiaria)
        .push_bind(f.percentualcaixa)
        .push_bind(f.dividend_cagr)
        .push_bind(f.cota_cagr)
        .push_bind(f.numerocotistas)
        .push_bind(f.numerocotas)
        .push_bind(f.patrimonio)
        .push_bind(f.lastdividend);
}
