//! Equity Repository
//!
//! `stocks` 테이블 연산을 담당합니다.
//! 배치 연산은 호출자의 트랜잭션 연결(`&mut PgConnection`)에서 실행됩니다.

use std::collections::HashSet;

use invest_core::{AssetClass, Equity, EquityPatch, InvestError, InvestResult, Listed};
use sqlx::query_builder::Separated;
use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::favorites::FavoriteRepository;
use crate::error::{DataError, Result};

/// 한 번의 INSERT 문에 담는 최대 행 수.
const BATCH_ROWS: usize = 500;

/// 영속 컬럼 (바인딩 순서와 동일).
pub const EQUITY_COLUMNS: [&str; 41] = [
    "ticker",
    "companyid",
    "companyname",
    "price",
    "p_l",
    "dy",
    "p_vp",
    "p_ebit",
    "p_ativo",
    "ev_ebit",
    "margembruta",
    "margemebit",
    "margemliquida",
    "p_sr",
    "p_capitalgiro",
    "p_ativocirculante",
    "giroativos",
    "roe",
    "roa",
    "roic",
    "dividaliquidapatrimonioliquido",
    "dividaliquidaebit",
    "pl_ativo",
    "passivo_ativo",
    "liquidezcorrente",
    "peg_ratio",
    "receitas_cagr5",
    "vpa",
    "lpa",
    "valormercado",
    "segmentid",
    "sectorid",
    "subsectorid",
    "subsectorname",
    "segmentname",
    "sectorname",
    "graham_formula",
    "discount_to_graham",
    "roic_rank",
    "ey_rank",
    "magic_formula_rank",
];

// ================================================================================================
// Repository
// ================================================================================================

/// Equity Repository
pub struct EquityRepository;

impl EquityRepository {
    // ============================================================================================
    // Queries
    // ============================================================================================

    /// ticker로 단건 조회
    pub async fn find_by_ticker<'e, E>(executor: E, ticker: &str) -> Result<Option<Equity>>
    where
        E: PgExecutor<'e>,
    {
        let equity = sqlx::query_as::<_, Equity>("SELECT * FROM stocks WHERE ticker = $1")
            .bind(ticker)
            .fetch_optional(executor)
            .await?;

        Ok(equity)
    }

    /// ticker 목록으로 일괄 조회 (단일 쿼리)
    pub async fn find_by_tickers(
        conn: &mut PgConnection,
        tickers: &[String],
    ) -> Result<Vec<Equity>> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let equities =
            sqlx::query_as::<_, Equity>("SELECT * FROM stocks WHERE ticker = ANY($1)")
                .bind(tickers)
                .fetch_all(&mut *conn)
                .await?;

        debug!(requested = tickers.len(), found = equities.len(), "기존 주식 조회");
        Ok(equities)
    }

    /// 전체 목록 조회
    pub async fn list(pool: &PgPool) -> Result<Vec<Equity>> {
        let equities = sqlx::query_as::<_, Equity>("SELECT * FROM stocks ORDER BY ticker")
            .fetch_all(pool)
            .await?;

        Ok(equities)
    }

    // ============================================================================================
    // Batch writes
    // ============================================================================================

    /// 새 주식 일괄 삽입. 이미 있는 ticker가 있으면 실패합니다.
    pub async fn insert_many(conn: &mut PgConnection, equities: &[Equity]) -> Result<u64> {
        let mut inserted = 0;

        for chunk in equities.chunks(BATCH_ROWS) {
            let mut builder = insert_builder(chunk);
            inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        }

        Ok(inserted)
    }

    /// 기존 주식 일괄 갱신 (모든 컬럼 덮어쓰기).
    pub async fn update_many(conn: &mut PgConnection, equities: &[Equity]) -> Result<u64> {
        let set_clause = EQUITY_COLUMNS[1..]
            .iter()
            .map(|column| format!("{column} = EXCLUDED.{column}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut updated = 0;

        for chunk in equities.chunks(BATCH_ROWS) {
            let mut builder = insert_builder(chunk);
            builder.push(" ON CONFLICT (ticker) DO UPDATE SET ");
            builder.push(&set_clause);
            updated += builder.build().execute(&mut *conn).await?.rows_affected();
        }

        Ok(updated)
    }

    // ============================================================================================
    // Operations
    // ============================================================================================

    /// 단건 조회. 없으면 Not-found.
    pub async fn view(pool: &PgPool, ticker: &str) -> InvestResult<Equity> {
        Self::find_by_ticker(pool, ticker)
            .await?
            .ok_or_else(|| InvestError::NotFound(AssetClass::Equity.not_found_message()))
    }

    /// 관리자 생성. 중복 ticker는 Validation 에러입니다.
    pub async fn create(pool: &PgPool, ticker: &str, patch: &EquityPatch) -> InvestResult<Equity> {
        let mut tx = pool.begin().await.map_err(DataError::from)?;

        if Self::find_by_ticker(&mut *tx, ticker).await?.is_some() {
            return Err(InvestError::Validation(AssetClass::Equity.already_exists_message()));
        }

        let equity = Equity::create(ticker, patch);
        Self::insert_many(&mut *tx, std::slice::from_ref(&equity)).await?;
        tx.commit().await.map_err(DataError::from)?;

        info!(ticker = %equity.ticker, graham = equity.graham_formula, "주식 생성");
        Ok(equity)
    }

    /// 관리자 수정. 밸류에이션은 수정 후의 값으로 다시 계산됩니다.
    pub async fn edit(pool: &PgPool, ticker: &str, patch: &EquityPatch) -> InvestResult<Equity> {
        let mut tx = pool.begin().await.map_err(DataError::from)?;

        let current = Self::find_by_ticker(&mut *tx, ticker)
            .await?
            .ok_or_else(|| InvestError::NotFound(AssetClass::Equity.not_found_message()))?;

        let edited = current.apply(patch);
        Self::update_many(&mut *tx, std::slice::from_ref(&edited)).await?;
        tx.commit().await.map_err(DataError::from)?;

        info!(ticker = %edited.ticker, graham = edited.graham_formula, "주식 수정");
        Ok(edited)
    }

    /// 사용자의 즐겨찾기 여부를 표시한 전체 목록
    pub async fn list_for_user(pool: &PgPool, user_id: i32) -> InvestResult<Vec<Listed<Equity>>> {
        let equities = Self::list(pool).await?;
        let favorites: HashSet<String> =
            FavoriteRepository::tickers(pool, AssetClass::Equity, user_id).await?;

        Ok(invest_core::mark_favorites(equities, &favorites))
    }
}

fn insert_builder(chunk: &[Equity]) -> QueryBuilder<'_, Postgres> {
    let mut builder =
        QueryBuilder::new(format!("INSERT INTO stocks ({}) ", EQUITY_COLUMNS.join(", ")));
    builder.push_values(chunk, |mut row, equity| bind_equity(&mut row, equity));
    builder
}

fn bind_equity<'args>(row: &mut Separated<'_, 'args, Postgres, &'static str>, e: &'args Equity) {
    row.push_bind(e.ticker.as_str())
        .push_bind(e.companyid.as_deref())
        .push_bind(e.companyname.as_deref())
        .push_bind(e.price)
        .push_bind(e.p_l)
        .push_bind(e.dy)
        .push_bind(e.p_vp)
        .push_bind(e.p_ebit)
        .push_bind(e.p_ativo)
        .push_bind(e.ev_ebit)
        .push_bind(e.margembruta)
        .push_bind(e.margemebit)
        .push_bind(e.margemliquida)
        .push_bind(e.p_sr)
        .push_bind(e.p_capitalgiro)
        .push_bind(e.p_ativocirculante)
        .push_bind(e.giroativos)
        .push_bind(e.roe)
        .push_bind(e.roa)
        .push_bind(e.roic)
        .push_bind(e.dividaliquidapatrimonioliquido)
        .push_bind(e.dividaliquidaebit)
        .push_bind(e.pl_ativo)
        .push_bind(e.passivo_ativo)
        .push_bind(e.liquidezcorrente)
        .push_bind(e.peg_ratio)
        .push_bind(e.receitas_cagr5)
        .push_bind(e.vpa)
        .push_bind(e.lpa)
        .push_bind(e.valormercado)
        .push_bind(e.segmentid)
        .push_bind(e.sectorid)
        .push_bind(e.subsectorid)
        .push_bind(e.subsectorname.as_deref())
        .push_bind(e.segmentname.as_deref())
        .push_bind(e.sectorname.as_deref())
        .push_bind(e.graham_formula)
        .push_bind(e.discount_to_graham)
        .push_bind(e.roic_rank)
        .push_bind(e.ey_rank)
        .push_bind(e.magic_formula_rank);
}
