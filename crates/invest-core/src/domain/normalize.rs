//! 제공자 스냅샷 정규화.
//!
//! 랭킹 전에 모든 레코드가 비교 가능한 숫자 값을 갖도록
//! 정해진 숫자 필드의 누락/null 값을 0.0으로 채우고,
//! 주식은 이익수익률(EY)을 계산합니다.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use super::asset::HasTicker;
use super::equity::EquityRecord;
use super::fund::FundRecord;
use crate::error::InvestError;

/// 제공자가 보낸 가공 전 레코드.
pub type RawRecord = Map<String, Value>;

/// 제공자 응답 본문. `list` 키가 없으면 역직렬화에 실패합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub list: Vec<RawRecord>,
}

impl Snapshot {
    /// 레코드 수
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// 주식 정규화 대상 숫자 필드.
pub const EQUITY_NUMERIC_FIELDS: [&str; 27] = [
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
];

/// 펀드 정규화 대상 숫자 필드.
pub const FUND_NUMERIC_FIELDS: [&str; 16] = [
    "price",
    "sectorid",
    "subsectorid",
    "segmentid",
    "gestao",
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

/// 정규화 에러. 하나라도 발생하면 스냅샷 전체가 무효입니다.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{index}번째 레코드에 ticker가 없습니다")]
    MissingTicker { index: usize },

    #[error("잘못된 레코드 {ticker}: {reason}")]
    InvalidRecord { ticker: String, reason: String },
}

impl From<NormalizeError> for InvestError {
    fn from(err: NormalizeError) -> Self {
        InvestError::Upstream(err.to_string())
    }
}

/// 누락되었거나 null인 숫자 필드를 0.0으로 채웁니다.
pub fn fill_numeric_defaults(record: &mut RawRecord, fields: &[&str]) {
    for field in fields {
        let entry = record.entry(field.to_string()).or_insert(Value::Null);
        if entry.is_null() {
            *entry = Value::from(0.0);
        }
    }
}

/// 이익수익률 = LPA / 가격. 가격이 0이면 0.0입니다.
pub fn earnings_yield(lpa: f64, price: f64) -> f64 {
    if price == 0.0 {
        0.0
    } else {
        lpa / price
    }
}

/// 주식 스냅샷을 정규화합니다.
///
/// 중복 ticker는 첫 위치에 마지막 레코드를 남기는 방식으로 하나로 합칩니다.
pub fn normalize_equities(snapshot: Snapshot) -> Result<Vec<EquityRecord>, NormalizeError> {
    let records = normalize_records::<EquityRecord>(snapshot, &EQUITY_NUMERIC_FIELDS)?
        .into_iter()
        .map(|mut record| {
            record.ey = earnings_yield(record.lpa, record.price);
            record
        })
        .collect();
    Ok(dedupe_by_ticker(records))
}

/// 펀드 스냅샷을 정규화합니다.
pub fn normalize_funds(snapshot: Snapshot) -> Result<Vec<FundRecord>, NormalizeError> {
    let records = normalize_records::<FundRecord>(snapshot, &FUND_NUMERIC_FIELDS)?;
    Ok(dedupe_by_ticker(records))
}

fn normalize_records<T: DeserializeOwned>(
    snapshot: Snapshot,
    fields: &[&str],
) -> Result<Vec<T>, NormalizeError> {
    snapshot
        .list
        .into_iter()
        .enumerate()
        .map(|(index, mut raw)| {
            let ticker = match raw.get("ticker").and_then(Value::as_str) {
                Some(t) if !t.trim().is_empty() => t.to_string(),
                _ => return Err(NormalizeError::MissingTicker { index }),
            };
            fill_numeric_defaults(&mut raw, fields);
            serde_json::from_value(Value::Object(raw)).map_err(|e| NormalizeError::InvalidRecord {
                ticker,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// ticker 중복을 제거합니다. 마지막 레코드가 첫 위치를 차지합니다.
pub fn dedupe_by_ticker<T: HasTicker>(records: Vec<T>) -> Vec<T> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<T> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(record.ticker()) {
            Some(&position) => unique[position] = record,
            None => {
                positions.insert(record.ticker().to_string(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}
