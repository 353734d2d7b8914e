//! 부동산 펀드(FII) 엔티티.
//!
//! 주식과 같은 구조이지만 밸류에이션과 랭킹 파생 필드가 없습니다.

use serde::{Deserialize, Serialize};

use super::asset::HasTicker;
use super::lenient;

/// 정규화된 펀드 레코드.
///
/// 분류 코드는 숫자 필드로 정규화되어 항상 존재합니다. 텍스트 필드는
/// 키가 없으면 `None`, `null`이면 `Some(None)`입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub companyid: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub companyname: Option<Option<String>>,
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub sectorid: Option<i32>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub sectorname: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub subsectorid: Option<i32>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub subsectorname: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub segment: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub segmentid: Option<i32>,
    /// 운용 방식 코드
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub gestao: Option<i32>,
    /// 운용 방식 이름
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub gestao_f: Option<Option<String>>,
    pub dy: f64,
    pub p_vp: f64,
    pub valorpatrimonialcota: f64,
    pub liquidezmediadiaria: f64,
    pub percentualcaixa: f64,
    pub dividend_cagr: f64,
    pub cota_cagr: f64,
    pub numerocotistas: f64,
    pub numerocotas: f64,
    pub patrimonio: f64,
    pub lastdividend: f64,
}

impl HasTicker for FundRecord {
    fn ticker(&self) -> &str {
        &self.ticker
    }
}

/// 영속 펀드 엔티티.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Fund {
    pub ticker: String,
    pub companyid: Option<String>,
    pub companyname: Option<String>,
    pub price: Option<f64>,
    pub sectorid: Option<i32>,
    pub sectorname: Option<String>,
    pub subsectorid: Option<i32>,
    pub subsectorname: Option<String>,
    pub segment: Option<String>,
    pub segmentid: Option<i32>,
    pub gestao: Option<i32>,
    pub gestao_f: Option<String>,
    pub dy: Option<f64>,
    pub p_vp: Option<f64>,
    pub valorpatrimonialcota: Option<f64>,
    pub liquidezmediadiaria: Option<f64>,
    pub percentualcaixa: Option<f64>,
    pub dividend_cagr: Option<f64>,
    pub cota_cagr: Option<f64>,
    pub numerocotistas: Option<f64>,
    pub numerocotas: Option<f64>,
    pub patrimonio: Option<f64>,
    pub lastdividend: Option<f64>,
}

/// 펀드의 부분 갱신.
///
/// 값이 있는 필드만 적용되며 텍스트 필드의 `Some(None)`은 값을 지웁니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundPatch {
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub companyid: Option<Option<String>>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub companyname: Option<Option<String>>,
    pub price: Option<f64>,
    pub sectorid: Option<i32>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub sectorname: Option<Option<String>>,
    pub subsectorid: Option<i32>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub subsectorname: Option<Option<String>>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub segment: Option<Option<String>>,
    pub segmentid: Option<i32>,
    pub gestao: Option<i32>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub gestao_f: Option<Option<String>>,
    pub dy: Option<f64>,
    pub p_vp: Option<f64>,
    pub valorpatrimonialcota: Option<f64>,
    pub liquidezmediadiaria: Option<f64>,
    pub percentualcaixa: Option<f64>,
    pub dividend_cagr: Option<f64>,
    pub cota_cagr: Option<f64>,
    pub numerocotistas: Option<f64>,
    pub numerocotas: Option<f64>,
    pub patrimonio: Option<f64>,
    pub lastdividend: Option<f64>,
}

impl Fund {
    /// 새 펀드를 생성합니다.
    pub fn create(ticker: impl Into<String>, patch: &FundPatch) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
        .apply(patch)
    }

    /// 패치를 적용한 새 엔티티를 반환합니다.
    pub fn apply(&self, patch: &FundPatch) -> Self {
        let mut next = self.clone();
        merge_present!(next, patch;
            price, sectorid, subsectorid, segmentid, gestao, dy, p_vp, valorpatrimonialcota,
            liquidezmediadiaria, percentualcaixa, dividend_cagr, cota_cagr, numerocotistas,
            numerocotas, patrimonio, lastdividend,
        );
        merge_nullable!(next, patch;
            companyid, companyname, sectorname, subsectorname, segment, gestao_f,
        );
        next
    }
}

impl HasTicker for Fund {
    fn ticker(&self) -> &str {
        &self.ticker
    }
}

impl From<&FundRecord> for FundPatch {
    fn from(r: &FundRecord) -> Self {
        Self {
            companyid: r.companyid.clone(),
            companyname: r.companyname.clone(),
            price: Some(r.price),
            sectorid: r.sectorid,
            sectorname: r.sectorname.clone(),
            subsectorid: r.subsectorid,
            subsectorname: r.subsectorname.clone(),
            segment: r.segment.clone(),
            segmentid: r.segmentid,
            gestao: r.gestao,
            gestao_f: r.gestao_f.clone(),
            dy: Some(r.dy),
            p_vp: Some(r.p_vp),
            valorpatrimonialcota: Some(r.valorpatrimonialcota),
            liquidezmediadiaria: Some(r.liquidezmediadiaria),
            percentualcaixa: Some(r.percentualcaixa),
            dividend_cagr: Some(r.dividend_cagr),
            cota_cagr: Some(r.cota_cagr),
            numerocotistas: Some(r.numerocotistas),
            numerocotas: Some(r.numerocotas),
            patrimonio: Some(r.patrimonio),
            lastdividend: Some(r.lastdividend),
        }
    }
}
