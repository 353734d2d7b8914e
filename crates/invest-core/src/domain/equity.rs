//! 주식 엔티티.
//!
//! - `EquityRecord` - 정규화된 제공자 레코드 (한 번의 스냅샷 안에서만 유효)
//! - `Equity` - 영속 엔티티 (밸류에이션/랭킹 파생 필드 포함)
//! - `EquityPatch` - 파생 필드를 제외한 부분 갱신

use serde::{Deserialize, Serialize};

use super::asset::HasTicker;
use super::lenient;
use super::ranking::Ranks;
use super::valuation::Valuation;

/// 정규화된 주식 레코드.
///
/// 숫자 필드는 정규화 단계에서 0.0으로 채워지므로 항상 존재합니다.
/// 텍스트와 분류 코드는 키가 없으면 `None`, `null`이면 `Some(None)`입니다.
/// 저장하지 않는 제공자 키(`lucros_cagr5` 등)는 무시됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityRecord {
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub companyid: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub companyname: Option<Option<String>>,
    pub price: f64,
    pub p_l: f64,
    pub dy: f64,
    pub p_vp: f64,
    pub p_ebit: f64,
    pub p_ativo: f64,
    pub ev_ebit: f64,
    pub margembruta: f64,
    pub margemebit: f64,
    pub margemliquida: f64,
    pub p_sr: f64,
    pub p_capitalgiro: f64,
    pub p_ativocirculante: f64,
    pub giroativos: f64,
    pub roe: f64,
    pub roa: f64,
    pub roic: f64,
    pub dividaliquidapatrimonioliquido: f64,
    pub dividaliquidaebit: f64,
    pub pl_ativo: f64,
    pub passivo_ativo: f64,
    pub liquidezcorrente: f64,
    pub peg_ratio: f64,
    pub receitas_cagr5: f64,
    pub vpa: f64,
    pub lpa: f64,
    pub valormercado: f64,
    #[serde(default, deserialize_with = "lenient::present_i32")]
    pub segmentid: Option<Option<i32>>,
    #[serde(default, deserialize_with = "lenient::present_i32")]
    pub sectorid: Option<Option<i32>>,
    #[serde(default, deserialize_with = "lenient::present_i32")]
    pub subsectorid: Option<Option<i32>>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub subsectorname: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub segmentname: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub sectorname: Option<Option<String>>,
    /// 이익수익률 (LPA / 가격), 랭킹 전용. 제공자가 보낸 값은 무시합니다.
    #[serde(skip_deserializing)]
    pub ey: f64,
}

impl HasTicker for EquityRecord {
    fn ticker(&self) -> &str {
        &self.ticker
    }
}

/// 영속 주식 엔티티.
///
/// `graham_formula`/`discount_to_graham`은 항상 자신의 필드에서 계산되며,
/// 랭크는 마지막 갱신 시점의 스냅샷 내 위치입니다. 관리자가 직접 생성한
/// 종목은 다음 갱신 전까지 랭크가 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Equity {
    pub ticker: String,
    pub companyid: Option<String>,
    pub companyname: Option<String>,
    pub price: Option<f64>,
    pub p_l: Option<f64>,
    pub dy: Option<f64>,
    pub p_vp: Option<f64>,
    pub p_ebit: Option<f64>,
    pub p_ativo: Option<f64>,
    pub ev_ebit: Option<f64>,
    pub margembruta: Option<f64>,
    pub margemebit: Option<f64>,
    pub margemliquida: Option<f64>,
    pub p_sr: Option<f64>,
    pub p_capitalgiro: Option<f64>,
    pub p_ativocirculante: Option<f64>,
    pub giroativos: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub roic: Option<f64>,
    pub dividaliquidapatrimonioliquido: Option<f64>,
    pub dividaliquidaebit: Option<f64>,
    pub pl_ativo: Option<f64>,
    pub passivo_ativo: Option<f64>,
    pub liquidezcorrente: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub receitas_cagr5: Option<f64>,
    pub vpa: Option<f64>,
    pub lpa: Option<f64>,
    pub valormercado: Option<f64>,
    pub segmentid: Option<i32>,
    pub sectorid: Option<i32>,
    pub subsectorid: Option<i32>,
    pub subsectorname: Option<String>,
    pub segmentname: Option<String>,
    pub sectorname: Option<String>,
    /// 그레이엄 내재가치
    pub graham_formula: f64,
    /// 내재가치 대비 할인율 (%)
    pub discount_to_graham: f64,
    pub roic_rank: Option<i32>,
    pub ey_rank: Option<i32>,
    pub magic_formula_rank: Option<i32>,
}

/// 주식의 부분 갱신.
///
/// 값이 있는 필드만 적용됩니다. 텍스트와 분류 코드는 `Some(None)`이면
/// 저장된 값을 지웁니다. 파생 필드는 포함하지 않으므로 호출자가 직접
/// 설정할 수 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityPatch {
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub companyid: Option<Option<String>>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub companyname: Option<Option<String>>,
    pub price: Option<f64>,
    pub p_l: Option<f64>,
    pub dy: Option<f64>,
    pub p_vp: Option<f64>,
    pub p_ebit: Option<f64>,
    pub p_ativo: Option<f64>,
    pub ev_ebit: Option<f64>,
    pub margembruta: Option<f64>,
    pub margemebit: Option<f64>,
    pub margemliquida: Option<f64>,
    pub p_sr: Option<f64>,
    pub p_capitalgiro: Option<f64>,
    pub p_ativocirculante: Option<f64>,
    pub giroativos: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub roic: Option<f64>,
    pub dividaliquidapatrimonioliquido: Option<f64>,
    pub dividaliquidaebit: Option<f64>,
    pub pl_ativo: Option<f64>,
    pub passivo_ativo: Option<f64>,
    pub liquidezcorrente: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub receitas_cagr5: Option<f64>,
    pub vpa: Option<f64>,
    pub lpa: Option<f64>,
    pub valormercado: Option<f64>,
    #[serde(deserialize_with = "lenient::present_i32", skip_serializing_if = "Option::is_none")]
    pub segmentid: Option<Option<i32>>,
    #[serde(deserialize_with = "lenient::present_i32", skip_serializing_if = "Option::is_none")]
    pub sectorid: Option<Option<i32>>,
    #[serde(deserialize_with = "lenient::present_i32", skip_serializing_if = "Option::is_none")]
    pub subsectorid: Option<Option<i32>>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub subsectorname: Option<Option<String>>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub segmentname: Option<Option<String>>,
    #[serde(deserialize_with = "lenient::present_string", skip_serializing_if = "Option::is_none")]
    pub sectorname: Option<Option<String>>,
}

impl Equity {
    /// 새 주식을 생성합니다. 밸류에이션은 입력값으로 계산됩니다.
    pub fn create(ticker: impl Into<String>, patch: &EquityPatch) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
        .apply(patch)
    }

    /// 패치를 적용한 새 엔티티를 반환합니다.
    ///
    /// 밸류에이션은 적용 후의 값으로 다시 계산되며, 랭크는 유지됩니다.
    pub fn apply(&self, patch: &EquityPatch) -> Self {
        let mut next = self.clone();
        merge_present!(next, patch;
            price, p_l, dy, p_vp, p_ebit, p_ativo, ev_ebit, margembruta, margemebit,
            margemliquida, p_sr, p_capitalgiro, p_ativocirculante, giroativos, roe, roa, roic,
            dividaliquidapatrimonioliquido, dividaliquidaebit, pl_ativo, passivo_ativo,
            liquidezcorrente, peg_ratio, receitas_cagr5, vpa, lpa, valormercado,
        );
        merge_nullable!(next, patch;
            companyid, companyname, segmentid, sectorid, subsectorid, subsectorname,
            segmentname, sectorname,
        );
        next.revalue()
    }

    /// 랭크를 설정합니다.
    pub fn with_ranks(mut self, ranks: Ranks) -> Self {
        self.ey_rank = Some(ranks.ey_rank);
        self.roic_rank = Some(ranks.roic_rank);
        self.magic_formula_rank = Some(ranks.magic_formula_rank);
        self
    }

    /// 현재 필드로 계산한 밸류에이션.
    pub fn valuation(&self) -> Valuation {
        Valuation::compute(self.lpa, self.vpa, self.price)
    }

    fn revalue(mut self) -> Self {
        let valuation = self.valuation();
        self.graham_formula = valuation.graham_formula;
        self.discount_to_graham = valuation.discount_to_graham;
        self
    }
}

impl HasTicker for Equity {
    fn ticker(&self) -> &str {
        &self.ticker
    }
}

impl From<&EquityRecord> for EquityPatch {
    fn from(r: &EquityRecord) -> Self {
        Self {
            companyid: r.companyid.clone(),
            companyname: r.companyname.clone(),
            price: Some(r.price),
            p_l: Some(r.p_l),
            dy: Some(r.dy),
            p_vp: Some(r.p_vp),
            p_ebit: Some(r.p_ebit),
            p_ativo: Some(r.p_ativo),
            ev_ebit: Some(r.ev_ebit),
            margembruta: Some(r.margembruta),
            margemebit: Some(r.margemebit),
            margemliquida: Some(r.margemliquida),
            p_sr: Some(r.p_sr),
            p_capitalgiro: Some(r.p_capitalgiro),
            p_ativocirculante: Some(r.p_ativocirculante),
            giroativos: Some(r.giroativos),
            roe: Some(r.roe),
            roa: Some(r.roa),
            roic: Some(r.roic),
            dividaliquidapatrimonioliquido: Some(r.dividaliquidapatrimonioliquido),
            dividaliquidaebit: Some(r.dividaliquidaebit),
            pl_ativo: Some(r.pl_ativo),
            passivo_ativo: Some(r.passivo_ativo),
            liquidezcorrente: Some(r.liquidezcorrente),
            peg_ratio: Some(r.peg_ratio),
            receitas_cagr5: Some(r.receitas_cagr5),
            vpa: Some(r.vpa),
            lpa: Some(r.lpa),
            valormercado: Some(r.valormercado),
            segmentid: r.segmentid,
            sectorid: r.sectorid,
            subsectorid: r.subsectorid,
            subsectorname: r.subsectorname.clone(),
            segmentname: r.segmentname.clone(),
            sectorname: r.sectorname.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(lpa: f64, vpa: f64, price: f64) -> EquityPatch {
        EquityPatch {
            lpa: Some(lpa),
            vpa: Some(vpa),
            price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_computes_valuation() {
        let equity = Equity::create("PETR4", &patch(2.0, 10.0, 30.0));
        assert_eq!(equity.ticker, "PETR4");
        assert_eq!(equity.graham_formula, 21.21);
        assert_eq!(equity.discount_to_graham, 29.3);
        assert_eq!(equity.magic_formula_rank, None);
    }

    #[test]
    fn test_apply_recomputes_from_post_edit_values() {
        let equity = Equity::create("PETR4", &patch(2.0, 10.0, 30.0));
        let edited = equity.apply(&EquityPatch {
            lpa: Some(-1.0),
            ..Default::default()
        });

        assert_eq!(edited.lpa, Some(-1.0));
        assert_eq!(edited.graham_formula, 0.0);
        assert_eq!(edited.discount_to_graham, 0.0);
        // 원본은 변경되지 않음
        assert_eq!(equity.graham_formula, 21.21);
    }

    #[test]
    fn test_apply_keeps_absent_fields_and_ranks() {
        let equity = Equity::create(
            "VALE3",
            &EquityPatch {
                companyname: Some(Some("Vale".to_string())),
                ..patch(2.0, 10.0, 30.0)
            },
        )
        .with_ranks(Ranks {
            ey_rank: 1,
            roic_rank: 2,
            magic_formula_rank: 3,
        });

        let edited = equity.apply(&EquityPatch {
            price: Some(50.0),
            ..Default::default()
        });

        assert_eq!(edited.companyname.as_deref(), Some("Vale"));
        assert_eq!(edited.magic_formula_rank, Some(3));
        assert_eq!(edited.discount_to_graham, 57.58);
    }

    #[test]
    fn test_patch_from_record() {
        let record = EquityRecord {
            ticker: "ITSA4".to_string(),
            lpa: 1.5,
            roic: 0.2,
            sectorid: Some(Some(4)),
            ..Default::default()
        };
        let patch = EquityPatch::from(&record);
        assert_eq!(patch.lpa, Some(1.5));
        assert_eq!(patch.price, Some(0.0));
        assert_eq!(patch.sectorid, Some(Some(4)));
        assert_eq!(patch.companyname, None);
    }

    #[test]
    fn test_explicit_null_clears_text_fields() {
        let equity = Equity::create(
            "BBAS3",
            &EquityPatch {
                companyname: Some(Some("Banco do Brasil".to_string())),
                sectorid: Some(Some(7)),
                sectorname: Some(Some("Financeiro".to_string())),
                ..patch(5.0, 30.0, 25.0)
            },
        );

        let edited = equity.apply(&EquityPatch {
            companyname: Some(None),
            sectorid: Some(None),
            ..Default::default()
        });

        assert_eq!(edited.companyname, None);
        assert_eq!(edited.sectorid, None);
        // 키가 없는 필드는 유지
        assert_eq!(edited.sectorname.as_deref(), Some("Financeiro"));
    }

    #[test]
    fn test_patch_json_null_versus_missing() {
        let patch: EquityPatch =
            serde_json::from_str(r#"{"companyname": null, "price": 12.5, "sectorid": 3.0}"#)
                .unwrap();
        assert_eq!(patch.companyname, Some(None));
        assert_eq!(patch.sectorid, Some(Some(3)));
        assert_eq!(patch.price, Some(12.5));
        assert_eq!(patch.sectorname, None);
    }
}
