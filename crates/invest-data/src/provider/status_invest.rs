//! StatusInvest 고급 검색 API 클라이언트.
//!
//! `GET {base_url}/category/advancedsearchresultpaginated` 한 번으로
//! 자산 분류의 전체 종목(최대 page_size개)을 가져옵니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use invest_core::{AppConfig, AssetClass};
//! use invest_data::provider::{SnapshotProvider, StatusInvestClient};
//!
//! let config = AppConfig::load_default()?;
//! let client = StatusInvestClient::new(&config.provider)?;
//! let snapshot = client.fetch_snapshot(AssetClass::Equity).await?;
//! ```

use async_trait::async_trait;
use invest_core::{AssetClass, ProviderConfig, Snapshot};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::{json, Map, Value};
use tracing::{debug, error, instrument};

use super::SnapshotProvider;
use crate::error::{DataError, Result};

/// 고급 검색 엔드포인트 경로.
pub const SEARCH_PATH: &str = "/category/advancedsearchresultpaginated";

/// 주식 검색 필터의 범위 필드.
const EQUITY_RANGE_FIELDS: [&str; 28] = [
    "dy",
    "p_l",
    "peg_ratio",
    "p_vp",
    "p_ativo",
    "margembruta",
    "margemebit",
    "margemliquida",
    "p_ebit",
    "ev_ebit",
    "dividaliquidaebit",
    "dividaliquidapatrimonioliquido",
    "p_sr",
    "p_capitalgiro",
    "p_ativocirculante",
    "roe",
    "roic",
    "roa",
    "liquidezcorrente",
    "pl_ativo",
    "passivo_ativo",
    "giroativos",
    "receitas_cagr5",
    "lucros_cagr5",
    "liquidezmediadiaria",
    "vpa",
    "lpa",
    "valormercado",
];

/// FII 검색 필터의 범위 필드.
const FUND_RANGE_FIELDS: [&str; 11] = [
    "dy",
    "p_vp",
    "percentualcaixa",
    "numerocotistas",
    "dividend_cagr",
    "cota_cagr",
    "liquidezmediadiaria",
    "patrimonio",
    "valorpatrimonialcota",
    "numerocotas",
    "lastdividend",
];

/// StatusInvest 클라이언트.
#[derive(Clone)]
pub struct StatusInvestClient {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
    user_agent: String,
}

impl StatusInvestClient {
    /// 설정으로 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            user_agent: config.user_agent.clone(),
        })
    }

    /// 기본 URL을 변경합니다 (테스트용 목 서버 등).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 요청 URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    /// 자산 분류별 검색 필터.
    ///
    /// 모든 범위 필드는 제한 없음(`Item1`/`Item2` = null)으로 설정됩니다.
    pub fn search_filter(asset_class: AssetClass) -> Value {
        let unbounded = json!({"Item1": null, "Item2": null});
        let mut filter = Map::new();

        match asset_class {
            AssetClass::Equity => {
                filter.insert("Sector".into(), json!(""));
                filter.insert("SubSector".into(), json!(""));
                filter.insert("Segment".into(), json!(""));
                filter.insert("my_range".into(), json!("-20;100"));
                filter.insert(
                    "forecast".into(),
                    json!({
                        "upsidedownside": {"Item1": null, "Item2": null},
                        "estimatesnumber": {"Item1": null, "Item2": null},
                        "revisedup": true,
                        "reviseddown": true,
                        "consensus": []
                    }),
                );
                for field in EQUITY_RANGE_FIELDS {
                    filter.insert(field.into(), unbounded.clone());
                }
            }
            AssetClass::Fund => {
                filter.insert("Segment".into(), json!(""));
                filter.insert("Gestao".into(), json!(""));
                filter.insert("my_range".into(), json!("0;20"));
                for field in FUND_RANGE_FIELDS {
                    filter.insert(field.into(), unbounded.clone());
                }
            }
        }

        Value::Object(filter)
    }

    /// 요청 쿼리 파라미터.
    pub fn query_params(&self, asset_class: AssetClass) -> Vec<(&'static str, String)> {
        vec![
            ("search", Self::search_filter(asset_class).to_string()),
            ("orderColumn", String::new()),
            ("isAsc", String::new()),
            ("page", "0".to_string()),
            ("take", self.page_size.to_string()),
            ("CategoryType", asset_class.category_type().to_string()),
        ]
    }
}

#[async_trait]
impl SnapshotProvider for StatusInvestClient {
    fn name(&self) -> &str {
        "StatusInvest"
    }

    #[instrument(skip(self), fields(provider = "StatusInvest"))]
    async fn fetch_snapshot(&self, asset_class: AssetClass) -> Result<Snapshot> {
        let url = self.endpoint();
        debug!(url = %url, take = self.page_size, "StatusInvest 요청");

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(asset_class))
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "StatusInvest 전송 실패");
                DataError::FetchError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "StatusInvest HTTP 오류");
            return Err(DataError::FetchError(format!("HTTP {}", status)));
        }

        let body = response.bytes().await?;
        let snapshot: Snapshot = serde_json::from_slice(&body).map_err(|e| {
            error!(error = %e, "StatusInvest 응답 형식 오류");
            DataError::ParseError(e.to_string())
        })?;

        debug!(records = snapshot.len(), "StatusInvest 응답 수신");
        Ok(snapshot)
    }
}
