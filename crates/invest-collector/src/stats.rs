//! 갱신 통계 구조체.

use serde::Serialize;
use std::time::Duration;

/// 갱신 작업 통계
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStats {
    /// 제공자 응답의 레코드 수
    pub fetched: usize,
    /// 새로 삽입된 엔티티 수
    pub inserted: u64,
    /// 갱신된 기존 엔티티 수
    pub updated: u64,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RefreshStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 총 엔티티 수
    pub fn written(&self) -> u64 {
        self.inserted + self.updated
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            fetched = self.fetched,
            inserted = self.inserted,
            updated = self.updated,
            written = self.written(),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "갱신 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written() {
        let stats = RefreshStats {
            fetched: 10,
            inserted: 3,
            updated: 7,
            ..Default::default()
        };
        assert_eq!(stats.written(), 10);
    }
}
