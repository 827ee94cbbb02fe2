use async_trait::async_trait;

use super::types::{MatchDetailsResponse, MatchEntry, NameTables};
use crate::error::Result;

/// WvW 데이터 소스
///
/// 캐시와 그래프 조립은 이 트레이트 너머의 전송 방식(HTTP, 테스트 스크립트 등)을 알지 못합니다.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// 월드/거점 이름 테이블 조회
    async fn fetch_name_tables(&self, language: &str) -> Result<NameTables>;

    /// 현재 진행 중인 매치업 목록 조회 (응답 순서 유지)
    async fn fetch_matchup_list(&self) -> Result<Vec<MatchEntry>>;

    /// 매치업 하나의 실시간 점수/점령 상태 조회
    async fn fetch_matchup_details(&self, matchup_id: &str) -> Result<MatchDetailsResponse>;
}
