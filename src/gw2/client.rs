//! GW2 API v1 HTTP 클라이언트
//!
//! 인증이 필요 없는 공개 WvW 엔드포인트만 사용합니다.
//! 재시도는 하지 않으며, 타임아웃은 reqwest 클라이언트 설정을 따릅니다.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::source::DataSource;
use super::types::{MatchDetailsResponse, MatchEntry, MatchesResponse, NameEntry, NameTables};
use crate::config::Api as ApiConfig;
use crate::error::{Result, WvwError};

const WORLD_NAMES: &str = "world_names.json";
const OBJECTIVE_NAMES: &str = "wvw/objective_names.json";
const MATCHES: &str = "wvw/matches.json";
const MATCH_DETAILS: &str = "wvw/match_details.json";

/// GW2 API 클라이언트
pub struct Gw2Client {
    base_url: String,
    http: reqwest::Client,
}

impl Gw2Client {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// GET 요청 후 JSON 디코딩
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, ?query, "GW2 API request");

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WvwError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        // 본문을 먼저 받아야 디코딩 실패를 Parse 에러로 구분할 수 있음
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl DataSource for Gw2Client {
    async fn fetch_name_tables(&self, language: &str) -> Result<NameTables> {
        let query = [("lang", language)];
        let (worlds, objectives) = tokio::try_join!(
            self.get::<Vec<NameEntry>>(WORLD_NAMES, &query),
            self.get::<Vec<NameEntry>>(OBJECTIVE_NAMES, &query),
        )?;

        tracing::debug!(
            language,
            worlds = worlds.len(),
            objectives = objectives.len(),
            "Fetched name tables"
        );

        Ok(NameTables { worlds, objectives })
    }

    async fn fetch_matchup_list(&self) -> Result<Vec<MatchEntry>> {
        let response: MatchesResponse = self.get(MATCHES, &[]).await?;
        tracing::debug!(count = response.wvw_matches.len(), "Fetched matchup list");
        Ok(response.wvw_matches)
    }

    async fn fetch_matchup_details(&self, matchup_id: &str) -> Result<MatchDetailsResponse> {
        let response: MatchDetailsResponse =
            self.get(MATCH_DETAILS, &[("match_id", matchup_id)]).await?;
        tracing::debug!(matchup_id, maps = response.maps.len(), "Fetched matchup details");
        Ok(response)
    }
}
