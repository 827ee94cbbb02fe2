//! GW2 API v1 WvW 응답 타입
//!
//! 필드 이름은 API 그대로 따르고, 도메인 쪽 이름은 `serde(rename)`으로 맞춥니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::wvw::Owner;

/// 이름 테이블 항목 (`world_names.json`, `wvw/objective_names.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct NameEntry {
    #[serde(deserialize_with = "id_de")]
    pub id: String,
    pub name: String,
}

/// 월드/거점 이름 테이블 한 쌍
#[derive(Debug, Clone, Default)]
pub struct NameTables {
    pub worlds: Vec<NameEntry>,
    pub objectives: Vec<NameEntry>,
}

/// `wvw/matches.json` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    pub wvw_matches: Vec<MatchEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchEntry {
    /// "R-T" 형식 (R: 1=US, 2=EU, T: 티어)
    #[serde(rename = "wvw_match_id", deserialize_with = "id_de")]
    pub id: String,
    #[serde(deserialize_with = "id_de")]
    pub red_world_id: String,
    #[serde(deserialize_with = "id_de")]
    pub blue_world_id: String,
    #[serde(deserialize_with = "id_de")]
    pub green_world_id: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// `wvw/match_details.json` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetailsResponse {
    #[serde(rename = "match_id", deserialize_with = "id_de")]
    pub id: String,
    pub scores: Vec<i64>,
    #[serde(default)]
    pub maps: Vec<MapEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub scores: Vec<i64>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveEntry {
    #[serde(deserialize_with = "id_de")]
    pub id: String,
    pub owner: Owner,
    #[serde(default)]
    pub owner_guild: Option<String>,
}

/// ID는 엔드포인트에 따라 문자열이거나 숫자로 내려옵니다.
fn id_de<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(de)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
