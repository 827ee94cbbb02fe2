use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub wvw: Wvw,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 이름 테이블 언어 (en, de, es, fr)
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wvw {
    /// `owner_guild`를 별도의 점령 상태로 취급할지 여부
    #[serde(default)]
    pub track_guild_claims: bool,
}

fn default_base_url() -> String {
    "https://api.guildwars2.com/v1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
