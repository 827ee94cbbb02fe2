//! WvW 클라이언트 (외부 진입점)

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::gw2::{DataSource, Gw2Client};
use crate::wvw::{Matchup, MatchupDetails, MatchupDetailsFetcher, MatchupRegistry, NameCache, World};

/// 매치업 ID로 쓸 수 있는 값 (ID 문자열 또는 매치업 요약)
pub trait MatchupKey {
    fn matchup_id(&self) -> &str;
}

impl MatchupKey for str {
    fn matchup_id(&self) -> &str {
        self
    }
}

impl MatchupKey for String {
    fn matchup_id(&self) -> &str {
        self
    }
}

impl MatchupKey for Matchup {
    fn matchup_id(&self) -> &str {
        &self.id
    }
}

pub struct WvwClient {
    names: Arc<NameCache>,
    registry: MatchupRegistry,
    details: MatchupDetailsFetcher,
}

impl WvwClient {
    /// GW2 API를 쓰는 클라이언트 생성. 이름 테이블을 먼저 받아옵니다.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let source = Arc::new(Gw2Client::new(&config.api)?);
        Self::with_source(source, config).await
    }

    pub async fn with_source(source: Arc<dyn DataSource>, config: &Config) -> Result<Self> {
        let names = Arc::new(NameCache::new(Arc::clone(&source), config.api.language.clone()));
        let registry = MatchupRegistry::new(Arc::clone(&source), Arc::clone(&names));
        let details = MatchupDetailsFetcher::new(source, Arc::clone(&names), config.wvw.track_guild_claims);

        let client = Self {
            names,
            registry,
            details,
        };
        client.refresh().await?;

        Ok(client)
    }

    /// 이름 테이블 갱신. 매치업 목록 캐시는 건드리지 않습니다.
    pub async fn refresh(&self) -> Result<()> {
        self.names.refresh().await
    }

    pub async fn list_matchups(&self, force_refetch: bool) -> Result<Arc<[Matchup]>> {
        self.registry.list_matchups(force_refetch).await
    }

    pub async fn find_matchup(&self, world: &World) -> Result<Matchup> {
        self.registry.find_matchup(world).await
    }

    pub async fn fetch_details<K: MatchupKey + ?Sized>(&self, key: &K) -> Result<MatchupDetails> {
        self.details.fetch_details(key.matchup_id()).await
    }

    /// 현재 이름 테이블로 월드 생성
    pub async fn world(&self, id: &str) -> World {
        World::new(id, self.names.world_name(id).await)
    }

    pub fn names(&self) -> &NameCache {
        &self.names
    }
}
