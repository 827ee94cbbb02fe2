//! 매치업 목록 캐시
//!
//! 매치업 배정은 주간 리셋에만 바뀌므로 구독 대신 단순한 cache-or-fetch 방식을 씁니다.
//! 갱신 시점은 `force_refetch` 플래그로 호출자가 정합니다.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::names::{NameCache, NameTable};
use super::team::Team;
use crate::error::{Result, WvwError};
use crate::gw2::{DataSource, MatchEntry};

/// 월드 (서버). ID로만 비교합니다.
#[derive(Debug, Clone, Eq)]
pub struct World {
    pub id: String,
    /// 이름 테이블에 없으면 빈 문자열
    pub display_name: String,
}

impl World {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    pub(crate) fn resolve(id: &str, names: &NameTable) -> Self {
        Self::new(id, names.world_name(id))
    }
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for World {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// 매치업 요약 (세 월드의 주간 대진)
#[derive(Debug, Clone, Eq)]
pub struct Matchup {
    /// "R-T" 형식 (R: 1=US, 2=EU, T: 티어). 그대로 전달만 합니다.
    pub id: String,
    pub red: World,
    pub blue: World,
    pub green: World,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Matchup {
    fn from_entry(entry: MatchEntry, names: &NameTable) -> Self {
        Self {
            red: World::resolve(&entry.red_world_id, names),
            blue: World::resolve(&entry.blue_world_id, names),
            green: World::resolve(&entry.green_world_id, names),
            id: entry.id,
            start_time: entry.start_time,
            end_time: entry.end_time,
        }
    }

    pub fn world(&self, team: Team) -> &World {
        match team {
            Team::Red => &self.red,
            Team::Blue => &self.blue,
            Team::Green => &self.green,
        }
    }

    /// 해당 월드의 진영
    pub fn team_of(&self, world: &World) -> Option<Team> {
        Team::ALL.into_iter().find(|team| self.world(*team) == world)
    }

    pub fn contains(&self, world: &World) -> bool {
        self.team_of(world).is_some()
    }
}

impl PartialEq for Matchup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.red == other.red
            && self.blue == other.blue
            && self.green == other.green
    }
}

impl Hash for Matchup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.red.hash(state);
        self.blue.hash(state);
        self.green.hash(state);
    }
}

#[derive(Clone)]
struct CachedMatchups {
    matchups: Arc<[Matchup]>,
    fetched_at: DateTime<Utc>,
}

pub struct MatchupRegistry {
    source: Arc<dyn DataSource>,
    names: Arc<NameCache>,
    cached: RwLock<Option<CachedMatchups>>,
}

impl MatchupRegistry {
    pub fn new(source: Arc<dyn DataSource>, names: Arc<NameCache>) -> Self {
        Self {
            source,
            names,
            cached: RwLock::new(None),
        }
    }

    /// 캐시된 목록을 반환하거나, 없거나 `force_refetch`면 새로 받아 통째로 교체합니다.
    /// 받기에 실패하면 기존 캐시는 유지됩니다.
    pub async fn list_matchups(&self, force_refetch: bool) -> Result<Arc<[Matchup]>> {
        if !force_refetch {
            if let Some(ref cached) = *self.cached.read().await {
                return Ok(Arc::clone(&cached.matchups));
            }
        }

        let entries = match self.source.fetch_matchup_list().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "matchup list fetch failed, keeping previous table");
                return Err(e);
            }
        };

        let names = self.names.snapshot().await;
        let matchups: Arc<[Matchup]> = entries
            .into_iter()
            .map(|entry| Matchup::from_entry(entry, &names))
            .collect();

        tracing::info!(count = matchups.len(), "matchup table refreshed");

        *self.cached.write().await = Some(CachedMatchups {
            matchups: Arc::clone(&matchups),
            fetched_at: Utc::now(),
        });

        Ok(matchups)
    }

    /// 월드가 속한 매치업 조회. 캐시가 비어 있으면 먼저 채웁니다.
    pub async fn find_matchup(&self, world: &World) -> Result<Matchup> {
        let matchups = self.list_matchups(false).await?;

        matchups
            .iter()
            .find(|matchup| matchup.contains(world))
            .cloned()
            .ok_or_else(|| WvwError::NotFound {
                world: world.id.clone(),
            })
    }

    /// 캐시된 목록에서 ID로 조회 (네트워크 요청 없음)
    pub async fn cached_matchup(&self, id: &str) -> Option<Matchup> {
        let cached = self.cached.read().await;
        cached
            .as_ref()?
            .matchups
            .iter()
            .find(|matchup| matchup.id == id)
            .cloned()
    }

    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cached.read().await.as_ref().map(|cached| cached.fetched_at)
    }
}
