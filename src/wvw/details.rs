//! 매치업 상세 (Matchup → Map → Objective)
//!
//! 소유 방향은 트리입니다: `MatchupDetails`가 맵을, 맵이 거점을 소유합니다.
//! 부모로의 역참조는 인덱스로만 저장하고 `MapRef` / `ObjectiveRef`로 탐색합니다.
//! 역참조는 동등성 비교에 포함되지 않습니다.

use std::ops::Deref;
use std::sync::Arc;

use super::names::{NameCache, NameTable};
use super::team::{Owner, Score};
use crate::error::Result;
use crate::gw2::{DataSource, MapEntry, MatchDetailsResponse, ObjectiveEntry};

/// 조회 시점의 매치업 점수/점령 스냅샷 (불변)
#[derive(Debug, Clone)]
pub struct MatchupDetails {
    id: String,
    score: Score,
    maps: Vec<MatchupMap>,
}

#[derive(Debug, Clone)]
pub struct MatchupMap {
    kind: String,
    score: Score,
    objectives: Vec<MatchupObjective>,
    index: usize,
}

#[derive(Debug, Clone)]
pub struct MatchupObjective {
    id: String,
    name: String,
    owner: Owner,
    claimed_by: Option<String>,
    map: usize,
}

impl MatchupDetails {
    /// API 응답으로 그래프를 조립합니다. 맵/거점 순서는 응답 순서 그대로입니다.
    pub fn assemble(
        response: MatchDetailsResponse,
        names: &NameTable,
        track_guild_claims: bool,
    ) -> Result<Self> {
        let score = Score::from_slice(&response.scores)?;
        let maps = response
            .maps
            .into_iter()
            .enumerate()
            .map(|(index, entry)| MatchupMap::assemble(index, entry, names, track_guild_claims))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: response.id,
            score,
            maps,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn maps(&self) -> impl ExactSizeIterator<Item = MapRef<'_>> + '_ {
        self.maps.iter().map(move |map| MapRef { details: self, map })
    }

    pub fn map(&self, index: usize) -> Option<MapRef<'_>> {
        self.maps.get(index).map(|map| MapRef { details: self, map })
    }

    /// 맵 종류("RedHome", "Center" 등)로 조회
    pub fn map_by_kind(&self, kind: &str) -> Option<MapRef<'_>> {
        self.maps().find(|map| map.kind == kind)
    }

    /// 거점이 속한 맵. 이 스냅샷에 들어 있는 거점이 아니면 (복제본 포함) None.
    pub fn map_of(&self, objective: &MatchupObjective) -> Option<MapRef<'_>> {
        let map = self.map(objective.map)?;
        map.objectives
            .iter()
            .any(|candidate| std::ptr::eq(candidate, objective))
            .then_some(map)
    }

    /// 모든 맵의 거점 (맵 순서, 맵 내 순서)
    pub fn objectives(&self) -> impl Iterator<Item = ObjectiveRef<'_>> + '_ {
        self.maps().flat_map(|map| map.objectives())
    }

    pub fn objective(&self, id: &str) -> Option<ObjectiveRef<'_>> {
        self.objectives().find(|objective| objective.id == id)
    }

    pub fn count_owned(&self, owner: Owner) -> usize {
        self.objectives()
            .filter(|objective| objective.owner == owner)
            .count()
    }
}

impl PartialEq for MatchupDetails {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.maps == other.maps
    }
}

impl Eq for MatchupDetails {}

impl MatchupMap {
    fn assemble(
        index: usize,
        entry: MapEntry,
        names: &NameTable,
        track_guild_claims: bool,
    ) -> Result<Self> {
        let score = Score::from_slice(&entry.scores)?;
        let objectives = entry
            .objectives
            .into_iter()
            .map(|objective| MatchupObjective::assemble(index, objective, names, track_guild_claims))
            .collect();

        Ok(Self {
            kind: entry.kind,
            score,
            objectives,
            index,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn objective_list(&self) -> &[MatchupObjective] {
        &self.objectives
    }

    /// 부모 `MatchupDetails` 안에서의 위치
    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for MatchupMap {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.score == other.score && self.objectives == other.objectives
    }
}

impl Eq for MatchupMap {}

impl MatchupObjective {
    fn assemble(map: usize, entry: ObjectiveEntry, names: &NameTable, track_guild_claims: bool) -> Self {
        Self {
            name: names.objective_name(&entry.id).to_string(),
            id: entry.id,
            owner: entry.owner,
            claimed_by: entry.owner_guild.filter(|_| track_guild_claims),
            map,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 이름 테이블에 없으면 빈 문자열
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// 점령 길드 ID (`track_guild_claims`가 켜진 경우에만 채워짐)
    pub fn claimed_by(&self) -> Option<&str> {
        self.claimed_by.as_deref()
    }

    pub fn map_index(&self) -> usize {
        self.map
    }
}

// 이름은 비교하지 않음
impl PartialEq for MatchupObjective {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.owner == other.owner && self.claimed_by == other.claimed_by
    }
}

impl Eq for MatchupObjective {}

/// 부모 `MatchupDetails`를 함께 가진 맵 참조
#[derive(Debug, Clone, Copy)]
pub struct MapRef<'a> {
    details: &'a MatchupDetails,
    map: &'a MatchupMap,
}

impl<'a> MapRef<'a> {
    pub fn details(&self) -> &'a MatchupDetails {
        self.details
    }

    pub fn get(&self) -> &'a MatchupMap {
        self.map
    }

    pub fn objectives(&self) -> impl Iterator<Item = ObjectiveRef<'a>> + 'a {
        let parent = *self;
        self.map
            .objectives
            .iter()
            .map(move |objective| ObjectiveRef { map: parent, objective })
    }
}

impl Deref for MapRef<'_> {
    type Target = MatchupMap;

    fn deref(&self) -> &MatchupMap {
        self.map
    }
}

/// 부모 맵/`MatchupDetails`를 함께 가진 거점 참조
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveRef<'a> {
    map: MapRef<'a>,
    objective: &'a MatchupObjective,
}

impl<'a> ObjectiveRef<'a> {
    pub fn map(&self) -> MapRef<'a> {
        self.map
    }

    pub fn details(&self) -> &'a MatchupDetails {
        self.map.details
    }

    pub fn get(&self) -> &'a MatchupObjective {
        self.objective
    }
}

impl Deref for ObjectiveRef<'_> {
    type Target = MatchupObjective;

    fn deref(&self) -> &MatchupObjective {
        self.objective
    }
}

/// 매치업 상세 조회. 점수는 실시간이므로 캐시하지 않습니다.
pub struct MatchupDetailsFetcher {
    source: Arc<dyn DataSource>,
    names: Arc<NameCache>,
    track_guild_claims: bool,
}

impl MatchupDetailsFetcher {
    pub fn new(source: Arc<dyn DataSource>, names: Arc<NameCache>, track_guild_claims: bool) -> Self {
        Self {
            source,
            names,
            track_guild_claims,
        }
    }

    pub async fn fetch_details(&self, matchup_id: &str) -> Result<MatchupDetails> {
        let response = self.source.fetch_matchup_details(matchup_id).await?;
        let names = self.names.snapshot().await;
        let details = MatchupDetails::assemble(response, &names, self.track_guild_claims)?;

        tracing::debug!(
            matchup_id,
            maps = details.maps.len(),
            score = ?details.score.as_array(),
            "matchup details assembled"
        );

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WvwError;
    use crate::gw2::NameEntry;
    use crate::test::{details_response, entries, ScriptedSource};
    use crate::wvw::Team;
    use serde_json::json;

    fn names() -> NameTable {
        NameTable::new(
            "en",
            Vec::<NameEntry>::new(),
            entries(&[("o1", "Garrison"), ("o2", "Bay"), ("o3", "Hills")]),
        )
    }

    fn payload() -> serde_json::Value {
        json!({
            "match_id": "1-1",
            "scores": [100, 50, 75],
            "maps": [
                {
                    "type": "Center",
                    "scores": [10, 5, 0],
                    "objectives": [
                        { "id": "o1", "owner": "Red", "owner_guild": "GUILD-A" },
                        { "id": "o2", "owner": "Blue" }
                    ]
                },
                {
                    "type": "RedHome",
                    "scores": [3, 2, 1],
                    "objectives": [
                        { "id": "o3", "owner": "Neutral" }
                    ]
                }
            ]
        })
    }

    fn build(value: serde_json::Value) -> MatchupDetails {
        MatchupDetails::assemble(details_response(value), &names(), false).unwrap()
    }

    #[test]
    fn single_objective_scenario() {
        let value = json!({
            "match_id": "1-1",
            "scores": [100, 50, 75],
            "maps": [
                { "type": "Center", "scores": [10, 5, 0], "objectives": [{ "id": "o1", "owner": "Red" }] }
            ]
        });
        let details = build(value);

        let map = details.map(0).unwrap();
        assert_eq!(map.score()[Team::Red], 10);

        let objective = map.objectives().next().unwrap();
        assert_eq!(objective.name(), "Garrison");
        assert_eq!(objective.owner(), Owner::Team(Team::Red));
        assert_eq!(details.score()[Team::Blue], 50);
    }

    #[test]
    fn graphs_from_identical_payloads_are_equal() {
        let a = build(payload());
        let b = build(payload());
        assert_eq!(a, b);
    }

    #[test]
    fn objective_order_is_significant() {
        let mut reordered = payload();
        reordered["maps"][0]["objectives"]
            .as_array_mut()
            .unwrap()
            .reverse();

        let original = build(payload());
        let reordered = build(reordered);
        assert_ne!(original, reordered);
        assert_eq!(reordered.map(0).unwrap().objective_list()[0].id(), "o2");
    }

    #[test]
    fn map_order_is_significant() {
        let mut reordered = payload();
        reordered["maps"].as_array_mut().unwrap().reverse();

        let original = build(payload());
        let reordered = build(reordered);
        assert_ne!(original, reordered);
        assert_eq!(reordered.map(0).unwrap().kind(), "RedHome");
    }

    #[test]
    fn objective_names_do_not_affect_equality() {
        let renamed = NameTable::new(
            "en",
            Vec::<NameEntry>::new(),
            entries(&[("o1", "Renamed"), ("o2", "Bay"), ("o3", "Hills")]),
        );
        let a = build(payload());
        let b = MatchupDetails::assemble(details_response(payload()), &renamed, false).unwrap();

        assert_eq!(b.objective("o1").unwrap().name(), "Renamed");
        assert_eq!(a, b);
    }

    #[test]
    fn owner_change_breaks_equality() {
        let mut flipped = payload();
        flipped["maps"][1]["objectives"][0]["owner"] = json!("Green");
        assert_ne!(build(payload()), build(flipped));
    }

    #[test]
    fn details_id_is_not_part_of_equality() {
        let mut other = payload();
        other["match_id"] = json!("2-1");

        let a = build(payload());
        let b = build(other);
        assert_eq!(b.id(), "2-1");
        assert_eq!(a, b);
    }

    #[test]
    fn back_references_point_to_owning_snapshot() {
        let details = build(payload());

        for map in details.maps() {
            assert!(std::ptr::eq(map.details(), &details));
            for objective in map.objectives() {
                assert!(std::ptr::eq(objective.details(), &details));
                assert!(std::ptr::eq(objective.map().get(), map.get()));
                assert_eq!(objective.map_index(), map.index());
            }
        }

        let hills = details.objective("o3").unwrap();
        assert_eq!(hills.map().kind(), "RedHome");
        assert_eq!(details.map_of(hills.get()).unwrap().kind(), "RedHome");
    }

    #[test]
    fn map_of_rejects_objectives_from_other_snapshots() {
        let a = build(payload());
        let b = build(json!({
            "match_id": "1-2",
            "scores": [1, 2, 3],
            "maps": [
                { "type": "BlueHome", "scores": [1, 1, 1], "objectives": [{ "id": "x9", "owner": "Blue" }] }
            ]
        }));

        let foreign = a.objective("o1").unwrap();
        assert!(b.map_of(foreign.get()).is_none());
        assert!(b.map_of(&foreign.get().clone()).is_none());
        assert!(a.map_of(&foreign.get().clone()).is_none());
        assert_eq!(a.map_of(foreign.get()).unwrap().kind(), "Center");
    }

    #[test]
    fn unresolved_objective_name_is_empty() {
        let mut value = payload();
        value["maps"][1]["objectives"][0]["id"] = json!(99);
        let details = build(value);

        let unknown = details.objective("99").unwrap();
        assert_eq!(unknown.name(), "");
    }

    #[test]
    fn guild_claims_follow_toggle() {
        let ignored = build(payload());
        assert_eq!(ignored.objective("o1").unwrap().claimed_by(), None);

        let tracked = MatchupDetails::assemble(details_response(payload()), &names(), true).unwrap();
        assert_eq!(tracked.objective("o1").unwrap().claimed_by(), Some("GUILD-A"));
        assert_ne!(ignored, tracked);
    }

    #[test]
    fn malformed_scores_are_rejected() {
        let mut value = payload();
        value["maps"][0]["scores"] = json!([1, 2]);

        let err = MatchupDetails::assemble(details_response(value), &names(), false).unwrap_err();
        assert!(matches!(err, WvwError::Malformed(_)));
    }

    #[test]
    fn counts_owned_objectives() {
        let details = build(payload());
        assert_eq!(details.count_owned(Owner::Team(Team::Red)), 1);
        assert_eq!(details.count_owned(Owner::Neutral), 1);
        assert_eq!(details.count_owned(Owner::Team(Team::Green)), 0);
    }

    #[tokio::test]
    async fn fetcher_never_serves_cached_details() {
        let source = Arc::new(ScriptedSource::new());
        source.set_details(details_response(payload()));
        let names = Arc::new(NameCache::new(source.clone(), "en"));
        let fetcher = MatchupDetailsFetcher::new(source.clone(), names, false);

        let first = fetcher.fetch_details("1-1").await.unwrap();
        let second = fetcher.fetch_details("1-1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.details_calls(), 2);
        assert_eq!(source.last_details_id().as_deref(), Some("1-1"));
    }

    #[tokio::test]
    async fn fetcher_surfaces_transport_errors() {
        let source = Arc::new(ScriptedSource::new());
        source.set_details(details_response(payload()));
        source.fail_next(WvwError::Network("timed out".into()));
        let names = Arc::new(NameCache::new(source.clone(), "en"));
        let fetcher = MatchupDetailsFetcher::new(source.clone(), names, false);

        let err = fetcher.fetch_details("1-1").await.unwrap_err();
        assert!(matches!(err, WvwError::Network(_)));
    }
}
