//! WvW 데이터 해석/캐시 계층
//!
//! - `names`: 월드/거점 이름 캐시
//! - `registry`: 매치업 목록 캐시, 월드 → 매치업 조회
//! - `details`: 매치업 상세 그래프 조립
//! - `team`: 진영, 소유 상태, 점수

pub mod details;
pub mod names;
pub mod registry;
pub mod team;

pub use details::{MapRef, MatchupDetails, MatchupDetailsFetcher, MatchupMap, MatchupObjective, ObjectiveRef};
pub use names::{NameCache, NameTable};
pub use registry::{Matchup, MatchupRegistry, World};
pub use team::{Owner, Score, Team};
