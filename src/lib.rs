//! Guild Wars 2 WvW 매치업 읽기 전용 클라이언트
//!
//! 월드/거점 ID를 이름으로 해석하고, 현재 매치업 목록과 매치업별 맵/거점 상태를
//! 불변 객체 그래프로 제공합니다.

pub mod client;
pub mod config;
pub mod error;
pub mod gw2;
pub mod wvw;


pub use client::{MatchupKey, WvwClient};
pub use config::Config;
pub use error::{Result, WvwError};
pub use wvw::{MapRef, Matchup, MatchupDetails, MatchupMap, MatchupObjective, ObjectiveRef, Owner, Score, Team, World};
