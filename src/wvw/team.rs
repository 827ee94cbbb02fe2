use std::fmt;
use std::ops::Index;

use serde::Deserialize;

use crate::error::{Result, WvwError};

/// 매치업의 세 진영. 점수 배열 인덱스와 같은 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Red = 0,
    Blue = 1,
    Green = 2,
}

impl Team {
    pub const ALL: [Team; 3] = [Team::Red, Team::Blue, Team::Green];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
            Team::Green => "Green",
        };
        f.write_str(name)
    }
}

/// 거점 소유 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "WireOwner")]
pub enum Owner {
    Team(Team),
    Neutral,
}

impl Owner {
    pub fn team(self) -> Option<Team> {
        match self {
            Owner::Team(team) => Some(team),
            Owner::Neutral => None,
        }
    }
}

impl From<Team> for Owner {
    fn from(team: Team) -> Self {
        Owner::Team(team)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Team(team) => team.fmt(f),
            Owner::Neutral => f.write_str("Neutral"),
        }
    }
}

#[derive(Deserialize)]
enum WireOwner {
    Red,
    Blue,
    Green,
    Neutral,
}

impl From<WireOwner> for Owner {
    fn from(value: WireOwner) -> Self {
        match value {
            WireOwner::Red => Owner::Team(Team::Red),
            WireOwner::Blue => Owner::Team(Team::Blue),
            WireOwner::Green => Owner::Team(Team::Green),
            WireOwner::Neutral => Owner::Neutral,
        }
    }
}

/// 진영별 점수. `score[Team::Red]` 또는 `score[0]`처럼 접근합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score([i64; 3]);

impl Score {
    pub fn new(red: i64, blue: i64, green: i64) -> Self {
        Self([red, blue, green])
    }

    /// API의 점수 배열은 항상 3개여야 합니다.
    pub fn from_slice(scores: &[i64]) -> Result<Self> {
        <[i64; 3]>::try_from(scores)
            .map(Self)
            .map_err(|_| WvwError::Malformed(format!("expected 3 scores, got {}", scores.len())))
    }

    pub fn get(&self, team: Team) -> i64 {
        self.0[team.index()]
    }

    pub fn as_array(&self) -> &[i64; 3] {
        &self.0
    }

    /// 최고 점수 진영 (동점이면 None)
    pub fn leader(&self) -> Option<Team> {
        let best = Team::ALL.into_iter().max_by_key(|team| self.get(*team))?;
        let ties = Team::ALL
            .into_iter()
            .filter(|team| self.get(*team) == self.get(best))
            .count();
        (ties == 1).then_some(best)
    }
}

impl Index<usize> for Score {
    type Output = i64;

    fn index(&self, index: usize) -> &i64 {
        &self.0[index]
    }
}

impl Index<Team> for Score {
    type Output = i64;

    fn index(&self, team: Team) -> &i64 {
        &self.0[team.index()]
    }
}
