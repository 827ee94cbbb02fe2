//! GW2 API 데이터 소스
//!
//! - `source`: 코어가 의존하는 `DataSource` 트레이트
//! - `types`: API v1 응답 구조 (와이어 포맷)
//! - `client`: reqwest 기반 HTTP 구현

pub mod client;
pub mod source;
pub mod types;

pub use client::Gw2Client;
pub use source::DataSource;
pub use types::{MapEntry, MatchDetailsResponse, MatchEntry, NameEntry, NameTables, ObjectiveEntry};
