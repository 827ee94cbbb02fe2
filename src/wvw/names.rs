//! 월드/거점 이름 캐시
//!
//! 이름 테이블은 패치 주기로만 바뀌므로 명시적인 `refresh()` 사이의 오래된 데이터는 허용됩니다.
//! 테이블은 통째로 교체되며, 읽는 쪽은 항상 이전 테이블 또는 새 테이블 중 하나만 봅니다.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::gw2::{DataSource, NameEntry};

/// 이름 테이블 스냅샷 (불변)
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    worlds: HashMap<String, String>,
    objectives: HashMap<String, String>,
    language: String,
    fetched_at: Option<DateTime<Utc>>,
}

impl NameTable {
    pub fn new(
        language: impl Into<String>,
        worlds: impl IntoIterator<Item = NameEntry>,
        objectives: impl IntoIterator<Item = NameEntry>,
    ) -> Self {
        Self {
            worlds: worlds.into_iter().map(|entry| (entry.id, entry.name)).collect(),
            objectives: objectives.into_iter().map(|entry| (entry.id, entry.name)).collect(),
            language: language.into(),
            fetched_at: Some(Utc::now()),
        }
    }

    /// 월드 이름. 테이블에 없으면 빈 문자열.
    pub fn world_name(&self, id: &str) -> &str {
        self.worlds.get(id).map(String::as_str).unwrap_or_default()
    }

    /// 거점 이름. 테이블에 없으면 빈 문자열.
    pub fn objective_name(&self, id: &str) -> &str {
        self.objectives.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// 한 번도 갱신되지 않았으면 None
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }
}

pub struct NameCache {
    source: Arc<dyn DataSource>,
    language: String,
    table: RwLock<Arc<NameTable>>,
}

impl NameCache {
    pub fn new(source: Arc<dyn DataSource>, language: impl Into<String>) -> Self {
        Self {
            source,
            language: language.into(),
            table: RwLock::new(Arc::new(NameTable::default())),
        }
    }

    /// 이름 테이블을 새로 받아 통째로 교체합니다.
    /// 실패하면 기존 테이블은 그대로 남습니다.
    pub async fn refresh(&self) -> Result<()> {
        let tables = match self.source.fetch_name_tables(&self.language).await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!(language = %self.language, error = %e, "name table refresh failed, keeping previous table");
                return Err(e);
            }
        };

        let table = NameTable::new(self.language.clone(), tables.worlds, tables.objectives);
        tracing::info!(
            language = %self.language,
            worlds = table.world_count(),
            objectives = table.objective_count(),
            "name table refreshed"
        );

        *self.table.write().await = Arc::new(table);
        Ok(())
    }

    /// 현재 테이블 스냅샷. 여러 이름을 한 번에 조회할 때 일관된 테이블을 보장합니다.
    pub async fn snapshot(&self) -> Arc<NameTable> {
        Arc::clone(&*self.table.read().await)
    }

    pub async fn world_name(&self, id: &str) -> String {
        self.snapshot().await.world_name(id).to_string()
    }

    pub async fn objective_name(&self, id: &str) -> String {
        self.snapshot().await.objective_name(id).to_string()
    }

    pub async fn is_loaded(&self) -> bool {
        self.snapshot().await.fetched_at().is_some()
    }
}
