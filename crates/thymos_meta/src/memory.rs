//! Reflective memory: append-only store of lessons learned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A recorded lesson or critique derived from past behavior.
/// Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectiveInsight {
    pub id: Uuid,
    pub text: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ReflectiveInsight {
    pub fn new(text: &str, metadata: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Insertion-ordered, append-only insight store with keyword query.
#[derive(Default)]
pub struct ReflectiveMemory {
    entries: RwLock<Vec<ReflectiveInsight>>,
}

impl ReflectiveMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_insight(&self, text: &str, metadata: serde_json::Value) {
        let insight = ReflectiveInsight::new(text, metadata);
        tracing::debug!(id = %insight.id, "reflective insight recorded");
        self.entries.write().await.push(insight);
    }

    /// Case-insensitive keyword match over insight text and metadata,
    /// insertion order, capped at `limit`. An empty keyword matches
    /// everything.
    pub async fn query_insights(&self, keyword: &str, limit: usize) -> Vec<ReflectiveInsight> {
        let needle = keyword.to_lowercase();
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| {
                e.text.to_lowercase().contains(&needle)
                    || e.metadata.to_string().to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<ReflectiveInsight> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Bulk clear; the only way existing entries ever disappear.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
