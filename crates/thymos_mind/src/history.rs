//! Action/outcome history consumed by meta-governance.

use thymos_core::ActionRecord;
use tokio::sync::RwLock;

/// Insertion-ordered log of dispatched actions and their outcomes.
#[derive(Default)]
pub struct HistoryLog {
    records: RwLock<Vec<ActionRecord>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, record: ActionRecord) {
        self.records.write().await.push(record);
    }

    /// The most recent `limit` records, oldest first.
    pub async fn recent(&self, limit: usize) -> Vec<ActionRecord> {
        let records = self.records.read().await;
        let start = records.len().saturating_sub(limit);
        records[start..].to_vec()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Drain the accumulated window, handing it to the upgrade cycle.
    pub async fn take_all(&self) -> Vec<ActionRecord> {
        std::mem::take(&mut *self.records.write().await)
    }
}
