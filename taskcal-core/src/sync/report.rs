use serde::Serialize;

/// Aggregate outcome of a sync run, as handed to the presentation layer.
///
/// Failed writes are only counted in `failed`; the next run retries them.
/// `cancelled` marks a run stopped part way, whose counters cover only the
/// tasks handled before the stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub warnings: Vec<String>,
    pub cancelled: bool,
}

impl SyncReport {
    pub fn writes(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    pub fn has_changes(&self) -> bool {
        self.writes() > 0
    }
}
