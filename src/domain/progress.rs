use log::info;

use super::collection::MatchOutcome;

/// Position of a sync sweep, reported before each match is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncProgress {
    pub total: usize,
    pub current: usize,
}

impl SyncProgress {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        self.current * 100 / self.total
    }
}

/// Counts how each match of a sweep was served
#[derive(Debug, Default)]
pub struct SyncTally {
    total: usize,
    cached: usize,
    fetched: usize,
    stored: usize,
    direct: usize,
    failed: usize,
}

impl SyncTally {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &MatchOutcome) {
        match outcome {
            MatchOutcome::Cached(_) => self.cached += 1,
            MatchOutcome::Fetched { stored, .. } => {
                self.fetched += 1;
                if *stored {
                    self.stored += 1;
                }
            }
            MatchOutcome::Direct(_) => self.direct += 1,
            MatchOutcome::Failed => self.failed += 1,
        }
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.cached + self.fetched + self.direct + self.failed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn summary(&self) -> String {
        format!(
            "{} matches: {} cached, {} fetched ({} stored), {} without cache, {} failed",
            self.total, self.cached, self.fetched, self.stored, self.direct, self.failed
        )
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} ({} cached, {} fetched, {} failed)",
                current, self.total, self.cached, self.fetched + self.direct, self.failed
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || current == total
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}
