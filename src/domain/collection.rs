use std::collections::HashMap;

use serde::Serialize;

use super::models::{Match, MatchBundle, Shooter};
use super::reconcile::{reconcile_with_history, ReconciledStageResult, StageHistory};

/// Result of loading one match
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Served from the cache store
    Cached(MatchBundle),
    /// Fetched live; `stored` tells whether it was written to the cache
    Fetched { bundle: MatchBundle, stored: bool },
    /// Fetched after a cache failure, without stages
    Direct(MatchBundle),
    /// Nothing could be loaded
    Failed,
}

impl MatchOutcome {
    pub fn into_bundle(self) -> Option<MatchBundle> {
        match self {
            MatchOutcome::Cached(bundle)
            | MatchOutcome::Fetched { bundle, .. }
            | MatchOutcome::Direct(bundle) => Some(bundle),
            MatchOutcome::Failed => None,
        }
    }
}

/// Selected matches and the bundles of those that loaded
#[derive(Debug, Clone, Default)]
pub struct MatchDataSet {
    matches: Vec<Match>,
    bundles: HashMap<String, MatchBundle>,
}

/// Diagnostic view of one match: raw bundle, reconciled stages and the
/// distinct submissions behind every winner
#[derive(Debug, Serialize)]
pub struct MatchExport<'a> {
    #[serde(rename = "match")]
    pub event: &'a Match,
    pub bundle: &'a MatchBundle,
    pub reconciled: Vec<ReconciledStageResult>,
    pub history: Vec<Vec<StageHistory>>,
}

impl MatchDataSet {
    pub fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            bundles: HashMap::new(),
        }
    }

    /// Folds per-match outcomes into a data set; failed matches leave no trace
    pub fn from_outcomes<I>(matches: Vec<Match>, outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, MatchOutcome)>,
    {
        outcomes
            .into_iter()
            .fold(Self::new(matches), |set, (match_id, outcome)| {
                match outcome.into_bundle() {
                    Some(bundle) => set.with_bundle(match_id, bundle),
                    None => set,
                }
            })
    }

    pub fn with_bundle(mut self, match_id: impl Into<String>, bundle: MatchBundle) -> Self {
        self.bundles.insert(match_id.into(), bundle);
        self
    }

    /// Every selected match, newest first
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Matches that have data, in selection order
    pub fn loaded(&self) -> impl Iterator<Item = (&Match, &MatchBundle)> {
        self.matches
            .iter()
            .filter_map(|m| self.bundles.get(&m.id).map(|bundle| (m, bundle)))
    }

    pub fn bundle(&self, match_id: &str) -> Option<&MatchBundle> {
        self.bundles.get(match_id)
    }

    pub fn shooters(&self) -> impl Iterator<Item = &Shooter> {
        self.loaded().flat_map(|(_, bundle)| bundle.shooters.iter())
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn export(&self, match_id: &str) -> Option<MatchExport<'_>> {
        let event = self.matches.iter().find(|m| m.id == match_id)?;
        let bundle = self.bundles.get(match_id)?;
        let stages = (!bundle.stages.is_empty()).then_some(bundle.stages.as_slice());
        let num_stages = stage_count(event, bundle);

        let history = reconcile_with_history(&bundle.scores, num_stages, stages);
        let reconciled = history
            .iter()
            .map(|stage| stage.iter().map(|entry| entry.latest.clone()).collect())
            .collect();

        Some(MatchExport {
            event,
            bundle,
            reconciled,
            history,
        })
    }
}

/// Fetched stages when known, otherwise the stage ids the match declares
pub fn stage_count(event: &Match, bundle: &MatchBundle) -> usize {
    if bundle.stages.is_empty() {
        event.stages.len()
    } else {
        bundle.stages.len()
    }
}
