use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::{RecordId, ScoreRecord, Stage};

/// Winning submissions of one stage, at most one per shooter, ordered by shooter id
pub type ReconciledStageResult = Vec<ScoreRecord>;

/// Winner of one (stage, shooter) pair together with its de-duplicated history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageHistory {
    pub latest: ScoreRecord,
    pub num_scores_entered: usize,
    /// Distinct submissions, most recent first
    pub all_scores: Vec<ScoreRecord>,
}

/// Reduces a raw submission stream to the latest score per shooter per stage.
///
/// The result has exactly `num_stages` slots; slot `i` belongs to stage `i + 1`.
/// A shooter without an eligible submission on a stage has no entry there.
pub fn reconcile(
    scores: &[ScoreRecord],
    num_stages: usize,
    stages: Option<&[Stage]>,
) -> Vec<ReconciledStageResult> {
    reconcile_with_history(scores, num_stages, stages)
        .into_iter()
        .map(|stage| stage.into_iter().map(|history| history.latest).collect())
        .collect()
}

/// Same as [`reconcile`], keeping every distinct submission behind each winner
pub fn reconcile_with_history(
    scores: &[ScoreRecord],
    num_stages: usize,
    stages: Option<&[Stage]>,
) -> Vec<Vec<StageHistory>> {
    let mut grouped = group_eligible(scores, stages);

    (1..=num_stages)
        .map(|stage_number| {
            grouped
                .remove(&stage_number)
                .map(|by_shooter| {
                    by_shooter
                        .into_values()
                        .filter_map(collapse_submissions)
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect()
}

/// Picks one shooter's winner on every stage, `None` where nothing was scored
pub fn latest_for_shooter<'a>(
    results: &'a [ReconciledStageResult],
    shooter_id: &RecordId,
) -> Vec<Option<&'a ScoreRecord>> {
    results
        .iter()
        .map(|stage| stage.iter().find(|score| &score.shooter_id == shooter_id))
        .collect()
}

type ShooterGroups<'a> = BTreeMap<&'a RecordId, Vec<&'a ScoreRecord>>;

fn group_eligible<'a>(
    scores: &'a [ScoreRecord],
    stages: Option<&[Stage]>,
) -> BTreeMap<usize, ShooterGroups<'a>> {
    let mut grouped: BTreeMap<usize, ShooterGroups<'a>> = BTreeMap::new();

    for score in scores.iter().filter(|s| is_eligible(s, stages)) {
        grouped
            .entry(score.stage_idx as usize)
            .or_default()
            .entry(&score.shooter_id)
            .or_default()
            .push(score);
    }

    grouped
}

fn is_eligible(score: &ScoreRecord, stages: Option<&[Stage]>) -> bool {
    if score.is_deleted() {
        return false;
    }
    score.is_dq() || !is_inactive_stage(score.stage_idx, stages)
}

fn is_inactive_stage(stage_idx: u32, stages: Option<&[Stage]>) -> bool {
    let Some(stages) = stages else {
        return false;
    };

    (stage_idx as usize)
        .checked_sub(1)
        .and_then(|position| stages.get(position))
        .is_some_and(|stage| stage.inactive)
}

fn collapse_submissions(mut submissions: Vec<&ScoreRecord>) -> Option<StageHistory> {
    // Stable: equal timestamps keep submission order
    submissions.sort_by(|a, b| a.timestamp.cmp_newest_first(&b.timestamp));

    let mut distinct: Vec<ScoreRecord> = Vec::with_capacity(submissions.len());
    for submission in submissions {
        if !distinct.iter().any(|kept| kept.same_submission(submission)) {
            distinct.push(submission.clone());
        }
    }

    let latest = distinct.first()?.clone();
    Some(StageHistory {
        latest,
        num_scores_entered: distinct.len(),
        all_scores: distinct,
    })
}
