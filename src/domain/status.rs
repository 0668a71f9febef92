use std::collections::HashMap;

use super::collection::{stage_count, MatchDataSet};
use super::models::{Match, RecordId, Shooter};
use super::reconcile::{latest_for_shooter, reconcile};

/// All names a public id has been registered under
#[derive(Debug, Clone, PartialEq)]
pub struct ShooterEntry {
    pub public_id: RecordId,
    /// Distinct names, first seen first
    pub names: Vec<String>,
}

impl ShooterEntry {
    pub fn label(&self) -> String {
        format!("{} - {}", self.public_id, self.names.join(", "))
    }
}

/// Shooters of every loaded match, one entry per public id
#[derive(Debug, Clone, Default)]
pub struct ShooterDirectory {
    entries: Vec<ShooterEntry>,
}

impl ShooterDirectory {
    pub fn from_shooters<'a, I>(shooters: I) -> Self
    where
        I: IntoIterator<Item = &'a Shooter>,
    {
        let mut positions: HashMap<&RecordId, usize> = HashMap::new();
        let mut entries: Vec<ShooterEntry> = Vec::new();

        for shooter in shooters {
            let position = *positions.entry(&shooter.public_id).or_insert_with(|| {
                entries.push(ShooterEntry {
                    public_id: shooter.public_id.clone(),
                    names: Vec::new(),
                });
                entries.len() - 1
            });

            let names = &mut entries[position].names;
            if !names.contains(&shooter.name) {
                names.push(shooter.name.clone());
            }
        }

        Self { entries }
    }

    pub fn from_data_set(data: &MatchDataSet) -> Self {
        Self::from_shooters(data.shooters())
    }

    pub fn entries(&self) -> &[ShooterEntry] {
        &self.entries
    }

    pub fn find(&self, public_id: &RecordId) -> Option<&ShooterEntry> {
        self.entries.iter().find(|e| &e.public_id == public_id)
    }

    /// Finds a shooter by the printed form of the public id
    pub fn lookup(&self, text: &str) -> Option<&ShooterEntry> {
        let text = text.trim();
        self.entries.iter().find(|e| e.public_id.to_string() == text)
    }

    /// Case-insensitive substring match on the display label
    pub fn search(&self, text: &str) -> Vec<&ShooterEntry> {
        let needle = text.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.label().to_lowercase().contains(&needle))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Disqualified,
    Complete,
    Partial { percent: usize },
    /// The match has no known stages
    Unknown,
}

/// How far one shooter got in one match
#[derive(Debug, Clone)]
pub struct MatchStatus<'a> {
    pub event: &'a Match,
    pub shooter: &'a Shooter,
    pub num_scored: usize,
    pub num_stages: usize,
    pub completion: Completion,
}

/// Status of every loaded match the shooter is registered in, newest first
pub fn competition_status<'a>(data: &'a MatchDataSet, public_id: &RecordId) -> Vec<MatchStatus<'a>> {
    let mut statuses: Vec<MatchStatus<'a>> = data
        .loaded()
        .filter_map(|(event, bundle)| {
            let shooter = bundle.shooter_by_public_id(public_id)?;
            let num_stages = stage_count(event, bundle);
            let stages = (!bundle.stages.is_empty()).then_some(bundle.stages.as_slice());

            let results = reconcile(&bundle.scores, num_stages, stages);
            let latest = latest_for_shooter(&results, &shooter.id);
            let disqualified = latest.iter().flatten().any(|score| score.is_dq());
            let num_scored = latest.iter().flatten().count();

            Some(MatchStatus {
                event,
                shooter,
                num_scored,
                num_stages,
                completion: completion(disqualified, num_scored, num_stages),
            })
        })
        .collect();

    statuses.sort_by(|a, b| b.event.start_date.cmp(&a.event.start_date));
    statuses
}

fn completion(disqualified: bool, num_scored: usize, num_stages: usize) -> Completion {
    if disqualified {
        Completion::Disqualified
    } else if num_stages == 0 {
        Completion::Unknown
    } else if num_scored == num_stages {
        Completion::Complete
    } else {
        Completion::Partial {
            percent: num_scored * 100 / num_stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MatchBundle, MatchDate};
    use serde_json::{json, Value};

    fn shooter(id: i64, public_id: &str, name: &str) -> Shooter {
        serde_json::from_value(json!({"id": id, "publicId": public_id, "name": name})).unwrap()
    }

    fn event(id: &str, start: MatchDate, stages: usize) -> Match {
        Match {
            id: id.to_string(),
            title: id.to_string(),
            country_code: "IL".to_string(),
            level: 2,
            start_date: start,
            end_date: start,
            stages: (1..=stages).map(|i| format!("{}-{}", id, i)).collect(),
        }
    }

    fn bundle(value: Value) -> MatchBundle {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_directory_keeps_name_drift() {
        let shooters = vec![
            shooter(1, "P1", "Yossi Cohen"),
            shooter(2, "P2", "Dana Levi"),
            shooter(5, "P1", "Yosef Cohen"),
            shooter(9, "P1", "Yossi Cohen"),
        ];

        let directory = ShooterDirectory::from_shooters(&shooters);

        assert_eq!(directory.entries().len(), 2);
        assert_eq!(
            directory.find(&RecordId::from("P1")).unwrap().label(),
            "P1 - Yossi Cohen, Yosef Cohen"
        );
        assert_eq!(directory.lookup(" P2 ").unwrap().names, vec!["Dana Levi"]);
        assert_eq!(directory.search("levi").len(), 1);
        assert_eq!(directory.search("p").len(), 2);
    }

    #[test]
    fn test_status_per_match() {
        let data = MatchDataSet::new(vec![
            event("complete", MatchDate::new(2024, 1, 1), 2),
            event("dq", MatchDate::new(2024, 3, 1), 2),
            event("partial", MatchDate::new(2024, 2, 1), 3),
            event("absent", MatchDate::new(2024, 4, 1), 1),
        ])
        .with_bundle(
            "complete",
            bundle(json!({
                "shooters": [{"id": 1, "publicId": "P", "name": "Noa"}],
                "stages": [{"idx": 1}, {"idx": 2}],
                "scores": [
                    {"stageIdx": 1, "shooterId": 1, "timestamp": 1},
                    {"stageIdx": 2, "shooterId": 1, "timestamp": 1}
                ]
            })),
        )
        .with_bundle(
            "dq",
            bundle(json!({
                "shooters": [{"id": 4, "publicId": "P", "name": "Noa"}],
                "stages": [{"idx": 1}, {"idx": 2, "inactive": true}],
                "scores": [{"stageIdx": 2, "shooterId": 4, "timestamp": 1, "dq": true}]
            })),
        )
        .with_bundle(
            "partial",
            bundle(json!({
                "shooters": [{"id": 2, "publicId": "P", "name": "Noa"}],
                "stages": [{"idx": 1}, {"idx": 2}, {"idx": 3}],
                "scores": [
                    {"stageIdx": 3, "shooterId": 2, "timestamp": 1},
                    {"stageIdx": 1, "shooterId": 3, "timestamp": 1}
                ]
            })),
        )
        .with_bundle(
            "absent",
            bundle(json!({
                "shooters": [{"id": 2, "publicId": "Q", "name": "Other"}],
                "scores": []
            })),
        );

        let statuses = competition_status(&data, &RecordId::from("P"));
        let summary: Vec<(&str, Completion)> = statuses
            .iter()
            .map(|s| (s.event.id.as_str(), s.completion))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("dq", Completion::Disqualified),
                ("partial", Completion::Partial { percent: 33 }),
                ("complete", Completion::Complete),
            ]
        );
        assert_eq!(statuses[1].num_scored, 1);
        assert_eq!(statuses[1].num_stages, 3);
    }

    #[test]
    fn test_inactive_stage_score_does_not_count() {
        let data = MatchDataSet::new(vec![event("m", MatchDate::new(2024, 1, 1), 2)]).with_bundle(
            "m",
            bundle(json!({
                "shooters": [{"id": 1, "publicId": "P", "name": "Noa"}],
                "stages": [{"idx": 1}, {"idx": 2, "inactive": true}],
                "scores": [
                    {"stageIdx": 1, "shooterId": 1, "timestamp": 1},
                    {"stageIdx": 2, "shooterId": 1, "timestamp": 1}
                ]
            })),
        );

        let statuses = competition_status(&data, &RecordId::from("P"));

        assert_eq!(statuses[0].num_scored, 1);
        assert_eq!(statuses[0].completion, Completion::Partial { percent: 50 });
    }

    #[test]
    fn test_match_without_stages_is_unknown() {
        let data = MatchDataSet::new(vec![event("m", MatchDate::new(2024, 1, 1), 0)]).with_bundle(
            "m",
            bundle(json!({
                "shooters": [{"id": 1, "publicId": "P", "name": "Noa"}],
                "scores": [{"stageIdx": 1, "shooterId": 1, "timestamp": 1}]
            })),
        );

        let statuses = competition_status(&data, &RecordId::from("P"));

        assert_eq!(statuses[0].completion, Completion::Unknown);
    }
}
