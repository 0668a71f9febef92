use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, error, info, warn};

use crate::api::Fetcher;
use crate::cache::{cache_key, CacheStore};
use crate::config::{CacheSettings, MatchFilter};
use crate::domain::{
    select_matches, Match, MatchBundle, MatchDataSet, MatchDate, MatchOutcome, ScoreRecord,
    SyncProgress, SyncTally,
};

/// Loads match bundles, trusting the cache for finalized matches
pub struct SyncService<F, C> {
    fetcher: F,
    cache: C,
    final_after: Duration,
    now: NaiveDateTime,
}

impl<F: Fetcher, C: CacheStore> SyncService<F, C> {
    pub fn new(fetcher: F, cache: C, settings: &CacheSettings) -> Self {
        Self {
            fetcher,
            cache,
            final_after: Duration::days(settings.eligibility_days),
            now: Local::now().naive_local(),
        }
    }

    /// Reference time for the caching decision
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub async fn run<P>(&mut self, filter: &MatchFilter, on_progress: P) -> Result<MatchDataSet>
    where
        P: FnMut(SyncProgress),
    {
        info!("=== Starting Match Sync ===");

        let matches = self.discover_matches(filter).await?;
        info!("  → Found {} ranked matches", matches.len());

        let data = self.load_matches(matches, on_progress).await;
        info!("  → Loaded {} matches", data.len());

        info!("=== Sync Complete ===");
        Ok(data)
    }

    pub async fn discover_matches(&mut self, filter: &MatchFilter) -> Result<Vec<Match>> {
        let all = self
            .fetcher
            .get_matches()
            .await
            .context("Failed to fetch match listing")?;
        Ok(select_matches(all, filter))
    }

    /// Loads every match in order, one at a time
    pub async fn load_matches<P>(&mut self, matches: Vec<Match>, mut on_progress: P) -> MatchDataSet
    where
        P: FnMut(SyncProgress),
    {
        let total = matches.len();
        let mut tally = SyncTally::new(total);
        let mut outcomes = Vec::with_capacity(total);

        for (current, event) in matches.iter().enumerate() {
            on_progress(SyncProgress { total, current });

            let outcome = self.load_match(event).await;
            tally.record(&outcome);
            outcomes.push((event.id.clone(), outcome));
        }

        info!("  → {}", tally.summary());
        MatchDataSet::from_outcomes(matches, outcomes)
    }

    pub async fn load_match(&mut self, event: &Match) -> MatchOutcome {
        let key = cache_key(&event.id);

        match self.cache.get_item(&key).await {
            Ok(Some(bundle)) => {
                debug!("Match {} served from cache", event.id);
                MatchOutcome::Cached(bundle)
            }
            Ok(None) => self.load_live(event, &key).await,
            Err(e) => {
                error!("Cache error for match {}: {}", event.id, e);
                self.load_direct(event).await
            }
        }
    }

    async fn load_live(&mut self, event: &Match, key: &str) -> MatchOutcome {
        match self.fetch_bundle(event).await {
            Ok(bundle) => {
                let stored = self.store_if_final(event, key, &bundle).await;
                MatchOutcome::Fetched { bundle, stored }
            }
            Err(e) => {
                error!("Cannot get scores for match {} ({}): {:#}", event.title, event.id, e);
                MatchOutcome::Failed
            }
        }
    }

    // TODO: fetch stages here as well; without them inactive stages are not
    // filtered for matches loaded on this path
    async fn load_direct(&mut self, event: &Match) -> MatchOutcome {
        let fetched = async {
            let shooters = self.fetcher.get_shooters(&event.id).await?;
            let scores = self.fetch_scores(&event.id).await?;
            anyhow::Ok(MatchBundle {
                shooters,
                scores,
                stages: Vec::new(),
            })
        }
        .await;

        match fetched {
            Ok(bundle) => MatchOutcome::Direct(bundle),
            Err(e) => {
                error!("Cannot get scores for match {} ({}): {:#}", event.title, event.id, e);
                MatchOutcome::Failed
            }
        }
    }

    async fn fetch_bundle(&mut self, event: &Match) -> Result<MatchBundle> {
        let stages = if event.stages.is_empty() {
            Vec::new()
        } else {
            self.fetcher
                .get_stages(&event.stages)
                .await
                .context("Failed to fetch stages")?
        };

        let shooters = self
            .fetcher
            .get_shooters(&event.id)
            .await
            .context("Failed to fetch shooters")?;
        let scores = self.fetch_scores(&event.id).await?;

        Ok(MatchBundle {
            shooters,
            scores,
            stages,
        })
    }

    async fn fetch_scores(&mut self, match_id: &str) -> Result<Vec<ScoreRecord>> {
        let response = self
            .fetcher
            .get_scores(match_id)
            .await
            .context("Failed to fetch scores")?;

        let Some(base_url) = response.base_url().map(str::to_string) else {
            return Ok(response.into_scores());
        };

        let base = self
            .fetcher
            .get_base_scores(&base_url)
            .await
            .context("Failed to fetch base score snapshot")?;
        Ok(merge_scores(response.into_scores(), base))
    }

    async fn store_if_final(&self, event: &Match, key: &str, bundle: &MatchBundle) -> bool {
        if !is_cache_eligible(&event.end_date, self.now, self.final_after) {
            debug!("Match {} is recent, not caching", event.id);
            return false;
        }

        match self.cache.set_item(key, bundle).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save match {} to cache: {}", event.id, e);
                false
            }
        }
    }
}

/// Incremental records first, then the base snapshot; the first record seen
/// for an id is kept. Records without an id are never merged away, not even
/// with each other; they are told apart later by content.
pub fn merge_scores(incremental: Vec<ScoreRecord>, base: Vec<ScoreRecord>) -> Vec<ScoreRecord> {
    let mut seen = HashSet::new();
    incremental
        .into_iter()
        .chain(base)
        .filter(|score| match &score.id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect()
}

/// A match is final once its end date is more than `final_after` behind `now`
pub fn is_cache_eligible(end_date: &MatchDate, now: NaiveDateTime, final_after: Duration) -> bool {
    end_date
        .to_naive()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .is_some_and(|end| now - end > final_after)
}
