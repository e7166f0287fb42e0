//! The daily challenge store: owns the current challenge and the completed
//! history, and decides when a fresh challenge is due.
//!
//! Every operation is synchronous. Callers persist [`ChallengeStore::records`]
//! after any call that reports a change.

use crate::catalog::Category;
use crate::generator::{all_categories, generate_challenge, is_new_challenge_needed_at};
use crate::models::Challenge;
use crate::storage::Records;
use chrono::{DateTime, Local};
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySummary {
    pub completed_count: usize,
    pub success_rate: u8,
}

#[derive(Debug, Default)]
pub struct ChallengeStore {
    current: Option<Challenge>,
    history: Vec<Challenge>,
    last_challenge_date: Option<DateTime<Local>>,
    /// Empty means all categories.
    enabled: BTreeSet<Category>,
}

impl ChallengeStore {
    pub fn from_records(records: Records) -> Self {
        Self {
            current: records.current_challenge,
            history: records.completed_challenges,
            last_challenge_date: records.last_challenge_date,
            enabled: records.enabled_categories,
        }
    }

    pub fn records(&self) -> Records {
        Records {
            current_challenge: self.current.clone(),
            completed_challenges: self.history.clone(),
            last_challenge_date: self.last_challenge_date,
            enabled_categories: self.enabled.clone(),
        }
    }

    pub fn current(&self) -> Option<&Challenge> {
        self.current.as_ref()
    }

    /// Completed challenges in completion order, oldest first.
    pub fn history(&self) -> &[Challenge] {
        &self.history
    }

    pub fn last_challenge_date(&self) -> Option<DateTime<Local>> {
        self.last_challenge_date
    }

    /// Builds a store from loaded records and generates today's challenge if
    /// the stored one is missing or stale. Returns whether one was generated.
    pub fn initialize(records: Records) -> (Self, bool) {
        Self::initialize_with(records, &mut rand::thread_rng(), Local::now())
    }

    pub fn initialize_with<R: Rng + ?Sized>(
        records: Records,
        rng: &mut R,
        now: DateTime<Local>,
    ) -> (Self, bool) {
        let mut store = Self::from_records(records);
        let current_date = store.current.as_ref().map(Challenge::date);
        let generated = is_new_challenge_needed_at(current_date, now.date_naive());
        if generated {
            store.generate_new_with(rng, now);
        }
        (store, generated)
    }

    pub fn generate_new(&mut self) -> &Challenge {
        self.generate_new_with(&mut rand::thread_rng(), Local::now())
    }

    /// Replaces the current challenge with a fresh draw from the enabled
    /// categories. History is untouched.
    pub fn generate_new_with<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Local>) -> &Challenge {
        let enabled = self.enabled_categories();
        self.generate_from(rng, &enabled, now)
    }

    /// Like [`Self::generate_new_with`] but draws from an explicit category
    /// set. An empty set produces the fallback challenge.
    pub fn generate_from<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        enabled: &BTreeSet<Category>,
        now: DateTime<Local>,
    ) -> &Challenge {
        let challenge = generate_challenge(rng, enabled, now);
        info!(
            id = %challenge.id(),
            category = %challenge.category(),
            "generated challenge"
        );
        self.last_challenge_date = Some(challenge.date());
        self.current.insert(challenge)
    }

    /// Marks the current challenge completed and appends a copy to history.
    /// Returns false, changing nothing, if there is no current challenge or it
    /// is already completed.
    pub fn complete(&mut self) -> bool {
        let Some(current) = self.current.as_mut() else {
            debug!("complete ignored: no current challenge");
            return false;
        };
        if !current.mark_completed() {
            debug!(id = %current.id(), "complete ignored: already completed");
            return false;
        }
        info!(id = %current.id(), category = %current.category(), "completed challenge");
        self.history.push(current.clone());
        true
    }

    pub fn check_for_new_challenge(&mut self) -> bool {
        self.check_for_new_challenge_with(&mut rand::thread_rng(), Local::now())
    }

    /// Generates a new challenge when the last generation happened on another
    /// local day. Returns whether one was generated.
    pub fn check_for_new_challenge_with<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Local>) -> bool {
        let last_date = self
            .last_challenge_date
            .or_else(|| self.current.as_ref().map(Challenge::date));
        if !is_new_challenge_needed_at(last_date, now.date_naive()) {
            return false;
        }
        self.generate_new_with(rng, now);
        true
    }

    /// The categories generation draws from. Never empty.
    pub fn enabled_categories(&self) -> BTreeSet<Category> {
        if self.enabled.is_empty() {
            all_categories()
        } else {
            self.enabled.clone()
        }
    }

    /// Replaces the category filter. An empty set enables everything.
    pub fn set_enabled_categories(&mut self, enabled: BTreeSet<Category>) {
        self.enabled = if enabled.len() == Category::ALL.len() {
            BTreeSet::new()
        } else {
            enabled
        };
    }

    /// Completed count plus the legacy success rate, which is always 100 once
    /// anything has been completed since history only holds completed entries.
    pub fn summary(&self) -> HistorySummary {
        let total = self.history.len();
        let completed = self.history.iter().filter(|c| c.is_completed()).count();
        let success_rate = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u8
        };
        HistorySummary {
            completed_count: total,
            success_rate,
        }
    }
}
