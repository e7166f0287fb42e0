use crate::catalog::Category;
use crate::models::Challenge;
use chrono::{DateTime, Local, NaiveDate};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::collections::BTreeSet;

pub const FALLBACK_TEXT: &str = "Try something new today";
pub const FALLBACK_CATEGORY: Category = Category::Adventure;

pub fn all_categories() -> BTreeSet<Category> {
    Category::ALL.into_iter().collect()
}

/// Draws a category uniformly from `enabled`, then a prompt uniformly from it.
/// An empty selection yields the fallback challenge.
pub fn generate_challenge<R: Rng + ?Sized>(
    rng: &mut R,
    enabled: &BTreeSet<Category>,
    now: DateTime<Local>,
) -> Challenge {
    let Some(category) = enabled.iter().copied().choose(rng) else {
        return fallback_challenge(now);
    };
    let Some(text) = category.prompts().choose(rng) else {
        return fallback_challenge(now);
    };
    Challenge::new(*text, category, now)
}

pub fn fallback_challenge(now: DateTime<Local>) -> Challenge {
    Challenge::new(FALLBACK_TEXT, FALLBACK_CATEGORY, now)
}

pub fn is_new_challenge_needed(last_date: Option<DateTime<Local>>) -> bool {
    is_new_challenge_needed_at(last_date, Local::now().date_naive())
}

/// True when there is no previous date or it falls on another local calendar day.
pub fn is_new_challenge_needed_at(last_date: Option<DateTime<Local>>, today: NaiveDate) -> bool {
    match last_date {
        Some(date) => date.date_naive() != today,
        None => true,
    }
}
