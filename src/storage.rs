use crate::catalog::Category;
use crate::errors::AppError;
use crate::models::Challenge;
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const CURRENT_CHALLENGE_KEY: &str = "currentChallenge";
pub const COMPLETED_CHALLENGES_KEY: &str = "completedChallenges";
pub const LAST_CHALLENGE_DATE_KEY: &str = "lastChallengeDate";
pub const ENABLED_CATEGORIES_KEY: &str = "enabledCategories";

/// Everything kept in the key-value record file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Records {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_challenge: Option<Challenge>,
    pub completed_challenges: Vec<Challenge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_challenge_date: Option<DateTime<Local>>,
    /// Empty means every category is enabled.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub enabled_categories: BTreeSet<Category>,
}

impl Records {
    /// Decodes each key independently. Missing or malformed keys come back empty.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let map: Map<String, Value> = match serde_json::from_slice(bytes) {
            Ok(map) => map,
            Err(err) => {
                error!("failed to parse data file: {err}");
                return Self::default();
            }
        };

        Self {
            current_challenge: decode_key(&map, CURRENT_CHALLENGE_KEY),
            completed_challenges: decode_key(&map, COMPLETED_CHALLENGES_KEY).unwrap_or_default(),
            last_challenge_date: decode_key(&map, LAST_CHALLENGE_DATE_KEY),
            enabled_categories: decode_categories(map.get(ENABLED_CATEGORIES_KEY)),
        }
    }
}

fn decode_key<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!(key = key, "ignoring malformed record: {err}");
            None
        }
    }
}

// Accepts a JSON array of ids or a comma-separated string; unknown ids are dropped.
fn decode_categories(value: Option<&Value>) -> BTreeSet<Category> {
    let names: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(joined)) => joined.split(',').filter(|name| !name.trim().is_empty()).collect(),
        Some(Value::Null) | None => return BTreeSet::new(),
        Some(other) => {
            warn!(key = ENABLED_CATEGORIES_KEY, "ignoring malformed record: {other}");
            return BTreeSet::new();
        }
    };

    names
        .into_iter()
        .filter_map(|name| match name.parse::<Category>() {
            Ok(category) => Some(category),
            Err(err) => {
                warn!(key = ENABLED_CATEGORIES_KEY, "{err}");
                None
            }
        })
        .collect()
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/challenges.json"))
}

pub async fn load_records(path: &Path) -> Records {
    match fs::read(path).await {
        Ok(bytes) => Records::from_slice(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Records::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Records::default()
        }
    }
}

pub async fn persist_records(path: &Path, records: &Records) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(records).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(|err| {
        error!(path = %path.display(), "failed to write data file: {err}");
        AppError::internal(err)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_challenge(text: &str, category: Category) -> Challenge {
        let date = Local.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).single().unwrap();
        Challenge::new(text, category, date)
    }

    fn sample_records() -> Records {
        let mut done = sample_challenge("Write a haiku", Category::Creative);
        done.mark_completed();
        let current = sample_challenge("Call a family member", Category::Social);
        Records {
            last_challenge_date: Some(current.date()),
            current_challenge: Some(current),
            completed_challenges: vec![done],
            enabled_categories: BTreeSet::from([Category::Social, Category::Creative]),
        }
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("challenges.json");
        let records = sample_records();

        persist_records(&path, &records).await.unwrap();
        let loaded = load_records(&path).await;

        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_records(&dir.path().join("absent.json")).await;
        assert_eq!(loaded, Records::default());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("challenges.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();
        assert_eq!(load_records(&path).await, Records::default());
    }

    #[test]
    fn corrupt_key_does_not_discard_others() {
        let records = sample_records();
        let mut value = serde_json::to_value(&records).unwrap();
        value[CURRENT_CHALLENGE_KEY] = serde_json::json!({ "text": 12 });

        let loaded = Records::from_slice(&serde_json::to_vec(&value).unwrap());
        assert_eq!(loaded.current_challenge, None);
        assert_eq!(loaded.completed_challenges, records.completed_challenges);
        assert_eq!(loaded.last_challenge_date, records.last_challenge_date);
        assert_eq!(loaded.enabled_categories, records.enabled_categories);
    }

    #[test]
    fn enabled_categories_accepts_joined_string_and_drops_unknown() {
        let json = br#"{ "enabledCategories": "wellness,cooking,kindness" }"#;
        let loaded = Records::from_slice(json);
        assert_eq!(
            loaded.enabled_categories,
            BTreeSet::from([Category::Wellness, Category::Kindness])
        );

        let json = br#"{ "enabledCategories": ["learning", "nope"] }"#;
        let loaded = Records::from_slice(json);
        assert_eq!(loaded.enabled_categories, BTreeSet::from([Category::Learning]));
    }

    #[test]
    fn empty_enabled_set_is_not_written() {
        let value = serde_json::to_value(Records::default()).unwrap();
        assert!(value.get(ENABLED_CATEGORIES_KEY).is_none());
        assert!(value.get(CURRENT_CHALLENGE_KEY).is_none());
        assert_eq!(value[COMPLETED_CHALLENGES_KEY], serde_json::json!([]));
    }
}
