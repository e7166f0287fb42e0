use crate::catalog::Category;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated quest. Only the completion flag can change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    id: Uuid,
    text: String,
    category: Category,
    date: DateTime<Local>,
    #[serde(default, alias = "completed")]
    is_completed: bool,
}

impl Challenge {
    pub fn new(text: impl Into<String>, category: Category, date: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            category,
            date,
            is_completed: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> DateTime<Local> {
        self.date
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns false if the challenge was already completed.
    pub fn mark_completed(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        true
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub challenge: Option<Challenge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub applied: bool,
    pub challenge: Option<Challenge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub generated: bool,
    pub challenge: Option<Challenge>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub completed_count: usize,
    pub success_rate: u8,
    pub challenges: Vec<Challenge>,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: Category,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub prompts: &'static [&'static str],
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Deserialize)]
pub struct EnabledCategoriesRequest {
    pub enabled: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn mark_completed_only_once() {
        let mut challenge = Challenge::new("Write a haiku", Category::Creative, noon());
        assert!(!challenge.is_completed());
        assert!(challenge.mark_completed());
        assert!(challenge.is_completed());
        assert!(!challenge.mark_completed());
        assert!(challenge.is_completed());
    }

    #[test]
    fn ids_are_unique() {
        let a = Challenge::new("Write a haiku", Category::Creative, noon());
        let b = Challenge::new("Write a haiku", Category::Creative, noon());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let challenge = Challenge::new("Try a new food", Category::Adventure, noon());
        let value = serde_json::to_value(&challenge).unwrap();
        assert_eq!(value["text"], "Try a new food");
        assert_eq!(value["category"], "adventure");
        assert_eq!(value["isCompleted"], false);
        assert!(value["date"].is_string());
        assert!(value["id"].is_string());
    }

    #[test]
    fn accepts_legacy_completed_field() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "text": "Write a haiku",
            "category": "creative",
            "date": "2026-03-14T12:00:00+00:00",
            "completed": true
        }"#;
        let challenge: Challenge = serde_json::from_str(json).unwrap();
        assert!(challenge.is_completed());
        assert_eq!(challenge.category(), Category::Creative);
    }
}
