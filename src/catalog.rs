use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Social,
    Creative,
    Wellness,
    Adventure,
    Learning,
    Kindness,
}

/// Static presentation and prompt data for one category.
#[derive(Debug)]
pub struct CategoryInfo {
    pub display_name: &'static str,
    pub icon: &'static str,
    /// CSS color used for card borders and badges.
    pub color: &'static str,
    /// CSS animation class played on the quest icon.
    pub animation: &'static str,
    pub prompts: &'static [&'static str],
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

const SOCIAL: CategoryInfo = CategoryInfo {
    display_name: "Social",
    icon: "👥",
    color: "#22d3ee",
    animation: "bounce",
    prompts: &[
        "Text an old friend",
        "Call a family member",
        "Compliment a stranger",
        "Have a conversation without checking your phone",
        "Introduce yourself to someone new",
    ],
};

const CREATIVE: CategoryInfo = CategoryInfo {
    display_name: "Creative",
    icon: "🎨",
    color: "#a855f7",
    animation: "spin",
    prompts: &[
        "Draw something for 10 minutes",
        "Write a haiku",
        "Take an artistic photo",
        "Doodle in a notebook",
        "Create something with your hands",
    ],
};

const WELLNESS: CategoryInfo = CategoryInfo {
    display_name: "Wellness",
    icon: "❤️",
    color: "#22c55e",
    animation: "pulse",
    prompts: &[
        "Meditate for 5 minutes",
        "Drink 8 glasses of water",
        "Take a walk outside",
        "Stretch for 10 minutes",
        "Go to bed 30 minutes early",
    ],
};

const ADVENTURE: CategoryInfo = CategoryInfo {
    display_name: "Adventure",
    icon: "🚶",
    color: "#f97316",
    animation: "shake",
    prompts: &[
        "Try a new food",
        "Take a different route home",
        "Visit somewhere new in your city",
        "Order something you've never tried",
        "Explore a new neighborhood",
    ],
};

const LEARNING: CategoryInfo = CategoryInfo {
    display_name: "Learning",
    icon: "📚",
    color: "#3b82f6",
    animation: "pulse",
    prompts: &[
        "Learn 3 words in a new language",
        "Read about something random on Wikipedia",
        "Watch a documentary",
        "Listen to a podcast on a new topic",
        "Research something you're curious about",
    ],
};

const KINDNESS: CategoryInfo = CategoryInfo {
    display_name: "Kindness",
    icon: "🤲",
    color: "#ec4899",
    animation: "float",
    prompts: &[
        "Do something nice for someone",
        "Leave a positive review",
        "Pick up litter you see",
        "Thank someone who helped you",
        "Pay for someone's coffee",
    ],
};

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Social,
        Category::Creative,
        Category::Wellness,
        Category::Adventure,
        Category::Learning,
        Category::Kindness,
    ];

    pub fn info(self) -> &'static CategoryInfo {
        match self {
            Category::Social => &SOCIAL,
            Category::Creative => &CREATIVE,
            Category::Wellness => &WELLNESS,
            Category::Adventure => &ADVENTURE,
            Category::Learning => &LEARNING,
            Category::Kindness => &KINDNESS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Social => "social",
            Category::Creative => "creative",
            Category::Wellness => "wellness",
            Category::Adventure => "adventure",
            Category::Learning => "learning",
            Category::Kindness => "kindness",
        }
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn icon(self) -> &'static str {
        self.info().icon
    }

    pub fn prompts(self) -> &'static [&'static str] {
        self.info().prompts
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(value.to_string()))
    }
}
