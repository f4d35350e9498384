use crate::models::{Category, Story};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    OnlineBusiness,
    Freelancing,
    Creative,
    Tech,
    Investing,
    LocalServices,
    Unknown,
}

impl CategoryKind {
    pub const KNOWN: [CategoryKind; 6] = [
        CategoryKind::OnlineBusiness,
        CategoryKind::Freelancing,
        CategoryKind::Creative,
        CategoryKind::Tech,
        CategoryKind::Investing,
        CategoryKind::LocalServices,
    ];

    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "online-business" => CategoryKind::OnlineBusiness,
            "freelancing" => CategoryKind::Freelancing,
            "creative" => CategoryKind::Creative,
            "tech" => CategoryKind::Tech,
            "investing" => CategoryKind::Investing,
            "local-services" => CategoryKind::LocalServices,
            _ => CategoryKind::Unknown,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CategoryKind::OnlineBusiness => "online-business",
            CategoryKind::Freelancing => "freelancing",
            CategoryKind::Creative => "creative",
            CategoryKind::Tech => "tech",
            CategoryKind::Investing => "investing",
            CategoryKind::LocalServices => "local-services",
            CategoryKind::Unknown => "unknown",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CategoryKind::OnlineBusiness => "Online Business",
            CategoryKind::Freelancing => "Freelancing",
            CategoryKind::Creative => "Creative",
            CategoryKind::Tech => "Tech",
            CategoryKind::Investing => "Investing",
            CategoryKind::LocalServices => "Local Services",
            CategoryKind::Unknown => "Other",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CategoryKind::OnlineBusiness => "🛒",
            CategoryKind::Freelancing => "💼",
            CategoryKind::Creative => "🎨",
            CategoryKind::Tech => "💻",
            CategoryKind::Investing => "📈",
            CategoryKind::LocalServices => "🏘️",
            CategoryKind::Unknown => "📚",
        }
    }
}

/// Fills in `story_count` for each category from the loaded stories.
pub fn category_counts(categories: &[Category], stories: &[Story]) -> Vec<Category> {
    categories
        .iter()
        .map(|category| Category {
            story_count: stories
                .iter()
                .filter(|story| story.category.trim() == category.id)
                .count(),
            ..category.clone()
        })
        .collect()
}

pub fn label(key: &str) -> String {
    let kind = CategoryKind::from_key(key);
    format!("{} {}", kind.emoji(), kind.display_name())
}
