use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::badges::Badge;
use crate::categories::CategoryKind;
use crate::error::SubmissionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub hustle: String,
    pub body: String,
    pub rating: i32,
    pub category: String,
    pub views: i64,
    pub updated_at: DateTime<Utc>,
}

/// Submission payload. The store assigns `id`, `views` and `updated_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStory {
    pub title: String,
    pub author: String,
    pub hustle: String,
    pub body: String,
    pub rating: i32,
    pub category: String,
}

impl NewStory {
    /// Trims every text field so stored keys compare equal to listed ones.
    pub fn normalized(&self) -> NewStory {
        NewStory {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            hustle: self.hustle.trim().to_string(),
            body: self.body.trim().to_string(),
            rating: self.rating,
            category: self.category.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), SubmissionError> {
        let fields = [
            ("title", &self.title),
            ("author", &self.author),
            ("hustle", &self.hustle),
            ("body", &self.body),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(SubmissionError::EmptyField { field });
            }
        }

        if !(1..=5).contains(&self.rating) {
            return Err(SubmissionError::RatingOutOfRange(self.rating));
        }

        if CategoryKind::from_key(&self.category) == CategoryKind::Unknown {
            return Err(SubmissionError::UnknownCategory(self.category.clone()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadEvent {
    pub story_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveEvent {
    pub account_id: Uuid,
    pub story_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub story_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryViews {
    pub category: String,
    pub views: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CommunityInsights {
    pub category_views: Vec<CategoryViews>,
    pub top_category: Option<String>,
    pub most_viewed: Option<Story>,
    pub total_views: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stories_read: usize,
    pub total_reads: usize,
    pub categories_explored: usize,
    pub total_categories: usize,
    pub explored_percent: f64,
    pub streak: u32,
    pub saved: usize,
    pub badges: Vec<Badge>,
    pub insights: CommunityInsights,
}
