use std::collections::HashSet;

use chrono::NaiveDate;

use crate::badges::{evaluate_badges, EngagementSnapshot};
use crate::insights;
use crate::models::{Category, Dashboard, ReadEvent, Story};
use crate::saved::SavedSet;
use crate::streak;

pub fn build_dashboard(
    stories: &[Story],
    categories: &[Category],
    reads: &[ReadEvent],
    saved: &SavedSet,
    today: NaiveDate,
) -> Dashboard {
    let stories_read = reads
        .iter()
        .map(|read| read.story_id)
        .collect::<HashSet<_>>()
        .len();
    let categories_explored = insights::categories_explored(stories, reads, categories);
    let total_categories = categories.len();
    let streak = streak::streak_for(reads, today);

    let snapshot = EngagementSnapshot {
        stories_read,
        categories_explored,
        total_categories,
        streak,
        saved: saved.len(),
        shared_first_story: false,
    };

    Dashboard {
        stories_read,
        total_reads: reads.len(),
        categories_explored,
        total_categories,
        explored_percent: insights::explored_percent(categories_explored, total_categories),
        streak,
        saved: saved.len(),
        badges: evaluate_badges(&snapshot),
        insights: insights::community_insights(stories, categories),
    }
}
