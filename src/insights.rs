use std::collections::{HashMap, HashSet};

use crate::models::{Category, CategoryViews, CommunityInsights, ReadEvent, Story};

pub const UNKNOWN_CATEGORY: &str = "unknown";

fn listed_keys(categories: &[Category]) -> HashSet<&str> {
    categories
        .iter()
        .map(|category| category.id.trim())
        .collect()
}

/// The story's bucket: its category key when listed, otherwise `"unknown"`.
fn category_key<'a>(story: &'a Story, listed: &HashSet<&str>) -> &'a str {
    let key = story.category.trim();
    if listed.contains(key) {
        key
    } else {
        UNKNOWN_CATEGORY
    }
}

/// Summed views per category, in the order each category first appears.
///
/// Blank keys and keys missing from `categories` share one `"unknown"` bucket.
pub fn category_views(stories: &[Story], categories: &[Category]) -> Vec<CategoryViews> {
    let listed = listed_keys(categories);
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryViews> = Vec::new();

    for story in stories {
        let key = category_key(story, &listed);
        let slot = *index.entry(key).or_insert_with(|| {
            totals.push(CategoryViews {
                category: key.to_string(),
                views: 0,
            });
            totals.len() - 1
        });
        totals[slot].views += story.views;
    }

    totals
}

/// Reduces the visible story set to the community panel figures.
///
/// Ties on views go to whichever category or story came first in `stories`.
pub fn community_insights(stories: &[Story], categories: &[Category]) -> CommunityInsights {
    let category_views = category_views(stories, categories);

    let top_category = first_max_by_key(&category_views, |entry| entry.views)
        .map(|entry| entry.category.clone());
    let most_viewed = first_max_by_key(stories, |story| story.views).cloned();
    let total_views = stories.iter().map(|story| story.views).sum();

    CommunityInsights {
        category_views,
        top_category,
        most_viewed,
        total_views,
    }
}

// Iterator::max_by_key keeps the last maximum; the panels want the first.
fn first_max_by_key<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> i64,
{
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if key(item) <= key(current) => {}
            _ => best = Some(item),
        }
    }
    best
}

pub fn trending(stories: &[Story], limit: usize) -> Vec<&Story> {
    let mut ranked: Vec<&Story> = stories.iter().collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked.truncate(limit);
    ranked
}

/// Distinct listed categories among the stories an account has read.
///
/// Stories filed under a category missing from `categories` are not
/// counted, so the result never exceeds `categories.len()`.
pub fn categories_explored(
    stories: &[Story],
    reads: &[ReadEvent],
    categories: &[Category],
) -> usize {
    let read_ids: HashSet<i64> = reads.iter().map(|read| read.story_id).collect();
    let listed = listed_keys(categories);
    stories
        .iter()
        .filter(|story| read_ids.contains(&story.id))
        .map(|story| category_key(story, &listed))
        .filter(|&key| key != UNKNOWN_CATEGORY)
        .collect::<HashSet<_>>()
        .len()
}

pub fn explored_percent(explored: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (explored as f64 / total as f64 * 100.0).min(100.0)
}
