use clap::ValueEnum;

use crate::models::Story;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    #[default]
    Newest,
    MostViewed,
    TopRated,
    Title,
}

#[derive(Debug, Clone, Default)]
pub struct StoryQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: SortOrder,
}

fn matches_search(story: &Story, needle: &str) -> bool {
    [&story.title, &story.author, &story.hustle, &story.body]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Filter then sort the listing. Sorts are stable so ties keep catalog order.
pub fn filter_stories<'a>(stories: &'a [Story], query: &StoryQuery) -> Vec<&'a Story> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<&Story> = stories
        .iter()
        .filter(|story| match query.category.as_deref() {
            Some(category) => story.category.trim() == category.trim(),
            None => true,
        })
        .filter(|story| match needle.as_deref() {
            Some(needle) => matches_search(story, needle),
            None => true,
        })
        .collect();

    match query.sort {
        SortOrder::Newest => matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortOrder::MostViewed => matched.sort_by(|a, b| b.views.cmp(&a.views)),
        SortOrder::TopRated => matched.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortOrder::Title => {
            matched.sort_by_cached_key(|story| story.title.to_lowercase())
        }
    }

    matched
}
