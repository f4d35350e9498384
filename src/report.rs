use std::fmt::Write;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::categories;
use crate::models::{Dashboard, Story};

const NONE_YET: &str = "None yet";

pub fn build_report(
    account_id: Uuid,
    today: NaiveDate,
    dashboard: &Dashboard,
    trending: &[&Story],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Side Hustle Reading Report");
    let _ = writeln!(output, "Generated for account {} on {}", account_id, today);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Reading");
    let _ = writeln!(
        output,
        "- Stories read: {} ({} reads total)",
        dashboard.stories_read, dashboard.total_reads
    );
    let _ = writeln!(output, "- Current streak: {} days", dashboard.streak);
    let _ = writeln!(
        output,
        "- Categories explored: {}/{} ({:.0}%)",
        dashboard.categories_explored, dashboard.total_categories, dashboard.explored_percent
    );
    let _ = writeln!(output, "- Saved stories: {}", dashboard.saved);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Badges");
    for badge in dashboard.badges.iter() {
        let mark = if badge.earned { "x" } else { " " };
        let _ = writeln!(
            output,
            "- [{}] {} {}: {}",
            mark, badge.icon, badge.name, badge.description
        );
    }

    let insights = &dashboard.insights;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Community Insights");
    let _ = writeln!(
        output,
        "- Most viewed story: {}",
        insights
            .most_viewed
            .as_ref()
            .map(|story| format!("{} by {} ({} views)", story.title, story.author, story.views))
            .unwrap_or_else(|| NONE_YET.to_string())
    );
    let _ = writeln!(
        output,
        "- Top category: {}",
        insights
            .top_category
            .as_deref()
            .map(categories::label)
            .unwrap_or_else(|| NONE_YET.to_string())
    );
    let _ = writeln!(output, "- Motivation meter: {} views", insights.total_views);

    if !insights.category_views.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "### Views by Category");
        for entry in insights.category_views.iter() {
            let _ = writeln!(
                output,
                "- {}: {}",
                categories::label(&entry.category),
                entry.views
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Trending Stories");

    if trending.is_empty() {
        let _ = writeln!(output, "{NONE_YET}.");
    } else {
        for story in trending {
            let _ = writeln!(
                output,
                "- {} by {} ({}, {} views, rated {}/5)",
                story.title,
                story.author,
                story.hustle,
                story.views,
                story.rating
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_dashboard;
    use crate::models::Category;
    use crate::saved::SavedSet;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()
    }

    #[test]
    fn empty_report_uses_placeholders() {
        let dashboard = build_dashboard(&[], &[], &[], &SavedSet::default(), today());
        let report = build_report(Uuid::nil(), today(), &dashboard, &[]);

        assert!(report.contains("- Most viewed story: None yet"));
        assert!(report.contains("- Top category: None yet"));
        assert!(report.contains("Categories explored: 0/0 (0%)"));
        assert!(report.contains("- [ ] 📖 Every 5 Stories"));
        assert!(!report.contains("NaN"));
        assert!(!report.contains("### Views by Category"));
    }

    #[test]
    fn report_lists_insights_and_trending() {
        let stories = vec![Story {
            id: 1,
            title: "Selling stock photos".to_string(),
            author: "Theo Brandt".to_string(),
            hustle: "Photography".to_string(),
            body: "Shot on weekends.".to_string(),
            rating: 4,
            category: "creative".to_string(),
            views: 88,
            updated_at: Utc.with_ymd_and_hms(2026, 3, 30, 9, 0, 0).unwrap(),
        }];
        let categories = vec![Category {
            id: "creative".to_string(),
            name: "Creative".to_string(),
            story_count: 1,
        }];
        let dashboard =
            build_dashboard(&stories, &categories, &[], &SavedSet::default(), today());
        let trending: Vec<&Story> = stories.iter().collect();
        let report = build_report(Uuid::nil(), today(), &dashboard, &trending);

        assert!(report.contains("Selling stock photos by Theo Brandt (88 views)"));
        assert!(report.contains("- Top category: 🎨 Creative"));
        assert!(report.contains("- Motivation meter: 88 views"));
        assert!(report.contains("(Photography, 88 views, rated 4/5)"));
    }

    #[test]
    fn unlisted_categories_render_as_one_other_line() {
        let story = |id: i64, category: &str, views: i64| Story {
            id,
            title: format!("Gig {id}"),
            author: "Rosa Vega".to_string(),
            hustle: "Odd jobs".to_string(),
            body: String::new(),
            rating: 3,
            category: category.to_string(),
            views,
            updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        };
        let stories = vec![story(1, "zzz", 5), story(2, "yyy", 6), story(3, "", 1)];
        let dashboard = build_dashboard(&stories, &[], &[], &SavedSet::default(), today());
        let report = build_report(Uuid::nil(), today(), &dashboard, &[]);

        assert_eq!(report.matches("📚 Other").count(), 2);
        assert!(report.contains("- Top category: 📚 Other"));
        assert!(report.contains("- 📚 Other: 12"));
    }
}
