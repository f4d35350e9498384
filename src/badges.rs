use serde::Serialize;

pub const READS_FOR_BADGE: usize = 5;
pub const STREAK_FOR_BADGE: u32 = 7;
pub const SAVES_FOR_BADGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    EveryFiveStories,
    WeekStreak,
    CategoryExplorer,
    Collector,
    CommunityMember,
}

impl BadgeKind {
    /// Display order on the dashboard.
    pub const ALL: [BadgeKind; 5] = [
        BadgeKind::EveryFiveStories,
        BadgeKind::WeekStreak,
        BadgeKind::CategoryExplorer,
        BadgeKind::Collector,
        BadgeKind::CommunityMember,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BadgeKind::EveryFiveStories => "Every 5 Stories",
            BadgeKind::WeekStreak => "7-Day Streak",
            BadgeKind::CategoryExplorer => "Category Explorer",
            BadgeKind::Collector => "Collector",
            BadgeKind::CommunityMember => "Community Member",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BadgeKind::EveryFiveStories => "📖",
            BadgeKind::WeekStreak => "🔥",
            BadgeKind::CategoryExplorer => "🧭",
            BadgeKind::Collector => "🔖",
            BadgeKind::CommunityMember => "🤝",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BadgeKind::EveryFiveStories => "Read 5 different stories",
            BadgeKind::WeekStreak => "Read something 7 days in a row",
            BadgeKind::CategoryExplorer => "Read a story from every category",
            BadgeKind::Collector => "Save 10 stories",
            BadgeKind::CommunityMember => "Share your first story",
        }
    }
}

/// Inputs to badge evaluation, already reduced from the account's events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementSnapshot {
    pub stories_read: usize,
    pub categories_explored: usize,
    pub total_categories: usize,
    pub streak: u32,
    pub saved: usize,
    /// Nothing records sharing yet, so callers pass `false`.
    pub shared_first_story: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

fn is_earned(kind: BadgeKind, snapshot: &EngagementSnapshot) -> bool {
    match kind {
        BadgeKind::EveryFiveStories => snapshot.stories_read >= READS_FOR_BADGE,
        BadgeKind::WeekStreak => snapshot.streak >= STREAK_FOR_BADGE,
        BadgeKind::CategoryExplorer => {
            snapshot.total_categories > 0
                && snapshot.categories_explored == snapshot.total_categories
        }
        BadgeKind::Collector => snapshot.saved >= SAVES_FOR_BADGE,
        BadgeKind::CommunityMember => snapshot.shared_first_story,
    }
}

pub fn evaluate_badges(snapshot: &EngagementSnapshot) -> Vec<Badge> {
    BadgeKind::ALL
        .iter()
        .map(|&kind| Badge {
            kind,
            name: kind.name(),
            icon: kind.icon(),
            description: kind.description(),
            earned: is_earned(kind, snapshot),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earned(snapshot: &EngagementSnapshot, kind: BadgeKind) -> bool {
        evaluate_badges(snapshot)
            .into_iter()
            .find(|badge| badge.kind == kind)
            .map(|badge| badge.earned)
            .unwrap_or(false)
    }

    #[test]
    fn badges_come_back_in_fixed_order() {
        let names: Vec<&str> = evaluate_badges(&EngagementSnapshot::default())
            .iter()
            .map(|badge| badge.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Every 5 Stories",
                "7-Day Streak",
                "Category Explorer",
                "Collector",
                "Community Member"
            ]
        );
    }

    #[test]
    fn five_stories_boundary() {
        let four = EngagementSnapshot {
            stories_read: 4,
            ..Default::default()
        };
        let five = EngagementSnapshot {
            stories_read: 5,
            ..Default::default()
        };
        assert!(!earned(&four, BadgeKind::EveryFiveStories));
        assert!(earned(&five, BadgeKind::EveryFiveStories));
    }

    #[test]
    fn streak_and_saved_thresholds() {
        let snapshot = EngagementSnapshot {
            streak: 6,
            saved: 9,
            ..Default::default()
        };
        assert!(!earned(&snapshot, BadgeKind::WeekStreak));
        assert!(!earned(&snapshot, BadgeKind::Collector));

        let snapshot = EngagementSnapshot {
            streak: 7,
            saved: 10,
            ..Default::default()
        };
        assert!(earned(&snapshot, BadgeKind::WeekStreak));
        assert!(earned(&snapshot, BadgeKind::Collector));
    }

    #[test]
    fn explorer_needs_every_category_and_at_least_one() {
        let none = EngagementSnapshot::default();
        assert!(!earned(&none, BadgeKind::CategoryExplorer));

        let partial = EngagementSnapshot {
            categories_explored: 3,
            total_categories: 4,
            ..Default::default()
        };
        assert!(!earned(&partial, BadgeKind::CategoryExplorer));

        let all = EngagementSnapshot {
            categories_explored: 4,
            total_categories: 4,
            ..Default::default()
        };
        assert!(earned(&all, BadgeKind::CategoryExplorer));
    }

    #[test]
    fn community_member_follows_explicit_flag_only() {
        let busy = EngagementSnapshot {
            stories_read: 50,
            categories_explored: 6,
            total_categories: 6,
            streak: 30,
            saved: 40,
            shared_first_story: false,
        };
        assert!(!earned(&busy, BadgeKind::CommunityMember));

        let shared = EngagementSnapshot {
            shared_first_story: true,
            ..Default::default()
        };
        assert!(earned(&shared, BadgeKind::CommunityMember));
    }
}
