use chrono::{Duration, NaiveDate};

use crate::models::ReadEvent;

/// Distinct UTC calendar days with at least one read, most recent first.
pub fn distinct_days(events: &[ReadEvent]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = events
        .iter()
        .map(|event| event.created_at.date_naive())
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    days
}

pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Length of the unbroken run of days ending at `today`.
///
/// `days` must be distinct and sorted descending, as returned by
/// [`distinct_days`]. A run whose newest day is not `today` is already
/// broken and counts as zero.
pub fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some((&newest, rest)) = days.split_first() else {
        return 0;
    };

    if newest != today {
        return 0;
    }

    let mut streak = 1;
    let mut previous = newest;

    for &day in rest {
        if previous - day != Duration::days(1) {
            break;
        }
        streak += 1;
        previous = day;
    }

    streak
}

pub fn streak_for(events: &[ReadEvent], today: NaiveDate) -> u32 {
    current_streak(&distinct_days(events), today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn read_on(day: NaiveDate, hour: u32) -> ReadEvent {
        ReadEvent {
            story_id: 1,
            created_at: Utc.from_utc_datetime(&day.and_hms_opt(hour, 15, 0).unwrap()),
        }
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn empty_log_has_no_days_and_no_streak() {
        assert!(distinct_days(&[]).is_empty());
        assert_eq!(streak_for(&[], today()), 0);
    }

    #[test]
    fn same_day_reads_collapse() {
        let events = vec![
            read_on(today(), 9),
            read_on(today(), 9),
            read_on(today(), 22),
            read_on(days_ago(1), 7),
        ];
        assert_eq!(distinct_days(&events), vec![today(), days_ago(1)]);
    }

    #[test]
    fn days_sorted_most_recent_first_regardless_of_arrival() {
        let events = vec![
            read_on(days_ago(3), 1),
            read_on(today(), 1),
            read_on(days_ago(1), 1),
        ];
        assert_eq!(
            distinct_days(&events),
            vec![today(), days_ago(1), days_ago(3)]
        );
    }

    #[test]
    fn gap_truncates_streak() {
        let events = vec![
            read_on(today(), 8),
            read_on(days_ago(1), 8),
            read_on(days_ago(2), 8),
            read_on(days_ago(4), 8),
            read_on(days_ago(5), 8),
        ];
        assert_eq!(streak_for(&events, today()), 3);
    }

    #[test]
    fn streak_is_dead_when_newest_read_is_yesterday() {
        let events = vec![read_on(days_ago(1), 8), read_on(days_ago(2), 8)];
        assert_eq!(streak_for(&events, today()), 0);
    }

    #[test]
    fn consecutive_days_ending_today_count_fully() {
        let events: Vec<ReadEvent> = (0..7).map(|n| read_on(days_ago(n), 12)).collect();
        assert_eq!(streak_for(&events, today()), 7);
    }

    #[test]
    fn single_read_today_is_a_streak_of_one() {
        assert_eq!(streak_for(&[read_on(today(), 0)], today()), 1);
    }

    #[test]
    fn day_boundary_is_utc() {
        let late = ReadEvent {
            story_id: 2,
            created_at: Utc.with_ymd_and_hms(2026, 3, 13, 23, 59, 59).unwrap(),
        };
        assert_eq!(distinct_days(&[late]), vec![days_ago(1)]);
    }

    #[test]
    fn day_key_is_sortable() {
        assert_eq!(day_key(today()), "2026-03-14");
        assert!(day_key(days_ago(5)) < day_key(today()));
    }
}
