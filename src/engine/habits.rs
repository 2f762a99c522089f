use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

pub const MAX_HISTORY_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy)]
pub struct HabitSnapshot {
    pub streak_count: u32,
    pub best_streak: u32,
    pub completed_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStats {
    pub total_habits: usize,
    pub completed_today: usize,
    pub pending_today: usize,
    pub completion_rate_today: f64,
    pub avg_streak: f64,
    pub best_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub completed: bool,
}

pub fn summarize(habits: &[HabitSnapshot]) -> HabitStats {
    if habits.is_empty() {
        return HabitStats {
            total_habits: 0,
            completed_today: 0,
            pending_today: 0,
            completion_rate_today: 0.0,
            avg_streak: 0.0,
            best_streak: 0,
        };
    }

    let total = habits.len();
    let completed = habits.iter().filter(|habit| habit.completed_today).count();
    let streak_sum = habits
        .iter()
        .map(|habit| u64::from(habit.streak_count))
        .sum::<u64>();

    HabitStats {
        total_habits: total,
        completed_today: completed,
        pending_today: total - completed,
        completion_rate_today: completed as f64 / total as f64 * 100.0,
        avg_streak: round_one_decimal(streak_sum as f64 / total as f64),
        best_streak: habits
            .iter()
            .map(|habit| habit.best_streak)
            .max()
            .unwrap_or_default(),
    }
}

// oldest first
pub fn completion_history(
    completed_dates: &[NaiveDate],
    today: NaiveDate,
    days: u32,
) -> Vec<HistoryDay> {
    let completed = completed_dates.iter().copied().collect::<HashSet<_>>();

    (0..i64::from(days))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .map(|date| HistoryDay {
            date,
            completed: completed.contains(&date),
        })
        .collect()
}

pub fn completion_rate(history: &[HistoryDay]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let completed = history.iter().filter(|day| day.completed).count();
    completed as f64 / history.len() as f64 * 100.0
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(streak_count: u32, best_streak: u32, completed_today: bool) -> HabitSnapshot {
        HabitSnapshot {
            streak_count,
            best_streak,
            completed_today,
        }
    }

    #[test]
    fn empty_habit_list_yields_zeroes() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_habits, 0);
        assert_eq!(stats.completion_rate_today, 0.0);
        assert_eq!(stats.best_streak, 0);
    }

    #[test]
    fn stats_over_active_habits() {
        let stats = summarize(&[
            snapshot(3, 5, true),
            snapshot(0, 12, false),
            snapshot(1, 1, true),
            snapshot(7, 7, false),
        ]);

        assert_eq!(stats.total_habits, 4);
        assert_eq!(stats.completed_today, 2);
        assert_eq!(stats.pending_today, 2);
        assert_eq!(stats.completion_rate_today, 50.0);
        assert_eq!(stats.avg_streak, 2.8);
        assert_eq!(stats.best_streak, 12);
    }

    #[test]
    fn history_is_oldest_first_and_marks_completions() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).expect("valid date");
        let completed = [today, today - Duration::days(2), today - Duration::days(40)];

        let history = completion_history(&completed, today, 5);

        assert_eq!(history.len(), 5);
        assert_eq!(history[0].date, today - Duration::days(4));
        assert_eq!(history[4].date, today);
        assert_eq!(
            history.iter().map(|day| day.completed).collect::<Vec<_>>(),
            vec![false, false, true, false, true]
        );
        assert_eq!(completion_rate(&history), 40.0);
        assert_eq!(completion_rate(&[]), 0.0);
    }
}
