use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(Frequency::Daily),
            "weekly" | "week" => Some(Frequency::Weekly),
            _ => None,
        }
    }

    // weeks start on Monday, so Sunday -> Monday is one period
    pub fn periods_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        match self {
            Frequency::Daily => (to - from).num_days(),
            Frequency::Weekly => (week_start(to) - week_start(from)).num_days() / 7,
        }
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn update_streak(
    last_completed: Option<NaiveDate>,
    streak_count: u32,
    best_streak: u32,
    completion_date: NaiveDate,
) -> (u32, u32) {
    update_streak_for(
        Frequency::Daily,
        last_completed,
        streak_count,
        best_streak,
        completion_date,
    )
}

pub fn update_streak_for(
    frequency: Frequency,
    last_completed: Option<NaiveDate>,
    streak_count: u32,
    best_streak: u32,
    completion_date: NaiveDate,
) -> (u32, u32) {
    let new_streak = match last_completed {
        None => 1,
        Some(last) => match frequency.periods_between(last, completion_date) {
            1 => streak_count.saturating_add(1),
            gap if gap > 1 => 1,
            _ => streak_count,
        },
    };

    (new_streak, best_streak.max(new_streak))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    None,
    Short,
    Medium,
    Long,
}

impl StreakTier {
    pub fn from_count(streak_count: u32) -> Self {
        match streak_count {
            0 => StreakTier::None,
            1..=6 => StreakTier::Short,
            7..=29 => StreakTier::Medium,
            _ => StreakTier::Long,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            StreakTier::None => "⭕",
            StreakTier::Short => "🔥",
            StreakTier::Medium => "💪",
            StreakTier::Long => "🏆",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Celebration {
    First,
    Week,
    Month,
    Hundred,
    PersonalBest,
    Normal,
}

impl Celebration {
    pub fn classify(streak_count: u32, best_streak: u32) -> Self {
        match streak_count {
            1 => Celebration::First,
            7 => Celebration::Week,
            30 => Celebration::Month,
            100 => Celebration::Hundred,
            count if count >= best_streak => Celebration::PersonalBest,
            _ => Celebration::Normal,
        }
    }
}
