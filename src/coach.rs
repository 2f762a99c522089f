use crate::engine::streak::Celebration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Sage,
    Champion,
    #[default]
    Friend,
    Strategist,
    ZenMaster,
}

impl Personality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Sage => "sage",
            Personality::Champion => "champion",
            Personality::Friend => "friend",
            Personality::Strategist => "strategist",
            Personality::ZenMaster => "zen_master",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "sage" => Some(Personality::Sage),
            "champion" => Some(Personality::Champion),
            "friend" => Some(Personality::Friend),
            "strategist" => Some(Personality::Strategist),
            "zen_master" | "zen" => Some(Personality::ZenMaster),
            _ => None,
        }
    }

    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalEvent {
    Created,
    Completed,
    Progress,
}

pub fn goal_message(personality: Personality, event: GoalEvent) -> &'static str {
    use GoalEvent::{Completed, Created, Progress};
    use Personality::{Champion, Friend, Sage, Strategist, ZenMaster};

    match (personality, event) {
        (Sage, Created) => {
            "A wise goal set. Remember, the journey of a thousand miles begins with one step."
        }
        (Sage, Completed) => {
            "Your perseverance has borne fruit. What wisdom will you carry forward?"
        }
        (Sage, Progress) => "Steady progress is the mark of wisdom. Continue with mindful intention.",
        (Champion, Created) => "Yes! Another goal to conquer! You've got this! 🏆",
        (Champion, Completed) => "VICTORY! You absolutely crushed this goal! Time to celebrate! 🎉",
        (Champion, Progress) => "Look at that progress! You're unstoppable! Keep pushing forward!",
        (Friend, Created) => {
            "I'm here to support you with this new goal. We'll work through it together."
        }
        (Friend, Completed) => {
            "I'm so proud of you for completing this goal! You should be proud too."
        }
        (Friend, Progress) => {
            "You're doing great! Remember, progress isn't always linear, and that's okay."
        }
        (Strategist, Created) => "Goal established. Let's break this down into actionable steps.",
        (Strategist, Completed) => {
            "Objective achieved. Let's analyze what worked and optimize for next time."
        }
        (Strategist, Progress) => "Progress data looks good. Consider where the next step can be smaller.",
        (ZenMaster, Created) => {
            "A new intention is set. Let it flow naturally into your daily practice."
        }
        (ZenMaster, Completed) => {
            "Completion brings not ending, but transformation. What emerges next?"
        }
        (ZenMaster, Progress) => {
            "Progress flows like water - sometimes fast, sometimes slow, always forward."
        }
    }
}

pub fn celebration_message(celebration: Celebration, streak_count: u32) -> String {
    match celebration {
        Celebration::First => "First check-in done. Every streak starts here.".to_string(),
        Celebration::Week => "One full week in a row!".to_string(),
        Celebration::Month => "30 days straight. This is a habit now.".to_string(),
        Celebration::Hundred => "100 in a row. Legendary.".to_string(),
        Celebration::PersonalBest => format!("New personal best: {streak_count} in a row!"),
        Celebration::Normal => format!("Nice work. Streak: {streak_count}"),
    }
}
