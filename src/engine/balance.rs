use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;
const RANKED_AREAS: usize = 3;
const IMPROVEMENT_THRESHOLD: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeArea {
    Career,
    Health,
    Relationships,
    Finance,
    PersonalGrowth,
    FunRecreation,
    Environment,
    Purpose,
}

impl LifeArea {
    pub const ALL: [LifeArea; 8] = [
        LifeArea::Career,
        LifeArea::Health,
        LifeArea::Relationships,
        LifeArea::Finance,
        LifeArea::PersonalGrowth,
        LifeArea::FunRecreation,
        LifeArea::Environment,
        LifeArea::Purpose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifeArea::Career => "career",
            LifeArea::Health => "health",
            LifeArea::Relationships => "relationships",
            LifeArea::Finance => "finance",
            LifeArea::PersonalGrowth => "personal_growth",
            LifeArea::FunRecreation => "fun_recreation",
            LifeArea::Environment => "environment",
            LifeArea::Purpose => "purpose",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifeArea::Career => "Career",
            LifeArea::Health => "Health",
            LifeArea::Relationships => "Relationships",
            LifeArea::Finance => "Finance",
            LifeArea::PersonalGrowth => "Personal Growth",
            LifeArea::FunRecreation => "Fun & Recreation",
            LifeArea::Environment => "Environment",
            LifeArea::Purpose => "Purpose",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "career" => Some(LifeArea::Career),
            "health" => Some(LifeArea::Health),
            "relationships" => Some(LifeArea::Relationships),
            "finance" | "money" => Some(LifeArea::Finance),
            "personal_growth" | "growth" => Some(LifeArea::PersonalGrowth),
            "fun_recreation" | "fun" => Some(LifeArea::FunRecreation),
            "environment" => Some(LifeArea::Environment),
            "purpose" => Some(LifeArea::Purpose),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaScores {
    scores: [u8; 8],
}

impl AreaScores {
    // `LifeArea::ALL` order
    pub fn new(raw: [i64; 8]) -> Result<Self, CoreError> {
        let mut scores = [0_u8; 8];
        for (area, value) in LifeArea::ALL.iter().zip(raw) {
            scores[area.index()] = validate_score(*area, value)?;
        }

        Ok(Self { scores })
    }

    // every area exactly once
    pub fn from_pairs(pairs: impl IntoIterator<Item = (LifeArea, i64)>) -> Result<Self, CoreError> {
        let mut provided = BTreeMap::new();
        for (area, score) in pairs {
            if provided.insert(area, score).is_some() {
                return Err(CoreError::InvalidValue {
                    field: "life area score",
                    value: format!("{} given more than once", area.as_str()),
                });
            }
        }

        let mut raw = [0_i64; 8];
        for area in LifeArea::ALL {
            raw[area.index()] = *provided.get(&area).ok_or_else(|| CoreError::InvalidValue {
                field: "life area score",
                value: format!("{} is missing", area.as_str()),
            })?;
        }

        Self::new(raw)
    }

    pub fn get(&self, area: LifeArea) -> u8 {
        self.scores[area.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifeArea, u8)> + '_ {
        LifeArea::ALL.iter().map(|area| (*area, self.get(*area)))
    }
}

fn validate_score(area: LifeArea, value: i64) -> Result<u8, CoreError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(value as u8)
    } else {
        Err(CoreError::InvalidScoreRange {
            area: area.as_str().to_string(),
            score: value,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaScore {
    pub area: LifeArea,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub overall_balance: f64,
    pub lowest_areas: Vec<AreaScore>,
    pub highest_areas: Vec<AreaScore>,
    pub all_scores: BTreeMap<LifeArea, u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Moderate,
}

impl Priority {
    fn for_score(score: u8) -> Self {
        match score {
            0..=2 => Priority::Critical,
            3 => Priority::High,
            _ => Priority::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Moderate => "moderate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImprovementArea {
    pub area: LifeArea,
    pub score: u8,
    pub priority: Priority,
}

pub fn calculate_balance(scores: &AreaScores) -> BalanceReport {
    let total = scores.iter().map(|(_, score)| u32::from(score)).sum::<u32>();
    let mean = f64::from(total) / LifeArea::ALL.len() as f64;

    let ranked = ranked_ascending(scores);
    let highest_start = ranked.len().saturating_sub(RANKED_AREAS);

    BalanceReport {
        overall_balance: (mean * 10.0).round() / 10.0,
        lowest_areas: ranked.iter().take(RANKED_AREAS).copied().collect(),
        highest_areas: ranked[highest_start..].to_vec(),
        all_scores: scores.iter().collect(),
    }
}

pub fn get_improvement_areas(scores: &AreaScores) -> Vec<ImprovementArea> {
    ranked_ascending(scores)
        .into_iter()
        .filter(|entry| entry.score < IMPROVEMENT_THRESHOLD)
        .map(|entry| ImprovementArea {
            area: entry.area,
            score: entry.score,
            priority: Priority::for_score(entry.score),
        })
        .collect()
}

// stable sort keeps input order on ties
fn ranked_ascending(scores: &AreaScores) -> Vec<AreaScore> {
    let mut ranked = scores
        .iter()
        .map(|(area, score)| AreaScore { area, score })
        .collect::<Vec<_>>();
    ranked.sort_by_key(|entry| entry.score);
    ranked
}
