use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bmi::{categorize_bmi, compute_bmi, BmiCategory};

/// Physical and contact details of a member. At most one per user; every
/// save replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub diseases: String,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Build the full record for `user_id` from submitted form data.
    pub fn from_input(user_id: impl Into<String>, input: ProfileInput, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            age: input.age,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            diseases: input.diseases.trim().to_string(),
            goal: input.goal,
            activity_level: input.activity_level,
            phone: input.phone.trim().to_string(),
            emergency_contact: input.emergency_contact.trim().to_string(),
            updated_at: Some(now),
        }
    }

    pub fn bmi(&self) -> Option<f64> {
        compute_bmi(self.weight_kg, self.height_cm)
    }

    pub fn bmi_category(&self) -> BmiCategory {
        categorize_bmi(self.bmi())
    }
}

/// Profile form data, without the owning user or timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub diseases: String,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub emergency_contact: String,
}

impl From<&Profile> for ProfileInput {
    fn from(p: &Profile) -> Self {
        Self {
            age: p.age,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            diseases: p.diseases.clone(),
            goal: p.goal,
            activity_level: p.activity_level,
            phone: p.phone.clone(),
            emergency_contact: p.emergency_contact.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    Maintain,
    Endurance,
    Strength,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::LoseWeight,
        Goal::GainMuscle,
        Goal::Maintain,
        Goal::Endurance,
        Goal::Strength,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose Weight",
            Self::GainMuscle => "Gain Muscle",
            Self::Maintain => "Maintain Weight",
            Self::Endurance => "Build Endurance",
            Self::Strength => "Build Strength",
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoseWeight => write!(f, "lose_weight"),
            Self::GainMuscle => write!(f, "gain_muscle"),
            Self::Maintain => write!(f, "maintain"),
            Self::Endurance => write!(f, "endurance"),
            Self::Strength => write!(f, "strength"),
        }
    }
}

impl std::str::FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lose_weight" => Ok(Self::LoseWeight),
            "gain_muscle" => Ok(Self::GainMuscle),
            "maintain" => Ok(Self::Maintain),
            "endurance" => Ok(Self::Endurance),
            "strength" => Ok(Self::Strength),
            _ => Err(format!("unknown goal: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (little to no exercise)",
            Self::LightlyActive => "Lightly Active (light exercise 1-3 days/week)",
            Self::ModeratelyActive => "Moderately Active (moderate exercise 3-5 days/week)",
            Self::VeryActive => "Very Active (hard exercise 6-7 days/week)",
            Self::ExtremelyActive => "Extremely Active (very hard exercise, physical job)",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sedentary => write!(f, "sedentary"),
            Self::LightlyActive => write!(f, "lightly_active"),
            Self::ModeratelyActive => write!(f, "moderately_active"),
            Self::VeryActive => write!(f, "very_active"),
            Self::ExtremelyActive => write!(f, "extremely_active"),
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "lightly_active" => Ok(Self::LightlyActive),
            "moderately_active" => Ok(Self::ModeratelyActive),
            "very_active" => Ok(Self::VeryActive),
            "extremely_active" => Ok(Self::ExtremelyActive),
            _ => Err(format!("unknown activity level: {s}")),
        }
    }
}
