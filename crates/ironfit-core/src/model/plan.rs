use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::new_id;

/// Common view over diet and workout plans, used by the plan listings.
pub trait Plan {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn customer_id(&self) -> &str;
    fn trainer_id(&self) -> &str;
    fn is_active(&self) -> bool;
    fn created_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub id: String,
    pub customer_id: String,
    pub trainer_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
    #[serde(default)]
    pub snacks: String,
    #[serde(default)]
    pub water_intake: String,
    #[serde(default)]
    pub supplements: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub calories_target: Option<u32>,
    #[serde(default)]
    pub protein_target: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl DietPlan {
    pub fn new(
        customer_id: String,
        trainer_id: String,
        input: DietPlanInput,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            customer_id,
            trainer_id,
            title: input.title.trim().to_string(),
            description: input.description,
            breakfast: input.breakfast,
            lunch: input.lunch,
            dinner: input.dinner,
            snacks: input.snacks,
            water_intake: input.water_intake,
            supplements: input.supplements,
            notes: input.notes,
            calories_target: input.calories_target,
            protein_target: input.protein_target,
            created_at: now,
            is_active: input.is_active,
        }
    }

    /// Whole-record edit: every field comes from `input` except the id,
    /// owners and creation time.
    pub fn revised(&self, input: DietPlanInput) -> Self {
        Self {
            id: self.id.clone(),
            ..Self::new(
                self.customer_id.clone(),
                self.trainer_id.clone(),
                input,
                self.created_at,
            )
        }
    }
}

impl Plan for DietPlan {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn customer_id(&self) -> &str {
        &self.customer_id
    }
    fn trainer_id(&self) -> &str {
        &self.trainer_id
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trainer-submitted diet plan fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
    #[serde(default)]
    pub snacks: String,
    #[serde(default)]
    pub water_intake: String,
    #[serde(default)]
    pub supplements: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub calories_target: Option<u32>,
    #[serde(default)]
    pub protein_target: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<&DietPlan> for DietPlanInput {
    fn from(p: &DietPlan) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            breakfast: p.breakfast.clone(),
            lunch: p.lunch.clone(),
            dinner: p.dinner.clone(),
            snacks: p.snacks.clone(),
            water_intake: p.water_intake.clone(),
            supplements: p.supplements.clone(),
            notes: p.notes.clone(),
            calories_target: p.calories_target,
            protein_target: p.protein_target,
            is_active: p.is_active,
        }
    }
}

impl DietPlanInput {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            breakfast: String::new(),
            lunch: String::new(),
            dinner: String::new(),
            snacks: String::new(),
            water_intake: String::new(),
            supplements: String::new(),
            notes: String::new(),
            calories_target: None,
            protein_target: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    pub customer_id: String,
    pub trainer_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl WorkoutPlan {
    pub fn new(
        customer_id: String,
        trainer_id: String,
        input: WorkoutPlanInput,
        now: DateTime<Utc>,
    ) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = input.days;
        Self {
            id: new_id(),
            customer_id,
            trainer_id,
            title: input.title.trim().to_string(),
            description: input.description,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
            duration_weeks: input.duration_weeks,
            created_at: now,
            is_active: input.is_active,
        }
    }

    pub fn revised(&self, input: WorkoutPlanInput) -> Self {
        Self {
            id: self.id.clone(),
            ..Self::new(
                self.customer_id.clone(),
                self.trainer_id.clone(),
                input,
                self.created_at,
            )
        }
    }

    /// Day schedule, Monday first.
    pub fn days(&self) -> [(&'static str, &str); 7] {
        [
            ("Monday", &self.monday),
            ("Tuesday", &self.tuesday),
            ("Wednesday", &self.wednesday),
            ("Thursday", &self.thursday),
            ("Friday", &self.friday),
            ("Saturday", &self.saturday),
            ("Sunday", &self.sunday),
        ]
    }
}

impl Plan for WorkoutPlan {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn customer_id(&self) -> &str {
        &self.customer_id
    }
    fn trainer_id(&self) -> &str {
        &self.trainer_id
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trainer-submitted workout plan fields. `days` is Monday first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub days: [String; 7],
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<&WorkoutPlan> for WorkoutPlanInput {
    fn from(p: &WorkoutPlan) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            days: [
                p.monday.clone(),
                p.tuesday.clone(),
                p.wednesday.clone(),
                p.thursday.clone(),
                p.friday.clone(),
                p.saturday.clone(),
                p.sunday.clone(),
            ],
            duration_weeks: p.duration_weeks,
            is_active: p.is_active,
        }
    }
}

impl WorkoutPlanInput {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            days: Default::default(),
            duration_weeks: default_duration_weeks(),
            is_active: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_duration_weeks() -> u32 {
    4
}
