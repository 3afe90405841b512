//! Dashboard counters.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{DietPlan, Plan};
use crate::storage::Store;

/// Landing-page totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub total_customers: usize,
    pub total_trainers: usize,
    pub total_diet_plans: usize,
}

/// Counters for one trainer's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerStats {
    pub total_customers: usize,
    pub active_diet_plans: usize,
    pub active_workout_plans: usize,
}

/// Diet plans listed on a trainer's dashboard.
pub const RECENT_DIET_PLANS_LIMIT: usize = 5;

/// Trainer counters plus the trainer's latest diet plans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerDashboard {
    #[serde(flatten)]
    pub stats: TrainerStats,
    pub recent_diet_plans: Vec<DietPlan>,
}

/// Users by role, plus active diet plans.
pub fn home_stats(store: &Store) -> Result<HomeStats> {
    let users = store.users();
    Ok(HomeStats {
        total_customers: users.customers()?.len(),
        total_trainers: users.trainers()?.len(),
        total_diet_plans: store
            .plans()
            .diet_plans()?
            .iter()
            .filter(|p| p.is_active())
            .count(),
    })
}

/// `total_customers` counts every customer in the gym, not just the
/// trainer's own clients.
pub fn trainer_stats(store: &Store, trainer_id: &str) -> Result<TrainerStats> {
    let active = store.plans().active_for_trainer(trainer_id)?;
    Ok(TrainerStats {
        total_customers: store.users().customers()?.len(),
        active_diet_plans: active.diet_plans.len(),
        active_workout_plans: active.workout_plans.len(),
    })
}

pub fn trainer_dashboard(store: &Store, trainer_id: &str) -> Result<TrainerDashboard> {
    Ok(TrainerDashboard {
        stats: trainer_stats(store, trainer_id)?,
        recent_diet_plans: store
            .plans()
            .recent_diet_plans_by_trainer(trainer_id, RECENT_DIET_PLANS_LIMIT)?,
    })
}
