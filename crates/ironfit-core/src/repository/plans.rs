use serde::{Deserialize, Serialize};

use crate::error::{IronfitError, Result};
use crate::model::{DietPlan, Plan, WorkoutPlan};
use crate::storage::{Key, Store};

/// Active diet and workout plans for one customer or trainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlans {
    pub diet_plans: Vec<DietPlan>,
    pub workout_plans: Vec<WorkoutPlan>,
}

impl ActivePlans {
    pub fn is_empty(&self) -> bool {
        self.diet_plans.is_empty() && self.workout_plans.is_empty()
    }
}

pub struct Plans<'a> {
    store: &'a Store,
}

impl<'a> Plans<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    // -- Diet plans --

    pub fn diet_plans(&self) -> Result<Vec<DietPlan>> {
        self.store.read_collection(Key::DietPlans)
    }

    pub fn find_diet_plan(&self, id: &str) -> Result<Option<DietPlan>> {
        Ok(self.diet_plans()?.into_iter().find(|p| p.id == id))
    }

    pub fn create_diet_plan(&self, plan: DietPlan) -> Result<DietPlan> {
        self.store.append_record(Key::DietPlans, &plan)?;
        tracing::info!(
            "trainer {} created diet plan '{}' for {}",
            plan.trainer_id,
            plan.title,
            plan.customer_id
        );
        Ok(plan)
    }

    // -- Workout plans --

    pub fn workout_plans(&self) -> Result<Vec<WorkoutPlan>> {
        self.store.read_collection(Key::WorkoutPlans)
    }

    pub fn find_workout_plan(&self, id: &str) -> Result<Option<WorkoutPlan>> {
        Ok(self.workout_plans()?.into_iter().find(|p| p.id == id))
    }

    pub fn create_workout_plan(&self, plan: WorkoutPlan) -> Result<WorkoutPlan> {
        self.store.append_record(Key::WorkoutPlans, &plan)?;
        tracing::info!(
            "trainer {} created workout plan '{}' for {}",
            plan.trainer_id,
            plan.title,
            plan.customer_id
        );
        Ok(plan)
    }

    /// Replace the stored plan with the same id.
    pub fn update_diet_plan(&self, plan: &DietPlan) -> Result<()> {
        if !self
            .store
            .replace_first(Key::DietPlans, |p: &DietPlan| p.id == plan.id, plan)?
        {
            return Err(IronfitError::NotFound(format!("diet plan {}", plan.id)));
        }
        tracing::info!("updated diet plan '{}' ({})", plan.title, plan.id);
        Ok(())
    }

    pub fn update_workout_plan(&self, plan: &WorkoutPlan) -> Result<()> {
        if !self
            .store
            .replace_first(Key::WorkoutPlans, |p: &WorkoutPlan| p.id == plan.id, plan)?
        {
            return Err(IronfitError::NotFound(format!("workout plan {}", plan.id)));
        }
        tracing::info!("updated workout plan '{}' ({})", plan.title, plan.id);
        Ok(())
    }

    // -- Listings --

    pub fn active_for_customer(&self, customer_id: &str) -> Result<ActivePlans> {
        Ok(ActivePlans {
            diet_plans: active_where(self.diet_plans()?, |p| p.customer_id() == customer_id),
            workout_plans: active_where(self.workout_plans()?, |p| {
                p.customer_id() == customer_id
            }),
        })
    }

    pub fn active_for_trainer(&self, trainer_id: &str) -> Result<ActivePlans> {
        Ok(ActivePlans {
            diet_plans: active_where(self.diet_plans()?, |p| p.trainer_id() == trainer_id),
            workout_plans: active_where(self.workout_plans()?, |p| p.trainer_id() == trainer_id),
        })
    }

    /// Every plan ever authored for `customer_id`, active or not, newest first.
    pub fn all_for_customer(&self, customer_id: &str) -> Result<ActivePlans> {
        let mut diet_plans: Vec<DietPlan> = self
            .diet_plans()?
            .into_iter()
            .filter(|p| p.customer_id == customer_id)
            .collect();
        let mut workout_plans: Vec<WorkoutPlan> = self
            .workout_plans()?
            .into_iter()
            .filter(|p| p.customer_id == customer_id)
            .collect();
        newest_first(&mut diet_plans);
        newest_first(&mut workout_plans);
        Ok(ActivePlans {
            diet_plans,
            workout_plans,
        })
    }

    /// Diet plans authored by `trainer_id`, newest first, active or not.
    pub fn recent_diet_plans_by_trainer(&self, trainer_id: &str, limit: usize) -> Result<Vec<DietPlan>> {
        let mut plans: Vec<DietPlan> = self
            .diet_plans()?
            .into_iter()
            .filter(|p| p.trainer_id == trainer_id)
            .collect();
        newest_first(&mut plans);
        plans.truncate(limit);
        Ok(plans)
    }
}

fn active_where<P: Plan>(plans: Vec<P>, pred: impl Fn(&P) -> bool) -> Vec<P> {
    plans.into_iter().filter(|p| p.is_active() && pred(p)).collect()
}

fn newest_first<P: Plan>(plans: &mut [P]) {
    plans.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}
