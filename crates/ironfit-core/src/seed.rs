//! Demonstration dataset, written once per store lifetime.
//!
//! The `MockDataSeeded` sentinel guards the whole operation: once it is set,
//! seeding is a no-op even if the seeded collections were later emptied.

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::model::{
    ActivityLevel, DietPlan, Goal, Profile, ProgressRecord, Role, User,
};
use crate::storage::{Key, Store};

pub const TRAINER_JOHN: &str = "trainer1";
pub const TRAINER_SARAH: &str = "trainer2";
pub const CUSTOMER_MIKE: &str = "customer1";

/// Seed the store unless the sentinel is already set. Returns `true` when
/// data was written.
pub fn seed_if_empty(store: &Store) -> Result<bool> {
    seed_if_empty_at(store, Utc::now())
}

/// Deterministic form of [`seed_if_empty`]: progress dates and timestamps
/// are derived from `now`.
pub fn seed_if_empty_at(store: &Store, now: DateTime<Utc>) -> Result<bool> {
    if store.read_flag(Key::MockDataSeeded)? {
        tracing::debug!("seed sentinel set, skipping");
        return Ok(false);
    }

    let dataset = SeedData::build(now);
    store.write_collection(Key::Users, &dataset.users)?;
    store.write_collection(Key::Profiles, &dataset.profiles)?;
    store.write_collection(Key::DietPlans, &dataset.diet_plans)?;
    store.write_collection(Key::ProgressRecords, &dataset.progress)?;
    store.write_flag(Key::MockDataSeeded, true)?;

    tracing::info!(
        "seeded {} users, {} profiles, {} diet plans, {} progress records",
        dataset.users.len(),
        dataset.profiles.len(),
        dataset.diet_plans.len(),
        dataset.progress.len()
    );
    Ok(true)
}

/// The fixed demonstration records.
pub struct SeedData {
    pub users: Vec<User>,
    pub profiles: Vec<Profile>,
    pub diet_plans: Vec<DietPlan>,
    pub progress: Vec<ProgressRecord>,
}

impl SeedData {
    pub fn build(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let week_ago = (now - Duration::days(7)).date_naive();

        let users = vec![
            User {
                id: TRAINER_JOHN.into(),
                username: "john_trainer".into(),
                email: "john@gym.com".into(),
                first_name: "John".into(),
                last_name: "Smith".into(),
                role: Role::Trainer {
                    specialization: "Strength & Conditioning".into(),
                    experience: "8 years".into(),
                },
            },
            User {
                id: TRAINER_SARAH.into(),
                username: "sarah_trainer".into(),
                email: "sarah@gym.com".into(),
                first_name: "Sarah".into(),
                last_name: "Johnson".into(),
                role: Role::Trainer {
                    specialization: "Nutrition & Weight Loss".into(),
                    experience: "5 years".into(),
                },
            },
            User {
                id: CUSTOMER_MIKE.into(),
                username: "mike_customer".into(),
                email: "mike@email.com".into(),
                first_name: "Mike".into(),
                last_name: "Wilson".into(),
                role: Role::Customer,
            },
        ];

        let profiles = vec![Profile {
            user_id: CUSTOMER_MIKE.into(),
            age: Some(28),
            height_cm: Some(175.0),
            weight_kg: Some(80.0),
            diseases: "None".into(),
            goal: Some(Goal::GainMuscle),
            activity_level: Some(ActivityLevel::ModeratelyActive),
            phone: "+1234567890".into(),
            emergency_contact: "Jane Wilson +1234567891".into(),
            updated_at: Some(now),
        }];

        let diet_plans = vec![DietPlan {
            id: "diet1".into(),
            customer_id: CUSTOMER_MIKE.into(),
            trainer_id: TRAINER_JOHN.into(),
            title: "Muscle Building Diet Plan".into(),
            description: "High protein diet for muscle gain".into(),
            breakfast: "Oatmeal with banana and protein powder, 2 eggs".into(),
            lunch: "Grilled chicken breast with quinoa and vegetables".into(),
            dinner: "Salmon with sweet potato and broccoli".into(),
            snacks: "Greek yogurt, nuts, protein shake".into(),
            water_intake: "3-4 liters".into(),
            supplements: "Whey protein, Creatine, Multivitamin".into(),
            notes: "Eat every 3-4 hours, focus on lean proteins".into(),
            calories_target: Some(2800),
            protein_target: Some(150),
            created_at: now,
            is_active: true,
        }];

        let progress = vec![
            ProgressRecord {
                id: "progress1".into(),
                customer_id: CUSTOMER_MIKE.into(),
                weight_kg: 80.0,
                date: today,
                notes: "Feeling strong, good energy levels".into(),
                photo: None,
                created_at: now,
            },
            ProgressRecord {
                id: "progress2".into(),
                customer_id: CUSTOMER_MIKE.into(),
                weight_kg: 79.5,
                date: week_ago,
                notes: "Lost some weight, need to increase calories".into(),
                photo: None,
                created_at: now - Duration::days(7),
            },
        ];

        Self {
            users,
            profiles,
            diet_plans,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn counts(store: &Store) -> [usize; 4] {
        [
            store.count(Key::Users).unwrap(),
            store.count(Key::Profiles).unwrap(),
            store.count(Key::DietPlans).unwrap(),
            store.count(Key::ProgressRecords).unwrap(),
        ]
    }

    #[test]
    fn test_seed_populates_once() {
        let store = Store::in_memory();
        assert!(seed_if_empty(&store).unwrap());
        assert_eq!(counts(&store), [3, 1, 1, 2]);
        assert!(store.read_flag(Key::MockDataSeeded).unwrap());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = Store::in_memory();
        seed_if_empty(&store).unwrap();
        let first = counts(&store);

        assert!(!seed_if_empty(&store).unwrap());
        assert_eq!(counts(&store), first);
    }

    #[test]
    fn test_sentinel_blocks_reseed_after_wipe() {
        let store = Store::in_memory();
        seed_if_empty(&store).unwrap();
        store.clear(Key::ProgressRecords).unwrap();

        assert!(!seed_if_empty(&store).unwrap());
        assert_eq!(store.count(Key::ProgressRecords).unwrap(), 0);
    }

    #[test]
    fn test_seed_dates_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap();
        let data = SeedData::build(now);
        assert_eq!(data.progress[0].date.to_string(), "2024-01-08");
        assert_eq!(data.progress[1].date.to_string(), "2024-01-01");
    }

    #[test]
    fn test_seeded_records_read_back_typed() {
        let store = Store::in_memory();
        seed_if_empty(&store).unwrap();
        let mike = store.users().find_by_username("mike_customer").unwrap().unwrap();
        assert!(mike.is_customer());
        let profile = store.profiles().get(&mike.id).unwrap().unwrap();
        assert_eq!(profile.bmi(), Some(26.12));
        let plans = store.plans().active_for_customer(&mike.id).unwrap();
        assert_eq!(plans.diet_plans.len(), 1);
        assert!(plans.workout_plans.is_empty());
    }
}
