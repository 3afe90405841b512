//! Authentication state machine over the store.
//!
//! One [`SessionManager`] owns the current identity. Consumers borrow it
//! instead of reaching for ambient state. The persisted form lives under
//! [`Key::Session`] so a fresh process can pick up where the last one left
//! off.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::IronfitConfig;
use crate::error::{IronfitError, Result};
use crate::model::{
    Credentials, DietPlan, DietPlanInput, Profile, ProfileInput, ProgressInput, ProgressRecord,
    Role, SessionRecord, User, WorkoutPlan, WorkoutPlanInput,
};
use crate::repository::ActivePlans;
use crate::storage::{Key, Store};
use crate::validation::{
    validate_diet_plan, validate_profile, validate_progress, validate_workout_plan, SignupForm,
    ValidationErrors,
};

/// Progress entries shown on a trainer's view of one customer.
pub const CUSTOMER_DETAIL_PROGRESS_LIMIT: usize = 10;

/// Where the manager stands. `Unresolved` only exists between
/// construction and [`SessionManager::restore`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Unresolved,
    Authenticated(SessionRecord),
    Anonymous,
}

/// Everything a trainer sees about one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub customer: User,
    pub profile: Option<Profile>,
    /// Every plan, active or not, newest first.
    pub plans: ActivePlans,
    pub recent_progress: Vec<ProgressRecord>,
}

pub struct SessionManager<'a> {
    store: &'a Store,
    wipe_on_logout: bool,
    state: AuthState,
}

impl<'a> SessionManager<'a> {
    pub fn new(store: &'a Store, config: &IronfitConfig) -> Self {
        Self {
            store,
            wipe_on_logout: config.session.wipe_on_logout,
            state: AuthState::Unresolved,
        }
    }

    /// Construct and restore in one step.
    pub fn open(store: &'a Store, config: &IronfitConfig) -> Result<Self> {
        let mut manager = Self::new(store, config);
        manager.restore()?;
        Ok(manager)
    }

    /// Resolve the state from the persisted session. A corrupt record is
    /// removed and treated as logged out.
    pub fn restore(&mut self) -> Result<&AuthState> {
        self.state = match self.store.read_record::<SessionRecord>(Key::Session) {
            Ok(Some(record)) => {
                tracing::debug!("restored session for {}", record.user.username);
                AuthState::Authenticated(record)
            }
            Ok(None) => AuthState::Anonymous,
            Err(IronfitError::StorageParse { key, reason }) => {
                tracing::warn!("discarding corrupt session under '{key}': {reason}");
                self.store.clear(Key::Session)?;
                AuthState::Anonymous
            }
            Err(e) => return Err(e),
        };
        Ok(&self.state)
    }

    // -- Actions --

    /// Sign in by username. Any non-empty password is accepted for a known
    /// user; there is no credential store to check against.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&SessionRecord> {
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(IronfitError::InvalidCredentials);
        }
        let Some(user) = self.store.users().find_by_username(username)? else {
            tracing::debug!("login failed for unknown user");
            return Err(IronfitError::InvalidCredentials);
        };
        self.establish(user)
    }

    /// Create the account and sign it straight in.
    pub fn signup(&mut self, form: &SignupForm) -> Result<&SessionRecord> {
        let user = self.store.users().register(form)?;
        self.establish(user)
    }

    /// Drop the session. With `wipe_on_logout` the profile, plan and
    /// progress collections are emptied for every user. The wipe only
    /// happens when someone was signed in.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear(Key::Session)?;
        match &self.state {
            AuthState::Authenticated(record) => {
                tracing::info!("logging out {}", record.user.username);
                if self.wipe_on_logout {
                    for key in Key::SESSION_SCOPED {
                        self.store.clear(key)?;
                    }
                }
            }
            AuthState::Unresolved | AuthState::Anonymous => {
                tracing::debug!("logout without a session, nothing to wipe");
            }
        }
        self.state = AuthState::Anonymous;
        Ok(())
    }

    /// Replace the current user's profile in both the session and the
    /// Profiles collection. The two writes are sequential, not atomic.
    pub fn update_profile(&mut self, input: ProfileInput) -> Result<&Profile> {
        validate_profile(&input).into_result()?;
        let record = self.record_mut()?;
        let profile = Profile::from_input(record.user.id.clone(), input, Utc::now());
        record.profile = Some(profile.clone());

        self.persist()?;
        self.store.profiles().upsert(&profile)?;

        let record = self.record_mut()?;
        let saved: &Profile = record.profile.get_or_insert(profile);
        Ok(saved)
    }

    /// Append a progress entry for the signed-in customer.
    pub fn record_progress(&self, input: ProgressInput) -> Result<ProgressRecord> {
        let customer = self.require_customer()?;
        validate_progress(&input).into_result()?;
        self.store
            .progress()
            .add(ProgressRecord::new(customer.id.clone(), input, Utc::now()))
    }

    pub fn create_diet_plan(&self, customer_id: &str, input: DietPlanInput) -> Result<DietPlan> {
        let trainer = self.require_trainer()?;
        let mut errors = validate_diet_plan(&input);
        self.check_plan_customer(customer_id, &mut errors)?;
        errors.into_result()?;
        self.store.plans().create_diet_plan(DietPlan::new(
            customer_id.to_string(),
            trainer.id.clone(),
            input,
            Utc::now(),
        ))
    }

    pub fn create_workout_plan(
        &self,
        customer_id: &str,
        input: WorkoutPlanInput,
    ) -> Result<WorkoutPlan> {
        let trainer = self.require_trainer()?;
        let mut errors = validate_workout_plan(&input);
        self.check_plan_customer(customer_id, &mut errors)?;
        errors.into_result()?;
        self.store.plans().create_workout_plan(WorkoutPlan::new(
            customer_id.to_string(),
            trainer.id.clone(),
            input,
            Utc::now(),
        ))
    }

    /// Edit a diet plan the signed-in trainer authored. Plans by other
    /// trainers are reported as not found.
    pub fn update_diet_plan(&self, plan_id: &str, input: DietPlanInput) -> Result<DietPlan> {
        let trainer = self.require_trainer()?;
        let existing = self
            .store
            .plans()
            .find_diet_plan(plan_id)?
            .filter(|p| p.trainer_id == trainer.id)
            .ok_or_else(|| IronfitError::NotFound(format!("diet plan {plan_id}")))?;
        validate_diet_plan(&input).into_result()?;

        let plan = existing.revised(input);
        self.store.plans().update_diet_plan(&plan)?;
        Ok(plan)
    }

    pub fn update_workout_plan(&self, plan_id: &str, input: WorkoutPlanInput) -> Result<WorkoutPlan> {
        let trainer = self.require_trainer()?;
        let existing = self
            .store
            .plans()
            .find_workout_plan(plan_id)?
            .filter(|p| p.trainer_id == trainer.id)
            .ok_or_else(|| IronfitError::NotFound(format!("workout plan {plan_id}")))?;
        validate_workout_plan(&input).into_result()?;

        let plan = existing.revised(input);
        self.store.plans().update_workout_plan(&plan)?;
        Ok(plan)
    }

    /// Profile, every plan and the latest progress of one customer (trainers).
    pub fn customer_detail(&self, username: &str) -> Result<CustomerDetail> {
        self.require_trainer()?;
        let customer = self
            .store
            .users()
            .find_by_username(username)?
            .filter(|u| u.is_customer())
            .ok_or_else(|| IronfitError::NotFound(format!("customer {username}")))?;

        Ok(CustomerDetail {
            profile: self.store.profiles().get(&customer.id)?,
            plans: self.store.plans().all_for_customer(&customer.id)?,
            recent_progress: self
                .store
                .progress()
                .list_recent(&customer.id, CUSTOMER_DETAIL_PROGRESS_LIMIT)?,
            customer,
        })
    }

    /// Active plans the signed-in user follows (customer) or authored (trainer).
    pub fn active_plans(&self) -> Result<ActivePlans> {
        let user = self.user().ok_or(IronfitError::NotAuthenticated)?;
        match &user.role {
            Role::Customer => self.store.plans().active_for_customer(&user.id),
            Role::Trainer { .. } => self.store.plans().active_for_trainer(&user.id),
        }
    }

    // -- Accessors --

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.state, AuthState::Unresolved)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn is_trainer(&self) -> bool {
        match self.user().map(|u| &u.role) {
            Some(Role::Trainer { .. }) => true,
            Some(Role::Customer) | None => false,
        }
    }

    pub fn is_customer(&self) -> bool {
        match self.user().map(|u| &u.role) {
            Some(Role::Customer) => true,
            Some(Role::Trainer { .. }) | None => false,
        }
    }

    pub fn current(&self) -> Option<&SessionRecord> {
        match &self.state {
            AuthState::Authenticated(record) => Some(record),
            AuthState::Unresolved | AuthState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.current().map(|r| &r.user)
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.current().and_then(|r| r.profile.as_ref())
    }

    // ── helpers ──

    fn establish(&mut self, user: User) -> Result<&SessionRecord> {
        let profile = self.store.profiles().get(&user.id)?;
        tracing::info!("{} {} signed in", user.user_type(), user.username);
        self.state = AuthState::Authenticated(SessionRecord::new(user, profile));
        self.persist()?;
        self.current().ok_or(IronfitError::NotAuthenticated)
    }

    fn persist(&self) -> Result<()> {
        match &self.state {
            AuthState::Authenticated(record) => self.store.write_record(Key::Session, record),
            AuthState::Unresolved | AuthState::Anonymous => Err(IronfitError::NotAuthenticated),
        }
    }

    fn record_mut(&mut self) -> Result<&mut SessionRecord> {
        match &mut self.state {
            AuthState::Authenticated(record) => Ok(record),
            AuthState::Unresolved | AuthState::Anonymous => Err(IronfitError::NotAuthenticated),
        }
    }

    fn require_customer(&self) -> Result<&User> {
        let user = self.user().ok_or(IronfitError::NotAuthenticated)?;
        match user.role {
            Role::Customer => Ok(user),
            Role::Trainer { .. } => Err(IronfitError::Forbidden(
                "only customers can record progress".into(),
            )),
        }
    }

    fn require_trainer(&self) -> Result<&User> {
        let user = self.user().ok_or(IronfitError::NotAuthenticated)?;
        match user.role {
            Role::Trainer { .. } => Ok(user),
            Role::Customer => Err(IronfitError::Forbidden(
                "only trainers can manage plans and customers".into(),
            )),
        }
    }

    fn check_plan_customer(&self, customer_id: &str, errors: &mut ValidationErrors) -> Result<()> {
        let target = self.store.users().find_by_id(customer_id)?;
        if !target.is_some_and(|u| u.is_customer()) {
            errors.add("customerId", "Please select a valid customer");
        }
        Ok(())
    }
}
