//! Form validation. Every rule is checked and all failures are returned
//! together, keyed by form field, so a view can annotate each input.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{IronfitError, Result};
use crate::model::{
    DietPlanInput, ProfileInput, ProgressInput, Role, User, UserType, WorkoutPlanInput,
};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Ordered field → message map. Adding a second message for the same field
/// replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<(String, String)>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.0.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = message,
            None => self.0.push((field.to_string(), message)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(())` when nothing was recorded, otherwise a `Validation` error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(IronfitError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(f, m)| format!("{f}: {m}")).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Signup form data for both customers and trainers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub user_type: UserType,
    /// Trainers only.
    #[serde(default)]
    pub specialization: String,
    /// Trainers only.
    #[serde(default)]
    pub experience: String,
}

impl SignupForm {
    /// The user record this form describes, with a fresh id. Call only after
    /// [`validate_signup`] passed.
    pub fn to_user(&self) -> User {
        let role = match self.user_type {
            UserType::Customer => Role::Customer,
            UserType::Trainer => Role::Trainer {
                specialization: self.specialization.trim().to_string(),
                experience: self.experience.trim().to_string(),
            },
        };
        User::new(
            self.username.trim().to_string(),
            self.email.trim().to_string(),
            self.first_name.trim().to_string(),
            self.last_name.trim().to_string(),
            role,
        )
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a signup form against every rule, including uniqueness of
/// username and email among `existing` users (exact, case-sensitive).
pub fn validate_signup(form: &SignupForm, existing: &[User]) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.first_name.trim().is_empty() {
        errors.add("firstName", "First name is required");
    }
    if form.last_name.trim().is_empty() {
        errors.add("lastName", "Last name is required");
    }

    let username = form.username.trim();
    if username.is_empty() {
        errors.add("username", "Username is required");
    } else if username.chars().count() < MIN_USERNAME_LENGTH {
        errors.add(
            "username",
            format!("Username must be at least {MIN_USERNAME_LENGTH} characters"),
        );
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Email is invalid");
    }

    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
    if form.password != form.password_confirmation {
        errors.add("passwordConfirmation", "Passwords do not match");
    }

    match form.user_type {
        UserType::Customer => {}
        UserType::Trainer => {
            if form.specialization.trim().is_empty() {
                errors.add("specialization", "Specialization is required");
            }
            if form.experience.trim().is_empty() {
                errors.add("experience", "Experience is required");
            }
        }
    }

    if !username.is_empty() && existing.iter().any(|u| u.username == username) {
        errors.add("username", "Username already exists");
    }
    if !email.is_empty() && existing.iter().any(|u| u.email == email) {
        errors.add("email", "Email already exists");
    }

    errors
}

pub fn validate_progress(input: &ProgressInput) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if !is_positive(input.weight_kg) {
        errors.add("weightKg", "Please enter a valid weight.");
    }
    errors
}

/// Measurements are optional, but a given one must be a finite, positive number.
pub fn validate_profile(input: &ProfileInput) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if input.height_cm.is_some_and(|h| !is_positive(h)) {
        errors.add("heightCm", "Please enter a valid height.");
    }
    if input.weight_kg.is_some_and(|w| !is_positive(w)) {
        errors.add("weightKg", "Please enter a valid weight.");
    }
    errors
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn validate_diet_plan(input: &DietPlanInput) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if input.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    errors
}

pub fn validate_workout_plan(input: &WorkoutPlanInput) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if input.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    if input.duration_weeks == 0 {
        errors.add("durationWeeks", "Duration must be at least one week");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn customer_form() -> SignupForm {
        SignupForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            password_confirmation: "secret1".into(),
            user_type: UserType::Customer,
            specialization: String::new(),
            experience: String::new(),
        }
    }

    fn existing_mike() -> Vec<User> {
        vec![User::new(
            "mike".into(),
            "mike@email.com".into(),
            "Mike".into(),
            "Wilson".into(),
            Role::Customer,
        )]
    }

    #[test]
    fn test_valid_customer_form() {
        assert!(validate_signup(&customer_form(), &[]).is_empty());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let form = SignupForm {
            first_name: " ".into(),
            last_name: "".into(),
            username: "ab".into(),
            email: "not-an-email".into(),
            password: "123".into(),
            password_confirmation: "1234".into(),
            user_type: UserType::Trainer,
            specialization: "".into(),
            experience: "  ".into(),
        };
        let errors = validate_signup(&form, &[]);
        for field in [
            "firstName",
            "lastName",
            "username",
            "email",
            "password",
            "passwordConfirmation",
            "specialization",
            "experience",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert_eq!(errors.len(), 8);
        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 3 characters")
        );
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut form = customer_form();
        form.username = "mike".into();
        let errors = validate_signup(&form, &existing_mike());
        assert_eq!(errors.get("username"), Some("Username already exists"));
    }

    #[test]
    fn test_uniqueness_is_case_sensitive() {
        let mut form = customer_form();
        form.username = "Mike".into();
        assert!(validate_signup(&form, &existing_mike()).is_empty());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut form = customer_form();
        form.email = "mike@email.com".into();
        let errors = validate_signup(&form, &existing_mike());
        assert_eq!(errors.get("email"), Some("Email already exists"));
    }

    #[test]
    fn test_trainer_requires_variant_fields() {
        let mut form = customer_form();
        form.user_type = UserType::Trainer;
        let errors = validate_signup(&form, &[]);
        assert!(errors.contains("specialization"));
        assert!(errors.contains("experience"));

        form.specialization = "Yoga".into();
        form.experience = "3 years".into();
        assert!(validate_signup(&form, &[]).is_empty());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn test_to_user_builds_role() {
        let mut form = customer_form();
        form.user_type = UserType::Trainer;
        form.specialization = " HIIT ".into();
        form.experience = "5 years".into();
        let user = form.to_user();
        assert_eq!(
            user.role,
            Role::Trainer {
                specialization: "HIIT".into(),
                experience: "5 years".into()
            }
        );
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::default().into_result().is_ok());
        let mut errors = ValidationErrors::default();
        errors.add("x", "bad");
        errors.add("x", "worse");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.to_string(), "x: worse");
        assert!(matches!(
            errors.into_result(),
            Err(IronfitError::Validation(_))
        ));
    }

    #[test]
    fn test_progress_weight_must_be_positive() {
        let input = ProgressInput {
            weight_kg: 0.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: String::new(),
            photo: None,
        };
        assert!(validate_progress(&input).contains("weightKg"));
    }

    #[test]
    fn test_profile_measurements_must_be_finite_and_positive() {
        assert!(validate_profile(&ProfileInput::default()).is_empty());

        let input = ProfileInput {
            height_cm: Some(-170.0),
            weight_kg: Some(f64::NAN),
            ..Default::default()
        };
        let errors = validate_profile(&input);
        assert!(errors.contains("heightCm"));
        assert!(errors.contains("weightKg"));

        let input = ProfileInput {
            height_cm: Some(f64::INFINITY),
            weight_kg: Some(72.5),
            ..Default::default()
        };
        let errors = validate_profile(&input);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("heightCm"));
    }

    #[test]
    fn test_plan_title_required() {
        assert!(validate_diet_plan(&DietPlanInput::titled("  ")).contains("title"));
        let mut workout = WorkoutPlanInput::titled("Split");
        workout.duration_weeks = 0;
        assert!(validate_workout_plan(&workout).contains("durationWeeks"));
    }
}
