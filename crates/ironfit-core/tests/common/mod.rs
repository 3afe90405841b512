#![allow(unused_imports, dead_code)]

use std::path::PathBuf;

use ironfit_core::config::IronfitConfig;
use ironfit_core::model::{Role, User};
use ironfit_core::seed::seed_if_empty;
use ironfit_core::storage::{SqliteStore, Storage, Store};
use ironfit_core::validation::SignupForm;
use ironfit_core::model::UserType;

/// Defaults with the in-process backend.
pub fn memory_config() -> IronfitConfig {
    let mut config = IronfitConfig::default_config();
    config.storage.backend = "memory".to_string();
    config
}

/// Fresh in-memory store with the demonstration dataset.
pub fn seeded_store() -> Store {
    let store = Store::in_memory();
    seed_if_empty(&store).expect("seed should succeed");
    store
}

/// Unique SQLite path under the temp dir. Caller removes the parent dir.
pub fn temp_db_path(label: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("ironfit-{label}-{}", uuid::Uuid::now_v7()))
        .join("ironfit.db")
}

pub fn open_sqlite(path: &PathBuf) -> Store {
    Store::new(Storage::Sqlite(
        SqliteStore::open(path).expect("sqlite store should open"),
    ))
}

pub fn customer(username: &str) -> User {
    User::new(
        username.to_string(),
        format!("{username}@example.com"),
        "Test".to_string(),
        "Customer".to_string(),
        Role::Customer,
    )
}

/// A signup form that passes every rule.
pub fn valid_signup(username: &str) -> SignupForm {
    SignupForm {
        first_name: "Test".into(),
        last_name: "User".into(),
        username: username.into(),
        email: format!("{username}@example.com"),
        password: "secret123".into(),
        password_confirmation: "secret123".into(),
        user_type: UserType::Customer,
        specialization: String::new(),
        experience: String::new(),
    }
}
