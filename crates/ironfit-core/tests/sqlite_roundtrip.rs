//! Durability across process-like restarts: reopen the same SQLite file and
//! check that records and the session survive.

mod common;

use common::{memory_config, open_sqlite, temp_db_path};
use ironfit_core::model::{Credentials, ProfileInput};
use ironfit_core::seed::{seed_if_empty, CUSTOMER_MIKE};
use ironfit_core::session::SessionManager;
use ironfit_core::stats::home_stats;
use ironfit_core::storage::Key;

#[test]
fn test_seed_and_session_survive_reopen() {
    let path = temp_db_path("reopen");
    {
        let store = open_sqlite(&path);
        assert!(seed_if_empty(&store).unwrap());
        let mut session = SessionManager::open(&store, &memory_config()).unwrap();
        session.login(&Credentials::new("mike_customer", "pw")).unwrap();
        let mut input = ProfileInput::from(session.profile().unwrap());
        input.phone = "+15550000".into();
        session.update_profile(input).unwrap();
    }

    let store = open_sqlite(&path);
    assert!(!seed_if_empty(&store).unwrap());
    assert_eq!(home_stats(&store).unwrap().total_trainers, 2);

    let session = SessionManager::open(&store, &memory_config()).unwrap();
    assert!(session.is_customer());
    assert_eq!(session.profile().unwrap().phone, "+15550000");
    assert_eq!(
        store.profiles().get(CUSTOMER_MIKE).unwrap().unwrap().phone,
        "+15550000"
    );

    drop(session);
    drop(store);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_logout_persists_wipe() {
    let path = temp_db_path("logout");
    {
        let store = open_sqlite(&path);
        seed_if_empty(&store).unwrap();
        let mut session = SessionManager::open(&store, &memory_config()).unwrap();
        session.login(&Credentials::new("john_trainer", "pw")).unwrap();
        session.logout().unwrap();
    }

    let store = open_sqlite(&path);
    let session = SessionManager::open(&store, &memory_config()).unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(store.count(Key::ProgressRecords).unwrap(), 0);
    assert_eq!(store.count(Key::Users).unwrap(), 3);

    drop(session);
    drop(store);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
