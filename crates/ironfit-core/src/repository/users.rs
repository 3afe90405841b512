use crate::error::Result;
use crate::model::User;
use crate::storage::{Key, Store};
use crate::validation::{validate_signup, SignupForm};

pub struct Users<'a> {
    store: &'a Store,
}

impl<'a> Users<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<Vec<User>> {
        self.store.read_collection(Key::Users)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.all()?.into_iter().find(|u| u.id == id))
    }

    /// Exact, case-sensitive match; first hit wins.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.all()?.into_iter().find(|u| u.username == username))
    }

    /// Exact, case-sensitive match; first hit wins.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.all()?.into_iter().find(|u| u.email == email))
    }

    /// Append `user`. Uniqueness is the caller's job; see [`Users::register`].
    pub fn create(&self, user: User) -> Result<User> {
        self.store.append_record(Key::Users, &user)?;
        tracing::info!("created {} account {}", user.user_type(), user.username);
        Ok(user)
    }

    /// Validate `form` against the current users and create the account.
    /// The store is untouched when validation fails.
    pub fn register(&self, form: &SignupForm) -> Result<User> {
        let existing = self.all()?;
        let mut errors = validate_signup(form, &existing);

        // Stored users that fail to parse still hold their username and email.
        let username = form.username.trim();
        if !username.is_empty()
            && self.store.field_values(Key::Users, "username")?.iter().any(|u| u == username)
        {
            errors.add("username", "Username already exists");
        }
        let email = form.email.trim();
        if !email.is_empty() && self.store.field_values(Key::Users, "email")?.iter().any(|e| e == email) {
            errors.add("email", "Email already exists");
        }

        errors.into_result()?;
        self.create(form.to_user())
    }

    /// Customers ordered by first name.
    pub fn customers(&self) -> Result<Vec<User>> {
        let mut customers: Vec<User> = self.all()?.into_iter().filter(|u| u.is_customer()).collect();
        customers.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        Ok(customers)
    }

    pub fn trainers(&self) -> Result<Vec<User>> {
        Ok(self.all()?.into_iter().filter(|u| u.is_trainer()).collect())
    }

    /// Customers whose username, first or last name contains `query`,
    /// ignoring case. A blank query returns every customer.
    pub fn search_customers(&self, query: &str) -> Result<Vec<User>> {
        let needle = query.trim().to_lowercase();
        let customers = self.customers()?;
        if needle.is_empty() {
            return Ok(customers);
        }
        Ok(customers
            .into_iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.first_name.to_lowercase().contains(&needle)
                    || u.last_name.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IronfitError;
    use crate::model::{Role, UserType};
    use crate::storage::KeyValueStore;

    fn customer(username: &str, first: &str) -> User {
        User::new(
            username.into(),
            format!("{username}@example.com"),
            first.into(),
            "Doe".into(),
            Role::Customer,
        )
    }

    fn form(username: &str, email: &str) -> SignupForm {
        SignupForm {
            first_name: "Mike".into(),
            last_name: "Other".into(),
            username: username.into(),
            email: email.into(),
            password: "hunter22".into(),
            password_confirmation: "hunter22".into(),
            user_type: UserType::Customer,
            specialization: String::new(),
            experience: String::new(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let store = Store::in_memory();
        let users = store.users();
        let created = users.create(customer("mike", "Mike")).unwrap();

        assert_eq!(users.find_by_username("mike").unwrap(), Some(created.clone()));
        assert_eq!(
            users.find_by_email("mike@example.com").unwrap(),
            Some(created.clone())
        );
        assert_eq!(users.find_by_id(&created.id).unwrap(), Some(created));
        assert!(users.find_by_username("MIKE").unwrap().is_none());
    }

    #[test]
    fn test_register_rejects_duplicate_username_without_writing() {
        let store = Store::in_memory();
        store.users().create(customer("mike", "Mike")).unwrap();
        let before = store.raw_value(Key::Users).unwrap();

        let err = store
            .users()
            .register(&form("mike", "new@example.com"))
            .unwrap_err();
        match err {
            IronfitError::Validation(errors) => {
                assert_eq!(errors.get("username"), Some("Username already exists"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.raw_value(Key::Users).unwrap(), before);
        assert_eq!(store.users().all().unwrap().len(), 1);
    }

    #[test]
    fn test_register_creates_user() {
        let store = Store::in_memory();
        let user = store.users().register(&form("newbie", "n@example.com")).unwrap();
        assert_eq!(user.username, "newbie");
        assert_eq!(store.users().all().unwrap(), vec![user]);
    }

    #[test]
    fn test_register_keeps_and_respects_unreadable_users() {
        let store = Store::in_memory();
        store
            .raw()
            .set(
                "Users",
                r#"[{"id":"old1","username":"legacy","email":"legacy@gym.com","userType":"coach"}]"#,
            )
            .unwrap();

        let err = store
            .users()
            .register(&form("legacy", "legacy@gym.com"))
            .unwrap_err();
        let fields: Vec<&str> = err.field_errors().into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["username", "email"]);

        store.users().register(&form("newbie", "n@example.com")).unwrap();
        let raw = store.raw_value(Key::Users).unwrap().unwrap();
        assert!(raw.contains(r#""username":"legacy""#), "legacy user lost: {raw}");
        assert_eq!(store.count(Key::Users).unwrap(), 2);
    }

    #[test]
    fn test_customers_sorted_and_searchable() {
        let store = Store::in_memory();
        let users = store.users();
        users.create(customer("zed", "Zed")).unwrap();
        users.create(customer("amy", "Amy")).unwrap();
        users
            .create(User::new(
                "coach".into(),
                "coach@gym.com".into(),
                "Carl".into(),
                "Coach".into(),
                Role::Trainer {
                    specialization: "Boxing".into(),
                    experience: "2 years".into(),
                },
            ))
            .unwrap();

        let names: Vec<String> = users
            .customers()
            .unwrap()
            .into_iter()
            .map(|u| u.first_name)
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
        assert_eq!(users.trainers().unwrap().len(), 1);

        let hits = users.search_customers("ZE").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "zed");
        assert_eq!(users.search_customers("doe").unwrap().len(), 2);
        assert_eq!(users.search_customers("  ").unwrap().len(), 2);
        assert!(users.search_customers("coach").unwrap().is_empty());
    }
}
