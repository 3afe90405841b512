use crate::error::Result;
use crate::model::Profile;
use crate::storage::{Key, Store};

pub struct Profiles<'a> {
    store: &'a Store,
}

impl<'a> Profiles<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<Vec<Profile>> {
        self.store.read_collection(Key::Profiles)
    }

    /// `None` is a normal state: the member hasn't filled in a profile yet.
    pub fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        Ok(self.all()?.into_iter().find(|p| p.user_id == user_id))
    }

    /// Replace the record with the same `user_id` wholesale, or append.
    pub fn upsert(&self, profile: &Profile) -> Result<()> {
        let replaced = self.store.replace_first(
            Key::Profiles,
            |p: &Profile| p.user_id == profile.user_id,
            profile,
        )?;
        if !replaced {
            self.store.append_record(Key::Profiles, profile)?;
        }
        tracing::debug!("saved profile for {}", profile.user_id);
        Ok(())
    }
}
