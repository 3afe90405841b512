//! Typed repositories over the store adapter, one per entity collection.
//!
//! Repositories borrow the [`Store`] and do linear scans over the whole
//! collection. Mutations are read-modify-write of the full sequence.

mod plans;
mod profiles;
mod progress;
mod users;

pub use plans::{ActivePlans, Plans};
pub use profiles::Profiles;
pub use progress::{Progress, WeightTrend};
pub use users::Users;

use crate::storage::Store;

impl Store {
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn profiles(&self) -> Profiles<'_> {
        Profiles::new(self)
    }

    pub fn plans(&self) -> Plans<'_> {
        Plans::new(self)
    }

    pub fn progress(&self) -> Progress<'_> {
        Progress::new(self)
    }
}
