mod plan;
mod profile;
mod progress;
mod session;
mod user;

pub use plan::*;
pub use profile::*;
pub use progress::*;
pub use session::*;
pub use user::*;
