//! Data-access and session layer for the ironfit membership app.
//!
//! Records live as JSON collections in a flat key-value medium
//! ([`storage`]), typed repositories sit on top ([`repository`]), and the
//! [`session::SessionManager`] tracks who is signed in.

pub mod bmi;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod seed;
pub mod session;
pub mod stats;
pub mod storage;
pub mod validation;

pub use error::{IronfitError, Result};
