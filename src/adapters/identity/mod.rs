//! Identity provider adapters: the Firebase Auth REST implementation
//! and an in-memory mock.

pub mod firebase;
pub mod mock;

pub use firebase::{FirebaseIdentity, FirebaseIdentityConfig};
pub use mock::MockIdentity;
