//! Auth-domain identifiers, pending-state records, and credential blobs.

pub mod credentials;
pub mod id;
pub mod state;

pub use credentials::*;
pub use id::*;
pub use state::*;
