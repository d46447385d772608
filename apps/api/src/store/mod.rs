//! Flat-file stores backing the portal. Both read and write the whole
//! file on every call; see the concurrency notes in the crate docs.

pub mod submissions;
pub mod users;

pub use submissions::SubmissionStore;
pub use users::UserStore;
