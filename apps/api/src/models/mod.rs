pub mod submission;
pub mod user;

pub use submission::SubmissionRecord;
pub use user::UserRecord;
