use crate::config::Config;
use crate::errors::AppError;
use crate::sessions::SessionStore;
use crate::store::{SubmissionStore, UserStore};

/// Shared application state injected into all route handlers via Axum
/// extractors. The stores are passed in explicitly — handlers never
/// reach for a hidden global.
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub submissions: SubmissionStore,
    pub sessions: SessionStore,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(config.resumes_dir())?;
        let users = UserStore::open(
            config.users_csv(),
            &config.admin_email,
            &config.admin_password,
        )?;
        let submissions = SubmissionStore::open(config.submissions_csv())?;
        Ok(AppState {
            users,
            submissions,
            sessions: SessionStore::default(),
            config,
        })
    }
}
