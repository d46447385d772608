//! Askama page templates. Handlers build these and render them to
//! `Html<String>`.

use askama::Template;

use crate::flash::Flash;
use crate::scoring::RankedSubmission;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub flash: Option<Flash>,
    /// Email of the logged-in user, if any.
    pub user: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadPage {
    pub flash: Option<Flash>,
    pub user: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub flash: Option<Flash>,
    /// The active skill filter, echoed back into the search box.
    pub skill: String,
    pub rows: Vec<RankedSubmission>,
}
