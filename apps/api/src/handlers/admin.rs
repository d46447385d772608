use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::errors::AppError;
use crate::flash;
use crate::scoring::filter_and_rank;
use crate::state::AppState;
use crate::views::AdminPage;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub skill: Option<String>,
}

/// GET /admin?skill=<text>
///
/// Admin-only (enforced by the `require_admin` layer). Full scan of the
/// submission store, substring-filtered and ranked by score.
pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    let skill = query.skill.unwrap_or_default().trim().to_string();
    let rows = filter_and_rank(state.submissions.list_all()?, &skill);
    let page = AdminPage { flash, skill, rows };
    Ok((jar, Html(page.render()?)))
}
