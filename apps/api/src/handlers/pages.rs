use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;

use crate::errors::AppError;
use crate::flash;
use crate::sessions::session_from_jar;
use crate::state::AppState;
use crate::views::HomePage;

/// GET /
pub async fn home(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    let user = session_from_jar(&state, &jar)
        .await
        .map(|(_, session)| session.email);
    let page = HomePage { flash, user };
    Ok((jar, Html(page.render()?)))
}
