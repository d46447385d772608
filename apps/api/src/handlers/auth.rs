use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::flash::{self, Flash, Level};
use crate::sessions::{session_from_jar, Session, SESSION_COOKIE};
use crate::state::AppState;
use crate::views::{LoginPage, SignupPage};

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// GET /signup
pub async fn signup_form(jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(SignupPage { flash }.render()?)))
}

/// POST /signup
///
/// Email uniqueness is enforced here, with a pre-insert scan; the store
/// itself appends blindly.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let email = input.email.trim();
    let password = input.password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::validation("Provide email and password", "/signup"));
    }

    if state.users.exists(email)? {
        let jar = flash::set(
            jar,
            Flash::new(Level::Warning, "Account already exists. Please login."),
        );
        return Ok((jar, Redirect::to("/login")));
    }

    state.users.append(email, password, false)?;
    info!(email, "account created");
    let jar = flash::set(
        jar,
        Flash::new(Level::Success, "Account created. Please login."),
    );
    Ok((jar, Redirect::to("/login")))
}

/// GET /login
pub async fn login_form(jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(LoginPage { flash }.render()?)))
}

/// POST /login
///
/// Plaintext password comparison against the users CSV, preserved from
/// the legacy portal. Admins land on the dashboard, everyone else on
/// the upload form.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let email = input.email.trim();
    let password = input.password.trim();

    let matched = state
        .users
        .lookup(email)?
        .filter(|user| user.password == password);

    let Some(user) = matched else {
        let jar = flash::set(jar, Flash::new(Level::Danger, "Invalid credentials"));
        return Ok((jar, Redirect::to("/login")));
    };

    let id = state
        .sessions
        .insert(Session::new(&user.email, user.is_admin))
        .await;
    info!(email = %user.email, is_admin = user.is_admin, "login");

    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .build(),
    );
    let jar = flash::set(jar, Flash::new(Level::Success, "Logged in successfully"));
    let destination = if user.is_admin { "/admin" } else { "/upload" };
    Ok((jar, Redirect::to(destination)))
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some((id, session)) = session_from_jar(&state, &jar).await {
        state.sessions.remove(&id).await;
        info!(email = %session.email, signed_in_at = %session.issued_at, "logout");
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    let jar = flash::set(jar, Flash::new(Level::Info, "Logged out"));
    Ok((jar, Redirect::to("/")))
}
