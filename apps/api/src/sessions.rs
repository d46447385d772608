//! In-memory sessions and the middleware that guards protected routes.
//!
//! A login creates a server-side session keyed by a v4 uuid; the browser
//! holds only the uuid in an HttpOnly cookie. Sessions live for the
//! lifetime of the process, which matches the portal's scope.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// What a login establishes: who the user is and whether they may see
/// the admin dashboard. Inserted into request extensions by the
/// middleware below.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub is_admin: bool,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, is_admin: bool) -> Self {
        Session {
            email: email.into(),
            is_admin,
            issued_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn insert(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, session);
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &Uuid) -> Option<Session> {
        self.inner.write().await.remove(id)
    }
}

/// Resolves the session referenced by the request's cookie, if any.
pub async fn session_from_jar(state: &AppState, jar: &CookieJar) -> Option<(Uuid, Session)> {
    let id: Uuid = jar.get(SESSION_COOKIE)?.value().parse().ok()?;
    let session = state.sessions.get(&id).await?;
    Some((id, session))
}

/// Guards routes that need any logged-in user.
pub async fn require_user(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some((_, session)) = session_from_jar(&state, &jar).await {
        request.extensions_mut().insert(session);
        return next.run(request).await;
    }
    tracing::warn!("unauthenticated request to protected route");
    AppError::Unauthorized.into_response()
}

/// Guards the admin dashboard.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some((_, session)) = session_from_jar(&state, &jar).await {
        if session.is_admin {
            request.extensions_mut().insert(session);
            return next.run(request).await;
        }
        tracing::warn!(email = %session.email, "non-admin denied admin dashboard");
    }
    AppError::Forbidden.into_response()
}
