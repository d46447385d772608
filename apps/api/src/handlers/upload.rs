use std::path::Path;

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Redirect},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::errors::AppError;
use crate::flash::{self, Flash, Level};
use crate::models::SubmissionRecord;
use crate::sessions::Session;
use crate::state::AppState;
use crate::views::UploadPage;

/// GET /upload
pub async fn upload_form(
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    let page = UploadPage {
        flash,
        user: session.email,
    };
    Ok((jar, Html(page.render()?)))
}

/// POST /upload
///
/// Multipart form: `name`, `email`, `skills` text fields plus the
/// `resume` file. Only `.pdf` (case-insensitive) is accepted; a
/// rejected upload writes no file and appends no record. The PDF is
/// written before the record is appended, so a crash in between leaves
/// an orphaned file (accepted, unhandled).
pub async fn upload(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut name = String::new();
    let mut email = String::new();
    let mut skills = String::new();
    let mut resume: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|_| malformed())? {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("name") => name = field.text().await.map_err(|_| malformed())?.trim().to_string(),
            Some("email") => email = field.text().await.map_err(|_| malformed())?.trim().to_string(),
            Some("skills") => {
                skills = field.text().await.map_err(|_| malformed())?.trim().to_string()
            }
            Some("resume") => {
                let original = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|_| malformed())?;
                resume = Some((original, data.to_vec()));
            }
            _ => {}
        }
    }

    let Some((original, data)) = resume.filter(|(n, _)| !n.is_empty()) else {
        return Err(AppError::validation("All fields required", "/upload"));
    };
    if name.is_empty() || email.is_empty() || skills.is_empty() {
        return Err(AppError::validation("All fields required", "/upload"));
    }
    if !is_pdf(&original) {
        return Err(AppError::validation("Only PDF resumes are allowed", "/upload"));
    }

    let resumes_dir = state.config.resumes_dir();
    let stored = unique_filename(&resumes_dir, &sanitize_filename(&original));
    tokio::fs::write(resumes_dir.join(&stored), &data).await?;

    state.submissions.append(&SubmissionRecord {
        name,
        email,
        skills,
        filename: stored.clone(),
    })?;
    info!(filename = %stored, "resume uploaded");

    let jar = flash::set(jar, Flash::new(Level::Success, "Resume uploaded successfully"));
    Ok((jar, Redirect::to("/upload")))
}

fn malformed() -> AppError {
    AppError::validation("Malformed upload form", "/upload")
}

fn is_pdf(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Strips any path components and replaces characters outside
/// `[A-Za-z0-9._-]` so the name is safe to join onto the resumes
/// directory.
fn sanitize_filename(raw: &str) -> String {
    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("resume.pdf");
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Avoids overwriting an existing upload by suffixing `_1`, `_2`, …
/// before the extension until the name is free.
fn unique_filename(dir: &Path, filename: &str) -> String {
    if !dir.join(filename).exists() {
        return filename.to_string();
    }
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");
    let ext = Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let mut counter = 1;
    loop {
        let candidate = format!("{stem}_{counter}{ext}");
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}
