pub mod health;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::services::ServeDir;

use crate::handlers::{admin, auth, pages, upload};
use crate::sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route_layer(from_fn_with_state(state.clone(), sessions::require_admin));

    let upload_routes = Router::new()
        .route("/upload", get(upload::upload_form).post(upload::upload))
        .route_layer(from_fn_with_state(state.clone(), sessions::require_user));

    Router::new()
        .merge(admin_routes)
        .merge(upload_routes)
        .route("/", get(pages::home))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(health::health_handler))
        .nest_service("/resumes", ServeDir::new(state.config.resumes_dir()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::models::SubmissionRecord;

    struct TestApp {
        app: Router,
        state: AppState,
        _dir: tempfile::TempDir,
    }

    fn test_app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            port: 0,
            rust_log: "info".into(),
            data_dir: dir.path().to_path_buf(),
            admin_email: "admin@admin.com".into(),
            admin_password: "admin123".into(),
        };
        let state = AppState::new(config).unwrap();
        TestApp {
            app: build_router(state.clone()),
            state,
            _dir: dir,
        }
    }

    fn session_cookie(response: &Response<Body>) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session="))
            .map(|v| v.split(';').next().unwrap().to_string())
            .expect("no session cookie in response")
    }

    fn flash_cookie(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("flash="))
            .map(|v| v.split(';').next().unwrap().to_string())
    }

    fn location(response: &Response<Body>) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("no Location header")
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn form_post(app: &Router, uri: &str, body: String) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(Body::empty()).unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> String {
        let response = form_post(app, "/login", format!("email={email}&password={password}")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }

    const BOUNDARY: &str = "XTESTBOUNDARY";

    fn multipart_upload(name: &str, email: &str, skills: &str, filename: &str) -> Body {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\n{email}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"skills\"\r\n\r\n{skills}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n%PDF-1.4 test\r\n\
             --{b}--\r\n",
            b = BOUNDARY
        );
        Body::from(body)
    }

    async fn upload(app: &Router, cookie: &str, skills: &str, filename: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::COOKIE, cookie)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_upload("Jane Doe", "jane@example.com", skills, filename))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let t = test_app();
        let response = get(&t.app, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_then_login_lands_on_upload() {
        let t = test_app();
        let response = form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

        let response = form_post(&t.app, "/login", "email=jane@example.com&password=pw".into()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/upload");

        let cookie = session_cookie(&response);
        let response = get(&t.app, "/upload", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_signup_redirects_without_appending() {
        let t = test_app();
        form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        let response =
            form_post(&t.app, "/signup", "email=jane@example.com&password=other".into()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

        // Header + seeded admin + one signup: the duplicate added nothing.
        let csv = std::fs::read_to_string(t.state.config.users_csv()).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_bad_credentials_redirect_to_login() {
        let t = test_app();
        let response =
            form_post(&t.app, "/login", "email=jane@example.com&password=wrong".into()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_admin_login_reaches_dashboard() {
        let t = test_app();
        let response = form_post(&t.app, "/login", "email=admin@admin.com&password=admin123".into()).await;
        assert_eq!(location(&response), "/admin");

        let cookie = session_cookie(&response);
        let response = get(&t.app, "/admin", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_admin_denied_dashboard() {
        let t = test_app();
        form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        let cookie = login(&t.app, "jane@example.com", "pw").await;

        let response = get(&t.app, "/admin", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let flash = flash_cookie(&response).unwrap();
        assert!(flash.contains("danger"), "flash was {flash}");
    }

    #[tokio::test]
    async fn test_upload_requires_login() {
        let t = test_app();
        let response = get(&t.app, "/upload", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let flash = flash_cookie(&response).unwrap();
        assert!(flash.contains("warning"), "flash was {flash}");
    }

    #[tokio::test]
    async fn test_docx_upload_rejected_without_side_effects() {
        let t = test_app();
        form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        let cookie = login(&t.app, "jane@example.com", "pw").await;

        let response = upload(&t.app, &cookie, "python", "resume.docx").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/upload");

        assert!(t.state.submissions.list_all().unwrap().is_empty());
        let resumes: Vec<_> = std::fs::read_dir(t.state.config.resumes_dir())
            .unwrap()
            .collect();
        assert!(resumes.is_empty());
    }

    #[tokio::test]
    async fn test_same_filename_twice_gets_numeric_suffix() {
        let t = test_app();
        form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        let cookie = login(&t.app, "jane@example.com", "pw").await;

        let response = upload(&t.app, &cookie, "rust, sql", "cv.pdf").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let response = upload(&t.app, &cookie, "python", "cv.pdf").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let records = t.state.submissions.list_all().unwrap();
        let filenames: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, vec!["cv.pdf", "cv_1.pdf"]);
        assert!(t.state.config.resumes_dir().join("cv.pdf").exists());
        assert!(t.state.config.resumes_dir().join("cv_1.pdf").exists());
    }

    #[tokio::test]
    async fn test_admin_filter_and_ranking() {
        let t = test_app();
        let seed = [
            ("alice", "Python, SQL, Docker"),
            ("bob", "rust, tokio"),
            ("carol", "python"),
        ];
        for (name, skills) in seed {
            t.state
                .submissions
                .append(&SubmissionRecord {
                    name: name.to_string(),
                    email: format!("{name}@example.com"),
                    skills: skills.to_string(),
                    filename: format!("{name}.pdf"),
                })
                .unwrap();
        }

        let cookie = login(&t.app, "admin@admin.com", "admin123").await;
        let response = get(&t.app, "/admin?skill=python", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(!body.contains("bob"));
        // alice scores 30, carol 10: alice must come first.
        let alice = body.find("alice").unwrap();
        let carol = body.find("carol").unwrap();
        assert!(alice < carol);
    }

    #[tokio::test]
    async fn test_uploaded_resume_is_served_back() {
        let t = test_app();
        form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        let cookie = login(&t.app, "jane@example.com", "pw").await;
        upload(&t.app, &cookie, "rust", "cv.pdf").await;

        let response = get(&t.app, "/resumes/cv.pdf", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.starts_with("%PDF-1.4"));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let t = test_app();
        form_post(&t.app, "/signup", "email=jane@example.com&password=pw".into()).await;
        let cookie = login(&t.app, "jane@example.com", "pw").await;

        let response = get(&t.app, "/logout", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let response = get(&t.app, "/upload", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }
}
