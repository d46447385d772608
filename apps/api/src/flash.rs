//! One-shot flash messages carried in a cookie across redirects.
//!
//! The value is `level:message`, percent-encoded. Pages read the cookie,
//! render the banner once, and clear it.

use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }

    fn parse(raw: &str) -> Level {
        match raw {
            "success" => Level::Success,
            "info" => Level::Info,
            "warning" => Level::Warning,
            _ => Level::Danger,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Flash {
            level,
            message: message.into(),
        }
    }

    /// Cookie CSS class hook for the page templates.
    pub fn css_class(&self) -> &'static str {
        self.level.as_str()
    }
}

/// Adds a flash cookie to the jar; it survives exactly one redirect.
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    let value = format!(
        "{}:{}",
        flash.level.as_str(),
        urlencoding::encode(&flash.message)
    );
    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").build())
}

/// Reads and clears the flash cookie, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = cookie.value().split_once(':').and_then(|(level, encoded)| {
        let message = urlencoding::decode(encoded).ok()?.into_owned();
        Some(Flash::new(Level::parse(level), message))
    });
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, flash)
}
