//! Client routes: `/` is the directory, `/session/{id}` a session view.

use std::fmt;

use thiserror::Error;

use muhtasib_core::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Directory,
    Session(SessionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route '{0}' (expected / or /session/<id>)")]
pub struct UnknownRoute(pub String);

impl Route {
    pub fn parse(path: &str) -> Result<Route, UnknownRoute> {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Ok(Route::Directory);
        }
        match trimmed.trim_end_matches('/').strip_prefix("/session/") {
            Some(id) if !id.is_empty() && !id.contains('/') => {
                Ok(Route::Session(SessionId::new(id)))
            }
            _ => Err(UnknownRoute(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Directory => "/".to_string(),
            Route::Session(id) => format!("/session/{id}"),
        }
    }

    pub fn session(&self) -> Option<&SessionId> {
        match self {
            Route::Directory => None,
            Route::Session(id) => Some(id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
