//! Hash routes for the console pages.

use std::borrow::Cow;

/// A page the shell can show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Playground,
    Tasks,
    TaskDetail(String),
    NotFound(String),
}

impl Route {
    /// Parse `location.hash` (`#/tasks/abc`, `#/`, or empty).
    pub fn from_hash(hash: &str) -> Self {
        Self::from_path(hash.strip_prefix('#').unwrap_or(hash))
    }

    /// Parse a `/`-separated path. Query strings are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["home"] => Route::Home,
            ["playground"] => Route::Playground,
            ["tasks"] => Route::Tasks,
            ["tasks", raw] => {
                let raw: &str = raw;
                let id = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
                Route::TaskDetail(id.into_owned())
            }
            _ => Route::NotFound(format!("/{}", segments.join("/"))),
        }
    }

    /// Canonical path for the route, as used by the breadcrumb trail.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Playground => "/playground".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::TaskDetail(id) => format!("/tasks/{}", urlencoding::encode(id)),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    /// First path segment; the breadcrumb context is reset when it changes.
    pub fn root_segment(&self) -> &str {
        match self {
            Route::Home => "",
            Route::Playground => "playground",
            Route::Tasks | Route::TaskDetail(_) => "tasks",
            Route::NotFound(path) => path.trim_start_matches('/').split('/').next().unwrap_or_default(),
        }
    }

    /// Value written to the content area's `data-page` attribute.
    pub fn page_name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Playground => "playground",
            Route::Tasks => "tasks",
            Route::TaskDetail(_) => "task-detail",
            Route::NotFound(_) => "not-found",
        }
    }
}
