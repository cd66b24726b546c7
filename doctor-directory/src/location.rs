use std::fmt;

/// Path the directory page lives under.
pub const FIND_DOCTOR_PATH: &str = "/find-doctor";

/// The page location the query state is synchronised with.
///
/// Replacing the query is a state sync, not a navigation: implementations
/// overwrite the current query and never push a history entry.
pub trait QueryLocation {
    /// Current query string without the leading `?`.
    fn current_query(&self) -> String;

    fn replace_query(&mut self, query: &str);
}

/// In-memory location: a path plus a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    query: String,
    writes: usize,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: String::new(),
            writes: 0,
        }
    }

    pub fn with_query(path: impl Into<String>, query: &str) -> Self {
        Self {
            path: path.into(),
            query: query.strip_prefix('?').unwrap_or(query).to_string(),
            writes: 0,
        }
    }

    /// Parse user input into a location.
    ///
    /// Accepts a full href (`/find-doctor?sort=fees`), a bare query with or
    /// without `?` (`sort=fees`), or a bare path. A missing path falls back
    /// to `default_path`.
    pub fn from_href(default_path: &str, href: &str) -> Self {
        let href = href.trim();
        match href.split_once('?') {
            Some((path, query)) => {
                let path = if path.is_empty() { default_path } else { path };
                Self::with_query(path, query)
            }
            None if href.starts_with('/') => Self::new(href),
            None => Self::with_query(default_path, href),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of query replacements since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new(FIND_DOCTOR_PATH)
    }
}

impl fmt::Display for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl QueryLocation for MemoryLocation {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.strip_prefix('?').unwrap_or(query).to_string();
        self.writes += 1;
    }
}
