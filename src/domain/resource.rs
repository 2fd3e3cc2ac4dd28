// Catalogue of the backend resources polled by the dashboard
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Overview,
    Tasks,
    Sessions,
    Automation,
    Tokens,
    Memory,
}

impl Resource {
    /// Every resource, in the order a cycle issues its requests
    pub const ALL: [Resource; 6] = [
        Resource::Overview,
        Resource::Tasks,
        Resource::Sessions,
        Resource::Automation,
        Resource::Tokens,
        Resource::Memory,
    ];

    /// Backend path, relative to the configured base URL
    pub fn path(self) -> &'static str {
        match self {
            Resource::Overview => "/api/overview",
            Resource::Tasks => "/api/tasks",
            Resource::Sessions => "/api/sessions",
            Resource::Automation => "/api/automation",
            Resource::Tokens => "/api/metrics/tokens",
            Resource::Memory => "/api/memory",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Overview => "overview",
            Resource::Tasks => "tasks",
            Resource::Sessions => "sessions",
            Resource::Automation => "automation",
            Resource::Tokens => "tokens",
            Resource::Memory => "memory",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<&str> = Resource::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), Resource::ALL.len());
        assert_eq!(Resource::Tokens.path(), "/api/metrics/tokens");
    }

    #[test]
    fn test_display_uses_slot_name() {
        assert_eq!(Resource::Tokens.to_string(), "tokens");
        assert_eq!(Resource::Overview.to_string(), "overview");
    }
}
