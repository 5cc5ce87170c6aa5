//! Environment data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named set of variables substitutable into request execution.
///
/// Variable substitution itself is performed by the Bruno CLI; this crate only
/// enumerates the environments so the user can pick one and forwards the
/// chosen name via `bru run --env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name as listed in the workspace manifest.
    pub name: String,

    /// Variable name to value mapping.
    pub variables: HashMap<String, String>,
}

impl Environment {
    /// Creates a new Environment with no variables.
    pub fn new(name: String) -> Self {
        Self {
            name,
            variables: HashMap::new(),
        }
    }

    /// Returns the value of a variable if defined in this environment.
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.variables.get(variable).map(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_new() {
        let env = Environment::new("production".to_string());
        assert_eq!(env.name, "production");
        assert!(env.variables.is_empty());
    }

    #[test]
    fn test_environment_get() {
        let mut env = Environment::new("dev".to_string());
        env.variables
            .insert("baseUrl".to_string(), "http://localhost:3000".to_string());

        assert_eq!(env.get("baseUrl"), Some("http://localhost:3000"));
        assert_eq!(env.get("missing"), None);
    }
}
