//! Superuser bootstrap configuration from environment variables.
//!
//! Reads `SUPERUSER_EMAIL`, `SUPERUSER_NAME` and `SUPERUSER_PASSWORD`. When all three
//! are present the binary makes sure a superuser with that email exists on startup.

use std::fmt;

/// Credentials of the superuser to bootstrap.
#[derive(Clone)]
pub struct SuperuserConfig {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl fmt::Debug for SuperuserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperuserConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Builds a [`SuperuserConfig`] from the given lookup, if every value is present and non-empty.
fn superuser_from<F>(lookup: F) -> Option<SuperuserConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    Some(SuperuserConfig {
        email: non_empty("SUPERUSER_EMAIL")?,
        name: non_empty("SUPERUSER_NAME")?,
        password: non_empty("SUPERUSER_PASSWORD")?,
    })
}

/// Gets the superuser to bootstrap from the environment.
///
/// # Returns
///
/// `Some(config)` when `SUPERUSER_EMAIL`, `SUPERUSER_NAME` and `SUPERUSER_PASSWORD` are
/// all set, `None` otherwise.
#[must_use]
pub fn get_superuser_config() -> Option<SuperuserConfig> {
    superuser_from(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(vars: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_superuser_from_complete_environment() {
        let vars = HashMap::from([
            ("SUPERUSER_EMAIL", "admin@example.com"),
            ("SUPERUSER_NAME", "Admin"),
            ("SUPERUSER_PASSWORD", "hunter22"),
        ]);
        let config = superuser_from(lookup_in(&vars)).unwrap();
        assert_eq!(config.email, "admin@example.com");
        assert_eq!(config.name, "Admin");
    }

    #[test]
    fn test_superuser_requires_every_value() {
        let vars = HashMap::from([
            ("SUPERUSER_EMAIL", "admin@example.com"),
            ("SUPERUSER_NAME", "  "),
            ("SUPERUSER_PASSWORD", "hunter22"),
        ]);
        assert!(superuser_from(lookup_in(&vars)).is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = SuperuserConfig {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password: "hunter22".to_string(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("<redacted>"));
    }
}
