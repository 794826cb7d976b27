// Environment variable loading

use std::collections::HashMap;
use std::env;

/// Loads `<PREFIX>_<KEY>` environment variables.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Collect every variable under the prefix, keyed without the prefix.
    ///
    /// Keys are upper case, e.g. `PUSHWOOSH_BASE_URL` becomes `BASE_URL`.
    pub fn load(&self) -> HashMap<String, String> {
        Self::filter_vars(self.prefix.as_deref(), env::vars())
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Option<String> {
        env::var(self.full_key(key)).ok()
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|| default.to_string())
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    fn filter_vars(
        prefix: Option<&str>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> HashMap<String, String> {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match prefix {
                Some(prefix) => {
                    if let Some(rest) = key.strip_prefix(prefix)
                        && let Some(rest) = rest.strip_prefix('_')
                    {
                        config.insert(rest.to_uppercase(), value);
                    }
                }
                None => {
                    config.insert(key.to_uppercase(), value);
                }
            }
        }

        config
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
