use crate::record::Level;
use std::env;

/// Minimum level a record needs to be routed.
pub(crate) const LOG_ANALYTICS_LEVEL: &str = "LOG_ANALYTICS_LEVEL";
/// Default minimum level.
pub(crate) const LOG_ANALYTICS_LEVEL_DEFAULT: Level = Level::Info;

/// Router configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterConfig {
    pub(crate) min_level: Level,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfigBuilder::default().build()
    }
}

impl RouterConfig {
    /// Minimum level a record needs to be routed.
    pub fn min_level(&self) -> Level {
        self.min_level
    }
}

/// A builder for creating [`RouterConfig`] instances.
#[derive(Debug)]
pub struct RouterConfigBuilder {
    min_level: Level,
}

impl Default for RouterConfigBuilder {
    /// Create a new [`RouterConfigBuilder`] initialized with the default values.
    /// The values are overridden by environment variables if set.
    /// The supported environment variables are:
    /// * `LOG_ANALYTICS_LEVEL`
    ///
    /// Note: Programmatic configuration overrides any value set via the environment variable.
    fn default() -> Self {
        RouterConfigBuilder {
            min_level: LOG_ANALYTICS_LEVEL_DEFAULT,
        }
        .init_from_env_vars()
    }
}

impl RouterConfigBuilder {
    /// Set the minimum level for [`RouterConfigBuilder`].
    /// Records below it are filtered out by the appenders before they are routed.
    /// The default value is `info`, which lets analytics events and screen views through.
    ///
    /// Corresponding environment variable: `LOG_ANALYTICS_LEVEL`.
    ///
    /// Note: Programmatically setting this will override any value set via the environment variable.
    pub fn with_min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    /// Builds a `RouterConfig`.
    pub fn build(self) -> RouterConfig {
        RouterConfig {
            min_level: self.min_level,
        }
    }

    fn init_from_env_vars(mut self) -> Self {
        if let Ok(value) = env::var(LOG_ANALYTICS_LEVEL) {
            match value.parse::<Level>() {
                Ok(level) => self.min_level = level,
                Err(err) => {
                    crate::analytics_warn!(
                        name: "RouterConfig.InvalidLevel",
                        variable = LOG_ANALYTICS_LEVEL,
                        error = format!("{err}")
                    );
                }
            }
        }
        self
    }
}
