use crate::FightConfigBuilder;

/// The user agent sent on every request, unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("axum-fight/", env!("CARGO_PKG_VERSION"));

/// The defaults used by every [`RequestConfig`](crate::RequestConfig) created from it,
/// using [`RequestConfig::new_with_config()`](crate::RequestConfig::new_with_config()).
///
/// ```rust
/// use ::axum_fight::FightConfig;
/// use ::axum_fight::RequestConfig;
///
/// let config = FightConfig::builder()
///     .user_agent("my-app-tests/1.0")
///     .default_content_type("application/json")
///     .build();
///
/// let request = RequestConfig::new_with_config(config).post("/users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightConfig {
    /// The `User-Agent` header added to each request.
    /// Headers set on the request still take priority.
    ///
    /// **Defaults** to `axum-fight/<version>`.
    pub user_agent: String,

    /// The content type to use when a request has no explicit content type.
    /// This takes priority over the content type guessed from the body.
    ///
    /// **Defaults** to None, where the content type is guessed.
    pub default_content_type: Option<String>,

    /// Marks the cookies built for each request as `Secure`.
    ///
    /// Only the name and value of a cookie are sent in a request,
    /// so this shows up in the debug output only.
    ///
    /// **Defaults** to false.
    pub secure_cookies: bool,

    /// Logs every request built, as if `set_debug(true)` was called.
    ///
    /// **Defaults** to false.
    pub debug: bool,
}

impl FightConfig {
    pub fn builder() -> FightConfigBuilder {
        FightConfigBuilder::default()
    }
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_content_type: None,
            secure_cookies: false,
            debug: false,
        }
    }
}

#[cfg(test)]
mod test_default {
    use super::*;

    #[test]
    fn it_should_use_crate_version_in_user_agent() {
        let config = FightConfig::default();

        assert!(config.user_agent.starts_with("axum-fight/"));
        assert!(config.user_agent.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
