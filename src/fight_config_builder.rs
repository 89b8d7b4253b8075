use crate::FightConfig;

/// This is for easing the building of [`FightConfig`](crate::FightConfig).
///
/// For full documentation see there.
///
/// ```rust
/// use ::axum_fight::FightConfig;
///
/// let config = FightConfig::builder()
///     .secure_cookies()
///     .debug()
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FightConfigBuilder {
    config: FightConfig,
}

impl FightConfigBuilder {
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    pub fn default_content_type(mut self, content_type: &str) -> Self {
        self.config.default_content_type = Some(content_type.to_string());
        self
    }

    pub fn secure_cookies(mut self) -> Self {
        self.config.secure_cookies = true;
        self
    }

    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    pub fn build(self) -> FightConfig {
        self.config
    }
}

#[cfg(test)]
mod test_build {
    use super::*;

    #[test]
    fn it_should_build_default_config_by_default() {
        let config = FightConfig::builder().build();
        let expected = FightConfig::default();

        assert_eq!(config, expected);
    }

    #[test]
    fn it_should_set_user_agent_when_set() {
        let config = FightConfig::builder().user_agent("tests/2.0").build();

        assert_eq!(config.user_agent, "tests/2.0");
    }

    #[test]
    fn it_should_set_default_content_type_when_set() {
        let config = FightConfig::builder()
            .default_content_type("text/csv")
            .build();

        assert_eq!(config.default_content_type, Some("text/csv".to_string()));
    }

    #[test]
    fn it_should_set_secure_cookies_when_set() {
        let config = FightConfig::builder().secure_cookies().build();

        assert_eq!(config.secure_cookies, true);
    }

    #[test]
    fn it_should_set_debug_when_set() {
        let config = FightConfig::builder().debug().build();

        assert_eq!(config.debug, true);
    }
}
