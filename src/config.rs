use serde::Deserialize;
use web_sys::Document;

use crate::error::SiteResult;

/// Attribute on `<body>` that may carry a JSON object overriding any subset of
/// [`SiteConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-site-config";

/// Timings and thresholds for every behaviour on the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub log_level: String,
    pub notification_visible_ms: u32,
    pub notification_exit_ms: u32,
    pub counter_duration_ms: u32,
    pub counter_tick_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub stats_threshold: f64,
    pub back_to_top_threshold: f64,
    pub navbar_scroll_threshold: f64,
    pub anchor_offset: f64,
    pub parallax_factor: f64,
    pub gallery_fade_in_delay_ms: u32,
    pub gallery_hide_delay_ms: u32,
    pub contact_submit_delay_ms: u32,
    pub page_fade_delay_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notification_visible_ms: 5000,
            notification_exit_ms: 300,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            stats_threshold: 0.5,
            back_to_top_threshold: 300.0,
            navbar_scroll_threshold: 100.0,
            anchor_offset: 80.0,
            parallax_factor: 0.5,
            gallery_fade_in_delay_ms: 10,
            gallery_hide_delay_ms: 300,
            contact_submit_delay_ms: 2000,
            page_fade_delay_ms: 100,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> SiteResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the body attribute; defaults when it is absent.
    pub fn from_document(document: &Document) -> SiteResult<Self> {
        match document
            .body()
            .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE))
        {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.notification_visible_ms, 5000);
        assert_eq!(config.notification_exit_ms, 300);
        assert_eq!(config.counter_tick_ms, 16);
        assert_eq!(config.back_to_top_threshold, 300.0);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{"counter_duration_ms": 500, "log_level": "debug"}"#)
            .unwrap();
        assert_eq!(config.counter_duration_ms, 500);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.stats_threshold, 0.5);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid site configuration"));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = SiteConfig {
            log_level: "chatty".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
