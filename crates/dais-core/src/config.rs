//! Site configuration
//!
//! Every value has a default matching the live event page, so an empty JSON
//! object (or no file at all) yields the production behavior.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{DaisError, DaisResult};

/// Countdown target: midnight IST on the first conference day
pub const DEFAULT_COUNTDOWN_TARGET: &str = "2025-10-24T00:00:00+05:30";

/// Subtitle text shown once the countdown completes
pub const DEFAULT_COMPLETION_MESSAGE: &str = "Event Started";

/// Tunable values for every page behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub countdown: CountdownConfig,
    pub header: HeaderConfig,
    pub press: PressConfig,
    pub fade_in: FadeInConfig,
    pub hover: HoverConfig,
    pub reveal: RevealConfig,
    pub routes: RouteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// RFC 3339 instant the countdown runs toward
    pub target: String,
    pub completion_message: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_COUNTDOWN_TARGET.to_string(),
            completion_message: DEFAULT_COMPLETION_MESSAGE.to_string(),
        }
    }
}

impl CountdownConfig {
    /// Parse the configured target instant
    pub fn target_instant(&self) -> DaisResult<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.target).map_err(|source| DaisError::InvalidTarget {
            value: self.target.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Offset the page must scroll past before the header may hide
    pub hide_threshold: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            hide_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressConfig {
    pub delay_ms: u64,
    pub transform: String,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            delay_ms: 150,
            transform: "scale(0.98)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub delay_ms: u64,
    pub transition: String,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            transition: "opacity 0.5s ease-in-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub raised_shadow: String,
    pub resting_shadow: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            raised_shadow: "0 20px 50px rgba(223, 195, 111, 0.6), 0 0 30px rgba(223, 195, 111, 0.3)"
                .to_string(),
            resting_shadow: "0 10px 30px rgba(223, 195, 111, 0.2)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible, in `[0, 1]`
    pub threshold: f64,
    /// Amount the viewport's bottom edge is pulled up by
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }
}

impl RevealConfig {
    /// Root margin in the CSS form an intersection observer expects
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub committee_prefix: String,
    pub member_prefix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            committee_prefix: "committees".to_string(),
            member_prefix: "secretariat".to_string(),
        }
    }
}

impl SiteConfig {
    /// Decode a configuration from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> DaisResult<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> DaisResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check values that would otherwise produce a silently broken page
    pub fn validate(&self) -> DaisResult<()> {
        self.countdown.target_instant()?;

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(DaisError::InvalidConfig(format!(
                "reveal threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if self.reveal.bottom_margin < 0.0 {
            return Err(DaisError::InvalidConfig(format!(
                "reveal bottom margin must not be negative, got {}",
                self.reveal.bottom_margin
            )));
        }
        if !self.header.hide_threshold.is_finite() {
            return Err(DaisError::InvalidConfig(
                "header hide threshold must be finite".to_string(),
            ));
        }
        let delays = [("press", self.press.delay_ms), ("fade_in", self.fade_in.delay_ms)];
        for (name, delay_ms) in delays {
            if i64::try_from(delay_ms).is_err() {
                return Err(DaisError::InvalidConfig(format!(
                    "{name} delay must be at most {} ms, got {delay_ms}",
                    i64::MAX
                )));
            }
        }
        if self.routes.committee_prefix.is_empty() || self.routes.member_prefix.is_empty() {
            return Err(DaisError::InvalidConfig(
                "route prefixes must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
