//! Scripted visits
//!
//! A scenario is a JSON file listing visitor input to replay against the
//! fixture page:
//!
//! ```json
//! {
//!   "start": "2025-10-22T16:26:56Z",
//!   "viewport_height": 800,
//!   "steps": [
//!     "load",
//!     { "scroll": 600 },
//!     { "click": ".committee-card[2]" },
//!     { "advance": 150 }
//!   ]
//! }
//! ```

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use dais_core::{fixture, Clock, Dom, SiteConfig, Simulation, SystemClock};
use serde::{Deserialize, Serialize};

use crate::countdown_line;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Instant the page is attached at; the system clock when absent
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub viewport_height: Option<f64>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Scroll(f64),
    Click(String),
    Enter(String),
    Leave(String),
    Key(String),
    Load,
    /// Milliseconds to move the clock forward; negative values are rejected
    Advance(u64),
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

/// State of the page once a scenario has run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub trace: Vec<String>,
    pub navigations: Vec<String>,
    pub header_hidden: bool,
    pub menu_open: bool,
    pub animated_cards: usize,
    pub countdown: String,
    pub subtitle: Option<String>,
    pub body_opacity: Option<String>,
}

impl Report {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.trace {
            let _ = writeln!(out, "  {line}");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Countdown:      {}", self.countdown);
        if let Some(subtitle) = &self.subtitle {
            let _ = writeln!(out, "Subtitle:       {subtitle}");
        }
        let _ = writeln!(out, "Header hidden:  {}", self.header_hidden);
        let _ = writeln!(out, "Menu open:      {}", self.menu_open);
        let _ = writeln!(out, "Animated cards: {}", self.animated_cards);
        if let Some(opacity) = &self.body_opacity {
            let _ = writeln!(out, "Body opacity:   {opacity}");
        }
        if self.navigations.is_empty() {
            let _ = writeln!(out, "Navigations:    (none)");
        } else {
            let _ = writeln!(out, "Navigations:");
            for href in &self.navigations {
                let _ = writeln!(out, "  -> {href}");
            }
        }
        out
    }
}

pub fn run(scenario: &Scenario, config: SiteConfig) -> Result<Report> {
    let mut doc = fixture::event_page();
    if let Some(height) = scenario.viewport_height {
        doc.set_viewport_height(height);
    }
    let start = scenario
        .start
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| SystemClock.now_millis());
    let mut sim = Simulation::new(doc, config, start)?;
    let mut trace = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let line = apply(&mut sim, step).with_context(|| format!("Step {} failed", index + 1))?;
        tracing::debug!(step = index + 1, "{}", line);
        trace.push(line);
    }

    Ok(report(&sim, trace))
}

fn apply(sim: &mut Simulation, step: &Step) -> Result<String> {
    let line = match step {
        Step::Scroll(offset) => {
            sim.scroll_to(*offset);
            format!("scroll {offset}")
        }
        Step::Click(selector) => {
            let node = select(sim, selector)?;
            let outcome = sim.click(node);
            if outcome.prevent_default {
                format!("click {} (default prevented)", sim.doc().describe(node))
            } else {
                format!("click {}", sim.doc().describe(node))
            }
        }
        Step::Enter(selector) => {
            let node = select(sim, selector)?;
            sim.pointer_enter(node);
            format!("enter {}", sim.doc().describe(node))
        }
        Step::Leave(selector) => {
            let node = select(sim, selector)?;
            sim.pointer_leave(node);
            format!("leave {}", sim.doc().describe(node))
        }
        Step::Key(key) => {
            sim.key_down(key);
            format!("key {key}")
        }
        Step::Load => {
            sim.load();
            "load".to_string()
        }
        Step::Advance(millis) => {
            let ran = sim.advance(i64::try_from(*millis).unwrap_or(i64::MAX));
            format!("advance {millis}ms ({ran} timer(s))")
        }
    };
    Ok(line)
}

fn select(sim: &Simulation, selector: &str) -> Result<dais_core::NodeId> {
    sim.doc()
        .select(selector)
        .ok_or_else(|| anyhow!("No element matches '{}'", selector))
}

fn report(sim: &Simulation, trace: Vec<String>) -> Report {
    let doc = sim.doc();
    let header_hidden = doc
        .element_by_id("header")
        .is_some_and(|header| doc.has_class(&header, "hidden"));
    let animated_cards = doc
        .elements_by_class("committee-card")
        .iter()
        .filter(|card| doc.has_class(card, "animate"))
        .count();

    Report {
        trace,
        navigations: doc.navigations().to_vec(),
        header_hidden,
        menu_open: sim.page().is_menu_open(),
        animated_cards,
        countdown: countdown_line(doc, sim.page().countdown_phase(), sim.page().config()),
        subtitle: doc
            .first_by_class("countdown-subtitle")
            .map(|node| doc.text(node).to_string()),
        body_opacity: doc.style(doc.root(), "opacity").map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(json: &str) -> Scenario {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_tagged_steps() {
        let parsed = scenario(
            r##"{
                "start": "2025-10-22T16:26:56Z",
                "steps": ["load", {"scroll": 600}, {"click": "#hamburger-btn"},
                          {"key": "Escape"}, {"advance": 100}]
            }"##,
        );
        assert_eq!(
            parsed.steps,
            vec![
                Step::Load,
                Step::Scroll(600.0),
                Step::Click("#hamburger-btn".into()),
                Step::Key("Escape".into()),
                Step::Advance(100),
            ]
        );
        assert!(parsed.viewport_height.is_none());
    }

    #[test]
    fn negative_advance_is_rejected() {
        let err = serde_json::from_str::<Scenario>(r#"{"steps": [{"advance": -5}]}"#).unwrap_err();
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn huge_advance_runs_out_the_countdown() {
        let parsed = scenario(
            r#"{"start": "2025-10-23T18:29:58Z", "steps": [{"advance": 18446744073709551615}]}"#,
        );
        let report = run(&parsed, SiteConfig::default()).unwrap();

        assert_eq!(report.countdown, "Event Started");
        assert_eq!(report.trace, vec!["advance 18446744073709551615ms (2 timer(s))".to_string()]);
    }

    #[test]
    fn card_click_navigates_after_press() {
        let parsed = scenario(
            r#"{
                "start": "2025-10-22T16:26:56Z",
                "steps": [{"click": ".committee-card[2]"}, {"advance": 150}]
            }"#,
        );
        let report = run(&parsed, SiteConfig::default()).unwrap();

        assert_eq!(report.navigations, vec!["committees/legal.html".to_string()]);
        assert_eq!(report.countdown, "01d 02h 03m 04s");
        assert_eq!(report.trace.len(), 2);
    }

    #[test]
    fn menu_state_and_fade_are_reported() {
        let parsed = scenario(
            r##"{
                "start": "2025-10-22T16:26:56Z",
                "steps": ["load", {"advance": 100}, {"click": "#hamburger-btn"}]
            }"##,
        );
        let report = run(&parsed, SiteConfig::default()).unwrap();

        assert!(report.menu_open);
        assert_eq!(report.body_opacity.as_deref(), Some("1"));
        assert!(report.render().contains("Menu open:      true"));
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let parsed =
            scenario(r##"{"start": "2025-10-22T16:26:56Z", "steps": [{"click": "#nope"}]}"##);
        let err = run(&parsed, SiteConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("No element matches '#nope'"));
    }
}
