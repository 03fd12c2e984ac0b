//! End-to-end behavior tests
//!
//! These drive the fixture page through the headless simulation the way a
//! visitor would: scrolling, clicking, hovering, and waiting.

use std::io::Write;
use std::sync::{Arc, Mutex};

use dais_core::{fixture, CountdownPhase, Dom, HeadlessDocument, NodeId, SiteConfig, Simulation};

// ============================================================================
// Test Utilities
// ============================================================================

/// 2025-10-24T00:00:00+05:30
const TARGET_MS: i64 = 1_761_244_200_000;

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

fn sim_at(now: i64) -> Simulation {
    Simulation::new(fixture::event_page(), SiteConfig::default(), now)
        .expect("fixture page attaches")
}

fn sim() -> Simulation {
    sim_at(TARGET_MS - 30 * DAY)
}

fn by_id(sim: &Simulation, id: &str) -> NodeId {
    sim.doc().element_by_id(id).unwrap_or_else(|| panic!("missing #{id}"))
}

fn nth(sim: &Simulation, class: &str, index: usize) -> NodeId {
    sim.doc().elements_by_class(class)[index]
}

fn slot_texts(sim: &Simulation) -> Vec<String> {
    ["cd-d", "cd-h", "cd-m", "cd-s"]
        .iter()
        .map(|id| sim.doc().text(by_id(sim, id)).to_string())
        .collect()
}

fn subtitle(sim: &Simulation) -> String {
    let node = sim.doc().first_by_class("countdown-subtitle").unwrap();
    sim.doc().text(node).to_string()
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}

// ============================================================================
// Header
// ============================================================================

#[test]
fn header_hides_on_scroll_down_and_returns_on_scroll_up() {
    let mut sim = sim();
    let header = by_id(&sim, "header");

    sim.scroll_to(80.0);
    assert!(!sim.doc().has_class(&header, "hidden"), "below threshold");

    sim.scroll_to(240.0);
    assert!(sim.doc().has_class(&header, "hidden"));

    sim.scroll_to(600.0);
    assert!(sim.doc().has_class(&header, "hidden"));

    sim.scroll_to(590.0);
    assert!(!sim.doc().has_class(&header, "hidden"), "any upward scroll reveals");
    assert_eq!(sim.page().last_scroll_top(), 590.0);
}

#[test]
fn page_without_header_ignores_scroll() {
    let mut doc = HeadlessDocument::new();
    let body = doc.root();
    doc.append(body, dais_core::ElementSpec::new("main"));
    let mut sim = Simulation::new(doc, SiteConfig::default(), 0).unwrap();

    sim.scroll_to(500.0);
    assert_eq!(sim.page().last_scroll_top(), 0.0);
}

// ============================================================================
// Reveal on scroll
// ============================================================================

#[test]
fn cards_animate_once_they_enter_the_viewport() {
    let mut sim = sim();
    let first = nth(&sim, "committee-card", 0);
    let second = nth(&sim, "committee-card", 1);
    assert!(!sim.doc().has_class(&first, "animate"));

    // Card 0 spans 1200..1600; viewport bottom edge sits at scroll + 750
    sim.scroll_to(480.0);
    assert!(!sim.doc().has_class(&first, "animate"), "30 of 400 units is under 10%");

    sim.scroll_to(500.0);
    assert!(sim.doc().has_class(&first, "animate"));
    assert!(!sim.doc().has_class(&second, "animate"));

    // Leaving the viewport never removes the flag
    sim.scroll_to(0.0);
    sim.scroll_to(1_000.0);
    assert!(sim.doc().has_class(&first, "animate"));
    assert!(sim.doc().has_class(&second, "animate"));
    assert_eq!(sim.doc().classes(first), vec!["committee-card", "animate"]);
}

// ============================================================================
// Card navigation
// ============================================================================

#[test]
fn committee_card_presses_then_navigates() {
    let mut sim = sim();
    let legal = sim.doc().select(".committee-card[2]").unwrap();

    let outcome = sim.click(legal);
    assert!(!outcome.prevent_default);
    assert_eq!(sim.doc().style(legal, "transform"), Some("scale(0.98)"));

    sim.advance(149);
    assert_eq!(sim.doc().location(), None);
    assert_eq!(sim.doc().style(legal, "transform"), Some("scale(0.98)"));

    sim.advance(1);
    assert_eq!(sim.doc().location(), Some("committees/legal.html"));
    assert_eq!(sim.doc().style(legal, "transform"), None);
}

#[test]
fn card_without_slug_warns_and_stays() {
    let mut sim = sim();
    let last = nth(&sim, "committee-card", fixture::COMMITTEES.len());

    let (_, logs) = with_captured_logs(|| {
        sim.click(last);
        sim.advance(150);
    });

    assert!(logs.contains("No data-committee found for this card"), "logs: {logs}");
    assert!(sim.doc().navigations().is_empty());
    assert_eq!(sim.doc().style(last, "transform"), None);
}

#[test]
fn member_link_click_is_taken_over() {
    let mut sim = sim();
    let member = nth(&sim, "secretariat-member", 0);
    let name = nth(&sim, "member-name", 0);

    assert_eq!(sim.doc().style(member, "cursor"), Some("pointer"));

    let outcome = sim.click(name);
    assert!(outcome.prevent_default, "anchor default must be suppressed");
    sim.advance(150);
    assert_eq!(sim.doc().location(), Some("secretariat/secretary-general.html"));
}

#[test]
fn member_click_outside_link_keeps_default() {
    let mut sim = sim();
    let member = nth(&sim, "secretariat-member", 1);

    let outcome = sim.click(member);
    assert!(!outcome.prevent_default);
    sim.advance(150);
    assert_eq!(sim.doc().location(), Some("secretariat/director-general.html"));
}

#[test]
fn member_without_slug_warns() {
    let mut sim = sim();
    let member = nth(&sim, "secretariat-member", fixture::MEMBERS.len());

    let (_, logs) = with_captured_logs(|| {
        sim.click(member);
        sim.advance(150);
    });
    assert!(logs.contains("No data-member found for this card"), "logs: {logs}");
    assert!(sim.doc().navigations().is_empty());
}

#[test]
fn overlapping_presses_each_navigate() {
    let mut sim = sim();
    let unsc = nth(&sim, "committee-card", 0);
    let disec = nth(&sim, "committee-card", 3);

    sim.click(unsc);
    sim.advance(100);
    sim.click(disec);
    sim.advance(200);

    assert_eq!(
        sim.doc().navigations(),
        ["committees/unsc.html".to_string(), "committees/disec.html".to_string()]
    );
}

#[test]
fn longest_press_delay_never_navigates_early() {
    let config = SiteConfig::from_json(r#"{ "press": { "delay_ms": 9223372036854775807 } }"#)
        .expect("largest delay is valid");
    let mut sim = Simulation::new(fixture::event_page(), config, TARGET_MS - 30 * DAY).unwrap();
    let legal = nth(&sim, "committee-card", 2);

    sim.click(legal);
    sim.advance(0);
    assert!(sim.doc().navigations().is_empty());

    sim.advance(HOUR);
    assert!(sim.doc().navigations().is_empty());
    assert_eq!(sim.doc().style(legal, "transform"), Some("scale(0.98)"));
}

// ============================================================================
// Hover, overlay, fade-in
// ============================================================================

#[test]
fn hovering_images_swaps_shadows() {
    let mut sim = sim();
    let image = nth(&sim, "committee-image", 1);
    let hover = SiteConfig::default().hover;

    sim.pointer_enter(image);
    assert_eq!(sim.doc().style(image, "box-shadow"), Some(hover.raised_shadow.as_str()));
    sim.pointer_leave(image);
    assert_eq!(sim.doc().style(image, "box-shadow"), Some(hover.resting_shadow.as_str()));
}

#[test]
fn overlay_transform_cleared_on_attach() {
    let sim = sim();
    let overlay = sim.doc().first_by_class("background-overlay").unwrap();
    assert_eq!(sim.doc().style(overlay, "transform"), None);
}

#[test]
fn load_fades_the_body_in() {
    let mut sim = sim();
    let body = sim.doc().root();

    sim.load();
    assert_eq!(sim.doc().style(body, "opacity"), Some("0"));
    assert_eq!(sim.doc().style(body, "transition"), Some("opacity 0.5s ease-in-out"));

    sim.advance(99);
    assert_eq!(sim.doc().style(body, "opacity"), Some("0"));
    sim.advance(1);
    assert_eq!(sim.doc().style(body, "opacity"), Some("1"));
}

#[test]
fn repeated_load_restarts_the_fade() {
    let mut sim = sim();
    let body = sim.doc().root();

    sim.load();
    sim.advance(80);
    sim.load();
    assert_eq!(sim.doc().style(body, "opacity"), Some("0"));

    sim.advance(99);
    assert_eq!(sim.doc().style(body, "opacity"), Some("0"), "delay never skipped");
    sim.advance(1);
    assert_eq!(sim.doc().style(body, "opacity"), Some("1"));
}

// ============================================================================
// Mobile navigation
// ============================================================================

fn assert_menu(sim: &Simulation, open: bool) {
    let button = by_id(sim, "hamburger-btn");
    let panel = by_id(sim, "mobile-nav");
    assert_eq!(sim.doc().has_class(&button, "active"), open);
    assert_eq!(sim.doc().has_class(&panel, "active"), open);
    assert_eq!(sim.page().is_menu_open(), open);
    let overflow = sim.doc().style(sim.doc().root(), "overflow");
    assert_eq!(overflow, if open { Some("hidden") } else { None });
}

#[test]
fn hamburger_toggles_menu_and_scroll_lock() {
    let mut sim = sim();
    let button = by_id(&sim, "hamburger-btn");
    assert_menu(&sim, false);

    sim.click(button);
    assert_menu(&sim, true);
    sim.click(button);
    assert_menu(&sim, false);
}

#[test]
fn escape_closes_menu() {
    let mut sim = sim();
    sim.click(by_id(&sim, "hamburger-btn"));
    sim.key_down("Escape");
    assert_menu(&sim, false);
}

#[test]
fn outside_click_closes_menu_inside_click_does_not() {
    let mut sim = sim();
    sim.click(by_id(&sim, "hamburger-btn"));

    sim.click(by_id(&sim, "mobile-nav"));
    assert_menu(&sim, true);

    sim.click(by_id(&sim, "hero"));
    assert_menu(&sim, false);
}

#[test]
fn nav_link_click_closes_menu() {
    let mut sim = sim();
    sim.click(by_id(&sim, "hamburger-btn"));
    let outcome = sim.click(nth(&sim, "mobile-nav-link", 1));
    assert!(!outcome.prevent_default, "link navigation proceeds");
    assert_menu(&sim, false);
}

#[test]
fn hamburger_logs_state_transitions() {
    let mut sim = sim();
    let button = by_id(&sim, "hamburger-btn");
    let (_, logs) = with_captured_logs(|| sim.click(button));
    assert!(logs.contains("Hamburger clicked"), "logs: {logs}");
    assert!(logs.contains("Hamburger toggled"), "logs: {logs}");
}

// ============================================================================
// Countdown
// ============================================================================

#[test]
fn countdown_renders_remaining_time() {
    let now = TARGET_MS - (DAY + 2 * HOUR + 3 * MINUTE + 4 * SECOND);
    let sim = sim_at(now);
    assert_eq!(slot_texts(&sim), vec!["01", "02", "03", "04"]);
    assert_eq!(subtitle(&sim), "until the opening ceremony");
}

#[test]
fn countdown_days_exceed_two_digits() {
    let sim = sim_at(TARGET_MS - 150 * DAY - 5 * SECOND);
    assert_eq!(slot_texts(&sim), vec!["150", "00", "00", "05"]);
}

#[test]
fn countdown_ticks_on_second_boundaries() {
    let now = TARGET_MS - 10 * SECOND - 300;
    let mut sim = sim_at(now);
    assert_eq!(slot_texts(&sim)[3], "10");
    assert_eq!(sim.page().countdown_phase(), CountdownPhase::Aligning);

    // First tick lands on the next whole second: 300ms later
    sim.advance(299);
    assert_eq!(sim.page().countdown_phase(), CountdownPhase::Aligning);
    sim.advance(1);
    assert_eq!(sim.page().countdown_phase(), CountdownPhase::Ticking);
    assert_eq!(slot_texts(&sim)[3], "10");

    sim.advance(1_000);
    assert_eq!(slot_texts(&sim)[3], "09");
    sim.advance(3_000);
    assert_eq!(slot_texts(&sim)[3], "06");
}

#[test]
fn countdown_finishes_and_stops() {
    let mut sim = sim_at(TARGET_MS - 2 * SECOND - 500);
    sim.advance(10 * SECOND);

    assert_eq!(slot_texts(&sim), vec!["00", "00", "00", "00"]);
    assert_eq!(subtitle(&sim), "Event Started");
    assert_eq!(sim.page().countdown_phase(), CountdownPhase::Finished);
    assert_eq!(sim.page().pending_timers(), 0);

    // Nothing re-renders afterwards
    let seconds = by_id(&sim, "cd-s");
    sim.page_mut().doc_mut().set_text(&seconds, "untouched");
    sim.advance(60 * SECOND);
    assert_eq!(sim.doc().text(seconds), "untouched");
}

#[test]
fn countdown_after_target_renders_zero_immediately() {
    let sim = sim_at(TARGET_MS + HOUR);
    assert_eq!(slot_texts(&sim), vec!["00", "00", "00", "00"]);
    assert_eq!(subtitle(&sim), "Event Started");
    assert_eq!(sim.page().pending_timers(), 0);
}

#[test]
fn countdown_with_legacy_ids_and_custom_message() {
    let mut doc = HeadlessDocument::new();
    let body = doc.root();
    for id in ["cd-days", "cd-hours", "cd-minutes", "cd-seconds"] {
        doc.append(body, dais_core::ElementSpec::new("span").id(id));
    }
    let note = doc.append(body, dais_core::ElementSpec::new("p").class("countdown-subtitle"));

    let mut config = SiteConfig::default();
    config.countdown.completion_message = "In session".to_string();
    let mut sim = Simulation::new(doc, config, TARGET_MS - 1_200).unwrap();
    let days = by_id(&sim, "cd-days");
    assert_eq!(sim.doc().text(days), "00");

    sim.advance(2 * SECOND);
    assert_eq!(sim.doc().text(note), "In session");
}

#[test]
fn countdown_without_slots_is_inert() {
    let mut doc = HeadlessDocument::new();
    let body = doc.root();
    doc.append(body, dais_core::ElementSpec::new("span").id("cd-d"));
    let sim = Simulation::new(doc, SiteConfig::default(), TARGET_MS - DAY).unwrap();
    assert_eq!(sim.page().countdown_phase(), CountdownPhase::Inactive);
    assert_eq!(sim.page().pending_timers(), 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn reattach_does_not_duplicate_listeners() {
    let mut sim = sim();
    let bindings = sim.attachment().bindings.len();
    sim.reattach();
    assert_eq!(sim.attachment().bindings.len(), bindings);
    assert_eq!(sim.page().pending_timers(), 1, "only the aligned countdown start");

    let button = by_id(&sim, "hamburger-btn");
    sim.click(button);
    assert_menu(&sim, true);
}
