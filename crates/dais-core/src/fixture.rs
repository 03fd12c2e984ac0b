//! A representative event page
//!
//! Mirrors the markup the behaviors expect on the live site: fixed header
//! with a hamburger menu, a countdown, committee cards, and the secretariat
//! roster.

use crate::headless::{ElementSpec, HeadlessDocument};

/// Committee slugs on the fixture page, in card order
pub const COMMITTEES: [&str; 4] = ["unsc", "unhrc", "legal", "disec"];

/// Secretariat slugs on the fixture page, in roster order
pub const MEMBERS: [&str; 2] = ["secretary-general", "director-general"];

pub const CARD_TOP: f64 = 1_200.0;
pub const CARD_HEIGHT: f64 = 400.0;
pub const CARD_GAP: f64 = 40.0;

/// Build the fixture page
///
/// Cards are laid out from [`CARD_TOP`] downward; the last card has no
/// slug so missing-attribute handling can be exercised.
pub fn event_page() -> HeadlessDocument {
    let mut doc = HeadlessDocument::new();
    let body = doc.root();

    doc.append(
        body,
        ElementSpec::new("div")
            .class("background-overlay")
            .style("transform", "translateY(120px)"),
    );

    let header = doc.append(body, ElementSpec::new("header").id("header").rect(0.0, 80.0));
    doc.append(header, ElementSpec::new("button").id("hamburger-btn").class("hamburger"));
    let mobile_nav = doc.append(body, ElementSpec::new("nav").id("mobile-nav"));
    for (href, label) in [("#committees", "Committees"), ("#secretariat", "Secretariat")] {
        doc.append(
            mobile_nav,
            ElementSpec::new("a")
                .class("mobile-nav-link")
                .data("href", href)
                .text(label),
        );
    }

    let hero = doc.append(body, ElementSpec::new("section").id("hero").rect(80.0, 900.0));
    let countdown = doc.append(hero, ElementSpec::new("div").class("countdown"));
    for id in ["cd-d", "cd-h", "cd-m", "cd-s"] {
        doc.append(countdown, ElementSpec::new("span").id(id).text("--"));
    }
    doc.append(
        hero,
        ElementSpec::new("p")
            .class("countdown-subtitle")
            .text("until the opening ceremony"),
    );

    let committees = doc.append(body, ElementSpec::new("section").id("committees"));
    let slugs = COMMITTEES.iter().map(|slug| Some(*slug)).chain([None]);
    for (index, slug) in slugs.enumerate() {
        let top = CARD_TOP + index as f64 * (CARD_HEIGHT + CARD_GAP);
        let mut card = ElementSpec::new("div").class("committee-card").rect(top, CARD_HEIGHT);
        if let Some(slug) = slug {
            card = card.data("committee", slug);
        }
        let card = doc.append(committees, card);
        doc.append(card, ElementSpec::new("img").class("committee-image"));
        doc.append(card, ElementSpec::new("h3").text(slug.unwrap_or("coming soon")));
    }

    let secretariat = doc.append(body, ElementSpec::new("section").id("secretariat"));
    for slug in MEMBERS {
        let member = doc.append(
            secretariat,
            ElementSpec::new("div").class("secretariat-member").data("member", slug),
        );
        let link = doc.append(member, ElementSpec::new("a").class("member-link"));
        doc.append(link, ElementSpec::new("span").class("member-name").text(slug));
    }
    doc.append(secretariat, ElementSpec::new("div").class("secretariat-member"));

    doc
}
