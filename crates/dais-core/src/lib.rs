//! Dais Core Library
//!
//! Presentation behaviors for a conference's static event page: a header
//! that gets out of the way while scrolling, committee cards that animate
//! into view and open their committee page, hover accents, a fade-in on
//! load, the mobile menu, and a countdown to the opening ceremony.
//!
//! ## Overview
//!
//! Behaviors are written against the [`Dom`] trait and a [`Clock`], and
//! collected in a [`Page`]. Attaching a page yields the listeners the host
//! must register; the host feeds events and due timers back in. Two hosts
//! exist: [`Simulation`] over the in-memory [`HeadlessDocument`], and the
//! browser host in the `dais-web` crate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dais_core::{fixture, SiteConfig, Simulation};
//!
//! let mut sim = Simulation::new(fixture::event_page(), SiteConfig::default(), now_millis)?;
//! let card = sim.doc().select(".committee-card[2]").unwrap();
//! sim.click(card);
//! sim.advance(150);
//! assert_eq!(sim.doc().location(), Some("committees/legal.html"));
//! ```

pub mod clock;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod fixture;
pub mod headless;
pub mod page;
pub mod scheduler;
pub mod sim;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use components::{CardKind, CountdownPhase, Remaining, TimerTask};
pub use config::SiteConfig;
pub use dom::Dom;
pub use error::{DaisError, DaisResult};
pub use event::{
    Attachment, Binding, EventData, EventKind, Handler, IntersectionEntry, ListenTarget,
    Observation, Outcome,
};
pub use headless::{ElementSpec, HeadlessDocument, NodeId};
pub use page::Page;
pub use scheduler::{Scheduler, TimerId};
pub use sim::Simulation;
