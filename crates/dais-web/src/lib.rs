//! Dais Browser Host
//!
//! Runs the event page behaviors against the live browser document.
//! Everything here is compiled for `wasm32` only; on other targets the crate
//! is empty and the behaviors are exercised through
//! `dais_core::Simulation` instead.
//!
//! ## Usage
//!
//! ```html
//! <script type="module">
//!   import init from "./pkg/dais_web.js";
//!   init(); // mounts on DOMContentLoaded
//! </script>
//! ```

#![cfg(target_arch = "wasm32")]

mod console;
mod document;
mod host;

use wasm_bindgen::prelude::*;

pub use console::{init_logging, ConsoleMakeWriter};
pub use document::{WebClock, WebDocument};
pub use host::{mount, MountedPage};

/// Module entry point: install logging and mount once the markup is parsed
#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    host::mount_when_ready();
}

/// Detach every behavior from the page
#[wasm_bindgen]
pub fn unmount() {
    host::unmount_current();
}
