//! Page behaviors
//!
//! Each behavior resolves its elements on `attach` and stays inert when the
//! page does not carry them.

pub mod countdown;
pub mod fade_in;
pub mod header;
pub mod hover;
pub mod mobile_nav;
pub mod navigation;
pub mod overlay;
pub mod reveal;

pub use countdown::{Countdown, CountdownPhase, CountdownSlots, Remaining};
pub use fade_in::FadeIn;
pub use header::HeaderController;
pub use hover::HoverAccent;
pub use mobile_nav::MobileNav;
pub use navigation::{CardKind, CardNavigator};
pub use reveal::{RevealAnimator, Rect};

/// Deferred work queued by the behaviors
#[derive(Clone, PartialEq, Debug)]
pub enum TimerTask<N> {
    /// End of a card's press animation
    PressRelease { node: N, kind: CardKind },
    /// Fade the body back in after a load
    FadeIn,
    /// First countdown tick, aligned to a whole second
    CountdownStart,
    /// Regular one-second countdown tick
    CountdownTick,
}
