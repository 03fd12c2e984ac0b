//! Real-time countdown
//!
//! Attaches the fixture page to the system clock and sleeps until each
//! timer is due, printing the countdown after every tick.

use std::time::Duration;

use anyhow::Result;
use dais_core::{fixture, CountdownPhase, HeadlessDocument, Page, SiteConfig, SystemClock};

use crate::countdown_line;

pub async fn run(config: SiteConfig, max_ticks: Option<usize>) -> Result<()> {
    let mut page = Page::new(fixture::event_page(), SystemClock, config)?;
    page.attach();
    print_line(&page);

    let mut ticks = 0usize;
    loop {
        let finished = page.countdown_phase() == CountdownPhase::Finished;
        if finished || max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        let Some(delay) = page.time_until_next() else {
            tracing::debug!("No timers pending");
            break;
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Received shutdown signal...");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(delay)) => {
                if page.run_due() > 0 {
                    ticks += 1;
                    print_line(&page);
                }
            }
        }
    }

    page.detach();
    Ok(())
}

fn print_line(page: &Page<HeadlessDocument, SystemClock>) {
    println!("{}", countdown_line(page.doc(), page.countdown_phase(), page.config()));
}
