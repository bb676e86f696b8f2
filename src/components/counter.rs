use std::rc::Rc;

use web_sys::{Document, Element};

use crate::components::reveal::ViewportWatcher;
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::utils::dom;
use crate::utils::scheduler::{Scheduler, Tick};

pub const STATS_SELECTOR: &str = ".stats";
pub const STAT_NUMBER_SELECTOR: &str = ".stat-number";

/// Anything that can show the counter's text.
pub trait CounterDisplay {
    fn show_text(&self, text: &str);
}

impl CounterDisplay for Element {
    fn show_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

/// Count-up state advanced once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, tick_ms: u32) -> Self {
        let steps = duration_ms as f64 / tick_ms.max(1) as f64;
        let increment = if steps > 0.0 {
            target as f64 / steps
        } else {
            f64::INFINITY
        };
        Self {
            target,
            increment,
            current: 0.0,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one tick and returns the text to display.
    pub fn tick(&mut self) -> String {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.finished = true;
            format!("{}+", self.target)
        } else {
            format!("{}+", self.current.floor() as i64)
        }
    }
}

/// Counts `display` up from 0 to `target` over `duration_ms`.
pub fn animate(
    display: Rc<dyn CounterDisplay>,
    target: i64,
    duration_ms: u32,
    tick_ms: u32,
    scheduler: &dyn Scheduler,
) {
    let mut animation = CounterAnimation::new(target, duration_ms, tick_ms);
    scheduler.every(
        tick_ms,
        Box::new(move || {
            display.show_text(&animation.tick());
            if animation.is_finished() {
                Tick::Stop
            } else {
                Tick::Continue
            }
        }),
    );
}

/// Reads a stat such as `"150+"` the way the page's markup writes it: the first
/// `+` is dropped, then a leading integer is taken. Values outside `i64` are
/// not animated.
pub fn parse_stat_value(text: &str) -> Option<i64> {
    let text = text.replacen('+', "", 1);
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Watches the stats panel and runs every counter in it once.
pub fn install_stats_panel(
    document: &Document,
    scheduler: Rc<dyn Scheduler>,
    config: &SiteConfig,
) -> SiteResult<Option<ViewportWatcher>> {
    let Some(stats) = document.query_selector(STATS_SELECTOR)? else {
        log::debug!("No stats panel on this page");
        return Ok(None);
    };

    let watcher = ViewportWatcher::new(config.stats_threshold, None);
    let duration_ms = config.counter_duration_ms;
    let tick_ms = config.counter_tick_ms;
    watcher.observe(
        &stats,
        Box::new(move |panel: &Element| {
            let numbers = match dom::select_all_within(panel, STAT_NUMBER_SELECTOR) {
                Ok(numbers) => numbers,
                Err(e) => {
                    log::warn!("Failed to read stat numbers: {}", e);
                    return;
                }
            };
            for number in numbers {
                let text = number.text_content().unwrap_or_default();
                if let Some(value) = parse_stat_value(&text) {
                    animate(Rc::new(number), value, duration_ms, tick_ms, &*scheduler);
                }
            }
        }),
    );
    Ok(Some(watcher))
}
