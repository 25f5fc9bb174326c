use futures::stream::{BoxStream, StreamExt};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{
    drink_log::{DrinkCounts, DrinkLogStore},
    error::StoreError,
    structs::{drink_event::DrinkEvent, drink_type::DrinkType},
};

/// What the log screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogScreen {
    Empty {
        glyph: &'static str,
        title: &'static str,
        hint: &'static str,
    },
    Log {
        title: &'static str,
        total_label: String,
        /// One `emoji count` chip per drink type logged today, in catalog order
        chips: Vec<(DrinkType, String)>,
        /// Newest first
        entries: Vec<LogEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: String,
    pub glyph: &'static str,
    pub drink_type: DrinkType,
}

pub fn render_log_screen(today: &[DrinkEvent]) -> LogScreen {
    if today.is_empty() {
        return LogScreen::Empty {
            glyph: "🍺",
            title: "No drinks yet",
            hint: "Use the tile to log",
        };
    }

    let mut counts = DrinkCounts::new();
    for drink in today {
        *counts.entry(drink.drink_type).or_insert(0) += 1;
    }

    let mut newest_first = today.to_vec();
    newest_first.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    LogScreen::Log {
        title: "Today's Log",
        total_label: format!("Total: {}", today.len()),
        chips: counts
            .into_iter()
            .map(|(drink, count)| (drink, format!("{} {count}", drink.emoji())))
            .collect(),
        entries: newest_first
            .into_iter()
            .map(|d| LogEntry {
                time: d.time_of_day(),
                glyph: d.drink_type.emoji(),
                drink_type: d.drink_type,
            })
            .collect(),
    }
}

/// Feeds the log screen and turns its taps into log writes.
#[derive(Clone)]
pub struct MainViewModel {
    log: DrinkLogStore,
}

impl MainViewModel {
    pub fn new(log: DrinkLogStore) -> Self {
        Self { log }
    }

    pub fn today_drinks(&self) -> BoxStream<'static, Vec<DrinkEvent>> {
        self.log.observe_today()
    }

    pub fn drink_counts(&self) -> BoxStream<'static, DrinkCounts> {
        self.log.observe_counts_today()
    }

    pub fn total_drinks(&self) -> BoxStream<'static, usize> {
        self.log.observe_total_today()
    }

    pub fn screen(&self) -> BoxStream<'static, LogScreen> {
        self.log
            .observe_today()
            .map(|today| render_log_screen(&today))
            .boxed()
    }

    /// Logs a drink in the background. Dropping the handle does not cancel the write.
    pub fn log_drink(&self, drink_type: DrinkType) -> JoinHandle<Result<DrinkEvent, StoreError>> {
        let log = self.log.clone();
        tokio::spawn(async move {
            log.append(drink_type).await.inspect_err(|e| {
                warn!("Unable to log {drink_type}: {e}");
            })
        })
    }

    /// Clears today's tally in the background. See [`DrinkLogStore::reset_today`].
    pub fn reset_all_drinks(&self) -> JoinHandle<Result<(), StoreError>> {
        let log = self.log.clone();
        tokio::spawn(async move {
            log.reset_today().await.inspect_err(|e| {
                warn!("Unable to reset drinks: {e}");
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn at(h: u32, m: u32, drink: DrinkType) -> DrinkEvent {
        let t = Local.with_ymd_and_hms(2024, 6, 1, h, m, 0).single().unwrap();
        DrinkEvent::new(t.timestamp_millis(), drink)
    }

    #[test]
    fn test_empty_screen() {
        assert_eq!(
            render_log_screen(&[]),
            LogScreen::Empty {
                glyph: "🍺",
                title: "No drinks yet",
                hint: "Use the tile to log",
            }
        );
    }

    #[test]
    fn test_log_screen_lists_newest_first() {
        let today = [
            at(19, 5, DrinkType::Wine),
            at(20, 30, DrinkType::Beer),
            at(21, 0, DrinkType::Wine),
        ];

        let LogScreen::Log {
            title,
            total_label,
            chips,
            entries,
        } = render_log_screen(&today)
        else {
            panic!("expected a log screen");
        };

        assert_eq!(title, "Today's Log");
        assert_eq!(total_label, "Total: 3");
        assert_eq!(
            chips,
            vec![
                (DrinkType::Beer, "🍺 1".to_string()),
                (DrinkType::Wine, "🍷 2".to_string()),
            ]
        );
        let times: Vec<&str> = entries.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, vec!["21:00", "20:30", "19:05"]);
        assert_eq!(entries[0].glyph, "🍷");
    }
}
