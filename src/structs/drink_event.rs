use {
    crate::{clock::Clock, structs::drink_type::DrinkType},
    chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrinkEvent {
    /// Milliseconds since the Unix epoch of when the drink was recorded
    pub timestamp: i64,

    pub drink_type: DrinkType,
}

impl DrinkEvent {
    pub fn new(timestamp: i64, drink_type: DrinkType) -> Self {
        Self {
            timestamp,
            drink_type,
        }
    }

    pub fn now(drink_type: DrinkType, clock: &dyn Clock) -> Self {
        Self {
            timestamp: clock.now().timestamp_millis(),
            drink_type,
        }
    }

    pub fn local_time(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    pub fn local_date(&self) -> Option<NaiveDate> {
        self.local_time().map(|t| t.date_naive())
    }

    /// Whether the event falls on the same local calendar date as `now`.
    pub fn is_from_today(&self, now: DateTime<Local>) -> bool {
        self.local_date() == Some(now.date_naive())
    }

    /// Local `HH:MM` label for the log list.
    pub fn time_of_day(&self) -> String {
        match self.local_time() {
            Some(t) => format!("{:02}:{:02}", t.hour(), t.minute()),
            None => "--:--".to_string(),
        }
    }
}
