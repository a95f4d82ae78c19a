use chrono::{DateTime, Local, NaiveDate, Utc};

/// The source of wall-clock time, used to mint record ids and to default dates to today.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in the user's time zone.
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
