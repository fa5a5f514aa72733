use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Source of the implicit `Date` header written when a message has none.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().into()
    }
}

/// Always returns the same instant. Makes serialized output reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        let offset = at.offset().fix();
        Self(at.with_timezone(&offset))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Formats `date` the way mail `Date` headers expect it, e.g.
/// `Wed, 25 Jun 2014 17:46:00 +0000`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    date.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}
