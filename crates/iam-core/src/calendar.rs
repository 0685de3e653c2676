use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

use crate::{Error, Result};

pub const DEFAULT_TIMEZONE: &str = "US/Eastern";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves "today" in the team's time zone.
#[derive(Clone)]
pub struct TeamCalendar {
    tz: Tz,
    clock: Arc<dyn Clock>,
}

impl TeamCalendar {
    pub fn new(tz: Tz, clock: Arc<dyn Clock>) -> Self {
        Self { tz, clock }
    }

    pub fn system(tz: Tz) -> Self {
        Self::new(tz, Arc::new(SystemClock))
    }

    /// Build from an IANA zone name such as `US/Eastern` or `Europe/Berlin`.
    pub fn from_zone_name(name: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| Error::Config(format!("Unknown time zone: {}", name)))?;

        Ok(Self::new(tz, clock))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.tz)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub fn local_time(&self) -> NaiveTime {
        self.now().time()
    }
}

impl std::fmt::Debug for TeamCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamCalendar")
            .field("tz", &self.tz)
            .field("now", &self.clock.now())
            .finish()
    }
}
