use std::{hash::Hash, time::Duration};

#[derive(Default, Debug, Clone, Copy)]
pub struct Interval {
    pub months: i64,
    pub days: i64,
    pub nanos: i128,
}

impl Interval {
    pub const SECS_IN_DAY: i64 = 60 * 60 * 24;
    pub const NANOS_IN_SEC: i128 = 1_000_000_000;
    pub const NANOS_IN_DAY: i128 = Self::SECS_IN_DAY as i128 * Self::NANOS_IN_SEC;

    pub const fn new(months: i64, days: i64, nanos: i128) -> Self {
        Self {
            months,
            days,
            nanos,
        }
    }

    pub const fn from_duration(duration: &Duration) -> Self {
        Self::from_nanos(duration.as_nanos() as i128)
    }

    pub const fn from_nanos(nanos: i128) -> Self {
        Self {
            months: 0,
            days: (nanos / Self::NANOS_IN_DAY) as _,
            nanos: nanos % Self::NANOS_IN_DAY,
        }
    }

    pub const fn from_micros(micros: i128) -> Self {
        Self::from_nanos(micros * 1_000)
    }

    pub const fn from_mins(mins: i64) -> Self {
        Self::from_nanos(mins as i128 * 60 * Self::NANOS_IN_SEC)
    }

    pub const fn from_days(days: i64) -> Self {
        Self {
            months: 0,
            days,
            nanos: 0,
        }
    }

    pub const fn from_months(months: i64) -> Self {
        Self {
            months,
            days: 0,
            nanos: 0,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.nanos == 0
    }

    /// The `nanos` field in whole microseconds, truncated toward zero.
    pub const fn micros(&self) -> i128 {
        self.nanos / 1_000
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.months == other.months
            && self.days as i128 * Self::NANOS_IN_DAY + self.nanos
                == other.days as i128 * Self::NANOS_IN_DAY + other.nanos
    }
}

impl Eq for Interval {}

impl Hash for Interval {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.months.hash(state);
        (self.days as i128 * Self::NANOS_IN_DAY + self.nanos).hash(state);
    }
}
