use {
    chrono::{DateTime, Utc},
    std::fmt,
    tap::Pipe,
};

/// Rendering of a converted epoch value, always UTC with sub-second precision dropped.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{value} has {digits} digits, more than any supported epoch unit")]
    Overflow { value: i128, digits: u32 },
    #[error("{value} {unit} since the epoch is outside the representable date-time range")]
    Range { value: i128, unit: EpochUnit },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Unit of an epoch integer, inferred from how many decimal digits it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpochUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl EpochUnit {
    pub fn from_digits(digits: u32) -> Option<Self> {
        match digits {
            0..=10 => Some(EpochUnit::Seconds),
            11..=13 => Some(EpochUnit::Milliseconds),
            14..=16 => Some(EpochUnit::Microseconds),
            17..=19 => Some(EpochUnit::Nanoseconds),
            _ => None,
        }
    }

    pub const fn per_second(self) -> i128 {
        match self {
            EpochUnit::Seconds => 1,
            EpochUnit::Milliseconds => 1_000,
            EpochUnit::Microseconds => 1_000_000,
            EpochUnit::Nanoseconds => 1_000_000_000,
        }
    }

    /// Rounds toward the past, so negative values land on the preceding second.
    pub fn to_datetime(self, value: i128) -> Option<DateTime<Utc>> {
        let per_second = self.per_second();
        let seconds = i64::try_from(value.div_euclid(per_second)).ok()?;
        let nanos = (value.rem_euclid(per_second) * (1_000_000_000 / per_second))
            .pipe(u32::try_from)
            .ok()?;
        DateTime::from_timestamp(seconds, nanos)
    }
}

impl fmt::Display for EpochUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EpochUnit::Seconds => "seconds",
            EpochUnit::Milliseconds => "milliseconds",
            EpochUnit::Microseconds => "microseconds",
            EpochUnit::Nanoseconds => "nanoseconds",
        })
    }
}

/// Decimal digits of `value`, sign ignored. Zero has one digit.
pub fn digit_count(value: i128) -> u32 {
    value.unsigned_abs().checked_ilog10().map_or(1, |log| log + 1)
}

pub fn classify(value: i128) -> Result<EpochUnit> {
    let digits = digit_count(value);
    EpochUnit::from_digits(digits).ok_or(self::Error::Overflow { value, digits })
}

/// Formats an epoch integer as [`DATETIME_FORMAT`].
pub fn format_epoch(value: i128) -> Result<String> {
    classify(value).and_then(|unit| {
        unit.to_datetime(value)
            .map(|datetime| datetime.format(DATETIME_FORMAT).to_string())
            .ok_or(self::Error::Range { value, unit })
    })
}
