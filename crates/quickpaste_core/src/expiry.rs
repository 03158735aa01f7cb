//! Relative expiry presets rendered into absolute timestamps.
//!
//! Option values are computed once when the menu is rendered and then used
//! verbatim as the wire value. A page left open for a while therefore grants a
//! slightly shorter TTL than the label suggests; submission never recomputes.

use crate::constants::EXPIRY_NEVER;
use crate::error::AppError;
use chrono::{
    DateTime, Days, Duration, Local, LocalResult, Months, NaiveDateTime, Offset, SecondsFormat,
    TimeZone, Utc,
};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Unit for a relative expiry duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// Compute an expiry option value relative to the current moment.
///
/// The current UTC instant is converted to local time before the duration is
/// added, so the serialized string carries the local offset.
///
/// # Returns
/// An RFC 3339 timestamp with second precision, e.g. `2024-05-01T12:10:00+02:00`,
/// or `None` when the result falls outside the representable range.
pub fn compute_expiry_option(value: u32, unit: DurationUnit) -> Option<String> {
    let now = Utc::now().with_timezone(&Local);
    compute_expiry_option_at(&now, value, unit)
}

/// Compute an expiry option value relative to `now`.
///
/// Minutes and hours are elapsed time. Days, months and years move the local
/// wall clock, so `1 day` keeps the time of day across a DST change. Month
/// arithmetic clamps to the last valid day of the target month.
pub fn compute_expiry_option_at<Tz>(
    now: &DateTime<Tz>,
    value: u32,
    unit: DurationUnit,
) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let local = now.naive_local();
    let expires = match unit {
        DurationUnit::Minute => now
            .clone()
            .checked_add_signed(Duration::minutes(value.into()))?,
        DurationUnit::Hour => now
            .clone()
            .checked_add_signed(Duration::hours(value.into()))?,
        DurationUnit::Day => {
            resolve_local(&now.timezone(), local.checked_add_days(Days::new(value.into()))?)?
        }
        DurationUnit::Month => {
            resolve_local(&now.timezone(), local.checked_add_months(Months::new(value))?)?
        }
        DurationUnit::Year => {
            let months = Months::new(value.checked_mul(12)?);
            resolve_local(&now.timezone(), local.checked_add_months(months)?)?
        }
    };
    Some(expires.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Place a wall-clock time in `tz`.
///
/// A repeated time resolves to its earlier instant. A skipped time is read with
/// the offset in force before the gap, which lands just past it.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => Some(at),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let day_before = local.checked_sub_days(Days::new(1))?;
            let offset = tz.offset_from_utc_datetime(&day_before).fix();
            let utc = local
                .checked_sub_signed(Duration::seconds(offset.local_minus_utc().into()))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// The fixed expiry choices offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryPreset {
    Never,
    TenMinutes,
    OneHour,
    OneDay,
    OneMonth,
    SixMonths,
    OneYear,
}

impl ExpiryPreset {
    /// All presets in menu order.
    pub const ALL: [ExpiryPreset; 7] = [
        Self::Never,
        Self::TenMinutes,
        Self::OneHour,
        Self::OneDay,
        Self::OneMonth,
        Self::SixMonths,
        Self::OneYear,
    ];

    /// Label shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::TenMinutes => "10 minutes",
            Self::OneHour => "1 hr",
            Self::OneDay => "1 day",
            Self::OneMonth => "1 month",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
        }
    }

    /// Short name accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Never => EXPIRY_NEVER,
            Self::TenMinutes => "10m",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
        }
    }

    /// Relative duration, or `None` for [`ExpiryPreset::Never`].
    pub fn duration(self) -> Option<(u32, DurationUnit)> {
        match self {
            Self::Never => None,
            Self::TenMinutes => Some((10, DurationUnit::Minute)),
            Self::OneHour => Some((1, DurationUnit::Hour)),
            Self::OneDay => Some((1, DurationUnit::Day)),
            Self::OneMonth => Some((1, DurationUnit::Month)),
            Self::SixMonths => Some((6, DurationUnit::Month)),
            Self::OneYear => Some((1, DurationUnit::Year)),
        }
    }
}

impl fmt::Display for ExpiryPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExpiryPreset {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let preset = match normalized.as_str() {
            "never" => Self::Never,
            "10m" | "10min" | "10-minutes" => Self::TenMinutes,
            "1h" | "1hr" | "1-hour" => Self::OneHour,
            "1d" | "1-day" => Self::OneDay,
            "1mo" | "1-month" => Self::OneMonth,
            "6mo" | "6-months" => Self::SixMonths,
            "1y" | "1yr" | "1-year" => Self::OneYear,
            _ => return Err(AppError::InvalidExpiry(value.to_string())),
        };
        Ok(preset)
    }
}

/// The user's expiry choice as held by the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExpirySelection {
    #[default]
    Never,
    /// A precomputed absolute timestamp taken from the rendered menu.
    At(String),
}

impl ExpirySelection {
    /// Interpret a raw option value; the literal `"never"` means no expiry.
    pub fn from_value(value: &str) -> Self {
        if value == EXPIRY_NEVER {
            Self::Never
        } else {
            Self::At(value.to_string())
        }
    }

    /// Raw option value as rendered in the menu.
    pub fn as_value(&self) -> &str {
        match self {
            Self::Never => EXPIRY_NEVER,
            Self::At(stamp) => stamp.as_str(),
        }
    }

    /// Value for the `expires_at` wire field.
    pub fn as_wire(&self) -> Option<&str> {
        match self {
            Self::Never => None,
            Self::At(stamp) => Some(stamp.as_str()),
        }
    }
}

/// One rendered option of the expiry menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryOption {
    pub preset: ExpiryPreset,
    pub label: &'static str,
    pub value: String,
}

/// Expiry dropdown with option values fixed at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryMenu {
    options: Vec<ExpiryOption>,
}

impl ExpiryMenu {
    /// Render the menu against the current local time.
    pub fn render() -> Self {
        let now = Utc::now().with_timezone(&Local);
        Self::render_at(&now)
    }

    /// Render the menu against a fixed instant.
    pub fn render_at<Tz>(now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let options = ExpiryPreset::ALL
            .iter()
            .map(|&preset| ExpiryOption {
                preset,
                label: preset.label(),
                value: preset
                    .duration()
                    .and_then(|(value, unit)| {
                        let stamp = compute_expiry_option_at(now, value, unit);
                        if stamp.is_none() {
                            warn!(%preset, "expiry out of range; offering no expiry");
                        }
                        stamp
                    })
                    .unwrap_or_else(|| EXPIRY_NEVER.to_string()),
            })
            .collect();
        Self { options }
    }

    pub fn options(&self) -> &[ExpiryOption] {
        &self.options
    }

    /// Precomputed value for `preset`.
    pub fn value_for(&self, preset: ExpiryPreset) -> &str {
        self.options
            .iter()
            .find(|option| option.preset == preset)
            .map(|option| option.value.as_str())
            .unwrap_or(EXPIRY_NEVER)
    }

    /// Selection the form stores when `preset` is chosen.
    pub fn selection_for(&self, preset: ExpiryPreset) -> ExpirySelection {
        ExpirySelection::from_value(self.value_for(preset))
    }
}
