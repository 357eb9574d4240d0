// Player-season rows and typed stat values.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use serde::Serialize;

use crate::labels::StatKind;

/// Season year used for a player's career-aggregate row.
pub const CAREER_YEAR: i32 = 0;

/// Name of the pseudo-row holding league career averages.
pub const CAREER_AVERAGE_NAME: &str = "Career Average";

/// Name of the pseudo-row holding league averages for one season.
pub fn season_average_name(year: i32) -> String {
    format!("Season {year} Average")
}

// ---------------------------------------------------------------------------
// StatValue
// ---------------------------------------------------------------------------

/// A numeric cell. The variant decides how the value is rendered:
/// `Count` prints as a plain integer, `Rate` with exactly two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(i64),
    Rate(f64),
}

impl StatValue {
    pub fn zero(kind: StatKind) -> Self {
        match kind {
            StatKind::Count => StatValue::Count(0),
            StatKind::Rate => StatValue::Rate(0.0),
        }
    }

    /// Parse a raw cell. Counting columns stay integral when the cell is a
    /// whole number; anything else becomes a rate. Empty, non-numeric and
    /// non-finite cells (`NaN`, `inf`) yield `None`.
    pub fn parse(raw: &str, kind: StatKind) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if kind == StatKind::Count {
            if let Ok(n) = raw.parse::<i64>() {
                return Some(StatValue::Count(n));
            }
        }
        let x = raw.parse::<f64>().ok().filter(|x| x.is_finite())?;
        if kind == StatKind::Count && x.fract() == 0.0 {
            return Some(StatValue::Count(x as i64));
        }
        Some(StatValue::Rate(x))
    }

    /// Spreadsheet-style missing markers: cells that parse as a float but
    /// are not finite.
    pub fn is_missing_marker(raw: &str) -> bool {
        raw.trim().parse::<f64>().is_ok_and(|x| !x.is_finite())
    }

    pub fn as_f64(self) -> f64 {
        match self {
            StatValue::Count(n) => n as f64,
            StatValue::Rate(x) => x,
        }
    }
}

impl Add for StatValue {
    type Output = StatValue;

    fn add(self, rhs: StatValue) -> StatValue {
        match (self, rhs) {
            (StatValue::Count(a), StatValue::Count(b)) => StatValue::Count(a.saturating_add(b)),
            (a, b) => StatValue::Rate(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{n}"),
            StatValue::Rate(x) => write!(f, "{x:.2}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerSeasonRecord
// ---------------------------------------------------------------------------

/// One row of the data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeasonRecord {
    pub name: String,
    /// Three-letter club abbreviation.
    pub team: String,
    /// Real season, or `CAREER_YEAR` for a career-aggregate row.
    pub season_year: i32,
    /// Every numeric column of the row, keyed by header.
    pub stats: BTreeMap<String, StatValue>,
    /// Non-numeric cells of columns outside the required set.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PlayerSeasonRecord {
    pub fn new(name: impl Into<String>, team: impl Into<String>, season_year: i32) -> Self {
        PlayerSeasonRecord {
            name: name.into(),
            team: team.into(),
            season_year,
            stats: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style helper used mostly by tests.
    pub fn with_stat(mut self, key: impl Into<String>, value: StatValue) -> Self {
        self.stats.insert(key.into(), value);
        self
    }

    pub fn stat(&self, key: &str) -> Option<StatValue> {
        self.stats.get(key).copied()
    }

    pub fn is_career_row(&self) -> bool {
        self.season_year == CAREER_YEAR
    }
}
