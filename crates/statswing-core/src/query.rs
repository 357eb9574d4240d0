// Player stat query engine.
//
// Resolves a selection (team filter, player, season range or exact season)
// into display-ready stat lines. All operations borrow the dataset and label
// tables and never mutate anything.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::labels::{Labels, StatDef};
use crate::record::{
    season_average_name, PlayerSeasonRecord, StatValue, CAREER_AVERAGE_NAME, CAREER_YEAR,
};

/// Label shown for the "no team filter" option of the team selector.
pub const ALL_TEAMS: &str = "All Teams";

// ---------------------------------------------------------------------------
// Errors and warnings
// ---------------------------------------------------------------------------

/// Recoverable query outcomes that mean "nothing to show".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no rows for '{name}' between {start} and {end}")]
    EmptySelection { name: String, start: i32, end: i32 },

    #[error("no rows for '{0}'")]
    NoRows(String),

    #[error("no row for '{name}'{}", season_suffix(.year))]
    NotFound { name: String, year: Option<i32> },
}

fn season_suffix(year: &Option<i32>) -> String {
    year.map(|y| format!(" season {y}")).unwrap_or_default()
}

impl QueryError {
    /// Whether the error means the selection is empty (as opposed to a
    /// missing exact/baseline row).
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, QueryError::EmptySelection { .. } | QueryError::NoRows(_))
    }
}

/// Non-fatal conditions attached to a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryWarning {
    /// More than one row shares a name and season; the first was used.
    AmbiguousMatch {
        name: String,
        year: i32,
        matches: usize,
    },
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Team selector value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    /// Full team name or abbreviation.
    Named(String),
}

impl TeamFilter {
    /// Map a selector string to a filter. `"All Teams"` disables filtering.
    pub fn parse(selection: &str) -> Self {
        if selection == ALL_TEAMS {
            TeamFilter::All
        } else {
            TeamFilter::Named(selection.to_string())
        }
    }
}

/// Whether `active_seasons` includes the career sentinel year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonScope {
    #[default]
    RealOnly,
    IncludeCareer,
}

/// Precomputed league-average pseudo-rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    CareerAverage,
    SeasonAverage(i32),
}

impl Baseline {
    /// Name of the pseudo-row this baseline refers to.
    pub fn row_name(self) -> String {
        match self {
            Baseline::CareerAverage => CAREER_AVERAGE_NAME.to_string(),
            Baseline::SeasonAverage(year) => season_average_name(year),
        }
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
    pub abbreviation: String,
    pub name: String,
}

/// One displayed statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub value: StatValue,
}

/// Ordered display-label -> value result of an aggregate or row lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatLine {
    pub entries: Vec<StatEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<QueryWarning>,
}

impl StatLine {
    /// Value for a display label.
    pub fn get(&self, label: &str) -> Option<StatValue> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    /// Value for a stat key.
    pub fn get_key(&self, key: &str) -> Option<StatValue> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, QueryWarning::AmbiguousMatch { .. }))
    }
}

/// One row of a head-to-head comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub key: String,
    pub label: String,
    pub first: Option<StatValue>,
    pub second: Option<StatValue>,
}

impl ComparisonRow {
    /// `first - second`, treating a missing side as zero. Positive means the
    /// first player leads.
    pub fn difference(&self) -> f64 {
        let a = self.first.map_or(0.0, StatValue::as_f64);
        let b = self.second.map_or(0.0, StatValue::as_f64);
        a - b
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: String,
    pub second: String,
    pub rows: Vec<ComparisonRow>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Read-only query facade over a loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    dataset: &'a Dataset,
    labels: &'a Labels,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dataset: &'a Dataset, labels: &'a Labels) -> Self {
        QueryEngine { dataset, labels }
    }

    pub fn labels(&self) -> &'a Labels {
        self.labels
    }

    /// Distinct teams in the data, sorted by abbreviation.
    pub fn list_teams(&self) -> Vec<TeamEntry> {
        let abbrs: BTreeSet<&str> = self
            .dataset
            .records()
            .iter()
            .map(|r| r.team.as_str())
            .collect();
        abbrs
            .into_iter()
            .map(|abbr| TeamEntry {
                abbreviation: abbr.to_string(),
                name: self.labels.teams.display_name(abbr).to_string(),
            })
            .collect()
    }

    /// Distinct player names for a team filter, in first-seen order.
    pub fn list_players(&self, filter: &TeamFilter) -> Vec<&'a str> {
        let team = match filter {
            TeamFilter::All => None,
            TeamFilter::Named(name) => Some(self.labels.teams.abbreviation(name)),
        };
        let mut seen = HashSet::new();
        self.dataset
            .records()
            .iter()
            .filter(|r| team.map_or(true, |t| r.team == t))
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Seasons a player has rows for, ascending and without duplicates.
    pub fn active_seasons(&self, name: &str, scope: SeasonScope) -> Vec<i32> {
        let years: BTreeSet<i32> = self
            .dataset
            .rows_for(name)
            .map(|r| r.season_year)
            .filter(|&y| scope == SeasonScope::IncludeCareer || y != CAREER_YEAR)
            .collect();
        years.into_iter().collect()
    }

    /// All rows for a player, in file order.
    pub fn player_rows(&self, name: &str) -> Vec<&'a PlayerSeasonRecord> {
        self.dataset.rows_for(name).collect()
    }

    /// Sum every stat column over the player's seasons in `[start, end]`.
    ///
    /// Rate stats are summed like counting stats. Each column's values are
    /// added in ascending numeric order, so the result does not depend on
    /// file order, even when two rows share a season.
    pub fn aggregate_stats(
        &self,
        name: &str,
        start: i32,
        end: i32,
    ) -> Result<StatLine, QueryError> {
        let selected: Vec<&PlayerSeasonRecord> = self
            .dataset
            .rows_for(name)
            .filter(|r| (start..=end).contains(&r.season_year))
            .collect();

        if selected.is_empty() {
            return Err(QueryError::EmptySelection {
                name: name.to_string(),
                start,
                end,
            });
        }
        debug!(
            "aggregating {} rows for '{}' ({}-{})",
            selected.len(),
            name,
            start,
            end
        );

        let mut columns: BTreeMap<usize, Vec<StatValue>> = BTreeMap::new();
        for record in &selected {
            for (key, &value) in &record.stats {
                if let Some(pos) = self.labels.stats.position(key) {
                    columns.entry(pos).or_default().push(value);
                }
            }
        }

        Ok(StatLine {
            entries: columns
                .into_iter()
                .map(|(pos, mut values)| {
                    let def = &self.labels.stats.defs()[pos];
                    values.sort_by(|a, b| a.as_f64().total_cmp(&b.as_f64()));
                    let total = values
                        .into_iter()
                        .fold(StatValue::zero(def.kind), |sum, v| sum + v);
                    self.entry(def, total)
                })
                .collect(),
            warnings: Vec::new(),
        })
    }

    /// Direct lookup of one season row (`year` may be the career sentinel).
    pub fn exact_row(&self, name: &str, year: i32) -> Result<StatLine, QueryError> {
        let matches: Vec<&PlayerSeasonRecord> = self
            .dataset
            .rows_for(name)
            .filter(|r| r.season_year == year)
            .collect();
        match matches.as_slice() {
            [] => Err(QueryError::NotFound {
                name: name.to_string(),
                year: Some(year),
            }),
            [only] => Ok(self.stat_line(only)),
            [first, ..] => Ok(self.ambiguous(first, matches.len())),
        }
    }

    /// Stats of a league-average pseudo-row. Never computed on the fly.
    pub fn lookup_baseline(&self, baseline: Baseline) -> Result<StatLine, QueryError> {
        let name = baseline.row_name();
        let rows = self.player_rows(&name);
        match rows.as_slice() {
            [] => Err(QueryError::NotFound { name, year: None }),
            [only] => Ok(self.stat_line(only)),
            [first, ..] => Ok(self.ambiguous(first, rows.len())),
        }
    }

    /// Head-to-head view of two players using each one's first row.
    pub fn compare_players(
        &self,
        first: &str,
        second: &str,
        keys: &[String],
    ) -> Result<Comparison, QueryError> {
        let a = self
            .dataset
            .rows_for(first)
            .next()
            .ok_or_else(|| QueryError::NoRows(first.to_string()))?;
        let b = self
            .dataset
            .rows_for(second)
            .next()
            .ok_or_else(|| QueryError::NoRows(second.to_string()))?;

        let rows = keys
            .iter()
            .map(|key| ComparisonRow {
                key: key.clone(),
                label: self.resolve_stat_label(key).to_string(),
                first: a.stat(key),
                second: b.stat(key),
            })
            .collect();

        Ok(Comparison {
            first: first.to_string(),
            second: second.to_string(),
            rows,
        })
    }

    pub fn resolve_stat_label<'k>(&self, key: &'k str) -> &'k str {
        self.labels.stats.resolve_label(key)
    }

    pub fn resolve_stat_key<'k>(&self, label: &'k str) -> &'k str {
        self.labels.stats.resolve_key(label)
    }

    pub fn team_display_name<'k>(&self, abbr: &'k str) -> &'k str {
        self.labels.teams.display_name(abbr)
    }

    pub fn team_abbreviation<'k>(&self, name: &'k str) -> &'k str {
        self.labels.teams.abbreviation(name)
    }

    /// Stat definition by key or display label.
    pub fn describe_stat(&self, key_or_label: &str) -> Option<&'a StatDef> {
        self.labels.stats.find(key_or_label)
    }

    fn stat_line(&self, record: &PlayerSeasonRecord) -> StatLine {
        let entries = self
            .labels
            .stats
            .defs()
            .iter()
            .filter_map(|def| record.stat(def.key).map(|v| self.entry(def, v)))
            .collect();
        StatLine {
            entries,
            warnings: Vec::new(),
        }
    }

    fn ambiguous(&self, first: &PlayerSeasonRecord, matches: usize) -> StatLine {
        warn!(
            "{} rows match '{}' season {}; using the first",
            matches, first.name, first.season_year
        );
        let mut line = self.stat_line(first);
        line.warnings.push(QueryWarning::AmbiguousMatch {
            name: first.name.clone(),
            year: first.season_year,
            matches,
        });
        line
    }

    fn entry(&self, def: &StatDef, value: StatValue) -> StatEntry {
        StatEntry {
            key: def.key,
            label: def.label,
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
