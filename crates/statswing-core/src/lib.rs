// Library root: player stat data model, loader, label tables and the query
// engine shared by every front end.

pub mod config;
pub mod dataset;
pub mod labels;
pub mod query;
pub mod record;

pub use dataset::{DataLoadError, Dataset};
pub use labels::{Labels, StatDef, StatKind, StatTable, TeamTable};
pub use query::{
    Baseline, Comparison, ComparisonRow, QueryEngine, QueryError, QueryWarning, SeasonScope,
    StatEntry, StatLine, TeamEntry, TeamFilter, ALL_TEAMS,
};
pub use record::{PlayerSeasonRecord, StatValue};
