// Player data loading and indexing.
//
// Reads a delimited file with a header row. `Name`, `Team` and `Season Year`
// are required; every other column is parsed as a stat when numeric.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::labels::StatTable;
use crate::record::{PlayerSeasonRecord, StatValue};

pub const NAME_COLUMN: &str = "Name";
pub const TEAM_COLUMN: &str = "Team";
pub const SEASON_COLUMN: &str = "Season Year";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Immutable, indexed collection of player-season rows.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PlayerSeasonRecord>,
    by_name: HashMap<String, Vec<usize>>,
}

impl Dataset {
    /// Build a dataset from rows already in memory. Row order is preserved.
    pub fn from_records(records: Vec<PlayerSeasonRecord>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        {
            let mut seen: HashSet<(&str, i32)> = HashSet::with_capacity(records.len());
            for (i, rec) in records.iter().enumerate() {
                if !seen.insert((rec.name.as_str(), rec.season_year)) {
                    warn!(
                        "duplicate row for '{}' season {}; lookups will use the first",
                        rec.name, rec.season_year
                    );
                }
                by_name.entry(rec.name.clone()).or_default().push(i);
            }
        }
        Dataset { records, by_name }
    }

    /// Load from a CSV file on disk.
    pub fn load(path: &Path, stats: &StatTable) -> Result<Self, DataLoadError> {
        let shown = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| DataLoadError::Io {
            path: shown.clone(),
            source: e,
        })?;
        let dataset = Self::read_csv(file, stats, &shown)?;
        info!(
            "Loaded {} rows ({} distinct names) from {}",
            dataset.len(),
            dataset.by_name.len(),
            shown
        );
        Ok(dataset)
    }

    /// Load from any reader. Used by tests and by callers holding in-memory data.
    pub fn from_reader<R: Read>(rdr: R, stats: &StatTable) -> Result<Self, DataLoadError> {
        Self::read_csv(rdr, stats, "<reader>")
    }

    fn read_csv<R: Read>(rdr: R, stats: &StatTable, path: &str) -> Result<Self, DataLoadError> {
        let csv_err = |e: csv::Error| DataLoadError::Csv {
            path: path.to_string(),
            source: e,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let headers = reader.headers().map_err(csv_err)?.clone();
        let layout = ColumnLayout::resolve(&headers, path)?;

        let mut records = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let row = result.map_err(csv_err)?;
            match layout.parse_row(&row, stats) {
                Ok(rec) => records.push(rec),
                Err(reason) => warn!("skipping row {} of {}: {}", line + 2, path, reason),
            }
        }
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[PlayerSeasonRecord] {
        &self.records
    }

    /// All rows for one name, in file order.
    pub fn rows_for<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a PlayerSeasonRecord> + 'a {
        self.indices_for(name)
            .iter()
            .map(move |&i| &self.records[i])
    }

    pub(crate) fn indices_for(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

struct ColumnLayout {
    name: usize,
    team: usize,
    season: usize,
    /// Every other column: (index, header).
    others: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn resolve(headers: &csv::StringRecord, path: &str) -> Result<Self, DataLoadError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    path: path.to_string(),
                    column,
                })
        };
        let name = find(NAME_COLUMN)?;
        let team = find(TEAM_COLUMN)?;
        let season = find(SEASON_COLUMN)?;
        let others = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != name && i != team && i != season)
            .map(|(i, h)| (i, h.to_string()))
            .collect();
        Ok(ColumnLayout {
            name,
            team,
            season,
            others,
        })
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        stats: &StatTable,
    ) -> Result<PlayerSeasonRecord, String> {
        let cell = |i: usize| row.get(i).unwrap_or("");

        let name = cell(self.name);
        if name.is_empty() {
            return Err("empty Name".into());
        }
        let season_raw = cell(self.season);
        let season_year = parse_season(season_raw)
            .ok_or_else(|| format!("unparsable Season Year '{season_raw}' for '{name}'"))?;

        let mut values = BTreeMap::new();
        let mut extra = BTreeMap::new();
        for (i, header) in &self.others {
            let raw = cell(*i);
            if raw.is_empty() || StatValue::is_missing_marker(raw) {
                continue;
            }
            match StatValue::parse(raw, stats.kind_of(header)) {
                Some(v) => {
                    values.insert(header.clone(), v);
                }
                None => {
                    extra.insert(header.clone(), raw.to_string());
                }
            }
        }

        Ok(PlayerSeasonRecord {
            name: name.to_string(),
            team: cell(self.team).to_string(),
            season_year,
            stats: values,
            extra,
        })
    }
}

/// Accepts "2021" as well as "2021.0" (spreadsheet exports).
fn parse_season(raw: &str) -> Option<i32> {
    if let Ok(y) = raw.parse::<i32>() {
        return Some(y);
    }
    let y = raw.parse::<f64>().ok()?;
    if y.is_finite() && y.fract() == 0.0 && y.abs() <= i32::MAX as f64 {
        Some(y as i32)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv_data: &str) -> Dataset {
        Dataset::from_reader(csv_data.as_bytes(), &StatTable::standard()).unwrap()
    }

    #[test]
    fn loads_rows_in_file_order() {
        let ds = load(
            "\
Name,Team,Season Year,G,PA,HR,AVG,wOBA
Mike Trout,LAA,2021,36,146,8,0.333,0.446
Mike Trout,LAA,2022,119,499,40,0.283,0.404
Aaron Judge,NYY,2022,157,696,62,0.311,0.458",
        );
        assert_eq!(ds.len(), 3);
        let first = &ds.records()[0];
        assert_eq!(first.name, "Mike Trout");
        assert_eq!(first.team, "LAA");
        assert_eq!(first.season_year, 2021);
        assert_eq!(first.stat("HR"), Some(StatValue::Count(8)));
        assert_eq!(first.stat("AVG"), Some(StatValue::Rate(0.333)));
        assert_eq!(ds.rows_for("Mike Trout").count(), 2);
    }

    #[test]
    fn missing_required_column_is_error() {
        let err = Dataset::from_reader(
            "Name,Team,G\nMike Trout,LAA,36".as_bytes(),
            &StatTable::standard(),
        )
        .unwrap_err();
        match err {
            DataLoadError::MissingColumn { column, .. } => assert_eq!(column, SEASON_COLUMN),
            other => panic!("expected MissingColumn, got: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("statswing_no_such_file.csv");
        let _ = std::fs::remove_file(&path);
        let err = Dataset::load(&path, &StatTable::standard()).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn ragged_row_is_csv_error() {
        let err = Dataset::from_reader(
            "Name,Team,Season Year,HR\nMike Trout,LAA,2021,8,99".as_bytes(),
            &StatTable::standard(),
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::Csv { .. }));
    }

    #[test]
    fn bad_season_row_skipped() {
        let ds = load(
            "\
Name,Team,Season Year,HR
Valid,NYY,2021,10
Broken,NYY,twenty,10
,NYY,2021,10
Also Valid,BOS,2022.0,5",
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].season_year, 2022);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let ds = load("Name,Team,Season Year,HR");
        assert!(ds.is_empty());
    }

    #[test]
    fn empty_cells_are_absent() {
        let ds = load("Name,Team,Season Year,HR,SB\nX,NYY,2021,,3");
        let rec = &ds.records()[0];
        assert_eq!(rec.stat("HR"), None);
        assert_eq!(rec.stat("SB"), Some(StatValue::Count(3)));
    }

    #[test]
    fn nan_and_inf_cells_are_absent() {
        let ds = load("Name,Team,Season Year,HR,WAR,Age\nP,NYY,2022,NaN,nan,inf");
        let rec = &ds.records()[0];
        assert_eq!(rec.stat("HR"), None);
        assert_eq!(rec.stat("WAR"), None);
        assert_eq!(rec.stat("Age"), None);
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn unknown_columns_retained() {
        let ds = load("Name,Team,Season Year,HR,Age,Bats\nX,NYY,2021,3,29,R");
        let rec = &ds.records()[0];
        assert_eq!(rec.stat("Age"), Some(StatValue::Rate(29.0)));
        assert_eq!(rec.extra.get("Bats").map(String::as_str), Some("R"));
    }

    #[test]
    fn cells_trimmed() {
        let ds = load("Name,Team,Season Year,HR\n  Mike Trout  , LAA , 2021 , 8 ");
        let rec = &ds.records()[0];
        assert_eq!(rec.name, "Mike Trout");
        assert_eq!(rec.team, "LAA");
        assert_eq!(rec.stat("HR"), Some(StatValue::Count(8)));
    }

    #[test]
    fn career_sentinel_row_loads() {
        let ds = load("Name,Team,Season Year,HR\nMike Trout,LAA,0,378");
        assert!(ds.records()[0].is_career_row());
    }

    #[test]
    fn duplicates_are_kept() {
        let ds = load("Name,Team,Season Year,HR\nX,NYY,2021,1\nX,NYY,2021,2");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.indices_for("X"), &[0, 1]);
    }

    #[test]
    fn unknown_name_has_no_rows() {
        let ds = load("Name,Team,Season Year,HR\nX,NYY,2021,1");
        assert_eq!(ds.rows_for("Y").count(), 0);
        assert!(!ds.contains_name("Y"));
    }
}
