// Subcommand dispatch: turns a parsed command into an engine query.

use serde::Serialize;
use tracing::debug;

use statswing_core::{
    Baseline, Comparison, QueryEngine, QueryError, SeasonScope, StatDef, StatLine, TeamEntry,
    TeamFilter,
};

use crate::cli::Command;

/// Result of one subcommand, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Output {
    Teams(Vec<TeamEntry>),
    Players(Vec<String>),
    Seasons(Vec<i32>),
    Stats { title: String, line: StatLine },
    Comparison(Comparison),
    Descriptions(Vec<StatDef>),
    /// The selection matched nothing; carries the reason.
    NoData(String),
}

impl From<QueryError> for Output {
    fn from(err: QueryError) -> Self {
        debug!("query returned no data: {}", err);
        Output::NoData(err.to_string())
    }
}

/// Run one command. Query misses become `Output::NoData`, never errors.
pub fn execute(command: &Command, engine: &QueryEngine<'_>, compare_stats: &[String]) -> Output {
    match command {
        Command::Teams => Output::Teams(engine.list_teams()),

        Command::Players { team } => Output::Players(
            engine
                .list_players(&TeamFilter::parse(team))
                .into_iter()
                .map(str::to_string)
                .collect(),
        ),

        Command::Seasons {
            player,
            include_career,
        } => {
            let scope = if *include_career {
                SeasonScope::IncludeCareer
            } else {
                SeasonScope::RealOnly
            };
            Output::Seasons(engine.active_seasons(player, scope))
        }

        Command::Stats { player, from, to } => stats(engine, player, *from, *to),

        Command::Row { player, season } => match engine.exact_row(player, *season) {
            Ok(line) => Output::Stats {
                title: row_title(player, *season),
                line,
            },
            Err(e) => e.into(),
        },

        Command::Baseline { season } => {
            let baseline = season.map_or(Baseline::CareerAverage, Baseline::SeasonAverage);
            match engine.lookup_baseline(baseline) {
                Ok(line) => Output::Stats {
                    title: baseline.row_name(),
                    line,
                },
                Err(e) => e.into(),
            }
        }

        Command::Compare {
            first,
            second,
            stats,
        } => {
            let keys: Vec<String> = if stats.is_empty() {
                compare_stats.to_vec()
            } else {
                stats
                    .iter()
                    .map(|s| engine.resolve_stat_key(s).to_string())
                    .collect()
            };
            match engine.compare_players(first, second, &keys) {
                Ok(cmp) => Output::Comparison(cmp),
                Err(e) => e.into(),
            }
        }

        Command::Describe { stat: Some(stat) } => match engine.describe_stat(stat) {
            Some(def) => Output::Descriptions(vec![def.clone()]),
            None => Output::NoData(format!("unknown stat '{stat}'")),
        },

        Command::Describe { stat: None } => {
            Output::Descriptions(engine.labels().stats.defs().to_vec())
        }
    }
}

/// Aggregate over the requested range; missing bounds default to the
/// player's first and last real seasons.
fn stats(engine: &QueryEngine<'_>, player: &str, from: Option<i32>, to: Option<i32>) -> Output {
    let seasons = engine.active_seasons(player, SeasonScope::RealOnly);
    let (Some(&first), Some(&last)) = (seasons.first(), seasons.last()) else {
        if let (Some(start), Some(end)) = (from, to) {
            // Explicit range: let the engine report the empty selection.
            if let Err(e) = engine.aggregate_stats(player, start, end) {
                return e.into();
            }
        }
        return Output::NoData(format!("no seasons for '{player}'"));
    };
    let start = from.unwrap_or(first);
    let end = to.unwrap_or(last);

    match engine.aggregate_stats(player, start, end) {
        Ok(line) => Output::Stats {
            title: format!("{player}, {start} - {end}"),
            line,
        },
        Err(e) => e.into(),
    }
}

fn row_title(player: &str, season: i32) -> String {
    if season == 0 {
        format!("{player}, career")
    } else {
        format!("{player}, {season}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statswing_core::{Dataset, Labels, StatValue};

    const CSV: &str = "\
Name,Team,Season Year,G,PA,HR,R,wOBA
Mike Trout,LAA,2021,36,500,30,23,0.446
Mike Trout,LAA,2022,119,550,40,85,0.404
Mike Trout,LAA,0,1489,6500,378,1106,0.410
Aaron Judge,NYY,2022,157,696,62,133,0.458
Career Average,LG,0,,,,,0.320";

    fn run(command: Command) -> Output {
        let labels = Labels::standard();
        let ds = Dataset::from_reader(CSV.as_bytes(), &labels.stats).unwrap();
        let engine = QueryEngine::new(&ds, &labels);
        let defaults: Vec<String> = ["G", "PA", "HR", "R"].iter().map(|s| s.to_string()).collect();
        execute(&command, &engine, &defaults)
    }

    #[test]
    fn stats_defaults_to_full_range() {
        match run(Command::Stats {
            player: "Mike Trout".into(),
            from: None,
            to: None,
        }) {
            Output::Stats { title, line } => {
                assert_eq!(title, "Mike Trout, 2021 - 2022");
                assert_eq!(line.get("Home Runs"), Some(StatValue::Count(70)));
                assert_eq!(line.get("Plate Appearances"), Some(StatValue::Count(1050)));
            }
            other => panic!("expected Stats, got {other:?}"),
        }
    }

    #[test]
    fn stats_unknown_player_is_no_data() {
        let out = run(Command::Stats {
            player: "Unknown Player".into(),
            from: Some(2020),
            to: Some(2021),
        });
        assert!(matches!(out, Output::NoData(_)));
    }

    #[test]
    fn row_career_title() {
        match run(Command::Row {
            player: "Mike Trout".into(),
            season: 0,
        }) {
            Output::Stats { title, line } => {
                assert_eq!(title, "Mike Trout, career");
                assert_eq!(line.get_key("HR"), Some(StatValue::Count(378)));
            }
            other => panic!("expected Stats, got {other:?}"),
        }
    }

    #[test]
    fn baseline_career_average() {
        match run(Command::Baseline { season: None }) {
            Output::Stats { title, line } => {
                assert_eq!(title, "Career Average");
                assert_eq!(line.get_key("wOBA").unwrap().to_string(), "0.32");
            }
            other => panic!("expected Stats, got {other:?}"),
        }
        assert!(matches!(
            run(Command::Baseline { season: Some(2022) }),
            Output::NoData(_)
        ));
    }

    #[test]
    fn compare_uses_defaults_or_labels() {
        match run(Command::Compare {
            first: "Mike Trout".into(),
            second: "Aaron Judge".into(),
            stats: vec![],
        }) {
            Output::Comparison(cmp) => assert_eq!(cmp.rows.len(), 4),
            other => panic!("expected Comparison, got {other:?}"),
        }
        match run(Command::Compare {
            first: "Mike Trout".into(),
            second: "Aaron Judge".into(),
            stats: vec!["Home Runs".into()],
        }) {
            Output::Comparison(cmp) => {
                assert_eq!(cmp.rows[0].key, "HR");
                assert_eq!(cmp.rows[0].second, Some(StatValue::Count(62)));
            }
            other => panic!("expected Comparison, got {other:?}"),
        }
    }

    #[test]
    fn players_for_team() {
        assert_eq!(
            run(Command::Players {
                team: "New York Yankees".into()
            }),
            Output::Players(vec!["Aaron Judge".into()])
        );
    }

    #[test]
    fn describe_one_and_all() {
        match run(Command::Describe {
            stat: Some("wRC+".into()),
        }) {
            Output::Descriptions(defs) => assert_eq!(defs[0].label, "Weighted Runs Created Plus"),
            other => panic!("expected Descriptions, got {other:?}"),
        }
        match run(Command::Describe { stat: None }) {
            Output::Descriptions(defs) => assert_eq!(defs.len(), 20),
            other => panic!("expected Descriptions, got {other:?}"),
        }
    }
}
