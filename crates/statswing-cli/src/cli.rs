// Command-line structure.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use statswing_core::ALL_TEAMS;

/// Browse and compare baseball player statistics from a CSV file.
#[derive(Debug, Parser)]
#[command(name = "statswing", author, version, about, long_about = None)]
pub struct Cli {
    /// Player data CSV. Overrides `data.player_data` from config/statswing.toml.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Print results as JSON instead of a text table.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the teams present in the data.
    Teams,

    /// List players, optionally restricted to one team.
    Players {
        /// Full team name or abbreviation.
        #[arg(long, default_value = ALL_TEAMS)]
        team: String,
    },

    /// List the seasons a player has rows for.
    Seasons {
        player: String,

        /// Include the career row (season 0).
        #[arg(long)]
        include_career: bool,
    },

    /// Sum a player's stats over a range of seasons.
    Stats {
        player: String,

        /// First season (defaults to the player's first season).
        #[arg(long)]
        from: Option<i32>,

        /// Last season (defaults to the player's last season).
        #[arg(long)]
        to: Option<i32>,
    },

    /// Show one exact row. Season 0 is the career row.
    Row { player: String, season: i32 },

    /// Show league averages: career, or one season with --season.
    Baseline {
        #[arg(long)]
        season: Option<i32>,
    },

    /// Compare two players side by side.
    Compare {
        first: String,
        second: String,

        /// Stat key or label to compare; repeatable. Defaults to `compare.stats`.
        #[arg(long = "stat")]
        stats: Vec<String>,
    },

    /// Describe one stat, or list all of them.
    Describe { stat: Option<String> },
}
