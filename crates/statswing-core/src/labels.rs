// Static label tables: stat keys, display labels, descriptions, team names.
//
// Both tables are built once at startup and shared by reference. Lookups in
// either direction never fail: unknown input passes through unchanged.

use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Stat definitions
// ---------------------------------------------------------------------------

/// Whether a stat is a counting total or a rate/index value.
///
/// Counting stats carry integer values and render without decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatKind {
    Count,
    Rate,
}

/// One row of the alias table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatDef {
    /// Column key as it appears in the data file header (e.g. "HR").
    pub key: &'static str,
    /// Human-readable label (e.g. "Home Runs").
    pub label: &'static str,
    pub description: &'static str,
    pub kind: StatKind,
}

const STAT_DEFS: &[StatDef] = &[
    StatDef {
        key: "G",
        label: "Games Played",
        description: "Games played by the player",
        kind: StatKind::Count,
    },
    StatDef {
        key: "PA",
        label: "Plate Appearances",
        description: "The total number of times the player has come up to bat, including walks and sacrifices",
        kind: StatKind::Count,
    },
    StatDef {
        key: "HR",
        label: "Home Runs",
        description: "The number of home runs hit by the player, which are hits that allow the player to round all bases and score",
        kind: StatKind::Count,
    },
    StatDef {
        key: "R",
        label: "Runs",
        description: "The total number of times the player has crossed home plate to score a point for their team",
        kind: StatKind::Count,
    },
    StatDef {
        key: "RBI",
        label: "RBI",
        description: "The number of runs that scored as a result of the player's actions, excluding their own runs from home runs",
        kind: StatKind::Count,
    },
    StatDef {
        key: "SB",
        label: "Stolen Bases",
        description: "The number of bases the player has successfully stolen from the opposing team",
        kind: StatKind::Count,
    },
    StatDef {
        key: "BB%",
        label: "Walk Percentage",
        description: "The percentage of plate appearances in which the player receives a \"walk,\" or is allowed to advance to first base without a hit",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "K%",
        label: "Strikeout Percentage",
        description: "The percentage of plate appearances in which the player strikes out, meaning they fail to hit the ball successfully within three strikes",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "ISO",
        label: "Isolated Power",
        description: "A measure of a player's power, calculated by subtracting batting average from slugging percentage (SLG); highlights extra-base hits",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "BABIP",
        label: "Batting Average on Balls in Play",
        description: "A measure of how often a ball in play (excluding home runs) results in a hit",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "AVG",
        label: "Batting Average",
        description: "The player's average of successful hits per at-bat, calculated by dividing hits by at-bats",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "OBP",
        label: "On-Base Percentage",
        description: "The percentage of times the player reaches base, including hits, walks, and being hit by a pitch",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "SLG",
        label: "Slugging Percentage",
        description: "A measure of the player's batting power, calculated by the total bases divided by at-bats",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "wOBA",
        label: "Weighted On-Base Average",
        description: "An advanced statistic that gives a weighted value to each outcome (e.g., singles, doubles) to assess overall offensive performance",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "xwOBA",
        label: "Expected Weighted On-Base Average",
        description: "A version of wOBA that factors in the quality of contact (exit velocity and launch angle) to show what the player’s wOBA should be based on how they hit the ball",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "wRC+",
        label: "Weighted Runs Created Plus",
        description: "A statistic that quantifies runs created, adjusted for ballpark factors and league averages, with 100 as league average. Values above 100 are better than average",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "BsR",
        label: "Base Running",
        description: "A measure of the player's value as a baserunner, factoring in stolen bases, caught stealing, and other baserunning plays",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "Off",
        label: "Offense",
        description: "A metric combining a player's hitting and baserunning contributions to measure their total offensive impact",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "Def",
        label: "Defense",
        description: "A measure of the player's defensive contributions, based on fielding plays and position",
        kind: StatKind::Rate,
    },
    StatDef {
        key: "WAR",
        label: "Wins Above Replacement",
        description: "An overall measure of a player's value, representing how many additional wins the player contributed to their team over a replacement-level player",
        kind: StatKind::Rate,
    },
];

const TEAM_NAMES: &[(&str, &str)] = &[
    ("NYY", "New York Yankees"),
    ("KCR", "Kansas City Royals"),
    ("LAD", "Los Angeles Dodgers"),
    ("BAL", "Baltimore Orioles"),
    ("NYM", "New York Mets"),
    ("BOS", "Boston Red Sox"),
    ("CLE", "Cleveland Guardians"),
    ("CIN", "Cincinnati Reds"),
    ("ARI", "Arizona Diamondbacks"),
    ("TOR", "Toronto Blue Jays"),
    ("SFG", "San Francisco Giants"),
    ("MIL", "Milwaukee Brewers"),
    ("SEA", "Seattle Mariners"),
    ("SDP", "San Diego Padres"),
    ("HOU", "Houston Astros"),
    ("PHI", "Philadelphia Phillies"),
    ("OAK", "Oakland Athletics"),
    ("ATL", "Atlanta Braves"),
    ("TEX", "Texas Rangers"),
    ("CHC", "Chicago Cubs"),
    ("MIN", "Minnesota Twins"),
    ("TBR", "Tampa Bay Rays"),
    ("LAA", "Los Angeles Angels"),
    ("DET", "Detroit Tigers"),
    ("MIA", "Miami Marlins"),
    ("STL", "St. Louis Cardinals"),
    ("PIT", "Pittsburgh Pirates"),
    ("COL", "Colorado Rockies"),
    ("CHW", "Chicago White Sox"),
    ("WSN", "Washington Nationals"),
];

// ---------------------------------------------------------------------------
// StatTable
// ---------------------------------------------------------------------------

/// Bidirectional alias table between stat keys and display labels.
#[derive(Debug, Clone)]
pub struct StatTable {
    defs: &'static [StatDef],
    by_key: HashMap<&'static str, usize>,
    by_label: HashMap<&'static str, usize>,
}

impl StatTable {
    /// The 20 batting stats shown by the application.
    pub fn standard() -> Self {
        Self::from_defs(STAT_DEFS)
    }

    fn from_defs(defs: &'static [StatDef]) -> Self {
        let mut by_key = HashMap::with_capacity(defs.len());
        let mut by_label = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            by_key.insert(def.key, i);
            by_label.insert(def.label, i);
        }
        debug_assert_eq!(by_key.len(), defs.len(), "duplicate stat key");
        debug_assert_eq!(by_label.len(), defs.len(), "duplicate stat label");
        StatTable {
            defs,
            by_key,
            by_label,
        }
    }

    /// All definitions, in display order.
    pub fn defs(&self) -> &[StatDef] {
        self.defs
    }

    /// Position of a key in display order, if it is a known stat.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, key: &str) -> Option<&StatDef> {
        self.position(key).map(|i| &self.defs[i])
    }

    pub fn get_by_label(&self, label: &str) -> Option<&StatDef> {
        self.by_label.get(label).map(|&i| &self.defs[i])
    }

    /// Find a stat by key first, then by label.
    pub fn find(&self, key_or_label: &str) -> Option<&StatDef> {
        self.get(key_or_label)
            .or_else(|| self.get_by_label(key_or_label))
    }

    /// Key -> label. Unknown keys are returned unchanged.
    pub fn resolve_label<'a>(&self, key: &'a str) -> &'a str {
        match self.get(key) {
            Some(def) => def.label,
            None => key,
        }
    }

    /// Label -> key. Unknown labels are returned unchanged.
    pub fn resolve_key<'a>(&self, label: &'a str) -> &'a str {
        match self.get_by_label(label) {
            Some(def) => def.key,
            None => label,
        }
    }

    /// Kind of a column. Columns outside the table are treated as rates.
    pub fn kind_of(&self, key: &str) -> StatKind {
        self.get(key).map_or(StatKind::Rate, |def| def.kind)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for StatTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// TeamTable
// ---------------------------------------------------------------------------

/// Team abbreviation <-> full name mapping.
#[derive(Debug, Clone)]
pub struct TeamTable {
    by_abbr: HashMap<&'static str, &'static str>,
    by_name: HashMap<&'static str, &'static str>,
}

impl TeamTable {
    /// The 30 MLB clubs.
    pub fn standard() -> Self {
        let by_abbr: HashMap<_, _> = TEAM_NAMES.iter().copied().collect();
        let by_name = TEAM_NAMES.iter().map(|&(abbr, name)| (name, abbr)).collect();
        TeamTable { by_abbr, by_name }
    }

    /// Abbreviation -> full name, falling back to the abbreviation itself.
    pub fn display_name<'a>(&self, abbr: &'a str) -> &'a str {
        match self.by_abbr.get(abbr) {
            Some(&name) => name,
            None => abbr,
        }
    }

    /// Full name -> abbreviation, falling back to the input itself.
    pub fn abbreviation<'a>(&self, name: &'a str) -> &'a str {
        match self.by_name.get(name) {
            Some(&abbr) => abbr,
            None => name,
        }
    }

    pub fn len(&self) -> usize {
        self.by_abbr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_abbr.is_empty()
    }
}

impl Default for TeamTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Both label tables, constructed once and handed to the query engine.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    pub stats: StatTable,
    pub teams: TeamTable,
}

impl Labels {
    pub fn standard() -> Self {
        Labels {
            stats: StatTable::standard(),
            teams: TeamTable::standard(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
