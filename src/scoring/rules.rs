use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::range::{RangeBand, RangeTable};

/// Version of the rule table layout understood by this build.
pub const RULES_VERSION: u32 = 1;

/// Position marker that switches scoring to the team defense path.
pub const DST_POSITION: &str = "D/ST";

/// The normalized rule table.
///
/// Range strings are parsed once when the table is built; scoring only ever
/// walks the resulting bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRules {
    pub version: u32,
    pub td_rushing: RangeTable,
    pub td_passing_receiving: RangeTable,
    pub field_goal: RangeTable,
    /// Points per made extra point
    pub pat: f64,
    pub rushing_game_total: RangeTable,
    pub passing_game_total: RangeTable,
    pub receiving_game_total: RangeTable,
    pub defense: DefenseRules,
    pub return_special_teams: ReturnRules,
    pub conversions: ConversionRules,
    pub columns: StatColumns,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenseRules {
    pub safety: f64,
    /// Opponent held under 10 points in a win
    pub hold_under_10: f64,
    pub touchdown: f64,
    pub shutout: f64,
}

/// Return special-teams awards.
///
/// Carried in the table for completeness; no analyzer detects these plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnRules {
    pub safety: f64,
    pub other_scores: f64,
    pub punt: f64,
    pub kickoff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRules {
    pub pass: f64,
    pub rush: f64,
    pub receive: f64,
}

/// Boxscore column labels the aggregator reads.
///
/// The feed does not guarantee these labels, so they are configuration
/// rather than literals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct StatColumns {
    /// Total yards column in rushing/passing/receiving groups
    pub yards: String,
    /// "made/attempted" extra points column in the kicking group
    pub extra_points: String,
}

impl Default for StatColumns {
    fn default() -> Self {
        Self {
            yards: "YDS".to_string(),
            extra_points: "XP".to_string(),
        }
    }
}

impl ScoringRules {
    /// The process-wide standard rule table, built on first use.
    pub fn standard() -> &'static ScoringRules {
        static STANDARD: OnceLock<ScoringRules> = OnceLock::new();
        STANDARD.get_or_init(build_standard)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        build_standard()
    }
}

fn table(bands: &[(u32, Option<u32>, f64)]) -> RangeTable {
    RangeTable::new(
        bands
            .iter()
            .map(|&(min, max, points)| RangeBand::new(min, max, points))
            .collect(),
    )
}

fn build_standard() -> ScoringRules {
    ScoringRules {
        version: RULES_VERSION,
        td_rushing: table(&[
            (0, Some(5), 2.0),
            (6, Some(10), 2.5),
            (11, Some(15), 3.0),
            (16, Some(20), 3.5),
            (21, Some(30), 4.0),
            (31, Some(40), 4.5),
            (41, Some(50), 5.0),
            (51, Some(75), 5.5),
            (76, None, 6.0),
        ]),
        td_passing_receiving: table(&[
            (0, Some(9), 2.0),
            (10, Some(19), 2.5),
            (20, Some(29), 3.0),
            (30, Some(39), 3.5),
            (40, Some(49), 4.0),
            (50, Some(59), 4.5),
            (60, Some(69), 5.0),
            (70, Some(79), 5.5),
            (80, None, 6.0),
        ]),
        field_goal: table(&[
            (0, Some(25), 1.0),
            (26, Some(30), 1.25),
            (31, Some(35), 1.5),
            (36, Some(40), 1.75),
            (41, Some(45), 2.0),
            (46, Some(50), 2.5),
            (51, Some(55), 3.0),
            (56, Some(60), 4.0),
            (61, None, 6.0),
        ]),
        pat: 0.5,
        rushing_game_total: table(&[
            (100, Some(149), 2.0),
            (150, Some(199), 3.0),
            (200, Some(249), 4.0),
            (250, None, 6.0),
        ]),
        passing_game_total: table(&[
            (300, Some(399), 2.0),
            (400, Some(499), 3.0),
            (500, Some(599), 4.0),
            (600, None, 6.0),
        ]),
        receiving_game_total: table(&[
            (100, Some(149), 2.0),
            (150, Some(199), 3.0),
            (200, Some(249), 4.0),
            (250, None, 6.0),
        ]),
        defense: DefenseRules {
            safety: 3.0,
            hold_under_10: 3.0,
            touchdown: 3.5,
            shutout: 4.0,
        },
        return_special_teams: ReturnRules {
            safety: 3.0,
            other_scores: 3.0,
            punt: 3.5,
            kickoff: 4.0,
        },
        conversions: ConversionRules {
            pass: 1.0,
            rush: 1.0,
            receive: 1.0,
        },
        columns: StatColumns::default(),
    }
}
