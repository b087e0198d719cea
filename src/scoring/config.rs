use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::range::RangeTable;
use super::rules::{ScoringRules, StatColumns, RULES_VERSION};

/// Rule table overrides as written in the config file.
///
/// Every category is optional; an absent category keeps the standard value.
/// Range categories are ordered lists because evaluation is first-match.
///
/// Example YAML:
/// ```yaml
/// rules:
///   version: 1
///   pat: 1
///   passing_game_total:
///     - { range: "250-349", points: 2 }
///     - { range: "350+", points: 4 }
///   defense:
///     shutout: 6
///   columns:
///     extra_points: "XPM"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub td_rushing: Option<Vec<BandConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub td_passing_receiving: Option<Vec<BandConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_goal: Option<Vec<BandConfig>>,

    /// Points per made extra point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rushing_game_total: Option<Vec<BandConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_game_total: Option<Vec<BandConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving_game_total: Option<Vec<BandConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<DefenseConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_special_teams: Option<ReturnConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversions: Option<ConversionConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<StatColumns>,
}

/// One range band: "N-M" or "N+" and its award.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    pub range: String,
    pub points: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DefenseConfig {
    #[serde(default)]
    pub safety: Option<f64>,
    #[serde(default)]
    pub hold_under_10: Option<f64>,
    #[serde(default)]
    pub touchdown: Option<f64>,
    #[serde(default)]
    pub shutout: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReturnConfig {
    #[serde(default)]
    pub safety: Option<f64>,
    #[serde(default)]
    pub other_scores: Option<f64>,
    #[serde(default)]
    pub punt: Option<f64>,
    #[serde(default)]
    pub kickoff: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    #[serde(default)]
    pub pass: Option<f64>,
    #[serde(default)]
    pub rush: Option<f64>,
    #[serde(default)]
    pub receive: Option<f64>,
}

fn parse_table(bands: &[BandConfig], path: &str) -> Result<RangeTable> {
    RangeTable::parse(bands.iter().map(|b| (b.range.as_str(), b.points)))
        .with_context(|| format!("{}: invalid range table", path))
}

impl ScoringRules {
    /// Build the normalized table from config overrides on top of the
    /// standard rules. Fails on the first bad entry; use
    /// [`validate_rules`](super::validate_rules) to report all of them.
    pub fn from_config(config: &RulesConfig) -> Result<ScoringRules> {
        if let Some(version) = config.version {
            if version != RULES_VERSION {
                bail!(
                    "rules.version: unsupported version {} (expected {})",
                    version,
                    RULES_VERSION
                );
            }
        }

        let mut rules = ScoringRules::standard().clone();

        let tables: [(&Option<Vec<BandConfig>>, &mut RangeTable, &str); 6] = [
            (&config.td_rushing, &mut rules.td_rushing, "rules.td_rushing"),
            (
                &config.td_passing_receiving,
                &mut rules.td_passing_receiving,
                "rules.td_passing_receiving",
            ),
            (&config.field_goal, &mut rules.field_goal, "rules.field_goal"),
            (
                &config.rushing_game_total,
                &mut rules.rushing_game_total,
                "rules.rushing_game_total",
            ),
            (
                &config.passing_game_total,
                &mut rules.passing_game_total,
                "rules.passing_game_total",
            ),
            (
                &config.receiving_game_total,
                &mut rules.receiving_game_total,
                "rules.receiving_game_total",
            ),
        ];
        for (source, target, path) in tables {
            if let Some(bands) = source {
                *target = parse_table(bands, path)?;
            }
        }

        if let Some(pat) = config.pat {
            rules.pat = pat;
        }

        if let Some(ref defense) = config.defense {
            let d = &mut rules.defense;
            d.safety = defense.safety.unwrap_or(d.safety);
            d.hold_under_10 = defense.hold_under_10.unwrap_or(d.hold_under_10);
            d.touchdown = defense.touchdown.unwrap_or(d.touchdown);
            d.shutout = defense.shutout.unwrap_or(d.shutout);
        }

        if let Some(ref returns) = config.return_special_teams {
            let r = &mut rules.return_special_teams;
            r.safety = returns.safety.unwrap_or(r.safety);
            r.other_scores = returns.other_scores.unwrap_or(r.other_scores);
            r.punt = returns.punt.unwrap_or(r.punt);
            r.kickoff = returns.kickoff.unwrap_or(r.kickoff);
        }

        if let Some(ref conversions) = config.conversions {
            let c = &mut rules.conversions;
            c.pass = conversions.pass.unwrap_or(c.pass);
            c.rush = conversions.rush.unwrap_or(c.rush);
            c.receive = conversions.receive.unwrap_or(c.receive);
        }

        if let Some(ref columns) = config.columns {
            rules.columns = columns.clone();
        }

        Ok(rules)
    }
}

fn bands_of(table: &RangeTable) -> Option<Vec<BandConfig>> {
    Some(
        table
            .bands()
            .iter()
            .map(|band| BandConfig {
                range: band.to_string(),
                points: band.points,
            })
            .collect(),
    )
}

/// Fully-populated config describing an effective rule table.
impl From<&ScoringRules> for RulesConfig {
    fn from(rules: &ScoringRules) -> Self {
        Self {
            version: Some(rules.version),
            td_rushing: bands_of(&rules.td_rushing),
            td_passing_receiving: bands_of(&rules.td_passing_receiving),
            field_goal: bands_of(&rules.field_goal),
            pat: Some(rules.pat),
            rushing_game_total: bands_of(&rules.rushing_game_total),
            passing_game_total: bands_of(&rules.passing_game_total),
            receiving_game_total: bands_of(&rules.receiving_game_total),
            defense: Some(DefenseConfig {
                safety: Some(rules.defense.safety),
                hold_under_10: Some(rules.defense.hold_under_10),
                touchdown: Some(rules.defense.touchdown),
                shutout: Some(rules.defense.shutout),
            }),
            return_special_teams: Some(ReturnConfig {
                safety: Some(rules.return_special_teams.safety),
                other_scores: Some(rules.return_special_teams.other_scores),
                punt: Some(rules.return_special_teams.punt),
                kickoff: Some(rules.return_special_teams.kickoff),
            }),
            conversions: Some(ConversionConfig {
                pass: Some(rules.conversions.pass),
                rush: Some(rules.conversions.rush),
                receive: Some(rules.conversions.receive),
            }),
            columns: Some(rules.columns.clone()),
        }
    }
}
