use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::scoring::{
    calculate_player_score, round_points, ScoreResult, ScoringDetail, ScoringRules,
};
use crate::summary::GameSummary;

pub const MISSING_TEAM_REASON: &str = "Missing Team ID - Please Remove and Re-add Player";
pub const NO_GAME_REASON: &str = "Bye Week / Game Not Found";
pub const UNAVAILABLE_STATUS: &str = "N/A";
pub const UNAVAILABLE_ABBR: &str = "--";

/// One roster slot to score.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LineupSlot {
    /// Athlete id, or team id for a D/ST slot
    pub player_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Team the player belongs to; used to pick the game summary
    #[serde(default)]
    pub team_id: Option<String>,
}

/// Lineup file contents.
///
/// Example YAML:
/// ```yaml
/// slots:
///   - { player_id: "3139477", name: "Patrick Mahomes", position: QB, team_id: "12" }
///   - { player_id: "12", position: "D/ST", team_id: "12" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Lineup {
    pub slots: Vec<LineupSlot>,
}

/// Load a lineup from a YAML file
pub fn load_lineup(path: &Path) -> Result<Lineup> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lineup file at {}", path.display()))?;

    let lineup: Lineup = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse lineup: invalid YAML in {}", path.display()))?;

    Ok(lineup)
}

/// Game summaries keyed by every competing team id, so one summary serves
/// every slot on either side of the game.
#[derive(Debug, Default)]
pub struct SummaryIndex<'a> {
    by_team: HashMap<&'a str, &'a GameSummary>,
}

impl<'a> SummaryIndex<'a> {
    /// Index summaries by the competitor ids in their headers. A team listed
    /// in more than one summary maps to the last one.
    pub fn new(summaries: &'a [GameSummary]) -> Self {
        let mut by_team = HashMap::new();
        for summary in summaries {
            for team_id in summary.competitor_ids() {
                if let Some(previous) = by_team.insert(team_id, summary) {
                    tracing::debug!(
                        team_id,
                        replaced = %previous.id,
                        game = %summary.id,
                        "team appears in more than one summary"
                    );
                }
            }
        }
        Self { by_team }
    }

    pub fn for_team(&self, team_id: &str) -> Option<&'a GameSummary> {
        self.by_team.get(team_id).copied()
    }

    pub fn team_count(&self) -> usize {
        self.by_team.len()
    }
}

/// Scored lineup: one result per slot, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupScore {
    pub results: Vec<ScoreResult>,
    pub total_points: f64,
}

/// Zero-point result for a slot that could not be scored.
fn unavailable(player_id: &str, reason: &str) -> ScoreResult {
    ScoreResult {
        player_id: player_id.to_string(),
        total_points: 0.0,
        details: vec![ScoringDetail::new(reason, 0.0)],
        game_status: UNAVAILABLE_STATUS.to_string(),
        opponent_abbr: UNAVAILABLE_ABBR.to_string(),
        team_abbr: UNAVAILABLE_ABBR.to_string(),
    }
}

/// Score every slot against the indexed summaries.
///
/// Slots without a team, or whose team has no summary (bye week, game not
/// fetched), get a zero result explaining why instead of an error.
pub fn score_lineup(
    slots: &[LineupSlot],
    index: &SummaryIndex,
    rules: &ScoringRules,
) -> LineupScore {
    let results: Vec<ScoreResult> = slots
        .iter()
        .map(|slot| {
            let Some(team_id) = slot.team_id.as_deref() else {
                tracing::warn!(player_id = %slot.player_id, "slot has no team id");
                return unavailable(&slot.player_id, MISSING_TEAM_REASON);
            };
            match index.for_team(team_id) {
                Some(summary) => calculate_player_score(
                    &slot.player_id,
                    summary,
                    slot.position.as_deref(),
                    rules,
                ),
                None => unavailable(&slot.player_id, NO_GAME_REASON),
            }
        })
        .collect();

    let total_points = round_points(results.iter().map(|r| r.total_points).sum());

    LineupScore {
        results,
        total_points,
    }
}
