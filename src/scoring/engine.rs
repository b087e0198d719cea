use serde::{Deserialize, Serialize};

use super::boxscore::add_boxscore_points;
use super::defense::add_defense_points;
use super::plays::add_scoring_play_points;
use super::rules::{ScoringRules, DST_POSITION};
use crate::summary::GameSummary;

/// Abbreviation reported when the player's team cannot be resolved.
pub const UNKNOWN_ABBR: &str = "??";
/// Status reported when the header carries no status text.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// One itemized award, e.g. "Rushing TD (6 yds)" worth 2.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringDetail {
    pub reason: String,
    pub points: f64,
}

impl ScoringDetail {
    pub fn new(reason: impl Into<String>, points: f64) -> Self {
        Self {
            reason: reason.into(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub player_id: String,
    /// Sum of `details`, rounded to 2 decimals
    pub total_points: f64,
    /// Awards in the order they were accumulated
    pub details: Vec<ScoringDetail>,
    /// e.g. "Final", "3rd Quarter 2:10"
    pub game_status: String,
    /// e.g. "KC"
    pub opponent_abbr: String,
    pub team_abbr: String,
}

/// Round for display; accumulation keeps full precision.
pub fn round_points(points: f64) -> f64 {
    (points * 100.0).round() / 100.0
}

/// Score one player (or one team defense) against a single game summary.
///
/// `position == Some("D/ST")` treats `player_id` as a team id and scores
/// the defense; anything else scores boxscore totals and scoring plays.
/// Pure: no I/O, and identical inputs give identical output.
pub fn calculate_player_score(
    player_id: &str,
    summary: &GameSummary,
    position: Option<&str>,
    rules: &ScoringRules,
) -> ScoreResult {
    let is_defense = position == Some(DST_POSITION);
    let mut details = Vec::new();

    if is_defense {
        add_defense_points(player_id, summary, rules, &mut details);
    } else {
        // Yardage totals and PATs from the boxscore
        add_boxscore_points(player_id, summary, rules, &mut details);
        // Touchdowns, field goals and conversions from the play log
        add_scoring_play_points(player_id, summary, rules, &mut details);
    }

    let total: f64 = details.iter().map(|d| d.points).sum();

    let team = if is_defense {
        summary.team_by_id(player_id)
    } else {
        summary.team_of_athlete(player_id)
    };
    let (team_abbr, opponent_abbr) = match team {
        Some(team) => (
            team.team.abbreviation.clone(),
            summary
                .opponent_of(&team.team.id)
                .map(|opp| opp.team.abbreviation.clone())
                .unwrap_or_else(|| UNKNOWN_ABBR.to_string()),
        ),
        None => (UNKNOWN_ABBR.to_string(), UNKNOWN_ABBR.to_string()),
    };

    let game_status = summary.status_text().unwrap_or(UNKNOWN_STATUS).to_string();

    tracing::debug!(
        player_id,
        position = position.unwrap_or(""),
        details = details.len(),
        total,
        "scored player"
    );

    ScoreResult {
        player_id: player_id.to_string(),
        total_points: round_points(total),
        details,
        game_status,
        opponent_abbr,
        team_abbr,
    }
}
