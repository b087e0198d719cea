use super::boxscore::parse_leading_int;
use super::engine::ScoringDetail;
use super::rules::ScoringRules;
use crate::summary::GameSummary;

const DEFENSIVE_TD_TYPES: [&str; 2] = [
    "Interception Return Touchdown",
    "Fumble Recovery Touchdown",
];
const SAFETY_TYPE: &str = "Safety";

/// Team defense: points allowed and defensive scores.
///
/// `team_id` must appear among the header competitors; otherwise the summary
/// is not for this team and nothing is awarded.
pub fn add_defense_points(
    team_id: &str,
    summary: &GameSummary,
    rules: &ScoringRules,
    details: &mut Vec<ScoringDetail>,
) {
    let competitors = summary
        .competition()
        .map(|c| c.competitors.as_slice())
        .unwrap_or_default();
    let team = competitors.iter().find(|c| c.id == team_id);
    let opponent = competitors.iter().find(|c| c.id != team_id);

    let (Some(team), Some(opponent)) = (team, opponent) else {
        tracing::debug!(team_id, "team or opponent missing from competition header");
        return;
    };

    // An empty score reads as zero; an unreadable one awards nothing here.
    let score = if opponent.score.trim().is_empty() {
        "0"
    } else {
        opponent.score.as_str()
    };
    match parse_leading_int(score) {
        Some(0) => details.push(ScoringDetail::new("Shutout", rules.defense.shutout)),
        Some(allowed) if allowed < 10 && team.winner => details.push(ScoringDetail::new(
            "Held Opponent < 10 Pts (Win)",
            rules.defense.hold_under_10,
        )),
        _ => {}
    }

    let mut touchdowns = 0u32;
    let mut safeties = 0u32;
    for play in summary.scoring_plays.iter().filter(|p| p.team.id == team_id) {
        let kind = play.kind.text.as_str();
        if DEFENSIVE_TD_TYPES.iter().any(|t| kind.contains(t)) {
            touchdowns += 1;
        }
        if kind.contains(SAFETY_TYPE) {
            safeties += 1;
        }
    }

    if touchdowns > 0 {
        details.push(ScoringDetail::new(
            format!("{} Defensive TD(s)", touchdowns),
            f64::from(touchdowns) * rules.defense.touchdown,
        ));
    }
    if safeties > 0 {
        details.push(ScoringDetail::new(
            format!("{} Safety", safeties),
            f64::from(safeties) * rules.defense.safety,
        ));
    }
}
