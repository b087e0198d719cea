use super::engine::ScoringDetail;
use super::range::RangeTable;
use super::rules::ScoringRules;
use crate::summary::{GameSummary, StatGroup};

/// Boxscore statistic groups that carry bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Rushing,
    Passing,
    Receiving,
    Kicking,
}

impl GroupKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "rushing" => Some(GroupKind::Rushing),
            "passing" => Some(GroupKind::Passing),
            "receiving" => Some(GroupKind::Receiving),
            "kicking" => Some(GroupKind::Kicking),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            GroupKind::Rushing => "Rushing",
            GroupKind::Passing => "Passing",
            GroupKind::Receiving => "Receiving",
            GroupKind::Kicking => "Kicking",
        }
    }

    fn game_total<'a>(&self, rules: &'a ScoringRules) -> Option<&'a RangeTable> {
        match self {
            GroupKind::Rushing => Some(&rules.rushing_game_total),
            GroupKind::Passing => Some(&rules.passing_game_total),
            GroupKind::Receiving => Some(&rules.receiving_game_total),
            GroupKind::Kicking => None,
        }
    }
}

/// Leading integer of a stat cell: optional sign then digits.
/// "1,234" reads as 1 and "--" as nothing, matching how the feed's
/// numbers were always read.
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Game-total yardage bonuses and PATs from the boxscore.
///
/// Each category yields at most one detail. If a player shows up in the same
/// category more than once, the last row processed decides the award and the
/// detail keeps the slot of the first appearance.
pub fn add_boxscore_points(
    player_id: &str,
    summary: &GameSummary,
    rules: &ScoringRules,
    details: &mut Vec<ScoringDetail>,
) {
    let mut slots: Vec<(GroupKind, Option<ScoringDetail>)> = Vec::new();

    for team in &summary.boxscore.players {
        for group in &team.statistics {
            let Some(kind) = GroupKind::from_name(&group.name) else {
                continue;
            };
            if group.row_for(player_id).is_none() {
                continue;
            }

            let detail = group_detail(kind, group, player_id, rules);
            match slots.iter_mut().find(|(k, _)| *k == kind) {
                Some(slot) => slot.1 = detail,
                None => slots.push((kind, detail)),
            }
        }
    }

    details.extend(slots.into_iter().filter_map(|(_, detail)| detail));
}

fn group_detail(
    kind: GroupKind,
    group: &StatGroup,
    player_id: &str,
    rules: &ScoringRules,
) -> Option<ScoringDetail> {
    let line = group.row_for(player_id)?;
    let columns = group.columns(line);

    match kind.game_total(rules) {
        Some(table) => {
            let raw = columns.get(rules.columns.yards.as_str()).copied().unwrap_or("0");
            let yards = parse_leading_int(raw)?;
            let band = table.lookup(yards)?;
            Some(ScoringDetail::new(
                format!("{} Total: {} yds", kind.label(), yards),
                band.points,
            ))
        }
        None => {
            let raw = columns
                .get(rules.columns.extra_points.as_str())
                .copied()
                .unwrap_or("0/0");
            let made = raw.split('/').next().and_then(parse_leading_int)?;
            if made <= 0 {
                return None;
            }
            tracing::trace!(player_id, made, "extra points from {} column", kind.label());
            Some(ScoringDetail::new(
                format!("{} PAT(s)", made),
                made as f64 * rules.pat,
            ))
        }
    }
}
