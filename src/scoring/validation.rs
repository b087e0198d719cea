use super::config::{BandConfig, RulesConfig};
use super::range::RangeBand;
use super::rules::RULES_VERSION;

/// Validate rule overrides at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rules(config: &RulesConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(version) = config.version {
        if version != RULES_VERSION {
            errors.push(format!(
                "rules.version: unsupported version {} (expected {})",
                version, RULES_VERSION
            ));
        }
    }

    let tables = [
        ("td_rushing", &config.td_rushing),
        ("td_passing_receiving", &config.td_passing_receiving),
        ("field_goal", &config.field_goal),
        ("rushing_game_total", &config.rushing_game_total),
        ("passing_game_total", &config.passing_game_total),
        ("receiving_game_total", &config.receiving_game_total),
    ];
    for (name, bands) in tables {
        if let Some(bands) = bands {
            validate_table(name, bands, &mut errors);
        }
    }

    let mut flat = vec![("rules.pat".to_string(), config.pat)];
    if let Some(ref d) = config.defense {
        flat.push(("rules.defense.safety".to_string(), d.safety));
        flat.push(("rules.defense.hold_under_10".to_string(), d.hold_under_10));
        flat.push(("rules.defense.touchdown".to_string(), d.touchdown));
        flat.push(("rules.defense.shutout".to_string(), d.shutout));
    }
    if let Some(ref r) = config.return_special_teams {
        flat.push(("rules.return_special_teams.safety".to_string(), r.safety));
        flat.push(("rules.return_special_teams.other_scores".to_string(), r.other_scores));
        flat.push(("rules.return_special_teams.punt".to_string(), r.punt));
        flat.push(("rules.return_special_teams.kickoff".to_string(), r.kickoff));
    }
    if let Some(ref c) = config.conversions {
        flat.push(("rules.conversions.pass".to_string(), c.pass));
        flat.push(("rules.conversions.rush".to_string(), c.rush));
        flat.push(("rules.conversions.receive".to_string(), c.receive));
    }
    for (path, value) in flat {
        if let Some(value) = value {
            check_points(&path, value, &mut errors);
        }
    }

    if let Some(ref columns) = config.columns {
        if columns.yards.trim().is_empty() {
            errors.push("rules.columns.yards: must not be empty".to_string());
        }
        if columns.extra_points.trim().is_empty() {
            errors.push("rules.columns.extra_points: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_points(path: &str, points: f64, errors: &mut Vec<String>) {
    if !points.is_finite() || points < 0.0 {
        errors.push(format!("{}: must be a non-negative number", path));
    }
}

fn validate_table(name: &str, bands: &[BandConfig], errors: &mut Vec<String>) {
    if bands.is_empty() {
        errors.push(format!("rules.{}: must contain at least one range", name));
        return;
    }

    let mut parsed: Vec<(usize, RangeBand)> = Vec::new();
    for (i, band) in bands.iter().enumerate() {
        match RangeBand::parse(&band.range, band.points) {
            Ok(b) => parsed.push((i, b)),
            Err(e) => errors.push(format!(
                "rules.{}[{}].range: invalid '{}' - {}",
                name, i, band.range, e
            )),
        }
        check_points(&format!("rules.{}[{}].points", name, i), band.points, errors);
    }

    // Overlapping bands would make the award depend on list order.
    for (a, (i, first)) in parsed.iter().enumerate() {
        for (j, second) in parsed.iter().skip(a + 1) {
            if first.overlaps(second) {
                errors.push(format!(
                    "rules.{}[{}].range: '{}' overlaps rules.{}[{}] '{}'",
                    name, j, second, name, i, first
                ));
            }
        }
    }
}
