use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use gridiron_bonus::scoring::{RulesConfig, ScoringRules};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one player against one saved game summary
    Score {
        /// Game summary JSON file
        #[arg(short, long)]
        summary: PathBuf,

        /// Athlete id, or team id when --position is D/ST
        #[arg(short, long)]
        player: String,

        /// Roster position; "D/ST" scores the team defense
        #[arg(long)]
        position: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a lineup file against a set of saved game summaries
    Lineup {
        /// Lineup YAML file
        #[arg(short, long)]
        lineup: PathBuf,

        /// Game summary JSON file (repeat for each game)
        #[arg(short, long = "summary", required = true)]
        summaries: Vec<PathBuf>,

        /// Print results as JSON
        #[arg(long, conflicts_with = "tsv")]
        json: bool,

        /// Print results as tab-separated values
        #[arg(long)]
        tsv: bool,
    },
    /// Print the effective rule table
    Rules {
        /// Print as config YAML instead of a summary
        #[arg(long)]
        yaml: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "gridiron-bonus")]
#[command(about = "Fantasy-football bonus scoring from NFL game summaries", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gridiron-bonus/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            EXIT_INPUT
        }
    }
}

fn load_rules(config_path: Option<String>) -> Result<ScoringRules, i32> {
    let config = match gridiron_bonus::config::load_config(config_path.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return Err(EXIT_CONFIG);
        }
    };

    // Validate rule overrides at startup, reporting every problem at once
    let rules_config = config.rules.unwrap_or_default();
    if let Err(errors) = gridiron_bonus::scoring::validate_rules(&rules_config) {
        eprintln!("Rule config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    ScoringRules::from_config(&rules_config).map_err(|e| {
        eprintln!("Rule config error: {:#}", e);
        EXIT_CONFIG
    })
}

fn run(cli: Cli) -> i32 {
    let rules = match load_rules(cli.config) {
        Ok(rules) => rules,
        Err(code) => return code,
    };
    let use_colors = gridiron_bonus::output::should_use_colors();

    match cli.command {
        Commands::Score {
            summary,
            player,
            position,
            json,
        } => {
            let summary = match gridiron_bonus::summary::load_summary(&summary) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{:#}", e);
                    return EXIT_INPUT;
                }
            };

            let result = gridiron_bonus::scoring::calculate_player_score(
                &player,
                &summary,
                position.as_deref(),
                &rules,
            );

            if json {
                return print_json(&result);
            }
            println!("{}", gridiron_bonus::output::format_breakdown(&result, use_colors));
        }
        Commands::Lineup {
            lineup,
            summaries,
            json,
            tsv,
        } => {
            let lineup = match gridiron_bonus::lineup::load_lineup(&lineup) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("{:#}", e);
                    return EXIT_INPUT;
                }
            };

            // One bad summary file should not sink the whole lineup; its
            // players fall back to "game not found".
            let mut loaded = Vec::new();
            for path in &summaries {
                match gridiron_bonus::summary::load_summary(path) {
                    Ok(s) => loaded.push(s),
                    Err(e) => eprintln!("Skipping summary: {:#}", e),
                }
            }
            if loaded.is_empty() {
                eprintln!("No game summaries could be loaded.");
                return EXIT_INPUT;
            }

            let index = gridiron_bonus::lineup::SummaryIndex::new(&loaded);
            tracing::debug!(
                summaries = loaded.len(),
                teams = index.team_count(),
                slots = lineup.slots.len(),
                "scoring lineup"
            );
            let scored = gridiron_bonus::lineup::score_lineup(&lineup.slots, &index, &rules);

            if json {
                return print_json(&scored);
            }
            if tsv {
                println!("{}", gridiron_bonus::output::format_tsv(&scored.results));
            } else {
                println!(
                    "{}",
                    gridiron_bonus::output::format_lineup_table(
                        &lineup.slots,
                        &scored.results,
                        scored.total_points,
                        use_colors
                    )
                );
            }
        }
        Commands::Rules { yaml } => {
            if yaml {
                match serde_saphyr::to_string(&RulesConfig::from(&rules)) {
                    Ok(out) => print!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize rules: {}", e);
                        return EXIT_CONFIG;
                    }
                }
            } else {
                println!("{}", gridiron_bonus::output::format_rules(&rules));
            }
        }
    }

    EXIT_SUCCESS
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = gridiron_bonus::telemetry::init(cli.verbose) {
        eprintln!("{}", e);
    }

    std::process::exit(run(cli));
}
