pub mod formatter;

pub use formatter::{
    format_breakdown, format_lineup_table, format_points, format_rules, format_tsv,
    should_use_colors,
};
