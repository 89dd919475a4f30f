//! Console formatting helpers for CLI

const RULE_WIDTH: usize = 60;
const KEY_WIDTH: usize = 20;

/// Banner around a top-level heading
pub fn section_banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n{title}\n{rule}")
}

pub fn print_section(title: &str) {
    println!("{}", section_banner(title));
}

pub fn print_subsection(title: &str) {
    println!("\n{title}\n{}", "-".repeat(title.chars().count().max(20)));
}

/// Indented `key: value` line with the value column aligned.
pub fn kv_line(key: &str, value: &str) -> String {
    let label = format!("{key}:");
    format!("  {label:KEY_WIDTH$} {value}")
}

pub fn print_kv(key: &str, value: &str) {
    println!("{}", kv_line(key, value));
}

pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Format an optional ratio as a percentage, or `undefined`
pub fn format_percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "undefined".to_string(),
    }
}

/// `66.67% (2/3)`, the form used for every accuracy line
pub fn format_score(accuracy: Option<f64>, correct: usize, total: usize) -> String {
    format!("{} ({correct}/{total})", format_percent(accuracy))
}
