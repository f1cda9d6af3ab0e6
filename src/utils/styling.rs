//! Terminal styling utilities for a modern, visually appealing CLI

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

use crate::pipeline::GroupingConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static SCALE: Emoji<'_, '_> = Emoji("⚖️  ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static TAG: Emoji<'_, '_> = Emoji("🏷️  ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗ ██████╗ ███████╗██████╗ ██╗     ██╗████████╗
    ██╔════╝██╔═══██╗██╔════╝██╔══██╗██║     ██║╚══██╔══╝
    █████╗  ██║   ██║███████╗██████╔╝██║     ██║   ██║
    ██╔══╝  ██║▄▄ ██║╚════██║██╔═══╝ ██║     ██║   ██║
    ███████╗╚██████╔╝███████║██║     ███████╗██║   ██║
    ╚══════╝ ╚══▀▀═╝ ╚══════╝╚═╝     ╚══════╝╚═╝   ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("≡").magenta().bold(),
        style("Balanced groups without manual stratification").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(54)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, output: &Path, config: &GroupingConfig) {
    println!("    {} {}", style("⚙").cyan().bold(), style("Configuration").cyan().bold());
    println!("    {}", style("─".repeat(54)).dim());
    println!("      {} Input:      {}", FOLDER, truncate_path(input, 38));
    println!("      {} Output:     {}", SAVE, truncate_path(output, 38));
    println!(
        "      {} Criteria:   {}",
        TARGET,
        style(config.criteria.join(", ")).yellow()
    );
    if !config.criteria_nominal.is_empty() {
        let nominal: Vec<String> = config
            .criteria_nominal
            .iter()
            .zip(&config.nominal_tolerance)
            .map(|(name, tol)| format!("{} (±{})", name, tol))
            .collect();
        println!("      {} Nominal:    {}", TAG, style(nominal.join(", ")).yellow());
    }
    let statistics: Vec<String> = config.statistics.iter().map(|s| s.to_string()).collect();
    println!(
        "      {} Statistics: {}",
        SCALE,
        style(statistics.join(", ")).yellow()
    );
    let mode = if config.exact {
        "exact (exhaustive enumeration)".to_string()
    } else {
        format!("sampled ({} candidates)", config.n_iter)
    };
    println!(
        "      {} Groups:     {}   Mode: {}",
        DICE,
        style(config.n_groups).yellow(),
        style(mode).yellow()
    );
    if config.scale {
        println!("      {} Scaling:    {}", INFO, style("min-max on criteria").yellow());
    }
    println!("    {}", style("─".repeat(54)).dim());
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(54)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("!").yellow().bold(),
        style(message).yellow()
    );
}

/// Print the elapsed time of a pipeline step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Eqsplit grouping complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("...{}", &s[s.len() - max_len + 3..])
    }
}
