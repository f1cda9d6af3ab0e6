//! Grouping summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one grouping run, rendered as terminal tables.
#[derive(Debug, Default)]
pub struct GroupingSummary {
    pub rows: usize,
    pub n_groups: usize,
    pub best_score: Option<f64>,
    pub candidates_considered: usize,
    pub candidates_rejected: usize,
    pub group_sizes: Vec<usize>,
    /// Labeled per-group statistic rows, e.g. ("mean(age)", [v0, v1, ...]).
    stat_rows: Vec<(String, Vec<Option<f64>>)>,
    load_time: Duration,
    search_time: Duration,
    save_time: Duration,
}

impl GroupingSummary {
    pub fn new(rows: usize, n_groups: usize) -> Self {
        Self {
            rows,
            n_groups,
            ..Default::default()
        }
    }

    pub fn add_stat_row(&mut self, label: String, values: Vec<Option<f64>>) {
        self.stat_rows.push((label, values));
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_search_time(&mut self, elapsed: Duration) {
        self.search_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("GROUPING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(54)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![Cell::new("🎲 Groups"), Cell::new(self.n_groups)]);
        table.add_row(vec![
            Cell::new("🔍 Candidates considered"),
            Cell::new(self.candidates_considered),
        ]);
        table.add_row(vec![
            Cell::new("🚫 Rejected by tolerance"),
            Cell::new(self.candidates_rejected).fg(if self.candidates_rejected == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        match self.best_score {
            Some(score) => {
                table.add_row(vec![
                    Cell::new("✅ Best score"),
                    Cell::new(format!("{:.6}", score))
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new("❌ Best score"),
                    Cell::new("no feasible grouping")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                ]);
            }
        }
        let total = self.load_time + self.search_time + self.save_time;
        table.add_row(vec![
            Cell::new("⏱  Total time"),
            Cell::new(format!("{:.2}s", total.as_secs_f64())),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.group_sizes.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📊").cyan(),
                style("GROUP PROFILE").white().bold()
            );
            println!("    {}", style("─".repeat(54)).dim());

            let mut profile = Table::new();
            profile.load_preset(UTF8_FULL_CONDENSED);
            let mut header = vec![Cell::new("Metric").add_attribute(Attribute::Bold)];
            for group in 0..self.group_sizes.len() {
                header.push(Cell::new(format!("Group {}", group)).add_attribute(Attribute::Bold));
            }
            profile.set_header(header);

            let mut size_row = vec![Cell::new("Size")];
            for size in &self.group_sizes {
                size_row.push(Cell::new(size));
            }
            profile.add_row(size_row);

            for (label, values) in &self.stat_rows {
                let mut row = vec![Cell::new(label)];
                for value in values {
                    match value {
                        Some(v) => row.push(Cell::new(format!("{:.4}", v))),
                        None => row.push(Cell::new("-").fg(Color::DarkGrey)),
                    }
                }
                profile.add_row(row);
            }

            for line in profile.to_string().lines() {
                println!("    {}", line);
            }
        }
    }
}
