// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Console output: live progress lines and the final summary

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use graphdrain::{DrainOutcome, Progress, ProgressReporter, SurveyCount};
use std::io::Write;
use std::time::Duration;

/// Progress reporter writing colored lines to a terminal
///
/// Running totals are written with a carriage return so each one overwrites
/// the last; the next regular line first terminates the overwritten one.
pub struct ConsoleReporter<W: Write> {
    out: W,
    transient_open: bool,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleReporter::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        ConsoleReporter {
            out,
            transient_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(event: &Progress) -> ColoredString {
        let text = event.to_string();
        match event {
            Progress::DrainStarted { .. } => text.bold().green(),
            Progress::Drained { .. } => text.yellow(),
            Progress::LimitExceeded { .. } => text.red(),
            Progress::NothingToDrain | Progress::VerticesRemaining { .. } => text.cyan(),
            Progress::VertexRemoved { .. } => text.green(),
            _ => text.normal(),
        }
    }
}

impl<W: Write> ProgressReporter for ConsoleReporter<W> {
    fn report(&mut self, event: &Progress) {
        // Console write failures must not abort a drain
        let line = Self::styled(event);
        if event.is_transient() {
            let _ = write!(self.out, "\r{}", line);
            let _ = self.out.flush();
            self.transient_open = true;
        } else {
            if self.transient_open {
                let _ = writeln!(self.out);
                self.transient_open = false;
            }
            let _ = writeln!(self.out, "{}", line);
        }
    }
}

/// Summary tables printed after a run
pub struct SummaryFormatter;

impl SummaryFormatter {
    /// Table of what each drain removed
    pub fn outcomes(outcomes: &[DrainOutcome], elapsed: Duration) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Drain Summary".bold().green()));
        output.push_str(&format!("Elapsed: {} ms\n\n", elapsed.as_millis()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["Elements", "Scope", "Removed", "Requests"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green)),
        );
        for outcome in outcomes {
            table.add_row(vec![
                outcome.kind.to_string(),
                outcome.scope.to_string(),
                outcome.removed.to_string(),
                outcome.batches.to_string(),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');

        let total: u64 = outcomes.iter().map(|o| o.removed).sum();
        output.push_str(&format!("\nTotal removed: {}\n", total));
        output
    }

    /// Table of dry-run counts
    pub fn survey(counts: &[SurveyCount]) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n\n",
            "Dry run - nothing was deleted".bold().yellow()
        ));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["Elements", "Scope", "Matching"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green)),
        );
        for count in counts {
            table.add_row(vec![
                count.kind.to_string(),
                count.scope.to_string(),
                count.count.to_string(),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }
}
