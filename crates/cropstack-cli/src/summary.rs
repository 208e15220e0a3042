use std::path::PathBuf;

use console::Style;
use cropstack_core::pipeline::config::StackSettings;
use cropstack_core::pipeline::Outcome;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Counts of what happened to each replayed frame.
#[derive(Debug, Default)]
pub struct ReplayTally {
    pub seeded: usize,
    pub merged: usize,
    pub skipped: usize,
    pub disabled: usize,
    pub resets: usize,
    pub errors: usize,
    pub stacks: Vec<(usize, Option<PathBuf>)>,
    /// Frames left in the open window at the end of the replay.
    pub pending: usize,
}

impl ReplayTally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Disabled => self.disabled += 1,
            Outcome::Seeded { .. } => self.seeded += 1,
            Outcome::Merged { .. } => self.merged += 1,
            Outcome::Reset(_) => self.resets += 1,
            Outcome::Flushed(report) => self
                .stacks
                .push((report.frame_count, report.destination.clone())),
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }
}

pub fn print_replay_summary(settings: &StackSettings, tally: &ReplayTally, dry_run: bool) {
    let s = Styles::new();
    let row = |label: &str, value: String| {
        println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
    };

    println!();
    println!("  {}", s.title.apply_to("Crop Stack Replay"));
    println!();
    row(
        "Crop",
        format!("{:.0}%", settings.crop_fraction * 100.0),
    );
    row(
        "Window",
        format!("{:.0}s", settings.aggregation_window_seconds),
    );
    row("Seeded", tally.seeded.to_string());
    row("Merged", tally.merged.to_string());
    row("Skipped", tally.skipped.to_string());
    row("Resets", tally.resets.to_string());
    if tally.disabled > 0 {
        row("Disabled", tally.disabled.to_string());
    }
    if tally.errors > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Errors"),
            s.warn.apply_to(tally.errors)
        );
    }
    row("Unflushed", tally.pending.to_string());
    row("Stacks", tally.stacks.len().to_string());

    for (frames, destination) in &tally.stacks {
        match destination {
            Some(path) if !dry_run => println!(
                "    {} frames -> {}",
                frames,
                s.path.apply_to(path.display())
            ),
            _ => println!("    {} frames", frames),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropstack_core::ingest::SkipReason;
    use cropstack_core::pipeline::ResetReason;
    use cropstack_core::stack::FlushReport;

    #[test]
    fn test_tally_counts_outcomes() {
        let mut tally = ReplayTally::default();
        tally.record(&Outcome::Seeded { width: 4, height: 4 });
        tally.record(&Outcome::Skipped(SkipReason::NoTimestamp));
        tally.record(&Outcome::Reset(ResetReason::Slew));
        tally.record(&Outcome::Flushed(FlushReport {
            destination: None,
            width: 4,
            height: 4,
            frame_count: 5,
            total_exposure_seconds: 150.0,
            elapsed_seconds: 65.0,
        }));
        tally.record_error();

        assert_eq!(tally.seeded, 1);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.resets, 1);
        assert_eq!(tally.errors, 1);
        assert_eq!(tally.stacks, vec![(5, None)]);
    }
}
