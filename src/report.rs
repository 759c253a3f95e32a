use colored::{Color, Colorize};
use url::Url;

use crate::downloader::DownloadOutcome;
use crate::pipeline::RunSummary;

pub fn print_run_summary(summary: &RunSummary) {
    if summary.relevant == 0 {
        println!(
            "{} {}",
            "No relevant confirmations".yellow().bold(),
            format!("({} listed)", summary.listed).dimmed()
        );
        println!("Download process completed.");
        return;
    }

    for item in &summary.downloads.items {
        let (label, color) = outcome_label(&item.outcome);
        println!(
            "  {} {}",
            format_file_link(&item.path, item.outcome.is_saved()),
            label.color(color)
        );
    }

    let (line, color) = summary_line(summary);
    println!("{}", line.color(color).bold());
    println!("Download process completed.");
}

fn outcome_label(outcome: &DownloadOutcome) -> (String, Color) {
    match outcome {
        DownloadOutcome::Saved { bytes } => (format!("{} bytes", bytes), Color::Green),
        DownloadOutcome::HttpStatus(status) => (format!("status {}", status), Color::Red),
        DownloadOutcome::Transport(message) => (format!("error: {}", message), Color::Red),
        DownloadOutcome::Write(message) => (format!("write failed: {}", message), Color::Red),
        DownloadOutcome::MissingId => ("no confirmation id".to_string(), Color::Red),
    }
}

/// Final tally; green when everything landed, red when nothing did.
fn summary_line(summary: &RunSummary) -> (String, Color) {
    let succeeded = summary.succeeded();
    let attempted = summary.attempted();
    let color = if succeeded == attempted {
        Color::Green
    } else if succeeded == 0 {
        Color::Red
    } else {
        Color::Yellow
    };
    (
        format!(
            "Successfully downloaded {} out of {} PDFs.",
            succeeded, attempted
        ),
        color,
    )
}

fn format_file_link(path: &std::path::Path, exists: bool) -> String {
    let display = path.to_string_lossy();
    if !exists {
        return display.dimmed().to_string();
    }
    let absolute = std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf());
    match Url::from_file_path(&absolute) {
        Ok(url) => format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, display.cyan()),
        Err(_) => display.cyan().to_string(),
    }
}
