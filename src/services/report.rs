use colored::Colorize;

use crate::domain::{Completion, MatchStatus, ShooterEntry, SyncProgress};

pub fn progress_message(progress: SyncProgress) -> String {
    format!(
        "Loading data: found {} matches, {}%",
        progress.total,
        progress.percent()
    )
}

pub fn status_headline(status: &MatchStatus) -> String {
    format!(
        "{} - level {}  ({})",
        status.event.title, status.event.level, status.event.start_date
    )
}

pub fn status_detail(status: &MatchStatus) -> String {
    match status.completion {
        Completion::Disqualified => "Disqualified".to_string(),
        Completion::Complete => "Scored in 100% of the match".to_string(),
        Completion::Partial { percent } => format!("Scored in {}% of the match", percent),
        Completion::Unknown => format!("{} stages scored, stage list unavailable", status.num_scored),
    }
}

pub fn print_statuses(shooter: &ShooterEntry, statuses: &[MatchStatus]) {
    println!("{}", shooter.label().bold());

    if statuses.is_empty() {
        println!("  No matches found");
        return;
    }

    for status in statuses {
        let headline = status_headline(status);
        let detail = status_detail(status);
        match status.completion {
            Completion::Disqualified => {
                println!("  {}", headline.red().bold());
                println!("    {}", detail.red());
            }
            Completion::Complete => {
                println!("  {}", headline.green());
                println!("    {}", detail.green());
            }
            _ => {
                println!("  {}", headline);
                println!("    {}", detail);
            }
        }
    }
}

pub fn print_directory(entries: &[&ShooterEntry]) {
    for entry in entries {
        println!("{}", entry.label());
    }
    println!("{}", format!("{} shooters", entries.len()).dimmed());
}
