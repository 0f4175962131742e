use std::fmt::Write as _;

use progress_core::model::ProgressSnapshot;
use services::Modal;

pub const HEADING: &str = "My startup progress";

/// Plain-text view of the roadmap.
pub fn render_snapshot(snapshot: &ProgressSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADING}");
    for phase in snapshot.phases() {
        let _ = writeln!(out);
        let mark = if phase.is_completed() { "  [done]" } else { "" };
        let _ = writeln!(out, "{} {}{mark}", phase.id(), phase.name());
        for task in phase.tasks() {
            let check = if task.is_completed() { 'x' } else { ' ' };
            let _ = writeln!(out, "   {}. [{check}] {}", task.id(), task.content());
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}/{} tasks complete",
        snapshot.completed_task_count(),
        snapshot.total_task_count()
    );
    if let Some(current) = snapshot.current_phase() {
        let _ = writeln!(out, "Up next: phase {} ({})", current.id(), current.name());
    }
    out
}

/// The modal box, or `None` when it is hidden.
pub fn render_modal(modal: &Modal) -> Option<String> {
    let message = modal.message()?;
    let hint = if modal.is_completion() {
        "dismiss to start over"
    } else {
        "dismiss to close"
    };
    let width = message.chars().count().max(hint.len());
    let rule = "-".repeat(width + 4);
    Some(format!(
        "{rule}\n| {message:<width$} |\n| {hint:<width$} |\n{rule}\n"
    ))
}
