//! Text rendering of planner state

use application::PlannerSnapshot;
use domain::Point;

fn point_line(name: &str, point: Option<&Point>) -> String {
    match point {
        None => format!("{name}: -"),
        Some(p) if p.label().is_empty() => format!("{name}: {}", p.coordinate().to_label()),
        Some(p) => format!("{name}: {} ({})", p.display_label(), p.coordinate().to_label()),
    }
}

/// Multi-line summary of a snapshot
pub fn render_snapshot(snapshot: &PlannerSnapshot) -> String {
    let mut lines = vec![
        snapshot.instruction.clone(),
        point_line("A", snapshot.selection.point_a()),
        point_line("B", snapshot.selection.point_b()),
    ];

    if snapshot.loading {
        lines.push("Calculating route...".to_string());
    }
    if let (Some(distance), Some(duration)) = (&snapshot.distance, &snapshot.duration) {
        lines.push(format!("Distance: {distance}"));
        lines.push(format!("Duration: {duration}"));
    }
    if let Some(error) = &snapshot.error {
        lines.push(format!("Route error: {error}"));
    }
    if let Some(notice) = &snapshot.notice {
        lines.push(format!("Notice: {notice}"));
    }

    lines.join("\n")
}
