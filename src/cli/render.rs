use colored::*;
use evidence_checker::evidence;
use evidence_checker::inspection::summarize;
use evidence_checker::normalize::is_no;
use evidence_checker::todo::{Severity, COMPLETE};
use evidence_checker::{Inspection, Status};
use std::fmt::Write as _;
use std::path::Path;

fn icon(status: Status) -> &'static str {
    match status {
        Status::Good => "✅",
        Status::Wrong => "❌",
        Status::Empty => "⚠️",
        Status::NoData => "❓",
        Status::Incomplete => "🟠",
    }
}

fn paint(text: &str, status: Status) -> ColoredString {
    match status {
        Status::Good => text.green(),
        Status::Wrong => text.red(),
        Status::Empty => text.yellow(),
        Status::NoData => text.bright_black(),
        Status::Incomplete => text.truecolor(255, 136, 0),
    }
}

/// Status cards, `per_row` to a line, in sheet order.
pub fn grid(inspections: &[Inspection], per_row: usize) -> String {
    let per_row = per_row.max(1);
    let mut out = String::new();

    for row in inspections.chunks(per_row) {
        let cards: Vec<String> = row
            .iter()
            .map(|inspection| {
                let card = format!("[ {} {} ]", inspection.id(), icon(inspection.status));
                paint(&card, inspection.status).bold().to_string()
            })
            .collect();
        let _ = writeln!(out, "{}", cards.join("  "));
    }

    out
}

pub fn summary(inspections: &[Inspection]) -> String {
    let counts = summarize(inspections);
    let parts: Vec<String> = Status::ALL
        .iter()
        .filter_map(|status| {
            counts
                .get(status)
                .map(|count| paint(&format!("{} {}", count, status), *status).to_string())
        })
        .collect();

    if parts.is_empty() {
        "No records found.".to_string()
    } else {
        format!("{} records: {}", inspections.len(), parts.join(", "))
    }
}

fn yes_no(value: &str) -> String {
    if value.eq_ignore_ascii_case("JA") {
        value.green().bold().to_string()
    } else if is_no(value) {
        value.red().bold().to_string()
    } else {
        value.to_string()
    }
}

/// Detail view: evidence files as links, the REA check, the spreadsheet
/// fields and what is left to do.
pub fn detail(inspection: &Inspection, evidence_root: &Path) -> String {
    let record = &inspection.record;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})",
        format!("ID {} Inspection", record.id).bold(),
        paint(inspection.status.as_str(), inspection.status)
    );

    let _ = writeln!(out, "\n{}", "📂 Files:".bold());
    if inspection.files.is_empty() {
        let _ = writeln!(out, "  - {}", "No files found".italic());
    }
    for file in &inspection.files {
        let path = evidence::evidence_path(evidence_root, &record.id, file);
        match evidence::file_url(&path) {
            Some(url) => {
                let _ = writeln!(out, "  - {} <{}>", file, url);
            }
            None => {
                let _ = writeln!(out, "  - {}", file);
            }
        }
    }

    let _ = writeln!(out, "\n{}", "📊 REA Check:".bold());
    let _ = writeln!(out, "  Niveau: {}", yes_no(&record.level));
    let _ = writeln!(out, "  Relevant: {}", yes_no(&record.relevant));
    let _ = writeln!(out, "  Authentiek: {}", yes_no(&record.authentic));
    let _ = writeln!(out, "  Actueel: {}", yes_no(&record.current));

    let _ = writeln!(out, "\n{}", "📊 Excel Info:".bold());
    let _ = writeln!(out, "  Criteria: {}", record.criteria);
    let _ = writeln!(out, "  Type: {}", record.evidence_type);
    let _ = writeln!(out, "  Context: {}", record.context);
    let _ = writeln!(out, "  Omschrijving: {}", record.description);
    let _ = writeln!(out, "  Datum: {}", record.date);

    let _ = writeln!(out, "\n{}", "📝 TODO:".bold());
    if inspection.is_complete() {
        let _ = writeln!(out, "  {} 🎉", COMPLETE.italic());
    }
    for todo in &inspection.todos {
        let marker = match todo.severity {
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        };
        let _ = writeln!(out, "  - {} {}", marker, todo);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidence_checker::Record;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_grid_wraps_rows() {
        plain();
        let inspections: Vec<Inspection> = ["A", "B", "C"]
            .iter()
            .map(|id| Inspection::new(Record::unset(id), Vec::new()))
            .collect();

        let out = grid(&inspections, 2);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["[ A ❓ ]  [ B ❓ ]", "[ C ❓ ]"]);
    }

    #[test]
    fn test_summary() {
        plain();
        assert_eq!(summary(&[]), "No records found.");
        let inspections = vec![Inspection::new(Record::unset("A"), vec!["x.txt".into()])];
        assert_eq!(summary(&inspections), "1 records: 1 WRONG");
    }

    #[test]
    fn test_detail_lists_todos() {
        plain();
        let inspection = Inspection::new(Record::unset("A"), Vec::new());
        let out = detail(&inspection, Path::new("/nonexistent"));
        assert!(out.starts_with("ID A Inspection (NODATA)"));
        assert!(out.contains("No files found"));
        assert!(out.contains("❌ Geen bestanden aanwezig"));
        assert!(out.contains("⚠️ Datum niet ingevuld"));
        assert!(!out.contains(COMPLETE));
    }

    #[test]
    fn test_detail_complete() {
        plain();
        let record = Record {
            id: "B".into(),
            criteria: "1 Beleid".into(),
            evidence_type: "Policy".into(),
            context: "General".into(),
            description: "Plan".into(),
            level: "3".into(),
            relevant: "JA".into(),
            authentic: "JA".into(),
            current: "JA".into(),
            date: "17-05-2023".into(),
        };
        let inspection = Inspection::new(record, vec!["a.pdf".into()]);
        let out = detail(&inspection, Path::new("/tmp/Bewijslasten"));
        assert!(out.contains("Bewijs is compleet"));
        assert!(out.contains("  - a.pdf"));
        assert!(out.contains("Relevant: JA"));
    }
}
