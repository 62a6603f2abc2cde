use crate::error::Error;
use crate::inspection::Inspection;
use std::io;

const CSV_HEADER: [&str; 13] = [
    "id",
    "status",
    "criteria",
    "type",
    "context",
    "description",
    "level",
    "relevant",
    "authentic",
    "current",
    "date",
    "files",
    "todos",
];

/// One CSV row per inspection; files and todos are joined with `"; "`.
pub fn write_csv<W: io::Write>(writer: W, inspections: &[Inspection]) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for inspection in inspections {
        let record = &inspection.record;
        let files = inspection.files.join("; ");
        let todos = inspection
            .todos
            .iter()
            .map(|todo| todo.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        csv_writer.write_record([
            record.id.as_str(),
            inspection.status.as_str(),
            record.criteria.as_str(),
            record.evidence_type.as_str(),
            record.context.as_str(),
            record.description.as_str(),
            record.level.as_str(),
            record.relevant.as_str(),
            record.authentic.as_str(),
            record.current.as_str(),
            record.date.as_str(),
            files.as_str(),
            todos.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_json(inspections: &[Inspection]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(inspections)?)
}
