//! Output formatting for records and cache state.

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use roster_core::{BoundedCache, Record, RecordId};

/// Output format for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Print records in the specified format.
pub fn print_records(records: &[Record], format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(records)?),
        Format::Table if records.is_empty() => println!("{}", "No records.".dimmed()),
        Format::Table => println!("{}", records_table(records)),
    }
    Ok(())
}

/// Print a single record in the specified format.
pub fn print_record(record: &Record, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(record)?),
        Format::Table => println!("{}", records_table(std::slice::from_ref(record))),
    }
    Ok(())
}

/// Build a table with one row per record.
pub fn records_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header: Vec<Cell> = ["id", "name", "score", "created_at", "updated_at", "deleted"]
        .iter()
        .map(|c| Cell::new(c).fg(Color::Cyan))
        .collect();
    table.set_header(header);

    for record in records {
        let deleted = if record.is_deleted {
            Cell::new("yes").fg(Color::Red)
        } else {
            Cell::new("no")
        };
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(&record.name),
            Cell::new(record.score),
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(record.updated_at.format("%Y-%m-%d %H:%M:%S")),
            deleted,
        ]);
    }

    table
}

/// Print the cache contents oldest first, with its counters.
pub fn print_cache(cache: &BoundedCache<RecordId, Record>) {
    let entries: Vec<String> = cache
        .entries()
        .iter()
        .map(|(id, record)| format!("{}:{}({})", id, record.name, record.score))
        .collect();

    println!(
        "  {} {}/{} [{}]",
        "cache".cyan(),
        entries.len(),
        cache.capacity(),
        entries.join(", ")
    );
}
