//! In-memory walkthrough showing how the cache follows service writes.

use std::sync::Arc;

use colored::Colorize;
use roster_core::store::demo::demo_records;
use roster_core::{MemoryStore, RecordDraft, RecordService, Roster, RosterConfig};

use crate::output;

/// Run the walkthrough with a cache of `cache_size` entries.
pub fn run(config: &RosterConfig, cache_size: usize) -> anyhow::Result<()> {
    let mut config = config.clone();
    config.cache.size = cache_size;
    config.database.init_data = false;

    let roster = Roster::with_store(Arc::new(MemoryStore::new()), &config)?;
    let service = roster.service();

    println!(
        "{} (cache size {})",
        "Roster demo".green().bold(),
        service.cache().capacity()
    );

    step("Create demo records");
    let mut created = Vec::new();
    for draft in demo_records() {
        let record = service.create(&draft)?;
        println!("  created {} {} ({})", record.id, record.name, record.score);
        created.push(record);
    }
    output::print_cache(service.cache());

    if let Some(last) = created.last() {
        step("Update the newest record");
        let updated = service.update(last.id, &RecordDraft::new(&last.name, last.score + 1.0))?;
        println!("  updated {} -> {}", updated.id, updated.score);
        output::print_cache(service.cache());
    }

    if let Some(first) = created.first() {
        step("Update the oldest record");
        let updated = service.update(first.id, &RecordDraft::new(&first.name, first.score))?;
        println!("  updated {} (re-cached)", updated.id);
        output::print_cache(service.cache());

        step("Delete the oldest record");
        let deleted = service.delete(first.id)?;
        println!("  soft-deleted {} {}", deleted.id, deleted.name);
        output::print_cache(service.cache());
    }

    step("Rejected writes leave the cache untouched");
    report_rejection(service, &RecordDraft::new("", 5.0));
    report_rejection(service, &RecordDraft::new("Nobody", -1.0));
    output::print_cache(service.cache());

    step("Store contents");
    output::print_records(
        &service.store().find_all_including_deleted()?,
        output::Format::Table,
    )?;

    println!(
        "\n  {} {}",
        "evictions".cyan(),
        service.cache().stats().evictions
    );
    Ok(())
}

fn step(title: &str) {
    println!("\n{}", title.bold().underline());
}

fn report_rejection(service: &RecordService, draft: &RecordDraft) {
    match service.create(draft) {
        Ok(record) => println!("  unexpectedly created {}", record.id),
        Err(err) => println!("  {} {}", "rejected".red(), err),
    }
}
