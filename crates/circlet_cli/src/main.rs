//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `circlet_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use circlet_core::db::open_db_in_memory;
use circlet_core::{LabelingService, SqliteLabelRepository};
use std::error::Error;
use uuid::Uuid;

fn main() -> Result<(), Box<dyn Error>> {
    println!("circlet_core version={}", circlet_core::core_version());

    let conn = open_db_in_memory()?;
    let service = LabelingService::new(SqliteLabelRepository::new(&conn, "circles"));

    let owner = Uuid::new_v4();
    let friend = Uuid::new_v4();

    service.assert_not_already_labeled(owner, friend)?;
    let label = service.add_label(owner, "Circle friend", friend)?;
    println!(
        "labels_on_item={}",
        service.get_labels_on_item(owner, friend)?.len()
    );

    service.delete_label(label.id)?;
    println!(
        "labels_after_delete={}",
        service.get_all_items_with_label(owner, "Circle friend")?.len()
    );

    Ok(())
}
