//! Post-submission result screen

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::api::ListingRecord;
use crate::listing::amenity_label;

/// Print the result card shown after a successful create or update.
pub fn print_submit_success(record: &ListingRecord, updated: bool) {
    println!();
    println!(
        "    {} {}",
        style("🎉").green(),
        style(if updated {
            "LISTING UPDATED"
        } else {
            "LISTING PUBLISHED"
        })
        .white()
        .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    if let Some(id) = record.id {
        table.add_row(vec![
            Cell::new("🔖 Listing ID"),
            Cell::new(id).fg(Color::Green).add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![Cell::new("🏠 Name"), Cell::new(&record.pg_name)]);
    table.add_row(vec![
        Cell::new("📍 Location"),
        Cell::new(format!("{}, {}", record.area, record.city)),
    ]);
    if let Some(category) = record.category {
        table.add_row(vec![Cell::new("🏷️  Category"), Cell::new(category.label())]);
    }

    let sharing: Vec<String> = record
        .sharing_types
        .iter()
        .filter(|entry| entry.enabled)
        .map(|entry| format!("{} ₹{}", entry.kind, entry.rent))
        .collect();
    table.add_row(vec![
        Cell::new("🛏️  Sharing"),
        Cell::new(if sharing.is_empty() {
            "—".to_string()
        } else {
            sharing.join(", ")
        }),
    ]);

    table.add_row(vec![
        Cell::new("📷 Photos"),
        Cell::new(record.images.len()),
    ]);

    if let Some(created) = record.created_at {
        table.add_row(vec![
            Cell::new("🗓️  Created"),
            Cell::new(created.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]);
    }

    // Indent the table
    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    if !record.amenities.is_empty() {
        println!();
        println!(
            "      {} {}:",
            style("Amenities").yellow(),
            style(format!("({})", record.amenities.len())).dim()
        );
        for amenity in &record.amenities {
            println!("        {} {}", style("•").dim(), amenity_label(amenity));
        }
    }

    println!();
    println!(
        "    {} {}",
        style("🚀").green(),
        style("Seekers can now find your PG!").green().bold()
    );
    println!();
}
