//! Listing overview tables for the `list` and `show` subcommands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::api::ListingRecord;
use crate::listing::amenity_label;

/// Print the owner's listings, one row per record.
pub fn print_listing_table(records: &[ListingRecord]) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("YOUR LISTINGS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    if records.is_empty() {
        println!("      {}", style("No listings yet.").dim());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("City").add_attribute(Attribute::Bold),
        Cell::new("Area").add_attribute(Attribute::Bold),
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Photos").add_attribute(Attribute::Bold),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(
                record
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "—".to_string()),
            )
            .fg(Color::Green),
            Cell::new(&record.pg_name),
            Cell::new(&record.city),
            Cell::new(&record.area),
            Cell::new(
                record
                    .category
                    .map(|category| category.label())
                    .unwrap_or("—"),
            ),
            Cell::new(record.images.len()),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
    println!();
}

/// Print one listing in full.
pub fn print_listing_detail(record: &ListingRecord) {
    println!();
    println!(
        "    {} {}",
        style("🏠").cyan(),
        style(record.pg_name.to_uppercase()).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    if let Some(id) = record.id {
        table.add_row(vec![Cell::new("ID"), Cell::new(id)]);
    }
    table.add_row(vec![Cell::new("Address"), Cell::new(&record.address)]);
    table.add_row(vec![
        Cell::new("Location"),
        Cell::new(format!("{}, {}", record.area, record.city)),
    ]);
    if let Some(category) = record.category {
        table.add_row(vec![Cell::new("Category"), Cell::new(category.label())]);
    }
    if let Some(preferred) = record.preferred_for {
        table.add_row(vec![Cell::new("Preferred"), Cell::new(preferred.label())]);
    }
    table.add_row(vec![Cell::new("Phone"), Cell::new(&record.phone_number)]);
    table.add_row(vec![
        Cell::new("WhatsApp"),
        Cell::new(&record.whatsapp_number),
    ]);
    table.add_row(vec![
        Cell::new("Deposit"),
        Cell::new(format!("₹{}", record.security_deposit)),
    ]);
    table.add_row(vec![
        Cell::new("Notice period"),
        Cell::new(format!("{} days", record.notice_period)),
    ]);
    table.add_row(vec![
        Cell::new("Refundable"),
        Cell::new(if record.refundable_on_exit { "Yes" } else { "No" }),
    ]);
    table.add_row(vec![Cell::new("Photos"), Cell::new(record.images.len())]);

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    let sharing: Vec<String> = record
        .sharing_types
        .iter()
        .filter(|entry| entry.enabled)
        .map(|entry| format!("{} ₹{}", entry.kind, entry.rent))
        .collect();
    if !sharing.is_empty() {
        println!();
        println!("      {}:", style("Sharing").yellow());
        for row in &sharing {
            println!("        {} {}", style("•").dim(), row);
        }
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

    if !record.nearby_places.is_empty() {
        println!();
        println!("      {}:", style("Nearby").yellow());
        for place in &record.nearby_places {
            println!("        {} {}", style("•").dim(), place);
        }
    }
    println!();
}
