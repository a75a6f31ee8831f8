//! Simple decoder to inspect X12 interchange files.

use std::collections::BTreeMap;
use std::fs;

use x12_envelope::{decode_interchange, validate_interchange, Segment};

fn preview(segment: &Segment) -> String {
    let text = segment.as_str();
    let shown: String = text.chars().take(80).collect();
    if text.len() > 80 {
        format!("{}...", shown)
    } else {
        shown
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "claims.x12".to_string());

    println!("Reading: {}", path);

    let text = fs::read_to_string(&path).expect("Failed to read file");
    println!("File size: {} bytes", text.len());

    let interchange = decode_interchange(&text).expect("Failed to decode");
    let header = &interchange.header;
    let group = &interchange.group.header;
    let d = interchange.delimiters;

    println!("\n=== Interchange ===");
    println!(
        "Delimiters: element {:?}, segment {:?}, component {:?}, repetition {:?}",
        d.element, d.segment, d.component, d.repetition
    );
    println!("Sender: {}:{}", header.sender_qualifier, header.sender_id);
    println!("Receiver: {}:{}", header.receiver_qualifier, header.receiver_id);
    println!("Date: {} {}", header.date, header.time.format("%H:%M"));
    println!("Control number: {}", header.control_number);
    println!("Usage: {:?}", header.usage);

    println!("\n=== Functional Group ===");
    println!("Code: {}", group.functional_id_code);
    println!("Application ids: {} -> {}", group.sender_id, group.receiver_id);
    println!("Version: {}", group.version);
    println!("Control number: {}", group.control_number);

    let sets = interchange.transaction_sets();
    println!("\n=== Transaction Sets ({}) ===", sets.len());

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for set in sets {
        *by_type
            .entry(set.transaction_set_id(d.element).unwrap_or("?"))
            .or_default() += 1;
    }
    for (id, count) in &by_type {
        println!("  {}: {}", id, count);
    }

    match validate_interchange(&interchange) {
        Ok(()) => println!("  ST/SE checks: ok"),
        Err(e) => println!("  ST/SE checks: {}", e),
    }

    println!("\n=== First 5 Transaction Sets (detail) ===");
    for (i, set) in sets.iter().take(5).enumerate() {
        println!("[{}] {} segments", i, set.len());
        for segment in set.segments().iter().take(4) {
            println!("      {}", preview(segment));
        }
        if set.len() > 4 {
            println!("      ... and {} more segments", set.len() - 4);
        }
    }
}
