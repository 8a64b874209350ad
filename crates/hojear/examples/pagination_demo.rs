//! Example: Pagination Search
//!
//! Demonstrates: scanning a paginated sequence for a target element with
//! each of the three search actions, plus exhaustion and deadline handling.
//!
//! Run with: `cargo run --example pagination_demo`

use hojear::prelude::*;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> HojearResult<()> {
    println!("=== Pagination Search Example ===\n");

    let paginator = Paginator::new();

    // 1. Click a row that appears on page 4
    println!("1. Click a row found on page 4...");
    let row = MockElement::visible_after("order-row", 3);
    let next = MockElement::visible("next-page");

    paginator.click(&row, &next, &InstantSettle).await?;
    println!(
        "   Clicked after {} advance(s), {} probe(s) on the target",
        next.click_count(),
        row.probe_count()
    );

    // 2. Extract text from a card on page 3 of 5
    println!("\n2. Extract text from page 3 of a 5-page sequence...");
    let card = MockElement::visible_after("status-card", 2).with_text("Alpha-42");
    let next = MockElement::visible_until("next-page", 4);

    let text = paginator.text(&card, &next, &InstantSettle).await?;
    println!("   Extracted {text:?} after {} advance(s)", next.click_count());

    // 3. Presence report: absence is a valid outcome
    println!("\n3. Presence check for an element that is never there...");
    let ghost = MockElement::hidden("ghost");
    let next = MockElement::visible_until("next-page", 2);

    let found = paginator.exists(&ghost, &next, &InstantSettle).await?;
    println!("   Present: {found} (searched {} page(s))", next.click_count() + 1);

    // 4. Exhaustion is an error when the action needs the target
    println!("\n4. Exhaustion with a click action...");
    let ghost = MockElement::hidden("ghost");
    let next = MockElement::visible_until("next-page", 2);

    match paginator.click(&ghost, &next, &InstantSettle).await {
        Ok(()) => println!("   Unexpectedly found"),
        Err(e) => println!("   Expected failure: {e}"),
    }

    // 5. A deadline guards against cyclic pagination
    println!("\n5. Cyclic pagination aborted by deadline...");
    let ghost = MockElement::hidden("ghost");
    let cyclic_next = MockElement::visible("next-page");

    let guarded = Paginator::new().with_deadline(Duration::from_millis(100));
    match guarded.exists(&ghost, &cyclic_next, &InstantSettle).await {
        Ok(found) => println!("   Unexpectedly completed: {found}"),
        Err(e) => println!("   Expected abort: {e}"),
    }

    println!("\nPagination search example completed");
    Ok(())
}
