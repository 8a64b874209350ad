//! Example: Interaction Flows
//!
//! Demonstrates: fallback-chain element lookup, best-effort popup
//! dismissal, guided click sequences, and soft assertions.
//!
//! Run with: `cargo run --example interaction_flows`

use hojear::flows;
use hojear::prelude::*;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> HojearResult<()> {
    println!("=== Interaction Flows Example ===\n");

    let probe = Duration::from_millis(200);

    // 1. Fallback chain: markup varies between deployments
    println!("1. Click the first visible button variant...");
    let plain = MockElement::hidden("button.onboard");
    let icon = MockElement::visible("button.onboard-icon");
    let aria = MockElement::visible("[aria-label='Onboard']");

    let winner = flows::click_first_visible(&[&plain, &icon, &aria], probe).await?;
    println!("   Variant {winner} won ({} click)", icon.click_count());

    // 2. Popup dismissal: absence is fine
    println!("\n2. Dismiss a feedback popup if present...");
    let popup = MockElement::visible("feedback-popup");
    let close = MockElement::visible("feedback-close");
    let dismissed = flows::dismiss_if_visible(&popup, &close, probe).await?;
    println!("   Dismissed: {dismissed}");

    let absent_popup = MockElement::hidden("survey-popup");
    let dismissed = flows::dismiss_if_visible(&absent_popup, &close, probe).await?;
    println!("   Absent popup dismissed: {dismissed}");

    // 3. Guided tour: every step must appear
    println!("\n3. Walk a guided tour...");
    let log = CallLog::new();
    let step1 = MockElement::visible("tour-next-1").with_log(&log);
    let step2 = MockElement::visible("tour-next-2").with_log(&log);
    let finish = MockElement::visible("tour-finish").with_log(&log);

    flows::click_sequence(&[&step1, &step2, &finish], probe).await?;
    println!("   {} interaction(s) recorded", log.len());

    // 4. Polling text assertion
    println!("\n4. Wait for a success banner...");
    let banner = MockElement::visible_after("banner", 1).with_text("  Deployment succeeded  ");
    expect_text(&banner)
        .with_timeout(Duration::from_secs(2))
        .with_poll_interval(Duration::from_millis(50))
        .to_contain("succeeded")
        .await?;
    println!("   Banner matched after {} probe(s)", banner.probe_count());

    // 5. Soft assertions: collect everything, fail once
    println!("\n5. Soft assertions...");
    let mut soft = SoftAssertions::new();
    soft.assert_true(dismissed || !dismissed, "tautology passes");
    soft.assert_eq(&log.len(), &6, "tour interaction count");
    soft.assert_contains("Deployment succeeded", "succeeded", "banner text");

    let summary = soft.summary();
    println!(
        "   {} check(s): {} passed, {} failed",
        summary.total, summary.passed, summary.failed
    );
    soft.verify()?;

    println!("\nInteraction flows example completed");
    Ok(())
}
