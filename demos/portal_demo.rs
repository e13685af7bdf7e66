use std::time::Duration;

use tally::portal::{financial, grades, registration};
use tally::prelude::*;

fn main() -> tally::Result<()> {
    init_logging();

    // Pre-rendered values, as the page would deliver them
    let balances = [
        ("Total Charges", Label::new("$14,250.00")),
        ("Payments", Label::new("$9,800.00")),
        ("Balance Due", Label::new("$4,450.00")),
        ("Refund", Label::new("-$125.50")),
    ];
    let gpa = Label::new("3.67");
    let credits = Label::new("94");
    let status = Label::new("Past Due");
    let seats = [Label::new("3 / 30"), Label::new("22 / 30")];

    // Presentation layer: print each surface whenever it changes
    let mut presenters = Vec::new();
    for (name, label) in &balances {
        presenters.push(present(*name, label));
    }
    presenters.push(present("GPA", &gpa));
    presenters.push(present("Credits", &credits));

    let mut animator = Animator::new()?;
    let surfaces: Vec<Label> = balances.iter().map(|(_, label)| label.clone()).collect();
    financial::animate_balances(&mut animator, &surfaces)?;
    grades::animate_gpa(&mut animator, &gpa)?;
    grades::animate_credits(&mut animator, &credits)?;

    if financial::flag_account_status(&status) {
        println!("Account status '{}' needs attention", status.text());
    }
    let low = registration::highlight_low_seats(&seats);
    println!("{low} section(s) with few seats left");

    if let Some(progress) = financial::payment_progress_text(
        &balances[0].1.text(),
        &balances[1].1.text(),
        &animator.config().formatter,
    ) {
        println!("Payment progress: {progress}%");
    }

    animator.run_until_idle(Duration::from_secs(5))?;
    Ok(())
}

fn present(name: &'static str, label: &Label) -> Effect {
    let label = label.clone();
    create_effect(move || {
        let text = label.text_signal().get();
        let flags = label.flags_signal().get();
        let marker = if flags.contains(SurfaceFlags::ANIMATING) { "…" } else { " " };
        println!("{marker} {name:>14}: {text}");
    })
}
