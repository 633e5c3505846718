//! Measure the dominant cycle of a synthetic price series.
//!
//! Run with: `cargo run --example dominant_cycle`

use cycle_ta::prelude::*;

fn main() -> Result<()> {
    // A 20-bar cycle with a gentle upward drift.
    let closes: Vec<f64> = (0..200)
        .map(|i| {
            let t = i as f64;
            100.0 + 0.05 * t + 8.0 * (2.0 * std::f64::consts::PI * t / 20.0).sin()
        })
        .collect();

    let period = ht_dcperiod(&closes)?;
    let phase = ht_dcphase(&closes)?;
    let sine = ht_sine(&closes)?;
    let trendline = ht_trendline(&closes)?;
    let mode = ht_trendmode(&closes)?;

    println!("bar   close    period   phase     sine    lead   trendline  mode");
    for i in (70..200).step_by(10) {
        println!(
            "{i:>3}  {:>7.2}  {:>7.2}  {:>7.2}  {:>6.3}  {:>6.3}  {:>9.2}  {:>4.0}",
            closes[i], period[i], phase[i], sine.sine[i], sine.lead_sine[i], trendline[i], mode[i]
        );
    }

    // The range API computes only the bars requested, into a compact buffer.
    let mut tail = vec![0.0_f64; 10];
    let span = ht_dcperiod_range(&closes, 190, 199, 0, &mut tail)?;
    println!(
        "\nlast {} bars (from bar {}): {:.2?}",
        span.len, span.first_valid, &tail[..span.len]
    );

    Ok(())
}
