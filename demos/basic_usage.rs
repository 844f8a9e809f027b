//! Example usage of the derivative estimator bank

use derivative_bank::{derivative, smooth, DerivativeEstimator, MultiChannelEstimator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Derivative Bank Examples ===\n");

    let sample_interval = 0.005; // 200 Hz

    // Create a noisy sine wave
    let clean_signal: Vec<f64> = (0..400)
        .map(|i| {
            let t = i as f64 * sample_interval;
            (2.0 * std::f64::consts::PI * t).sin()
        })
        .collect();

    let mut noisy_signal = clean_signal.clone();
    for (i, sample) in noisy_signal.iter_mut().enumerate() {
        *sample += 0.1 * (7.31 * i as f64).sin() + 0.05 * (19.37 * i as f64).sin();
    }

    println!("Noisy input (every 25th sample):");
    print_signal(&noisy_signal, 25);

    // Example 1: Basic smoothing with convenience function
    println!("\n1. Smoothing (pole = -40):");
    let smoothed = smooth(&noisy_signal, -40.0, sample_interval)?;
    print_signal(&smoothed, 25);

    // Example 2: First derivative with convenience function
    println!("\n2. First derivative (pole = -60):");
    let slope = derivative(&noisy_signal, 1, -60.0, sample_interval)?;
    print_signal(&slope, 25);

    // Example 3: Streaming use with all outputs at once
    println!("\n3. Streaming estimator, smoothed + first two derivatives:");
    let mut estimator = DerivativeEstimator::new(2, -60.0, sample_interval)?;
    for (i, &sample) in noisy_signal.iter().enumerate() {
        let outputs = estimator.update(sample);
        if i % 50 == 0 {
            println!(
                "  t = {:5.3}s  y = {:7.3}  dy = {:7.3}  d2y = {:8.3}",
                i as f64 * sample_interval,
                outputs[0],
                outputs[1],
                outputs[2]
            );
        }
    }

    // Example 4: Two channels with different poles
    println!("\n4. Two channels, per-channel poles:");
    let mut multi = MultiChannelEstimator::new(2, 1, vec![-30.0, -120.0], sample_interval)?;
    for (i, &sample) in noisy_signal.iter().enumerate() {
        let rows = multi.update(&[sample, sample]);
        if i % 100 == 0 {
            println!(
                "  t = {:5.3}s  slow = {:7.3}  fast = {:7.3}",
                i as f64 * sample_interval,
                rows[0][0],
                rows[1][0]
            );
        }
    }

    // Example 5: Throughput on a large stream
    println!("\n5. Performance test with large stream:");
    let large_data: Vec<f64> = (0..100_000)
        .map(|i| (i as f64 * 0.001).sin() + 0.1 * (i as f64 * 0.01).cos())
        .collect();

    let start = std::time::Instant::now();
    let mut perf_estimator = DerivativeEstimator::new(4, -80.0, 0.001)?;
    let mut checksum = 0.0;
    for &sample in &large_data {
        checksum += perf_estimator.update(sample)[0];
    }
    let duration = start.elapsed();
    println!(
        "Processed {} samples in {:?} (checksum {:.3})",
        large_data.len(),
        duration,
        checksum
    );

    Ok(())
}

fn print_signal(signal: &[f64], stride: usize) {
    let values: Vec<f64> = signal.iter().copied().step_by(stride).collect();
    for (i, &value) in values.iter().enumerate() {
        print!("{:7.3}", value);
        if i > 0 && (i + 1) % 8 == 0 {
            println!();
        }
    }
    if values.len() % 8 != 0 {
        println!();
    }
}
