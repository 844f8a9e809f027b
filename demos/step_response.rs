use derivative_bank::{repeated_pole_polynomial, ContinuousStateSpace, DerivativeEstimator};

fn main() {
    // Diagnostic: show the filter design for order=4, pole=-100, 400 Hz,
    // then drive the bank with a unit step.
    let order = 4;
    let pole = -100.0;
    let sample_interval = 1.0 / 400.0;

    let characteristic = repeated_pole_polynomial(order + 1, pole);
    println!("characteristic polynomial (s - ({}))^{}:", pole, order + 1);
    for (i, c) in characteristic.iter().enumerate() {
        println!("  s^{} coefficient = {:.6e}", characteristic.len() - 1 - i, c);
    }

    let continuous = ContinuousStateSpace::from_characteristic(&characteristic);
    let discrete = continuous.discretize(sample_interval);
    let (numerator, denominator) = discrete
        .transfer_function(0)
        .expect("transfer function extraction failed");
    println!("\nsmoothed-output transfer function at {} Hz:", 1.0 / sample_interval);
    println!("  numerator   = {:?}", numerator);
    println!("  denominator = {:?}", denominator);

    let mut estimator =
        DerivativeEstimator::new(order, pole, sample_interval).expect("estimator build failed");
    println!("\nunit step response ({} outputs):", estimator.outputs());
    println!("{:>8} {:>10} {:>12} {:>14}", "t (s)", "y", "dy/dt", "d2y/dt2");
    for k in 0..=400 {
        let outputs = estimator.update(1.0);
        if k % 40 == 0 {
            println!(
                "{:8.3} {:10.6} {:12.6} {:14.6}",
                k as f64 * sample_interval,
                outputs[0],
                outputs[1],
                outputs[2]
            );
        }
    }

    // After ten time constants the smoothed output should sit at the step level.
    println!("\nexpected settled value = 1.0");
}
