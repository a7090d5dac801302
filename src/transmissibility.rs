//! Steady-state response of a damped main mass carrying a damped vibration
//! absorber.
//!
//! All ratios are relative to the main system:
//! - `r`: excitation frequency / main natural frequency
//! - `beta`: absorber natural frequency / main natural frequency
//! - `mu`: absorber mass / main mass
//! - `nu_a`, `nu_b`: absorber and main damping ratios
//!
//! A zero denominator (undamped system at a singular frequency) is reported as
//! `f64::INFINITY`, never NaN. Callers that aggregate a maximum over a sweep
//! get infinity as the worst possible value.

/// Absolute transmissibility |X1 / (F/k1)| of the two-mass system.
///
/// ```text
/// num = (β² − r²)² + 4 r² νa²
/// A   = (1 − r²)(β² − r²) − μ β² r² − 4 νa νb r²
/// B   = νa (1 − r² − μ r²) + νb (β² − r²)
/// T   = sqrt(num / (A² + 4 r² B²))
/// ```
pub fn transmissibility(r: f64, beta: f64, mu: f64, nu_a: f64, nu_b: f64) -> f64 {
    let r2 = r * r;
    let beta2 = beta * beta;

    let numerator = (beta2 - r2).powi(2) + 4.0 * r2 * nu_a * nu_a;

    let term_a = (1.0 - r2) * (beta2 - r2) - mu * beta2 * r2 - 4.0 * nu_a * nu_b * r2;
    let term_b = nu_a * (1.0 - r2 - mu * r2) + nu_b * (beta2 - r2);
    let denominator = term_a * term_a + 4.0 * r2 * term_b * term_b;

    if denominator == 0.0 {
        return f64::INFINITY;
    }

    (numerator / denominator).sqrt()
}

/// Transmissibility of the main system alone (no absorber).
///
/// T = 1 / sqrt((1 − r²)² + (2 ζ r)²)
pub fn single_dof_transmissibility(r: f64, zeta: f64) -> f64 {
    let denominator = (1.0 - r * r).powi(2) + (2.0 * zeta * r).powi(2);
    if denominator == 0.0 {
        return f64::INFINITY;
    }
    1.0 / denominator.sqrt()
}

/// Evaluate [`transmissibility`] at each excitation ratio.
pub fn transmissibility_curve(
    r_values: &[f64],
    beta: f64,
    mu: f64,
    nu_a: f64,
    nu_b: f64,
) -> Vec<f64> {
    r_values
        .iter()
        .map(|&r| transmissibility(r, beta, mu, nu_a, nu_b))
        .collect()
}

/// Largest value of a response curve; infinity dominates.
pub fn peak(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Values from `start` up to (and excluding) `end` in increments of `step`.
pub fn arange(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || end <= start {
        return Vec::new();
    }
    // Absorb rounding in the span so 0.1..2.005 by 0.005 yields 381 values
    let count = ((end - start) / step - 1e-9).ceil() as usize;
    (0..count).map(|i| start + step * i as f64).collect()
}
