//! Parametric transmissibility studies around the Den Hartog design.
//!
//! Run with `cargo run --example parametric_study [mu] [nu_b]`. Pass `--json`
//! as the last argument to dump the frequency ratio study.

use tmd_bees::analysis::{
    damping_ratio_study, frequency_ratio_study, mass_ratio_study, tmd_effectiveness,
    ParametricStudy,
};
use tmd_bees::den_hartog::{optimal_damping_ratio, optimal_frequency_ratio};

fn print_peaks(title: &str, study: &ParametricStudy) {
    println!("{title}");
    for (value, peak) in study.parameter_values.iter().zip(study.column_peaks()) {
        println!("  {value:6.3} -> peak {peak:8.3}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.last().map(|a| a == "--json").unwrap_or(false);
    let mu: f64 = match args.first().filter(|a| *a != "--json") {
        Some(arg) => arg.parse()?,
        None => 0.2,
    };
    let nu_b: f64 = match args.get(1).filter(|a| *a != "--json") {
        Some(arg) => arg.parse()?,
        None => 0.0,
    };

    println!(
        "mu = {mu}, nu_b = {nu_b}: optimal beta = {:.4}, optimal ksi = {:.4}\n",
        optimal_frequency_ratio(mu),
        optimal_damping_ratio(mu)
    );

    let frequency = frequency_ratio_study(mu, nu_b)?;
    print_peaks("Frequency ratio study (ksi = 0.058)", &frequency);
    print_peaks("Damping ratio study", &damping_ratio_study(mu, nu_b)?);
    print_peaks("Mass ratio study", &mass_ratio_study(nu_b)?);

    println!("Den Hartog effectiveness");
    let ratios: Vec<f64> = (1..=10).map(|i| i as f64 * 0.05).collect();
    for point in tmd_effectiveness(nu_b, &ratios)? {
        println!(
            "  mu {:5.2} -> peak {:8.3} (bare {:8.3}, effectiveness {:5.1}%)",
            point.mass_ratio,
            point.peak_transmissibility,
            point.peak_without_tmd,
            point.effectiveness * 100.0
        );
    }

    if json {
        println!("{}", frequency.to_json()?);
    }
    Ok(())
}
