// scripts/benchmark.rs
use bs_mc::analytics::bs_analytic;
use bs_mc::contract::{ContractParameters, OptionKind};
use bs_mc::math_utils::Timer;
use bs_mc::mc::mc_engine::{mc_estimate_option_gbm, McConfig};
use bs_mc::mc::payoffs::EuropeanCall;
use std::env;
use std::fs::File;
use std::io::Write;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }
}

struct BenchRow {
    paths: usize,
    antithetic: bool,
    price: f64,
    std_error: f64,
    abs_error: f64,
    elapsed_ms: f64,
    paths_per_sec: f64,
}

fn main() {
    let info = SystemInfo::gather();
    println!("=== bs-mc Monte Carlo Benchmark ===");
    println!(
        "os={} cores={} rayon_threads={} rustflags={}",
        info.os, info.cpu_cores, info.rayon_threads, info.rustc_flags
    );

    let params = ContractParameters {
        spot: 100.0,
        strike: 100.0,
        risk_free: 0.05,
        ttm: 1.0,
        vol: 0.2,
    };
    let analytic = bs_analytic::bs_price(&params, OptionKind::Call).expect("valid parameters");
    let payoff = EuropeanCall { k: params.strike };
    println!("analytic call reference: {:.6}\n", analytic);

    let mut timer = Timer::new();
    let mut rows = Vec::new();

    println!(
        "{:>10} {:>11} {:>10} {:>10} {:>10} {:>10} {:>14}",
        "paths", "antithetic", "price", "stderr", "abs_err", "ms", "paths/sec"
    );
    for &paths in &[10_000usize, 100_000, 1_000_000] {
        for &antithetic in &[false, true] {
            let cfg = McConfig {
                paths,
                steps: 1,
                seed: 42,
                use_antithetic: antithetic,
            };

            timer.start();
            let estimate =
                mc_estimate_option_gbm(&params, &payoff, &cfg).expect("valid configuration");
            let elapsed_ms = timer.elapsed_ms();
            let paths_per_sec = paths as f64 / (elapsed_ms / 1000.0);

            let row = BenchRow {
                paths,
                antithetic,
                price: estimate.price,
                std_error: estimate.std_error(),
                abs_error: (estimate.price - analytic).abs(),
                elapsed_ms,
                paths_per_sec,
            };
            println!(
                "{:>10} {:>11} {:>10.4} {:>10.5} {:>10.5} {:>10.1} {:>14.0}",
                row.paths,
                row.antithetic,
                row.price,
                row.std_error,
                row.abs_error,
                row.elapsed_ms,
                row.paths_per_sec
            );
            rows.push(row);
        }
    }

    if let Err(e) = write_results_csv("benchmark_results.csv", &info, &rows) {
        eprintln!("failed to write benchmark_results.csv: {}", e);
    } else {
        println!("\nWrote benchmark_results.csv");
    }
}

fn write_results_csv(
    filename: &str,
    info: &SystemInfo,
    rows: &[BenchRow],
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(
        file,
        "# os={} cores={} rayon_threads={}",
        info.os, info.cpu_cores, info.rayon_threads
    )?;
    writeln!(
        file,
        "paths,antithetic,price,std_error,abs_error,elapsed_ms,paths_per_sec"
    )?;
    for r in rows {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            r.paths, r.antithetic, r.price, r.std_error, r.abs_error, r.elapsed_ms, r.paths_per_sec
        )?;
    }
    Ok(())
}
