// demos/demo.rs
use bs_mc::analytics::bs_analytic;
use bs_mc::contract::{ContractParameters, OptionKind};
use bs_mc::math_utils::Timer;
use bs_mc::mc::mc_engine::{
    mc_estimate_option_gbm, mc_greeks_european_gbm, simulate_paths, GreeksConfig, McConfig,
};
use bs_mc::mc::payoffs::{EuropeanCall, EuropeanPut};
use bs_mc::output;

fn main() {
    let params = ContractParameters {
        spot: 100.0,
        strike: 100.0,
        risk_free: 0.05,
        ttm: 1.0,
        vol: 0.2,
    };

    println!("=== Analytic Black-Scholes Valuation ===");
    println!(
        "spot={} strike={} r={} ttm={} vol={}",
        params.spot, params.strike, params.risk_free, params.ttm, params.vol
    );
    for kind in [OptionKind::Call, OptionKind::Put] {
        let v = bs_analytic::bs_valuation(&params, kind).expect("valid parameters");
        println!(
            "{:?}: price={:.4} delta={:.4} gamma={:.4} vega={:.4} rho={:.4} theta={:.4}",
            kind, v.price, v.delta, v.gamma, v.vega, v.rho, v.theta
        );
    }

    println!("\n=== Monte Carlo Pricing ===");
    let cfg = McConfig {
        paths: 500_000,
        steps: 1,
        seed: 42,
        use_antithetic: true,
    };

    let mut timer = Timer::new();

    timer.start();
    let call = mc_estimate_option_gbm(&params, &EuropeanCall { k: params.strike }, &cfg)
        .expect("valid configuration");
    let call_ms = timer.elapsed_ms();
    println!(
        "European call: {:.4} +/- {:.4} ({:.1} ms, {} paths)",
        call.price,
        call.std_error(),
        call_ms,
        cfg.paths
    );

    timer.start();
    let put = mc_estimate_option_gbm(&params, &EuropeanPut { k: params.strike }, &cfg)
        .expect("valid configuration");
    println!(
        "European put:  {:.4} +/- {:.4} ({:.1} ms)",
        put.price,
        put.std_error(),
        timer.elapsed_ms()
    );

    // Any closure over the terminal price is a payoff: a cash-or-nothing
    // digital call paying 10 above the strike.
    let strike = params.strike;
    let digital = move |s_t: f64| if s_t > strike { 10.0 } else { 0.0 };
    let dig = mc_estimate_option_gbm(&params, &digital, &cfg).expect("valid configuration");
    println!("Digital call:  {:.4} +/- {:.4}", dig.price, dig.std_error());

    println!("\n=== Pathwise Monte Carlo Greeks ===");
    let greeks = mc_greeks_european_gbm(
        &params,
        OptionKind::Call,
        params.strike,
        &cfg,
        GreeksConfig::DELTA | GreeksConfig::VEGA,
    )
    .expect("valid configuration");
    println!(
        "call delta={:.4} vega={:.4}",
        greeks.delta.unwrap_or(f64::NAN),
        greeks.vega.unwrap_or(f64::NAN)
    );

    // Dump a small path grid for inspection
    let small_cfg = McConfig {
        paths: 20,
        steps: 12,
        seed: 42,
        use_antithetic: false,
    };
    let grid = simulate_paths(&params, &small_cfg).expect("valid configuration");
    output::write_paths_to_csv("demo_paths.csv", &grid).expect("csv write");

    let analytic_call = bs_analytic::bs_price(&params, OptionKind::Call).expect("valid parameters");
    let summary = vec![
        ("analytic_call", format!("{:.6}", analytic_call)),
        ("mc_call", format!("{:.6}", call.price)),
        ("mc_call_std_error", format!("{:.6}", call.std_error())),
        ("mc_put", format!("{:.6}", put.price)),
        ("paths", cfg.paths.to_string()),
    ];
    let summary_refs: Vec<(&str, &str)> = summary
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .collect();
    output::write_summary_to_csv("demo_summary.csv", &summary_refs).expect("csv write");
    println!("\nWrote demo_paths.csv and demo_summary.csv");
}
