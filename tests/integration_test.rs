// tests/integration_test.rs
use bs_mc::analytics::bs_analytic;
use bs_mc::contract::{ContractParameters, OptionKind};
use bs_mc::error::{PricingError, PricingResult};
use bs_mc::math_utils::norm_cdf;
use bs_mc::mc::mc_engine::{mc_estimate_option_gbm, mc_price_option_gbm, McConfig};
use bs_mc::mc::payoffs::{EuropeanCall, EuropeanPut, Payoff};

fn atm_params() -> ContractParameters {
    ContractParameters {
        spot: 100.0,
        strike: 100.0,
        risk_free: 0.05,
        ttm: 1.0,
        vol: 0.2,
    }
}

#[test]
fn test_bs_mc_vs_analytic_call() {
    let params = atm_params();
    let cfg = McConfig {
        paths: 500_000,
        steps: 1,
        seed: 42,
        use_antithetic: false,
    };

    let payoff = EuropeanCall { k: params.strike };
    let mc_price = mc_price_option_gbm(&params, &payoff, &cfg).expect("valid configuration");
    let analytic_price = bs_analytic::bs_price(&params, OptionKind::Call).expect("valid parameters");

    let rel_error = (mc_price - analytic_price).abs() / analytic_price;

    println!("\nMC call price: {}", mc_price);
    println!("Analytic call price: {}", analytic_price);
    println!("Relative error: {}", rel_error);

    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

#[test]
fn test_bs_mc_vs_analytic_put() {
    let params = atm_params();
    let cfg = McConfig {
        paths: 500_000,
        steps: 1,
        seed: 42,
        use_antithetic: true,
    };

    let payoff = EuropeanPut { k: params.strike };
    let mc_price = mc_price_option_gbm(&params, &payoff, &cfg).expect("valid configuration");
    let analytic_price = bs_analytic::bs_price(&params, OptionKind::Put).expect("valid parameters");

    let rel_error = (mc_price - analytic_price).abs() / analytic_price;

    println!("\nMC put price: {}", mc_price);
    println!("Analytic put price: {}", analytic_price);
    println!("Relative error: {}", rel_error);

    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

#[test]
fn test_antithetic_variance_reduction() {
    let params = atm_params();
    let payoff = EuropeanCall { k: params.strike };

    let plain_cfg = McConfig {
        paths: 200_000,
        steps: 1,
        seed: 42,
        use_antithetic: false,
    };
    let anti_cfg = McConfig {
        use_antithetic: true,
        ..plain_cfg.clone()
    };

    let plain = mc_estimate_option_gbm(&params, &payoff, &plain_cfg).expect("valid configuration");
    let anti = mc_estimate_option_gbm(&params, &payoff, &anti_cfg).expect("valid configuration");

    let vrf = plain.variance / anti.variance;

    println!("\nVariance without antithetic: {}", plain.variance);
    println!("Variance with antithetic: {}", anti.variance);
    println!("Variance Reduction Factor: {}", vrf);

    assert!(
        vrf > 1.2,
        "Variance Reduction Factor ({}) is not greater than 1.2",
        vrf
    );
}

#[test]
fn test_closure_payoff_digital_call() {
    // Cash-or-nothing digital call has the closed form e^(-rT) * Φ(d2) * payout
    let params = atm_params();
    let cfg = McConfig {
        paths: 500_000,
        steps: 1,
        seed: 7,
        use_antithetic: false,
    };

    let payout = 10.0;
    let strike = params.strike;
    let digital = move |s_t: f64| if s_t > strike { payout } else { 0.0 };

    let mc_price = mc_price_option_gbm(&params, &digital, &cfg).expect("valid configuration");
    let d2 = bs_analytic::bs_d2(&params).expect("valid parameters");
    let analytic_price = params.discount_factor() * norm_cdf(d2) * payout;

    let rel_error = (mc_price - analytic_price).abs() / analytic_price;

    println!("\nMC digital price: {}", mc_price);
    println!("Analytic digital price: {}", analytic_price);
    println!("Relative error: {}", rel_error);

    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

#[test]
fn test_multi_step_discretization_is_unbiased() {
    // The exact lognormal step leaves the terminal distribution unchanged, so
    // a 12-step grid must agree with the analytic price as well as 1 step does
    let params = atm_params();
    let cfg = McConfig {
        paths: 200_000,
        steps: 12,
        seed: 42,
        use_antithetic: true,
    };

    let payoff = EuropeanCall { k: params.strike };
    let mc_price = mc_price_option_gbm(&params, &payoff, &cfg).expect("valid configuration");
    let analytic_price = bs_analytic::bs_price(&params, OptionKind::Call).expect("valid parameters");

    let rel_error = (mc_price - analytic_price).abs() / analytic_price;

    println!("\nMC 12-step call price: {}", mc_price);
    println!("Analytic call price: {}", analytic_price);
    println!("Relative error: {}", rel_error);

    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

struct FailingPayoff;

impl Payoff for FailingPayoff {
    fn calculate(&self, _terminal_price: f64) -> PricingResult<f64> {
        Err(PricingError::PayoffError {
            payoff_type: "FailingPayoff".to_string(),
            reason: "always fails".to_string(),
        })
    }
}

#[test]
fn test_payoff_failure_propagates_unwrapped() {
    let params = atm_params();
    let cfg = McConfig {
        paths: 100,
        steps: 1,
        seed: 42,
        use_antithetic: false,
    };

    let result = mc_price_option_gbm(&params, &FailingPayoff, &cfg);
    match result {
        Err(PricingError::PayoffError { payoff_type, .. }) => {
            assert_eq!(payoff_type, "FailingPayoff");
        }
        other => panic!("expected PayoffError, got {:?}", other),
    }
}

#[test]
fn test_invalid_simulation_configuration_rejected() {
    let params = atm_params();
    let payoff = EuropeanCall { k: params.strike };

    for cfg in [
        McConfig {
            paths: 0,
            steps: 1,
            seed: 42,
            use_antithetic: false,
        },
        McConfig {
            paths: 1_000,
            steps: 0,
            seed: 42,
            use_antithetic: false,
        },
    ] {
        let result = mc_price_option_gbm(&params, &payoff, &cfg);
        assert!(
            matches!(result, Err(PricingError::InvalidConfiguration { .. })),
            "expected InvalidConfiguration for paths={} steps={}",
            cfg.paths,
            cfg.steps
        );
    }
}
