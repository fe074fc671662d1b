//! # bs-mc: Black-Scholes Analytics and Monte Carlo Pricing
//!
//! A Rust library for pricing European options two ways: closed-form
//! Black-Scholes formulas (price plus Greeks) and Monte Carlo simulation of
//! geometric Brownian motion with caller-injected payoffs.
//!
//! ## Key Features
//!
//! - **Analytic Pricer**: price, delta, gamma, vega, rho, theta in closed form
//! - **Monte Carlo Simulator**: exact lognormal GBM discretization, no
//!   drift or diffusion discretization bias
//! - **Payoff Injection**: the simulator is generic over a payoff trait, so new
//!   contract shapes need no changes to the path-generation core
//! - **Reproducible**: explicit seeds with per-path generator streams, stable
//!   under any rayon thread count
//! - **Fail Fast**: invalid market or simulation parameters are rejected before
//!   any formula evaluates
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_mc::analytics::bs_analytic;
//! use bs_mc::contract::{ContractParameters, OptionKind};
//! use bs_mc::mc::mc_engine::{mc_price_option_gbm, McConfig};
//! use bs_mc::mc::payoffs::EuropeanCall;
//!
//! let params = ContractParameters {
//!     spot: 100.0,
//!     strike: 100.0,
//!     risk_free: 0.05,
//!     ttm: 1.0,
//!     vol: 0.2,
//! };
//!
//! // Closed form
//! let analytic = bs_analytic::bs_price(&params, OptionKind::Call).expect("valid parameters");
//!
//! // Simulation
//! let cfg = McConfig {
//!     paths: 50_000,
//!     seed: 42,
//!     ..Default::default()
//! };
//! let payoff = EuropeanCall { k: params.strike };
//! let mc = mc_price_option_gbm(&params, &payoff, &cfg).expect("valid configuration");
//!
//! assert!((mc - analytic).abs() / analytic < 0.05);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Under the risk-neutral measure the underlying follows
//! `dS_t = r S_t dt + σ S_t dW_t`. The analytic pricer evaluates the
//! Black-Scholes solution of that model; the simulator samples price paths from
//! the same dynamics and averages discounted payoffs.

// Module declarations
pub mod error;
pub mod rng;
pub mod math_utils;
pub mod contract;
pub mod models;
pub mod mc;
pub mod analytics;
pub mod output;

// Re-export commonly used types for convenience
pub use contract::{ContractParameters, OptionKind};
pub use error::{PricingError, PricingResult};
