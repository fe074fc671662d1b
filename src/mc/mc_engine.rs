// src/mc/mc_engine.rs
use crate::contract::{ContractParameters, OptionKind};
use crate::error::{validation::*, PricingError, PricingResult};
use crate::mc::payoffs::Payoff;
use crate::models::gbm::Gbm;
use crate::rng;
use bitflags::bitflags;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreeksConfig: u32 {
        const NONE  = 0;
        const DELTA = 1 << 0;
        const VEGA  = 1 << 1;
    }
}

/// Simulation parameters, independent of the contract being priced
#[derive(Debug, Clone)]
pub struct McConfig {
    pub paths: usize,
    pub steps: usize,
    pub seed: u64,
    pub use_antithetic: bool,
}

impl McConfig {
    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> PricingResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        Ok(())
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            paths: 100_000,
            steps: 1,
            seed: 12345,
            use_antithetic: false,
        }
    }
}

/// Monte Carlo price estimate with its sampling error
#[derive(Debug, Clone, Copy)]
pub struct McEstimate {
    /// Discounted mean payoff across paths
    pub price: f64,
    /// Sample variance of the estimator
    pub variance: f64,
}

impl McEstimate {
    pub fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Simulate a set of GBM price paths
///
/// # Algorithm
///
/// Produces a grid of shape `(paths, steps + 1)` where column 0 is the spot
/// price in every row and each subsequent column advances one step of size
/// `dt = ttm / steps` using the exact lognormal transition:
/// ```text
/// S_i = S_{i-1} * exp((r - σ²/2)dt + σ√dt * Z)
/// ```
/// with Z ~ N(0,1) drawn independently per path and per step. The exact
/// solution carries no discretization bias in the drift or diffusion terms;
/// only Monte Carlo sampling error remains.
///
/// # Reproducibility
///
/// Path `i` draws from a generator seeded with `seed + i`, so the grid is
/// identical for any rayon thread count.
///
/// # Errors
///
/// Returns `PricingError` when the contract parameters or the path/step counts
/// are invalid.
pub fn simulate_paths(
    params: &ContractParameters,
    cfg: &McConfig,
) -> PricingResult<Array2<f64>> {
    params.validate()?;
    cfg.validate()?;
    Ok(simulate_path_grid(params, cfg, false))
}

/// Fill the path grid, optionally flipping the sign of every normal draw.
/// Callers must have validated `params` and `cfg`.
fn simulate_path_grid(params: &ContractParameters, cfg: &McConfig, antithetic: bool) -> Array2<f64> {
    let dt = params.ttm / cfg.steps as f64;
    let gbm = Gbm::from_contract(params);
    let sign = if antithetic { -1.0 } else { 1.0 };

    let mut grid = Array2::<f64>::zeros((cfg.paths, cfg.steps + 1));
    grid.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let mut rng = rng::seed_rng_from_u64(cfg.seed + i as u64);
            row[0] = params.spot;
            let mut current_s = params.spot;
            for j in 1..=cfg.steps {
                let z = sign * rng::get_normal_draw(&mut rng);
                current_s = gbm.exact_step(current_s, dt, z);
                row[j] = current_s;
            }
        });
    grid
}

/// Evaluate the payoff on the terminal column of a path grid.
/// Payoff failures propagate unchanged.
fn terminal_payoffs<P: Payoff + ?Sized>(
    grid: &Array2<f64>,
    steps: usize,
    payoff: &P,
) -> PricingResult<Vec<f64>> {
    let terminal: Vec<f64> = grid.column(steps).iter().copied().collect();
    terminal
        .par_iter()
        .map(|&s_t| payoff.calculate(s_t))
        .collect()
}

/// Monte Carlo option pricing under geometric Brownian motion
///
/// Single-shot computation: simulate paths, apply the injected payoff to the
/// terminal prices, discount by `e^(-r*ttm)` and return the sample mean. No
/// state survives the call.
///
/// The engine aggregates whatever the payoff returns. It does not clamp
/// negative values and it does not correct a misbehaving payoff; a payoff
/// error aborts the computation and propagates to the caller.
///
/// # Errors
///
/// Returns `PricingError` for invalid contract parameters, invalid path/step
/// counts, a failing payoff, or a non-finite estimate.
pub fn mc_price_option_gbm<P: Payoff + ?Sized>(
    params: &ContractParameters,
    payoff: &P,
    cfg: &McConfig,
) -> PricingResult<f64> {
    Ok(mc_estimate_option_gbm(params, payoff, cfg)?.price)
}

/// Monte Carlo pricing with a variance estimate for confidence intervals
///
/// # Antithetic Variates
///
/// With `use_antithetic` enabled, every path is paired with a second path
/// driven by the negated normal draws and the two payoffs are averaged. The
/// pair shares one seed, so the estimator stays deterministic.
///
/// # Returns
///
/// `McEstimate { price, variance }` where `variance` is the sample variance of
/// the mean estimator (zero when only one path is simulated).
pub fn mc_estimate_option_gbm<P: Payoff + ?Sized>(
    params: &ContractParameters,
    payoff: &P,
    cfg: &McConfig,
) -> PricingResult<McEstimate> {
    params.validate()?;
    cfg.validate()?;

    let grid = simulate_path_grid(params, cfg, false);
    let mut path_payoffs = terminal_payoffs(&grid, cfg.steps, payoff)?;

    if cfg.use_antithetic {
        let grid2 = simulate_path_grid(params, cfg, true);
        let payoffs2 = terminal_payoffs(&grid2, cfg.steps, payoff)?;
        for (p, p2) in path_payoffs.iter_mut().zip(payoffs2) {
            *p = 0.5 * (*p + p2);
        }
    }

    let n = cfg.paths as f64;
    let discount = params.discount_factor();
    let mean_payoff = path_payoffs.iter().sum::<f64>() / n;
    let mean_payoff_sq = path_payoffs.iter().map(|p| p * p).sum::<f64>() / n;

    let estimated_price = discount * mean_payoff;
    let mut variance_of_estimate = if cfg.paths > 1 {
        (mean_payoff_sq - mean_payoff * mean_payoff) * discount.powi(2) / (n * (n - 1.0))
    } else {
        0.0
    };

    // Floating point cancellation can push the variance slightly below zero
    if variance_of_estimate < 0.0 {
        if variance_of_estimate > -1e-10 {
            variance_of_estimate = 0.0;
        } else {
            return Err(PricingError::NumericalInstability {
                method: "Monte Carlo".to_string(),
                reason: format!(
                    "Variance estimate became significantly negative: {}",
                    variance_of_estimate
                ),
            });
        }
    }

    if !estimated_price.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Price estimate is not finite: {}", estimated_price),
        });
    }

    if !variance_of_estimate.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Variance estimate is not finite: {}", variance_of_estimate),
        });
    }

    Ok(McEstimate {
        price: estimated_price,
        variance: variance_of_estimate,
    })
}

/// Terminal price from a single draw over the whole contract life
fn terminal_price(params: &ContractParameters, z: f64) -> f64 {
    params.spot
        * ((params.risk_free - 0.5 * params.vol * params.vol) * params.ttm
            + params.vol * params.ttm.sqrt() * z)
            .exp()
}

/// Per-path pathwise delta contribution
///
/// For a call under GBM:
/// ```text
/// ∂/∂S₀ max(S_T - K, 0) = 1_{S_T > K} * S_T/S₀
/// ```
/// and for a put the indicator flips to `S_T < K` with a negated sign.
fn pathwise_delta(params: &ContractParameters, kind: OptionKind, k: f64, z: f64) -> f64 {
    let s_t = terminal_price(params, z);
    match kind {
        OptionKind::Call => {
            if s_t > k {
                s_t / params.spot
            } else {
                0.0
            }
        }
        OptionKind::Put => {
            if s_t < k {
                -s_t / params.spot
            } else {
                0.0
            }
        }
    }
}

/// Per-path pathwise vega contribution
///
/// Uses the sensitivity of the exact GBM solution to volatility:
/// ```text
/// ∂S_T/∂σ = S_T * (-σT + W_T),  W_T = √T * Z
/// ```
fn pathwise_vega(params: &ContractParameters, kind: OptionKind, k: f64, z: f64) -> f64 {
    let w_t = params.ttm.sqrt() * z;
    let s_t = params.spot
        * ((params.risk_free - 0.5 * params.vol * params.vol) * params.ttm + params.vol * w_t)
            .exp();
    let ds_dsigma = s_t * (-params.vol * params.ttm + w_t);
    match kind {
        OptionKind::Call => {
            if s_t > k {
                ds_dsigma
            } else {
                0.0
            }
        }
        OptionKind::Put => {
            if s_t < k {
                -ds_dsigma
            } else {
                0.0
            }
        }
    }
}

/// Monte Carlo Delta via the pathwise derivative method
///
/// Unbiased for vanilla payoffs since the kink at S_T = K has measure zero.
/// Draws the terminal price directly from the exact solution over the full
/// contract life; `cfg.steps` is not consulted.
pub fn mc_delta_european_gbm_pathwise(
    params: &ContractParameters,
    kind: OptionKind,
    strike: f64,
    cfg: &McConfig,
) -> PricingResult<f64> {
    params.validate()?;
    cfg.validate()?;
    validate_positive("strike", strike)?;

    let n = cfg.paths;
    let discount = params.discount_factor();

    let sum: f64 = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng::seed_rng_from_u64(cfg.seed + i as u64);
            let z = rng::get_normal_draw(&mut rng);

            let mut delta_path = pathwise_delta(params, kind, strike, z);
            if cfg.use_antithetic {
                delta_path = 0.5 * (delta_path + pathwise_delta(params, kind, strike, -z));
            }
            delta_path
        })
        .sum();

    Ok(sum / n as f64 * discount)
}

/// Monte Carlo Vega via the pathwise derivative method
pub fn mc_vega_european_gbm_pathwise(
    params: &ContractParameters,
    kind: OptionKind,
    strike: f64,
    cfg: &McConfig,
) -> PricingResult<f64> {
    params.validate()?;
    cfg.validate()?;
    validate_positive("strike", strike)?;

    let n = cfg.paths;
    let discount = params.discount_factor();

    let sum: f64 = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng::seed_rng_from_u64(cfg.seed + i as u64);
            let z = rng::get_normal_draw(&mut rng);

            let mut vega_path = pathwise_vega(params, kind, strike, z);
            if cfg.use_antithetic {
                vega_path = 0.5 * (vega_path + pathwise_vega(params, kind, strike, -z));
            }
            vega_path
        })
        .sum();

    Ok(sum / n as f64 * discount)
}

/// Pathwise Monte Carlo Greeks for a vanilla European option
#[derive(Debug, Clone, Copy, Default)]
pub struct McGreeks {
    pub delta: Option<f64>,
    pub vega: Option<f64>,
}

/// Compute the Greeks selected in `which`, skipping the rest
pub fn mc_greeks_european_gbm(
    params: &ContractParameters,
    kind: OptionKind,
    strike: f64,
    cfg: &McConfig,
    which: GreeksConfig,
) -> PricingResult<McGreeks> {
    let mut greeks = McGreeks::default();
    if which.contains(GreeksConfig::DELTA) {
        greeks.delta = Some(mc_delta_european_gbm_pathwise(params, kind, strike, cfg)?);
    }
    if which.contains(GreeksConfig::VEGA) {
        greeks.vega = Some(mc_vega_european_gbm_pathwise(params, kind, strike, cfg)?);
    }
    Ok(greeks)
}
