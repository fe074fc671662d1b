// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options this has closed-form solutions involving the
//! cumulative normal distribution function Φ(x). Every public function
//! validates the contract parameters before evaluating a formula, so a
//! non-positive spot, strike, maturity or volatility yields an
//! `InvalidParameters` error instead of NaN.

use crate::contract::{ContractParameters, OptionKind};
use crate::error::PricingResult;
use crate::math_utils::{norm_cdf, norm_pdf};

fn d1_raw(p: &ContractParameters) -> f64 {
    ((p.spot / p.strike).ln() + (p.risk_free + 0.5 * p.vol * p.vol) * p.ttm)
        / (p.vol * p.ttm.sqrt())
}

fn d2_raw(p: &ContractParameters) -> f64 {
    d1_raw(p) - p.vol * p.ttm.sqrt()
}

/// Black-Scholes d₁ term
///
/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// ```
pub fn bs_d1(params: &ContractParameters) -> PricingResult<f64> {
    params.validate()?;
    Ok(d1_raw(params))
}

/// Black-Scholes d₂ term: d₂ = d₁ - σ√T
pub fn bs_d2(params: &ContractParameters) -> PricingResult<f64> {
    params.validate()?;
    Ok(d2_raw(params))
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// # Returns
/// Present value of the option
pub fn bs_price(params: &ContractParameters, kind: OptionKind) -> PricingResult<f64> {
    params.validate()?;
    let d1 = d1_raw(params);
    let d2 = d2_raw(params);
    let df = params.discount_factor();
    Ok(match kind {
        OptionKind::Call => params.spot * norm_cdf(d1) - params.strike * df * norm_cdf(d2),
        OptionKind::Put => params.strike * df * norm_cdf(-d2) - params.spot * norm_cdf(-d1),
    })
}

/// Black-Scholes Delta (∂V/∂S)
///
/// # Formula
/// ```text
/// Δ_call = Φ(d₁)        range [0, 1]
/// Δ_put  = Φ(d₁) - 1    range [-1, 0]
/// ```
///
/// # Interpretation
/// Hedge ratio: number of shares to hold per option sold.
pub fn bs_delta(params: &ContractParameters, kind: OptionKind) -> PricingResult<f64> {
    params.validate()?;
    let d1 = d1_raw(params);
    Ok(match kind {
        OptionKind::Call => norm_cdf(d1),
        OptionKind::Put => norm_cdf(d1) - 1.0,
    })
}

/// Black-Scholes Gamma (∂²V/∂S²), identical for calls and puts
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
pub fn bs_gamma(params: &ContractParameters) -> PricingResult<f64> {
    params.validate()?;
    let d1 = d1_raw(params);
    Ok(norm_pdf(d1) / (params.spot * params.vol * params.ttm.sqrt()))
}

/// Black-Scholes Vega (∂V/∂σ), identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * √T
/// ```
pub fn bs_vega(params: &ContractParameters) -> PricingResult<f64> {
    params.validate()?;
    let d1 = d1_raw(params);
    Ok(params.spot * norm_pdf(d1) * params.ttm.sqrt())
}

/// Black-Scholes Rho (∂V/∂r)
///
/// # Formula
/// ```text
/// ρ_call =  K * T * e^(-rT) * Φ(d₂)
/// ρ_put  = -K * T * e^(-rT) * Φ(-d₂)
/// ```
pub fn bs_rho(params: &ContractParameters, kind: OptionKind) -> PricingResult<f64> {
    params.validate()?;
    let d2 = d2_raw(params);
    let kt_df = params.strike * params.ttm * params.discount_factor();
    Ok(match kind {
        OptionKind::Call => kt_df * norm_cdf(d2),
        OptionKind::Put => -kt_df * norm_cdf(-d2),
    })
}

/// Black-Scholes Theta (∂V/∂t)
///
/// # Formula
/// ```text
/// Θ_call = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)
/// Θ_put  = -S*φ(d₁)*σ/(2√T) + r*K*e^(-rT)*Φ(-d₂)
/// ```
///
/// # Interpretation
/// Time decay of option value, usually negative for long options.
pub fn bs_theta(params: &ContractParameters, kind: OptionKind) -> PricingResult<f64> {
    params.validate()?;
    let d1 = d1_raw(params);
    let d2 = d2_raw(params);
    let decay = -params.spot * norm_pdf(d1) * params.vol / (2.0 * params.ttm.sqrt());
    let carry = params.risk_free * params.strike * params.discount_factor();
    Ok(match kind {
        OptionKind::Call => decay - carry * norm_cdf(d2),
        OptionKind::Put => decay + carry * norm_cdf(-d2),
    })
}

/// Closed-form price and sensitivities of one option
#[derive(Debug, Clone, Copy)]
pub struct OptionValuation {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub rho: f64,
    pub theta: f64,
}

/// Price and all Greeks in one pass, validating the parameters once
pub fn bs_valuation(
    params: &ContractParameters,
    kind: OptionKind,
) -> PricingResult<OptionValuation> {
    params.validate()?;
    let d1 = d1_raw(params);
    let d2 = d2_raw(params);
    let df = params.discount_factor();
    let sqrt_t = params.ttm.sqrt();
    let decay = -params.spot * norm_pdf(d1) * params.vol / (2.0 * sqrt_t);
    let carry = params.risk_free * params.strike * df;

    let (price, delta, rho, theta) = match kind {
        OptionKind::Call => (
            params.spot * norm_cdf(d1) - params.strike * df * norm_cdf(d2),
            norm_cdf(d1),
            params.strike * params.ttm * df * norm_cdf(d2),
            decay - carry * norm_cdf(d2),
        ),
        OptionKind::Put => (
            params.strike * df * norm_cdf(-d2) - params.spot * norm_cdf(-d1),
            norm_cdf(d1) - 1.0,
            -params.strike * params.ttm * df * norm_cdf(-d2),
            decay + carry * norm_cdf(-d2),
        ),
    };

    Ok(OptionValuation {
        price,
        delta,
        gamma: norm_pdf(d1) / (params.spot * params.vol * sqrt_t),
        vega: params.spot * norm_pdf(d1) * sqrt_t,
        rho,
        theta,
    })
}
