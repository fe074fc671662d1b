// src/contract.rs
//! Market and contract inputs shared by the analytic pricer and the simulator.

use crate::error::validation::{validate_finite, validate_positive};
use crate::error::PricingResult;

/// Market and contract parameters for a European option.
///
/// `risk_free` is the annualized continuously-compounded rate and may be
/// negative. `spot`, `strike`, `ttm` and `vol` must be strictly positive;
/// `validate` enforces this before any formula evaluates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractParameters {
    /// Current underlying price
    pub spot: f64,
    /// Option strike price
    pub strike: f64,
    /// Annualized continuously-compounded risk-free rate
    pub risk_free: f64,
    /// Years until expiry
    pub ttm: f64,
    /// Annualized volatility of the underlying's log-returns
    pub vol: f64,
}

impl ContractParameters {
    pub fn new(spot: f64, strike: f64, risk_free: f64, ttm: f64, vol: f64) -> Self {
        ContractParameters {
            spot,
            strike,
            risk_free,
            ttm,
            vol,
        }
    }

    /// Reject parameter sets the Black-Scholes formulas are undefined for
    pub fn validate(&self) -> PricingResult<()> {
        validate_positive("spot", self.spot)?;
        validate_positive("strike", self.strike)?;
        validate_finite("risk_free", self.risk_free)?;
        validate_positive("ttm", self.ttm)?;
        validate_positive("vol", self.vol)?;
        Ok(())
    }

    /// Discount factor over the life of the contract: e^(-r*T)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free * self.ttm).exp()
    }
}

/// Which closed-form payoff transform applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Call,
    Put,
}
