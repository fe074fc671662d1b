// src/models/gbm.rs
use crate::contract::ContractParameters;

/// Geometric Brownian motion under the risk-neutral measure
pub struct Gbm {
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, r: f64, sigma: f64) -> Self {
        Gbm { s0, r, sigma }
    }

    pub fn from_contract(params: &ContractParameters) -> Self {
        Gbm::new(params.spot, params.risk_free, params.vol)
    }

    /// Exact lognormal transition over one step of size `dt`:
    /// S_{t+dt} = S_t * exp((r - σ²/2)dt + σ√dt * Z)
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.r - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }
}
