//! Run parameters for a headless scenario
//!
//! `Parameters` holds runtime settings:
//! - tick size and end time,
//! - how often the engine logs progress

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64, // step size
    pub report_every: usize, // ticks between progress reports, 0 = never
}

impl Parameters {
    /// Number of ticks needed to reach `t_end`
    pub fn steps(&self) -> usize {
        (self.t_end / self.h0).round() as usize
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            t_end: 1.0,
            h0: 1e-3,
            report_every: 0,
        }
    }
}
