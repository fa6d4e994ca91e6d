//! Stock risk scoring
//!
//! The score expresses demand as a percentage of stock capacity, floored
//! to an integer and capped at 100. Callers classify it into bands:
//!
//! | score          | band     |
//! |----------------|----------|
//! | `> 75`         | High     |
//! | `51 ..= 75`    | Moderate |
//! | `<= 50`        | Stable   |
//!
//! Boundary values fall into the lower band.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_SCORE: u8 = 100;
pub const HIGH_THRESHOLD: u8 = 75;
pub const MODERATE_THRESHOLD: u8 = 50;

/// Demand pressure on stock in `0..=100`
pub fn risk_score(total_demand: f64, stock_capacity: f64) -> Result<u8> {
    if !(stock_capacity.is_finite() && stock_capacity > 0.0) {
        return Err(ForecastError::InvalidCapacity(stock_capacity));
    }

    let ratio = (100.0 * total_demand / stock_capacity).floor();
    if ratio.is_nan() || ratio <= 0.0 {
        return Ok(0);
    }

    Ok(ratio.min(MAX_SCORE as f64) as u8)
}

/// Risk classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Stable,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        if score > HIGH_THRESHOLD {
            RiskBand::High
        } else if score > MODERATE_THRESHOLD {
            RiskBand::Moderate
        } else {
            RiskBand::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Stable => "stable",
            RiskBand::Moderate => "moderate",
            RiskBand::High => "high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether stock covers the demand seen in the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Sufficient,
    /// Demand strictly exceeds stock; replenishment is due
    Insufficient,
}

/// Full stock check for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockAssessment {
    pub demand: f64,
    pub capacity: f64,
    pub score: u8,
    pub band: RiskBand,
    pub status: StockStatus,
}

/// Score, band and sufficiency of `stock_capacity` against `total_demand`
pub fn assess_stock(total_demand: f64, stock_capacity: f64) -> Result<StockAssessment> {
    let score = risk_score(total_demand, stock_capacity)?;
    let status = if total_demand > stock_capacity {
        StockStatus::Insufficient
    } else {
        StockStatus::Sufficient
    };

    Ok(StockAssessment {
        demand: total_demand,
        capacity: stock_capacity,
        score,
        band: RiskBand::from_score(score),
        status,
    })
}

impl fmt::Display for StockAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock Assessment:")?;
        writeln!(f, "  Current Stock: {:.2}", self.capacity)?;
        writeln!(f, "  Total Demand:  {:.2}", self.demand)?;
        writeln!(f, "  Risk Score:    {} ({})", self.score, self.band)?;
        match self.status {
            StockStatus::Sufficient => writeln!(f, "  Stock level is sufficient")?,
            StockStatus::Insufficient => {
                writeln!(f, "  Stock level is insufficient, replenishment recommended")?
            }
        }
        Ok(())
    }
}
