//! Derived rate statistics.
//!
//! Rates are rendered as fixed two-decimal strings, and every denominator is
//! guarded: no balls means the `"0.00"` sentinel.

pub const ZERO_RATE: &str = "0.00";

/// Batter's runs per hundred balls.
pub fn strike_rate(runs: u32, balls_faced: u32) -> String {
    if balls_faced == 0 {
        return ZERO_RATE.to_string();
    }
    format!("{:.2}", runs as f64 / balls_faced as f64 * 100.0)
}

/// Runs conceded per over bowled.
pub fn economy(runs_conceded: u32, balls_bowled: u32, balls_per_over: u32) -> String {
    if balls_bowled == 0 || balls_per_over == 0 {
        return ZERO_RATE.to_string();
    }
    format!("{:.2}", runs_conceded as f64 / (balls_bowled as f64 / balls_per_over as f64))
}

/// Team runs per over. Same formula as economy, seen from the batting side.
pub fn run_rate(total_runs: u32, balls_bowled: u32, balls_per_over: u32) -> String {
    economy(total_runs, balls_bowled, balls_per_over)
}

/// Ball count as cricket overs notation, e.g. 14 balls of 6 -> "2.2".
pub fn format_overs(balls: u32, balls_per_over: u32) -> String {
    if balls_per_over == 0 {
        return "0.0".to_string();
    }
    format!("{}.{}", balls / balls_per_over, balls % balls_per_over)
}
