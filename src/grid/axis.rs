//! Parameter axis parsing.
//!
//! An axis is given on the command line either as an explicit list or as an
//! inclusive range:
//!
//! - `3,4,5`      -> `[3.0, 4.0, 5.0]`
//! - `0.4:0.7:0.1` -> `[0.4, 0.5, 0.6, 0.7]`
//!
//! Range values are rounded to 12 decimals. Without that, `0.4 + 2 * 0.1`
//! would come out as `0.6000000000000001` and point at a directory that does
//! not exist.

use std::str::FromStr;

/// Upper bound on generated range points (guards against `0:1e9:1`).
const MAX_RANGE_POINTS: usize = 100_000;

/// One parsed axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis(pub Vec<f64>);

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_axis(s).map(Axis)
    }
}

pub fn parse_axis(s: &str) -> Result<Vec<f64>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("axis is empty".to_string());
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let [start, stop, step] = parts.as_slice() else {
            return Err(format!("range '{s}' must look like start:stop:step"));
        };
        return linear_range(
            parse_value(start)?,
            parse_value(stop)?,
            parse_value(step)?,
        );
    }

    s.split(',').map(parse_value).collect()
}

/// Inclusive `start..=stop` in steps of `step`.
pub fn linear_range(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, String> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(format!("range {start}:{stop}:{step} must be finite"));
    }
    if step <= 0.0 {
        return Err(format!("range step must be > 0 (got {step})"));
    }
    if stop < start {
        return Err(format!("range stop {stop} is below start {start}"));
    }

    // Small slack so `0.4:0.7:0.1` includes 0.7 despite 0.29999.../0.1.
    let steps = ((stop - start) / step + 1e-9).floor() as usize;
    if steps >= MAX_RANGE_POINTS {
        return Err(format!("range {start}:{stop}:{step} has too many points"));
    }

    Ok((0..=steps)
        .map(|i| round_decimals(start + step * i as f64))
        .collect())
}

fn round_decimals(v: f64) -> f64 {
    (v * 1e12).round() / 1e12
}

fn parse_value(token: &str) -> Result<f64, String> {
    let token = token.trim();
    let value: f64 = token
        .parse()
        .map_err(|_| format!("invalid number '{token}'"))?;
    if !value.is_finite() {
        return Err(format!("non-finite value '{token}'"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_A2, DEFAULT_AT, DEFAULT_CSS, DEFAULT_CT};

    #[test]
    fn list_axis() {
        assert_eq!(parse_axis("1, 2.5,3").unwrap(), vec![1.0, 2.5, 3.0]);
        assert_eq!(parse_axis("7").unwrap(), vec![7.0]);
    }

    #[test]
    fn range_axis_matches_default_grids() {
        assert_eq!(parse_axis("3:15:1").unwrap(), DEFAULT_CT.to_vec());
        assert_eq!(parse_axis("1:11:1").unwrap(), DEFAULT_AT.to_vec());
        assert_eq!(parse_axis("0.5:3:0.5").unwrap(), DEFAULT_CSS.to_vec());
        assert_eq!(parse_axis("0.4:0.7:0.1").unwrap(), DEFAULT_A2.to_vec());
    }

    #[test]
    fn bad_axes_are_rejected() {
        assert!(parse_axis("").is_err());
        assert!(parse_axis("1,,2").is_err());
        assert!(parse_axis("1:2").is_err());
        assert!(parse_axis("2:1:0.5").is_err());
        assert!(parse_axis("0:1:0").is_err());
        assert!(parse_axis("0:1e9:1").is_err());
        assert!(parse_axis("1,inf").is_err());
    }

    #[test]
    fn axis_from_str() {
        let axis: Axis = "0.5:1.5:0.5".parse().unwrap();
        assert_eq!(axis, Axis(vec![0.5, 1.0, 1.5]));
    }
}
