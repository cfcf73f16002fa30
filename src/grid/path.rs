//! Directory layout of the simulation tree.
//!
//! Each combination's output lives in
//! `Ct_=_{ct}/At_=_{at}/Css_=_{css}/a2_=_{a2}/`, relative to the root. The job
//! runner that produced the tree formatted values the "shortest round-trip"
//! way with at least one fractional digit (`3.0`, `0.5`), so we do the same.

use crate::domain::ParamCombo;

/// Format a parameter value the way directory names spell it.
///
/// Plain decimals come out as `3.0` or `0.25`. Values below `1e-4` or from
/// `1e16` up switch to exponent form with a signed, two-digit exponent
/// (`1e-05`, `2.5e+16`).
pub fn format_param(value: f64) -> String {
    // `Debug` keeps the trailing `.0` that `Display` drops and switches to
    // exponent form at the same magnitudes.
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

pub fn ct_segment(ct: f64) -> String {
    format!("Ct_=_{}", format_param(ct))
}

pub fn at_segment(at: f64) -> String {
    format!("At_=_{}", format_param(at))
}

pub fn css_segment(css: f64) -> String {
    format!("Css_=_{}", format_param(css))
}

pub fn a2_segment(a2: f64) -> String {
    format!("a2_=_{}", format_param(a2))
}

/// Relative directory of a combination, `/`-separated.
pub fn candidate_path(combo: &ParamCombo) -> String {
    format!(
        "{}/{}/{}/{}",
        ct_segment(combo.ct),
        at_segment(combo.at),
        css_segment(combo.css),
        a2_segment(combo.a2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_uses_fixed_segment_order() {
        let combo = ParamCombo {
            ct: 3.0,
            at: 11.0,
            css: 0.5,
            a2: 0.4,
        };
        assert_eq!(candidate_path(&combo), "Ct_=_3.0/At_=_11.0/Css_=_0.5/a2_=_0.4");
    }

    #[test]
    fn integral_values_keep_one_decimal() {
        assert_eq!(format_param(1.0), "1.0");
        assert_eq!(format_param(15.0), "15.0");
        assert_eq!(format_param(2.5), "2.5");
        assert_eq!(format_param(0.7), "0.7");
    }

    #[test]
    fn exponent_form_uses_signed_two_digit_exponent() {
        assert_eq!(format_param(1e-5), "1e-05");
        assert_eq!(format_param(2.5e-7), "2.5e-07");
        assert_eq!(format_param(1e16), "1e+16");
        assert_eq!(format_param(1e-100), "1e-100");
        assert_eq!(format_param(0.0001), "0.0001");
        assert_eq!(css_segment(1e-5), "Css_=_1e-05");
    }
}
