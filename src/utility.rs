// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Crate-private numeric helpers and the degenerate-operation warning printer.

use colored::Colorize;

/// Round a value to the given number of decimal places.
///
/// Derived lattice quantities are rounded to a fixed precision before
/// they are compared or combined, so that floating-point noise does not
/// leak into structural equality checks.
#[inline]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Compensated (Kahan) summation.
///
/// Plain running sums lose digits to cancellation for large atom
/// counts; aggregate masses and charges are accumulated with this
/// instead.
pub(crate) fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;

    for value in values {
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }

    sum
}

/// Print a warning about a degenerate geometric operation to stderr.
///
/// Degenerate operations do not abort the caller: they warn and leave
/// the operand unchanged so that batch transforms can continue past a
/// single malformed element.
pub(crate) fn warn_degenerate(location: &str, message: &str) {
    eprintln!(
        "{} | {} | {}",
        "NANOXTAL WARNING".yellow().bold(),
        location,
        message
    );
}

/******************************/
/*         UNIT TESTS         */
/******************************/
