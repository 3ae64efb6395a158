use rand::Rng;
use rand::seq::SliceRandom;

use crate::session::question::{DrillMode, Question};

/// Percentages common in competitive-exam mental arithmetic.
pub const COMMON_PERCENTS: [f64; 12] = [
    5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 75.0, 12.5, 33.33, 66.66,
];

/// Approximations of 1/8, 1/3 and 2/3. Their bases are chosen so the fraction divides cleanly.
pub const FRACTIONAL_PERCENTS: [f64; 3] = [12.5, 33.33, 66.66];

pub fn is_fractional(percent: f64) -> bool {
    FRACTIONAL_PERCENTS.contains(&percent)
}

pub fn percentage<R: Rng + ?Sized>(rng: &mut R) -> Question {
    let percent = COMMON_PERCENTS.choose(rng).copied().unwrap_or(10.0);
    let base = draw_base(percent, rng);
    percentage_of(percent, base)
}

/// Base value for `percent`: multiples of 8 in [8, 500) for 12.5, multiples of 3
/// in [3, 500) for 33.33 and 66.66, multiples of 10 in [100, 1000) otherwise.
pub fn draw_base<R: Rng + ?Sized>(percent: f64, rng: &mut R) -> u32 {
    if percent == 12.5 {
        8 * rng.gen_range(1..=62)
    } else if is_fractional(percent) {
        3 * rng.gen_range(1..=166)
    } else {
        10 * rng.gen_range(10..=99)
    }
}

pub fn percentage_of(percent: f64, base: u32) -> Question {
    let fractional = is_fractional(percent);
    let mut answer = percent / 100.0 * f64::from(base);
    if fractional {
        answer = round_to_cents(answer);
    }
    let percent_text = if fractional {
        format!("{percent:.2}%")
    } else {
        format!("{percent}%")
    };
    Question::new(
        format!("Calculate {percent_text} of {base}."),
        answer,
        DrillMode::Percentage,
    )
}

/// Round to two decimals from the exact binary value. Scaling by 100 first can
/// push a value just under a half-cent over it (49.994999.. becomes 4999.5).
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
