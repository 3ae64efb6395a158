use std::ops::RangeInclusive;

use rand::Rng;

use crate::session::question::{DrillMode, Question};

pub const SQUARE_RANGE: RangeInclusive<u32> = 1..=50;
pub const CUBE_RANGE: RangeInclusive<u32> = 1..=20;

pub fn square<R: Rng + ?Sized>(rng: &mut R) -> Question {
    square_of(rng.gen_range(SQUARE_RANGE))
}

pub fn cube<R: Rng + ?Sized>(rng: &mut R) -> Question {
    cube_of(rng.gen_range(CUBE_RANGE))
}

pub fn square_of(n: u32) -> Question {
    let answer = u64::from(n).pow(2);
    Question::new(
        format!("What is the square of {n}?"),
        answer as f64,
        DrillMode::Square,
    )
}

pub fn cube_of(n: u32) -> Question {
    let answer = u64::from(n).pow(3);
    Question::new(
        format!("What is the cube of {n}?"),
        answer as f64,
        DrillMode::Cube,
    )
}
