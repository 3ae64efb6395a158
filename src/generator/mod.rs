pub mod mixed;
pub mod percentage;
pub mod powers;

use rand::Rng;

use crate::session::question::{DrillMode, Question};

/// Draw a fresh question for `mode`.
pub fn generate<R: Rng + ?Sized>(mode: DrillMode, rng: &mut R) -> Question {
    match mode {
        DrillMode::Square => powers::square(rng),
        DrillMode::Cube => powers::cube(rng),
        DrillMode::Percentage => percentage::percentage(rng),
        DrillMode::Mixed => mixed::mixed(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_generate_tags_single_modes() {
        let mut rng = SmallRng::seed_from_u64(7);
        for mode in DrillMode::SINGLE {
            for _ in 0..20 {
                assert_eq!(generate(mode, &mut rng).mode, mode);
            }
        }
    }

    #[test]
    fn test_generate_mixed_never_tags_mixed() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_ne!(generate(DrillMode::Mixed, &mut rng).mode, DrillMode::Mixed);
        }
    }
}
