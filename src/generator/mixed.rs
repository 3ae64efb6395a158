use rand::Rng;

use crate::generator::{percentage, powers};
use crate::session::question::Question;

/// Pick one of the single drills uniformly and delegate to it.
pub fn mixed<R: Rng + ?Sized>(rng: &mut R) -> Question {
    match rng.gen_range(0..3) {
        0 => powers::square(rng),
        1 => powers::cube(rng),
        _ => percentage::percentage(rng),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::session::question::DrillMode;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_mixed_covers_all_sub_types() {
        let mut rng = SmallRng::seed_from_u64(3);
        let seen: HashSet<DrillMode> = (0..200).map(|_| mixed(&mut rng).mode).collect();
        assert_eq!(seen.len(), 3);
        assert!(!seen.contains(&DrillMode::Mixed));
    }
}
