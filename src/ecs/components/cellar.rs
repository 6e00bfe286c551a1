use bevy_ecs::component::Component;
use rand::Rng;

/// Credit subtracted from the horizon grows with the square of this share of
/// the siege intensity.
const SIEGE_PENALTY_FACTOR: f64 = 0.25;

/// Banked claim life, in world days, from the food next to a resource point.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Cellar {
    pub expectancy: f32,
}

/// World day until which a claim is funded.
pub fn claim_horizon(now_days: f64, stored: f32, satellites: f32, siege_intensity: f32) -> f64 {
    let penalty = f64::from(siege_intensity) * SIEGE_PENALTY_FACTOR;
    now_days + f64::from(stored) + f64::from(satellites) - penalty * penalty
}

/// Round `value` down or up with probability equal to its fractional part.
pub fn round_random(rng: &mut impl Rng, value: f64) -> u32 {
    if value <= 0.0 {
        return 0;
    }
    let floor = value.floor();
    let up = rng.random::<f64>() < value - floor;
    // Saturating float-to-int cast.
    (floor as u32).saturating_add(u32::from(up))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn horizon_sums_credit() {
        assert_eq!(claim_horizon(10.0, 2.0, 1.5, 0.0), 13.5);
    }

    #[test]
    fn siege_penalty_is_quadratic() {
        let base = claim_horizon(10.0, 5.0, 0.0, 0.0);
        assert!((base - claim_horizon(10.0, 5.0, 0.0, 4.0) - 1.0).abs() < 1e-9);
        assert!((base - claim_horizon(10.0, 5.0, 0.0, 8.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn round_random_preserves_expectation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let total: u32 = (0..10_000).map(|_| round_random(&mut rng, 0.3)).sum();
        assert!((2_700..3_300).contains(&total), "total {total}");
        assert_eq!(round_random(&mut rng, 4.0), 4);
        assert_eq!(round_random(&mut rng, -1.0), 0);
    }
}
