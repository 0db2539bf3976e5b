use ::rand::Rng;

/// The 4-gene behavioral encoding every vehicle carries.
///
/// Weights scale the steering response to each target kind and may be
/// negative (attraction flips to avoidance). Perception genes are radii in
/// world units, integer-valued at construction and under mutation.
///
/// Mutation applies no clamping: genes drift outside their construction
/// ranges over generations, and selection alone decides what survives.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    pub food_weight: f32,
    pub poison_weight: f32,
    pub food_perception: f32,
    pub poison_perception: f32,
}

impl Genome {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            food_weight: rng.gen_range(-2.0..2.0),
            poison_weight: rng.gen_range(-2.0..2.0),
            food_perception: rng.gen_range(10..=150) as f32,
            poison_perception: rng.gen_range(10..=150) as f32,
        }
    }

    /// Copy this genome, independently perturbing each gene with probability
    /// `rate`. Weights move by a uniform amount in [-0.1, 0.1]; perception
    /// radii by a uniform integer in [-10, 10].
    pub fn mutate(&self, rate: f32, rng: &mut impl Rng) -> Self {
        let mut child = self.clone();

        if rng.gen::<f32>() < rate {
            child.food_weight += rng.gen_range(-0.1..0.1);
        }
        if rng.gen::<f32>() < rate {
            child.poison_weight += rng.gen_range(-0.1..0.1);
        }
        if rng.gen::<f32>() < rate {
            child.food_perception += rng.gen_range(-10..=10) as f32;
        }
        if rng.gen::<f32>() < rate {
            child.poison_perception += rng.gen_range(-10..=10) as f32;
        }

        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_genome_stays_in_construction_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            let g = Genome::random(&mut rng);
            assert!(g.food_weight >= -2.0 && g.food_weight < 2.0);
            assert!(g.poison_weight >= -2.0 && g.poison_weight < 2.0);
            assert!(g.food_perception >= 10.0 && g.food_perception <= 150.0);
            assert!(g.poison_perception >= 10.0 && g.poison_perception <= 150.0);
            assert_eq!(g.food_perception, g.food_perception.round());
            assert_eq!(g.poison_perception, g.poison_perception.round());
        }
    }

    #[test]
    fn mutate_with_zero_rate_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let parent = Genome::random(&mut rng);
        for _ in 0..50 {
            assert_eq!(parent.mutate(0.0, &mut rng), parent);
        }
    }

    #[test]
    fn mutate_with_full_rate_perturbs_within_step_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let parent = Genome::random(&mut rng);
        for _ in 0..200 {
            let child = parent.mutate(1.0, &mut rng);
            assert!((child.food_weight - parent.food_weight).abs() <= 0.1);
            assert!((child.poison_weight - parent.poison_weight).abs() <= 0.1);

            let dfp = child.food_perception - parent.food_perception;
            let dpp = child.poison_perception - parent.poison_perception;
            assert!(dfp.abs() <= 10.0 && dfp == dfp.round());
            assert!(dpp.abs() <= 10.0 && dpp == dpp.round());
        }
    }

    #[test]
    fn mutation_drifts_past_construction_bounds_without_clamping() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let parent = Genome {
            food_weight: 2.0,
            poison_weight: -2.0,
            food_perception: 150.0,
            poison_perception: 10.0,
        };

        let mut above = false;
        let mut below = false;
        for _ in 0..200 {
            let child = parent.mutate(1.0, &mut rng);
            above |= child.food_weight > 2.0 || child.food_perception > 150.0;
            below |= child.poison_weight < -2.0 || child.poison_perception < 10.0;
        }
        assert!(above && below);
    }
}
