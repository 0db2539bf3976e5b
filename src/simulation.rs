use ::rand::{Rng, SeedableRng};
use macroquad::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::vehicle::Vehicle;

/// The whole simulation: population, target pools, and the seeded RNG that
/// drives every stochastic decision. One `tick()` is one full world step;
/// nothing outside this struct mutates simulation state.
pub struct SimState {
    pub cfg: SimConfig,
    pub vehicles: Vec<Vehicle>,
    pub food: Vec<Vec2>,
    pub poison: Vec<Vec2>,
    pub rng: ChaCha8Rng,
    pub tick_count: u64,
    pub paused: bool,
    pub speed_multiplier: f32,
    pub show_debug: bool,
    pub births_this_tick: u32,
    pub deaths_this_tick: u32,
}

impl SimState {
    pub fn new(cfg: SimConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let vehicles = (0..cfg.initial_population)
            .map(|_| Vehicle::random(&cfg, &mut rng))
            .collect();

        let food = (0..cfg.initial_food)
            .map(|_| random_target(&cfg, &mut rng))
            .collect();
        let poison = (0..cfg.initial_poison)
            .map(|_| random_target(&cfg, &mut rng))
            .collect();

        Self {
            cfg,
            vehicles,
            food,
            poison,
            rng,
            tick_count: 0,
            paused: true,
            speed_multiplier: 1.0,
            show_debug: false,
            births_this_tick: 0,
            deaths_this_tick: 0,
        }
    }

    /// Advance the world one step: replenish targets, then give every vehicle
    /// its reproduce/death/steer/move pass.
    ///
    /// Vehicles are visited in reverse index order with swap-remove so dead
    /// ones can be deleted mid-pass; offspring are appended past the captured
    /// length and first processed on the next tick.
    pub fn tick(&mut self) {
        self.births_this_tick = 0;
        self.deaths_this_tick = 0;

        self.replenish_targets();

        let n = self.vehicles.len();
        for i in (0..n).rev() {
            if let Some(child) = self.vehicles[i].reproduce(&self.cfg, &mut self.rng) {
                self.vehicles.push(child);
                self.births_this_tick += 1;
            }

            if self.vehicles[i].is_dead() {
                // Biomass conversion: the carcass seeds a new food target.
                let pos = self.vehicles[i].pos;
                self.food.push(pos);
                self.vehicles.swap_remove(i);
                self.deaths_this_tick += 1;
                continue;
            }

            self.vehicles[i].boundaries(&self.cfg);

            // Split borrows: the vehicle mutates itself and both pools.
            let (cfg, food, poison) = (&self.cfg, &mut self.food, &mut self.poison);
            self.vehicles[i].behaviors(food, poison, cfg);

            self.vehicles[i].update(&self.cfg);
        }

        self.tick_count += 1;
    }

    /// Stochastic refill of both pools up to their caps. Each missing slot
    /// gets an independent chance per tick, so scarcity recovers gradually.
    fn replenish_targets(&mut self) {
        let p = self.cfg.replenish_probability;

        while self.food.len() < self.cfg.food_cap && self.rng.gen::<f32>() < p {
            let t = random_target(&self.cfg, &mut self.rng);
            self.food.push(t);
        }
        while self.poison.len() < self.cfg.poison_cap && self.rng.gen::<f32>() < p {
            let t = random_target(&self.cfg, &mut self.rng);
            self.poison.push(t);
        }
    }

    pub fn avg_health(&self) -> f32 {
        if self.vehicles.is_empty() {
            return 0.0;
        }
        self.vehicles.iter().map(|v| v.health).sum::<f32>() / self.vehicles.len() as f32
    }
}

/// Random target position, kept clear of the boundary margin.
fn random_target(cfg: &SimConfig, rng: &mut impl Rng) -> Vec2 {
    vec2(
        rng.gen_range(cfg.edge_distance..=cfg.screen_width - cfg.edge_distance),
        rng.gen_range(cfg.edge_distance..=cfg.screen_height - cfg.edge_distance),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_cfg() -> SimConfig {
        // No targets, no replenish, no reproduction: isolates the life cycle.
        SimConfig {
            initial_population: 0,
            initial_food: 0,
            initial_poison: 0,
            food_cap: 0,
            poison_cap: 0,
            replenish_probability: 0.0,
            reproduction_probability: 0.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn new_seeds_population_and_target_pools() {
        let cfg = SimConfig::default();
        let sim = SimState::new(cfg.clone(), 42);

        assert_eq!(sim.vehicles.len(), cfg.initial_population);
        assert_eq!(sim.food.len(), cfg.initial_food);
        assert_eq!(sim.poison.len(), cfg.initial_poison);

        for t in sim.food.iter().chain(sim.poison.iter()) {
            assert!(t.x >= cfg.edge_distance && t.x <= cfg.screen_width - cfg.edge_distance);
            assert!(t.y >= cfg.edge_distance && t.y <= cfg.screen_height - cfg.edge_distance);
        }
    }

    #[test]
    fn dead_vehicle_is_removed_and_becomes_food() {
        let mut sim = SimState::new(quiet_cfg(), 7);

        let mut v = Vehicle::random(&sim.cfg, &mut sim.rng);
        v.pos = vec2(123.0, 456.0);
        v.health = 0.0;
        sim.vehicles.push(v);

        sim.tick();

        assert!(sim.vehicles.is_empty());
        assert_eq!(sim.deaths_this_tick, 1);
        assert_eq!(sim.food, vec![vec2(123.0, 456.0)]);
    }

    #[test]
    fn replenish_fills_to_cap_and_never_over() {
        let cfg = SimConfig {
            initial_population: 0,
            initial_food: 0,
            initial_poison: 0,
            replenish_probability: 1.0,
            ..SimConfig::default()
        };
        let mut sim = SimState::new(cfg, 9);

        sim.tick();

        assert_eq!(sim.food.len(), sim.cfg.food_cap);
        assert_eq!(sim.poison.len(), sim.cfg.poison_cap);

        sim.tick();
        assert_eq!(sim.food.len(), sim.cfg.food_cap);
    }

    #[test]
    fn certain_reproduction_doubles_population_in_one_tick() {
        let cfg = SimConfig {
            initial_population: 5,
            initial_food: 0,
            initial_poison: 0,
            food_cap: 0,
            poison_cap: 0,
            reproduction_probability: 1.0,
            ..SimConfig::default()
        };
        let mut sim = SimState::new(cfg, 13);

        sim.tick();

        // Offspring appended past the captured length are not revisited this
        // tick, so exactly one child per original vehicle.
        assert_eq!(sim.vehicles.len(), 10);
        assert_eq!(sim.births_this_tick, 5);
    }

    #[test]
    fn same_seed_same_config_is_bit_identical() {
        let cfg = SimConfig::default();
        let mut a = SimState::new(cfg.clone(), 42);
        let mut b = SimState::new(cfg, 42);

        for _ in 0..200 {
            a.tick();
            b.tick();
        }

        assert_eq!(a.vehicles.len(), b.vehicles.len());
        for (va, vb) in a.vehicles.iter().zip(b.vehicles.iter()) {
            assert_eq!(va.pos, vb.pos);
            assert_eq!(va.vel, vb.vel);
            assert_eq!(va.health, vb.health);
            assert_eq!(va.eaten, vb.eaten);
        }
        assert_eq!(a.food, b.food);
        assert_eq!(a.poison, b.poison);
    }

    #[test]
    fn starved_population_goes_extinct_and_feeds_the_world() {
        let cfg = SimConfig {
            initial_population: 3,
            ..quiet_cfg()
        };
        let mut sim = SimState::new(cfg, 99);

        // 1/0.0025 = 400 ticks to starve, plus one pass to sweep.
        for _ in 0..402 {
            sim.tick();
        }

        assert!(sim.vehicles.is_empty());
        assert_eq!(sim.food.len(), 3);
    }
}
