use ::rand::Rng;
use macroquad::prelude::*;

use crate::config::SimConfig;
use crate::genome::Genome;
use crate::vecmath::{limit, set_magnitude};

/// A steering agent. Owns its kinematic state, health, and genome; the
/// simulation loop owns the population and the target pools.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub health: f32,
    pub eaten: u32,
    pub genome: Genome,
}

impl Vehicle {
    /// Spawn with a fresh random genome, anywhere on screen.
    pub fn random(cfg: &SimConfig, rng: &mut impl Rng) -> Self {
        let genome = Genome::random(rng);
        Self::from_genome(genome, cfg, rng)
    }

    /// Spawn with the given genome and randomized kinematics. Offspring do
    /// not inherit position or velocity, only genes.
    pub fn from_genome(genome: Genome, cfg: &SimConfig, rng: &mut impl Rng) -> Self {
        Self {
            pos: vec2(
                rng.gen_range(0.0..=cfg.screen_width),
                rng.gen_range(0.0..=cfg.screen_height),
            ),
            vel: vec2(
                cfg.max_speed * rng.gen::<f32>(),
                cfg.max_speed * rng.gen::<f32>(),
            ),
            acc: vec2(
                cfg.max_force * rng.gen::<f32>(),
                cfg.max_force * rng.gen::<f32>(),
            ),
            health: 1.0,
            eaten: 0,
            genome,
        }
    }

    /// Integrate one tick and pay the metabolic cost. Acceleration is a
    /// per-tick force accumulator and resets to zero here.
    pub fn update(&mut self, cfg: &SimConfig) {
        self.vel += self.acc;
        self.pos += self.vel;
        self.acc = Vec2::ZERO;
        self.health -= cfg.metabolic_decay;
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Steering force toward `target`: desired velocity at full speed in the
    /// target's direction, minus current velocity, clamped to `max_force`.
    pub fn seek(&self, target: Vec2, cfg: &SimConfig) -> Vec2 {
        let desired = set_magnitude(target - self.pos, cfg.max_speed);
        limit(desired - self.vel, cfg.max_force)
    }

    /// Scan `targets` once: anything inside the capture radius is eaten
    /// (removed, `eaten` incremented, health adjusted by `nutrition`); of the
    /// survivors, the closest one inside `perception` is sought.
    ///
    /// Traversal runs from the end of the list backward so targets can be
    /// swap-removed in place; the strict `<` keeps the first minimum found
    /// along that traversal on ties.
    pub fn consume_and_seek(
        &mut self,
        targets: &mut Vec<Vec2>,
        nutrition: f32,
        perception: f32,
        cfg: &SimConfig,
    ) -> Vec2 {
        let capture = cfg.capture_radius();
        let mut record = f32::INFINITY;
        let mut closest: Option<Vec2> = None;

        for i in (0..targets.len()).rev() {
            let d = self.pos.distance(targets[i]);
            if d < capture {
                targets.swap_remove(i);
                self.eaten += 1;
                self.health += nutrition;
            } else if d < record && d < perception {
                record = d;
                closest = Some(targets[i]);
            }
        }

        match closest {
            Some(target) => self.seek(target, cfg),
            None => Vec2::ZERO,
        }
    }

    /// One sense/decide step: eat and steer on both pools, weighting each
    /// steer by the corresponding gene. Negative weights turn attraction
    /// into avoidance.
    pub fn behaviors(&mut self, food: &mut Vec<Vec2>, poison: &mut Vec<Vec2>, cfg: &SimConfig) {
        let steer_food =
            self.consume_and_seek(food, cfg.food_nutrition, self.genome.food_perception, cfg);
        let steer_poison = self.consume_and_seek(
            poison,
            cfg.poison_nutrition,
            self.genome.poison_perception,
            cfg,
        );

        self.apply_force(steer_food * self.genome.food_weight);
        self.apply_force(steer_poison * self.genome.poison_weight);
    }

    /// Push back from screen edges. Edges are checked left, right, top,
    /// bottom with else-if precedence, so a corner only triggers the first
    /// matching edge.
    pub fn boundaries(&mut self, cfg: &SimConfig) {
        let d = cfg.edge_distance;

        let desired = if self.pos.x < d {
            Some(vec2(cfg.max_speed, self.vel.y))
        } else if self.pos.x > cfg.screen_width - d {
            Some(vec2(-cfg.max_speed, self.vel.y))
        } else if self.pos.y < d {
            Some(vec2(self.vel.x, cfg.max_speed))
        } else if self.pos.y > cfg.screen_height - d {
            Some(vec2(self.vel.x, -cfg.max_speed))
        } else {
            None
        };

        if let Some(desired) = desired {
            let desired = set_magnitude(desired, cfg.max_speed);
            let steer = limit(desired - self.vel, cfg.max_force);
            self.apply_force(steer);
        }
    }

    /// Probabilistic asexual reproduction: a child with a mutated copy of
    /// this genome and fresh random kinematics.
    pub fn reproduce(&self, cfg: &SimConfig, rng: &mut impl Rng) -> Option<Vehicle> {
        if rng.gen::<f32>() < cfg.reproduction_probability {
            let child_genome = self.genome.mutate(cfg.mutation_rate, rng);
            Some(Vehicle::from_genome(child_genome, cfg, rng))
        } else {
            None
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}
