use serde::{Deserialize, Serialize};

/// All tunable simulation parameters in one place.
///
/// `Default` holds the canonical values; a JSON file can override any subset
/// via `#[serde(default)]`, so partial config files are fine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // World
    pub screen_width: f32,
    pub screen_height: f32,
    pub edge_distance: f32,

    // Vehicle kinematics
    pub max_speed: f32,
    pub max_force: f32,

    // Life cycle
    pub metabolic_decay: f32,
    pub reproduction_probability: f32,
    pub mutation_rate: f32,

    // Targets
    pub food_nutrition: f32,
    pub poison_nutrition: f32,
    pub initial_food: usize,
    pub initial_poison: usize,
    pub food_cap: usize,
    pub poison_cap: usize,
    pub replenish_probability: f32,

    // Population
    pub initial_population: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 1000.0,
            screen_height: 600.0,
            edge_distance: 25.0,
            max_speed: 2.0,
            max_force: 0.05,
            metabolic_decay: 0.0025,
            reproduction_probability: 0.001,
            mutation_rate: 0.05,
            food_nutrition: 0.3,
            poison_nutrition: -0.75,
            initial_food: 40,
            initial_poison: 20,
            food_cap: 40,
            poison_cap: 20,
            replenish_probability: 0.5,
            initial_population: 50,
        }
    }
}

impl SimConfig {
    /// A target is eaten outright inside this radius, independent of perception.
    pub fn capture_radius(&self) -> f32 {
        2.0 * self.max_speed
    }

    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {path}: {e}"))?;
        serde_json::from_str(&text).map_err(|e| format!("failed to parse config {path}: {e}"))
    }
}
