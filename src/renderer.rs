use macroquad::prelude::*;

use crate::simulation::SimState;
use crate::vehicle::Vehicle;

const BG_COLOR: Color = Color::new(0.02, 0.03, 0.08, 1.0);
const FOOD_COLOR: Color = GREEN;
const POISON_COLOR: Color = RED;

const TARGET_RADIUS: f32 = 4.0;
const VEHICLE_LENGTH: f32 = 20.0;

/// Draw the whole scene. Read-only: all state mutation happened in the tick.
pub fn draw(sim: &SimState) {
    clear_background(BG_COLOR);

    for t in &sim.food {
        draw_circle(t.x, t.y, TARGET_RADIUS, FOOD_COLOR);
    }
    for t in &sim.poison {
        draw_circle(t.x, t.y, TARGET_RADIUS, POISON_COLOR);
    }

    for v in &sim.vehicles {
        draw_vehicle(v);
        if sim.show_debug {
            draw_debug_overlay(v);
        }
    }
}

/// Health clamped to [0,1] and mapped red (dying) to green (full).
fn health_color(health: f32) -> Color {
    let h = health.clamp(0.0, 1.0);
    Color::new(1.0 - h, h, 0.0, 1.0)
}

fn heading(v: &Vehicle) -> Vec2 {
    if v.vel.length_squared() > 0.0 {
        v.vel.normalize()
    } else {
        vec2(1.0, 0.0)
    }
}

/// Triangle pointing along the velocity, colored by health.
fn draw_vehicle(v: &Vehicle) {
    let dir = heading(v);
    let side = vec2(-dir.y, dir.x);

    let tip = v.pos + dir * VEHICLE_LENGTH;
    let left = v.pos - dir * (VEHICLE_LENGTH * 0.5) + side * (VEHICLE_LENGTH * 0.4);
    let right = v.pos - dir * (VEHICLE_LENGTH * 0.5) - side * (VEHICLE_LENGTH * 0.4);

    draw_triangle(tip, left, right, health_color(v.health));
}

/// Genome visualization: weight vectors along the heading and perception
/// rings, green for food and red for poison.
fn draw_debug_overlay(v: &Vehicle) {
    let dir = heading(v);

    let food_tip = v.pos + dir * (3.0 * VEHICLE_LENGTH * v.genome.food_weight);
    draw_line(v.pos.x, v.pos.y, food_tip.x, food_tip.y, 3.0, FOOD_COLOR);

    let poison_tip = v.pos + dir * (3.0 * VEHICLE_LENGTH * v.genome.poison_weight);
    draw_line(v.pos.x, v.pos.y, poison_tip.x, poison_tip.y, 2.0, POISON_COLOR);

    draw_circle_lines(v.pos.x, v.pos.y, v.genome.food_perception, 1.5, FOOD_COLOR);
    draw_circle_lines(v.pos.x, v.pos.y, v.genome.poison_perception, 1.5, POISON_COLOR);
}
