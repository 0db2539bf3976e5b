use egui;

use crate::simulation::SimState;
use crate::stats::{RingBuffer, SimStats};

/// Tracks which panels are open and pending one-shot actions.
pub struct UiState {
    pub show_graphs: bool,
    pub step_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_graphs: false,
            step_requested: false,
        }
    }
}

/// Draw the toolbar and any open panels.
pub fn draw_ui(sim: &mut SimState, ui_state: &mut UiState, stats: &SimStats) {
    egui_macroquad::ui(|ctx| {
        draw_toolbar(ctx, sim, ui_state);
        if ui_state.show_graphs {
            draw_graphs(ctx, stats);
        }
    });

    egui_macroquad::draw();
}

fn draw_toolbar(ctx: &egui::Context, sim: &mut SimState, ui_state: &mut UiState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            let pause_label = if sim.paused { "Play" } else { "Pause" };
            if ui.button(pause_label).clicked() {
                sim.paused = !sim.paused;
            }
            if ui.button("Step").clicked() {
                ui_state.step_requested = true;
            }

            ui.separator();
            ui.label("Speed");
            for speed in [1.0, 2.0, 5.0, 10.0] {
                let selected = (sim.speed_multiplier - speed).abs() < f32::EPSILON;
                if ui.selectable_label(selected, format!("{speed:.0}x")).clicked() {
                    sim.speed_multiplier = speed;
                }
            }

            ui.separator();
            ui.toggle_value(&mut sim.show_debug, "Genome overlay");
            ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("Tick {}", sim.tick_count));
            ui.separator();
            ui.label(format!("Population {}", sim.vehicles.len()));
            ui.separator();
            ui.label(format!("Avg health {:.2}", sim.avg_health()));
            ui.separator();
            ui.label(format!("Food {}", sim.food.len()));
            ui.separator();
            ui.label(format!("Poison {}", sim.poison.len()));
        });
        ui.add_space(3.0);
    });
}

fn draw_graphs(ctx: &egui::Context, stats: &SimStats) {
    egui::Window::new("Statistics")
        .default_pos(egui::pos2(20.0, 80.0))
        .default_size(egui::vec2(360.0, 320.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.collapsing("Population", |ui| {
                draw_line_graph(ui, &stats.population, egui::Color32::from_rgb(100, 200, 100));
            });

            ui.collapsing("Average Health", |ui| {
                draw_line_graph(ui, &stats.avg_health, egui::Color32::from_rgb(200, 200, 100));
            });

            ui.collapsing("Targets", |ui| {
                let size = egui::vec2(ui.available_width(), 80.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                let rect = response.rect;

                draw_line_in_rect(&painter, &stats.food_count, rect, egui::Color32::from_rgb(100, 200, 100));
                draw_line_in_rect(&painter, &stats.poison_count, rect, egui::Color32::from_rgb(255, 100, 100));

                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(100, 200, 100), "Food");
                    ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "Poison");
                });
            });

            ui.collapsing("Births / Deaths", |ui| {
                let size = egui::vec2(ui.available_width(), 80.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                let rect = response.rect;

                draw_line_in_rect(&painter, &stats.births, rect, egui::Color32::from_rgb(100, 180, 255));
                draw_line_in_rect(&painter, &stats.deaths, rect, egui::Color32::from_rgb(255, 100, 100));

                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(100, 180, 255), "Births");
                    ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "Deaths");
                });
            });
        });
}

fn draw_line_graph(ui: &mut egui::Ui, buffer: &RingBuffer, color: egui::Color32) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    draw_line_in_rect(&painter, buffer, response.rect, color);
    if let Some(last) = buffer.last() {
        ui.label(format!("latest: {last:.2}"));
    }
}

fn draw_line_in_rect(
    painter: &egui::Painter,
    buffer: &RingBuffer,
    rect: egui::Rect,
    color: egui::Color32,
) {
    let n = buffer.len();
    if n < 2 {
        return;
    }

    let samples: Vec<f32> = buffer.iter().collect();
    let max = samples.iter().cloned().fold(f32::MIN, f32::max);
    let min = samples.iter().cloned().fold(f32::MAX, f32::min);
    let span = (max - min).max(1e-6);

    let points: Vec<egui::Pos2> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.left() + rect.width() * i as f32 / (n - 1) as f32;
            let y = rect.bottom() - rect.height() * (v - min) / span;
            egui::pos2(x, y)
        })
        .collect();

    painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, color)));
}
