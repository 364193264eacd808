use egui;

use super::UiState;
use crate::audio::{AudioBridge, AudioStatus};
use crate::simulation::WorldState;
use crate::visual::{VisualQuality, VisualSettings};

/// Slim status strip: volume, view toggles and live counters.
pub fn draw_toolbar(
    ctx: &egui::Context,
    state: &WorldState,
    audio: &mut AudioBridge,
    visual: &mut VisualSettings,
    ui_state: &mut UiState,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "STARSNAKE");

            ui.separator();
            compact_group(ui, "Volume", |ui| {
                ui.add_enabled(
                    audio.status == AudioStatus::Ready,
                    egui::Slider::new(&mut audio.volume, 0.0..=1.0).show_value(false),
                );
            });

            compact_group(ui, "Quality", |ui| {
                for quality in VisualQuality::ALL {
                    let selected = visual.quality == quality;
                    if ui.selectable_label(selected, quality.label()).clicked() {
                        visual.quality = quality;
                    }
                }
            });

            compact_group(ui, "View", |ui| {
                ui.toggle_value(&mut visual.show_debug, "Debug");
                ui.toggle_value(&mut visual.glow_enabled, "Glow");
                ui.toggle_value(&mut visual.galaxy_twinkle, "Twinkle");
                ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
            });
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            metric_chip(ui, "Stars", format!("{}", state.stars.len()));
            metric_chip(ui, "Length", format!("{}", state.snake.len()));
            metric_chip(ui, "Eaten", format!("{}", state.stats.stars_consumed));
            metric_chip(ui, "Chimes", format!("{}", audio.dispatched));
            metric_chip(ui, "Audio", audio.status.label().to_string());
            metric_chip(ui, "Frame", format!("{:.1}ms", ui_state.frame_ms));
        });
        ui.add_space(3.0);
    });
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(255, 200, 220));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.group(|ui| {
        ui.label(text);
    });
}
