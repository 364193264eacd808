use egui;

use super::UiState;

/// Centred start card. The click is the user gesture that unlocks audio.
pub fn draw_start(ctx: &egui::Context, ui_state: &mut UiState) {
    egui::Window::new("starsnake")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new("STARSNAKE")
                        .heading()
                        .strong()
                        .color(egui::Color32::from_rgb(255, 200, 220)),
                );
                ui.label(
                    egui::RichText::new("an ambient drift through the stars")
                        .small()
                        .color(egui::Color32::from_rgb(170, 180, 200)),
                );
                ui.add_space(8.0);
                if ui.button("   Start   ").clicked() {
                    ui_state.start_requested = true;
                }
                ui.add_space(6.0);
            });
        });
}
