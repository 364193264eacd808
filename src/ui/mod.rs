pub mod graphs;
pub mod start;
pub mod toolbar;

use crate::audio::AudioBridge;
use crate::simulation::WorldState;
use crate::stats::SessionGraphs;
use crate::visual::VisualSettings;

/// Tracks which UI panels are open and the start gesture.
pub struct UiState {
    pub started: bool,
    pub start_requested: bool,
    pub show_toolbar: bool,
    pub show_graphs: bool,
    pub frame_ms: f32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            started: false,
            start_requested: false,
            show_toolbar: true,
            show_graphs: false,
            frame_ms: 0.0,
        }
    }
}

/// Draw all egui UI panels.
pub fn draw_ui(
    state: &WorldState,
    audio: &mut AudioBridge,
    visual: &mut VisualSettings,
    ui_state: &mut UiState,
    graphs: &SessionGraphs,
) {
    egui_macroquad::ui(|ctx| {
        if !ui_state.started {
            start::draw_start(ctx, ui_state);
            return;
        }

        if ui_state.show_toolbar {
            toolbar::draw_toolbar(ctx, state, audio, visual, ui_state);
        }

        if ui_state.show_graphs {
            graphs::draw_graphs(ctx, graphs);
        }
    });

    egui_macroquad::draw();
}
