use egui;

use crate::stats::{RingBuffer, SessionGraphs};

/// Star pool, snake length and chime rate over time.
pub fn draw_graphs(ctx: &egui::Context, graphs: &SessionGraphs) {
    egui::Window::new("Session")
        .default_pos(egui::pos2(12.0, 80.0))
        .default_size(egui::vec2(320.0, 260.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.collapsing("Active Stars", |ui| {
                draw_line_graph(ui, &graphs.star_count, egui::Color32::from_rgb(255, 120, 120));
            });

            ui.collapsing("Snake Length", |ui| {
                draw_line_graph(ui, &graphs.snake_length, egui::Color32::from_rgb(120, 220, 255));
            });

            ui.collapsing("Chimes", |ui| {
                draw_line_graph(ui, &graphs.chimes, egui::Color32::from_rgb(230, 210, 120));
            });
        });
}

fn draw_line_graph(ui: &mut egui::Ui, buffer: &RingBuffer, color: egui::Color32) {
    let size = egui::vec2(ui.available_width(), 70.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

    draw_line_in_rect(&painter, buffer, rect, color);

    if let Some(val) = buffer.last() {
        painter.text(
            egui::pos2(rect.right() - 4.0, rect.top() + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{val:.0}"),
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(200),
        );
    }
}

fn draw_line_in_rect(
    painter: &egui::Painter,
    buffer: &RingBuffer,
    rect: egui::Rect,
    color: egui::Color32,
) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    let samples: Vec<f32> = buffer.iter().collect();
    let max_val = samples.iter().cloned().fold(1.0f32, f32::max);
    let min_val = samples.iter().cloned().fold(max_val, f32::min);
    let range = (max_val - min_val).max(1.0);

    let points: Vec<egui::Pos2> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - ((v - min_val) / range) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(1.5, color));
    }
}
