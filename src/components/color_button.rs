use eframe::egui;

/// Palette swatch; the selected one gets a highlighted border
pub struct ColorButton {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorButton {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(28.0, 28.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let inset = if response.hovered() { 2.0 } else { 4.0 };
            ui.painter().rect_filled(rect.shrink(inset), 4.0, self.color);
            ui.painter().rect_stroke(
                rect.shrink(inset),
                4.0,
                egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
            );

            // Draw border when selected
            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response
    }
}
