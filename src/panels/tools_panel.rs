use crate::PaintApp;
use crate::components::ColorButton;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");

            // Collect palette first to avoid borrowing issues
            let palette = app.canvas().palette().to_vec();
            let selected = app.selected_color();
            ui.horizontal_wrapped(|ui| {
                for (index, color) in palette.into_iter().enumerate() {
                    if ColorButton::new(color, index == selected).show(ui).clicked() {
                        app.select_color(index);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Size: {:.0}", app.canvas().brush().width()));
                if ui.button("Brush size...").clicked() {
                    app.open_brush_dialog();
                }
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.can_undo();
                let can_redo = app.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
            ui.label(format!(
                "Strokes: {} (redo: {})",
                app.canvas().snapshot_visible().len(),
                app.canvas().redo_len()
            ));
            ui.separator();

            ui.heading("Background");
            ui.text_edit_singleline(app.background_path_mut());
            ui.horizontal(|ui| {
                if ui.button("Open").clicked() {
                    app.load_background();
                }
                let has_background = app.canvas().background().is_some();
                if ui.add_enabled(has_background, egui::Button::new("Clear")).clicked() {
                    app.clear_background();
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                let exporting = app.is_exporting();
                if ui.add_enabled(!exporting, egui::Button::new("Save")).clicked() {
                    app.save();
                }
                if exporting {
                    ui.spinner();
                }
            });
            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}

pub fn brush_size_dialog(app: &mut PaintApp, ctx: &egui::Context) {
    if !app.is_brush_dialog_open() {
        return;
    }
    let sizes = app.canvas().brush_sizes();
    let mut open = true;
    egui::Window::new("Brush size:")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for size in crate::brush::BrushSize::ALL {
                    let label = format!("{} ({:.0})", size.label(), sizes.width(size));
                    if ui.button(label).clicked() {
                        app.select_brush_size(size);
                    }
                }
            });
        });
    if !open {
        app.close_brush_dialog();
    }
}
