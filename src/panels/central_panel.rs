use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
        let rect = response.rect;

        // Keep the backing surface the same size as the laid-out canvas
        let width = rect.width().round().max(1.0) as u32;
        let height = rect.height().round().max(1.0) as u32;
        if let Err(err) = app.canvas_mut().resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }

        // Pointer positions are handed over in surface coordinates
        let to_surface = |pos: egui::Pos2| (pos - rect.min).to_pos2();
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                app.canvas_mut().pointer_down(to_surface(pos));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let _ = app.canvas_mut().pointer_move(to_surface(pos));
            }
        }
        if response.drag_stopped() {
            let _ = app.canvas_mut().pointer_up();
        }

        let texture = app.surface_texture(ctx);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture, rect, uv, egui::Color32::WHITE);
    });
}
