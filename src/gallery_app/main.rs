/**
 * Sketchboard Gallery - Main Entry Point
 *
 * Native egui front end for the drawing gallery: tag filtering, image
 * selection, import/delete, saving, local cache and export.
 */
use eframe::egui;
use sketchboard::gallery_app::{views, Config, GalleryAppState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let state = GalleryAppState::new(Config::new())?;
    tracing::info!("[STARTUP] Gallery connecting to {}", state.config.server_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketchboard",
        options,
        Box::new(|_cc| Ok(Box::new(GalleryApp { state }))),
    )?;
    Ok(())
}

struct GalleryApp {
    state: GalleryAppState,
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        views::render_top_bar(ctx, &mut self.state);
        views::render_gallery_panel(ctx, &mut self.state);
        views::render_tools_panel(ctx, &mut self.state);
        views::render_board(ctx, &mut self.state);
        views::render_error_windows(ctx, &mut self.state);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
