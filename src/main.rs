use companion_shell::settings::Settings;
use companion_shell::shell::ShellApp;
use companion_shell::logging;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(Settings::default_path())?;
    logging::init(settings.debug_logging);

    let limits = settings.constraints();
    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([limits.min_width as f32, limits.min_height as f32])
            .with_max_inner_size([limits.max_width as f32, limits.max_height as f32]),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        "Companion",
        native_options,
        Box::new(move |cc| Box::new(ShellApp::new(cc.egui_ctx.clone(), settings))),
    ) {
        tracing::error!(%err, "shell exited with an error");
    }
    Ok(())
}
