// Schedule grid demo host
// Runs the day-grid engine over an in-memory sample backend

use anyhow::anyhow;
use schedule_grid::services::settings::SettingsService;
use schedule_grid::ui_egui::ScheduleGridApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("Starting schedule grid demo");

    let settings = match SettingsService::from_project_dirs() {
        Ok(service) => service.load_or_default(),
        Err(err) => {
            log::warn!("{:#}; using default grid settings", err);
            Default::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 900.0])
            .with_min_inner_size([360.0, 400.0])
            .with_title("Schedule Grid"),
        ..Default::default()
    };

    eframe::run_native(
        "Schedule Grid",
        options,
        Box::new(move |cc| Ok(Box::new(ScheduleGridApp::new(cc, settings)?))),
    )
    .map_err(|err| anyhow!("Failed to run the schedule grid window: {}", err))
}
