mod backend;
mod toast;

use chrono::{Local, NaiveDate};
use egui::{CursorIcon, Sense, Vec2};
use std::rc::Rc;
use std::time::{Duration, Instant};

use self::backend::{DemoBackend, HostRequest, QueueHost, RequestQueue};
use self::toast::{ToastLevel, ToastManager};
use super::grid_painter;
use super::input::InputBridge;
use super::palette::GridPalette;
use crate::models::settings::GridSettings;
use crate::services::gesture::GridInput;
use crate::services::schedule_grid::ScheduleGrid;
use crate::utils::date::format_wall_time;

/// Requests sit "in flight" this long before the demo backend answers them
const SIMULATED_LATENCY: Duration = Duration::from_millis(400);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct ScheduleGridApp {
    grid: ScheduleGrid,
    backend: DemoBackend,
    requests: RequestQueue,
    in_flight: Vec<(Instant, HostRequest)>,
    input: InputBridge,
    toasts: ToastManager,
    availability_mode: bool,
}

impl eframe::App for ScheduleGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.render_toolbar(ctx);
        self.render_grid(ctx, now);

        self.grid.tick(now);
        self.process_requests(now);
        self.toasts.render(ctx, now);

        if self.grid.is_dragging() {
            ctx.set_cursor_icon(CursorIcon::Grabbing);
        }
        if self.grid.needs_tick() || !self.in_flight.is_empty() || self.toasts.has_toasts() {
            ctx.request_repaint_after(FRAME_INTERVAL);
        }
    }
}

impl ScheduleGridApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: GridSettings) -> anyhow::Result<Self> {
        let today = Local::now().date_naive();
        let requests = RequestQueue::default();
        let mut grid = ScheduleGrid::new(settings, today, Box::new(QueueHost::new(Rc::clone(&requests))))?;

        let ctx = cc.egui_ctx.clone();
        grid.subscribe(move |change| {
            log::trace!("Grid changed: {:?}", change);
            ctx.request_repaint();
        });

        let mut backend = DemoBackend::new();
        backend.ensure_day(today);
        grid.ingest_snapshot(backend.snapshot());

        Ok(Self {
            grid,
            backend,
            requests,
            in_flight: Vec::new(),
            input: InputBridge::default(),
            toasts: ToastManager::default(),
            availability_mode: false,
        })
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("schedule_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let day = self.grid.day();
                if ui.button("◀").on_hover_text("Previous day").clicked() {
                    self.select_day(day - chrono::Duration::days(1));
                }
                if ui.button("Today").clicked() {
                    self.select_day(Local::now().date_naive());
                }
                if ui.button("▶").on_hover_text("Next day").clicked() {
                    self.select_day(day + chrono::Duration::days(1));
                }
                ui.strong(self.grid.day().format("%A, %B %-d, %Y").to_string());

                ui.separator();
                if ui
                    .checkbox(&mut self.availability_mode, "Edit availability")
                    .changed()
                {
                    self.grid.set_editing_mode(self.availability_mode);
                }
                ui.checkbox(&mut self.backend.reject_moves, "Reject moves");

                ui.separator();
                ui.label(format!("Gesture: {}", self.grid.gesture_state().name()));
                if self.grid.has_pending_changes() {
                    ui.weak("(unsaved move)");
                }
            });
        });
    }

    fn select_day(&mut self, day: NaiveDate) {
        self.backend.ensure_day(day);
        self.grid.set_day(day);
        self.grid.ingest_snapshot(self.backend.snapshot());
    }

    fn render_grid(&mut self, ctx: &egui::Context, now: Instant) {
        let grid = &mut self.grid;

        let output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let palette = GridPalette::from_ui(ui);
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .enable_scrolling(grid.scroll_enabled())
                    .drag_to_scroll(false)
                    .show(ui, |ui| {
                        let width = ui.available_width();
                        grid.set_track_width(width);
                        let height = grid.layout().axis().content_height();
                        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::click_and_drag());

                        let painter = ui.painter();
                        let origin = rect.min;
                        let time_format = grid.settings().time_format;
                        let label_width = grid.layout().time_label_width();

                        grid_painter::paint_scene(painter, origin, width, label_width, &grid.scene(Local::now()), &palette);
                        if let Some(frame) = grid.phantom() {
                            grid_painter::paint_phantom(painter, origin, &frame, &palette);
                        }
                        grid_painter::paint_entities(painter, origin, &grid.render_items(), &palette, time_format);
                        if let Some(ghost) = grid.ghost() {
                            grid_painter::paint_ghost(painter, origin, &ghost, &palette);
                        }
                        if let Some(label) = grid.drag_label() {
                            grid_painter::paint_drag_label(painter, origin, &label, &palette);
                        }

                        (origin, ui.clip_rect())
                    })
            })
            .inner;

        let (origin, viewport) = output.inner;
        for input in self.input.collect(ctx, origin, viewport, now) {
            self.grid.handle(input);
        }
        self.grid.handle(GridInput::Scroll {
            offset: output.state.offset.y,
            at: now,
        });
    }

    /// Pick up new host callbacks and answer the ones whose latency has elapsed.
    fn process_requests(&mut self, now: Instant) {
        self.in_flight
            .extend(self.requests.borrow_mut().drain(..).map(|request| (now, request)));

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|(queued_at, _)| now.saturating_duration_since(*queued_at) >= SIMULATED_LATENCY);
        self.in_flight = pending;

        if due.is_empty() {
            return;
        }

        let time_format = self.grid.settings().time_format;
        for (_, request) in due {
            match request {
                HostRequest::Open(entity) => {
                    self.toasts
                        .push(ToastLevel::Info, format!("Opened {}", entity.display_label()), now);
                }
                HostRequest::Create { time, kind } => {
                    match self.backend.create(time, kind) {
                        Ok(entity) => self.toasts.push(
                            ToastLevel::Success,
                            format!(
                                "Created {} at {}",
                                kind.as_str(),
                                format_wall_time(entity.start.naive_local(), time_format)
                            ),
                            now,
                        ),
                        Err(err) => self
                            .toasts
                            .push(ToastLevel::Error, format!("Could not create: {}", err), now),
                    }
                    self.grid.finish_create();
                }
                HostRequest::Move { entity, new_start } => {
                    let when = format_wall_time(new_start.naive_local(), time_format);
                    if self.backend.move_entity(&entity.key(), new_start) {
                        self.toasts.push(
                            ToastLevel::Success,
                            format!("Moved {} to {}", entity.display_label(), when),
                            now,
                        );
                    } else {
                        self.toasts.push(
                            ToastLevel::Error,
                            format!("Could not move {}; reverted", entity.display_label()),
                            now,
                        );
                    }
                }
            }
        }

        // Authoritative reload, which also rolls back refused moves
        self.grid.ingest_snapshot(self.backend.snapshot());
    }
}
