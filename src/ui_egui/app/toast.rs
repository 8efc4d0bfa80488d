//! Short-lived feedback messages for host outcomes (entity opened, move saved
//! or rolled back, entity created).

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

const TOAST_LIFETIME: Duration = Duration::from_millis(2500);
const FADE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn colors(&self, dark: bool) -> (Color32, Color32) {
        match (self, dark) {
            (ToastLevel::Info, true) => (Color32::from_rgb(30, 50, 80), Color32::from_rgb(100, 180, 255)),
            (ToastLevel::Success, true) => (Color32::from_rgb(30, 70, 40), Color32::from_rgb(100, 220, 120)),
            (ToastLevel::Error, true) => (Color32::from_rgb(80, 30, 30), Color32::from_rgb(255, 120, 120)),
            (ToastLevel::Info, false) => (Color32::from_rgb(220, 235, 255), Color32::from_rgb(30, 80, 150)),
            (ToastLevel::Success, false) => (Color32::from_rgb(220, 255, 220), Color32::from_rgb(30, 120, 50)),
            (ToastLevel::Error, false) => (Color32::from_rgb(255, 220, 220), Color32::from_rgb(180, 40, 40)),
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    level: ToastLevel,
    shown_at: Instant,
}

impl Toast {
    fn opacity(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        let remaining = TOAST_LIFETIME.saturating_sub(elapsed);
        (remaining.as_secs_f32() / FADE.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            level,
            shown_at: now,
        });
    }

    pub fn has_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn render(&mut self, ctx: &Context, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_LIFETIME);
        if self.toasts.is_empty() {
            return;
        }

        let dark = ctx.style().visuals.dark_mode;
        let screen = ctx.screen_rect();
        let width = 280.0;

        for (i, toast) in self.toasts.iter().enumerate() {
            let alpha = toast.opacity(now);
            let (bg, fg) = toast.level.colors(dark);
            let pos = Pos2::new(
                screen.right() - width - 10.0,
                screen.bottom() - 50.0 - i as f32 * 45.0,
            );

            egui::Area::new(egui::Id::new(("grid_toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(bg.gamma_multiply(0.9 * alpha))
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.set_min_width(width - 24.0);
                            ui.label(RichText::new(&toast.message).color(fg.gamma_multiply(alpha)));
                        });
                });
        }
    }
}
