//! Paints the engine's scene, entity frames and overlays with an `egui::Painter`.
//!
//! All frames coming out of the engine are in content coordinates; `origin` is
//! the screen position of the content's top-left corner.

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

use super::palette::GridPalette;
use crate::models::entity::{EntityDetails, ScheduleEntity};
use crate::models::settings::TimeFormat;
use crate::services::grid_scene::GridScene;
use crate::services::layout::EntityFrame;
use crate::services::overlay::{DragLabel, GhostOverlay};
use crate::services::schedule_grid::RenderItem;
use crate::utils::date::format_wall_time;

const ACCENT_WIDTH: f32 = 4.0;

fn frame_rect(origin: Pos2, frame: &EntityFrame) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x + frame.x, origin.y + frame.offset),
        Vec2::new(frame.width, frame.height),
    )
}

pub(crate) fn paint_scene(
    painter: &egui::Painter,
    origin: Pos2,
    width: f32,
    time_label_width: f32,
    scene: &GridScene,
    palette: &GridPalette,
) {
    // Alternate hour bands, then lines on top
    for (index, label) in scene.labels.iter().enumerate() {
        let top = origin.y + label.offset;
        let next = scene
            .labels
            .get(index + 1)
            .map_or(scene.content_height, |l| l.offset);
        let band = Rect::from_min_max(
            Pos2::new(origin.x + time_label_width, top),
            Pos2::new(origin.x + width, origin.y + next),
        );
        let fill = if index % 2 == 0 {
            palette.hour_bg
        } else {
            palette.regular_bg
        };
        painter.rect_filled(band, 0.0, fill);

        painter.text(
            Pos2::new(origin.x + time_label_width - 6.0, top + 2.0),
            Align2::RIGHT_TOP,
            &label.text,
            FontId::proportional(12.0),
            palette.label_text,
        );
    }

    for line in &scene.lines {
        let (color, thickness) = if line.is_hour_start {
            (palette.hour_line, 1.0)
        } else {
            (palette.slot_line, 0.5)
        };
        let y = origin.y + line.offset;
        painter.line_segment(
            [
                Pos2::new(origin.x + time_label_width, y),
                Pos2::new(origin.x + width, y),
            ],
            Stroke::new(thickness, color),
        );
    }

    if let Some(offset) = scene.now_offset {
        let y = origin.y + offset;
        let x_start = origin.x + time_label_width;
        painter.circle_filled(Pos2::new(x_start - 4.0, y), 3.0, palette.now_line);
        painter.line_segment(
            [Pos2::new(x_start, y), Pos2::new(origin.x + width, y)],
            Stroke::new(2.0, palette.now_line),
        );
    }
}

fn entity_subtitle(entity: &ScheduleEntity, time_format: TimeFormat) -> String {
    let range = format!(
        "{} - {}",
        format_wall_time(entity.start.naive_local(), time_format),
        format_wall_time(entity.end().naive_local(), time_format)
    );
    match &entity.details {
        EntityDetails::Appointment(details) => match &details.staff {
            Some(staff) => format!("{}  {}", range, staff),
            None => range,
        },
        EntityDetails::Availability(_) => range,
    }
}

pub(crate) fn paint_entities(
    painter: &egui::Painter,
    origin: Pos2,
    items: &[RenderItem<'_>],
    palette: &GridPalette,
    time_format: TimeFormat,
) {
    // The dragged block floats above everything else
    let ordered = items
        .iter()
        .filter(|item| !item.is_dragging)
        .chain(items.iter().filter(|item| item.is_dragging));

    for item in ordered {
        let rect = frame_rect(origin, &item.frame);
        let fill = palette.entity_fill(item.entity);
        let fill = if item.is_dragging {
            fill.gamma_multiply(0.85)
        } else {
            fill
        };

        painter.rect_filled(rect, 2.0, fill);
        let accent = Rect::from_min_size(rect.min, Vec2::new(ACCENT_WIDTH, rect.height()));
        painter.rect_filled(accent, 2.0, fill.linear_multiply(0.7));
        if item.is_dragging {
            painter.rect_stroke(rect, 2.0, Stroke::new(1.5, palette.entity_text));
        }

        let text_painter = painter.with_clip_rect(rect.shrink(1.0));
        let text_x = rect.left() + ACCENT_WIDTH + 4.0;
        text_painter.text(
            Pos2::new(text_x, rect.top() + 2.0),
            Align2::LEFT_TOP,
            item.entity.display_label(),
            FontId::proportional(13.0),
            palette.entity_text,
        );
        if rect.height() >= 32.0 {
            text_painter.text(
                Pos2::new(text_x, rect.top() + 18.0),
                Align2::LEFT_TOP,
                entity_subtitle(item.entity, time_format),
                FontId::proportional(11.0),
                palette.entity_text.gamma_multiply(0.8),
            );
        }
    }
}

pub(crate) fn paint_phantom(painter: &egui::Painter, origin: Pos2, frame: &EntityFrame, palette: &GridPalette) {
    let rect = frame_rect(origin, frame);
    painter.rect_filled(rect, 2.0, palette.phantom_fill);
    painter.rect_stroke(rect, 2.0, Stroke::new(1.0, palette.phantom_stroke));
}

pub(crate) fn paint_ghost(painter: &egui::Painter, origin: Pos2, ghost: &GhostOverlay, palette: &GridPalette) {
    let rect = frame_rect(origin, &ghost.frame);
    painter.rect_filled(rect, 2.0, palette.ghost_fill);
    painter.rect_stroke(rect, 2.0, Stroke::new(1.5, palette.ghost_stroke));
    painter.with_clip_rect(rect).text(
        Pos2::new(rect.left() + 8.0, rect.center().y),
        Align2::LEFT_CENTER,
        &ghost.text,
        FontId::proportional(12.0),
        palette.ghost_stroke,
    );
}

pub(crate) fn paint_drag_label(painter: &egui::Painter, origin: Pos2, label: &DragLabel, palette: &GridPalette) {
    let galley = painter.layout_no_wrap(
        label.text.clone(),
        FontId::proportional(12.0),
        palette.drag_label_text,
    );
    let padding = Vec2::new(6.0, 3.0);
    let size = galley.size() + padding * 2.0;
    // Float just above the dragged block
    let min = Pos2::new(origin.x + label.x + 8.0, origin.y + label.offset - size.y - 4.0);
    let rect = Rect::from_min_size(min, size);

    painter.rect_filled(rect, 4.0, palette.drag_label_bg);
    painter.galley(rect.min + padding, galley, Color32::WHITE);
}
