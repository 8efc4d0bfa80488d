use egui::Color32;

use crate::models::entity::{AppointmentStatus, AvailabilityType, EntityDetails, ScheduleEntity};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[derive(Clone, Copy)]
pub(crate) struct GridPalette {
    pub hour_bg: Color32,
    pub regular_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub label_text: Color32,
    pub now_line: Color32,
    pub entity_text: Color32,
    pub phantom_fill: Color32,
    pub phantom_stroke: Color32,
    pub ghost_fill: Color32,
    pub ghost_stroke: Color32,
    pub drag_label_bg: Color32,
    pub drag_label_text: Color32,
}

impl GridPalette {
    pub fn from_ui(ui: &egui::Ui) -> Self {
        if ui.style().visuals.dark_mode {
            Self {
                hour_bg: Color32::from_gray(45),
                regular_bg: Color32::from_gray(40),
                hour_line: Color32::from_gray(60),
                slot_line: Color32::from_gray(50),
                label_text: Color32::GRAY,
                now_line: Color32::from_rgb(255, 100, 100),
                entity_text: Color32::WHITE,
                phantom_fill: Color32::from_rgba_unmultiplied(200, 200, 200, 25),
                phantom_stroke: Color32::from_gray(110),
                ghost_fill: Color32::from_rgba_unmultiplied(120, 200, 120, 35),
                ghost_stroke: Color32::from_rgb(120, 200, 120),
                drag_label_bg: Color32::from_gray(20),
                drag_label_text: Color32::WHITE,
            }
        } else {
            Self {
                hour_bg: Color32::from_rgb(235, 235, 235),
                regular_bg: Color32::from_rgb(245, 245, 245),
                hour_line: Color32::from_rgb(210, 210, 210),
                slot_line: Color32::from_rgb(230, 230, 230),
                label_text: Color32::GRAY,
                now_line: Color32::from_rgb(230, 60, 60),
                entity_text: Color32::WHITE,
                phantom_fill: Color32::from_rgba_unmultiplied(80, 80, 80, 20),
                phantom_stroke: Color32::from_gray(150),
                ghost_fill: Color32::from_rgba_unmultiplied(80, 170, 80, 35),
                ghost_stroke: Color32::from_rgb(80, 170, 80),
                drag_label_bg: Color32::from_gray(40),
                drag_label_text: Color32::WHITE,
            }
        }
    }

    /// Block colour for an entity, by kind and status.
    pub fn entity_fill(&self, entity: &ScheduleEntity) -> Color32 {
        match &entity.details {
            EntityDetails::Appointment(details) => match details.status {
                AppointmentStatus::Scheduled => Color32::from_rgb(100, 150, 200),
                AppointmentStatus::InProgress => Color32::from_rgb(230, 150, 60),
                AppointmentStatus::Completed => Color32::from_rgb(80, 160, 100),
                AppointmentStatus::NeedsNotes => Color32::from_rgb(200, 120, 180),
                AppointmentStatus::Cancelled => Color32::from_gray(140),
            },
            EntityDetails::Availability(details) => match details.availability_type {
                AvailabilityType::Available => with_alpha(Color32::from_rgb(110, 190, 130), 110),
                AvailabilityType::Unavailable => with_alpha(Color32::from_rgb(190, 110, 110), 110),
                AvailabilityType::Break => with_alpha(Color32::from_gray(150), 110),
            },
        }
    }
}
