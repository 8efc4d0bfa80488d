use egui::{Event, PointerButton, Pos2, Rect, TouchId, TouchPhase};
use std::time::Instant;

use crate::services::gesture::{GridInput, PointerId};
use crate::services::layout::GridPoint;

const PRIMARY_POINTER: PointerId = 0;
const SECONDARY_POINTER: PointerId = 1;
/// Extra touches are numbered from here; the first touch arrives as the primary pointer
const TOUCH_POINTER_BASE: PointerId = 16;

/// Translates egui's per-frame events into grid input.
///
/// Mouse buttons and the first touch map onto fixed pointer ids. Additional
/// touches get their own ids so a second finger landing elsewhere reads as a tap
/// outside the dragged entity.
#[derive(Default)]
pub(crate) struct InputBridge {
    primary_held: bool,
    primary_touch: Option<TouchId>,
}

impl InputBridge {
    /// `origin` is the screen position of the grid content's top-left corner and
    /// `viewport` the visible part of the grid. Presses outside the viewport are
    /// ignored; moves and releases are always forwarded.
    pub fn collect(
        &mut self,
        ctx: &egui::Context,
        origin: Pos2,
        viewport: Rect,
        now: Instant,
    ) -> Vec<GridInput> {
        let to_grid = |pos: Pos2| GridPoint::new(pos.x - origin.x, pos.y - origin.y);
        let mut inputs = Vec::new();

        ctx.input(|i| {
            for event in &i.events {
                match event {
                    Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        ..
                    } => {
                        let pointer = match button {
                            PointerButton::Primary => PRIMARY_POINTER,
                            PointerButton::Secondary => SECONDARY_POINTER,
                            _ => continue,
                        };
                        if *pressed {
                            if !viewport.contains(*pos) {
                                continue;
                            }
                            if pointer == PRIMARY_POINTER {
                                self.primary_held = true;
                            }
                            inputs.push(GridInput::PointerDown {
                                pointer,
                                pos: to_grid(*pos),
                                at: now,
                            });
                        } else {
                            if pointer == PRIMARY_POINTER {
                                self.primary_held = false;
                            }
                            inputs.push(GridInput::PointerUp {
                                pointer,
                                pos: to_grid(*pos),
                                at: now,
                            });
                        }
                    }
                    Event::PointerMoved(pos) if self.primary_held => {
                        inputs.push(GridInput::PointerMove {
                            pointer: PRIMARY_POINTER,
                            pos: to_grid(*pos),
                            at: now,
                        });
                    }
                    Event::Touch { id, phase, pos, .. } => {
                        self.touch(*id, *phase, to_grid(*pos), viewport.contains(*pos), now, &mut inputs);
                    }
                    Event::Key {
                        key: egui::Key::Escape,
                        pressed: true,
                        ..
                    } => inputs.push(GridInput::CancelDrag { at: now }),
                    _ => {}
                }
            }
        });

        inputs
    }

    fn touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: GridPoint,
        inside: bool,
        now: Instant,
        inputs: &mut Vec<GridInput>,
    ) {
        // egui already emits pointer events for the first touch
        let is_primary = match (self.primary_touch, phase) {
            (None, TouchPhase::Start) => {
                self.primary_touch = Some(id);
                true
            }
            (Some(primary), _) => primary == id,
            (None, _) => false,
        };
        if is_primary {
            if matches!(phase, TouchPhase::End | TouchPhase::Cancel) {
                self.primary_touch = None;
            }
            return;
        }

        let pointer = TOUCH_POINTER_BASE.saturating_add(id.0);
        match phase {
            TouchPhase::Start if inside => inputs.push(GridInput::PointerDown { pointer, pos, at: now }),
            TouchPhase::Start => {}
            TouchPhase::Move => inputs.push(GridInput::PointerMove { pointer, pos, at: now }),
            TouchPhase::End | TouchPhase::Cancel => {
                inputs.push(GridInput::PointerUp { pointer, pos, at: now })
            }
        }
    }
}
