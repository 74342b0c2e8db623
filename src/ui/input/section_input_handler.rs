//! Section input handling: keyboard, wheel, and touch to navigation commands.
//!
//! egui events are first translated into the library's `InputEvent`s, then
//! classified by the `InputArbiter`. `Home`/`End` bypass the arbiter and
//! become direct jumps.

use eframe::egui;
use folio::{InputArbiter, InputEvent, InputIntent, NavKey, ScrollMetrics};

use crate::app::AppState;
use crate::state::TouchState;

/// Pixels per wheel "line" on platforms that report line deltas.
const WHEEL_LINE_PX: f32 = 40.0;
/// Pixels per wheel "page".
const WHEEL_PAGE_PX: f32 = 800.0;

/// What the frame loop should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionCommand {
    Intent(InputIntent),
    First,
    Furthest,
}

/// An egui event reduced to something navigation cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Translated {
    Input(InputEvent),
    First,
    Furthest,
}

/// Reads this frame's input and returns the navigation commands it implies.
///
/// Keys are skipped while a text field has focus. Wheel input only counts
/// when the pointer is over the section, so scrolling the chat window never
/// turns pages.
pub fn collect_commands(ctx: &egui::Context, state: &mut AppState) -> Vec<SectionCommand> {
    let keyboard_free = !ctx.wants_keyboard_input();
    let hover_pos = ctx.input(|i| i.pointer.hover_pos());
    let wheel_over_section = state.layout.is_over_section(hover_pos);
    let region = state.scroll.get(state.navigation.active_index());

    let touch = &mut state.touch;
    let translated = ctx.input(|i| translate_events(&i.events, keyboard_free, wheel_over_section, region, touch));
    classify(&mut state.arbiter, &translated)
}

fn translate_events(
    events: &[egui::Event],
    keyboard_free: bool,
    wheel_over_section: bool,
    region: Option<ScrollMetrics>,
    touch: &mut TouchState,
) -> Vec<Translated> {
    let mut out = Vec::new();

    for event in events {
        match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } if keyboard_free => match key {
                egui::Key::Home => out.push(Translated::First),
                egui::Key::End => out.push(Translated::Furthest),
                other => {
                    let nav_key = NavKey::from(*other);
                    if nav_key != NavKey::Other {
                        out.push(Translated::Input(InputEvent::Key(nav_key)));
                    }
                }
            },
            egui::Event::MouseWheel { unit, delta, .. } if wheel_over_section => {
                let delta_y = wheel_delta_px(*unit, *delta);
                if delta_y != 0.0 {
                    out.push(Translated::Input(InputEvent::Wheel { delta_y, region }));
                }
            }
            egui::Event::Touch {
                device_id,
                id,
                phase,
                pos,
                ..
            } => {
                // Only the finger that started the swipe moves it
                let input = match phase {
                    egui::TouchPhase::Start => touch
                        .begin(*device_id, *id)
                        .then_some(InputEvent::TouchStart { y: pos.y }),
                    egui::TouchPhase::Move => touch
                        .owns(*device_id, *id)
                        .then_some(InputEvent::TouchMove { y: pos.y }),
                    egui::TouchPhase::End => touch.end(*device_id, *id).then_some(InputEvent::TouchEnd),
                    egui::TouchPhase::Cancel => touch.end(*device_id, *id).then_some(InputEvent::TouchCancel),
                };
                if let Some(input) = input {
                    out.push(Translated::Input(input));
                }
            }
            _ => {}
        }
    }

    out
}

/// Wheel movement in pixels, positive towards the end of the section.
fn wheel_delta_px(unit: egui::MouseWheelUnit, delta: egui::Vec2) -> f32 {
    let scale = match unit {
        egui::MouseWheelUnit::Point => 1.0,
        egui::MouseWheelUnit::Line => WHEEL_LINE_PX,
        egui::MouseWheelUnit::Page => WHEEL_PAGE_PX,
    };
    // egui reports positive y when content should move down
    -delta.y * scale
}

fn classify(arbiter: &mut InputArbiter, translated: &[Translated]) -> Vec<SectionCommand> {
    translated
        .iter()
        .filter_map(|t| match t {
            Translated::First => Some(SectionCommand::First),
            Translated::Furthest => Some(SectionCommand::Furthest),
            Translated::Input(event) => {
                let intent = arbiter.classify(event);
                (!intent.is_none()).then_some(SectionCommand::Intent(intent))
            }
        })
        .collect()
}
