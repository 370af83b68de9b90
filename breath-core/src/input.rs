//! Physical input to logical action routing.

use crate::phase::Action;

/// Hold time that turns a press into a long press.
pub const LONG_PRESS_MS: u64 = 500;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    Up,
    Select,
    Down,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Press(Button),
    LongPress(Button),
    Tap(Axis),
}

pub fn route(event: InputEvent) -> Option<Action> {
    match event {
        InputEvent::Press(_) => Some(Action::Advance),
        InputEvent::LongPress(_) => Some(Action::Reset),
        // Punch resets, twist advances
        InputEvent::Tap(Axis::X) => Some(Action::Reset),
        InputEvent::Tap(Axis::Y) => Some(Action::Advance),
        InputEvent::Tap(Axis::Z) => None,
    }
}
