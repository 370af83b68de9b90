use breath_core::{Axis, Button, InputEvent};

// F-key character codes from Xous keyboard service
pub const KEY_F1: char = '\u{0011}';
pub const KEY_F4: char = '\u{0014}';
const KEY_BACKSPACE: char = '\u{0008}';

pub enum KeyCommand {
    Input(InputEvent),
    ToggleHelp,
    Quit,
}

/// Precursor keys stand in for the watch buttons and tap axes.
/// The keyboard reports no hold time, so reset gets its own keys.
pub fn map_key(key: char) -> Option<KeyCommand> {
    let cmd = match key {
        KEY_F1 => KeyCommand::ToggleHelp,
        KEY_F4 => KeyCommand::Quit,
        '↑' | 'k' => KeyCommand::Input(InputEvent::Press(Button::Up)),
        '↓' | 'j' => KeyCommand::Input(InputEvent::Press(Button::Down)),
        '\r' | '\n' | ' ' => KeyCommand::Input(InputEvent::Press(Button::Select)),
        'r' | KEY_BACKSPACE => KeyCommand::Input(InputEvent::LongPress(Button::Select)),
        'x' => KeyCommand::Input(InputEvent::Tap(Axis::X)),
        'y' => KeyCommand::Input(InputEvent::Tap(Axis::Y)),
        'z' => KeyCommand::Input(InputEvent::Tap(Axis::Z)),
        _ => return None,
    };
    Some(cmd)
}
