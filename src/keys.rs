//! Keyboard chords the browser reacts to.

/// A key, reduced to what the bindings care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    ArrowLeft,
    ArrowRight,
    Other,
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
    pub shift: bool,
    /// Focus was in an input or textarea; the field keeps its native keys.
    pub in_text_field: bool,
}

impl KeyChord {
    pub fn new(key: Key) -> Self {
        Self { key, ctrl: false, meta: false, shift: false, in_text_field: false }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    PreviousPage,
    NextPage,
}

/// Map a chord to its command.
///
/// `Ctrl/Cmd+Z` undoes, `Ctrl/Cmd+Shift+Z` redoes and the bare arrow keys
/// page. Chords typed into a text field map to nothing.
pub fn command_for(chord: &KeyChord) -> Option<Command> {
    if chord.in_text_field {
        return None;
    }
    let accel = chord.ctrl || chord.meta;
    match chord.key {
        Key::Char(c) if accel && c.eq_ignore_ascii_case(&'z') => {
            Some(if chord.shift { Command::Redo } else { Command::Undo })
        }
        Key::ArrowLeft if !accel => Some(Command::PreviousPage),
        Key::ArrowRight if !accel => Some(Command::NextPage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_and_redo_chords() {
        assert_eq!(command_for(&KeyChord::new(Key::Char('z')).ctrl()), Some(Command::Undo));
        assert_eq!(command_for(&KeyChord::new(Key::Char('z')).meta()), Some(Command::Undo));
        assert_eq!(command_for(&KeyChord::new(Key::Char('Z')).ctrl().shift()), Some(Command::Redo));
        assert_eq!(command_for(&KeyChord::new(Key::Char('z'))), None);
    }

    #[test]
    fn arrows_page() {
        assert_eq!(command_for(&KeyChord::new(Key::ArrowLeft)), Some(Command::PreviousPage));
        assert_eq!(command_for(&KeyChord::new(Key::ArrowRight)), Some(Command::NextPage));
        assert_eq!(command_for(&KeyChord::new(Key::ArrowRight).meta()), None);
    }

    #[test]
    fn text_fields_keep_their_keys() {
        assert_eq!(command_for(&KeyChord::new(Key::Char('z')).ctrl().in_text_field()), None);
        assert_eq!(command_for(&KeyChord::new(Key::ArrowLeft).in_text_field()), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(command_for(&KeyChord::new(Key::Other).ctrl()), None);
        assert_eq!(command_for(&KeyChord::new(Key::Char('y')).ctrl()), None);
    }
}
