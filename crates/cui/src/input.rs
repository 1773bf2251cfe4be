use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    NextFocus,
    PrevFocus,
    MoveUp,
    MoveDown,
    CyclePrev,
    CycleNext,
    ToggleSelect,
    ClearTags,
    InsertChar(char),
    DeleteChar,
    ClearKeyword,
}

/// `typing` is set while the keyword field has focus; printable keys then
/// edit the keyword instead of triggering shortcuts.
pub fn map_key(key: KeyEvent, typing: bool) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputAction::Quit,
            KeyCode::Char('u') if typing => InputAction::ClearKeyword,
            _ => InputAction::None,
        };
    }
    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Tab => InputAction::NextFocus,
        KeyCode::BackTab => InputAction::PrevFocus,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Left => InputAction::CyclePrev,
        KeyCode::Right => InputAction::CycleNext,
        KeyCode::Backspace if typing => InputAction::DeleteChar,
        KeyCode::Char(ch) if typing => InputAction::InsertChar(ch),
        KeyCode::Enter => InputAction::ToggleSelect,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char(' ') => InputAction::ToggleSelect,
        KeyCode::Char('c') => InputAction::ClearTags,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('h') => InputAction::CyclePrev,
        KeyCode::Char('l') => InputAction::CycleNext,
        _ => InputAction::None,
    }
}
