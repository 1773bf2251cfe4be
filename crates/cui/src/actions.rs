use crate::app::{App, FocusPane};
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.should_quit = true;
            }
        }
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::CyclePrev => app.cycle_selector(false),
        InputAction::CycleNext => app.cycle_selector(true),
        InputAction::ToggleSelect => {
            if app.focus == FocusPane::Tags {
                app.toggle_focused_tag();
            } else if app.focus.is_selector() {
                app.cycle_selector(true);
            }
        }
        InputAction::ClearTags => app.clear_tags(),
        InputAction::InsertChar(ch) => app.push_keyword(ch),
        InputAction::DeleteChar => app.pop_keyword(),
        InputAction::ClearKeyword => app.clear_keyword(),
    }
}
