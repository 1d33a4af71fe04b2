//! Event handling for the ratatui TUI
//!
//! Maps crossterm key events to gallery keys (overlay) and grid commands.

use crate::collection::FilterMode;
use crate::keybinds::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means while the grid has focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    Quit,
    Filter(FilterMode),
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    Home,
    End,
    /// Open the tile under the cursor
    Open,
    /// Step back in location history
    Back,
}

/// What a key press means while the overlay is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    Quit,
    /// Same as clicking the image
    ClickImage,
    /// Same as clicking the close button
    ClickClose,
    Back,
    /// Anything else goes through the viewer's keybinds
    Key(Key),
}

/// Convert a crossterm key event to a backend-neutral key
///
/// Events with control or alt modifiers have no neutral form.
#[must_use]
pub fn to_key(event: &KeyEvent) -> Option<Key> {
    if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

/// Interpret a key press in grid mode
#[must_use]
pub fn grid_command(event: &KeyEvent) -> Option<GridCommand> {
    if is_interrupt(event) {
        return Some(GridCommand::Quit);
    }

    let command = match to_key(event)? {
        Key::Char('q') | Key::Escape => GridCommand::Quit,
        Key::Char('1') => GridCommand::Filter(FilterMode::MostLiked),
        Key::Char('2') => GridCommand::Filter(FilterMode::MostRecent),
        Key::Char('3') => GridCommand::Filter(FilterMode::MostDiscussed),
        Key::Up | Key::Char('k') => GridCommand::CursorUp,
        Key::Down | Key::Char('j') => GridCommand::CursorDown,
        Key::PageUp => GridCommand::PageUp,
        Key::PageDown | Key::Char(' ') => GridCommand::PageDown,
        Key::Home | Key::Char('g') => GridCommand::Home,
        Key::End | Key::Char('G') => GridCommand::End,
        Key::Enter => GridCommand::Open,
        Key::Char('b') => GridCommand::Back,
        _ => return None,
    };
    Some(command)
}

/// Interpret a key press while the overlay is open
#[must_use]
pub fn overlay_command(event: &KeyEvent) -> Option<OverlayCommand> {
    if is_interrupt(event) {
        return Some(OverlayCommand::Quit);
    }

    let command = match to_key(event)? {
        Key::Enter | Key::Char(' ') => OverlayCommand::ClickImage,
        Key::Char('x') => OverlayCommand::ClickClose,
        Key::Char('b') => OverlayCommand::Back,
        key => OverlayCommand::Key(key),
    };
    Some(command)
}
