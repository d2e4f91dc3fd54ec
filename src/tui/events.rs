use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::InputMode;

/// User actions from keyboard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    Open,
    Parent,
    Back,
    Forward,
    /// Jump to breadcrumb segment (1-based, root first)
    JumpCrumb(usize),
    GoHome,
    StartSearch,
    ToggleSearchMode,
    ClearSearch,
    NewFile,
    NewFolder,
    Rename,
    Delete,
    Copy,
    Paste,
    ToggleMark,
    MoveMarked,
    CopyPath,
    Refresh,
    OpenThemeEditor,
    OpenAnimationSettings,
    CyclePreset,
    InputChar(char),
    DeleteChar,
    Submit,
    Cancel,
    Confirm,
    None,
}

impl Action {
    /// Whether the action works on the entries under the cursor or marked
    pub fn acts_on_entries(&self) -> bool {
        matches!(
            self,
            Action::Open
                | Action::Rename
                | Action::Delete
                | Action::Copy
                | Action::ToggleMark
                | Action::MoveMarked
                | Action::CopyPath
        )
    }
}

/// Poll for keyboard events and convert to actions for the current mode
pub fn poll_event(timeout: Duration, mode: &InputMode) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key, mode));
    }
    Ok(Action::None)
}

pub(crate) fn key_to_action(key: KeyEvent, mode: &InputMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match mode {
        InputMode::Normal => normal_key(key),
        InputMode::Search => search_key(key),
        InputMode::Prompt(_) => prompt_key(key),
        InputMode::Confirm => confirm_key(key),
        InputMode::ThemeEditor => theme_editor_key(key),
        InputMode::AnimationSettings => animation_settings_key(key),
    }
}

fn normal_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        // History (Alt+arrows like a browser)
        (KeyCode::Left, KeyModifiers::ALT) | (KeyCode::Char('['), _) => Action::Back,
        (KeyCode::Right, KeyModifiers::ALT) | (KeyCode::Char(']'), _) => Action::Forward,

        // Cursor (Vim style too)
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Action::Home,
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => Action::End,

        // Folders
        (KeyCode::Enter, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
            Action::Open
        }
        (KeyCode::Backspace, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            Action::Parent
        }
        (KeyCode::Char(c @ '1'..='9'), _) => Action::JumpCrumb(c as usize - '0' as usize),
        (KeyCode::Char('~'), _) => Action::GoHome,

        // Search
        (KeyCode::Char('/'), _) => Action::StartSearch,
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::ToggleSearchMode,
        (KeyCode::Esc, _) => Action::ClearSearch,

        // Entry commands
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NewFile,
        (KeyCode::Char('N'), _) => Action::NewFolder,
        (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::F(2), _) => Action::Rename,
        (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => Action::Delete,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::Copy,
        (KeyCode::Char('v'), KeyModifiers::NONE) | (KeyCode::Char('p'), KeyModifiers::NONE) => {
            Action::Paste
        }
        (KeyCode::Char(' '), _) => Action::ToggleMark,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::MoveMarked,
        (KeyCode::Char('y'), KeyModifiers::NONE) => Action::CopyPath,
        (KeyCode::Char('R'), _) | (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,

        // Settings
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::OpenThemeEditor,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::OpenAnimationSettings,

        _ => Action::None,
    }
}

fn search_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::ClearSearch,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Tab, _) => Action::ToggleSearchMode,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}

fn prompt_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}

fn confirm_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

fn theme_editor_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char('p') => Action::CyclePreset,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('t') => Action::Cancel,
        _ => Action::None,
    }
}

fn animation_settings_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
            Action::Submit
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('a') => Action::Cancel,
        _ => Action::None,
    }
}
