//! Explorer state and event handling.
//!
//! This module implements the interactive side of filey. [`App`] owns:
//!
//! - **Listing**: entries of the current folder, as delivered by the background
//!   [`DirectoryLoader`], plus the search-filtered view over them
//! - **Navigation**: back/forward [`History`], parent, breadcrumb jumps and home
//! - **Entry commands**: create, rename, delete, copy/paste and moving marked
//!   entries into a folder
//! - **Settings**: theme editor and animation settings, persisted through the
//!   [`SessionStore`] after every change
//! - **Status messages**: transient feedback in place of modal dialogs
//! - **Dirty state tracking**: redraw only when state changed, while a transition
//!   is running, or on the 100ms tick
//!
//! # Architecture
//!
//! Key events are mapped to an [`Action`] for the current [`InputMode`] and applied
//! by `handle_action`. Folder scans never run on the UI thread: `load_path` requests
//! a scan and the result is applied when the loader delivers it. Scans superseded by
//! a newer request are dropped by the loader.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::animation::Transition;
use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{FileClipboard, copy_path_to_clipboard};
use crate::fsops::{self, DirectoryLoader, LoadResult, Preview};
use crate::models::{DirEntry, next_duration};
use crate::nav::History;
use crate::search::{MAX_QUERY_LEN, SearchMode, filter_indices};
use crate::session::{Session, SessionStore};
use crate::theme::{ThemeKey, ThemePreset};
use crate::utils::{breadcrumbs, get_home_dir};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Rows skipped by PageUp/PageDown
const PAGE_SIZE: isize = 10;
/// Longest name accepted by the prompt (characters)
const MAX_INPUT_LEN: usize = 255;
/// Rows in the animation settings overlay (type, duration)
pub(crate) const ANIMATION_SETTINGS_ROWS: usize = 2;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// What a text prompt is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    NewFolder,
    NewFile,
    /// Rename the entry at this path
    Rename(PathBuf),
    ThemeColor(ThemeKey),
}

impl PromptKind {
    pub fn title(&self) -> String {
        match self {
            PromptKind::NewFolder => " New folder name ".to_string(),
            PromptKind::NewFile => " New file name ".to_string(),
            PromptKind::Rename(_) => " Rename to ".to_string(),
            PromptKind::ThemeColor(key) => format!(" Colour for {} (#rrggbb) ", key.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Prompt(PromptKind),
    /// Waiting for y/n on the pending delete
    Confirm,
    ThemeEditor,
    AnimationSettings,
}

/// Startup configuration for the explorer
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub start_dir: PathBuf,
    pub session: Session,
    /// `None` disables session persistence
    pub store: Option<SessionStore>,
}

/// Bookkeeping for the scan currently in flight
#[derive(Debug)]
struct PendingLoad {
    animate: bool,
    select: Option<PathBuf>,
}

pub struct App {
    current_dir: PathBuf,
    entries: Vec<DirEntry>,
    // Indices into `entries` after search filtering
    visible: Vec<usize>,
    selected_idx: usize,
    marked: BTreeSet<PathBuf>,
    search_query: String,
    search_mode: SearchMode,
    mode: InputMode,
    prompt_input: String,
    pending_delete: Vec<PathBuf>,
    overlay_cursor: usize,
    history: History,
    loader: DirectoryLoader,
    pending: Option<PendingLoad>,
    file_clipboard: FileClipboard,
    preview: Option<(PathBuf, Preview)>,
    session: Session,
    store: Option<SessionStore>,
    transition: Option<Transition>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut app = Self {
            current_dir: config.start_dir.clone(),
            entries: Vec::new(),
            visible: Vec::new(),
            selected_idx: 0,
            marked: BTreeSet::new(),
            search_query: String::new(),
            search_mode: SearchMode::default(),
            mode: InputMode::Normal,
            prompt_input: String::new(),
            pending_delete: Vec::new(),
            overlay_cursor: 0,
            history: History::new(),
            loader: DirectoryLoader::new(),
            pending: None,
            file_clipboard: FileClipboard::new(),
            preview: None,
            session: config.session,
            store: config.store,
            transition: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        };
        app.load_path(config.start_dir, true, false, None);
        app
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Clear expired status messages (marks dirty if cleared)
            self.check_and_clear_expired_status();

            // Apply a finished scan, if any
            self.poll_loader();
            self.update_preview();

            let now = Instant::now();
            let animating = self.transition.is_some();
            if let Some(transition) = self.transition
                && transition.is_finished_at(now)
            {
                self.transition = None;
                self.needs_redraw = true;
            }

            // Draw if dirty, animating, or if it's been >100ms (for terminal resize handling)
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || animating || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state(now)))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // Poll faster while a transition runs so it animates smoothly
            let timeout =
                if animating { Duration::from_millis(16) } else { Duration::from_millis(100) };
            let action = poll_event(timeout, &self.mode)?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self, now: Instant) -> RenderState<'_> {
        RenderState {
            current_dir: &self.current_dir,
            entries: self.visible_entries(),
            selected_idx: self.selected_idx,
            marked: &self.marked,
            total_count: self.entries.len(),
            search_query: &self.search_query,
            search_mode: self.search_mode,
            mode: &self.mode,
            prompt_input: &self.prompt_input,
            pending_delete: self.pending_delete.len(),
            overlay_cursor: self.overlay_cursor,
            theme: &self.session.theme,
            anim_type: self.session.anim_type,
            anim_duration_ms: self.session.anim_duration_ms,
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
            loading: self.pending.is_some(),
            clipboard: self.file_clipboard.path(),
            preview: self.preview.as_ref().map(|(_, preview)| preview),
            transition: self.transition.map(|t| (t.kind, t.progress_at(now))),
            status_message: self.status_message.as_ref(),
        }
    }

    fn visible_entries(&self) -> Vec<&DirEntry> {
        self.visible.iter().map(|&idx| &self.entries[idx]).collect()
    }

    fn selected_entry(&self) -> Option<&DirEntry> {
        self.visible.get(self.selected_idx).map(|&idx| &self.entries[idx])
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Switch to `path` and start scanning it
    ///
    /// The scan result is applied later by `apply_load_result`. Returns false when
    /// `path` is not a folder; the current view is left alone in that case.
    fn load_path(
        &mut self,
        path: PathBuf,
        add_history: bool,
        animate: bool,
        select: Option<PathBuf>,
    ) -> bool {
        if !path.is_dir() {
            self.set_error(format!("✗ Folder not found: {}", path.display()));
            return false;
        }

        if add_history {
            self.history.push(path.clone());
        }
        if path != self.current_dir {
            // The old folder's rows must not stay actionable under the new path
            self.entries.clear();
            self.visible.clear();
            self.preview = None;
            self.marked.clear();
            self.search_query.clear();
            self.selected_idx = 0;
        }

        tracing::debug!(dir = %path.display(), add_history, animate, "navigate");
        self.loader.request(&path);
        self.current_dir = path;
        self.pending = Some(PendingLoad { animate, select });
        self.needs_redraw = true;
        true
    }

    /// Rescan the current folder, optionally putting the cursor on `select`
    fn reload(&mut self, select: Option<PathBuf>) {
        let dir = self.current_dir.clone();
        self.load_path(dir, false, false, select);
    }

    fn poll_loader(&mut self) {
        if let Some(result) = self.loader.try_recv() {
            self.apply_load_result(result);
        }
    }

    fn apply_load_result(&mut self, result: LoadResult) {
        let pending = self.pending.take().unwrap_or(PendingLoad { animate: false, select: None });
        self.preview = None;
        self.needs_redraw = true;

        match result.outcome {
            Ok(listing) => {
                tracing::info!(
                    dir = %listing.dir.display(),
                    entries = listing.len(),
                    elapsed_ms = listing.elapsed.as_secs_f64() * 1000.0,
                    "listing loaded"
                );
                self.entries = listing.entries;
                let entries = &self.entries;
                self.marked.retain(|path| entries.iter().any(|e| &e.path == path));
                self.refresh_visible();

                if let Some(target) = pending.select
                    && let Some(pos) =
                        self.visible.iter().position(|&idx| self.entries[idx].path == target)
                {
                    self.selected_idx = pos;
                }
                self.clamp_selection();

                self.transition = if pending.animate {
                    Transition::start(
                        self.session.anim_type,
                        self.session.anim_duration_ms,
                        Instant::now(),
                    )
                } else {
                    None
                };

                self.session.last_path = result.dir;
                self.save_session();
            }
            Err(e) => {
                tracing::warn!(dir = %result.dir.display(), error = %e, "listing failed");
                self.entries.clear();
                self.visible.clear();
                self.selected_idx = 0;
                self.transition = None;
                self.set_error(format!("✗ {}", e));
            }
        }
    }

    /// Persist the session; a failure shows in the status bar and returns false
    fn save_session(&mut self) -> bool {
        let Some(store) = &self.store else {
            return true;
        };
        match store.save(&self.session) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %store.path().display(), error = %e, "failed to save session");
                self.set_error(format!("✗ Session not saved: {}", e));
                false
            }
        }
    }

    /// Recompute the preview when the cursor moved to another entry
    fn update_preview(&mut self) {
        let selected = self.selected_entry().map(|e| e.path.as_path());
        let cached = self.preview.as_ref().map(|(path, _)| path.as_path());
        if selected == cached {
            return;
        }
        self.preview = self.selected_entry().map(|e| (e.path.clone(), fsops::preview_for(e)));
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        match self.mode.clone() {
            InputMode::Normal => self.handle_normal(action),
            InputMode::Search => self.handle_search(action),
            InputMode::Prompt(kind) => self.handle_prompt(kind, action),
            InputMode::Confirm => self.handle_confirm(action),
            InputMode::ThemeEditor => self.handle_theme_editor(action),
            InputMode::AnimationSettings => self.handle_animation_settings(action),
        }
    }

    fn handle_normal(&mut self, action: Action) {
        if action.acts_on_entries() && self.pending.is_some() {
            self.set_error("✗ Still loading, try again in a moment");
            return;
        }

        match action {
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::Home => self.move_selection(isize::MIN / 2),
            Action::End => self.move_selection(isize::MAX / 2),
            Action::Open => self.open_selected(),
            Action::Parent => self.go_parent(),
            Action::Back => self.go_back(),
            Action::Forward => self.go_forward(),
            Action::JumpCrumb(n) => self.jump_to_crumb(n),
            Action::GoHome => self.go_home(),
            Action::StartSearch => self.set_mode(InputMode::Search),
            Action::ToggleSearchMode => self.toggle_search_mode(),
            Action::ClearSearch => self.clear_search(),
            Action::NewFile => self.open_prompt(PromptKind::NewFile, String::new()),
            Action::NewFolder => self.open_prompt(PromptKind::NewFolder, String::new()),
            Action::Rename => match self.selected_entry() {
                Some(entry) => {
                    let (path, name) = (entry.path.clone(), entry.name.clone());
                    self.open_prompt(PromptKind::Rename(path), name);
                }
                None => self.set_error("✗ No entry selected"),
            },
            Action::Delete => self.request_delete(),
            Action::Copy => self.copy_selected(),
            Action::Paste => self.paste(),
            Action::ToggleMark => self.toggle_mark(),
            Action::MoveMarked => self.move_marked(),
            Action::CopyPath => self.copy_path(),
            Action::Refresh => {
                let select = self.selected_entry().map(|e| e.path.clone());
                self.reload(select);
            }
            Action::OpenThemeEditor => {
                self.overlay_cursor = 0;
                self.set_mode(InputMode::ThemeEditor);
            }
            Action::OpenAnimationSettings => {
                self.overlay_cursor = 0;
                self.set_mode(InputMode::AnimationSettings);
            }
            _ => {}
        }
    }

    fn handle_search(&mut self, action: Action) {
        match action {
            Action::InputChar(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::ToggleSearchMode => self.toggle_search_mode(),
            Action::Submit => self.set_mode(InputMode::Normal),
            Action::ClearSearch => {
                self.clear_search();
                self.set_mode(InputMode::Normal);
            }
            _ => {}
        }
    }

    fn handle_prompt(&mut self, kind: PromptKind, action: Action) {
        match action {
            Action::InputChar(c) => {
                if self.prompt_input.chars().count() < MAX_INPUT_LEN {
                    self.prompt_input.push(c);
                    self.needs_redraw = true;
                }
            }
            Action::DeleteChar => {
                if self.prompt_input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::Cancel => {
                self.prompt_input.clear();
                self.set_mode(prompt_return_mode(&kind));
            }
            Action::Submit => self.submit_prompt(kind),
            _ => {}
        }
    }

    fn handle_confirm(&mut self, action: Action) {
        match action {
            Action::Confirm => self.delete_pending(),
            Action::Cancel => {
                self.pending_delete.clear();
                self.set_mode(InputMode::Normal);
            }
            _ => {}
        }
    }

    fn handle_theme_editor(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_overlay_cursor(-1, ThemeKey::ALL.len()),
            Action::MoveDown => self.move_overlay_cursor(1, ThemeKey::ALL.len()),
            Action::Submit => {
                let key = ThemeKey::ALL[self.overlay_cursor.min(ThemeKey::ALL.len() - 1)];
                let current = self.session.theme.get(key).to_string();
                self.open_prompt(PromptKind::ThemeColor(key), current);
            }
            Action::CyclePreset => {
                let preset = match self.session.theme.preset_name() {
                    Some(name) if name == ThemePreset::Dark.name() => ThemePreset::Light,
                    _ => ThemePreset::Dark,
                };
                self.session.theme = preset.theme();
                tracing::info!(preset = preset.name(), "theme preset applied");
                if self.save_session() {
                    self.set_success(format!("✓ Theme: {}", preset.name()));
                }
            }
            Action::Cancel => self.set_mode(InputMode::Normal),
            _ => {}
        }
    }

    fn handle_animation_settings(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_overlay_cursor(-1, ANIMATION_SETTINGS_ROWS),
            Action::MoveDown => self.move_overlay_cursor(1, ANIMATION_SETTINGS_ROWS),
            Action::Submit => {
                if self.overlay_cursor == 0 {
                    self.session.anim_type = self.session.anim_type.next();
                } else {
                    self.session.anim_duration_ms = next_duration(self.session.anim_duration_ms);
                }
                tracing::info!(
                    anim_type = %self.session.anim_type,
                    duration_ms = self.session.anim_duration_ms,
                    "animation settings changed"
                );
                if self.save_session() {
                    self.set_success(format!(
                        "✓ Animation: {} {}ms",
                        self.session.anim_type, self.session.anim_duration_ms
                    ));
                }
            }
            Action::Cancel => self.set_mode(InputMode::Normal),
            _ => {}
        }
    }

    fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.needs_redraw = true;
    }

    fn open_prompt(&mut self, kind: PromptKind, initial: String) {
        self.prompt_input = initial;
        self.set_mode(InputMode::Prompt(kind));
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.visible.len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize).saturating_add(delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn move_overlay_cursor(&mut self, delta: isize, rows: usize) {
        let rows = rows as isize;
        self.overlay_cursor = (self.overlay_cursor as isize + delta).rem_euclid(rows) as usize;
        self.needs_redraw = true;
    }

    fn clamp_selection(&mut self) {
        if self.selected_idx >= self.visible.len() {
            self.selected_idx = self.visible.len().saturating_sub(1);
        }
    }

    fn refresh_visible(&mut self) {
        self.visible = filter_indices(&self.entries, &self.search_query, self.search_mode);
    }

    fn update_search(&mut self, c: char) {
        // Limit search query length
        if self.search_query.chars().count() < MAX_QUERY_LEN {
            self.search_query.push(c);
            self.refresh_visible();
            self.selected_idx = 0; // Reset selection on search change
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.refresh_visible();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn clear_search(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.refresh_visible();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn toggle_search_mode(&mut self) {
        self.search_mode = self.search_mode.toggle();
        self.refresh_visible();
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };

        if entry.is_folder() {
            self.load_path(entry.path, true, true, None);
        } else {
            match fsops::open_with_system(&entry.path) {
                Ok(()) => self.set_success(format!("✓ Opened {}", entry.name)),
                Err(e) => self.set_error(format!("✗ {}", e)),
            }
        }
    }

    fn go_parent(&mut self) {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let child = self.current_dir.clone();
        self.load_path(parent, true, true, Some(child));
    }

    /// Step back in history; a folder that no longer exists leaves history untouched
    fn go_back(&mut self) {
        let Some(target) = self.history.peek_back().map(Path::to_path_buf) else {
            return;
        };
        if !target.is_dir() {
            self.set_error(format!("✗ Folder no longer exists: {}", target.display()));
            return;
        }
        self.history.back();
        let came_from = self.current_dir.clone();
        self.load_path(target, false, false, Some(came_from));
    }

    fn go_forward(&mut self) {
        let Some(target) = self.history.peek_forward().map(Path::to_path_buf) else {
            return;
        };
        if !target.is_dir() {
            self.set_error(format!("✗ Folder no longer exists: {}", target.display()));
            return;
        }
        self.history.forward();
        self.load_path(target, false, false, None);
    }

    /// `n` is 1-based, counting from the root crumb
    fn jump_to_crumb(&mut self, n: usize) {
        let crumbs = breadcrumbs(&self.current_dir);
        if let Some(crumb) = n.checked_sub(1).and_then(|idx| crumbs.get(idx)) {
            let path = crumb.path.clone();
            self.load_path(path, true, true, None);
        }
    }

    fn go_home(&mut self) {
        match get_home_dir() {
            Ok(home) => {
                self.load_path(home, true, true, None);
            }
            Err(e) => self.set_error(format!("✗ {}", e)),
        }
    }

    fn submit_prompt(&mut self, kind: PromptKind) {
        let input = std::mem::take(&mut self.prompt_input);
        self.set_mode(prompt_return_mode(&kind));

        // An empty answer cancels, like closing the dialog
        if input.trim().is_empty() {
            return;
        }

        match kind {
            PromptKind::NewFolder => match fsops::create_folder(&self.current_dir, &input) {
                Ok(path) => {
                    self.set_success(format!("✓ Created folder {}", input.trim()));
                    self.reload(Some(path));
                }
                Err(e) => self.set_error(format!("✗ {}", e)),
            },
            PromptKind::NewFile => match fsops::create_file(&self.current_dir, &input) {
                Ok(path) => {
                    self.set_success(format!("✓ Created file {}", input.trim()));
                    self.reload(Some(path));
                }
                Err(e) => self.set_error(format!("✗ {}", e)),
            },
            PromptKind::Rename(path) => match fsops::rename_entry(&path, &input) {
                Ok(new_path) => {
                    self.set_success(format!("✓ Renamed to {}", input.trim()));
                    self.reload(Some(new_path));
                }
                Err(e) => self.set_error(format!("✗ {}", e)),
            },
            PromptKind::ThemeColor(key) => match self.session.theme.set(key, &input) {
                Ok(()) => {
                    if self.save_session() {
                        let value = self.session.theme.get(key).to_string();
                        self.set_success(format!("✓ {} set to {}", key.as_str(), value));
                    }
                }
                Err(e) => self.set_error(format!("✗ {}", e)),
            },
        }
    }

    /// Ask before deleting the marked entries, or the one under the cursor
    fn request_delete(&mut self) {
        let targets: Vec<PathBuf> = if self.marked.is_empty() {
            self.selected_entry().map(|e| e.path.clone()).into_iter().collect()
        } else {
            self.marked.iter().cloned().collect()
        };

        if targets.is_empty() {
            self.set_error("✗ No entry selected");
            return;
        }
        self.pending_delete = targets;
        self.set_mode(InputMode::Confirm);
    }

    fn delete_pending(&mut self) {
        let targets = std::mem::take(&mut self.pending_delete);
        self.set_mode(InputMode::Normal);

        let mut failures = Vec::new();
        for path in &targets {
            if let Err(e) = fsops::delete_entry(path) {
                failures.push(e);
            }
        }

        let deleted = targets.len() - failures.len();
        match failures.first() {
            None => self.set_success(format!("✓ Deleted {} item(s)", deleted)),
            Some(first) => self.set_error(format!(
                "✗ Deleted {}, {} failed: {}",
                deleted,
                failures.len(),
                first
            )),
        }
        self.marked.clear();
        self.reload(None);
    }

    fn copy_selected(&mut self) {
        match self.selected_entry() {
            Some(entry) => {
                let (path, name) = (entry.path.clone(), entry.name.clone());
                self.file_clipboard.copy(path);
                self.set_success(format!("✓ Copied {}", name));
            }
            None => self.set_error("✗ No entry selected"),
        }
    }

    fn paste(&mut self) {
        if !self.file_clipboard.can_paste() {
            self.file_clipboard.clear();
            self.set_error("✗ Nothing to paste or source no longer exists");
            return;
        }
        let Some(src) = self.file_clipboard.path().map(Path::to_path_buf) else {
            return;
        };

        match fsops::paste_entry(&src, &self.current_dir) {
            Ok(dest) => {
                let name =
                    dest.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                self.set_success(format!("✓ Pasted {}", name));
                self.reload(Some(dest));
            }
            Err(e) => self.set_error(format!("✗ {}", e)),
        }
    }

    fn toggle_mark(&mut self) {
        let Some(path) = self.selected_entry().map(|e| e.path.clone()) else {
            return;
        };
        if !self.marked.remove(&path) {
            self.marked.insert(path);
        }
        self.needs_redraw = true;
        self.move_selection(1);
    }

    /// Move marked entries into the folder under the cursor (or the current folder)
    fn move_marked(&mut self) {
        if self.marked.is_empty() {
            self.set_error("✗ No marked entries (Space marks)");
            return;
        }

        let target = fsops::drop_target(&self.current_dir, self.selected_entry());
        let sources: Vec<PathBuf> = std::mem::take(&mut self.marked).into_iter().collect();
        let report = fsops::move_entries(&sources, &target);

        let target_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.display().to_string());
        match report.failed.first() {
            None => {
                self.set_success(format!("✓ Moved {} item(s) to {}", report.moved.len(), target_name))
            }
            Some((_, first)) => self.set_error(format!(
                "✗ Moved {}, {} failed: {}",
                report.moved.len(),
                report.failed.len(),
                first
            )),
        }
        self.reload(None);
    }

    /// Put the path of the entry under the cursor (or the current folder) on the system clipboard
    fn copy_path(&mut self) {
        let path = self
            .selected_entry()
            .map(|e| e.path.clone())
            .unwrap_or_else(|| self.current_dir.clone());
        match copy_path_to_clipboard(&path) {
            Ok(()) => self.set_success("✓ Copied path to clipboard"),
            Err(e) => self.set_error(format!("✗ Clipboard error: {}", e)),
        }
    }
}

fn prompt_return_mode(kind: &PromptKind) -> InputMode {
    match kind {
        PromptKind::ThemeColor(_) => InputMode::ThemeEditor,
        _ => InputMode::Normal,
    }
}
