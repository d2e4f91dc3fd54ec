use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::animation::slide_offset;
use super::app::{ANIMATION_SETTINGS_ROWS, InputMode, MessageType, StatusMessage};
use super::layout::{AppLayout, centered_rect};
use super::timestamps::format_modified;
use crate::fsops::Preview;
use crate::models::{AnimationType, DirEntry};
use crate::search::SearchMode;
use crate::theme::{Theme, ThemeKey, blend};
use crate::utils::{breadcrumbs, format_path_with_tilde, format_size, sanitize_display_name};

const SUCCESS_COLOR: Color = Color::Rgb(16, 185, 129);
const ERROR_COLOR: Color = Color::Rgb(239, 68, 68);
const MUTED_COLOR: Color = Color::Rgb(113, 113, 122);

/// Everything the renderer needs from the app for one frame
pub struct RenderState<'a> {
    pub current_dir: &'a Path,
    /// Entries after search filtering, in display order
    pub entries: Vec<&'a DirEntry>,
    pub selected_idx: usize,
    pub marked: &'a BTreeSet<PathBuf>,
    pub total_count: usize,
    pub search_query: &'a str,
    pub search_mode: SearchMode,
    pub mode: &'a InputMode,
    pub prompt_input: &'a str,
    pub pending_delete: usize,
    pub overlay_cursor: usize,
    pub theme: &'a Theme,
    pub anim_type: AnimationType,
    pub anim_duration_ms: u64,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub loading: bool,
    pub clipboard: Option<&'a Path>,
    pub preview: Option<&'a Preview>,
    /// Running transition and its eased progress
    pub transition: Option<(AnimationType, f32)>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_breadcrumb_bar(frame, layout.breadcrumb_area, state);
    render_entry_list(frame, layout.list_area, state);
    render_preview(frame, layout.preview_area, state.preview, state.theme);
    render_status_bar(frame, layout.status_area, state);

    match state.mode {
        InputMode::Prompt(kind) => {
            render_prompt(frame, &kind.title(), state.prompt_input, state.theme)
        }
        InputMode::Confirm => render_confirm(frame, state.pending_delete, state.theme),
        InputMode::ThemeEditor => render_theme_editor(frame, state.theme, state.overlay_cursor),
        InputMode::AnimationSettings => render_animation_settings(frame, state),
        InputMode::Normal | InputMode::Search => {}
    }
}

fn base_style(theme: &Theme) -> Style {
    Style::default().fg(theme.color(ThemeKey::Text)).bg(theme.color(ThemeKey::Background))
}

fn render_breadcrumb_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let theme = state.theme;
    let base = base_style(theme);
    let muted = base.fg(MUTED_COLOR);

    let mut spans = vec![
        Span::styled("◀", if state.can_go_back { base } else { muted }),
        Span::styled("▶ ", if state.can_go_forward { base } else { muted }),
    ];

    let crumbs = breadcrumbs(state.current_dir);
    let last = crumbs.len().saturating_sub(1);
    for (idx, crumb) in crumbs.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" › ", muted));
        }
        // Only the first nine segments have a jump key
        if idx < 9 {
            spans.push(Span::styled(format!("{}:", idx + 1), muted));
        }
        let style = if idx == last { base.add_modifier(Modifier::BOLD) } else { base };
        spans.push(Span::styled(sanitize_display_name(&crumb.label), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

fn entry_label(entry: &DirEntry) -> String {
    let label = sanitize_display_name(&entry.display_label());
    if entry.is_folder() { format!("{}/", label) } else { label }
}

fn render_entry_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let theme = state.theme;
    let base = base_style(theme);

    // Fade blends text in from the background, slide indents rows back to zero
    let (text_color, indent) = match state.transition {
        Some((AnimationType::Fade, progress)) => (
            blend(theme.color(ThemeKey::Background), theme.color(ThemeKey::Text), progress),
            0,
        ),
        Some((AnimationType::Slide, progress)) => {
            (theme.color(ThemeKey::Text), slide_offset(progress) as usize)
        }
        _ => (theme.color(ThemeKey::Text), 0),
    };

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|entry| {
            let is_marked = state.marked.contains(&entry.path);
            let marker = if is_marked { "● " } else { "  " };
            let content = format!("{}{}{}", " ".repeat(indent), marker, entry_label(entry));

            let mut style = base.fg(text_color);
            if is_marked {
                style = style.bg(theme.color(ThemeKey::HoverBg));
            }
            if entry.is_folder() {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(content).style(style)
        })
        .collect();

    let title = match state.current_dir.file_name() {
        Some(name) => format!(" {} ", sanitize_display_name(&name.to_string_lossy())),
        None => format!(" {} ", state.current_dir.display()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(base.fg(MUTED_COLOR))
        .title(title)
        .style(base);

    if items.is_empty() {
        let message = if state.loading {
            "Loading..."
        } else if state.total_count > 0 {
            "No matches"
        } else {
            "(empty folder)"
        };
        frame.render_widget(Paragraph::new(message).style(base.fg(MUTED_COLOR)).block(block), area);
        return;
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(theme.color(ThemeKey::Text))
            .bg(theme.color(ThemeKey::SelectedBg))
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default().with_selected(Some(state.selected_idx));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, preview: Option<&Preview>, theme: &Theme) {
    let style = Style::default().fg(theme.color(ThemeKey::Text)).bg(theme.color(ThemeKey::TooltipBg));
    let label = style.fg(MUTED_COLOR);

    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(name, label), Span::raw(value)])
    };

    let content = match preview {
        Some(Preview::Folder { path, peek }) => {
            let contains = match peek {
                Some(peek) if peek.is_empty() => "(empty)".to_string(),
                Some(peek) => sanitize_display_name(peek),
                None => "(unreadable)".to_string(),
            };
            Text::from(vec![
                field("Folder: ", file_name_of(path)),
                field("Path: ", format_path_with_tilde(path)),
                Line::from(""),
                field("Contains: ", contains),
            ])
        }
        Some(Preview::File { path, size, modified }) => Text::from(vec![
            field("File: ", file_name_of(path)),
            field("Path: ", format_path_with_tilde(path)),
            Line::from(""),
            field("Size: ", size.map(format_size).unwrap_or_else(|| "unknown".to_string())),
            field("Modified: ", format_modified(modified.as_ref())),
        ]),
        None => Text::from("No entry selected"),
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style.fg(MUTED_COLOR))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| sanitize_display_name(&n.to_string_lossy()))
        .unwrap_or_else(|| path.display().to_string())
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let bar = Style::default().fg(Color::Rgb(250, 250, 250)).bg(Color::Rgb(24, 24, 27));

    if let Some(msg) = state.status_message {
        let color = match msg.message_type {
            MessageType::Success => SUCCESS_COLOR,
            MessageType::Error => ERROR_COLOR,
        };
        let paragraph = Paragraph::new(format!(" {} ", msg.text)).style(bar.fg(color));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut parts = vec![format!("[{}]", state.search_mode.label())];

    // Match counts
    if state.search_query.is_empty() {
        parts.push(format!("{} items", state.total_count));
    } else {
        parts.push(format!("{}/{} match", state.entries.len(), state.total_count));
    }

    if state.loading {
        parts.push("loading...".to_string());
    }
    if !state.marked.is_empty() {
        parts.push(format!("{} marked", state.marked.len()));
    }
    if let Some(path) = state.clipboard {
        parts.push(format!("clip: {}", file_name_of(path)));
    }

    match state.mode {
        InputMode::Search => {
            parts.insert(0, format!("/{}▏", state.search_query));
            parts.push("Enter: keep | Esc: clear | Tab: mode".to_string());
        }
        _ => {
            if !state.search_query.is_empty() {
                parts.push(format!("filter: {}", state.search_query));
                parts.push("Esc: clear".to_string());
            }
            parts.push(
                "Enter: open | Bksp: up | /: search | n/N: new | r: rename | d: delete | \
                 c/v: copy/paste | Space: mark | m: move | t: theme | a: anim | q: quit"
                    .to_string(),
            );
        }
    }

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | "))).style(bar);
    frame.render_widget(paragraph, area);
}

fn overlay_block(title: String, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(theme.color(ThemeKey::Text)).bg(theme.color(ThemeKey::TooltipBg)))
}

fn render_prompt(frame: &mut Frame, title: &str, input: &str, theme: &Theme) {
    let area = centered_rect(60, 3, frame.area());
    let paragraph =
        Paragraph::new(format!("{}▏", input)).block(overlay_block(title.to_string(), theme));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame, count: usize, theme: &Theme) {
    let area = centered_rect(50, 3, frame.area());
    let text = Line::from(vec![
        Span::raw(format!("Delete {} item(s)? ", count)),
        Span::styled("y", Style::default().fg(ERROR_COLOR).add_modifier(Modifier::BOLD)),
        Span::raw("/n"),
    ]);
    let paragraph = Paragraph::new(text).block(overlay_block(" Confirm delete ".to_string(), theme));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_theme_editor(frame: &mut Frame, theme: &Theme, cursor: usize) {
    let area = centered_rect(50, ThemeKey::ALL.len() as u16 + 4, frame.area());

    let mut lines: Vec<Line> = ThemeKey::ALL
        .iter()
        .enumerate()
        .map(|(idx, key)| {
            let pointer = if idx == cursor { "> " } else { "  " };
            let row = Line::from(vec![
                Span::raw(format!("{}{:<12}", pointer, key.as_str())),
                Span::styled("██ ", Style::default().fg(theme.color(*key))),
                Span::raw(theme.get(*key).to_string()),
            ]);
            if idx == cursor { row.style(Style::default().add_modifier(Modifier::BOLD)) } else { row }
        })
        .collect();

    let preset = theme.preset_name().unwrap_or("custom");
    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!("Enter: edit | p: preset ({}) | Esc: close", preset),
        Style::default().fg(MUTED_COLOR),
    ));

    let paragraph = Paragraph::new(lines).block(overlay_block(" Theme ".to_string(), theme));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_animation_settings(frame: &mut Frame, state: &RenderState) {
    let area = centered_rect(40, ANIMATION_SETTINGS_ROWS as u16 + 4, frame.area());

    let rows = [
        format!("Type:     {}", state.anim_type),
        format!("Duration: {} ms", state.anim_duration_ms),
    ];
    let mut lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            if idx == state.overlay_cursor {
                Line::styled(format!("> {}", row), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!("  {}", row))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled("Enter: change | Esc: close", Style::default().fg(MUTED_COLOR)));

    let paragraph =
        Paragraph::new(lines).block(overlay_block(" Animation ".to_string(), state.theme));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
