//! Terminal frontend driving a [`Gallery`]
//!
//! Each loop iteration ticks the gallery clock, draws the frame from the
//! [`TerminalRenderer`] state and feeds at most one terminal event back into
//! the gallery.

use super::events::{GridCommand, OverlayCommand, grid_command, overlay_command};
use super::renderer::{Shown, TerminalRenderer};
use super::state::GridState;
use super::theme::Theme;
use crate::collection::{FilterMode, Projection};
use crate::gallery::{Gallery, GalleryEvent, LoadState};
use crate::keybinds::{KeyBindings, ViewerAction};
use crate::location::{InMemoryLocation, LocationChannel};
use crate::prefs::PreferenceStore;
use crate::ui::error::Result;
use crate::viewer::OverlayTarget;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Gallery as hosted by the terminal frontend
pub type TerminalGallery<P> = Gallery<TerminalRenderer, P, InMemoryLocation>;

/// Pagination check to run once the next frame has been laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingCheck {
    Rendered,
    Resized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Ratatui host for a gallery
pub struct GalleryApp<P> {
    gallery: TerminalGallery<P>,
    grid: GridState,
    theme: Theme,
    started: Instant,
    shown: Option<Arc<Projection>>,
    pending: Option<PendingCheck>,
}

impl<P: PreferenceStore> GalleryApp<P> {
    #[must_use]
    pub fn new(gallery: TerminalGallery<P>) -> Self {
        Self {
            gallery,
            grid: GridState::new(),
            theme: Theme::default(),
            started: Instant::now(),
            shown: None,
            pending: None,
        }
    }

    /// Run until the user quits
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal cannot be set up, drawn to or read from.
    pub fn run(mut self) -> Result<TerminalGallery<P>> {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            log::warn!("Terminal cleanup failed: {e}");
        }

        result.map(|()| self.gallery)
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn now(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let now = self.now();
            self.gallery.handle(GalleryEvent::Tick { now });
            self.sync_grid();

            terminal.draw(|frame| self.draw(frame))?;

            if let Some(check) = self.pending.take() {
                let metrics = self.grid.metrics();
                let event = match check {
                    PendingCheck::Rendered => GalleryEvent::Rendered { metrics },
                    PendingCheck::Resized => GalleryEvent::Resized { metrics },
                };
                self.gallery.handle(event);
                continue;
            }

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.on_key(&key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => self.pending = Some(PendingCheck::Resized),
                _ => {}
            }
        }
    }

    /// Follow projection resets and newly revealed tiles
    fn sync_grid(&mut self) {
        let projection = self.gallery.engine().projection();
        if !self.shown.as_ref().is_some_and(|shown| Arc::ptr_eq(shown, projection)) {
            self.shown = Some(Arc::clone(projection));
            self.grid.reset();
            self.grid.len = 0;
        }

        let len = self.gallery.renderer().tiles().len();
        if len != self.grid.len {
            self.grid.set_len(len);
            self.pending = Some(PendingCheck::Rendered);
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> Flow {
        if self.gallery.viewer().is_open() {
            let Some(command) = overlay_command(key) else {
                return Flow::Continue;
            };
            let event = match command {
                OverlayCommand::Quit => return Flow::Quit,
                OverlayCommand::ClickImage => GalleryEvent::OverlayClicked(OverlayTarget::Image),
                OverlayCommand::ClickClose => GalleryEvent::OverlayClicked(OverlayTarget::CloseButton),
                OverlayCommand::Back => self.back(),
                OverlayCommand::Key(key) => GalleryEvent::Key(key),
            };
            self.gallery.handle(event);
            return Flow::Continue;
        }

        let Some(command) = grid_command(key) else {
            return Flow::Continue;
        };
        let event = match command {
            GridCommand::Quit => return Flow::Quit,
            GridCommand::Filter(mode) => GalleryEvent::FilterSelected(mode),
            GridCommand::Open => GalleryEvent::TileClicked(self.grid.cursor),
            GridCommand::Back => self.back(),
            movement => {
                match movement {
                    GridCommand::CursorUp => self.grid.cursor_up(),
                    GridCommand::CursorDown => self.grid.cursor_down(),
                    GridCommand::PageUp => self.grid.page_up(),
                    GridCommand::PageDown => self.grid.page_down(),
                    GridCommand::Home => self.grid.jump_to_start(),
                    GridCommand::End => self.grid.jump_to_end(),
                    _ => {}
                }
                GalleryEvent::Scrolled {
                    metrics: self.grid.metrics(),
                    now: self.now(),
                }
            }
        };
        self.gallery.handle(event);
        Flow::Continue
    }

    fn back(&mut self) -> GalleryEvent {
        if !self.gallery.location_mut().back() {
            log::debug!("Location history is empty");
        }
        GalleryEvent::LocationChanged
    }

    fn draw(&mut self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filter tabs
                Constraint::Min(3),    // Tiles
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        self.draw_tabs(frame, layout[0]);
        self.draw_tiles(frame, layout[1]);
        self.draw_status(frame, layout[2]);
        self.draw_help(frame, layout[3]);

        if let Some(shown) = self.gallery.renderer().overlay() {
            self.draw_overlay(frame, shown);
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let active = self.gallery.active_filter();
        let titles: Vec<Line> = FilterMode::KNOWN
            .iter()
            .enumerate()
            .map(|(i, mode)| Line::from(format!("{} {}", i + 1, mode.label())))
            .collect();
        let selected = FilterMode::KNOWN.iter().position(|mode| mode == active);

        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(self.theme.active_tab_style())
            .divider(" | ")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style())
                    .title(" Filter "),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_tiles(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " Gallery ({}/{}) ",
            self.grid.len,
            self.gallery.projection().len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.grid.set_visible_height(usize::from(inner.height));
        let start = self.grid.scroll_offset;
        let end = start + self.grid.visible_height;

        let items: Vec<ListItem> = self
            .gallery
            .renderer()
            .tiles()
            .range(start..end)
            .map(|(&position, shown)| {
                let item = ListItem::new(self.tile_line(position, shown));
                if position == self.grid.cursor {
                    item.style(self.theme.selected_style())
                } else {
                    item
                }
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn tile_line(&self, position: usize, shown: &Shown) -> Line<'static> {
        let item = &shown.item;
        let mut spans = vec![
            Span::styled(format!("{:>4} ", position + 1), self.theme.dimmed_style()),
            Span::styled(format!("♥ {:<6}", item.likes), self.theme.likes_style()),
            Span::styled(format!("✎ {:<5}", item.comments), self.theme.comments_style()),
            Span::styled(
                format!("{} ", item.created_at.format("%Y-%m-%d")),
                self.theme.dimmed_style(),
            ),
        ];
        if shown.is_failed() {
            spans.push(Span::styled(
                format!("{} [unavailable]", item.url),
                self.theme.error_style(),
            ));
        } else {
            spans.push(Span::styled(item.url.clone(), self.theme.url_style()));
        }
        Line::from(spans)
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let line = match self.gallery.load_state() {
            LoadState::Pending => Line::from(Span::styled("Loading…", self.theme.dimmed_style())),
            LoadState::Failed(reason) => Line::from(Span::styled(
                format!("Failed to load collection: {reason}"),
                self.theme.error_style(),
            )),
            LoadState::Loaded(count) => Line::from(vec![
                Span::styled(
                    format!("#{} ", self.gallery.location().get()),
                    self.theme.info_style(),
                ),
                Span::styled(
                    format!(
                        "page {} · {} of {count} items",
                        self.gallery.engine().page_index() + 1,
                        self.gallery.projection().len()
                    ),
                    self.theme.dimmed_style(),
                ),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.gallery.viewer().is_open() {
            overlay_hints(self.gallery.viewer().bindings())
        } else {
            "1-3 filter  j/k move  enter open  b back  q quit".to_string()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, self.theme.dimmed_style())),
            area,
        );
    }

    fn draw_overlay(&self, frame: &mut Frame, shown: &Shown) {
        let area = centered(frame.area(), 70, 50);
        let viewer = self.gallery.viewer();
        let title = format!(
            " {}/{} ",
            viewer.current_index().map_or(0, |i| i + 1),
            viewer.items().len()
        );

        let item = &shown.item;
        let mut lines = vec![
            Line::from(Span::styled(item.url.clone(), self.theme.url_style())),
            Line::default(),
            Line::from(Span::styled(format!("♥ {} likes", item.likes), self.theme.likes_style())),
            Line::from(Span::styled(
                format!("✎ {} comments", item.comments),
                self.theme.comments_style(),
            )),
            Line::from(Span::styled(
                item.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                self.theme.dimmed_style(),
            )),
        ];
        if shown.is_failed() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Media could not be displayed",
                self.theme.error_style(),
            )));
        }

        let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.active_tab_style())
                .title(title)
                .title_bottom(" [x] "),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

/// Help line for the open overlay; unbound actions are left out
fn overlay_hints(bindings: &KeyBindings) -> String {
    let mut hints: Vec<String> = ViewerAction::ALL
        .into_iter()
        .filter_map(|action| {
            let keys = bindings.keys_for(action);
            if keys.is_empty() {
                return None;
            }
            let keys = keys.iter().map(ToString::to_string).collect::<Vec<_>>().join("/");
            Some(format!("{keys} {}", action.description().to_lowercase()))
        })
        .collect();
    hints.push("enter next  x close  b back".to_string());
    hints.join("  ")
}

/// A rectangle of the given percentages centered in `area`
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let scale = |extent: u16, percent: u16| {
        u16::try_from(u32::from(extent) * u32::from(percent.min(100)) / 100).unwrap_or(extent)
    };
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinds::{KeybindConfig, KeybindDef};

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 70, 50), Rect::new(15, 10, 70, 20));
        assert_eq!(centered(area, 100, 100), area);
    }

    #[test]
    fn test_overlay_hints_follow_bindings() {
        let hints = overlay_hints(&KeyBindings::default());
        assert!(hints.starts_with("esc close the viewer  right next item  left previous item"));

        let mut config = KeybindConfig::default();
        config
            .keybinds
            .insert("close".to_string(), KeybindDef::Single("none".to_string()));
        let hints = overlay_hints(&config.bindings());
        assert!(!hints.contains("close the viewer"));
        assert!(hints.ends_with("x close  b back"));
    }
}
