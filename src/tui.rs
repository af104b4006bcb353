use crate::avatar::{AvatarCache, AvatarEntry, AvatarImage, CARD_AVATAR_PX, DETAIL_AVATAR_PX};
use crate::config::GlobalConfig;
use crate::model::{Profile, ROSTER};
use crate::router::{ProfileSnapshot, Route, Router};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use image::{DynamicImage, Rgb, RgbImage};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::time::Duration;

const PLACEHOLDER_GRAY: [u8; 3] = [110, 110, 110];

pub fn border_style(online: bool) -> Style {
    let color = if online { Color::Green } else { Color::Red };
    Style::default().fg(color)
}

/// Full-intensity bold name when online, dimmed when offline.
pub fn name_style(online: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if online {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    }
}

/// The status label is always subdued, matching the card design.
pub fn status_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Solid gray disc pushed through the same crop/mask pipeline as a real
/// avatar; shown while a fetch is pending, failed, or disabled.
pub fn placeholder_avatar(size: u32) -> AvatarImage {
    let img = RgbImage::from_pixel(size, size, Rgb(PLACEHOLDER_GRAY));
    AvatarImage::from_image(&DynamicImage::ImageRgb8(img), size)
}

/// One terminal row of an avatar: each column folds two pixel rows into a
/// half-block cell. Masked-out pixels render as plain spaces.
fn avatar_row_spans(avatar: &AvatarImage, row: u32) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(avatar.size() as usize);
    for x in 0..avatar.size() {
        let top = avatar.pixel(x, row * 2);
        let bottom = avatar.pixel(x, row * 2 + 1);
        let span = match (top, bottom) {
            (Some(t), Some(b)) => Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(t.0, t.1, t.2))
                    .bg(Color::Rgb(b.0, b.1, b.2)),
            ),
            (Some(t), None) => Span::styled("▀", Style::default().fg(Color::Rgb(t.0, t.1, t.2))),
            (None, Some(b)) => Span::styled("▄", Style::default().fg(Color::Rgb(b.0, b.1, b.2))),
            (None, None) => Span::raw(" "),
        };
        spans.push(span);
    }
    spans
}

/// Card body: avatar rows flanked by a colored border, with the name and
/// status label beside them. Always `size/2 + 1` lines (trailing spacer).
pub fn card_text(name: &str, online: bool, avatar: &AvatarImage) -> Text<'static> {
    let rows = avatar.size() / 2;
    let mut lines = Vec::with_capacity(rows as usize + 1);
    for row in 0..rows {
        let mut spans = vec![Span::styled("▎", border_style(online))];
        spans.extend(avatar_row_spans(avatar, row));
        spans.push(Span::styled("▕", border_style(online)));
        spans.push(Span::raw("  "));
        if row == 1 {
            spans.push(Span::styled(name.to_string(), name_style(online)));
        } else if row == 2 {
            let label = if online { "Is Active" } else { "Offline" };
            spans.push(Span::styled(label, status_style()));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    Text::from(lines)
}

pub struct App {
    pub router: Router,
    pub profiles: &'static [Profile],
    pub selected: usize,
    avatars: AvatarCache,
    fetch_avatars: bool,
    placeholder_card: AvatarImage,
    placeholder_detail: AvatarImage,
    status_line: String,
}

impl App {
    pub fn new(config: &GlobalConfig) -> Self {
        Self {
            router: Router::new(),
            profiles: &ROSTER,
            selected: 0,
            avatars: AvatarCache::new(),
            fetch_avatars: config.fetch_avatars,
            placeholder_card: placeholder_avatar(CARD_AVATAR_PX),
            placeholder_detail: placeholder_avatar(DETAIL_AVATAR_PX),
            status_line: String::from("↑/↓ select · Enter open · q quit"),
        }
    }

    fn avatar_for(&self, url: &str, size: u32) -> AvatarImage {
        match self.avatars.get(url, size) {
            Some(AvatarEntry::Ready(img)) => img,
            // Pending, failed, or never requested: placeholder.
            _ => {
                if size == DETAIL_AVATAR_PX {
                    self.placeholder_detail.clone()
                } else {
                    self.placeholder_card.clone()
                }
            }
        }
    }

    fn request_visible_avatars(&self) {
        if !self.fetch_avatars {
            return;
        }
        match self.router.current() {
            Route::List => {
                for profile in self.profiles {
                    self.avatars.spawn_fetch(&profile.image_url, CARD_AVATAR_PX);
                }
            }
            Route::Detail(snap) => {
                self.avatars.spawn_fetch(&snap.image_url, DETAIL_AVATAR_PX);
            }
        }
    }

    /// Applies one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Char('q') {
            return true;
        }
        match self.router.current().clone() {
            Route::List => match code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.selected + 1 < self.profiles.len() {
                        self.selected += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(profile) = self.profiles.get(self.selected) {
                        let snap = ProfileSnapshot::of(profile);
                        self.status_line = format!("Viewing {}", snap.name);
                        self.router.navigate_to(Route::Detail(snap));
                        self.request_visible_avatars();
                    }
                }
                // Back at the root exits, the host convention for the
                // start screen; the router itself never pops its root.
                KeyCode::Esc => return true,
                KeyCode::Backspace => {
                    self.router.navigate_back();
                }
                _ => {}
            },
            Route::Detail(_) => match code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                    if self.router.navigate_back() {
                        self.status_line = String::from("↑/↓ select · Enter open · q quit");
                    }
                }
                _ => {}
            },
        }
        false
    }

    pub fn render(&self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(f.size());
        match self.router.current() {
            Route::List => self.render_list(f, chunks[0]),
            Route::Detail(snap) => self.render_detail(f, chunks[0], snap),
        }
        let footer = Paragraph::new(self.status_line.as_str()).style(status_style());
        f.render_widget(footer, chunks[1]);
    }

    fn render_list(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .profiles
            .iter()
            .map(|p| {
                let avatar = self.avatar_for(&p.image_url, CARD_AVATAR_PX);
                ListItem::new(card_text(&p.name, p.online, &avatar))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("List of Users"))
            .highlight_symbol("→ ");
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_detail(&self, f: &mut Frame<'_>, area: Rect, snap: &ProfileSnapshot) {
        let avatar = self.avatar_for(&snap.image_url, DETAIL_AVATAR_PX);
        let rows = avatar.size() / 2;
        let mut lines = Vec::with_capacity(rows as usize + 4);
        for row in 0..rows {
            let mut spans = vec![Span::styled("▎", border_style(snap.online))];
            spans.extend(avatar_row_spans(&avatar, row));
            spans.push(Span::styled("▕", border_style(snap.online)));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            snap.name.clone(),
            name_style(snap.online),
        )));
        lines.push(Line::from(Span::styled(
            snap.status_label(),
            status_style(),
        )));
        let body = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(snap.name.clone()),
            );
        f.render_widget(body, area);
    }
}

/// Launch the full-screen TUI and run its event loop until the user quits.
pub async fn launch_tui(config: &GlobalConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);
    app.request_visible_avatars();
    let tick = Duration::from_millis(config.tick_ms.max(10));

    let result = run_loop(&mut terminal, &mut app, tick);
    restore_terminal()?;
    result
}

fn run_loop(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f)).context("draw frame")?;
        if !event::poll(tick).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code) {
                return Ok(());
            }
        }
    }
}

pub fn setup_terminal() -> Result<ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>>
{
    use crossterm::execute;
    use crossterm::terminal::{EnterAlternateScreen, enable_raw_mode};
    use std::io::stdout;
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    Ok(ratatui::Terminal::new(backend)?)
}

pub fn restore_terminal() -> Result<()> {
    use crossterm::execute;
    use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
    use std::io::stdout;
    disable_raw_mode().context("disable raw mode")?;
    execute!(stdout(), LeaveAlternateScreen).context("leave alternate screen")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> App {
        let config = GlobalConfig {
            fetch_avatars: false,
            ..GlobalConfig::default()
        };
        App::new(&config)
    }

    #[test]
    fn enter_snapshots_the_selected_profile() {
        let mut app = offline_app();
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Enter);
        match app.router.current() {
            Route::Detail(snap) => {
                assert_eq!(snap.name, app.profiles[1].name);
                assert_eq!(snap.image_url, app.profiles[1].image_url);
                assert_eq!(snap.online, app.profiles[1].online);
            }
            other => panic!("expected detail frame, got {other:?}"),
        }
    }

    #[test]
    fn back_from_detail_restores_list_and_selection() {
        let mut app = offline_app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Esc);
        assert_eq!(*app.router.current(), Route::List);
        assert_eq!(app.selected, 2);
        assert_eq!(app.router.depth(), 1);
    }

    #[test]
    fn backspace_at_root_is_harmless() {
        let mut app = offline_app();
        let exit = app.handle_key(KeyCode::Backspace);
        assert!(!exit);
        assert_eq!(*app.router.current(), Route::List);
        assert_eq!(app.router.depth(), 1);
    }

    #[test]
    fn esc_at_root_exits_like_the_host_back_gesture() {
        let mut app = offline_app();
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn selection_stops_at_both_ends() {
        let mut app = offline_app();
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected, 0);
        for _ in 0..100 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected, app.profiles.len() - 1);
    }

    #[test]
    fn card_text_carries_name_label_and_spacer() {
        let avatar = placeholder_avatar(CARD_AVATAR_PX);
        let text = card_text("Michaela Runnings", true, &avatar);
        assert_eq!(text.lines.len(), (CARD_AVATAR_PX / 2) as usize + 1);
        let flat: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(flat[1].contains("Michaela Runnings"));
        assert!(flat[2].contains("Is Active"));
    }

    #[test]
    fn offline_card_is_dimmed_and_labelled_offline() {
        let avatar = placeholder_avatar(CARD_AVATAR_PX);
        let text = card_text("Joe Cresswell", false, &avatar);
        let name_span = text.lines[1]
            .spans
            .iter()
            .find(|s| s.content.contains("Joe Cresswell"))
            .expect("name span");
        assert!(name_span.style.add_modifier.contains(Modifier::DIM));
        let label: String = text.lines[2]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(label.contains("Offline"));
        assert!(!label.contains("Is Active"));
    }

    #[test]
    fn online_name_is_not_dimmed() {
        assert!(!name_style(true).add_modifier.contains(Modifier::DIM));
        assert!(name_style(false).add_modifier.contains(Modifier::DIM));
    }
}
