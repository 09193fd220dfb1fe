//! Rendering of the chat screen, sidebar and static pages

use neuronest_core::{Role, Section, Tab};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::tui::TuiApp;

const SIDEBAR_WIDTH: u16 = 18;
const ACCENT: Color = Color::Indexed(99);
const PLACEHOLDER: &str = "Ask me anything...";

const SUGGESTIONS: [&str; 3] = [
    "Experience Premium General Health Checkups",
    "Painless Injections with Expert Care",
    "Trusted Vaccination for Every Age",
];

/// Copy for the sections that have no interactive content yet
struct Page {
    title: &'static str,
    lead: &'static str,
    detail: &'static str,
}

const HISTORY_PAGE: Page = Page {
    title: "Your Interaction History",
    lead: "This section will display your past conversations and generated content.",
    detail: "Stay tuned for updates to manage and review your AI interactions efficiently!",
};

const SETTINGS_PAGE: Page = Page {
    title: "Application Settings",
    lead: "Customize your AI experience here.",
    detail: "Options for themes, preferences, and account management will be available soon.",
};

const PROFILE_PAGE: Page = Page {
    title: "User Profile",
    lead: "Manage your profile information and account details.",
    detail: "Update your personal settings and view your subscription status.",
};

const INFO_PAGE: Page = Page {
    title: "About This AI Assistant",
    lead: "Learn more about the features and capabilities of this application.",
    detail: "Find FAQs, support contacts, and version information here.",
};

pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(frame.area());

    draw_sidebar(frame, columns[0], app.controller().session().section());

    match app.controller().session().section() {
        Section::Home | Section::NewChat => draw_chat(frame, columns[1], app),
        Section::History => draw_page(frame, columns[1], &HISTORY_PAGE),
        Section::Settings => draw_page(frame, columns[1], &SETTINGS_PAGE),
        Section::Profile => draw_page(frame, columns[1], &PROFILE_PAGE),
        Section::Info => draw_page(frame, columns[1], &INFO_PAGE),
    }
}

fn sidebar_line(key: &str, label: &str, active: bool) -> Line<'static> {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(format!("{:>3} ", key), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {:<10}", label), style),
    ])
}

fn draw_sidebar(frame: &mut Frame, area: Rect, active: Section) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "NeuroNest",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let top = vec![
        sidebar_line("F1", "Home", active.shows_chat()),
        Line::default(),
        sidebar_line("F2", "History", active == Section::History),
        Line::default(),
        sidebar_line("F3", "Settings", active == Section::Settings),
    ];
    let bottom = vec![
        sidebar_line("F4", "Profile", active == Section::Profile),
        sidebar_line("F5", "Info", active == Section::Info),
    ];

    frame.render_widget(Paragraph::new(top), rows[0]);
    frame.render_widget(Paragraph::new(bottom), rows[1]);
}

fn draw_page(frame: &mut Frame, area: Rect, page: &Page) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            page.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(page.lead),
        Line::default(),
        Line::from(Span::styled(page.detail, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_chat(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(5),
        ])
        .split(area);

    let session = app.controller().session();
    if session.is_empty() {
        draw_greeting(frame, rows[0], app.user_name());
    } else {
        draw_conversation(frame, rows[0], app);
    }
    draw_tabs(frame, rows[1], session.tab());
    draw_input(frame, rows[2], app);
}

fn draw_greeting(frame: &mut Frame, area: Rect, user_name: &str) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Hi there, {}", user_name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "How can I help you today?",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
    ];
    for suggestion in SUGGESTIONS {
        lines.push(Line::from(vec![
            Span::styled("◆ ", Style::default().fg(ACCENT)),
            Span::raw(suggestion),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn conversation_lines(app: &TuiApp) -> Vec<Line<'static>> {
    let session = app.controller().session();
    let mut lines = Vec::new();
    for turn in session.turns() {
        let color = match turn.role() {
            Role::User => Color::Cyan,
            Role::Model => Color::Green,
        };
        lines.push(Line::from(Span::styled(
            turn.role().label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for text_line in turn.text().lines() {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::default());
    }
    if session.is_loading() {
        lines.push(Line::from(Span::styled(
            "◌ Thinking...",
            Style::default().fg(ACCENT),
        )));
    }
    lines
}

/// Rows the conversation occupies once word-wrapped to `width` columns
fn wrapped_height(lines: &[Line<'static>], width: u16) -> u16 {
    let rows = Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1));
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_conversation(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("conversation · {}", app.controller().model()));
    let inner = block.inner(area);
    let lines = conversation_lines(app);

    let max_top = wrapped_height(&lines, inner.width).saturating_sub(inner.height);
    let top = max_top.saturating_sub(app.scroll_back());

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((top, 0)),
        area,
    );
}

fn draw_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.label()))
        .select(active.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("topics (Tab / Shift+Tab)"),
        );
    frame.render_widget(tabs, area);
}

/// Draft text broken into rows of at most `width` columns, plus the cursor
/// position (row, column) just after the last character
struct InputLayout {
    rows: Vec<String>,
    cursor: (usize, usize),
}

impl InputLayout {
    fn new(input: &str, width: u16) -> Self {
        let width = usize::from(width.max(1));
        let mut rows = Vec::new();
        for line in input.split('\n') {
            let mut row = String::new();
            let mut row_width = 0;
            for ch in line.chars() {
                let ch_width = Span::raw(ch.to_string()).width();
                if row_width + ch_width > width && !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(ch);
                row_width += ch_width;
            }
            rows.push(row);
        }

        let last = rows.len() - 1;
        let last_width = Span::raw(rows[last].as_str()).width();
        let cursor = if last_width >= width {
            (last + 1, 0)
        } else {
            (last, last_width)
        };
        Self { rows, cursor }
    }

    /// First row to show so the cursor stays inside `height` visible rows
    fn scroll_top(&self, height: u16) -> usize {
        (self.cursor.0 + 1).saturating_sub(usize::from(height.max(1)))
    }
}

fn draw_input(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let controller = app.controller();
    let title = if controller.is_loading() {
        "Thinking... (send disabled)"
    } else {
        "message (Enter send, Shift+Enter newline)"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    let input = controller.input();
    if input.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(placeholder.block(block), area);
        frame.set_cursor_position((inner.x, inner.y));
        return;
    }

    let layout = InputLayout::new(input, inner.width);
    let top = layout.scroll_top(inner.height);
    let lines: Vec<Line> = layout.rows.iter().map(|row| Line::from(row.as_str())).collect();
    let top_row = u16::try_from(top).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).block(block).scroll((top_row, 0)), area);

    let (row, column) = layout.cursor;
    let y = u16::try_from(row - top).unwrap_or(u16::MAX);
    let x = u16::try_from(column).unwrap_or(u16::MAX);
    frame.set_cursor_position((
        inner.x.saturating_add(x).min(inner.right().saturating_sub(1)),
        inner.y.saturating_add(y).min(inner.bottom().saturating_sub(1)),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn render(app: &TuiApp) -> String {
        render_sized(app, 110, 32)
    }

    fn render_sized(app: &TuiApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn send(app: &mut TuiApp, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_empty_chat_shows_greeting_and_placeholder() {
        let app = TuiApp::new(test_support::controller("unused"), "Sam".to_string());
        let screen = render(&app);

        assert!(screen.contains("Hi there, Sam"));
        assert!(screen.contains("How can I help you today?"));
        assert!(screen.contains("Trusted Vaccination for Every Age"));
        assert!(screen.contains("Ask me anything..."));
        assert!(screen.contains("Blood Test"));
        assert!(screen.contains("IV Drip"));
    }

    #[tokio::test]
    async fn test_conversation_shows_labels_and_thinking() {
        let mut app = TuiApp::new(test_support::controller("Hi back"), "Sam".to_string());
        send(&mut app, "Hi");

        let pending = render(&app);
        assert!(pending.contains("You:"));
        assert!(pending.contains("Thinking..."));
        assert!(pending.contains("send disabled"));
        assert!(!pending.contains("Hi there, Sam"));

        tokio::time::timeout(Duration::from_secs(1), async {
            while app.controller().is_loading() {
                tokio::task::yield_now().await;
                app.tick();
            }
        })
        .await
        .unwrap();

        let settled = render(&app);
        assert!(settled.contains("AI:"));
        assert!(settled.contains("Hi back"));
        assert!(!settled.contains("Thinking..."));
    }

    #[tokio::test]
    async fn test_static_pages_render_their_copy() {
        let mut app = TuiApp::new(test_support::controller("unused"), "Sam".to_string());

        app.handle_key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE));
        assert!(render(&app).contains("Your Interaction History"));

        app.handle_key(KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE));
        assert!(render(&app).contains("Application Settings"));

        app.handle_key(KeyEvent::new(KeyCode::F(4), KeyModifiers::NONE));
        assert!(render(&app).contains("User Profile"));

        app.handle_key(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE));
        let screen = render(&app);
        assert!(screen.contains("About This AI Assistant"));
        assert!(!screen.contains("Ask me anything..."));
    }

    #[test]
    fn test_wrapped_height_counts_word_wrapping() {
        let lines = vec![Line::from("abcdefghij"), Line::default(), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 100), 3);

        // two 7-column words never share a 10-column row
        let words = vec![Line::from("abcdefg abcdefg abcdefg")];
        assert_eq!(wrapped_height(&words, 10), 3);
    }

    #[tokio::test]
    async fn test_long_reply_tail_visible_in_narrow_terminal() {
        let reply = format!("{}ZULUEND", "abcdefghijk ".repeat(14));
        let mut app = TuiApp::new(test_support::controller(reply), "Sam".to_string());
        send(&mut app, "hi");
        tokio::time::timeout(Duration::from_secs(1), async {
            while app.controller().is_loading() {
                tokio::task::yield_now().await;
                app.tick();
            }
        })
        .await
        .unwrap();

        assert_eq!(app.scroll_back(), 0);
        let screen = render_sized(&app, 40, 24);
        assert!(screen.contains("ZULUEND"), "{}", screen);

        app.handle_key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        assert!(render_sized(&app, 40, 24).contains("ZULUEND"));
    }

    #[test]
    fn test_input_layout_wraps_and_tracks_cursor() {
        let layout = InputLayout::new("abcdefgh", 5);
        assert_eq!(layout.rows, vec!["abcde", "fgh"]);
        assert_eq!(layout.cursor, (1, 3));

        let full = InputLayout::new("abcde", 5);
        assert_eq!(full.cursor, (1, 0));

        let lines = InputLayout::new("one\ntwo\n", 10);
        assert_eq!(lines.rows, vec!["one", "two", ""]);
        assert_eq!(lines.cursor, (2, 0));
    }

    #[test]
    fn test_input_layout_scrolls_to_cursor() {
        let layout = InputLayout::new("a\nb\nc\nd\ne", 10);
        assert_eq!(layout.cursor, (4, 1));
        assert_eq!(layout.scroll_top(3), 2);
        assert_eq!(layout.scroll_top(10), 0);
    }

    #[tokio::test]
    async fn test_long_draft_keeps_last_row_visible() {
        let mut app = TuiApp::new(test_support::controller("unused"), "Sam".to_string());
        for ch in format!("{}TAILMARK", "word ".repeat(60)).chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        assert!(render_sized(&app, 60, 24).contains("TAILMARK"));
    }
}
