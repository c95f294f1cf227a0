pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::session::Phase;
use crate::stats::{AccuracyBand, Statistics};

const HORIZONTAL_MARGIN: u16 = 2;
const LINE_NUMBER_WIDTH: usize = 5;
const NEWLINE_MARKER: &str = "↵";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Browser => render_browser(self, area, buf),
            AppState::Typing => render_typing(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// First row to show so that `focus` stays near the middle of `height` rows.
fn scroll_offset(focus: usize, total: usize, height: usize) -> usize {
    if total <= height {
        return 0;
    }
    focus.saturating_sub(height / 2).min(total - height)
}

pub fn render_browser(app: &App, area: Rect, buf: &mut Buffer) {
    let project = app.practice.project();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled("codetype", bold().fg(Color::Magenta)),
        Span::raw("  "),
        Span::styled(project.name().to_string(), bold()),
        Span::styled(
            format!(
                "  {}/{} files complete",
                project.completed_files(),
                project.len()
            ),
            dim(),
        ),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    let path_width = project
        .files()
        .iter()
        .map(|f| f.display_path().width())
        .max()
        .unwrap_or(0);

    let height = chunks[1].height as usize;
    let offset = scroll_offset(app.browser_cursor, project.len(), height);
    let rows: Vec<Line> = project
        .files()
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(idx, file)| {
            let selected = idx == app.browser_cursor;
            let path = file.display_path();
            let padding = " ".repeat(path_width.saturating_sub(path.width()));
            let marker = if file.is_completed() {
                Span::styled("✓ ", bold().fg(Color::Green))
            } else {
                Span::raw("  ")
            };
            let path_style = if selected {
                bold().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(if selected { "> " } else { "  " }),
                marker,
                Span::styled(format!("{path}{padding}"), path_style),
                Span::styled(format!("  {:<10}", file.language.to_string()), dim()),
                Span::styled(
                    format!("{}/{} sections", file.completed_count(), file.chunks.len()),
                    dim(),
                ),
            ])
        })
        .collect();
    Paragraph::new(rows).render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(↑/↓) select / (enter) practice / (esc) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[2], buf);
}

pub fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(file) = app.practice.selected_file() else {
        Paragraph::new("No file selected")
            .alignment(Alignment::Center)
            .render(area, buf);
        return;
    };
    let chunk = app.practice.current_chunk();
    let chunk_count = app.practice.chunk_count();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if chunk_count > 1 { 1 } else { 0 }), // chunk selector
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(file.display_path(), bold()),
        Span::styled(format!("  [{}]", file.language), dim()),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    if chunk_count > 1 {
        render_chunk_selector(app, chunks[1], buf);
    }

    if let Some(chunk) = chunk {
        let insight = vec![
            Line::from(Span::styled(chunk.title.clone(), bold().fg(Color::Cyan))),
            Line::from(Span::styled(
                format!(
                    "Lines {}-{} ({} lines)",
                    chunk.start_line,
                    chunk.end_line,
                    chunk.line_count()
                ),
                dim(),
            )),
            Line::from(chunk.description.clone()),
        ];
        Paragraph::new(insight)
            .block(Block::default().borders(Borders::ALL).title(" Insight "))
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
    }

    render_code(app, chunks[3], buf);
    render_stats(app, &app.practice.statistics(), chunks[4], buf);

    Paragraph::new(Span::styled(
        "(esc) files / (F2) stop on error / (F3) line numbers / (F5) reset / (pgup/pgdn) section",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);

    if app.banner().is_some() {
        render_banner(app, area, buf);
    }
}

fn render_chunk_selector(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(file) = app.practice.selected_file() else {
        return;
    };
    let current = app.practice.chunk_index();

    let mut spans = vec![Span::styled(
        format!("Section {} / {}  ", current + 1, file.chunks.len()),
        bold(),
    )];
    spans.extend(file.chunks.iter().enumerate().map(|(idx, chunk)| {
        let style = if idx == current {
            bold().fg(Color::Black).bg(Color::Cyan)
        } else if file.is_chunk_completed(&chunk.id) {
            Style::default().fg(Color::Green)
        } else {
            dim()
        };
        Span::styled(format!(" {} ", idx + 1), style)
    }));
    Paragraph::new(Line::from(spans)).render(area, buf);
}

/// Lines of the chunk as (first char index, chars) pairs.
fn split_lines(content: &[char]) -> Vec<(usize, &[char])> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (idx, &c) in content.iter().enumerate() {
        if c == '\n' {
            lines.push((start, &content[start..=idx]));
            start = idx + 1;
        }
    }
    if start < content.len() || lines.is_empty() {
        lines.push((start, &content[start..]));
    }
    lines
}

fn render_code(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.practice.session();
    let state = session.state();
    let content = session.content();
    let finished = session.phase() == Phase::Completed;
    let start_line = app.practice.current_chunk().map_or(1, |c| c.start_line);
    let tab = " ".repeat(app.config.tab_width as usize);

    let lines = split_lines(content);
    let cursor_line = lines
        .iter()
        .rposition(|(start, _)| *start <= state.cursor)
        .unwrap_or(0);

    let height = area.height as usize;
    let offset = scroll_offset(cursor_line, lines.len(), height);

    let rendered: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(line_idx, (start, chars))| {
            let mut spans = Vec::with_capacity(chars.len() + 1);
            if app.config.show_line_numbers {
                let style = if line_idx == cursor_line {
                    Style::default().fg(Color::Cyan)
                } else {
                    dim()
                };
                spans.push(Span::styled(
                    format!("{:>width$} ", start_line + line_idx, width = LINE_NUMBER_WIDTH - 1),
                    style,
                ));
            }

            for (offset_in_line, &c) in chars.iter().enumerate() {
                let idx = start + offset_in_line;
                let typed = idx < state.cursor;
                let is_error = state.is_error(idx);
                let style = if typed && is_error {
                    bold().fg(Color::Red)
                } else if typed {
                    bold().fg(Color::Green)
                } else if idx == state.cursor && !finished {
                    dim().add_modifier(Modifier::UNDERLINED | Modifier::REVERSED)
                } else {
                    dim()
                };
                let text = match c {
                    '\n' => NEWLINE_MARKER.to_string(),
                    '\t' => tab.clone(),
                    ' ' if typed && is_error => "·".to_string(),
                    c => c.to_string(),
                };
                spans.push(Span::styled(text, style));
            }
            Line::from(spans)
        })
        .collect();

    Paragraph::new(rendered).render(area, buf);
}

fn accuracy_color(stats: &Statistics) -> Color {
    match stats.accuracy_band() {
        AccuracyBand::Good => Color::Green,
        AccuracyBand::Fair => Color::Yellow,
        AccuracyBand::Poor => Color::Red,
    }
}

fn render_stats(app: &App, stats: &Statistics, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled("WPM ", dim()),
        Span::styled(stats.wpm.to_string(), bold().fg(Color::Magenta)),
        Span::styled("   Accuracy ", dim()),
        Span::styled(
            format!("{}%", stats.accuracy),
            bold().fg(accuracy_color(stats)),
        ),
        Span::styled("   Time ", dim()),
        Span::styled(stats.format_elapsed(), bold()),
        Span::styled("   Progress ", dim()),
        Span::styled(
            format!(
                "{}/{} ({}%)",
                stats.typed_chars, stats.total_chars, stats.progress
            ),
            bold(),
        ),
        Span::styled("   Stop on error ", dim()),
        Span::styled(
            if app.config.stop_on_error { "on" } else { "off" },
            bold(),
        ),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_banner(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(done) = app.banner() else {
        return;
    };
    let stats = &done.statistics;
    let headline = if done.file_completed {
        "File Complete!"
    } else {
        "Section Complete!"
    };
    let hint = if done.has_next {
        "(pgdn) next section / (F5) retry / (esc) files"
    } else {
        "(F5) retry / (esc) files"
    };

    let text = vec![
        Line::from(Span::styled(headline, bold().fg(Color::Green))),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} wpm", stats.wpm), bold()),
            Span::raw("   "),
            Span::styled(
                format!("{}% acc", stats.accuracy),
                bold().fg(accuracy_color(stats)),
            ),
            Span::raw("   "),
            Span::styled(stats.format_elapsed(), bold()),
        ]),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::ITALIC))),
    ];

    let rect = centered(area, 52, 7);
    Clear.render(rect, buf);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(rect, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::language::LanguageId;
    use crate::practice::Practice;
    use crate::project::{Project, ProjectFile};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app_with(files: Vec<ProjectFile>) -> App {
        App::new(
            Practice::new(Project::from_files("demo", files)),
            Config::default(),
        )
    }

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn type_all(app: &mut App, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
        }
    }

    #[test]
    fn browser_lists_files_with_languages() {
        let app = app_with(vec![
            ProjectFile::new("src/main.rs", LanguageId::Rust, "fn main() {}"),
            ProjectFile::new("app.py", LanguageId::Python, "print(1)"),
        ]);
        let screen = render_to_string(&app, 80, 10);
        assert!(screen.contains("demo"));
        assert!(screen.contains("src/main.rs"));
        assert!(screen.contains("python"));
        assert!(screen.contains("0/2 files complete"));
    }

    #[test]
    fn typing_screen_shows_insight_and_code() {
        let mut app = app_with(vec![ProjectFile::new(
            "lib.rs",
            LanguageId::Rust,
            "fn area(w: u32) -> u32 {\n    w * 2\n}",
        )]);
        app.open_file(0);

        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("lib.rs"));
        assert!(screen.contains("Complete File"));
        assert!(screen.contains("1 function"));
        assert!(screen.contains("fn area"));
        assert!(screen.contains(NEWLINE_MARKER));
        assert!(screen.contains("Stop on error"));
    }

    #[test]
    fn line_numbers_follow_config() {
        let mut app = app_with(vec![ProjectFile::new(
            "a.txt",
            LanguageId::PlainText,
            "alpha\nbeta",
        )]);
        app.open_file(0);
        assert!(render_to_string(&app, 60, 16).contains("   2 beta"));

        app.config.show_line_numbers = false;
        assert!(!render_to_string(&app, 60, 16).contains("   2 beta"));
    }

    #[test]
    fn completion_banner_appears() {
        let mut app = app_with(vec![ProjectFile::new("a.txt", LanguageId::PlainText, "ok")]);
        app.open_file(0);
        type_all(&mut app, "ok");

        let screen = render_to_string(&app, 80, 24);
        assert!(screen.contains("File Complete!"));
        assert!(screen.contains("100% acc"));
    }

    #[test]
    fn section_banner_and_selector_for_multi_chunk_files() {
        let body: String = (0..90).map(|i| format!("v{i} = {i};\n")).collect();
        let mut app = app_with(vec![ProjectFile::new("long.txt", LanguageId::PlainText, &body)]);
        app.open_file(0);
        let first = app.practice.current_chunk().unwrap().content.clone();
        type_all(&mut app, &first);

        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Section 1 / 3"));
        assert!(screen.contains("Section Complete!"));
        assert!(screen.contains("(pgdn) next section"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut app = app_with(vec![ProjectFile::new("a.txt", LanguageId::PlainText, "ok")]);
        render_to_string(&app, 5, 3);
        app.open_file(0);
        type_all(&mut app, "ok");
        render_to_string(&app, 5, 3);
        render_to_string(&app, 1, 1);
    }

    #[test]
    fn scroll_keeps_focus_in_view() {
        assert_eq!(scroll_offset(3, 5, 10), 0);
        assert_eq!(scroll_offset(50, 100, 10), 45);
        assert_eq!(scroll_offset(99, 100, 10), 90);
    }

    #[test]
    fn split_lines_keeps_newlines_with_their_line() {
        let chars: Vec<char> = "ab\ncd".chars().collect();
        let lines = split_lines(&chars);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, 0);
        assert_eq!(lines[0].1, &['a', 'b', '\n']);
        assert_eq!(lines[1].0, 3);
    }
}
