use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::{render_browser, render_typing};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// File browser - pick a file to practice
pub struct BrowserScreen;

impl Screen for BrowserScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let area = f.area();
        render_browser(app, area, f.buffer_mut());
    }
}

/// Typing screen - the current chunk, its insight panel and live stats
pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let area = f.area();
        render_typing(app, area, f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Browser => Box::new(BrowserScreen),
        AppState::Typing => Box::new(TypingScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::language::LanguageId;
    use crate::practice::Practice;
    use crate::project::{Project, ProjectFile};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn screens_draw_through_test_backend() {
        let project = Project::from_files(
            "demo",
            vec![ProjectFile::new("a.go", LanguageId::Go, "func main() {}")],
        );
        let mut app = App::new(Practice::new(project), Config::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|f| current_screen(&app.state).render(&app, f))
            .unwrap();
        let browser: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(browser.contains("a.go"));

        app.open_file(0);
        terminal
            .draw(|f| current_screen(&app.state).render(&app, f))
            .unwrap();
        let typing: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(typing.contains("Function: main"));
    }
}
