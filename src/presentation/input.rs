use crate::application::{App, SocialProvider};
use crate::domain::{SubmissionState, Tab};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.tab() {
            Tab::Home => Self::handle_home_tab(app, key),
            Tab::Register => Self::handle_register_tab(app, key, modifiers),
        }
    }

    fn handle_home_tab(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('2') => {
                app.get_started();
            }
            KeyCode::Char('1') | KeyCode::Left => {
                app.select_tab(Tab::Home);
            }
            KeyCode::Char('g') => app.social_login(SocialProvider::Google),
            KeyCode::Char('a') => app.social_login(SocialProvider::Apple),
            KeyCode::Char('f') => app.social_login(SocialProvider::Facebook),
            _ => {}
        }
    }

    fn handle_register_tab(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('v') {
                Self::paste_clipboard(app);
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                if matches!(app.submission(), SubmissionState::Failed(_)) {
                    app.dismiss_error();
                } else {
                    app.select_tab(Tab::Home);
                }
            }
            KeyCode::Tab | KeyCode::Down => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
            KeyCode::Enter => {
                let attempt = app.submit();
                tracing::debug!(?attempt, "submit key pressed");
            }
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(c) => app.type_char(c),
            _ => {}
        }
    }

    fn paste_clipboard(app: &mut App) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => app.paste(&text),
            Err(err) => tracing::warn!(error = %err, "clipboard paste failed"),
        }
    }
}
