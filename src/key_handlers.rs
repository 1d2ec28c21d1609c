use crate::app::{App, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => app.submit(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'n' => app.reset(),
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn typing_edits_the_input_buffer() {
        let (mut app, _rx) = App::new(&Config::default());

        handle_chat_input(key(KeyCode::Char('h')), &mut app);
        handle_chat_input(key(KeyCode::Char('i')), &mut app);
        assert_eq!(app.input, "hi");

        handle_chat_input(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.input, "h");
    }

    #[tokio::test]
    async fn ctrl_n_starts_a_new_chat() {
        let (mut app, _rx) = App::new(&Config::default());
        app.messages.push(crate::models::Message::user("old"));

        handle_chat_input(ctrl('n'), &mut app);
        assert!(app.messages.is_empty());
    }

    #[tokio::test]
    async fn escape_then_no_returns_to_chat() {
        let (mut app, _rx) = App::new(&Config::default());

        handle_chat_input(key(KeyCode::Esc), &mut app);
        assert_eq!(app.state, AppState::QuitConfirm);

        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut app);
        assert_eq!(app.state, AppState::Chat);

        handle_chat_input(ctrl('c'), &mut app);
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut app);
        assert_eq!(app.state, AppState::Quit);
    }
}
