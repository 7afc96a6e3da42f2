use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mcq_studio::models::{AppState, Studio};
use mcq_studio::{logger, session, ui, worker};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc;
use std::time::Duration;

fn main() -> io::Result<()> {
    logger::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (request_tx, request_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    worker::spawn_gen_worker(event_tx, request_rx);

    let mut studio = Studio::new(request_tx, event_rx);
    let mut app_state = AppState::Form;
    // Screen to return to when a confirmation popup is dismissed.
    let mut underlying = AppState::Form;

    loop {
        while let Ok(gen_event) = studio.try_recv_gen_event() {
            studio.process_gen_event(gen_event);
        }

        terminal.draw(|f| match app_state {
            AppState::Form => ui::draw_form(f, &studio),
            AppState::Editor => ui::draw_editor(f, &studio),
            AppState::ClearConfirm => {
                match underlying {
                    AppState::Editor => ui::draw_editor(f, &studio),
                    _ => ui::draw_form(f, &studio),
                }
                ui::draw_clear_confirmation(f, studio.records.len());
            }
            AppState::QuitConfirm => {
                match underlying {
                    AppState::Editor => ui::draw_editor(f, &studio),
                    _ => ui::draw_form(f, &studio),
                }
                ui::draw_quit_confirmation(f);
            }
        })?;

        // Short poll so worker events are drained between keystrokes.
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match app_state {
                AppState::Form => {
                    underlying = AppState::Form;
                    session::handle_form_input(&mut studio, key, &mut app_state);
                }
                AppState::Editor => {
                    underlying = AppState::Editor;
                    session::handle_editor_input(&mut studio, key, &mut app_state);
                }
                AppState::ClearConfirm => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        studio.clear_records();
                        app_state = AppState::Form;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        app_state = underlying;
                    }
                    _ => {}
                },
                AppState::QuitConfirm => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => break,
                    KeyCode::Char('n') | KeyCode::Esc => {
                        app_state = underlying;
                    }
                    _ => {}
                },
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
