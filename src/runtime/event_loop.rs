use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::warn;

use crate::app::{App, Screen};
use crate::audio::Backend;
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// The left button went down on the progress gauge and has not been released.
    pub mouse_seeking: bool,
    /// Area of the last drawn frame, used to hit-test mouse events.
    pub last_area: Rect,
}

/// Main terminal event loop: draws, runs per-frame housekeeping and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run<B: Backend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick();

        let frame = terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;
        state.last_area = frame.area;

        if event::poll(Duration::from_millis(50))? {
            let quit = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, settings, app, state)
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, app, state);
                    false
                }
                _ => false,
            };
            if quit {
                break;
            }
        }
    }

    app.close_player();
    Ok(())
}

fn handle_key_event<B: Backend>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<B>,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('q') {
        return true;
    }

    match app.screen {
        Screen::Library => handle_library_key(key, app, state),
        Screen::Player(_) => handle_player_key(key, settings, app),
    }
    false
}

fn handle_library_key<B: Backend>(key: KeyEvent, app: &mut App<B>, state: &mut EventLoopState) {
    match key.code {
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.library.first();
            } else {
                state.pending_gg = true;
            }
            return;
        }
        KeyCode::Char('G') => app.library.last(),
        KeyCode::Char('j') | KeyCode::Down => app.library.next(),
        KeyCode::Char('k') | KeyCode::Up => app.library.prev(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
    state.pending_gg = false;
}

fn handle_player_key<B: Backend>(key: KeyEvent, settings: &config::Settings, app: &mut App<B>) {
    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
    let Some(player) = app.player_mut() else {
        return;
    };

    let result = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle(),
        KeyCode::Char('l') => player.next(),
        KeyCode::Char('h') => player.prev(),
        KeyCode::Char('L') => {
            player.nudge(scrub);
            Ok(())
        }
        KeyCode::Char('H') => {
            player.nudge(-scrub);
            Ok(())
        }
        KeyCode::Enter => player.seek_release().map(|_| ()),
        KeyCode::Esc | KeyCode::Backspace => {
            if player.progress().dragging {
                player.seek_cancel();
            } else {
                app.close_player();
            }
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(err) = &result {
        warn!(error = %err, "transport action failed");
    }
    app.report(result);
}

fn handle_mouse_event<B: Backend>(mouse: MouseEvent, app: &mut App<B>, state: &mut EventLoopState) {
    let body = ui::areas(state.last_area).body;
    let (_, gauge) = ui::player_areas(body);
    let Some(player) = app.player_mut() else {
        state.mouse_seeking = false;
        return;
    };

    let max = player.progress().max;
    let value = ui::gauge_position(gauge, mouse.column, max);
    let on_gauge = gauge.contains((mouse.column, mouse.row).into());

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if on_gauge => {
            state.mouse_seeking = true;
            player.seek_press(value);
        }
        MouseEventKind::Drag(MouseButton::Left) if state.mouse_seeking => {
            player.seek_drag(value);
        }
        MouseEventKind::Up(MouseButton::Left) if state.mouse_seeking => {
            state.mouse_seeking = false;
            player.seek_drag(value);
            let result = player.seek_release().map(|_| ());
            app.report(result);
        }
        _ => {}
    }
}
