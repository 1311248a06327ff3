use ratatui::widgets::ListState;
use tui::{InteractiveApp, Mode};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode};
use games::carioca;

mod games;
mod tui;

#[derive(Parser)]
#[command(version, about = "Single screen score tracker for Carioca Chilena", long_about = None)]
struct Args {}

// Keep the list selection pointing at a live player after removals
fn fix_selection(app: &mut InteractiveApp) {
    if app.state.players.is_empty() {
        app.players_state.select(None);
    } else if let Some(idx) = app.players_state.selected() {
        if idx >= app.state.players.len() {
            app.players_state.select(Some(app.state.players.len() - 1));
        }
    }
}

fn run_interactive() {
    color_eyre::install().unwrap();
    let mut terminal = ratatui::init();

    let mut app = InteractiveApp {
        state: carioca::State::new(),
        mode: Mode::Browse,
        input: String::new(),
        players_state: ListState::default(),
        show_table: false,
    };

    loop {
        terminal.draw(|frame| {
            frame.render_widget(app.clone(), frame.area());
        }).unwrap();

        match event::read().unwrap() {
            Event::Key(key_event) => {
                match app.mode {
                    Mode::Browse => {
                        match key_event.code {
                            KeyCode::Char('q') => {
                                break;
                            },
                            KeyCode::Char('a') => {
                                app.input.clear();
                                app.mode = Mode::NameEntry;
                            },
                            KeyCode::Char('d') => {
                                let selected = app.selected_player().map(|p| p.id);
                                if let Some(id) = selected {
                                    carioca::remove_player(&mut app.state, id);
                                    fix_selection(&mut app);
                                }
                            },
                            KeyCode::Enter => {
                                let current = app.selected_player().map(|p| p.scores[app.state.round]);
                                if let Some(score) = current {
                                    app.input = score.to_string();
                                    app.mode = Mode::ScoreEntry;
                                }
                            },
                            KeyCode::Down => {
                                if let Some(idx) = app.players_state.selected() {
                                    if idx < app.state.players.len().saturating_sub(1) {
                                        app.players_state.select_next();
                                    }
                                } else if !app.state.players.is_empty() {
                                    app.players_state.select_first();
                                }
                            },
                            KeyCode::Up => {
                                if let Some(_) = app.players_state.selected() {
                                    app.players_state.select_previous();
                                } else if !app.state.players.is_empty() {
                                    app.players_state.select_first();
                                }
                            },
                            KeyCode::Left => {
                                carioca::previous_round(&mut app.state);
                            },
                            KeyCode::Right => {
                                carioca::next_round(&mut app.state);
                            },
                            KeyCode::Char('t') => {
                                app.show_table = !app.show_table;
                            },
                            KeyCode::Char('i') => {
                                app.mode = Mode::Rules;
                            },
                            KeyCode::Char('r') => {
                                app.mode = Mode::ConfirmReset;
                            },
                            _ => {}
                        }
                    },
                    Mode::NameEntry => {
                        match key_event.code {
                            KeyCode::Enter => {
                                carioca::add_player(&mut app.state, &app.input);
                                app.input.clear();
                                app.mode = Mode::Browse;
                                if app.players_state.selected().is_none() && !app.state.players.is_empty() {
                                    app.players_state.select_first();
                                }
                            },
                            KeyCode::Backspace => {
                                app.input.pop();
                            },
                            KeyCode::Esc => {
                                app.input.clear();
                                app.mode = Mode::Browse;
                            },
                            KeyCode::Char(c) => {
                                app.input.push(c);
                            },
                            _ => {}
                        }
                    },
                    Mode::ScoreEntry => {
                        match key_event.code {
                            KeyCode::Enter => {
                                let selected = app.selected_player().map(|p| p.id);
                                if let Some(id) = selected {
                                    // Anything that does not parse counts as zero
                                    let value = app.input.trim().parse::<i32>().unwrap_or(0);
                                    let round = app.state.round;
                                    carioca::set_score(&mut app.state, id, round, value);
                                }
                                app.input.clear();
                                app.mode = Mode::Browse;
                            },
                            KeyCode::Backspace => {
                                app.input.pop();
                            },
                            KeyCode::Esc => {
                                app.input.clear();
                                app.mode = Mode::Browse;
                            },
                            KeyCode::Char(c) => {
                                if c.is_ascii_digit() || (c == '-' && app.input.is_empty()) {
                                    app.input.push(c);
                                }
                            },
                            _ => {}
                        }
                    },
                    Mode::ConfirmReset => {
                        // While the popup is open, only confirm and cancel work
                        match key_event.code {
                            KeyCode::Char('y') => {
                                carioca::reset(&mut app.state);
                                app.players_state.select(None);
                                app.mode = Mode::Browse;
                            },
                            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                                app.mode = Mode::Browse;
                            },
                            _ => {}
                        }
                    },
                    Mode::Rules => {
                        match key_event.code {
                            KeyCode::Char('q') | KeyCode::Char('i') | KeyCode::Esc => {
                                app.mode = Mode::Browse;
                            },
                            _ => {}
                        }
                    },
                }
            },
            _ => {}
        };
    }

    ratatui::restore();
}

fn main() {
    env_logger::init();
    let _args = Args::parse();

    run_interactive();
}
