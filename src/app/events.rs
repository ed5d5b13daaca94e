use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::state::{SearchOutcome, Ticket};
use crate::fetch::Asset;

/// Keyboard intent, decoupled from crossterm so the controller can be driven in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Type(char),
    Backspace,
    ClearQuery,
    PrevPage,
    NextPage,
    RefreshNow,
    Redraw,
    Quit,
}

/// Everything the controller loop reacts to besides its own timers.
#[derive(Debug)]
pub enum AppEvent {
    Command(UserCommand),
    Refreshed {
        ticket: Ticket,
        data: Option<Vec<Asset>>,
    },
    Searched {
        ticket: Ticket,
        outcome: SearchOutcome,
    },
}

pub fn map_key(key: KeyEvent) -> Option<UserCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(UserCommand::Quit),
        KeyCode::Char('c') if ctrl => Some(UserCommand::Quit),
        KeyCode::Char('u') if ctrl => Some(UserCommand::ClearQuery),
        KeyCode::Char('r') if ctrl => Some(UserCommand::RefreshNow),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(ch) => Some(UserCommand::Type(ch)),
        KeyCode::Backspace => Some(UserCommand::Backspace),
        KeyCode::Left | KeyCode::PageUp => Some(UserCommand::PrevPage),
        KeyCode::Right | KeyCode::PageDown => Some(UserCommand::NextPage),
        _ => None,
    }
}

/// Read terminal input on a dedicated thread and forward it to the controller.
///
/// The thread exits once the controller drops its receiver.
pub fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    warn!("Terminal input error: {}", err);
                    break;
                }
            }

            let command = match event::read() {
                Ok(Event::Key(key)) => map_key(key),
                Ok(Event::Resize(_, _)) => Some(UserCommand::Redraw),
                Ok(_) => None,
                Err(err) => {
                    warn!("Terminal input error: {}", err);
                    break;
                }
            };

            if let Some(command) = command {
                if tx.send(AppEvent::Command(command)).is_err() {
                    break;
                }
            }
        }
    });
}
