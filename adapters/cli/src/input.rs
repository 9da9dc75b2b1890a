//! Translation of typed player gestures into world commands.

use thiserror::Error;
use tilemerge_core::{Command, Direction};

/// Help line listing every accepted gesture.
pub(crate) const CONTROLS: &str =
    "Controls: w/a/s/d or up/left/down/right to slide, u to undo, n for a new game, b to toggle brightness, q to quit";

/// Action requested by one line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputEvent {
    /// Forward a command to the world.
    Command(Command),
    /// Switch the display between normal and reduced brightness.
    ToggleBrightness,
    /// End the session.
    Quit,
}

/// Input that does not name any gesture.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{0}` is not a recognised command")]
pub(crate) struct UnrecognizedInput(String);

/// Parses one line of player input.
///
/// Blank lines yield `Ok(None)`.
pub(crate) fn parse_input(line: &str) -> Result<Option<InputEvent>, UnrecognizedInput> {
    let gesture = line.trim().to_ascii_lowercase();
    let event = match gesture.as_str() {
        "" => return Ok(None),
        "w" => move_toward(Direction::Up),
        "a" => move_toward(Direction::Left),
        "s" => move_toward(Direction::Down),
        "d" => move_toward(Direction::Right),
        "u" | "undo" => InputEvent::Command(Command::Undo),
        "n" | "new" => InputEvent::Command(Command::NewGame),
        "b" | "brightness" => InputEvent::ToggleBrightness,
        "q" | "quit" | "exit" => InputEvent::Quit,
        word => match word.parse::<Direction>() {
            Ok(direction) => move_toward(direction),
            Err(_) => return Err(UnrecognizedInput(line.trim().to_owned())),
        },
    };
    Ok(Some(event))
}

fn move_toward(direction: Direction) -> InputEvent {
    InputEvent::Command(Command::Move { direction })
}
