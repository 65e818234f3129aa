//! Input contracts for the carousel.
//!
//! Hosts collect navigation commands from buttons, links, keys and swipes and
//! pass them into `Carousel::update()` together with the elapsed time.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Applied in order before time advances.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Next,
    Previous,
    Goto { index: i64 },
    Move { delta: i64 },
    Hover { hovering: bool },
    /// The strategy finished animating; releases the transition lock early.
    TransitionFinished,
}

impl Command {
    /// Commands that page and therefore reset autoplay.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Command::Next | Command::Previous | Command::Goto { .. } | Command::Move { .. }
        )
    }
}
