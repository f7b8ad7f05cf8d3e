//! Held-key tracking for the two paddle controls.
//!
//! Key events only flip flags here. The tick reads a [`Controls`] snapshot,
//! so keyboard handling never touches the match itself.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    MoveUp,
    MoveDown,
}

impl Control {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Control::MoveUp),
            KeyCode::Down => Some(Control::MoveDown),
            _ => None,
        }
    }
}

/// Which controls are held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
}

/// How a press turns into a held key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldMode {
    /// The terminal reports releases; a key is held until released.
    Released,
    /// No release events: a press holds the key for `ticks` ticks and every
    /// auto-repeat refreshes it.
    Latched { ticks: u32 },
}

#[derive(Clone, Copy, Debug, Default)]
struct Hold {
    held: bool,
    ticks_left: u32,
}

pub struct InputTracker {
    mode: HoldMode,
    up: Hold,
    down: Hold,
}

impl InputTracker {
    pub fn new(mode: HoldMode) -> Self {
        Self {
            mode,
            up: Hold::default(),
            down: Hold::default(),
        }
    }

    pub fn mode(&self) -> HoldMode {
        self.mode
    }

    /// Feed a key event. Returns `false` for keys that are not controls.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(control) = Control::from_key(key.code) else {
            return false;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(control),
            KeyEventKind::Release => self.release(control),
        }
        true
    }

    pub fn press(&mut self, control: Control) {
        let ticks = match self.mode {
            HoldMode::Released => 0,
            HoldMode::Latched { ticks } => {
                // Without releases, a press of the opposite direction is the
                // only sign the other key was let go.
                self.hold_mut(opposite(control)).held = false;
                ticks
            }
        };
        let hold = self.hold_mut(control);
        hold.held = true;
        hold.ticks_left = ticks;
    }

    pub fn release(&mut self, control: Control) {
        *self.hold_mut(control) = Hold::default();
    }

    /// Age latched keys by one tick. No-op when releases are reported.
    pub fn expire(&mut self) {
        if let HoldMode::Latched { .. } = self.mode {
            for hold in [&mut self.up, &mut self.down] {
                hold.ticks_left = hold.ticks_left.saturating_sub(1);
                if hold.ticks_left == 0 {
                    hold.held = false;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.up = Hold::default();
        self.down = Hold::default();
    }

    pub fn controls(&self) -> Controls {
        Controls {
            up: self.up.held,
            down: self.down.held,
        }
    }

    fn hold_mut(&mut self, control: Control) -> &mut Hold {
        match control {
            Control::MoveUp => &mut self.up,
            Control::MoveDown => &mut self.down,
        }
    }
}

fn opposite(control: Control) -> Control {
    match control {
        Control::MoveUp => Control::MoveDown,
        Control::MoveDown => Control::MoveUp,
    }
}
