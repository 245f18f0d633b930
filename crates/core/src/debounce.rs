//! Edge detection for the four direction inputs.
//!
//! Inputs are sampled as "released" levels, matching a pulled-up line that
//! reads high while idle. A direction fires once on the released -> pressed
//! transition and stays quiet until it has been released again.

use crate::device::InputSource;
use crate::types::Direction;

/// Set of directions that fired during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fired(u8);

impl Fired {
    pub const NONE: Fired = Fired(0);

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= 1 << direction.index();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Fired directions in sampling order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

/// Remembers the previous level of each direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDebouncer {
    previous: [bool; 4],
}

impl InputDebouncer {
    /// All directions start released, so a button held at power-on fires on
    /// the first tick.
    pub fn new() -> Self {
        Self {
            previous: [true; 4],
        }
    }

    /// Feed one tick of levels (`true` = released), indexed by [`Direction::index`].
    pub fn sample(&mut self, released: [bool; 4]) -> Fired {
        let mut fired = Fired::NONE;
        for direction in Direction::ALL {
            let i = direction.index();
            if self.previous[i] && !released[i] {
                fired.insert(direction);
            }
        }
        self.previous = released;
        fired
    }

    /// Read every direction once from `input` and debounce the result.
    pub fn poll(&mut self, input: &mut impl InputSource) -> Fired {
        let mut released = [true; 4];
        for direction in Direction::ALL {
            released[direction.index()] = input.is_released(direction);
        }
        self.sample(released)
    }

    /// Previous levels, as stored after the last sample
    pub fn previous(&self) -> [bool; 4] {
        self.previous
    }
}

impl Default for InputDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
