//! The atomic simulation unit: one grid location holding an integer state.

/// Rule-specific data carried alongside a cell's state.
///
/// Only the predator-prey rule attaches one; every other rule leaves it at
/// `None`. Energy is meaningful for sharks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    Wator {
        age: u32,
        energy: u32,
    },
}

/// A single cell: committed state, pending next state, and rule payload.
///
/// `next` is `None` whenever no update is staged, so a cell can never be
/// half-committed. Cells hold no references to other cells; neighbor
/// relationships live in the simulation's index cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    state: i32,
    next: Option<i32>,
    payload: Payload,
    next_payload: Option<Payload>,
}

impl Cell {
    pub fn new(state: i32) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// The committed state, untouched by any staged update.
    pub fn state(&self) -> i32 {
        self.state
    }

    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Stage the state for the next generation. Takes effect at commit.
    pub fn set_next(&mut self, state: i32) {
        self.next = Some(state);
    }

    /// Stage both state and payload for the next generation.
    pub fn set_next_with(&mut self, state: i32, payload: Payload) {
        self.next = Some(state);
        self.next_payload = Some(payload);
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Promote the staged update to the committed state.
    pub fn commit(&mut self) {
        if let Some(state) = self.next.take() {
            self.state = state;
        }
        if let Some(payload) = self.next_payload.take() {
            self.payload = payload;
        }
    }

    /// Drop any staged update, leaving the committed state untouched.
    pub fn clear_pending(&mut self) {
        self.next = None;
        self.next_payload = None;
    }

    /// Overwrite the committed state directly, discarding anything staged.
    /// Used when a grid is loaded or reset, never during a tick.
    pub fn overwrite(&mut self, state: i32, payload: Payload) {
        self.state = state;
        self.payload = payload;
        self.next = None;
        self.next_payload = None;
    }
}

/// Number of `neighbors` whose committed state equals `state`.
pub fn count_in_state(cells: &[Cell], neighbors: &[usize], state: i32) -> usize {
    neighbors
        .iter()
        .filter(|&&index| cells[index].state() == state)
        .count()
}
