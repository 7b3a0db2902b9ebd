//! Linear undo/redo command history with grouping and unification.
//!
//! Document mutations are wrapped in [`Command`] objects and pushed onto a
//! [`CommandHistory`]. The history owns every pushed command outright and
//! replays them on undo/redo; commands pushed between
//! [`CommandHistory::push_group`] and [`CommandHistory::pop_group`] undo and
//! redo as one atomic unit, and adjacent compatible commands (repeated drags
//! of the same property, say) are merged into a single history entry.
//!
//! View refreshes happen through the [`HistoryHost`] passed into every
//! mutating call, in the same style as the naming engine's document host.

/// The command capability contract.
pub mod command;
/// The undo/redo stack.
pub mod stack;

pub use command::{Command, HistoryHost};
pub use maquette_primitives::HistoryDirection;
pub use stack::CommandHistory;
