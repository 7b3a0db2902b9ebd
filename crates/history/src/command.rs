use std::any::Any;

use maquette_primitives::HistoryDirection;

/// A reversible document mutation.
///
/// Commands are executed once by the code that constructs them, then pushed
/// onto the [`CommandHistory`], which owns them for the rest of their life;
/// from that point on they are only ever undone and redone. `execute` and
/// `undo` are infallible: a command either validates its preconditions
/// before construction or no-ops safely.
///
/// The [`Any`] supertrait lets a command downcast its unification partner
/// to its own concrete type.
///
/// [`CommandHistory`]: crate::CommandHistory
pub trait Command: Any {
	/// Human-readable description, shown in undo/redo menus.
	fn description(&self) -> &str;

	/// Applies the mutation (initial execution and redo).
	fn execute(&mut self);

	/// Reverts the mutation.
	fn undo(&mut self);

	/// Whether `other` can be merged into this command.
	///
	/// `None` asks whether the command has already collapsed into a no-op
	/// and can be dropped from the history altogether. The default never
	/// unifies.
	fn unifies_with(&self, other: Option<&dyn Command>) -> bool {
		let _ = other;
		false
	}

	/// Merges `other` into this command, so that this command covers both
	/// and `other` can be dispensed with.
	///
	/// Only called after [`Command::unifies_with`] returned `true` for
	/// `other`.
	fn collapse(&mut self, other: Box<dyn Command>) {
		let _ = other;
		unreachable!("collapse called on a command that never unifies");
	}
}

/// Notification surface for history mutations.
///
/// An implementation is passed into every mutating [`CommandHistory`] call
/// and told about each executed or undone command so it can refresh
/// whatever depends on the stack (menus, tree views, modified markers).
/// Because the history is exclusively borrowed for the duration of the
/// call, a handler cannot re-enter the stack it is being notified about.
///
/// [`CommandHistory`]: crate::CommandHistory
pub trait HistoryHost {
	/// Called after every push, undo step, or redo step.
	///
	/// `command` is `None` when a push unified with the cursor command and
	/// collapsed it into a no-op, removing it from the stack.
	fn history_changed(&mut self, command: Option<&dyn Command>, direction: HistoryDirection);
}

/// No-op host for callers with nothing to refresh.
impl HistoryHost for () {
	fn history_changed(&mut self, _command: Option<&dyn Command>, _direction: HistoryDirection) {}
}
