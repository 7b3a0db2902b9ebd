//! The undo/redo stack.
//!
//! [`CommandHistory`] keeps every pushed command in a single list with a
//! cursor marking the last executed one. Entries after the cursor form the
//! redo region and are discarded by the next push. Undo and redo walk the
//! cursor across the list, unwinding or replaying whole command groups in
//! one call.

#[cfg(test)]
mod tests;

use maquette_primitives::HistoryDirection;
use tracing::{trace, warn};

use crate::command::{Command, HistoryHost};

/// One slot in the history.
struct HistoryEntry {
	command: Box<dyn Command>,
	/// Group id, `0` for ungrouped commands. Consecutive groups get
	/// distinct ids so they never unwind together.
	group: u32,
	/// Grouped commands take the group's description instead of their own.
	description: Option<String>,
}

impl HistoryEntry {
	fn description(&self) -> &str {
		self.description
			.as_deref()
			.unwrap_or_else(|| self.command.description())
	}
}

/// Linear undo/redo stack with grouping, unification, and save-point
/// tracking.
///
/// The history owns every pushed command exclusively; a command removed
/// from the stack (redo-branch truncation, collapse to a no-op) is dropped
/// immediately. All operations are synchronous and single-threaded.
pub struct CommandHistory {
	entries: Vec<HistoryEntry>,
	/// Number of executed entries. `entries[..cursor]` is the undo region,
	/// `entries[cursor..]` the redo region.
	cursor: usize,
	/// Cursor position at the last save; `None` once the saved entry has
	/// been discarded.
	save_point: Option<usize>,
	/// Depth of nested `push_group` calls.
	group_depth: u32,
	/// Id handed to the next group; bumped when the outermost group
	/// closes.
	group_serial: u32,
	/// Description of the currently open outermost group.
	group_description: Option<String>,
	/// Trips if a `history_changed` handler mutates the stack it is being
	/// notified about.
	in_mutation: bool,
}

impl Default for CommandHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl CommandHistory {
	/// Creates an empty history in the unmodified state.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			cursor: 0,
			save_point: Some(0),
			group_depth: 0,
			group_serial: 1,
			group_description: None,
			in_mutation: false,
		}
	}

	/// Number of commands in the undo region.
	pub fn undo_len(&self) -> usize {
		self.cursor
	}

	/// Number of commands in the redo region.
	pub fn redo_len(&self) -> usize {
		self.entries.len() - self.cursor
	}

	/// Returns whether undo is available.
	pub fn can_undo(&self) -> bool {
		self.cursor > 0
	}

	/// Returns whether redo is available.
	pub fn can_redo(&self) -> bool {
		self.cursor < self.entries.len()
	}

	/// The command the next [`CommandHistory::undo`] call would unwind
	/// first.
	pub fn next_undo_item(&self) -> Option<&dyn Command> {
		self.cursor
			.checked_sub(1)
			.map(|idx| &*self.entries[idx].command)
	}

	/// The command the next [`CommandHistory::redo`] call would replay
	/// first.
	pub fn next_redo_item(&self) -> Option<&dyn Command> {
		self.entries.get(self.cursor).map(|entry| &*entry.command)
	}

	/// Description of the next undo step, group-aware.
	pub fn next_undo_description(&self) -> Option<&str> {
		self.cursor
			.checked_sub(1)
			.map(|idx| self.entries[idx].description())
	}

	/// Description of the next redo step, group-aware.
	pub fn next_redo_description(&self) -> Option<&str> {
		self.entries.get(self.cursor).map(HistoryEntry::description)
	}

	/// Descriptions of every atomic undo step, most recent first.
	///
	/// A whole group contributes a single item.
	pub fn undo_items(&self) -> Vec<&str> {
		let mut items = Vec::new();
		let mut last_group = 0;

		for entry in self.entries[..self.cursor].iter().rev() {
			if entry.group != 0 && entry.group == last_group {
				continue;
			}
			items.push(entry.description());
			last_group = entry.group;
		}

		items
	}

	/// Descriptions of every atomic redo step, nearest first.
	pub fn redo_items(&self) -> Vec<&str> {
		let mut items = Vec::new();
		let mut last_group = 0;

		for entry in &self.entries[self.cursor..] {
			if entry.group != 0 && entry.group == last_group {
				continue;
			}
			items.push(entry.description());
			last_group = entry.group;
		}

		items
	}

	/// Opens a command group.
	///
	/// Commands pushed until the matching [`CommandHistory::pop_group`]
	/// undo and redo as one atomic unit and take `description` as their
	/// own. Groups nest; only the outermost description is used.
	pub fn push_group(&mut self, description: impl Into<String>) {
		if self.group_depth == 0 {
			self.group_description = Some(description.into());
		}
		self.group_depth += 1;
	}

	/// Closes the innermost open command group.
	pub fn pop_group(&mut self) {
		debug_assert!(self.group_depth > 0, "pop_group without a matching push_group");
		if self.group_depth == 0 {
			warn!("pop_group without a matching push_group");
			return;
		}

		self.group_depth -= 1;
		if self.group_depth == 0 {
			self.group_description = None;
			self.group_serial += 1;
		}
	}

	/// Current group nesting depth.
	pub fn group_depth(&self) -> u32 {
		self.group_depth
	}

	/// Records the current cursor position as the saved state.
	pub fn mark_saved(&mut self) {
		self.save_point = Some(self.cursor);
	}

	/// Returns whether the document differs from its last saved state.
	///
	/// Once the saved entry has been discarded from the stack, the history
	/// stays modified until the next [`CommandHistory::mark_saved`].
	pub fn is_modified(&self) -> bool {
		self.save_point != Some(self.cursor)
	}

	/// Appends `command`, which the caller has already executed.
	///
	/// Discards the redo region, then either merges `command` into the
	/// command at the cursor (when ungrouped, compatible, and not sitting
	/// on the save point) or appends it as a new entry. The host is
	/// notified in all cases.
	pub fn push(&mut self, command: Box<dyn Command>, host: &mut impl HistoryHost) {
		self.enter_mutation();

		if self.entries.len() > self.cursor {
			trace!(discarded = self.entries.len() - self.cursor, "redo branch discarded");
			self.entries.truncate(self.cursor);
			if self.save_point.is_some_and(|saved| saved > self.cursor) {
				// The saved state lived on the discarded branch.
				self.save_point = None;
			}
		}

		if self.group_depth == 0 && self.cursor > 0 && self.save_point != Some(self.cursor) {
			let prev = &mut self.entries[self.cursor - 1];
			if prev.group == 0 && prev.command.unifies_with(Some(&*command)) {
				prev.command.collapse(command);

				if prev.command.unifies_with(None) {
					// The merged command cancelled itself out.
					self.entries.remove(self.cursor - 1);
					self.cursor -= 1;
					trace!(stack = self.cursor, "unified command collapsed to a no-op");
					host.history_changed(None, HistoryDirection::Forward);
				} else {
					trace!(stack = self.cursor, "command unified into predecessor");
					host.history_changed(
						Some(&*self.entries[self.cursor - 1].command),
						HistoryDirection::Forward,
					);
				}

				self.leave_mutation();
				return;
			}
		}

		let group = if self.group_depth > 0 { self.group_serial } else { 0 };
		let description = (group != 0)
			.then(|| self.group_description.clone())
			.flatten();

		let entry = HistoryEntry {
			command,
			group,
			description,
		};
		trace!(
			description = entry.description(),
			group,
			stack = self.cursor + 1,
			"command pushed"
		);
		self.entries.push(entry);
		self.cursor += 1;

		host.history_changed(
			Some(&*self.entries[self.cursor - 1].command),
			HistoryDirection::Forward,
		);
		self.leave_mutation();
	}

	/// Unwinds the command at the cursor, and with it the rest of its
	/// group.
	///
	/// Does nothing when there is nothing to undo.
	pub fn undo(&mut self, host: &mut impl HistoryHost) {
		self.enter_mutation();

		if self.cursor == 0 {
			trace!("undo: nothing to undo");
		}

		while self.cursor > 0 {
			let idx = self.cursor - 1;
			let group = self.entries[idx].group;

			self.entries[idx].command.undo();
			self.cursor -= 1;
			trace!(
				description = self.entries[idx].description(),
				stack = self.cursor,
				"command undone"
			);
			host.history_changed(
				Some(&*self.entries[idx].command),
				HistoryDirection::Backward,
			);

			if group == 0 {
				break;
			}
			let prev_group = idx.checked_sub(1).map(|prev| self.entries[prev].group);
			if prev_group != Some(group) {
				break;
			}
		}

		self.leave_mutation();
	}

	/// Replays the command after the cursor, and with it the rest of its
	/// group.
	///
	/// Does nothing when there is nothing to redo.
	pub fn redo(&mut self, host: &mut impl HistoryHost) {
		self.enter_mutation();

		if self.cursor == self.entries.len() {
			trace!("redo: nothing to redo");
		}

		while self.cursor < self.entries.len() {
			let idx = self.cursor;
			let group = self.entries[idx].group;

			self.entries[idx].command.execute();
			self.cursor += 1;
			trace!(
				description = self.entries[idx].description(),
				stack = self.cursor,
				"command redone"
			);
			host.history_changed(
				Some(&*self.entries[idx].command),
				HistoryDirection::Forward,
			);

			if group == 0 {
				break;
			}
			let next_group = self.entries.get(self.cursor).map(|entry| entry.group);
			if next_group != Some(group) {
				break;
			}
		}

		self.leave_mutation();
	}

	fn enter_mutation(&mut self) {
		assert!(
			!self.in_mutation,
			"re-entrant history mutation from within a history_changed handler"
		);
		self.in_mutation = true;
	}

	fn leave_mutation(&mut self) {
		self.in_mutation = false;
	}
}
