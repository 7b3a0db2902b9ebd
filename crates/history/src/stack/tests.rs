use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use maquette_primitives::HistoryDirection;

use super::CommandHistory;
use crate::command::{Command, HistoryHost};

/// Shared integer cell standing in for a document property.
type Value = Rc<RefCell<i32>>;

/// Property-set style command: remembers old and new values and merges
/// with a later set on the same cell.
struct SetValue {
	target: Value,
	old: i32,
	new: i32,
}

impl SetValue {
	/// Applies the new value immediately, the way document-mutation code
	/// executes a command before pushing it.
	fn apply(target: &Value, new: i32) -> Box<Self> {
		let old = *target.borrow();
		*target.borrow_mut() = new;
		Box::new(Self {
			target: Rc::clone(target),
			old,
			new,
		})
	}
}

impl Command for SetValue {
	fn description(&self) -> &str {
		"Set value"
	}

	fn execute(&mut self) {
		*self.target.borrow_mut() = self.new;
	}

	fn undo(&mut self) {
		*self.target.borrow_mut() = self.old;
	}

	fn unifies_with(&self, other: Option<&dyn Command>) -> bool {
		match other {
			Some(other) => {
				let other: &dyn Any = other;
				other
					.downcast_ref::<SetValue>()
					.is_some_and(|other| Rc::ptr_eq(&other.target, &self.target))
			}
			None => self.old == self.new,
		}
	}

	fn collapse(&mut self, other: Box<dyn Command>) {
		let other: Box<dyn Any> = other;
		let other = other
			.downcast::<SetValue>()
			.expect("unifies_with only accepts SetValue");
		self.new = other.new;
	}
}

/// Structural test command: a label and nothing else.
struct Marker {
	label: &'static str,
}

impl Marker {
	fn new(label: &'static str) -> Box<Self> {
		Box::new(Self { label })
	}
}

impl Command for Marker {
	fn description(&self) -> &str {
		self.label
	}

	fn execute(&mut self) {}

	fn undo(&mut self) {}
}

/// Host that records every notification it receives.
#[derive(Default)]
struct RecordingHost {
	events: Vec<(Option<String>, HistoryDirection)>,
}

impl HistoryHost for RecordingHost {
	fn history_changed(&mut self, command: Option<&dyn Command>, direction: HistoryDirection) {
		self.events
			.push((command.map(|cmd| cmd.description().to_owned()), direction));
	}
}

fn value() -> Value {
	Rc::new(RefCell::new(0))
}

#[test]
fn undo_redo_round_trip() {
	let mut history = CommandHistory::new();
	let v = value();

	history.push(SetValue::apply(&v, 5), &mut ());
	assert_eq!(*v.borrow(), 5);
	assert!(history.can_undo());
	assert!(!history.can_redo());

	history.undo(&mut ());
	assert_eq!(*v.borrow(), 0);
	assert!(history.can_redo());

	history.redo(&mut ());
	assert_eq!(*v.borrow(), 5);
	assert!(history.next_undo_item().is_some());
	assert!(history.next_redo_item().is_none());
}

#[test]
fn push_discards_the_redo_branch() {
	let mut history = CommandHistory::new();

	history.push(Marker::new("first"), &mut ());
	history.push(Marker::new("second"), &mut ());
	history.undo(&mut ());

	history.push(Marker::new("third"), &mut ());

	assert_eq!(history.undo_len(), 2);
	assert_eq!(history.redo_len(), 0);
	assert!(history.next_redo_item().is_none());
	assert_eq!(history.undo_items(), ["third", "first"]);
}

#[test]
fn empty_undo_and_redo_are_noops() {
	let mut history = CommandHistory::new();
	let mut host = RecordingHost::default();

	history.undo(&mut host);
	history.redo(&mut host);

	assert!(host.events.is_empty());
	assert!(history.next_undo_item().is_none());
}

#[test]
fn group_undoes_and_redoes_atomically() {
	let mut history = CommandHistory::new();
	let (a, b) = (value(), value());

	history.push_group("Create window");
	history.push(SetValue::apply(&a, 1), &mut ());
	history.push(SetValue::apply(&b, 2), &mut ());
	history.pop_group();

	assert_eq!(history.next_undo_description(), Some("Create window"));

	history.undo(&mut ());
	assert_eq!(*a.borrow(), 0);
	assert_eq!(*b.borrow(), 0);
	assert!(history.next_undo_item().is_none());

	history.redo(&mut ());
	assert_eq!(*a.borrow(), 1);
	assert_eq!(*b.borrow(), 2);
	assert_eq!(history.undo_len(), 2);
}

#[test]
fn nested_groups_share_the_outermost_id() {
	let mut history = CommandHistory::new();
	let (a, b, c) = (value(), value(), value());

	history.push_group("Paste");
	history.push(SetValue::apply(&a, 1), &mut ());
	history.push_group("inner");
	history.push(SetValue::apply(&b, 2), &mut ());
	history.pop_group();
	history.push(SetValue::apply(&c, 3), &mut ());
	history.pop_group();
	assert_eq!(history.group_depth(), 0);

	history.undo(&mut ());
	assert_eq!((*a.borrow(), *b.borrow(), *c.borrow()), (0, 0, 0));
	assert_eq!(history.undo_items(), Vec::<&str>::new());
	assert_eq!(history.redo_items(), ["Paste"]);
}

#[test]
fn consecutive_groups_stay_separate() {
	let mut history = CommandHistory::new();
	let (a, b) = (value(), value());

	history.push_group("First");
	history.push(SetValue::apply(&a, 1), &mut ());
	history.pop_group();

	history.push_group("Second");
	history.push(SetValue::apply(&b, 2), &mut ());
	history.pop_group();

	history.undo(&mut ());
	assert_eq!(*a.borrow(), 1);
	assert_eq!(*b.borrow(), 0);
	assert_eq!(history.undo_items(), ["First"]);
}

#[test]
fn adjacent_sets_on_one_target_unify() {
	let mut history = CommandHistory::new();
	let v = value();

	history.push(SetValue::apply(&v, 1), &mut ());
	history.push(SetValue::apply(&v, 2), &mut ());

	assert_eq!(history.undo_len(), 1);

	history.undo(&mut ());
	assert_eq!(*v.borrow(), 0);

	history.redo(&mut ());
	assert_eq!(*v.borrow(), 2);
}

#[test]
fn unified_noop_is_removed_entirely() {
	let mut history = CommandHistory::new();
	let mut host = RecordingHost::default();
	let v = value();

	history.push(SetValue::apply(&v, 5), &mut host);
	history.push(SetValue::apply(&v, 0), &mut host);

	assert_eq!(history.undo_len(), 0);
	assert!(!history.is_modified());
	assert_eq!(
		host.events.last(),
		Some(&(None, HistoryDirection::Forward))
	);
}

#[test]
fn grouped_commands_never_unify() {
	let mut history = CommandHistory::new();
	let v = value();

	history.push_group("Drag");
	history.push(SetValue::apply(&v, 1), &mut ());
	history.push(SetValue::apply(&v, 2), &mut ());
	history.pop_group();
	assert_eq!(history.undo_len(), 2);

	// The entry at the cursor is grouped, so the next ungrouped push must
	// not merge into it either.
	history.push(SetValue::apply(&v, 3), &mut ());
	assert_eq!(history.undo_len(), 3);
}

#[test]
fn different_targets_never_unify() {
	let mut history = CommandHistory::new();
	let (a, b) = (value(), value());

	history.push(SetValue::apply(&a, 1), &mut ());
	history.push(SetValue::apply(&b, 2), &mut ());

	assert_eq!(history.undo_len(), 2);
}

#[test]
fn save_point_tracks_modified_state() {
	let mut history = CommandHistory::new();
	let v = value();
	assert!(!history.is_modified());

	history.push(SetValue::apply(&v, 1), &mut ());
	assert!(history.is_modified());

	history.mark_saved();
	assert!(!history.is_modified());

	history.undo(&mut ());
	assert!(history.is_modified());

	history.redo(&mut ());
	assert!(!history.is_modified());
}

#[test]
fn truncating_the_saved_entry_pins_modified() {
	let mut history = CommandHistory::new();

	history.push(Marker::new("first"), &mut ());
	history.push(Marker::new("second"), &mut ());
	history.mark_saved();
	history.undo(&mut ());

	// "second" held the saved state; this push discards it.
	history.push(Marker::new("third"), &mut ());
	assert!(history.is_modified());

	history.undo(&mut ());
	history.undo(&mut ());
	assert!(history.is_modified());

	history.mark_saved();
	assert!(!history.is_modified());
}

#[test]
fn no_unification_across_the_save_point() {
	let mut history = CommandHistory::new();
	let v = value();

	history.push(SetValue::apply(&v, 1), &mut ());
	history.mark_saved();
	history.push(SetValue::apply(&v, 2), &mut ());

	assert_eq!(history.undo_len(), 2);
	assert!(history.is_modified());

	history.undo(&mut ());
	assert_eq!(*v.borrow(), 1);
	assert!(!history.is_modified());
}

#[test]
fn notifications_carry_commands_and_direction() {
	let mut history = CommandHistory::new();
	let mut host = RecordingHost::default();
	let v = value();

	history.push(SetValue::apply(&v, 1), &mut host);
	history.undo(&mut host);
	history.redo(&mut host);

	let expected = [
		(Some("Set value".to_owned()), HistoryDirection::Forward),
		(Some("Set value".to_owned()), HistoryDirection::Backward),
		(Some("Set value".to_owned()), HistoryDirection::Forward),
	];
	assert_eq!(host.events, expected);
}

#[test]
fn undo_items_collapse_groups_to_one_entry() {
	let mut history = CommandHistory::new();
	let (a, b, c) = (value(), value(), value());

	history.push(Marker::new("before"), &mut ());
	history.push_group("Paste");
	history.push(SetValue::apply(&a, 1), &mut ());
	history.push(SetValue::apply(&b, 2), &mut ());
	history.pop_group();
	history.push(SetValue::apply(&c, 3), &mut ());

	assert_eq!(history.undo_items(), ["Set value", "Paste", "before"]);

	history.undo(&mut ());
	history.undo(&mut ());
	history.undo(&mut ());
	assert_eq!(history.redo_items(), ["before", "Paste", "Set value"]);
}
