/// Direction of a history traversal.
///
/// Carried by change notifications so listeners can tell a forward replay
/// (initial push or redo) from a backward one (undo).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
	/// Commands are being executed: initial push or redo.
	Forward,
	/// Commands are being unwound: undo.
	Backward,
}

impl HistoryDirection {
	/// Returns `true` for [`HistoryDirection::Forward`].
	pub fn is_forward(self) -> bool {
		matches!(self, Self::Forward)
	}
}
