use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counter for generating unique object IDs.
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle for an object in a design document.
///
/// Handles are never reused within a process. Code that needs to refer to an
/// object across document mutations (undo history, clipboards) stores the
/// handle and asks the owning document to resolve it, so a handle whose
/// object has been removed is detectably stale rather than dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectId(pub u64);

impl ObjectId {
	/// Generates a new unique object ID.
	pub fn next() -> Self {
		Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

#[cfg(test)]
mod tests {
	use super::ObjectId;

	#[test]
	fn ids_are_unique() {
		let a = ObjectId::next();
		let b = ObjectId::next();
		assert_ne!(a, b);
	}
}
