use rustc_hash::{FxHashMap, FxHashSet};

use crate::IdAllocator;

/// Splits a name into its base and trailing ASCII digit suffix.
///
/// `"button42"` splits into `("button", "42")`; a name with no trailing
/// digits has an empty suffix. Only ASCII digits participate, matching the
/// `name42` convention for generated names; the base itself may be any
/// Unicode string.
pub(crate) fn split_trailing_digits(name: &str) -> (&str, &str) {
	let digits = name
		.bytes()
		.rev()
		.take_while(|b| b.is_ascii_digit())
		.count();
	name.split_at(name.len() - digits)
}

/// Generates and polices unique names within one scope.
///
/// A context tracks the set of names currently in use and, per base name,
/// an [`IdAllocator`] for numeric suffixes. The two can diverge: names
/// registered directly via [`NamingContext::add_name`] (e.g. while loading
/// a saved document) occupy the in-use set without marking their suffix in
/// the allocator, which is why [`NamingContext::new_name`] re-draws until
/// its candidate is actually free.
#[derive(Debug, Default)]
pub struct NamingContext {
	/// Suffix allocators keyed by base name.
	allocators: FxHashMap<String, IdAllocator>,
	/// Names currently in use in this scope.
	names: FxHashSet<String>,
}

impl NamingContext {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Generates a fresh name from `base`, e.g. `"button"` → `"button1"`.
	///
	/// Trailing digits in `base` are stripped first, so seeding with
	/// `"button3"` still draws from the `button` family. The returned name
	/// is not yet in use; callers register it with
	/// [`NamingContext::add_name`] once the object actually takes it.
	pub fn new_name(&mut self, base: &str) -> String {
		let (base, _) = split_trailing_digits(base);
		let allocator = self.allocators.entry(base.to_owned()).or_default();

		loop {
			let id = allocator.allocate();
			let name = format!("{base}{id}");
			if !self.names.contains(&name) {
				return name;
			}
		}
	}

	/// Returns whether `name` is currently in use in this scope.
	pub fn has_name(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	/// Registers `name` as in use.
	///
	/// Returns `false` without side effects if the name was already
	/// registered.
	pub fn add_name(&mut self, name: &str) -> bool {
		debug_assert!(!name.is_empty(), "empty names are not allowed");
		if self.names.contains(name) {
			return false;
		}
		self.names.insert(name.to_owned());
		true
	}

	/// Removes `name` from the in-use set and returns its numeric suffix
	/// to the base name's allocator.
	///
	/// Once the allocator for a base has no live ids left, the whole
	/// family is dropped to reclaim memory for abandoned prefixes.
	pub fn release_name(&mut self, name: &str) {
		let was_present = self.names.remove(name);
		debug_assert!(was_present, "released name {name:?} was not in use");

		let (base, digits) = split_trailing_digits(name);
		if digits.is_empty() {
			return;
		}

		let Some(allocator) = self.allocators.get_mut(base) else {
			return;
		};
		if let Ok(id) = digits.parse::<u32>() {
			allocator.release(id);
		}
		if allocator.live() == 0 {
			self.allocators.remove(base);
		}
	}

	/// Number of names currently in use.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Returns `true` if no names are in use.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
