//! Document-level name routing.
//!
//! The [`NameRegistry`] decides which [`NamingContext`] arbitrates a given
//! object's name. Under [`NamingPolicy::ProjectWide`] there is a single
//! context for the whole document. Under
//! [`NamingPolicy::TopLevelContextual`] each top-level subtree gets its own
//! context, while top-level names themselves stay in the project context so
//! they remain globally unique. Switching policy re-partitions every
//! existing name, renaming greedily on collision in document order.
//!
//! The registry never touches document objects directly: everything it
//! needs from the surrounding document model comes through the
//! [`DocumentHost`] trait.


use maquette_primitives::ObjectId;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::{NamingContext, NamingPolicy};

/// Document operations needed by [`NameRegistry`].
///
/// Implemented by the surrounding document model. The registry stores no
/// object data of its own; handles are resolved through this trait at every
/// call.
pub trait DocumentHost {
	/// Returns the top-level ancestor of `object`, or `object` itself if
	/// it has no parent.
	fn root_ancestor(&self, object: ObjectId) -> ObjectId;

	/// Returns the current name of `object`.
	fn object_name(&self, object: ObjectId) -> String;

	/// Returns every object in the document's stable iteration order.
	///
	/// Roots must precede their descendants; beyond that the order is
	/// whatever the document maintains. Re-partition collisions are
	/// resolved greedily in this order, so it determines which of two
	/// colliding objects keeps its name.
	fn objects_in_order(&self) -> Vec<ObjectId>;

	/// Applies a rename decided during re-partitioning to the document.
	fn apply_rename(&mut self, object: ObjectId, name: &str);
}

/// Routes name allocation and release to the correct naming scope.
#[derive(Debug, Default)]
pub struct NameRegistry {
	policy: NamingPolicy,
	/// Project-wide scope; always present. Under the contextual policy it
	/// tracks top-level names only.
	project: NamingContext,
	/// Per-toplevel scopes, keyed by root object. Empty under the
	/// project-wide policy.
	subtrees: FxHashMap<ObjectId, NamingContext>,
}

impl NameRegistry {
	/// Creates a registry with the given initial policy.
	pub fn new(policy: NamingPolicy) -> Self {
		Self {
			policy,
			..Self::default()
		}
	}

	/// The active naming policy.
	pub fn policy(&self) -> NamingPolicy {
		self.policy
	}

	/// Generates a fresh name for `object` starting from `base`.
	///
	/// The name is drawn from the context(s) the object's position
	/// implies and is guaranteed unique there, but it is not yet
	/// registered; call [`NameRegistry::reserve`] once the object takes
	/// it.
	pub fn new_name(
		&mut self,
		host: &impl DocumentHost,
		object: ObjectId,
		base: &str,
	) -> String {
		let root = host.root_ancestor(object);

		match self.policy {
			NamingPolicy::ProjectWide => self.project.new_name(base),
			NamingPolicy::TopLevelContextual if root == object => {
				// Top-level names come out of the project scope, but must
				// not shadow a name already used inside this object's own
				// subtree.
				loop {
					let name = self.project.new_name(base);
					let shadowed = self
						.subtrees
						.get(&object)
						.is_some_and(|ctx| ctx.has_name(&name));
					if !shadowed {
						return name;
					}
				}
			}
			NamingPolicy::TopLevelContextual => {
				self.subtrees.entry(root).or_default().new_name(base)
			}
		}
	}

	/// Returns whether `name` is available for `object`.
	pub fn available(&self, host: &impl DocumentHost, object: ObjectId, name: &str) -> bool {
		if name.is_empty() {
			return false;
		}

		let root = host.root_ancestor(object);
		match self.policy {
			NamingPolicy::ProjectWide => !self.project.has_name(name),
			NamingPolicy::TopLevelContextual if root == object => {
				!self.project.has_name(name)
					&& !self
						.subtrees
						.get(&object)
						.is_some_and(|ctx| ctx.has_name(name))
			}
			NamingPolicy::TopLevelContextual => !self
				.subtrees
				.get(&root)
				.is_some_and(|ctx| ctx.has_name(name)),
		}
	}

	/// Registers `name` for `object` in the context(s) its position
	/// implies.
	///
	/// This is the path taken both after [`NameRegistry::new_name`] and by
	/// the deserializer, which reserves each loaded object's explicit name
	/// in document order.
	pub fn reserve(&mut self, host: &impl DocumentHost, object: ObjectId, name: &str) {
		if !self.available(host, object, name) {
			warn!(?object, name, "attempted to reserve an unavailable name");
			return;
		}

		let root = host.root_ancestor(object);
		trace!(?object, name, root = ?root, "name reserved");

		match self.policy {
			NamingPolicy::ProjectWide => {
				self.project.add_name(name);
			}
			NamingPolicy::TopLevelContextual if root == object => {
				self.project.add_name(name);
				self.subtrees.entry(object).or_default().add_name(name);
			}
			NamingPolicy::TopLevelContextual => {
				self.subtrees.entry(root).or_default().add_name(name);
			}
		}
	}

	/// Releases `name`, mirroring the contexts [`NameRegistry::reserve`]
	/// touched.
	///
	/// A top-level object's private context is dropped once it holds no
	/// names.
	pub fn release(&mut self, host: &impl DocumentHost, object: ObjectId, name: &str) {
		let root = host.root_ancestor(object);
		trace!(?object, name, "name released");

		match self.policy {
			NamingPolicy::ProjectWide => self.project.release_name(name),
			NamingPolicy::TopLevelContextual => {
				if root == object {
					self.project.release_name(name);
				}
				if let Some(ctx) = self.subtrees.get_mut(&root) {
					ctx.release_name(name);
					if ctx.is_empty() {
						self.subtrees.remove(&root);
					}
				}
			}
		}
	}

	/// Moves `object` from `old_name` to `new_name` in a single step.
	pub fn rename(
		&mut self,
		host: &impl DocumentHost,
		object: ObjectId,
		old_name: &str,
		new_name: &str,
	) {
		self.release(host, object, old_name);
		self.reserve(host, object, new_name);
	}

	/// Switches the naming policy, re-partitioning every existing name.
	///
	/// Setting the policy already in force is a no-op. Otherwise every
	/// name is removed from its old context(s) and re-added under the new
	/// partitioning; collisions are resolved greedily in the host's
	/// document order, first object keeping its name and later ones being
	/// renamed through [`DocumentHost::apply_rename`].
	pub fn set_policy(&mut self, host: &mut impl DocumentHost, policy: NamingPolicy) {
		if self.policy == policy {
			return;
		}

		debug!(from = self.policy.as_str(), to = policy.as_str(), "re-partitioning names");
		self.policy = policy;

		match policy {
			NamingPolicy::ProjectWide => self.merge_into_project(host),
			NamingPolicy::TopLevelContextual => self.partition_by_toplevel(host),
		}
	}

	/// Folds every subtree scope into the project scope.
	///
	/// Top-level names are already tracked project-wide, so only
	/// descendants move.
	fn merge_into_project(&mut self, host: &mut impl DocumentHost) {
		self.subtrees.clear();

		for object in host.objects_in_order() {
			if host.root_ancestor(object) == object {
				continue;
			}

			let name = host.object_name(object);
			if !self.project.add_name(&name) {
				let fresh = self.project.new_name(&name);
				self.project.add_name(&fresh);
				trace!(?object, old = %name, new = %fresh, "renamed on policy collision");
				host.apply_rename(object, &fresh);
			}
		}
	}

	/// Splits the project scope into one scope per top-level subtree.
	///
	/// Roots keep their project-wide entry and seed their own scope;
	/// descendants move from the project scope into their root's scope.
	fn partition_by_toplevel(&mut self, host: &mut impl DocumentHost) {
		debug_assert!(self.subtrees.is_empty(), "stale subtree contexts");

		for object in host.objects_in_order() {
			let root = host.root_ancestor(object);
			let name = host.object_name(object);

			if root == object {
				self.subtrees.entry(object).or_default().add_name(&name);
				continue;
			}

			let ctx = self.subtrees.entry(root).or_default();
			if !ctx.add_name(&name) {
				// Names were globally unique before the switch, so this
				// only fires for documents whose names were already
				// inconsistent.
				let fresh = ctx.new_name(&name);
				ctx.add_name(&fresh);
				trace!(?object, old = %name, new = %fresh, "renamed on policy collision");
				host.apply_rename(object, &fresh);
			}
			if self.project.has_name(&name) {
				self.project.release_name(&name);
			}
		}
	}
}
