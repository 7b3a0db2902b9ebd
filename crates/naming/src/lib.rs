//! Document identity: unique, stable, human-meaningful object names.
//!
//! Every object in a design document carries a name like `button3`. This
//! crate owns the bookkeeping that keeps those names unique: a bitset
//! allocator for numeric suffixes, a per-scope naming context, and a
//! document-level registry that routes allocation between a project-wide
//! scope and per-toplevel scopes depending on the active [`NamingPolicy`].
//!
//! # Architecture
//!
//! ```text
//! NameRegistry                      DocumentHost (document implements)
//! ┌───────────────────────┐         ┌──────────────────────────┐
//! │ project: NamingContext│         │ root_ancestor()          │
//! │ subtrees: {root: ctx} │◄───────►│ object_name()            │
//! │                       │         │ objects_in_order()       │
//! │ new_name()            │         │ apply_rename()           │
//! │ reserve() / release() │         └──────────────────────────┘
//! │ set_policy()          │
//! └──────────┬────────────┘
//!            │ per base name
//!            ▼
//!      NamingContext ──► IdAllocator ("button" ─► 1, 2, 3, …)
//! ```

/// Per-scope name generation and bookkeeping.
pub mod context;
/// First-fit sparse id allocation for numeric name suffixes.
pub mod id_allocator;
/// Naming policy selection and parsing.
pub mod policy;
/// Document-level routing between naming scopes.
pub mod registry;
/// Numbering for not-yet-saved documents.
pub mod unsaved;

pub use context::NamingContext;
pub use id_allocator::IdAllocator;
pub use policy::{NamingPolicy, ParsePolicyError};
pub use registry::{DocumentHost, NameRegistry};
pub use unsaved::UnsavedNumbers;
