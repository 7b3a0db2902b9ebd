//! Core types shared by the maquette document engines: object handles and
//! history traversal directions.

/// Directional types for history traversal and change notifications.
pub mod direction;
/// Identifier types for document objects.
pub mod ids;

pub use direction::HistoryDirection;
pub use ids::ObjectId;
