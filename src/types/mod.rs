//! Core data types carried through a traversal.

mod element;
mod id;
mod value;

pub use element::{Edge, Entity};
pub use id::{EdgeId, EntityId};
pub use value::Value;
