//! Runtime values flowing through a traversal.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Edge, EdgeId, Entity, EntityId};

/// A value carried by a traverser or recorded in a path entry.
///
/// Besides scalars, a value can be a graph element in either of two forms: a
/// self-contained snapshot ([`Value::Entity`] / [`Value::Edge`]) or a
/// lightweight reference ([`Value::EntityRef`] / [`Value::EdgeRef`]) that must
/// be resolved against a live graph to materialize. The two forms compare
/// equal when they name the same element: element equality is id-based, so a
/// snapshot, a reference, and anything in between are interchangeable for
/// path equality and traverser folding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Array of values
    Array(Vec<Value>),
    /// A detached entity snapshot
    Entity(Entity),
    /// A reference to an entity by id
    EntityRef(EntityId),
    /// A detached edge snapshot
    Edge(Edge),
    /// A reference to an edge by id
    EdgeRef(EdgeId),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float if it is one.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the entity id if the value is an entity snapshot or reference.
    #[inline]
    #[must_use]
    pub const fn entity_id(&self) -> Option<EntityId> {
        match self {
            Self::Entity(e) => Some(e.id),
            Self::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the edge id if the value is an edge snapshot or reference.
    #[inline]
    #[must_use]
    pub const fn edge_id(&self) -> Option<EdgeId> {
        match self {
            Self::Edge(e) => Some(e.id),
            Self::EdgeRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns `true` if the value is a graph element (snapshot or reference).
    #[inline]
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self, Self::Entity(_) | Self::EntityRef(_) | Self::Edge(_) | Self::EdgeRef(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // Bit-pattern comparison keeps `Eq`/`Hash` consistent for floats.
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Entity(a), Self::Entity(b)) => a.id == b.id,
            (Self::Entity(a), Self::EntityRef(b)) | (Self::EntityRef(b), Self::Entity(a)) => {
                a.id == *b
            }
            (Self::EntityRef(a), Self::EntityRef(b)) => a == b,
            (Self::Edge(a), Self::Edge(b)) => a.id == b.id,
            (Self::Edge(a), Self::EdgeRef(b)) | (Self::EdgeRef(b), Self::Edge(a)) => a.id == *b,
            (Self::EdgeRef(a), Self::EdgeRef(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Snapshot and reference forms of the same element must hash alike,
        // matching the id-based equality above.
        match self {
            Self::Null => state.write_u8(0),
            Self::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Self::Int(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            Self::Float(f) => {
                state.write_u8(3);
                f.to_bits().hash(state);
            }
            Self::String(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Self::Bytes(b) => {
                state.write_u8(5);
                b.hash(state);
            }
            Self::Array(values) => {
                state.write_u8(6);
                values.hash(state);
            }
            Self::Entity(e) => {
                state.write_u8(7);
                e.id.hash(state);
            }
            Self::EntityRef(id) => {
                state.write_u8(7);
                id.hash(state);
            }
            Self::Edge(e) => {
                state.write_u8(8);
                e.id.hash(state);
            }
            Self::EdgeRef(id) => {
                state.write_u8(8);
                id.hash(state);
            }
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Entity> for Value {
    #[inline]
    fn from(e: Entity) -> Self {
        Self::Entity(e)
    }
}

impl From<Edge> for Value {
    #[inline]
    fn from(e: Edge) -> Self {
        Self::Edge(e)
    }
}

impl From<EntityId> for Value {
    #[inline]
    fn from(id: EntityId) -> Self {
        Self::EntityRef(id)
    }
}

impl From<EdgeId> for Value {
    #[inline]
    fn from(id: EdgeId) -> Self {
        Self::EdgeRef(id)
    }
}
