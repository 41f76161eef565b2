//! The `Type` lattice.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// Reference to a class by name.
///
/// Class names compare case-insensitively and without a leading `\`, as in
/// the language itself; the spelling is kept for display.
#[derive(Clone)]
pub struct ClassRef {
    name: Arc<str>,
    key: Arc<str>,
}

impl ClassRef {
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        let key = trimmed.trim_start_matches('\\').to_ascii_lowercase();
        ClassRef {
            name: Arc::from(trimmed),
            key: Arc::from(key),
        }
    }

    /// The class name as written.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized lookup key: lowercase, no leading `\`.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for ClassRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassRef({})", self.name)
    }
}

impl From<&str> for ClassRef {
    fn from(name: &str) -> Self {
        ClassRef::new(name)
    }
}

/// A static type.
///
/// `Union` is only ever built through [`Type::union`], which guarantees at
/// least two distinct, non-union, non-`Mixed` members in canonical order.
/// The derived `Ord` provides that canonical order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Void,
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object(ClassRef),
    /// Top of the lattice: any value, or a value we know nothing about.
    Mixed,
    Union(Arc<[Type]>),
}

impl Type {
    pub fn object(class: impl Into<ClassRef>) -> Type {
        Type::Object(class.into())
    }

    /// `T|null`.
    pub fn nullable(inner: Type) -> Type {
        Type::union([inner, Type::Null])
    }

    /// Build a normalized union.
    ///
    /// - nested unions are flattened
    /// - any `Mixed` member makes the result `Mixed`
    /// - duplicates are removed and members sorted canonically
    /// - a single remaining member is returned as-is
    ///
    /// An empty member list violates the caller's contract; release builds
    /// degrade to `Mixed`.
    pub fn union(members: impl IntoIterator<Item = Type>) -> Type {
        let mut flat: SmallVec<[Type; 4]> = SmallVec::new();
        for member in members {
            match member {
                Type::Mixed => return Type::Mixed,
                Type::Union(inner) => flat.extend(inner.iter().cloned()),
                other => flat.push(other),
            }
        }

        flat.sort();
        flat.dedup();

        debug_assert!(!flat.is_empty(), "union of zero members");
        match flat.len() {
            0 => Type::Mixed,
            1 => flat.pop().unwrap_or(Type::Mixed),
            _ => Type::Union(Arc::from(flat.into_vec())),
        }
    }

    /// Union of two types.
    pub fn union2(left: Type, right: Type) -> Type {
        Type::union([left, right])
    }

    /// Members of a union, or the type itself as a one-element slice.
    pub fn members(&self) -> &[Type] {
        match self {
            Type::Union(members) => members,
            other => std::slice::from_ref(other),
        }
    }

    #[inline]
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    #[inline]
    pub fn is_mixed(&self) -> bool {
        matches!(self, Type::Mixed)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// A union that has `null` as one of its members.
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Union(members) => members.contains(&Type::Null),
            _ => false,
        }
    }

    /// Whether `member` is one of this type's members (or the type itself).
    pub fn has_member(&self, member: &Type) -> bool {
        self.members().contains(member)
    }

    /// The type with `null` removed. `null` alone stays `null`.
    pub fn without_null(&self) -> Type {
        match self {
            Type::Union(members) => {
                Type::union(members.iter().filter(|m| **m != Type::Null).cloned())
            }
            other => other.clone(),
        }
    }

    /// Check the union invariant: ≥2 distinct, sorted, flat, non-`Mixed`
    /// members. Non-unions are trivially normalized.
    pub fn is_normalized(&self) -> bool {
        match self {
            Type::Union(members) => {
                members.len() >= 2
                    && members.windows(2).all(|pair| pair[0] < pair[1])
                    && members
                        .iter()
                        .all(|m| !matches!(m, Type::Union(_) | Type::Mixed))
            }
            _ => true,
        }
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
