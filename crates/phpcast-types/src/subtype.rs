//! Subtype relation.
//!
//! `source <: target` holds when:
//! - the types are structurally equal (reflexivity)
//! - `target` is `Mixed`
//! - `source` is a union and every member is a subtype of `target`
//! - `target` is a union and `source` is a subtype of some member
//! - both are objects and the hierarchy says `source` extends `target`
//!
//! Primitive tags never relate to each other: `int` is not a subtype of
//! `float`, even though both are numeric.

use crate::types::{ClassRef, Type};

/// Nominal class relations, answered by whoever owns the class table.
pub trait ClassHierarchy {
    /// Whether `class` is a (transitive) subclass or implementor of
    /// `ancestor`. Need not be reflexive; the checker handles equality.
    fn is_subclass_of(&self, class: &ClassRef, ancestor: &ClassRef) -> bool;
}

/// A hierarchy that knows no class relations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHierarchy;

impl ClassHierarchy for NoopHierarchy {
    fn is_subclass_of(&self, _class: &ClassRef, _ancestor: &ClassRef) -> bool {
        false
    }
}

impl<T: ClassHierarchy + ?Sized> ClassHierarchy for &T {
    fn is_subclass_of(&self, class: &ClassRef, ancestor: &ClassRef) -> bool {
        (**self).is_subclass_of(class, ancestor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtypeResult {
    True,
    False,
}

impl SubtypeResult {
    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, SubtypeResult::True)
    }

    #[inline]
    const fn from_bool(value: bool) -> Self {
        if value {
            SubtypeResult::True
        } else {
            SubtypeResult::False
        }
    }
}

/// Subtype checker parameterized over the class hierarchy it consults.
pub struct SubtypeChecker<'a, H: ClassHierarchy + ?Sized> {
    hierarchy: &'a H,
}

impl<'a, H: ClassHierarchy + ?Sized> SubtypeChecker<'a, H> {
    pub fn new(hierarchy: &'a H) -> Self {
        SubtypeChecker { hierarchy }
    }

    pub fn check_subtype(&self, source: &Type, target: &Type) -> SubtypeResult {
        if source == target {
            return SubtypeResult::True;
        }

        match (source, target) {
            (_, Type::Mixed) => SubtypeResult::True,
            (Type::Mixed, _) => SubtypeResult::False,
            // Every member of the source must fit; checked before the target
            // split so `A|B <: A|B|C` works member by member.
            (Type::Union(members), _) => SubtypeResult::from_bool(
                members
                    .iter()
                    .all(|member| self.check_subtype(member, target).is_true()),
            ),
            (_, Type::Union(members)) => SubtypeResult::from_bool(
                members
                    .iter()
                    .any(|member| self.check_subtype(source, member).is_true()),
            ),
            (Type::Object(class), Type::Object(ancestor)) => {
                SubtypeResult::from_bool(self.hierarchy.is_subclass_of(class, ancestor))
            }
            _ => SubtypeResult::False,
        }
    }

    /// Mutual subtyping. For the value types here this coincides with
    /// structural equality except across class hierarchies with cycles.
    pub fn types_equivalent(&self, left: &Type, right: &Type) -> bool {
        self.check_subtype(left, right).is_true() && self.check_subtype(right, left).is_true()
    }
}

/// `source <: target` under `hierarchy`.
pub fn is_subtype_of<H: ClassHierarchy + ?Sized>(
    source: &Type,
    target: &Type,
    hierarchy: &H,
) -> bool {
    SubtypeChecker::new(hierarchy).check_subtype(source, target).is_true()
}

/// Structural identity. Unions are normalized on construction, so this is
/// plain equality.
#[inline]
pub fn are_types_identical(left: &Type, right: &Type) -> bool {
    left == right
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
