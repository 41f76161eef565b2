//! Type model for the phpcast inspection engine.
//!
//! - **`Type`**: value-typed lattice over the primitive types, `Object(class)`,
//!   `Mixed`, `Null` and normalized unions. Types are immutable, cheap to
//!   clone (`Arc`-backed) and `Send + Sync`.
//! - **Unions**: [`Type::union`] flattens, deduplicates and sorts members, so
//!   structural equality is order-insensitive. `Mixed` absorbs everything.
//! - **Subtyping**: [`SubtypeChecker`] is reflexive, union-aware, and asks a
//!   [`ClassHierarchy`] for nominal class relations instead of holding a
//!   class graph itself.
//! - **Hints**: [`parse_type_hint`] lowers declared or documented type text
//!   (`?string`, `integer|null`, `\Foo\Bar`) into a `Type`.

mod format;
mod hint;
mod subtype;
pub mod types;

pub use hint::parse_type_hint;
pub use subtype::{
    ClassHierarchy, NoopHierarchy, SubtypeChecker, SubtypeResult, are_types_identical,
    is_subtype_of,
};
pub use types::{ClassRef, Type};

#[cfg(test)]
#[path = "../tests/union_tests.rs"]
mod union_tests;
#[cfg(test)]
#[path = "../tests/type_law_tests.rs"]
mod type_law_tests;
