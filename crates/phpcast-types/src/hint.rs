//! Lowering of declared and documented type text into [`Type`].
//!
//! Accepts native declarations (`?string`, `int|float`) and the doc-comment
//! dialect (`integer`, `boolean`, `string[]`, `array<int, string>`,
//! `non-empty-string`). Anything that cannot be pinned to one lattice member
//! (`callable`, `self`, intersections, generics over objects) lowers to
//! `Mixed`, which the checker treats as "no information".

use tracing::trace;

use crate::types::{ClassRef, Type};

/// Parse type hint text. Never fails; unknown text lowers to `Mixed`.
pub fn parse_type_hint(text: &str) -> Type {
    let text = text.trim();
    if text.is_empty() {
        return Type::Mixed;
    }

    if let Some(inner) = text.strip_prefix('?') {
        return Type::nullable(parse_type_hint(inner));
    }

    let parts = split_top_level(text, '|');
    if parts.len() > 1 {
        return Type::union(parts.into_iter().map(parse_atom));
    }
    parse_atom(text)
}

/// Split on `separator` outside of `<...>`, `(...)` and `{...}`.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (offset, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '{' => depth += 1,
            '>' | ')' | '}' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&text[start..offset]);
                start = offset + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn parse_atom(atom: &str) -> Type {
    let atom = atom.trim();

    if let Some(inner) = atom.strip_prefix('?') {
        return Type::nullable(parse_atom(inner));
    }
    if atom.starts_with('(') && atom.ends_with(')') {
        return parse_type_hint(&atom[1..atom.len() - 1]);
    }
    if atom.contains('&') {
        // Intersections have no lattice counterpart.
        return Type::Mixed;
    }
    if atom.ends_with("[]") {
        return Type::Array;
    }

    let (base, has_generics) = match atom.find(['<', '{']) {
        Some(at) => (&atom[..at], true),
        None => (atom, false),
    };

    let lowered = base.to_ascii_lowercase();
    let ty = match lowered.as_str() {
        "int" | "integer" | "positive-int" | "negative-int" | "non-negative-int"
        | "non-positive-int" | "non-zero-int" => Type::Int,
        "bool" | "boolean" | "true" | "false" => Type::Bool,
        "float" | "double" | "real" => Type::Float,
        "string" | "non-empty-string" | "numeric-string" | "class-string" | "literal-string"
        | "lowercase-string" | "non-falsy-string" | "truthy-string" => Type::String,
        "array" | "list" | "non-empty-array" | "non-empty-list" => Type::Array,
        "null" => Type::Null,
        "void" => Type::Void,
        "mixed" => Type::Mixed,
        // `int<0, max>` is still an int; other generics are only arrays.
        _ if has_generics => Type::Mixed,
        "object" | "callable" | "iterable" | "resource" | "self" | "static" | "parent"
        | "never" | "scalar" | "numeric" | "array-key" | "closed-resource" | "$this" => Type::Mixed,
        _ if is_class_name(base) => Type::Object(ClassRef::new(base)),
        _ => Type::Mixed,
    };

    if ty.is_mixed() {
        trace!(atom, "type hint lowered to mixed");
    }
    ty
}

fn is_class_name(text: &str) -> bool {
    let mut segments = text.trim_start_matches('\\').split('\\').peekable();
    if segments.peek().is_none() {
        return false;
    }
    segments.all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' || !first.is_ascii() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii())
            }
            _ => false,
        }
    })
}

#[cfg(test)]
#[path = "../tests/hint_tests.rs"]
mod tests;
