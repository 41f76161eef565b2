//! In-memory [`ContextProvider`] backed by hash tables.
//!
//! Hosts that already index declarations implement the provider trait
//! directly; the table is for embedders that collect declarations up front,
//! and for tests.

use std::collections::VecDeque;

use indexmap::IndexMap;
use phpcast_common::limits::MAX_CLASS_HIERARCHY_DEPTH;
use phpcast_syntax::ScopeId;
use phpcast_types::{ClassHierarchy, ClassRef, Type};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::provider::{
    CallableRef, ContextProvider, Declaration, DeclarationSource, Declarations, ProviderResult,
};

/// Function and method names are case-insensitive; properties are not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CallableKey {
    Function(String),
    Method(ClassRef, String),
}

impl CallableKey {
    fn of(callable: &CallableRef) -> Self {
        match callable {
            CallableRef::Function(name) => CallableKey::Function(normalize_function_name(name)),
            CallableRef::Method { class, name } => {
                CallableKey::Method(class.clone(), name.to_ascii_lowercase())
            }
        }
    }
}

fn normalize_function_name(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

fn strip_sigil(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

#[derive(Clone, Debug, Default)]
pub struct DeclarationTable {
    /// Per scope, variables in first-declaration order.
    variables: FxHashMap<ScopeId, IndexMap<String, Declarations>>,
    returns: FxHashMap<CallableKey, Declaration>,
    properties: FxHashMap<(ClassRef, String), Declaration>,
    /// Direct `extends`/`implements` edges.
    parents: FxHashMap<ClassRef, SmallVec<[ClassRef; 2]>>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration of variable `name` in `scope`. Several
    /// declarations of the same name are kept in insertion order.
    pub fn declare_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: Type,
        source: DeclarationSource,
    ) {
        let name = strip_sigil(name);
        self.variables
            .entry(scope)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(Declaration::new(name, ty, source));
    }

    pub fn declare_function_return(&mut self, function: &str, ty: Type, source: DeclarationSource) {
        let key = CallableKey::Function(normalize_function_name(function));
        self.returns.insert(key, Declaration::new(function, ty, source));
    }

    pub fn declare_method_return(
        &mut self,
        class: &ClassRef,
        method: &str,
        ty: Type,
        source: DeclarationSource,
    ) {
        let key = CallableKey::Method(class.clone(), method.to_ascii_lowercase());
        self.returns.insert(key, Declaration::new(method, ty, source));
    }

    pub fn declare_property(
        &mut self,
        class: &ClassRef,
        property: &str,
        ty: Type,
        source: DeclarationSource,
    ) {
        let property = strip_sigil(property);
        self.properties.insert(
            (class.clone(), property.to_string()),
            Declaration::new(property, ty, source),
        );
    }

    /// Record that `class` extends or implements `parent`.
    pub fn declare_parent(&mut self, class: &ClassRef, parent: &ClassRef) {
        let parents = self.parents.entry(class.clone()).or_default();
        if !parents.contains(parent) {
            parents.push(parent.clone());
        }
    }

    /// `class` followed by its ancestors, breadth-first, each once.
    ///
    /// Stops after [`MAX_CLASS_HIERARCHY_DEPTH`] levels so cyclic data cannot
    /// loop.
    fn lineage(&self, class: &ClassRef) -> Vec<ClassRef> {
        let mut seen: FxHashSet<ClassRef> = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([(class.clone(), 0u32)]);

        while let Some((current, depth)) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            order.push(current.clone());
            if depth >= MAX_CLASS_HIERARCHY_DEPTH {
                continue;
            }
            if let Some(parents) = self.parents.get(&current) {
                queue.extend(parents.iter().map(|parent| (parent.clone(), depth + 1)));
            }
        }
        order
    }
}

impl ClassHierarchy for DeclarationTable {
    fn is_subclass_of(&self, class: &ClassRef, ancestor: &ClassRef) -> bool {
        self.lineage(class).iter().skip(1).any(|c| c == ancestor)
    }
}

impl ContextProvider for DeclarationTable {
    fn declared_types_of(&self, scope: ScopeId, name: &str) -> ProviderResult<Declarations> {
        Ok(self
            .variables
            .get(&scope)
            .and_then(|names| names.get(strip_sigil(name)))
            .cloned()
            .unwrap_or_default())
    }

    fn return_type_of(&self, callable: &CallableRef) -> ProviderResult<Option<Declaration>> {
        match callable {
            CallableRef::Function(_) => Ok(self.returns.get(&CallableKey::of(callable)).cloned()),
            CallableRef::Method { class, name } => {
                let method = name.to_ascii_lowercase();
                Ok(self.lineage(class).into_iter().find_map(|owner| {
                    self.returns
                        .get(&CallableKey::Method(owner, method.clone()))
                        .cloned()
                }))
            }
        }
    }

    fn member_type_of(
        &self,
        class: &ClassRef,
        property: &str,
    ) -> ProviderResult<Option<Declaration>> {
        let property = strip_sigil(property);
        Ok(self.lineage(class).into_iter().find_map(|owner| {
            self.properties.get(&(owner, property.to_string())).cloned()
        }))
    }
}

#[cfg(test)]
#[path = "../tests/declaration_table_tests.rs"]
mod tests;
