//! The declared-type context the resolver consults.
//!
//! The checker never owns symbol tables or a class graph. Everything it knows
//! about declarations comes through [`ContextProvider`], a read-only query
//! surface that an embedding host implements over its own index.

use std::fmt;

use phpcast_syntax::ScopeId;
use phpcast_types::{ClassHierarchy, ClassRef, Type};
use serde::Serialize;
use smallvec::SmallVec;

/// Where a declared type came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationSource {
    /// Native parameter type, `function f(string $s)`.
    ParameterHint,
    /// Native return type, `function f(): string`.
    ReturnHint,
    /// Native typed property, `private string $name`.
    PropertyHint,
    /// `/** @var string */` on a property.
    PropertyDocHint,
    /// `/* @var string $x */` on a local variable.
    LocalDocHint,
    /// `@param` (or `@var`) in a function docblock.
    ParameterDocHint,
    /// `@return` in a function docblock.
    ReturnDocHint,
    /// A type the provider worked out itself, e.g. from `$x = new C()`.
    Inferred,
}

impl DeclarationSource {
    /// Whether the runtime enforces this declaration.
    #[inline]
    pub const fn is_enforced(self) -> bool {
        matches!(
            self,
            DeclarationSource::ParameterHint
                | DeclarationSource::ReturnHint
                | DeclarationSource::PropertyHint
        )
    }

    /// Rank used to pick one declaration of a variable when a scope has
    /// several. Higher wins.
    #[inline]
    pub const fn variable_precedence(self) -> u8 {
        match self {
            DeclarationSource::LocalDocHint => 3,
            DeclarationSource::ParameterHint => 2,
            DeclarationSource::Inferred => 1,
            _ => 0,
        }
    }
}

/// A declared type for a variable, property or callable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub ty: Type,
    pub source: DeclarationSource,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: Type, source: DeclarationSource) -> Self {
        Declaration {
            name: name.into(),
            ty,
            source,
        }
    }
}

pub type Declarations = SmallVec<[Declaration; 2]>;

/// A callable whose return type can be asked for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallableRef {
    Function(String),
    Method { class: ClassRef, name: String },
}

impl fmt::Display for CallableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableRef::Function(name) => write!(f, "{name}()"),
            CallableRef::Method { class, name } => write!(f, "{class}::{name}()"),
        }
    }
}

/// Failure of a provider query. The resolver treats every error as "no
/// information".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider cannot answer right now (index not built, cancelled).
    Unavailable,
    Failed(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Unavailable => f.write_str("context provider unavailable"),
            ProviderError::Failed(message) => write!(f, "context provider failed: {message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Read-only declaration queries.
///
/// Implementations are shared between worker threads when units are checked
/// in parallel, hence the `Sync` bound.
pub trait ContextProvider: ClassHierarchy + Sync {
    /// All declarations of variable `name` (without `$`) in `scope`, in
    /// declaration order. An empty list means the name is undeclared there.
    fn declared_types_of(&self, scope: ScopeId, name: &str) -> ProviderResult<Declarations>;

    /// The declared return type of a function or method.
    fn return_type_of(&self, callable: &CallableRef) -> ProviderResult<Option<Declaration>>;

    /// The declared type of property `property` on `class` (or an ancestor).
    fn member_type_of(
        &self,
        class: &ClassRef,
        property: &str,
    ) -> ProviderResult<Option<Declaration>>;
}

impl<T: ContextProvider + ?Sized> ContextProvider for &T {
    fn declared_types_of(&self, scope: ScopeId, name: &str) -> ProviderResult<Declarations> {
        (**self).declared_types_of(scope, name)
    }

    fn return_type_of(&self, callable: &CallableRef) -> ProviderResult<Option<Declaration>> {
        (**self).return_type_of(callable)
    }

    fn member_type_of(
        &self,
        class: &ClassRef,
        property: &str,
    ) -> ProviderResult<Option<Declaration>> {
        (**self).member_type_of(class, property)
    }
}

/// A provider that knows nothing. Every query answers "undeclared".
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProvider;

impl ClassHierarchy for NoopProvider {
    fn is_subclass_of(&self, _class: &ClassRef, _ancestor: &ClassRef) -> bool {
        false
    }
}

impl ContextProvider for NoopProvider {
    fn declared_types_of(&self, _scope: ScopeId, _name: &str) -> ProviderResult<Declarations> {
        Ok(Declarations::new())
    }

    fn return_type_of(&self, _callable: &CallableRef) -> ProviderResult<Option<Declaration>> {
        Ok(None)
    }

    fn member_type_of(
        &self,
        _class: &ClassRef,
        _property: &str,
    ) -> ProviderResult<Option<Declaration>> {
        Ok(None)
    }
}
