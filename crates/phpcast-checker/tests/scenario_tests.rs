//! End-to-end behavior on small programs.

use crate::declaration_table::DeclarationTable;
use crate::provider::{DeclarationSource, NoopProvider};
use crate::test_support::TreeBuilder;
use phpcast_syntax::BinaryOperator;
use phpcast_types::{ClassRef, Type};

#[test]
fn test_declared_parameter_cast_is_reported() {
    // function withStrictParameter(string $string) { (string) $string; }
    let mut b = TreeBuilder::new();
    let cast = b.cast("string", |b| b.var("$string"));
    let stmt = b.stmt(cast);
    let func = b.function("withStrictParameter", &["$string"], false, vec![stmt]);
    let root = b.file(vec![func]);

    let mut table = DeclarationTable::new();
    table.declare_variable(b.scope(func), "string", Type::String, DeclarationSource::ParameterHint);

    let findings = b.check(root, &table);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].cast, cast);
    assert_eq!(Some(findings[0].span), b.arena.span_of(cast));
}

#[test]
fn test_undeclared_parameter_cast_is_not_reported() {
    // function withWeakParameter($string) { (string) $string; }
    let mut b = TreeBuilder::new();
    let cast = b.cast("string", |b| b.var("$string"));
    let stmt = b.stmt(cast);
    let func = b.function("withWeakParameter", &["$string"], false, vec![stmt]);
    let root = b.file(vec![func]);

    assert!(b.check(root, &NoopProvider).is_empty());

    // A docblock `@param string $string` changes nothing.
    let mut table = DeclarationTable::new();
    table.declare_variable(
        b.scope(func),
        "string",
        Type::String,
        DeclarationSource::ParameterDocHint,
    );
    assert!(b.check(root, &table).is_empty());
}

#[test]
fn test_float_product_cast_to_float_is_reported() {
    // (float) (0.99 * 1);
    let mut b = TreeBuilder::new();
    let cast = b.cast("float", |b| {
        let left = b.float("0.99");
        let right = b.int("1");
        let product = b.binary(left, BinaryOperator::Mul, right);
        b.paren(product)
    });
    let stmt = b.stmt(cast);
    let root = b.file(vec![stmt]);

    let findings = b.check(root, &NoopProvider);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].operand_type, Type::Float);
}

#[test]
fn test_float_product_cast_to_int_is_not_reported() {
    // (int) (1 * 0.99); (int) (1 * 0.99 * 1);
    let mut b = TreeBuilder::new();
    let pair = b.cast("int", |b| {
        let left = b.int("1");
        let right = b.float("0.99");
        let product = b.binary(left, BinaryOperator::Mul, right);
        b.paren(product)
    });
    let chain = b.cast("int", |b| {
        let one = b.int("1");
        let ratio = b.float("0.99");
        let product = b.binary(one, BinaryOperator::Mul, ratio);
        let again = b.int("1");
        let chain = b.binary(product, BinaryOperator::Mul, again);
        b.paren(chain)
    });
    let s1 = b.stmt(pair);
    let s2 = b.stmt(chain);
    let root = b.file(vec![s1, s2]);

    assert!(b.check(root, &NoopProvider).is_empty());
}

/// class ClassWithSomeMethods {
///     /** @var string */ private $privateStringProperty;
///     public function withStrictReturn(): string {
///         return (string) $this->privateStringProperty;
///     }
/// }
fn class_with_returned_property_cast(
    native_return: bool,
) -> (TreeBuilder, phpcast_syntax::NodeIndex) {
    let mut b = TreeBuilder::new();
    let cast = b.cast("string", |b| {
        let this = b.var("this");
        b.prop(this, "privateStringProperty")
    });
    let ret = b.ret(cast);
    let method = b.method("withStrictReturn", native_return, false, vec![ret]);
    let class = b.class("ClassWithSomeMethods", vec![method]);
    let root = b.file(vec![class]);
    (b, root)
}

#[test]
fn test_returned_property_cast_with_declared_types_is_reported() {
    let (b, root) = class_with_returned_property_cast(true);
    let mut table = DeclarationTable::new();
    table.declare_property(
        &ClassRef::new("ClassWithSomeMethods"),
        "privateStringProperty",
        Type::String,
        DeclarationSource::PropertyDocHint,
    );

    let findings = b.check(root, &table);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].operand_type, Type::String);
}

#[test]
fn test_returned_property_cast_without_declarations_is_not_reported() {
    let (b, root) = class_with_returned_property_cast(false);
    assert!(b.check(root, &NoopProvider).is_empty());

    // Even with a native return type, an unresolvable property stays silent.
    let (b, root) = class_with_returned_property_cast(true);
    assert!(b.check(root, &NoopProvider).is_empty());
}
