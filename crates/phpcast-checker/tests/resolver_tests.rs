use super::*;
use crate::declaration_table::DeclarationTable;
use crate::options::CheckerOptions;
use crate::provider::{ContextProvider, NoopProvider};
use crate::test_support::{FailingProvider, TreeBuilder};
use phpcast_syntax::{BinaryOperator, UnaryOperator};

fn infer_with(
    b: &TreeBuilder,
    provider: &dyn ContextProvider,
    options: CheckerOptions,
    idx: NodeIndex,
) -> InferenceResult {
    let mut ctx = CheckerContext::new(&b.arena, provider, options);
    TypeResolver::new(&mut ctx).infer(idx)
}

fn infer(b: &TreeBuilder, provider: &dyn ContextProvider, idx: NodeIndex) -> InferenceResult {
    infer_with(b, provider, CheckerOptions::default(), idx)
}

#[test]
fn test_literals_have_their_lexical_type() {
    let mut b = TreeBuilder::new();
    let cases = [
        (b.int("1"), Type::Int),
        (b.float("0.99"), Type::Float),
        (b.string("text"), Type::String),
        (b.boolean(false), Type::Bool),
        (b.null(), Type::Null),
    ];
    let elements = vec![b.int("2")];
    let array = b.array(elements);
    let object = b.new_object("\\App\\User");
    for (idx, expected) in cases {
        assert_eq!(infer(&b, &NoopProvider, idx), InferenceResult::certain(expected));
    }
    assert_eq!(infer(&b, &NoopProvider, array).ty, Type::Array);
    assert_eq!(infer(&b, &NoopProvider, object).ty, Type::object("App\\User"));
}

#[test]
fn test_undeclared_variable_is_unknown() {
    let mut b = TreeBuilder::new();
    let var = b.var("x");
    let stmt = b.stmt(var);
    b.file(vec![stmt]);

    let result = infer(&b, &NoopProvider, var);
    assert_eq!(result, InferenceResult::unknown());
    assert_eq!(result.ty, Type::Mixed);
}

#[test]
fn test_variable_precedence_prefers_local_doc_hint() {
    let mut b = TreeBuilder::new();
    let var = b.var("value");
    let stmt = b.stmt(var);
    let func = b.function("f", &["value"], false, vec![stmt]);
    b.file(vec![func]);

    let mut table = DeclarationTable::new();
    let scope = b.scope(func);
    table.declare_variable(scope, "value", Type::Int, DeclarationSource::Inferred);
    table.declare_variable(scope, "value", Type::Float, DeclarationSource::ParameterHint);
    table.declare_variable(scope, "value", Type::String, DeclarationSource::LocalDocHint);

    assert_eq!(infer(&b, &table, var), InferenceResult::certain(Type::String));
}

#[test]
fn test_parameter_hint_beats_inferred() {
    let mut b = TreeBuilder::new();
    let var = b.var("value");
    let stmt = b.stmt(var);
    let func = b.function("f", &["value"], false, vec![stmt]);
    b.file(vec![func]);

    let mut table = DeclarationTable::new();
    let scope = b.scope(func);
    table.declare_variable(scope, "value", Type::Int, DeclarationSource::Inferred);
    table.declare_variable(scope, "value", Type::Float, DeclarationSource::ParameterHint);

    assert_eq!(infer(&b, &table, var).ty, Type::Float);
}

#[test]
fn test_parameter_doc_hint_is_not_trusted() {
    let mut b = TreeBuilder::new();
    let var = b.var("string");
    let stmt = b.stmt(var);
    let func = b.function("withWeakParameter", &["string"], false, vec![stmt]);
    b.file(vec![func]);

    let mut table = DeclarationTable::new();
    table.declare_variable(
        b.scope(func),
        "string",
        Type::String,
        DeclarationSource::ParameterDocHint,
    );

    assert!(!infer(&b, &table, var).is_certain());
}

#[test]
fn test_mixed_declaration_is_unknown() {
    let mut b = TreeBuilder::new();
    let var = b.var("callback");
    let stmt = b.stmt(var);
    let root = b.file(vec![stmt]);

    let mut table = DeclarationTable::new();
    table.declare_variable(
        b.scope(root),
        "callback",
        phpcast_types::parse_type_hint("callable"),
        DeclarationSource::ParameterHint,
    );

    assert!(!infer(&b, &table, var).is_certain());
}

#[test]
fn test_this_in_instance_method_is_enclosing_class() {
    let mut b = TreeBuilder::new();
    let this = b.var("this");
    let stmt = b.stmt(this);
    let method = b.method("run", false, false, vec![stmt]);
    b.class("Service", vec![method]);

    assert_eq!(infer(&b, &NoopProvider, this).ty, Type::object("Service"));
}

#[test]
fn test_this_in_static_method_or_function_is_unknown() {
    let mut b = TreeBuilder::new();
    let in_static = b.var("this");
    let stmt = b.stmt(in_static);
    let method = b.method("make", false, true, vec![stmt]);
    b.class("Service", vec![method]);

    let in_function = b.var("this");
    let stmt = b.stmt(in_function);
    b.function("helper", &[], false, vec![stmt]);

    assert!(!infer(&b, &NoopProvider, in_static).is_certain());
    assert!(!infer(&b, &NoopProvider, in_function).is_certain());
}

#[test]
fn test_arrow_function_sees_outer_declarations() {
    let mut b = TreeBuilder::new();
    let inner = b.var("prefix");
    let arrow = b.arrow(&["item"], inner);
    let stmt = b.stmt(arrow);
    let func = b.function("f", &["prefix"], false, vec![stmt]);
    b.file(vec![func]);

    let mut table = DeclarationTable::new();
    table.declare_variable(b.scope(func), "prefix", Type::String, DeclarationSource::ParameterHint);

    assert_eq!(infer(&b, &table, inner).ty, Type::String);
}

#[test]
fn test_arrow_function_parameter_shadows_outer_variable() {
    let mut b = TreeBuilder::new();
    let inner = b.var("value");
    let arrow = b.arrow(&["value"], inner);
    let stmt = b.stmt(arrow);
    let func = b.function("f", &["value"], false, vec![stmt]);
    b.file(vec![func]);

    let mut table = DeclarationTable::new();
    table.declare_variable(b.scope(func), "value", Type::String, DeclarationSource::ParameterHint);

    assert!(!infer(&b, &table, inner).is_certain());
}

#[test]
fn test_closure_sees_only_used_variables() {
    let mut b = TreeBuilder::new();
    let used = b.var("used");
    let used_stmt = b.stmt(used);
    let unused = b.var("other");
    let unused_stmt = b.stmt(unused);
    let closure = b.closure(&[], &["$used"], vec![used_stmt, unused_stmt]);
    let stmt = b.stmt(closure);
    let root = b.file(vec![stmt]);

    let mut table = DeclarationTable::new();
    let outer = b.scope(root);
    table.declare_variable(outer, "used", Type::Int, DeclarationSource::LocalDocHint);
    table.declare_variable(outer, "other", Type::Int, DeclarationSource::LocalDocHint);

    assert_eq!(infer(&b, &table, used).ty, Type::Int);
    assert!(!infer(&b, &table, unused).is_certain());
}

#[test]
fn test_property_access_on_this() {
    let mut b = TreeBuilder::new();
    let this = b.var("this");
    let private = b.prop(this, "private");
    let this2 = b.var("this");
    let protected = b.prop(this2, "protected");
    let s1 = b.stmt(private);
    let s2 = b.stmt(protected);
    let method = b.method("run", true, false, vec![s1, s2]);
    b.class("ClassWithSomeMethods", vec![method]);

    let mut table = DeclarationTable::new();
    let class = ClassRef::new("ClassWithSomeMethods");
    table.declare_property(&class, "private", Type::String, DeclarationSource::PropertyDocHint);

    assert_eq!(infer(&b, &table, private).ty, Type::String);
    assert!(!infer(&b, &table, protected).is_certain());

    let strict = CheckerOptions {
        trust_property_doc_hints: false,
        ..CheckerOptions::default()
    };
    assert!(!infer_with(&b, &table, strict, private).is_certain());
}

#[test]
fn test_property_access_needs_certain_object() {
    let mut b = TreeBuilder::new();
    let receiver = b.var("unknown");
    let access = b.prop(receiver, "name");
    let stmt = b.stmt(access);
    b.file(vec![stmt]);

    let mut table = DeclarationTable::new();
    table.declare_property(
        &ClassRef::new("User"),
        "name",
        Type::String,
        DeclarationSource::PropertyHint,
    );

    assert!(!infer(&b, &table, access).is_certain());
}

#[test]
fn test_static_property_resolves_self() {
    let mut b = TreeBuilder::new();
    let access = b.static_prop("self", "$count");
    let stmt = b.stmt(access);
    let method = b.method("count", true, true, vec![stmt]);
    b.class("Counter", vec![method]);

    let mut table = DeclarationTable::new();
    table.declare_property(
        &ClassRef::new("Counter"),
        "count",
        Type::Int,
        DeclarationSource::PropertyHint,
    );

    assert_eq!(infer(&b, &table, access).ty, Type::Int);
}

#[test]
fn test_calls_trust_only_native_return_types() {
    let mut b = TreeBuilder::new();
    let strict = b.call("strict_name");
    let weak = b.call("weak_name");
    let s1 = b.stmt(strict);
    let s2 = b.stmt(weak);
    b.file(vec![s1, s2]);

    let mut table = DeclarationTable::new();
    table.declare_function_return("strict_name", Type::String, DeclarationSource::ReturnHint);
    table.declare_function_return("weak_name", Type::String, DeclarationSource::ReturnDocHint);

    assert_eq!(infer(&b, &table, strict).ty, Type::String);
    assert!(!infer(&b, &table, weak).is_certain());
}

#[test]
fn test_method_call_on_new_instance() {
    let mut b = TreeBuilder::new();
    let object = b.new_object("ClassWithSomeMethods");
    let instance = b.var("instance");
    let assign = b.assign(instance, object);
    let s1 = b.stmt(assign);
    let receiver = b.var("instance");
    let call = b.method_call(receiver, "withStrictReturn");
    let s2 = b.stmt(call);
    let root = b.file(vec![s1, s2]);

    let mut table = DeclarationTable::new();
    let class = ClassRef::new("ClassWithSomeMethods");
    table.declare_variable(
        b.scope(root),
        "instance",
        Type::object("ClassWithSomeMethods"),
        DeclarationSource::Inferred,
    );
    table.declare_method_return(
        &class,
        "withStrictReturn",
        Type::String,
        DeclarationSource::ReturnHint,
    );

    assert_eq!(infer(&b, &table, assign).ty, Type::object("classwithsomemethods"));
    assert_eq!(infer(&b, &table, call).ty, Type::String);
}

#[test]
fn test_static_call_resolves_named_class() {
    let mut b = TreeBuilder::new();
    let call = b.static_call("\\Factory", "create");
    let parent_call = b.static_call("parent", "create");
    let s1 = b.stmt(call);
    let s2 = b.stmt(parent_call);
    let method = b.method("build", true, false, vec![s1, s2]);
    b.class("Factory", vec![method]);

    let mut table = DeclarationTable::new();
    table.declare_method_return(
        &ClassRef::new("Factory"),
        "CREATE",
        Type::Array,
        DeclarationSource::ReturnHint,
    );

    assert_eq!(infer(&b, &table, call).ty, Type::Array);
    assert!(!infer(&b, &table, parent_call).is_certain());
}

#[test]
fn test_arithmetic_chain_folds_left() {
    // 1 * 0.99 * 1
    let mut b = TreeBuilder::new();
    let one = b.int("1");
    let ratio = b.float("0.99");
    let product = b.binary(one, BinaryOperator::Mul, ratio);
    let one_again = b.int("1");
    let chain = b.binary(product, BinaryOperator::Mul, one_again);

    assert_eq!(infer(&b, &NoopProvider, product).ty, Type::Float);
    assert_eq!(infer(&b, &NoopProvider, chain).ty, Type::Float);
}

#[test]
fn test_int_arithmetic_on_declared_variable() {
    let mut b = TreeBuilder::new();
    let var = b.var("integer");
    let one = b.int("1");
    let sum = b.binary(var, BinaryOperator::Add, one);
    let paren = b.paren(sum);
    let stmt = b.stmt(paren);
    let root = b.file(vec![stmt]);

    let mut table = DeclarationTable::new();
    table.declare_variable(b.scope(root), "integer", Type::Int, DeclarationSource::LocalDocHint);

    assert_eq!(infer(&b, &table, paren), InferenceResult::certain(Type::Int));
}

#[test]
fn test_unary_and_inner_casts() {
    let mut b = TreeBuilder::new();
    let var = b.var("x");
    let negated = b.unary(UnaryOperator::Not, var);
    let inner = b.cast("int", |b| b.var("y"));
    let object_cast = b.cast("object", |b| b.var("z"));
    let minus = b.unary(UnaryOperator::Minus, inner);

    assert_eq!(infer(&b, &NoopProvider, negated).ty, Type::Bool);
    assert_eq!(infer(&b, &NoopProvider, inner).ty, Type::Int);
    assert_eq!(infer(&b, &NoopProvider, minus).ty, Type::Int);
    assert!(!infer(&b, &NoopProvider, object_cast).is_certain());
}

#[test]
fn test_other_nodes_are_unknown() {
    let mut b = TreeBuilder::new();
    let child = b.int("1");
    let other = b.other(vec![child]);

    assert!(!infer(&b, &NoopProvider, other).is_certain());
    assert!(!infer(&b, &NoopProvider, NodeIndex::NONE).is_certain());
}

#[test]
fn test_provider_failure_degrades_to_unknown() {
    let mut b = TreeBuilder::new();
    let var = b.var("x");
    let call = b.call("f");
    let s1 = b.stmt(var);
    let s2 = b.stmt(call);
    b.file(vec![s1, s2]);

    for error in [ProviderError::Unavailable, ProviderError::Failed("index corrupt".into())] {
        let provider = FailingProvider(error);
        assert!(!infer(&b, &provider, var).is_certain());
        assert!(!infer(&b, &provider, call).is_certain());
    }
}

#[test]
fn test_results_are_memoized() {
    let mut b = TreeBuilder::new();
    let left = b.int("1");
    let right = b.float("2.5");
    let sum = b.binary(left, BinaryOperator::Add, right);

    let mut ctx = CheckerContext::new(&b.arena, &NoopProvider, CheckerOptions::default());
    let first = TypeResolver::new(&mut ctx).infer(sum);
    assert_eq!(ctx.node_types.len(), 3);
    assert_eq!(ctx.node_types.get(&sum), Some(&first));

    let second = TypeResolver::new(&mut ctx).infer(sum);
    assert_eq!(first, second);

    ctx.clear_cache();
    assert!(ctx.node_types.is_empty());
}

#[test]
fn test_depth_limit_degrades_to_unknown() {
    let mut b = TreeBuilder::new();
    let mut expr = b.int("1");
    for _ in 0..10 {
        expr = b.paren(expr);
    }

    let shallow = CheckerOptions {
        max_inference_depth: 5,
        ..CheckerOptions::default()
    };
    assert!(!infer_with(&b, &NoopProvider, shallow, expr).is_certain());
    assert_eq!(infer(&b, &NoopProvider, expr).ty, Type::Int);
}

#[test]
fn test_cast_target_types() {
    assert_eq!(cast_target_type(CastKind::from_keyword("integer")), Some(Type::Int));
    assert_eq!(cast_target_type(CastKind::from_keyword("boolean")), Some(Type::Bool));
    assert_eq!(cast_target_type(CastKind::from_keyword("double")), Some(Type::Float));
    assert_eq!(cast_target_type(CastKind::from_keyword("real")), Some(Type::Float));
    assert_eq!(cast_target_type(CastKind::from_keyword("binary")), Some(Type::String));
    assert_eq!(cast_target_type(CastKind::from_keyword("array")), Some(Type::Array));
    assert_eq!(cast_target_type(CastKind::Object), None);
    assert_eq!(cast_target_type(CastKind::Unset), None);
    assert_eq!(cast_target_type(CastKind::from_keyword("resource")), None);
}

/// `function f(string $s) { <before>; return $s; }` with `$s` declared by
/// its native hint. Returns the read of `$s` in the return.
fn string_parameter_with(
    before: impl FnOnce(&mut TreeBuilder) -> NodeIndex,
) -> (TreeBuilder, NodeIndex, DeclarationTable) {
    let mut b = TreeBuilder::new();
    let statement = before(&mut b);
    let read = b.var("s");
    let ret = b.ret(read);
    let func = b.function("f", &["s"], false, vec![statement, ret]);
    b.file(vec![func]);

    let mut table = DeclarationTable::new();
    table.declare_variable(b.scope(func), "s", Type::String, DeclarationSource::ParameterHint);
    (b, read, table)
}

#[test]
fn test_reassigned_parameter_loses_native_type() {
    // $s = 1;
    let (b, read, table) = string_parameter_with(|b| {
        let target = b.var("s");
        let value = b.int("1");
        let assign = b.assign(target, value);
        b.stmt(assign)
    });
    assert!(!infer(&b, &table, read).is_certain());

    // foreach ($items as $s) {}
    let (b, read, table) = string_parameter_with(|b| {
        let items = b.var("items");
        let target = b.var("s");
        b.other(vec![items, target])
    });
    assert!(!infer(&b, &table, read).is_certain());
}

#[test]
fn test_parameter_keeps_type_when_only_other_variables_change() {
    // $t = $s;
    let (b, read, table) = string_parameter_with(|b| {
        let target = b.var("t");
        let value = b.var("s");
        let assign = b.assign(target, value);
        b.stmt(assign)
    });
    assert_eq!(infer(&b, &table, read), InferenceResult::certain(Type::String));

    // fn($s) => $s = 1;
    let (b, read, table) = string_parameter_with(|b| {
        let target = b.var("s");
        let value = b.int("1");
        let assign = b.assign(target, value);
        let arrow = b.arrow(&["s"], assign);
        b.stmt(arrow)
    });
    assert_eq!(infer(&b, &table, read), InferenceResult::certain(Type::String));
}

#[test]
fn test_closure_capturing_parameter_may_rebind_it() {
    // function () use (&$s) { $s = 1; };
    let (b, read, table) = string_parameter_with(|b| {
        let target = b.var("s");
        let value = b.int("1");
        let assign = b.assign(target, value);
        let body = b.stmt(assign);
        let closure = b.closure(&[], &["s"], vec![body]);
        b.stmt(closure)
    });
    assert!(!infer(&b, &table, read).is_certain());

    // function () { $s = 1; };
    let (b, read, table) = string_parameter_with(|b| {
        let target = b.var("s");
        let value = b.int("1");
        let assign = b.assign(target, value);
        let body = b.stmt(assign);
        let closure = b.closure(&[], &[], vec![body]);
        b.stmt(closure)
    });
    assert_eq!(infer(&b, &table, read), InferenceResult::certain(Type::String));
}

#[test]
fn test_rebinding_scan_does_not_affect_doc_hinted_locals() {
    let (b, read, mut table) = string_parameter_with(|b| {
        let target = b.var("s");
        let value = b.int("1");
        let assign = b.assign(target, value);
        b.stmt(assign)
    });
    let func = b.arena.enclosing_function_like(read);
    table.declare_variable(b.scope(func), "s", Type::Int, DeclarationSource::LocalDocHint);

    assert_eq!(infer(&b, &table, read), InferenceResult::certain(Type::Int));
}

#[test]
fn test_integer_literals_beyond_64_bits_are_floats() {
    let mut b = TreeBuilder::new();
    let cases = [
        ("9223372036854775807", Type::Int),
        ("9223372036854775808", Type::Float),
        ("1_000_000", Type::Int),
        ("0x7FFF_FFFF_FFFF_FFFF", Type::Int),
        ("0XFFFFFFFFFFFFFFFF", Type::Float),
        ("0b101", Type::Int),
        ("0o17", Type::Int),
        ("017", Type::Int),
        ("0777777777777777777777", Type::Int),
        ("01000000000000000000000", Type::Float),
        ("0", Type::Int),
    ];
    let nodes: Vec<(NodeIndex, Type)> = cases
        .into_iter()
        .map(|(text, expected)| (b.int(text), expected))
        .collect();
    for (idx, expected) in nodes {
        assert_eq!(infer(&b, &NoopProvider, idx), InferenceResult::certain(expected));
    }

    let malformed = b.int("09");
    assert!(!infer(&b, &NoopProvider, malformed).is_certain());
}

#[test]
fn test_self_resolves_but_late_static_binding_does_not() {
    let mut b = TreeBuilder::new();
    let self_prop = b.static_prop("self", "$count");
    let static_prop = b.static_prop("static", "$count");
    let self_call = b.static_call("self", "make");
    let static_call = b.static_call("static", "make");
    let parent_call = b.static_call("parent", "make");
    let new_self = b.new_object("self");
    let new_static = b.new_object("static");
    let nodes = [
        self_prop,
        static_prop,
        self_call,
        static_call,
        parent_call,
        new_self,
        new_static,
    ];
    let statements: Vec<NodeIndex> = nodes.iter().map(|&n| b.stmt(n)).collect();
    let method = b.method("build", true, false, statements);
    b.class("Widget", vec![method]);

    let class = ClassRef::new("Widget");
    let mut table = DeclarationTable::new();
    table.declare_property(&class, "count", Type::Int, DeclarationSource::PropertyHint);
    table.declare_method_return(&class, "make", Type::String, DeclarationSource::ReturnHint);

    assert_eq!(infer(&b, &table, self_prop).ty, Type::Int);
    assert_eq!(infer(&b, &table, self_call).ty, Type::String);
    assert_eq!(infer(&b, &table, new_self).ty, Type::object("Widget"));
    for unresolved in [static_prop, static_call, parent_call, new_static] {
        assert!(!infer(&b, &table, unresolved).is_certain());
    }
}

#[test]
fn test_depth_cut_off_caches_ancestors_only() {
    let mut b = TreeBuilder::new();
    let mut expr = b.int("1");
    for _ in 0..10 {
        expr = b.paren(expr);
    }
    let shallow = CheckerOptions {
        max_inference_depth: 5,
        ..CheckerOptions::default()
    };

    let mut ctx = CheckerContext::new(&b.arena, &NoopProvider, shallow);
    assert!(!TypeResolver::new(&mut ctx).infer(expr).is_certain());
    // Parentheses at depths 0..5 are cached; the cut-off node is not.
    assert_eq!(ctx.node_types.len(), 5);
    assert!(ctx.node_types.values().all(|result| !result.is_certain()));

    assert!(!TypeResolver::new(&mut ctx).infer(expr).is_certain());
}
