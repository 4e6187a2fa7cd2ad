use super::*;
use crate::arguments::ActualArg;
use crate::shape::GenericShape;
use crate::test_helpers::MockEvaluator;
use pretty_assertions::assert_eq;
use s4_ir::{ExprId, Promise};

fn method(interner: &StringInterner) -> Value {
    let base = interner.intern("Base");
    let signature = Value::character(vec![base, sym::ANY]);
    Value::closure(interner.intern("m"), ExprId::new(0))
        .with_attribute(sym::TARGET, signature.clone())
        .with_attribute(sym::DEFINED, signature)
        .with_attribute(
            sym::GENERIC,
            Value::string(interner.intern("+")).with_attribute(sym::PACKAGE, Value::string(sym::BASE)),
        )
        .with_attribute(sym::SOURCE, Value::string(interner.intern("file.R")))
}

#[test]
fn test_assemble_takes_defined_and_generic() {
    let interner = StringInterner::new();
    let method = method(&interner);
    let marker = primitive_marker(&interner, interner.intern("+"));

    let metadata = DispatchMetadata::assemble(&method, marker.clone(), Value::Null);

    assert_eq!(metadata.defined.as_ref(), method.attribute(sym::DEFINED));
    assert_eq!(metadata.generic.as_ref(), method.attribute(sym::GENERIC));
    assert_eq!(metadata.method, method);
    assert_eq!(metadata.methods, marker);
    assert_eq!(metadata.get(sym::SOURCE), None);
}

#[test]
fn test_assemble_without_attributes() {
    let interner = StringInterner::new();
    let bare = Value::closure(interner.intern("bare"), ExprId::new(0));

    let metadata = DispatchMetadata::assemble(&bare, Value::Null, Value::Null);

    assert!(metadata.generic.is_none());
    assert!(metadata.defined.is_none());
    let bound: Vec<Name> = metadata.bindings().iter().map(|&(symbol, _)| symbol).collect();
    assert_eq!(
        bound,
        vec![sym::DOT_METHOD, sym::DOT_METHODS, sym::DOT_TARGET]
    );
}

#[test]
fn test_bindings_and_get_agree() {
    let interner = StringInterner::new();
    let method = method(&interner);
    let metadata = DispatchMetadata::assemble(&method, Value::Null, Value::Null);

    for (symbol, value) in metadata.bindings() {
        assert_eq!(metadata.get(symbol), Some(value));
    }
    assert_eq!(metadata.bindings().len(), 5);
}

#[test]
fn test_primitive_marker() {
    let interner = StringInterner::new();
    let marker = primitive_marker(&interner, interner.intern("[<-"));
    assert_eq!(
        marker,
        Value::symbol(interner.intern(".Primitive(\"[<-\")"))
    );
}

#[test]
fn test_target_signature() {
    let interner = StringInterner::new();
    let shape = GenericShape::parse(&interner, &["e1", "e2?"]);
    let track = interner.intern("Track");
    let mut eval = MockEvaluator::new();
    let args = CallingArguments::primitive(
        &shape,
        Value::s4_object(track),
        Vec::<ActualArg>::new(),
        &mut eval,
        &interner,
        interner.intern("-"),
    )
    .unwrap();

    let target = target_signature(&args);
    assert_eq!(target.as_character(), Some(&[track, sym::MISSING][..]));
    assert_eq!(
        target.attribute(sym::NAMES).and_then(Value::as_character),
        Some(&[interner.intern("e1"), interner.intern("e2")][..])
    );
    assert_eq!(
        target.attribute(sym::PACKAGE).and_then(Value::as_character),
        Some(&[sym::METHODS, sym::METHODS][..])
    );
    // Receiver promise was created forced.
    assert!(args.slots()[0].value().is_some_and(Promise::is_forced));
}
