//! Dispatch metadata bound in the frame of a selected method.

use s4_ir::{sym, Name, StringInterner, Value};

use crate::arguments::CallingArguments;

/// The special bindings a method body sees when it is invoked with
/// metadata: `.Generic`, `.Method`, `.Methods`, `.defined` and `.target`.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchMetadata {
    /// `.Generic`: the `generic` attribute of the method, if it has one.
    pub generic: Option<Value>,
    /// `.defined`: the `defined` attribute of the method, if it has one.
    pub defined: Option<Value>,
    /// `.Method`: the selected method itself.
    pub method: Value,
    /// `.Methods`: marker naming the dispatching operation.
    pub methods: Value,
    /// `.target`: the classes dispatch ran on.
    pub target: Value,
}

impl DispatchMetadata {
    /// Build the metadata for `method` by walking its attributes.
    pub fn assemble(method: &Value, methods: Value, target: Value) -> Self {
        let mut generic = None;
        let mut defined = None;
        for (tag, value) in method.attributes().iter() {
            match tag {
                sym::DEFINED => defined = Some(value.clone()),
                sym::GENERIC => generic = Some(value.clone()),
                // `source` and anything else is not bound.
                _ => {}
            }
        }
        DispatchMetadata {
            generic,
            defined,
            method: method.clone(),
            methods,
            target,
        }
    }

    /// Symbol/value pairs to bind, skipping absent attributes.
    pub fn bindings(&self) -> Vec<(Name, &Value)> {
        let mut bindings = Vec::with_capacity(5);
        if let Some(generic) = &self.generic {
            bindings.push((sym::DOT_GENERIC, generic));
        }
        bindings.push((sym::DOT_METHOD, &self.method));
        bindings.push((sym::DOT_METHODS, &self.methods));
        if let Some(defined) = &self.defined {
            bindings.push((sym::DOT_DEFINED, defined));
        }
        bindings.push((sym::DOT_TARGET, &self.target));
        bindings
    }

    /// Value bound to `symbol`.
    pub fn get(&self, symbol: Name) -> Option<&Value> {
        match symbol {
            sym::DOT_GENERIC => self.generic.as_ref(),
            sym::DOT_METHOD => Some(&self.method),
            sym::DOT_METHODS => Some(&self.methods),
            sym::DOT_DEFINED => self.defined.as_ref(),
            sym::DOT_TARGET => Some(&self.target),
            _ => None,
        }
    }
}

/// `.Methods` marker for dispatch from a primitive: `.Primitive("op")`.
pub fn primitive_marker(interner: &StringInterner, op: Name) -> Value {
    let marker = format!(".Primitive(\"{}\")", interner.lookup(op));
    Value::symbol(interner.intern(&marker))
}

/// `.target` for a call: the effective class of each dispatch slot, named
/// by formal, with package `methods` throughout.
pub fn target_signature(args: &CallingArguments) -> Value {
    let classes: Vec<Name> = args.classes().collect();
    let formals: Vec<Name> = args.slots().iter().map(|slot| slot.formal()).collect();
    let packages = vec![sym::METHODS; classes.len()];
    Value::character(classes)
        .with_attribute(sym::NAMES, Value::character(formals))
        .with_attribute(sym::PACKAGE, Value::character(packages))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
