//! Global registry of generics and their S4 methods.
//!
//! Methods are kept per generic in registration order; that order is the
//! tie-break of method selection, so replacing a method keeps its slot.

#![expect(
    clippy::disallowed_types,
    reason = "methods and shapes are shared with lookup tables without copying"
)]

use std::sync::Arc;

use rustc_hash::FxHashMap;
use s4_ir::{sym, Closure, Heap, Name, SharedInterner, Value};

use crate::class_table::is_basic_class;
use crate::errors::RegistryError;
use crate::generic::{super_group_of, GROUP_GENERICS, PRIMITIVE_GENERICS};
use crate::shape::GenericShape;

/// Package reported for user-defined generics and classes.
const GLOBAL_ENV: &str = ".GlobalEnv";

/// A generic function that methods can be set on.
#[derive(Clone, Debug)]
pub struct GenericDefinition {
    pub name: Name,
    pub group: Option<Name>,
    pub shape: Arc<GenericShape>,
    /// Package the generic lives in (`base` for primitives).
    pub package: Name,
}

/// One registered method.
///
/// The signature is padded with `ANY` to the generic's dispatch arity for
/// ranking; `declared_len` is how many classes were actually declared.
/// `function` is the method closure, carrying `target`, `defined` and
/// `generic` attributes built from the declared classes only.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDefinition {
    generic: Name,
    signature: Vec<Name>,
    declared_len: usize,
    function: Value,
}

impl MethodDefinition {
    pub fn generic(&self) -> Name {
        self.generic
    }

    pub fn signature(&self) -> &[Name] {
        &self.signature
    }

    /// The classes given at registration, without the `ANY` padding.
    pub fn declared_signature(&self) -> &[Name] {
        &self.signature[..self.declared_len]
    }

    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    pub fn function(&self) -> &Value {
        &self.function
    }

    pub fn closure(&self) -> Option<&Heap<Closure>> {
        self.function.as_closure()
    }
}

pub struct MethodRegistry {
    interner: SharedInterner,
    generics: FxHashMap<Name, GenericDefinition>,
    methods: FxHashMap<Name, Vec<Arc<MethodDefinition>>>,
}

impl MethodRegistry {
    /// A registry without any generics.
    pub fn new(interner: SharedInterner) -> Self {
        MethodRegistry {
            interner,
            generics: FxHashMap::default(),
            methods: FxHashMap::default(),
        }
    }

    /// A registry knowing every primitive and group generic.
    pub fn with_primitive_generics(interner: SharedInterner) -> Self {
        let mut registry = MethodRegistry::new(interner);
        for primitive in GROUP_GENERICS.iter().chain(PRIMITIVE_GENERICS) {
            let name = registry.interner.intern(primitive.name);
            let group = primitive.group.map(|g| registry.interner.intern(g));
            let shape = GenericShape::parse(&registry.interner, primitive.formals);
            registry.insert_generic(name, group, shape, sym::BASE);
        }
        registry
    }

    /// Define (or redefine) a generic. Existing methods are kept.
    pub fn define_generic(&mut self, name: Name, group: Option<Name>, shape: GenericShape) {
        let package = self.interner.intern(GLOBAL_ENV);
        self.insert_generic(name, group, shape, package);
    }

    fn insert_generic(&mut self, name: Name, group: Option<Name>, shape: GenericShape, package: Name) {
        self.generics.insert(
            name,
            GenericDefinition {
                name,
                group,
                shape: Arc::new(shape),
                package,
            },
        );
    }

    pub fn generic(&self, name: Name) -> Option<&GenericDefinition> {
        self.generics.get(&name)
    }

    /// Group enclosing `group`, if any.
    pub fn super_group(&self, group: Name) -> Option<Name> {
        super_group_of(self.interner.lookup(group)).map(|g| self.interner.intern(g))
    }

    /// Register `function` as the method of `generic` for `signature`.
    ///
    /// A method with the same (padded) signature is replaced in place.
    pub fn set_method(
        &mut self,
        generic: Name,
        signature: &[Name],
        function: Value,
    ) -> Result<Arc<MethodDefinition>, RegistryError> {
        let generic_name = || self.interner.lookup(generic).to_string();
        let definition = self
            .generics
            .get(&generic)
            .ok_or_else(|| RegistryError::UnknownGeneric {
                generic: generic_name(),
            })?;
        if function.as_closure().is_none() {
            return Err(RegistryError::NotAFunction {
                generic: generic_name(),
            });
        }
        let arity = definition.shape.dispatch_arity();
        if signature.len() > arity {
            return Err(RegistryError::SignatureTooLong {
                generic: generic_name(),
                declared: signature.len(),
                arity,
            });
        }

        let function = self.attach_method_metadata(definition, signature, function);
        let mut padded = signature.to_vec();
        padded.resize(arity, sym::ANY);
        let method = Arc::new(MethodDefinition {
            generic,
            signature: padded,
            declared_len: signature.len(),
            function,
        });

        let methods = self.methods.entry(generic).or_default();
        match methods
            .iter_mut()
            .find(|existing| existing.signature == method.signature)
        {
            Some(existing) => *existing = Arc::clone(&method),
            None => methods.push(Arc::clone(&method)),
        }
        tracing::debug!(
            generic = self.interner.lookup(generic),
            methods = methods.len(),
            "method registered"
        );
        Ok(method)
    }

    /// Remove the method of `generic` for `signature`. Returns whether one existed.
    pub fn remove_method(&mut self, generic: Name, signature: &[Name]) -> bool {
        let Some(arity) = self
            .generics
            .get(&generic)
            .map(|definition| definition.shape.dispatch_arity())
        else {
            return false;
        };
        let mut padded = signature.to_vec();
        padded.resize(arity, sym::ANY);

        let Some(methods) = self.methods.get_mut(&generic) else {
            return false;
        };
        let before = methods.len();
        methods.retain(|method| method.signature != padded);
        let removed = methods.len() != before;
        if methods.is_empty() {
            self.methods.remove(&generic);
        }
        removed
    }

    /// Methods of `generic`, in registration order.
    pub fn methods_for(&self, generic: Name) -> &[Arc<MethodDefinition>] {
        self.methods
            .get(&generic)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_methods(&self, generic: Name) -> bool {
        self.methods.contains_key(&generic)
    }

    /// Record the defining metadata on the method closure: `target` and
    /// `defined` (the declared classes, named by the leading dispatch
    /// formals, with a `package` per class) followed by `generic` (with the
    /// generic's package).
    fn attach_method_metadata(
        &self,
        generic: &GenericDefinition,
        signature: &[Name],
        function: Value,
    ) -> Value {
        let global_env = self.interner.intern(GLOBAL_ENV);
        let packages: Vec<Name> = signature
            .iter()
            .map(|&class| {
                if is_basic_class(class) {
                    sym::METHODS
                } else {
                    global_env
                }
            })
            .collect();
        let formals: Vec<Name> = generic
            .shape
            .dispatch_formals()
            .take(signature.len())
            .collect();
        let signature_value = Value::character(signature.to_vec())
            .with_attribute(sym::NAMES, Value::character(formals))
            .with_attribute(sym::PACKAGE, Value::character(packages));
        let generic_value = Value::string(generic.name)
            .with_attribute(sym::PACKAGE, Value::string(generic.package));

        function
            .with_attribute(sym::TARGET, signature_value.clone())
            .with_attribute(sym::DEFINED, signature_value)
            .with_attribute(sym::GENERIC, generic_value)
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("generics", &self.generics.len())
            .field("generics_with_methods", &self.methods.len())
            .finish()
    }
}
