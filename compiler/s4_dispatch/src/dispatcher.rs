//! Dispatch entry points.
//!
//! One dispatch attempt runs: descriptor, lookup table, early exit when the
//! table is empty, argument matching, selection, then invocation with or
//! without dispatch metadata. Read locks on the registry and the class
//! table are only held while building the table and ranking candidates;
//! the evaluator always runs unlocked.

use s4_ir::{sym, Name, SharedInterner, Value};

use crate::arguments::{ActualArg, CallingArguments};
use crate::class_cache::ClassHierarchyCache;
use crate::class_table::ClassTable;
use crate::distance::DistanceCalculator;
use crate::errors::DispatchError;
use crate::evaluator::Evaluator;
use crate::generic::GenericDescriptor;
use crate::lookup_table::{MethodLookupTable, RankedMethod};
use crate::metadata::{primitive_marker, target_signature, DispatchMetadata};
use crate::registry::MethodRegistry;
use crate::shared::SharedMutable;

/// Dispatcher configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Always invoke methods with dispatch metadata, never the fast path.
    pub always_bind_metadata: bool,
}

/// Result of a dispatch attempt that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    /// A method was selected and returned this value.
    Applied(Value),
    /// No S4 method applies; the caller falls back to its default behavior.
    NoApplicableMethod,
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied(_))
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            DispatchOutcome::Applied(value) => Some(value),
            DispatchOutcome::NoApplicableMethod => None,
        }
    }
}

/// S4 dispatch for one evaluation context.
///
/// Owns the class hierarchy cache; shares the class table and method
/// registry with whatever defines classes and methods.
pub struct S4Dispatcher {
    interner: SharedInterner,
    classes: SharedMutable<ClassTable>,
    registry: SharedMutable<MethodRegistry>,
    cache: ClassHierarchyCache,
    options: DispatchOptions,
}

impl S4Dispatcher {
    /// Dispatcher with the basic classes and primitive generics.
    pub fn new(interner: SharedInterner) -> Self {
        DispatcherBuilder::new().interner(interner).build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn classes(&self) -> &SharedMutable<ClassTable> {
        &self.classes
    }

    pub fn registry(&self) -> &SharedMutable<MethodRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &ClassHierarchyCache {
        &self.cache
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Try S4 dispatch for a primitive operation.
    ///
    /// `source` is the evaluated receiver (the first operand); `args` are the
    /// remaining call arguments. Returns `NoApplicableMethod` when no method
    /// is registered for `op` or its groups, or none is compatible.
    #[tracing::instrument(level = "debug", skip_all, fields(op = self.interner.lookup(op)))]
    pub fn try_dispatch_from_primitive(
        &self,
        eval: &mut dyn Evaluator,
        source: Value,
        args: Vec<ActualArg>,
        group: Option<Name>,
        op: Name,
    ) -> Result<DispatchOutcome, DispatchError> {
        let generic = GenericDescriptor::primitive(op, group);
        let table = self.lookup_table(&generic);
        if table.is_empty() {
            return Ok(DispatchOutcome::NoApplicableMethod);
        }

        let arguments =
            CallingArguments::primitive(table.shape(), source, args, eval, &self.interner, op)?;
        let Some(selected) = self.select(&table, &arguments) else {
            tracing::debug!("no applicable method");
            return Ok(DispatchOutcome::NoApplicableMethod);
        };
        self.invoke(eval, &generic, &selected, &arguments, || {
            primitive_marker(&self.interner, op)
        })
    }

    /// Try S4 dispatch for a standard generic called with `args`.
    ///
    /// There is no implicit receiver; the legacy-class check looks at the
    /// first dispatch argument.
    #[tracing::instrument(level = "debug", skip_all, fields(generic = self.interner.lookup(name)))]
    pub fn try_dispatch_standard(
        &self,
        eval: &mut dyn Evaluator,
        name: Name,
        args: Vec<ActualArg>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let generic = GenericDescriptor::standard(name);
        let table = self.lookup_table(&generic);
        if table.is_empty() {
            return Ok(DispatchOutcome::NoApplicableMethod);
        }

        let arguments = CallingArguments::standard(table.shape(), args, eval, &self.interner, name)?;
        let Some(selected) = self.select(&table, &arguments) else {
            tracing::debug!("no applicable method");
            return Ok(DispatchOutcome::NoApplicableMethod);
        };
        self.invoke(eval, &generic, &selected, &arguments, || Value::symbol(name))
    }

    /// Snapshot the candidates for `generic`.
    pub fn lookup_table(&self, generic: &GenericDescriptor) -> MethodLookupTable {
        MethodLookupTable::new(generic, &self.registry.read())
    }

    /// Rank the candidates of `table` against matched arguments.
    pub fn select(
        &self,
        table: &MethodLookupTable,
        arguments: &CallingArguments,
    ) -> Option<RankedMethod> {
        let classes = self.classes.read();
        let calc = DistanceCalculator::new(&self.cache, &*classes);
        table.select_method(arguments, &calc)
    }

    fn invoke(
        &self,
        eval: &mut dyn Evaluator,
        generic: &GenericDescriptor,
        selected: &RankedMethod,
        arguments: &CallingArguments,
        methods_marker: impl FnOnce() -> Value,
    ) -> Result<DispatchOutcome, DispatchError> {
        let value = if self.dispatch_without_metadata(generic, selected, arguments.receiver()) {
            tracing::debug!("invoking without dispatch metadata");
            eval.call(selected.function(), arguments)?
        } else {
            let metadata = DispatchMetadata::assemble(
                selected.function(),
                methods_marker(),
                target_signature(arguments),
            );
            eval.apply_with_metadata(selected.function(), arguments, &metadata)?
        };
        Ok(DispatchOutcome::Applied(value))
    }

    /// The metadata bindings are skipped for non-replacement operations when
    /// the method matched exactly and was not inherited from a group, or
    /// when the receiver carries a legacy class.
    fn dispatch_without_metadata(
        &self,
        generic: &GenericDescriptor,
        selected: &RankedMethod,
        receiver: Option<&Value>,
    ) -> bool {
        if self.options.always_bind_metadata || generic.is_assignment_form(&self.interner) {
            return false;
        }
        (!selected.is_group_generic() && selected.is_exact())
            || receiver.is_some_and(has_legacy_class)
    }
}

impl std::fmt::Debug for S4Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S4Dispatcher")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Non-empty `.S3Class` attribute.
fn has_legacy_class(value: &Value) -> bool {
    value
        .attribute(sym::S3_CLASS)
        .is_some_and(|classes| classes.length() != 0)
}

/// Builder for `S4Dispatcher`.
///
/// Anything not set is created fresh: a new interner, a class table with
/// the basic classes, and a registry with the primitive generics.
#[derive(Default)]
pub struct DispatcherBuilder {
    interner: Option<SharedInterner>,
    classes: Option<SharedMutable<ClassTable>>,
    registry: Option<SharedMutable<MethodRegistry>>,
    options: DispatchOptions,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interner. Must be the interner the class table and registry use.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Share an existing class table.
    #[must_use]
    pub fn classes(mut self, classes: SharedMutable<ClassTable>) -> Self {
        self.classes = Some(classes);
        self
    }

    /// Share an existing method registry.
    #[must_use]
    pub fn registry(mut self, registry: SharedMutable<MethodRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Disable the fast path.
    #[must_use]
    pub fn always_bind_metadata(mut self, enabled: bool) -> Self {
        self.options.always_bind_metadata = enabled;
        self
    }

    pub fn build(self) -> S4Dispatcher {
        let interner = self.interner.unwrap_or_default();
        let classes = self.classes.unwrap_or_else(|| {
            SharedMutable::new(ClassTable::with_basic_classes(interner.clone()))
        });
        let registry = self.registry.unwrap_or_else(|| {
            SharedMutable::new(MethodRegistry::with_primitive_generics(interner.clone()))
        });
        S4Dispatcher {
            interner,
            classes,
            registry,
            cache: ClassHierarchyCache::new(),
            options: self.options,
        }
    }
}
