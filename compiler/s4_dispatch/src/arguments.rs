//! Binding actual call arguments to a generic's formals.
//!
//! Matching follows ordinary argument binding in three passes: exact tags,
//! then partial (prefix) tags for formals before `...`, then positional
//! filling of the formals still open before `...`. Whatever is left goes
//! to `...`, or is an error when the generic has none.
//!
//! Classes are computed after matching succeeds, so a malformed call
//! never forces anything.

use s4_ir::{sym, Name, Promise, StringInterner, Value};

use crate::errors::{ArgumentMatchError, DispatchError};
use crate::evaluator::Evaluator;
use crate::shape::{FormalKind, GenericShape};

/// One argument as written at the call site.
#[derive(Debug)]
pub struct ActualArg {
    pub tag: Option<Name>,
    pub value: Promise,
}

impl ActualArg {
    pub fn positional(value: Promise) -> Self {
        ActualArg { tag: None, value }
    }

    pub fn named(tag: Name, value: Promise) -> Self {
        ActualArg {
            tag: Some(tag),
            value,
        }
    }

    /// The tag, treating an empty tag as no tag.
    fn match_tag(&self) -> Option<Name> {
        self.tag.filter(|&tag| tag != Name::EMPTY)
    }
}

/// A dispatch slot: one non-variadic formal and what it received.
#[derive(Debug)]
pub struct CallingArgument {
    formal: Name,
    value: Option<Promise>,
    class: Name,
}

impl CallingArgument {
    pub fn formal(&self) -> Name {
        self.formal
    }

    /// The promise bound to the formal; `None` when the formal was not supplied.
    pub fn value(&self) -> Option<&Promise> {
        self.value.as_ref()
    }

    /// Effective class used for ranking (`missing` when not supplied).
    pub fn class(&self) -> Name {
        self.class
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// An argument handed to the selected method, in formal order.
#[derive(Clone, Copy, Debug)]
pub struct PromisedArg<'a> {
    pub tag: Option<Name>,
    pub value: &'a Promise,
}

/// Arguments of one dispatch call, bound to the generic's formals.
#[derive(Debug)]
pub struct CallingArguments {
    slots: Vec<CallingArgument>,
    dots: Vec<ActualArg>,
    /// Number of slots preceding `...`, when the generic has `...`.
    dots_position: Option<usize>,
}

impl CallingArguments {
    /// Arguments of a primitive call: `source` is the already evaluated
    /// receiver and is bound to the first formal; `args` are the remaining
    /// call arguments.
    pub fn primitive(
        shape: &GenericShape,
        source: Value,
        args: Vec<ActualArg>,
        eval: &mut dyn Evaluator,
        interner: &StringInterner,
        generic: Name,
    ) -> Result<Self, DispatchError> {
        let binding = bind(shape, Some(Promise::forced(source)), args, interner, generic)?;
        Self::classify(shape, binding, eval, interner)
    }

    /// Arguments of a call to a standard generic.
    pub fn standard(
        shape: &GenericShape,
        args: Vec<ActualArg>,
        eval: &mut dyn Evaluator,
        interner: &StringInterner,
        generic: Name,
    ) -> Result<Self, DispatchError> {
        let binding = bind(shape, None, args, interner, generic)?;
        Self::classify(shape, binding, eval, interner)
    }

    /// Turn a binding into dispatch slots, forcing each supplied argument
    /// once to learn its class.
    fn classify(
        shape: &GenericShape,
        binding: Binding,
        eval: &mut dyn Evaluator,
        interner: &StringInterner,
    ) -> Result<Self, DispatchError> {
        let Binding { assigned, dots } = binding;

        // Missing formals are reported before anything is forced.
        for (formal, arg) in shape.formals().iter().zip(&assigned) {
            if formal.kind == FormalKind::Required && arg.is_none() {
                return Err(ArgumentMatchError::MissingArgument {
                    formal: interner.lookup(formal.name).to_string(),
                }
                .into());
            }
        }

        let mut slots = Vec::with_capacity(shape.dispatch_arity());
        for (formal, arg) in shape.formals().iter().zip(assigned) {
            if formal.is_variadic() {
                continue;
            }
            let slot = match arg {
                Some(arg) => {
                    let class = arg
                        .value
                        .force_with(|expr| eval.force(expr))?
                        .class_name();
                    CallingArgument {
                        formal: formal.name,
                        value: Some(arg.value),
                        class,
                    }
                }
                None => CallingArgument {
                    formal: formal.name,
                    value: None,
                    class: sym::MISSING,
                },
            };
            slots.push(slot);
        }

        Ok(CallingArguments {
            slots,
            dots,
            dots_position: shape.dots_position(),
        })
    }

    /// Dispatch slots in formal order.
    pub fn slots(&self) -> &[CallingArgument] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Arguments captured by `...`, unforced and in call order.
    pub fn dots(&self) -> &[ActualArg] {
        &self.dots
    }

    /// Effective classes of the dispatch slots.
    pub fn classes(&self) -> impl Iterator<Item = Name> + '_ {
        self.slots.iter().map(CallingArgument::class)
    }

    /// Value of the first dispatch slot, if it was supplied.
    pub fn receiver(&self) -> Option<&Value> {
        self.slots
            .first()
            .and_then(CallingArgument::value)
            .and_then(Promise::value)
    }

    /// Everything to pass to the method: supplied slots tagged with their
    /// formal, with the `...` arguments spliced in at the position of `...`.
    pub fn promised_args(&self) -> Vec<PromisedArg<'_>> {
        let split = self
            .dots_position
            .map_or(self.slots.len(), |position| position.min(self.slots.len()));
        let (before, after) = self.slots.split_at(split);
        let dots = self.dots.iter().map(|arg| PromisedArg {
            tag: arg.tag,
            value: &arg.value,
        });
        before
            .iter()
            .filter_map(slot_arg)
            .chain(dots)
            .chain(after.iter().filter_map(slot_arg))
            .collect()
    }
}

fn slot_arg(slot: &CallingArgument) -> Option<PromisedArg<'_>> {
    slot.value.as_ref().map(|value| PromisedArg {
        tag: Some(slot.formal),
        value,
    })
}

/// Result of matching: what each formal received (indexed like
/// `shape.formals()`, `None` for `...`) and the `...` arguments.
struct Binding {
    assigned: Vec<Option<ActualArg>>,
    dots: Vec<ActualArg>,
}

fn bind(
    shape: &GenericShape,
    receiver: Option<Promise>,
    actuals: Vec<ActualArg>,
    interner: &StringInterner,
    generic: Name,
) -> Result<Binding, ArgumentMatchError> {
    let formals = shape.formals();
    let dots_position = shape.dots_position();
    let mut assigned: Vec<Option<ActualArg>> = formals.iter().map(|_| None).collect();

    if let Some(receiver) = receiver {
        match (formals.first(), assigned.first_mut()) {
            (Some(first), Some(slot)) if !first.is_variadic() => {
                *slot = Some(ActualArg::positional(receiver));
            }
            _ => {
                return Err(ArgumentMatchError::NoReceiverSlot {
                    generic: interner.lookup(generic).to_string(),
                })
            }
        }
    }

    let mut pending: Vec<Option<ActualArg>> = actuals.into_iter().map(Some).collect();

    // Exact tags.
    for entry in &mut pending {
        let Some(tag) = entry.as_ref().and_then(ActualArg::match_tag) else {
            continue;
        };
        let Some(index) = formals
            .iter()
            .position(|formal| !formal.is_variadic() && formal.name == tag)
        else {
            continue;
        };
        if assigned[index].is_some() {
            return Err(ArgumentMatchError::FormalMatchedMultipleTimes {
                formal: interner.lookup(tag).to_string(),
            });
        }
        assigned[index] = entry.take();
    }

    // Partial tags, only against formals before `...` left open by exact matching.
    let open_limit = dots_position.unwrap_or(formals.len());
    let exactly_matched: Vec<bool> = assigned.iter().map(Option::is_some).collect();
    for entry in &mut pending {
        let Some(tag) = entry.as_ref().and_then(ActualArg::match_tag) else {
            continue;
        };
        let prefix = interner.lookup(tag);
        let mut candidates = formals
            .iter()
            .take(open_limit)
            .enumerate()
            .filter(|&(index, formal)| {
                !exactly_matched[index] && interner.lookup(formal.name).starts_with(prefix)
            })
            .map(|(index, _)| index);
        let Some(index) = candidates.next() else {
            continue;
        };
        if candidates.next().is_some() {
            return Err(ArgumentMatchError::AmbiguousPartialMatch {
                tag: prefix.to_string(),
            });
        }
        if assigned[index].is_some() {
            return Err(ArgumentMatchError::FormalMatchedMultipleTimes {
                formal: interner.lookup(formals[index].name).to_string(),
            });
        }
        assigned[index] = entry.take();
    }

    // Positional.
    for entry in &mut pending {
        if !entry.as_ref().is_some_and(|arg| arg.match_tag().is_none()) {
            continue;
        }
        let Some(index) = assigned.iter().take(open_limit).position(Option::is_none) else {
            break;
        };
        assigned[index] = entry.take();
    }

    let leftovers: Vec<ActualArg> = pending.into_iter().flatten().collect();
    if dots_position.is_none() && !leftovers.is_empty() {
        return Err(ArgumentMatchError::UnusedArguments {
            arguments: leftovers
                .iter()
                .map(|arg| describe_unused(arg, interner))
                .collect(),
        });
    }

    Ok(Binding {
        assigned,
        dots: leftovers,
    })
}

fn describe_unused(arg: &ActualArg, interner: &StringInterner) -> String {
    match (arg.match_tag(), arg.value.value()) {
        (Some(tag), _) => interner.lookup(tag).to_string(),
        (None, Some(value)) => format!("<{}>", interner.lookup(value.class_name())),
        (None, None) => "<promise>".to_string(),
    }
}
