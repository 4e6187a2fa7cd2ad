//! Error types for dispatch.
//!
//! Only malformed calls and evaluator failures leave the engine as errors.
//! "No applicable method" is an outcome (`DispatchOutcome`), and
//! `ClassNotFound` is absorbed by the distance calculator.
//!
//! Messages are built from resolved names when the error is constructed,
//! so the error types do not need an interner to display.

use std::fmt;

use s4_ir::{EvalError, Name, StringInterner};

/// A class name that has no definition in the class table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassNotFound {
    pub class: Name,
}

impl ClassNotFound {
    pub fn new(class: Name) -> Self {
        ClassNotFound { class }
    }

    /// Format the error with the class name resolved.
    pub fn display<'a>(&self, interner: &'a StringInterner) -> ClassNotFoundDisplay<'a> {
        ClassNotFoundDisplay {
            class: interner.lookup(self.class),
        }
    }
}

/// Helper for displaying a `ClassNotFound` with its resolved name.
pub struct ClassNotFoundDisplay<'a> {
    class: &'a str,
}

impl fmt::Display for ClassNotFoundDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no definition for class \"{}\"", self.class)
    }
}

/// Actual arguments could not be bound to the generic's formals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentMatchError {
    /// A formal without a default received no argument.
    MissingArgument { formal: String },
    /// Two actual arguments matched the same formal.
    FormalMatchedMultipleTimes { formal: String },
    /// A tag is a prefix of several formals.
    AmbiguousPartialMatch { tag: String },
    /// Arguments left over and no `...` to absorb them.
    UnusedArguments { arguments: Vec<String> },
    /// Primitive dispatch needs a leading non-variadic formal for the receiver.
    NoReceiverSlot { generic: String },
}

impl fmt::Display for ArgumentMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { formal } => {
                write!(f, "argument \"{formal}\" is missing, with no default")
            }
            Self::FormalMatchedMultipleTimes { formal } => {
                write!(
                    f,
                    "formal argument \"{formal}\" matched by multiple actual arguments"
                )
            }
            Self::AmbiguousPartialMatch { tag } => {
                write!(f, "argument \"{tag}\" matches multiple formal arguments")
            }
            Self::UnusedArguments { arguments } => {
                let word = if arguments.len() == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "unused {word} ({})", arguments.join(", "))
            }
            Self::NoReceiverSlot { generic } => {
                write!(
                    f,
                    "generic \"{generic}\" has no formal argument to receive the dispatched object"
                )
            }
        }
    }
}

impl std::error::Error for ArgumentMatchError {}

/// Failure while changing the method registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Methods can only be set on a defined generic.
    UnknownGeneric { generic: String },
    /// The signature names more classes than the generic has dispatch formals.
    SignatureTooLong {
        generic: String,
        declared: usize,
        arity: usize,
    },
    /// Method definitions must be closures.
    NotAFunction { generic: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGeneric { generic } => {
                write!(f, "no existing definition for function \"{generic}\"")
            }
            Self::SignatureTooLong {
                generic,
                declared,
                arity,
            } => write!(
                f,
                "signature for \"{generic}\" has {declared} classes, but the generic dispatches on {arity}"
            ),
            Self::NotAFunction { generic } => {
                write!(f, "method definition for \"{generic}\" is not a function")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Failure that aborts a dispatch attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The call was malformed for the generic's formals.
    ArgumentMatch(ArgumentMatchError),
    /// Forcing an argument or running the selected method failed.
    Eval(EvalError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentMatch(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ArgumentMatch(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}

impl From<ArgumentMatchError> for DispatchError {
    fn from(e: ArgumentMatchError) -> Self {
        DispatchError::ArgumentMatch(e)
    }
}

impl From<EvalError> for DispatchError {
    fn from(e: EvalError) -> Self {
        DispatchError::Eval(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_not_found_display() {
        let interner = StringInterner::new();
        let class = interner.intern("Track");
        let err = ClassNotFound::new(class);
        assert_eq!(
            err.display(&interner).to_string(),
            "no definition for class \"Track\""
        );
    }

    #[test]
    fn test_argument_match_messages() {
        assert_eq!(
            ArgumentMatchError::MissingArgument {
                formal: "e1".to_string()
            }
            .to_string(),
            "argument \"e1\" is missing, with no default"
        );
        assert_eq!(
            ArgumentMatchError::UnusedArguments {
                arguments: vec!["y".to_string()]
            }
            .to_string(),
            "unused argument (y)"
        );
        assert_eq!(
            ArgumentMatchError::UnusedArguments {
                arguments: vec!["y".to_string(), "argument 3".to_string()]
            }
            .to_string(),
            "unused arguments (y, argument 3)"
        );
    }

    #[test]
    fn test_dispatch_error_wraps_sources() {
        let err: DispatchError = EvalError::new("object 'x' not found").into();
        assert_eq!(err.to_string(), "object 'x' not found");
        assert!(std::error::Error::source(&err).is_some());

        let err: DispatchError = ArgumentMatchError::AmbiguousPartialMatch {
            tag: "d".to_string(),
        }
        .into();
        assert!(matches!(err, DispatchError::ArgumentMatch(_)));
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::SignatureTooLong {
            generic: "+".to_string(),
            declared: 3,
            arity: 2,
        };
        assert_eq!(
            err.to_string(),
            "signature for \"+\" has 3 classes, but the generic dispatches on 2"
        );
    }
}
