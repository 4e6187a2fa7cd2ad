//! Well-known symbols, pre-interned at fixed indices.
//!
//! Every `StringInterner` interns `PREDEFINED` first and in order, so these
//! constants are valid for any interner and the hot dispatch path never has
//! to intern a string.

use crate::Name;

/// The wildcard class: matches any argument.
pub const ANY: Name = Name::from_raw(1);
/// Class of a formal that received no argument.
pub const MISSING: Name = Name::from_raw(2);

// Implicit classes of basic values.
pub const NULL: Name = Name::from_raw(3);
pub const LOGICAL: Name = Name::from_raw(4);
pub const INTEGER: Name = Name::from_raw(5);
pub const NUMERIC: Name = Name::from_raw(6);
pub const CHARACTER: Name = Name::from_raw(7);
pub const NAME: Name = Name::from_raw(8);
pub const FUNCTION: Name = Name::from_raw(9);
pub const S4: Name = Name::from_raw(10);
pub const VECTOR: Name = Name::from_raw(11);

// Attribute tags.
pub const CLASS: Name = Name::from_raw(12);
pub const CONTAINS: Name = Name::from_raw(13);
pub const DEFINED: Name = Name::from_raw(14);
pub const TARGET: Name = Name::from_raw(15);
pub const GENERIC: Name = Name::from_raw(16);
pub const PACKAGE: Name = Name::from_raw(17);
pub const SOURCE: Name = Name::from_raw(18);
pub const NAMES: Name = Name::from_raw(19);
/// Marks an object whose class is also registered as a legacy (S3) class.
pub const S3_CLASS: Name = Name::from_raw(20);

// Dispatch metadata symbols.
pub const DOT_GENERIC: Name = Name::from_raw(21);
pub const DOT_METHOD: Name = Name::from_raw(22);
pub const DOT_METHODS: Name = Name::from_raw(23);
pub const DOT_DEFINED: Name = Name::from_raw(24);
pub const DOT_TARGET: Name = Name::from_raw(25);

/// The variadic formal.
pub const DOTS: Name = Name::from_raw(26);

// Package names.
pub const METHODS: Name = Name::from_raw(27);
pub const BASE: Name = Name::from_raw(28);

/// Strings behind the constants above, indexed by `Name::raw`.
pub const PREDEFINED: [&str; 29] = [
    "",
    "ANY",
    "missing",
    "NULL",
    "logical",
    "integer",
    "numeric",
    "character",
    "name",
    "function",
    "S4",
    "vector",
    "class",
    "contains",
    "defined",
    "target",
    "generic",
    "package",
    "source",
    "names",
    ".S3Class",
    ".Generic",
    ".Method",
    ".Methods",
    ".defined",
    ".target",
    "...",
    "methods",
    "base",
];
