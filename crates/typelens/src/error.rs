//! Error types for the `typelens` engine.
//!
//! This module defines the error types surfaced by descriptor resolution,
//! covering caller misuse (querying type-variable metadata on something that
//! is not a type variable) and structural inconsistencies in the inheritance
//! data supplied by the host type system.
//!
//! An unrecognized descriptor is *not* an error: classification and record
//! assembly report it as `None`, and callers decide whether that is
//! acceptable.

use std::fmt;

/// Broad category of a resolution failure.
///
/// Every [`Error`] variant belongs to exactly one kind; callers that only
/// care about the category can match on [`Error::kind`] instead of the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a descriptor the requested operation is not
    /// defined for.
    InvalidArgument,

    /// The host type system produced inheritance data this engine cannot
    /// reconcile.
    StructuralInconsistency,
}

/// Errors that can occur during descriptor resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Type-variable metadata was requested for a non-type-variable
    /// descriptor.
    NotATypeVar {
        /// Name of the offending descriptor.
        name: String,
    },

    /// A wrapped-runtime identity was registered against a special form
    /// that was never catalogued.
    UnknownSpecial {
        /// Name of the special form the patch targeted.
        special: String,
    },

    /// A declared original base could not be matched to any erased base of
    /// the same class.
    UnmatchedDeclaredBases {
        /// Name of the descriptor whose bases were being resolved.
        name: String,
        /// Names of the declared bases left unconsumed.
        leftover: Vec<String>,
    },

    /// Two inheritance paths reached one runtime class through different
    /// parametric forms.
    ConflictingForms {
        /// Name of the runtime class the paths collided on.
        class: String,
    },

    /// Parent records remained after every linearized ancestor was
    /// processed.
    UnconsumedParents {
        /// Names of the classes whose parent groups were never consumed.
        leftover: Vec<String>,
    },

    /// An argument conflict required synthesizing a union, but no union
    /// form is registered.
    MissingUnionForm,
}

impl Error {
    /// Returns the broad category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotATypeVar { .. } | Error::UnknownSpecial { .. } => {
                ErrorKind::InvalidArgument
            }
            Error::UnmatchedDeclaredBases { .. }
            | Error::ConflictingForms { .. }
            | Error::UnconsumedParents { .. }
            | Error::MissingUnionForm => ErrorKind::StructuralInconsistency,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotATypeVar { name } => {
                write!(f, "'{name}' is not a type variable")
            }
            Error::UnknownSpecial { special } => {
                write!(
                    f,
                    "cannot patch unregistered special form '{special}'"
                )
            }
            Error::UnmatchedDeclaredBases { name, leftover } => {
                write!(
                    f,
                    "declared bases of '{name}' with no erased counterpart: {}",
                    leftover.join(", ")
                )
            }
            Error::ConflictingForms { class } => {
                write!(
                    f,
                    "two different parametric forms erase to class '{class}'"
                )
            }
            Error::UnconsumedParents { leftover } => {
                write!(
                    f,
                    "parent groups left unconsumed after linearization: {}",
                    leftover.join(", ")
                )
            }
            Error::MissingUnionForm => {
                write!(
                    f,
                    "argument conflict requires a union form, but none is registered"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for `typelens` resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
