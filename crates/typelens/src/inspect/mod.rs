//! Descriptor resolution.
//!
//! [`Inspector`] is the consumer-facing entry point: it borrows a
//! [`TypeSystem`] and a [`Registry`] and answers the five resolution
//! questions about any descriptor:
//!
//! - [`classify`](Inspector::classify): the canonical `(form, class)` pair
//! - [`type_args`](Inspector::type_args): supplied type arguments
//! - [`type_params`](Inspector::type_params): declared, still-free type
//!   variables
//! - [`type_info`](Inspector::type_info): the composed canonical record
//! - [`bases`](Inspector::bases) / [`mro`](Inspector::mro) /
//!   [`instantiated_mro`](Inspector::instantiated_mro): inheritance
//!   resolution with argument substitution and conflict merging
//!
//! Every operation is read-only with respect to its descriptor input and
//! returns caller-owned values; resolving the same descriptor twice yields
//! structurally equal results.

mod bases;
mod classify;
mod extract;
mod info;
mod mro;

pub use bases::BaseRelation;
pub use classify::Classified;
pub use info::{TypeInfo, TypeVarInfo};

use crate::registry::Registry;
use crate::system::TypeSystem;

/// Resolution context over one descriptor table and one registry.
///
/// Cheap to construct and to copy around; holds no state of its own.
#[derive(Clone, Copy)]
pub struct Inspector<'a> {
    types: &'a TypeSystem,
    registry: &'a Registry,
}

impl<'a> Inspector<'a> {
    /// Creates an inspector over the given table and registry.
    #[must_use]
    pub fn new(types: &'a TypeSystem, registry: &'a Registry) -> Self {
        Self { types, registry }
    }

    /// The descriptor table this inspector reads from.
    #[must_use]
    pub fn types(&self) -> &'a TypeSystem {
        self.types
    }

    /// The registry this inspector resolves against.
    #[must_use]
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }
}
