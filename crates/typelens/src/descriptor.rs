//! Descriptor handles and kind tags.
//!
//! A descriptor is one type expression known to the host type system: a bare
//! parametric former, an argument-bound instantiation, a concrete runtime
//! class, a type variable, a protocol marker, or an alias wrapper. Descriptors
//! are identified by [`DescriptorId`], a lightweight 32-bit handle into the
//! host's descriptor table; identity comparison is id comparison.
//!
//! Every descriptor carries a [`DescriptorKind`] tag describing what *kind* of
//! object it is at the host-runtime level. Classification dispatches on this
//! tag instead of inspecting the descriptor's runtime representation.

use crate::registry::SpecialForm;
use std::fmt;

/// A handle identifying one descriptor in a [`TypeSystem`].
///
/// Ids provide:
/// - O(1) equality comparison (just compare u32 values)
/// - Minimal footprint (4 bytes, `Copy`)
/// - Type safety through the newtype wrapper
///
/// [`TypeSystem`]: crate::system::TypeSystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DescriptorId(u32);

impl DescriptorId {
    /// Creates an id from a raw index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the raw index value as usize.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of object a descriptor is at the host-runtime level.
///
/// The tag is supplied by the host when the descriptor is registered and is
/// immutable afterwards. It replaces duck-typed "is-a" probing: the
/// classifier matches on the tag, never on the descriptor's representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// A concrete, non-generic runtime class.
    Class,

    /// A bare parametric former (declaration-level generic), e.g. an
    /// ordered-mapping-of former before any arguments are bound.
    Former,

    /// An argument-bound instantiation of a former.
    Instantiated,

    /// A type variable.
    TypeVar,

    /// A protocol marker.
    ProtocolMarker,

    /// A callable alias carrying a supertype link (a new-type wrapper).
    NewType,

    /// A legacy alias wrapper holding a single bound type variable.
    LegacyAlias,

    /// A value-level instance of a dedicated wrapper kind representing a
    /// special form on host runtimes that do not expose the form by
    /// identity.
    SpecialWrapper(SpecialForm),
}

impl DescriptorKind {
    /// Whether descriptors of this kind can never carry supplied arguments.
    ///
    /// Bare formers, protocol markers, and plain classes are generic *bases*;
    /// arguments only appear once a former is instantiated.
    #[must_use]
    pub const fn is_bare_base(self) -> bool {
        matches!(
            self,
            DescriptorKind::Class
                | DescriptorKind::Former
                | DescriptorKind::ProtocolMarker
        )
    }
}

/// Parameter list and return type of a callable descriptor.
///
/// Stored separately from the flat argument list because callables keep the
/// two halves distinct at declaration time; argument extraction concatenates
/// them (parameters first, return type last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSignature {
    /// Parameter types, in declaration order.
    pub params: Vec<DescriptorId>,
    /// Return type.
    pub returns: DescriptorId,
}
