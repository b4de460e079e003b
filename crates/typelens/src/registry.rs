//! The form/class registry.
//!
//! The registry is the process-wide index of known parametric formers: which
//! declaration-level form erases to which concrete runtime class, which
//! descriptors are special forms needing bespoke extraction rules, and which
//! descriptors are literal primitives. It is built once, from the catalogue
//! the host supplies, and is immutable afterwards; concurrent callers share
//! one instance by reference without locking.
//!
//! Internally the two lookup directions are two ordinary one-directional
//! maps, populated pairwise by the builder so they cannot drift apart.
//!
//! # Example
//!
//! ```rust
//! use typelens::{DescriptorKind, Registry, SpecialForm, Strategy, TypeSystem};
//!
//! let ts = TypeSystem::new();
//! let class = ts.declare("Mapping", DescriptorKind::Class).register();
//! let former = ts
//!     .declare("MappingOf", DescriptorKind::Former)
//!     .erasure(class)
//!     .register();
//! let union = ts.declare("Union", DescriptorKind::Former).register();
//!
//! let registry = Registry::builder(&ts, Strategy::Canonical)
//!     .former(former)
//!     .special(SpecialForm::Union, union)
//!     .build();
//!
//! assert_eq!(registry.class_of(former), Some(class));
//! assert_eq!(registry.form_of(class), Some(former));
//! assert_eq!(registry.special_of(union), Some(SpecialForm::Union));
//! ```

use crate::descriptor::DescriptorId;
use crate::error::{Error, Result};
use crate::system::TypeSystem;
use fxhash::{FxHashMap, FxHashSet};
use std::fmt;

/// Special forms whose argument and parameter extraction need bespoke rules
/// rather than generic attribute access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    /// Callable type with a parameter list and return type.
    Callable,
    /// Class-variable marker wrapping a single payload type.
    ClassVar,
    /// Root generic marker.
    Generic,
    /// Optional shorthand.
    Optional,
    /// Union of member types.
    Union,
    /// Heterogeneous tuple.
    Tuple,
    /// Protocol marker.
    Protocol,
    /// Type-variable constructor.
    TypeVar,
    /// New-type wrapper constructor.
    NewType,
    /// Type-of-a-type former.
    Type,
}

impl SpecialForm {
    /// Canonical name, used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialForm::Callable => "Callable",
            SpecialForm::ClassVar => "ClassVar",
            SpecialForm::Generic => "Generic",
            SpecialForm::Optional => "Optional",
            SpecialForm::Union => "Union",
            SpecialForm::Tuple => "Tuple",
            SpecialForm::Protocol => "Protocol",
            SpecialForm::TypeVar => "TypeVar",
            SpecialForm::NewType => "NewType",
            SpecialForm::Type => "Type",
        }
    }
}

impl fmt::Display for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior variant of the host runtime, chosen once at registry
/// construction.
///
/// `Canonical` is the coherent object model; `Legacy` enables the two
/// accommodations older host representations need: tolerance of a leftover
/// root-generic-marker parent after MRO-origin merging, and reliance on
/// wrapped-runtime identities registered through
/// [`RegistryBuilder::recognize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Modern, coherent host representation.
    #[default]
    Canonical,
    /// Older host representation with wrapper-kind special forms and a
    /// synthetic root generic marker.
    Legacy,
}

/// Immutable form/class index.
///
/// Built through [`Registry::builder`]; see the [module docs](self).
pub struct Registry {
    strategy: Strategy,
    form_to_class: FxHashMap<DescriptorId, DescriptorId>,
    class_to_form: FxHashMap<DescriptorId, DescriptorId>,
    specials: FxHashMap<DescriptorId, SpecialForm>,
    special_pairs: FxHashMap<SpecialForm, (DescriptorId, DescriptorId)>,
    literals: FxHashSet<DescriptorId>,
}

impl Registry {
    /// Starts building a registry against the given descriptor table.
    #[must_use]
    pub fn builder(system: &TypeSystem, strategy: Strategy) -> RegistryBuilder<'_> {
        RegistryBuilder {
            system,
            registry: Registry {
                strategy,
                form_to_class: FxHashMap::default(),
                class_to_form: FxHashMap::default(),
                specials: FxHashMap::default(),
                special_pairs: FxHashMap::default(),
                literals: FxHashSet::default(),
            },
        }
    }

    /// The behavior variant this registry was built for.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runtime class a registered form erases to.
    #[must_use]
    pub fn class_of(&self, form: DescriptorId) -> Option<DescriptorId> {
        self.form_to_class.get(&form).copied()
    }

    /// Parametric form a registered class belongs to.
    #[must_use]
    pub fn form_of(&self, class: DescriptorId) -> Option<DescriptorId> {
        self.class_to_form.get(&class).copied()
    }

    /// Whether the descriptor is known to the registry in either direction.
    #[must_use]
    pub fn is_known(&self, d: DescriptorId) -> bool {
        self.form_to_class.contains_key(&d) || self.class_to_form.contains_key(&d)
    }

    /// Whether the descriptor is a literal primitive.
    #[must_use]
    pub fn is_literal(&self, d: DescriptorId) -> bool {
        self.literals.contains(&d)
    }

    /// Special-form tag of a descriptor, if it is one.
    #[must_use]
    pub fn special_of(&self, d: DescriptorId) -> Option<SpecialForm> {
        self.specials.get(&d).copied()
    }

    /// Canonical `(form, class)` pair of a registered special form.
    #[must_use]
    pub fn special_pair(&self, tag: SpecialForm) -> Option<(DescriptorId, DescriptorId)> {
        self.special_pairs.get(&tag).copied()
    }
}

/// Builder assembling a [`Registry`] from the host catalogue.
pub struct RegistryBuilder<'a> {
    system: &'a TypeSystem,
    registry: Registry,
}

impl RegistryBuilder<'_> {
    /// Registers an ordinary parametric former.
    ///
    /// The erased class is read through the former's erasure pointer; a
    /// former without one maps to itself.
    #[must_use]
    pub fn former(self, form: DescriptorId) -> Self {
        let class = self.system.erasure(form).unwrap_or(form);
        self.former_with_class(form, class)
    }

    /// Registers a parametric former with an explicit erased class.
    ///
    /// Correction entry for class-identity edge cases where the erasure
    /// pointer does not name the class callers observe at runtime.
    #[must_use]
    pub fn former_with_class(mut self, form: DescriptorId, class: DescriptorId) -> Self {
        self.registry.form_to_class.insert(form, class);
        self.registry.class_to_form.insert(class, form);
        self
    }

    /// Registers a special form that has no distinct runtime class.
    ///
    /// The descriptor maps to itself in both directions.
    #[must_use]
    pub fn special(self, tag: SpecialForm, d: DescriptorId) -> Self {
        self.special_with_class(tag, d, d)
    }

    /// Registers a special form with a separate erased class.
    #[must_use]
    pub fn special_with_class(
        mut self,
        tag: SpecialForm,
        form: DescriptorId,
        class: DescriptorId,
    ) -> Self {
        self.registry.form_to_class.insert(form, class);
        self.registry.class_to_form.insert(class, form);
        self.registry.specials.insert(form, tag);
        self.registry.specials.insert(class, tag);
        self.registry.special_pairs.insert(tag, (form, class));
        self
    }

    /// Registers a literal primitive descriptor.
    #[must_use]
    pub fn literal(mut self, d: DescriptorId) -> Self {
        self.registry.literals.insert(d);
        self
    }

    /// Patches a previously registered special form to recognize an
    /// additional wrapped-runtime identity.
    ///
    /// Host-runtime variants sometimes represent one special form by a
    /// different wrapper object; after this call the extra identity resolves
    /// to the same canonical pair in every lookup direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSpecial`] if `tag` was never registered.
    pub fn recognize(mut self, tag: SpecialForm, extra: DescriptorId) -> Result<Self> {
        let (form, class) =
            self.registry
                .special_pairs
                .get(&tag)
                .copied()
                .ok_or(Error::UnknownSpecial {
                    special: tag.as_str().to_string(),
                })?;
        self.registry.form_to_class.insert(extra, class);
        self.registry.class_to_form.insert(extra, form);
        self.registry.specials.insert(extra, tag);
        Ok(self)
    }

    /// Finalizes the registry. No mutation is possible afterwards.
    #[must_use]
    pub fn build(self) -> Registry {
        self.registry
    }
}
