//! Canonical record assembly.
//!
//! [`TypeInfo`] is the composed, version-independent description of one
//! descriptor: its parametric form, its erased runtime class, its supplied
//! arguments (each canonicalized recursively), and its declared type
//! parameters with their metadata. Assembling the same descriptor twice
//! yields equal records, and canonicalizing an already-canonical record
//! changes nothing.

use crate::descriptor::{DescriptorId, DescriptorKind};
use crate::error::{Error, Result};
use crate::inspect::classify::Classified;
use crate::inspect::Inspector;
use crate::registry::SpecialForm;

/// Canonical description of one descriptor.
///
/// Form and class are identity handles, so equality is structural all the
/// way down while still distinguishing special-form instances that merely
/// look alike: two records over different special singletons carry different
/// ids and never compare equal.
///
/// Invariant: `args` is empty exactly when the source descriptor was
/// unparameterized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Declaration-level parametric form.
    pub form: DescriptorId,
    /// Concrete runtime class the form erases to.
    pub class: DescriptorId,
    /// Special-form tag of `form`, when it is one.
    pub special: Option<SpecialForm>,
    /// Supplied arguments, canonicalized recursively.
    pub args: Vec<TypeInfo>,
    /// Declared, still-free type parameters.
    pub parameters: Vec<TypeVarInfo>,
}

impl TypeInfo {
    /// A leaf record for a descriptor the classifier does not recognize.
    ///
    /// Plain classes are valid argument types even though they carry no
    /// parametric identity of their own.
    #[must_use]
    fn leaf(d: DescriptorId) -> Self {
        Self {
            form: d,
            class: d,
            special: None,
            args: Vec::new(),
            parameters: Vec::new(),
        }
    }
}

/// Metadata of one type variable, read from the host system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVarInfo {
    /// Declared name.
    pub name: String,
    /// Constraint types, canonicalized.
    pub constraints: Vec<TypeInfo>,
    /// Upper bound, canonicalized.
    pub bound: Option<Box<TypeInfo>>,
    /// Covariance flag.
    pub covariant: bool,
    /// Contravariance flag.
    pub contravariant: bool,
}

impl Inspector<'_> {
    /// Assembles the canonical record for a descriptor.
    ///
    /// Returns `None` when classification does not recognize the
    /// descriptor; that is the caller-checked "don't know" result, not a
    /// failure.
    #[must_use]
    pub fn type_info(&self, d: DescriptorId) -> Option<TypeInfo> {
        let classified = self.classify(d)?;
        Some(self.assemble(d, classified))
    }

    /// Reads the metadata of a type variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotATypeVar`] when the descriptor is not a type
    /// variable; this is caller misuse, surfaced hard instead of as a
    /// sentinel.
    pub fn type_var_info(&self, d: DescriptorId) -> Result<TypeVarInfo> {
        if self.types().kind(d) != DescriptorKind::TypeVar {
            return Err(Error::NotATypeVar {
                name: self.types().name(d),
            });
        }
        Ok(self.var_info(d))
    }

    fn assemble(&self, d: DescriptorId, classified: Classified) -> TypeInfo {
        let args = self
            .type_args_with(d, Some(&classified))
            .into_iter()
            .map(|a| self.info_or_leaf(a))
            .collect();
        let parameters = self
            .type_params_with(d, Some(&classified))
            .into_iter()
            .map(|p| self.var_info(p))
            .collect();
        TypeInfo {
            form: classified.form,
            class: classified.class,
            special: self.registry().special_of(classified.form),
            args,
            parameters,
        }
    }

    /// Canonicalizes an argument descriptor, falling back to a leaf record
    /// for anything unrecognized.
    pub(crate) fn info_or_leaf(&self, d: DescriptorId) -> TypeInfo {
        match self.classify(d) {
            Some(classified) => self.assemble(d, classified),
            None => TypeInfo::leaf(d),
        }
    }

    fn var_info(&self, var: DescriptorId) -> TypeVarInfo {
        TypeVarInfo {
            name: self.types().name(var),
            constraints: self
                .types()
                .constraints(var)
                .into_iter()
                .map(|c| self.info_or_leaf(c))
                .collect(),
            bound: self
                .types()
                .bound(var)
                .map(|b| Box::new(self.info_or_leaf(b))),
            covariant: self.types().covariant(var),
            contravariant: self.types().contravariant(var),
        }
    }
}
