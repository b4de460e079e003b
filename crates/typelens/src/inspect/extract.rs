//! Argument and parameter extraction.
//!
//! Arguments are the types supplied to an instantiation; parameters are the
//! declared, still-free type variables of a declaration. Both come back in
//! declaration order, never deduplicated or reordered, and default to empty.
//!
//! Most descriptors store their argument list directly; the special forms
//! need bespoke reads (a class-variable marker keeps a single payload, a
//! callable keeps its parameter list and return type apart, the root generic
//! marker is parameterized by its own declaration list).

use crate::descriptor::{DescriptorId, DescriptorKind};
use crate::inspect::classify::Classified;
use crate::inspect::Inspector;
use crate::registry::SpecialForm;

impl Inspector<'_> {
    /// Returns the type arguments supplied to a descriptor.
    ///
    /// Empty for anything unparameterized: a bare form never carries
    /// arguments, whatever its host representation stores.
    #[must_use]
    pub fn type_args(&self, d: DescriptorId) -> Vec<DescriptorId> {
        let classified = self.classify(d);
        self.type_args_with(d, classified.as_ref())
    }

    /// Argument extraction against a pre-computed classification.
    pub(crate) fn type_args_with(
        &self,
        d: DescriptorId,
        classified: Option<&Classified>,
    ) -> Vec<DescriptorId> {
        let kind = self.types().kind(d);

        // A legacy alias wrapper's sole argument is its bound variable.
        if kind == DescriptorKind::LegacyAlias {
            return self.types().alias_var(d).into_iter().collect();
        }

        if kind.is_bare_base() {
            return Vec::new();
        }

        let special = classified.and_then(|c| self.registry().special_of(c.form));
        match special {
            Some(SpecialForm::ClassVar) => self.types().wrapped(d).into_iter().collect(),
            Some(SpecialForm::Callable) => match self.types().signature(d) {
                Some(signature) => {
                    let mut args = signature.params;
                    args.push(signature.returns);
                    args
                }
                None => self.types().args(d),
            },
            Some(SpecialForm::Generic) => self.types().parameters(d),
            Some(SpecialForm::Union | SpecialForm::Tuple) => self.types().args(d),
            _ => self.types().args(d),
        }
    }

    /// Returns the declared, still-free type variables of a descriptor.
    ///
    /// The result is filtered to genuine type-variable descriptors; anything
    /// else appearing in a declaration list is dropped.
    #[must_use]
    pub fn type_params(&self, d: DescriptorId) -> Vec<DescriptorId> {
        let classified = self.classify(d);
        self.type_params_with(d, classified.as_ref())
    }

    /// Parameter extraction against a pre-computed classification.
    pub(crate) fn type_params_with(
        &self,
        d: DescriptorId,
        classified: Option<&Classified>,
    ) -> Vec<DescriptorId> {
        let special = classified.and_then(|c| self.registry().special_of(c.form));

        // Class-variable markers never expose a declaration list; their
        // parameters are only discoverable through their arguments.
        let declared = if special == Some(SpecialForm::ClassVar) {
            self.type_args_with(d, classified)
        } else {
            self.types().parameters(d)
        };

        declared
            .into_iter()
            .filter(|&p| self.types().kind(p) == DescriptorKind::TypeVar)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Inspector;
    use crate::registry::{Registry, Strategy};
    use crate::system::TypeSystem;

    #[test]
    fn test_bare_former_ignores_stored_args() {
        let ts = TypeSystem::new();
        let class = ts.declare("Sequence", DescriptorKind::Class).register();
        let t = ts.declare("T", DescriptorKind::TypeVar).register();
        // Some host representations keep the declaration list in the
        // argument slot of a bare former; it must not leak out as args.
        let former = ts
            .declare("SequenceOf", DescriptorKind::Former)
            .erasure(class)
            .parameters(&[t])
            .args(&[t])
            .register();
        let registry = Registry::builder(&ts, Strategy::Legacy)
            .former(former)
            .build();
        let lens = Inspector::new(&ts, &registry);

        assert!(lens.type_args(former).is_empty());
        assert_eq!(lens.type_params(former), vec![t]);
    }

    #[test]
    fn test_fallback_reads_stored_args() {
        let ts = TypeSystem::new();
        let class = ts.declare("Sequence", DescriptorKind::Class).register();
        let int = ts.declare("int", DescriptorKind::Class).register();
        let former = ts
            .declare("SequenceOf", DescriptorKind::Former)
            .erasure(class)
            .register();
        let registry = Registry::builder(&ts, Strategy::Canonical)
            .former(former)
            .build();
        let lens = Inspector::new(&ts, &registry);

        let inst = ts.instantiate(former, &[int]);
        assert_eq!(lens.type_args(inst), vec![int]);
    }

    #[test]
    fn test_parameters_drop_non_variables() {
        let ts = TypeSystem::new();
        let int = ts.declare("int", DescriptorKind::Class).register();
        let t = ts.declare("T", DescriptorKind::TypeVar).register();
        let class = ts.declare("Pair", DescriptorKind::Class).register();
        let former = ts
            .declare("PairOf", DescriptorKind::Former)
            .erasure(class)
            .parameters(&[t, int])
            .register();
        let registry = Registry::builder(&ts, Strategy::Canonical)
            .former(former)
            .build();
        let lens = Inspector::new(&ts, &registry);

        assert_eq!(lens.type_params(former), vec![t]);
    }
}
