//! Descriptor classification.
//!
//! Classification resolves a descriptor to its canonical `(form, class)`
//! pair: the declaration-level parametric form and the concrete runtime
//! class it erases to. The rules run in fixed priority order and the first
//! match wins; a descriptor no rule recognizes classifies as `None`, which
//! is a valid "don't know" result rather than an error.

use crate::descriptor::{DescriptorId, DescriptorKind};
use crate::inspect::Inspector;
use crate::registry::SpecialForm;

/// The canonical identity pair of a classified descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    /// Declaration-level parametric form.
    pub form: DescriptorId,
    /// Concrete runtime class the form erases to.
    pub class: DescriptorId,
}

impl Inspector<'_> {
    /// Resolves a descriptor to its canonical `(form, class)` pair.
    ///
    /// The rules, in priority order:
    ///
    /// 1. Kind-based specials: type variables, protocol markers, and
    ///    new-type wrappers classify by their kind tag, keeping the
    ///    descriptor itself as the class.
    /// 2. Literal primitives classify as themselves in both positions.
    /// 3. Registry reverse lookup by class identity.
    /// 4. Registry forward lookup by form identity.
    /// 5. Structural fallback: chase the erasure chain to its last target
    ///    and classify that; a descriptor with no erasure but declared
    ///    parameters or original bases is a user-defined generic and
    ///    classifies as itself in both positions.
    /// 6. Wrapped-special fallback: descriptors whose *kind* is a dedicated
    ///    special-form wrapper resolve to that form's canonical pair.
    ///
    /// New-type wrappers carry no independent erasure, so whenever the
    /// resolved form is the new-type special the class component is the
    /// input descriptor itself.
    #[must_use]
    pub fn classify(&self, d: DescriptorId) -> Option<Classified> {
        let mut resolved = self.classify_chain(d)?;
        if let Some((newtype, _)) = self.registry().special_pair(SpecialForm::NewType) {
            if resolved.form == newtype {
                resolved.class = d;
            }
        }
        Some(resolved)
    }

    fn classify_chain(&self, d: DescriptorId) -> Option<Classified> {
        self.classify_universal(d)
            .or_else(|| self.classify_literal(d))
            .or_else(|| self.classify_known_class(d))
            .or_else(|| self.classify_known_form(d))
            .or_else(|| self.classify_structural(d))
            .or_else(|| self.classify_wrapped(d))
    }

    /// Rule 1: specials detected by descriptor kind rather than identity.
    fn classify_universal(&self, d: DescriptorId) -> Option<Classified> {
        let tag = match self.types().kind(d) {
            DescriptorKind::TypeVar => SpecialForm::TypeVar,
            DescriptorKind::ProtocolMarker => SpecialForm::Protocol,
            DescriptorKind::NewType => SpecialForm::NewType,
            _ => return None,
        };
        let (form, _) = self.registry().special_pair(tag)?;
        Some(Classified { form, class: d })
    }

    /// Rule 2: literal primitive membership.
    fn classify_literal(&self, d: DescriptorId) -> Option<Classified> {
        self.registry()
            .is_literal(d)
            .then_some(Classified { form: d, class: d })
    }

    /// Rule 3: reverse lookup by class identity.
    fn classify_known_class(&self, d: DescriptorId) -> Option<Classified> {
        let form = self.registry().form_of(d)?;
        Some(Classified { form, class: d })
    }

    /// Rule 4: forward lookup by form identity.
    fn classify_known_form(&self, d: DescriptorId) -> Option<Classified> {
        let class = self.registry().class_of(d)?;
        Some(Classified { form: d, class })
    }

    /// Rule 5: erasure-chain chase, then user-defined generics.
    fn classify_structural(&self, d: DescriptorId) -> Option<Classified> {
        if let Some(first) = self.types().erasure(d) {
            let mut target = first;
            while let Some(next) = self.types().erasure(target) {
                target = next;
            }
            if let Some(form) = self.registry().form_of(target) {
                return Some(Classified { form, class: target });
            }
            if let Some(class) = self.registry().class_of(target) {
                return Some(Classified { form: target, class });
            }
            return Some(Classified { form: target, class: target });
        }

        let declares_generics = !self.types().parameters(d).is_empty()
            || !self.types().orig_bases(d).is_empty();
        declares_generics.then_some(Classified { form: d, class: d })
    }

    /// Rule 6: wrapped-runtime special forms, keyed by kind.
    fn classify_wrapped(&self, d: DescriptorId) -> Option<Classified> {
        let DescriptorKind::SpecialWrapper(tag) = self.types().kind(d) else {
            return None;
        };
        let (form, class) = self.registry().special_pair(tag)?;
        Some(Classified { form, class })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, Strategy};
    use crate::system::TypeSystem;

    #[test]
    fn test_literal_wins_over_registry_lookup() {
        let ts = TypeSystem::new();
        let list = ts.declare("list", DescriptorKind::Class).register();
        let list_of = ts
            .declare("List", DescriptorKind::Former)
            .erasure(list)
            .register();
        let registry = Registry::builder(&ts, Strategy::Canonical)
            .former(list_of)
            .literal(list)
            .build();
        let lens = crate::inspect::Inspector::new(&ts, &registry);

        let classified = lens.classify(list).unwrap();
        assert_eq!((classified.form, classified.class), (list, list));
    }

    #[test]
    fn test_erasure_chain_is_chased_to_its_end() {
        let ts = TypeSystem::new();
        let class = ts.declare("Sequence", DescriptorKind::Class).register();
        let former = ts
            .declare("SequenceOf", DescriptorKind::Former)
            .erasure(class)
            .register();
        let registry = Registry::builder(&ts, Strategy::Canonical)
            .former(former)
            .build();
        let lens = crate::inspect::Inspector::new(&ts, &registry);

        // Two hops: instantiation -> former -> class.
        let int = ts.declare("int", DescriptorKind::Class).register();
        let inst = ts.instantiate(former, &[int]);
        let classified = lens.classify(inst).unwrap();
        assert_eq!((classified.form, classified.class), (former, class));
    }

    #[test]
    fn test_unrecognized_descriptor_is_none() {
        let ts = TypeSystem::new();
        let plain = ts.declare("Plain", DescriptorKind::Class).register();
        let registry = Registry::builder(&ts, Strategy::Canonical).build();
        let lens = crate::inspect::Inspector::new(&ts, &registry);

        assert_eq!(lens.classify(plain), None);
    }

    #[test]
    fn test_new_type_keeps_its_own_class() {
        let ts = TypeSystem::new();
        let int = ts.declare("int", DescriptorKind::Class).register();
        let new_type = ts.declare("NewType", DescriptorKind::Former).register();
        let wrapper = ts
            .declare("UserId", DescriptorKind::NewType)
            .supertype(int)
            .register();
        let registry = Registry::builder(&ts, Strategy::Canonical)
            .special(SpecialForm::NewType, new_type)
            .build();
        let lens = crate::inspect::Inspector::new(&ts, &registry);

        let classified = lens.classify(wrapper).unwrap();
        assert_eq!(classified.form, new_type);
        assert_eq!(classified.class, wrapper);
    }
}
