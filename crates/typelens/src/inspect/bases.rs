//! Direct-base resolution and the transitive parent walk.
//!
//! A [`BaseRelation`] names one inheritance edge: the base's parametric form,
//! its runtime class, and, when the edge actually binds arguments, the
//! instantiated descriptor carrying them. Resolving the bases of an
//! instantiated type re-instantiates each generic base with the slice of the
//! child's arguments its parameters consume.
//!
//! The declared original bases (bases as written, before erasure) are matched
//! against the erased base list by class identity; a declared base the erased
//! list cannot account for means the host handed over an inheritance graph
//! this engine cannot reconcile.

use crate::descriptor::DescriptorId;
use crate::error::{Error, Result};
use crate::inspect::Inspector;
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// One resolved inheritance edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseRelation {
    /// Parametric form of the base.
    pub form: DescriptorId,
    /// Runtime class of the base.
    pub class: DescriptorId,
    /// The argument-bound descriptor for this edge, set only when the base
    /// carries arguments distinguishable from its bare declaration.
    pub instantiated: Option<DescriptorId>,
}

impl Inspector<'_> {
    /// Resolves the direct bases of a descriptor.
    ///
    /// An unrecognized descriptor resolves its own declared bases; a bare or
    /// non-generic one resolves the declared bases of its class; an
    /// instantiated one additionally re-instantiates each generic base with
    /// the prefix of its own argument tuple sliced to that base's parameter
    /// count (positional, left to right).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmatchedDeclaredBases`] when a declared original
    /// base has no erased counterpart of the same class.
    pub fn bases(&self, d: DescriptorId) -> Result<Vec<BaseRelation>> {
        let Some(classified) = self.classify(d) else {
            return self.declared_bases(d);
        };

        let args = self.type_args_with(d, Some(&classified));
        if args.is_empty() || !self.is_generic_class(classified.class) {
            return self.declared_bases(classified.class);
        }

        let mut resolved = Vec::new();
        for base in self.declared_bases(classified.class)? {
            let parameters = self.type_params(base.form);
            if parameters.is_empty() {
                resolved.push(base);
                continue;
            }
            let take = parameters.len().min(args.len());
            let instantiated = self.types().instantiate(base.form, &args[..take]);
            resolved.push(BaseRelation {
                instantiated: Some(instantiated),
                ..base
            });
        }
        Ok(resolved)
    }

    /// Whether a class participates in generic resolution: catalogued in the
    /// registry, or a user-defined generic declaring parameters or original
    /// bases of its own.
    fn is_generic_class(&self, class: DescriptorId) -> bool {
        self.registry().is_known(class)
            || !self.types().parameters(class).is_empty()
            || !self.types().orig_bases(class).is_empty()
    }

    /// Resolves the declared bases of `d` itself, matching the original
    /// (pre-erasure) base list against the erased one.
    fn declared_bases(&self, d: DescriptorId) -> Result<Vec<BaseRelation>> {
        let erased = self.types().bases(d);
        if erased.is_empty() {
            return Ok(Vec::new());
        }

        // Group the declared original bases by the class they resolve to;
        // each erased base consumes at most one of its group, in order.
        let mut declared: FxHashMap<DescriptorId, VecDeque<DescriptorId>> =
            FxHashMap::default();
        for orig in self.types().orig_bases(d) {
            let key = self.classify(orig).map_or(orig, |c| c.class);
            declared.entry(key).or_default().push_back(orig);
        }

        let mut resolved = Vec::new();
        for base in erased {
            let form = self.classify(base).map_or(base, |c| c.form);
            let instantiated = declared
                .get_mut(&base)
                .and_then(VecDeque::pop_front)
                .filter(|&orig| !self.type_args(orig).is_empty());
            resolved.push(BaseRelation {
                form,
                class: base,
                instantiated,
            });
        }

        let mut leftover: Vec<String> = declared
            .values()
            .flatten()
            .map(|&orig| self.types().name(orig))
            .collect();
        if !leftover.is_empty() {
            leftover.sort();
            return Err(Error::UnmatchedDeclaredBases {
                name: self.types().name(d),
                leftover,
            });
        }
        Ok(resolved)
    }

    /// Walks the full transitive parent multiset of a descriptor.
    ///
    /// The result starts with the descriptor's own relation and preserves
    /// duplicates: an ancestor reachable through several paths appears once
    /// per path, carrying whatever instantiation that path supplies.
    ///
    /// # Errors
    ///
    /// Propagates any base-resolution fault encountered along the walk.
    pub fn parents(&self, d: DescriptorId) -> Result<Vec<BaseRelation>> {
        let own = match self.classify(d) {
            None => BaseRelation {
                form: d,
                class: d,
                instantiated: None,
            },
            Some(classified) => {
                let bound = !self.type_args_with(d, Some(&classified)).is_empty();
                BaseRelation {
                    form: classified.form,
                    class: classified.class,
                    instantiated: bound.then_some(d),
                }
            }
        };

        let mut collected = vec![own];
        self.collect_parents(d, &mut collected)?;
        Ok(collected)
    }

    fn collect_parents(
        &self,
        d: DescriptorId,
        collected: &mut Vec<BaseRelation>,
    ) -> Result<()> {
        for base in self.bases(d)? {
            collected.push(base);
            self.collect_parents(base.instantiated.unwrap_or(base.class), collected)?;
        }
        Ok(())
    }
}
