//! MRO linearization and instantiation merging.
//!
//! The linearized ancestor order itself is host-supplied; this engine reads
//! it, deduplicates ancestors reached through several paths, and, in the
//! instantiation-merging variant, annotates every entry with the arguments
//! it actually carries, reconciling paths that disagree about an ancestor's
//! instantiation by synthesizing a union per conflicting argument position.

use crate::descriptor::DescriptorId;
use crate::error::{Error, Result};
use crate::inspect::bases::BaseRelation;
use crate::inspect::Inspector;
use crate::registry::{SpecialForm, Strategy};
use fxhash::{FxHashMap, FxHashSet};

impl Inspector<'_> {
    /// Returns the deduplicated ancestor order of a descriptor, at the
    /// runtime-class level.
    ///
    /// The input is canonicalized to its class and the host's raw
    /// linearization for that class is read directly. Deduplication walks
    /// the raw list in reverse, canonicalizes every entry, and keeps the
    /// first occurrence seen, so an ancestor reachable through several
    /// differently-instantiated paths survives exactly once, at its
    /// topologically-latest position.
    #[must_use]
    pub fn mro(&self, d: DescriptorId) -> Vec<DescriptorId> {
        let class = self.classify(d).map_or(d, |c| c.class);
        let raw = self.types().linearization(class);

        let mut seen = FxHashSet::default();
        let mut ancestors = Vec::with_capacity(raw.len());
        for &entry in raw.iter().rev() {
            let canonical = self.classify(entry).map_or(entry, |c| c.class);
            if seen.insert(canonical) {
                ancestors.push(canonical);
            }
        }
        ancestors.reverse();
        ancestors
    }

    /// Returns the ancestor order with every entry annotated by the
    /// instantiation it actually carries.
    ///
    /// The transitive parent multiset is grouped by runtime class; each
    /// linearized ancestor consumes its group. A group whose records
    /// disagree about an argument position gets a synthesized union of the
    /// distinct values at that position.
    ///
    /// # Errors
    ///
    /// - [`Error::ConflictingForms`] when one class is reached through two
    ///   different parametric forms.
    /// - [`Error::UnconsumedParents`] when parent groups remain after every
    ///   ancestor is processed. Under [`Strategy::Legacy`] a single leftover
    ///   group for the root generic marker is tolerated and dropped.
    /// - [`Error::MissingUnionForm`] when an argument conflict arises but no
    ///   union form is registered.
    /// - Any base-resolution fault from the parent walk.
    pub fn instantiated_mro(&self, d: DescriptorId) -> Result<Vec<BaseRelation>> {
        let mut groups: FxHashMap<DescriptorId, Vec<BaseRelation>> = FxHashMap::default();
        for parent in self.parents(d)? {
            groups.entry(parent.class).or_default().push(parent);
        }

        let mut resolved = Vec::new();
        for class in self.mro(d) {
            let Some(records) = groups.remove(&class) else {
                // Ancestor never seen as a parent: a plain entry.
                let (form, class) = self
                    .classify(class)
                    .map_or((class, class), |c| (c.form, c.class));
                resolved.push(BaseRelation {
                    form,
                    class,
                    instantiated: None,
                });
                continue;
            };

            if records.windows(2).any(|pair| pair[0].form != pair[1].form) {
                return Err(Error::ConflictingForms {
                    class: self.types().name(class),
                });
            }

            if records.iter().all(|r| r.instantiated.is_none()) {
                resolved.push(records[0]);
                continue;
            }

            resolved.push(self.merge_group(&records)?);
        }

        self.ensure_consumed(&groups)?;
        Ok(resolved)
    }

    /// Merges one parent group into a single annotated entry.
    ///
    /// Instantiated records form the rows of a small matrix whose columns
    /// are argument positions; a column with one distinct value keeps it,
    /// a column with several synthesizes their union.
    fn merge_group(&self, records: &[BaseRelation]) -> Result<BaseRelation> {
        let rows: Vec<Vec<DescriptorId>> = records
            .iter()
            .filter_map(|r| r.instantiated)
            .map(|inst| self.type_args(inst))
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut merged = Vec::with_capacity(width);
        for position in 0..width {
            let mut distinct: Vec<DescriptorId> = Vec::new();
            for row in &rows {
                if let Some(&arg) = row.get(position) {
                    if !distinct.contains(&arg) {
                        distinct.push(arg);
                    }
                }
            }
            merged.push(self.union_of(&distinct)?);
        }

        let representative = records[0];
        let instantiated = self.types().instantiate(representative.form, &merged);
        Ok(BaseRelation {
            instantiated: Some(instantiated),
            ..representative
        })
    }

    /// Synthesizes the union of the given member types.
    ///
    /// Nested unions are flattened, members deduplicated by identity, and a
    /// single surviving member is returned as-is rather than wrapped.
    fn union_of(&self, members: &[DescriptorId]) -> Result<DescriptorId> {
        debug_assert!(!members.is_empty());
        if let [only] = members {
            return Ok(*only);
        }

        let (union, _) = self
            .registry()
            .special_pair(SpecialForm::Union)
            .ok_or(Error::MissingUnionForm)?;

        let mut flat: Vec<DescriptorId> = Vec::with_capacity(members.len());
        for &member in members {
            let nested = self.classify(member).is_some_and(|c| c.form == union);
            if nested {
                for arg in self.type_args(member) {
                    if !flat.contains(&arg) {
                        flat.push(arg);
                    }
                }
            } else if !flat.contains(&member) {
                flat.push(member);
            }
        }

        if let [only] = flat.as_slice() {
            return Ok(*only);
        }
        Ok(self.types().instantiate(union, &flat))
    }

    /// Verifies every parent group was consumed by the linearization.
    fn ensure_consumed(&self, groups: &FxHashMap<DescriptorId, Vec<BaseRelation>>) -> Result<()> {
        if groups.is_empty() {
            return Ok(());
        }

        // Older host representations attach a synthetic root generic marker
        // as a parent without ever linearizing it.
        if self.registry().strategy() == Strategy::Legacy && groups.len() == 1 {
            if let Some((form, class)) = self.registry().special_pair(SpecialForm::Generic) {
                if groups.contains_key(&class) || groups.contains_key(&form) {
                    return Ok(());
                }
            }
        }

        let mut leftover: Vec<String> =
            groups.keys().map(|&c| self.types().name(c)).collect();
        leftover.sort();
        Err(Error::UnconsumedParents { leftover })
    }
}
