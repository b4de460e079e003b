//! Host descriptor table and construction API.
//!
//! [`TypeSystem`] models the host type-reflection system this engine
//! collaborates with: an append-only table of descriptors, each addressed by
//! a [`DescriptorId`]. The host registers every object it knows about
//! (runtime classes, parametric formers, special-form singletons, type
//! variables) through the fluent [`DescriptorBuilder`], then hands ids to
//! the resolution layer.
//!
//! # Thread safety
//!
//! The table is guarded by an `RwLock`: reads are concurrent, and the only
//! writes after setup are instantiation interning (synthesizing an
//! argument-bound descriptor that does not exist yet). Descriptors are never
//! removed or modified once registered, so ids remain valid for the lifetime
//! of the table.
//!
//! # Example
//!
//! ```rust
//! use typelens::{DescriptorKind, TypeSystem};
//!
//! let ts = TypeSystem::new();
//! let class = ts.declare("Sequence", DescriptorKind::Class).register();
//! let former = ts
//!     .declare("SequenceOf", DescriptorKind::Former)
//!     .erasure(class)
//!     .register();
//!
//! assert_eq!(ts.erasure(former), Some(class));
//! assert_eq!(ts.name(former), "SequenceOf");
//! ```

use crate::descriptor::{CallableSignature, DescriptorId, DescriptorKind};
use fxhash::FxHashMap;
use std::sync::RwLock;

/// Everything the host records about one descriptor.
///
/// Sparse by design: most descriptors populate only a handful of fields
/// (a class has bases and a linearization; a type variable has variance and
/// bounds; a former has an erasure pointer and parameters).
#[derive(Debug, Clone)]
struct DescriptorData {
    /// Display name, unique within the table.
    name: String,
    /// Kind tag, immutable after registration.
    kind: DescriptorKind,
    /// Erasure pointer toward the concrete runtime class.
    erasure: Option<DescriptorId>,
    /// Directly-stored supplied arguments.
    args: Vec<DescriptorId>,
    /// Declared type parameters.
    parameters: Vec<DescriptorId>,
    /// Erased declared bases.
    bases: Vec<DescriptorId>,
    /// Declared bases as written, before erasure.
    orig_bases: Vec<DescriptorId>,
    /// Host-supplied linearized ancestor list (classes only).
    linearization: Vec<DescriptorId>,
    /// Supertype link of a new-type wrapper.
    supertype: Option<DescriptorId>,
    /// Bound type variable of a legacy alias wrapper.
    alias_var: Option<DescriptorId>,
    /// Payload of a class-variable marker.
    wrapped: Option<DescriptorId>,
    /// Callable parameter list and return type.
    signature: Option<CallableSignature>,
    /// Type-variable constraints.
    constraints: Vec<DescriptorId>,
    /// Type-variable upper bound.
    bound: Option<DescriptorId>,
    /// Type-variable covariance flag.
    covariant: bool,
    /// Type-variable contravariance flag.
    contravariant: bool,
}

impl DescriptorData {
    fn new(name: String, kind: DescriptorKind) -> Self {
        Self {
            name,
            kind,
            erasure: None,
            args: Vec::new(),
            parameters: Vec::new(),
            bases: Vec::new(),
            orig_bases: Vec::new(),
            linearization: Vec::new(),
            supertype: None,
            alias_var: None,
            wrapped: None,
            signature: None,
            constraints: Vec::new(),
            bound: None,
            covariant: false,
            contravariant: false,
        }
    }
}

/// Interior table state behind the lock.
struct SystemInner {
    descriptors: Vec<DescriptorData>,
    names: FxHashMap<String, DescriptorId>,
    /// Structural intern table: (former, argument tuple) -> descriptor.
    instances: FxHashMap<(DescriptorId, Vec<DescriptorId>), DescriptorId>,
}

/// The host descriptor table.
///
/// See the [module documentation](self) for the construction workflow.
pub struct TypeSystem {
    inner: RwLock<SystemInner>,
}

impl TypeSystem {
    /// Creates an empty descriptor table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SystemInner {
                descriptors: Vec::new(),
                names: FxHashMap::default(),
                instances: FxHashMap::default(),
            }),
        }
    }

    /// Starts registering a descriptor with the given name and kind.
    ///
    /// Returns a [`DescriptorBuilder`]; nothing is recorded until
    /// [`DescriptorBuilder::register`] is called.
    pub fn declare(&self, name: &str, kind: DescriptorKind) -> DescriptorBuilder<'_> {
        DescriptorBuilder {
            system: self,
            data: DescriptorData::new(name.to_string(), kind),
        }
    }

    /// Number of descriptors currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().descriptors.len()
    }

    /// Whether no descriptors have been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a descriptor by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<DescriptorId> {
        self.inner.read().unwrap().names.get(name).copied()
    }

    /// Display name of a descriptor.
    #[must_use]
    pub fn name(&self, d: DescriptorId) -> String {
        self.inner.read().unwrap().descriptors[d.as_usize()].name.clone()
    }

    /// Kind tag of a descriptor.
    #[must_use]
    pub fn kind(&self, d: DescriptorId) -> DescriptorKind {
        self.inner.read().unwrap().descriptors[d.as_usize()].kind
    }

    /// Erasure pointer of a descriptor, if any.
    #[must_use]
    pub fn erasure(&self, d: DescriptorId) -> Option<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].erasure
    }

    /// Directly-stored supplied arguments of a descriptor.
    #[must_use]
    pub fn args(&self, d: DescriptorId) -> Vec<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].args.clone()
    }

    /// Declared type parameters of a descriptor.
    #[must_use]
    pub fn parameters(&self, d: DescriptorId) -> Vec<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].parameters.clone()
    }

    /// Erased declared bases of a descriptor.
    #[must_use]
    pub fn bases(&self, d: DescriptorId) -> Vec<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].bases.clone()
    }

    /// Declared original bases of a descriptor, as written.
    #[must_use]
    pub fn orig_bases(&self, d: DescriptorId) -> Vec<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].orig_bases.clone()
    }

    /// Host-supplied linearized ancestor list of a class.
    ///
    /// Empty for descriptors the host never linearized (formers, type
    /// variables, markers).
    #[must_use]
    pub fn linearization(&self, d: DescriptorId) -> Vec<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()]
            .linearization
            .clone()
    }

    /// Supertype link of a new-type wrapper.
    #[must_use]
    pub fn supertype(&self, d: DescriptorId) -> Option<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].supertype
    }

    /// Bound type variable of a legacy alias wrapper.
    #[must_use]
    pub fn alias_var(&self, d: DescriptorId) -> Option<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].alias_var
    }

    /// Payload of a class-variable marker.
    #[must_use]
    pub fn wrapped(&self, d: DescriptorId) -> Option<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].wrapped
    }

    /// Callable signature of a descriptor, if any.
    #[must_use]
    pub fn signature(&self, d: DescriptorId) -> Option<CallableSignature> {
        self.inner.read().unwrap().descriptors[d.as_usize()].signature.clone()
    }

    /// Constraints of a type variable.
    #[must_use]
    pub fn constraints(&self, d: DescriptorId) -> Vec<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].constraints.clone()
    }

    /// Upper bound of a type variable.
    #[must_use]
    pub fn bound(&self, d: DescriptorId) -> Option<DescriptorId> {
        self.inner.read().unwrap().descriptors[d.as_usize()].bound
    }

    /// Covariance flag of a type variable.
    #[must_use]
    pub fn covariant(&self, d: DescriptorId) -> bool {
        self.inner.read().unwrap().descriptors[d.as_usize()].covariant
    }

    /// Contravariance flag of a type variable.
    #[must_use]
    pub fn contravariant(&self, d: DescriptorId) -> bool {
        self.inner.read().unwrap().descriptors[d.as_usize()].contravariant
    }

    /// Records the host's linearized ancestor list for `d`.
    ///
    /// Supplied after registration because the list contains the class's own
    /// id as its first element.
    pub fn define_linearization(&self, d: DescriptorId, ancestors: Vec<DescriptorId>) {
        self.inner.write().unwrap().descriptors[d.as_usize()].linearization = ancestors;
    }

    /// Returns the argument-bound instantiation of `form` with `args`.
    ///
    /// Structurally interned: the same `(form, args)` pair always yields the
    /// same id, so instantiations compare equal by identity. The synthesized
    /// descriptor erases to `form`, stores `args`, and declares as its
    /// parameters the order-preserved, deduplicated type variables among
    /// `args`.
    pub fn instantiate(&self, form: DescriptorId, args: &[DescriptorId]) -> DescriptorId {
        let mut inner = self.inner.write().unwrap();
        let key = (form, args.to_vec());
        if let Some(&existing) = inner.instances.get(&key) {
            return existing;
        }

        let rendered = {
            let names: Vec<&str> = args
                .iter()
                .map(|a| inner.descriptors[a.as_usize()].name.as_str())
                .collect();
            format!(
                "{}[{}]",
                inner.descriptors[form.as_usize()].name,
                names.join(", ")
            )
        };

        let mut parameters = Vec::new();
        for &arg in args {
            if inner.descriptors[arg.as_usize()].kind == DescriptorKind::TypeVar
                && !parameters.contains(&arg)
            {
                parameters.push(arg);
            }
        }

        let mut data = DescriptorData::new(rendered, DescriptorKind::Instantiated);
        data.erasure = Some(form);
        data.args = args.to_vec();
        data.parameters = parameters;

        let id = DescriptorId::new(inner.descriptors.len() as u32);
        inner.names.insert(data.name.clone(), id);
        inner.descriptors.push(data);
        inner.instances.insert(key, id);
        id
    }

    /// Registers a completed builder. Internal; called by
    /// [`DescriptorBuilder::register`].
    fn insert(&self, data: DescriptorData) -> DescriptorId {
        let mut inner = self.inner.write().unwrap();
        let id = DescriptorId::new(inner.descriptors.len() as u32);
        inner.names.insert(data.name.clone(), id);
        inner.descriptors.push(data);
        id
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent builder for registering a descriptor.
///
/// Obtained from [`TypeSystem::declare`]; each setter consumes and returns
/// the builder, and [`register`](DescriptorBuilder::register) commits the
/// descriptor to the table.
///
/// # Example
///
/// ```rust
/// use typelens::{DescriptorKind, TypeSystem};
///
/// let ts = TypeSystem::new();
/// let value = ts.declare("Value", DescriptorKind::Class).register();
/// let var = ts
///     .declare("T", DescriptorKind::TypeVar)
///     .bound(value)
///     .covariant()
///     .register();
///
/// assert_eq!(ts.bound(var), Some(value));
/// assert!(ts.covariant(var));
/// ```
pub struct DescriptorBuilder<'a> {
    system: &'a TypeSystem,
    data: DescriptorData,
}

impl DescriptorBuilder<'_> {
    /// Sets the erasure pointer.
    #[must_use]
    pub fn erasure(mut self, class: DescriptorId) -> Self {
        self.data.erasure = Some(class);
        self
    }

    /// Sets the directly-stored supplied arguments.
    #[must_use]
    pub fn args(mut self, args: &[DescriptorId]) -> Self {
        self.data.args = args.to_vec();
        self
    }

    /// Sets the declared type parameters.
    #[must_use]
    pub fn parameters(mut self, parameters: &[DescriptorId]) -> Self {
        self.data.parameters = parameters.to_vec();
        self
    }

    /// Sets the erased declared bases.
    #[must_use]
    pub fn bases(mut self, bases: &[DescriptorId]) -> Self {
        self.data.bases = bases.to_vec();
        self
    }

    /// Sets the declared original bases, as written.
    #[must_use]
    pub fn orig_bases(mut self, orig_bases: &[DescriptorId]) -> Self {
        self.data.orig_bases = orig_bases.to_vec();
        self
    }

    /// Sets the supertype link of a new-type wrapper.
    #[must_use]
    pub fn supertype(mut self, supertype: DescriptorId) -> Self {
        self.data.supertype = Some(supertype);
        self
    }

    /// Sets the bound type variable of a legacy alias wrapper.
    #[must_use]
    pub fn alias_var(mut self, var: DescriptorId) -> Self {
        self.data.alias_var = Some(var);
        self
    }

    /// Sets the payload of a class-variable marker.
    #[must_use]
    pub fn wrapped(mut self, payload: DescriptorId) -> Self {
        self.data.wrapped = Some(payload);
        self
    }

    /// Sets the callable signature.
    #[must_use]
    pub fn signature(mut self, params: &[DescriptorId], returns: DescriptorId) -> Self {
        self.data.signature = Some(CallableSignature {
            params: params.to_vec(),
            returns,
        });
        self
    }

    /// Sets the constraints of a type variable.
    #[must_use]
    pub fn constraints(mut self, constraints: &[DescriptorId]) -> Self {
        self.data.constraints = constraints.to_vec();
        self
    }

    /// Sets the upper bound of a type variable.
    #[must_use]
    pub fn bound(mut self, bound: DescriptorId) -> Self {
        self.data.bound = Some(bound);
        self
    }

    /// Marks a type variable covariant.
    #[must_use]
    pub fn covariant(mut self) -> Self {
        self.data.covariant = true;
        self
    }

    /// Marks a type variable contravariant.
    #[must_use]
    pub fn contravariant(mut self) -> Self {
        self.data.contravariant = true;
        self
    }

    /// Commits the descriptor to the table and returns its id.
    pub fn register(self) -> DescriptorId {
        self.system.insert(self.data)
    }
}
