//! `typelens`: canonical introspection for reflective type descriptors.
//!
//! A reflective, generically-parameterized type system describes its types
//! through descriptors: parametric formers, the concrete runtime classes
//! those formers erase to, argument-bound instantiations, type variables,
//! protocol markers, and alias wrappers. What a descriptor *means* varies
//! with the host runtime's representation; this crate resolves any of them
//! to one canonical, version-independent description, then builds
//! inheritance resolution on top of it.
//!
//! # Architecture
//!
//! - [`descriptor`]: descriptor handles and kind tags
//! - [`system`]: the host descriptor table and its construction API
//! - [`registry`]: the immutable form/class index built from the host
//!   catalogue
//! - [`inspect`]: classification, argument/parameter extraction, canonical
//!   record assembly, and base/MRO resolution
//! - [`error`]: the fault taxonomy
//!
//! The registry is built once and shared read-only; every resolution call is
//! a pure, bounded traversal producing caller-owned values.
//!
//! # Example
//!
//! ```rust
//! use typelens::{
//!     DescriptorKind, Inspector, Registry, Strategy, TypeSystem,
//! };
//!
//! let ts = TypeSystem::new();
//! let int = ts.declare("int", DescriptorKind::Class).register();
//! let class = ts.declare("Sequence", DescriptorKind::Class).register();
//! let item = ts.declare("T", DescriptorKind::TypeVar).register();
//! let former = ts
//!     .declare("SequenceOf", DescriptorKind::Former)
//!     .erasure(class)
//!     .parameters(&[item])
//!     .register();
//!
//! let registry = Registry::builder(&ts, Strategy::Canonical)
//!     .former(former)
//!     .literal(int)
//!     .build();
//! let lens = Inspector::new(&ts, &registry);
//!
//! // A bare former and its class resolve to the same canonical pair.
//! let bare = lens.classify(former).unwrap();
//! assert_eq!(lens.classify(class), Some(bare));
//!
//! // An instantiation keeps the pair and carries its arguments.
//! let seq_int = ts.instantiate(former, &[int]);
//! let info = lens.type_info(seq_int).unwrap();
//! assert_eq!(info.form, former);
//! assert_eq!(info.class, class);
//! assert_eq!(info.args.len(), 1);
//! assert_eq!(info.args[0].class, int);
//! ```

pub mod descriptor;
pub mod error;
pub mod inspect;
pub mod registry;
pub mod system;

pub use descriptor::{CallableSignature, DescriptorId, DescriptorKind};
pub use error::{Error, ErrorKind, Result};
pub use inspect::{BaseRelation, Classified, Inspector, TypeInfo, TypeVarInfo};
pub use registry::{Registry, RegistryBuilder, SpecialForm, Strategy};
pub use system::{DescriptorBuilder, TypeSystem};
