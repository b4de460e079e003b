// Common test fixtures for integration tests
//
// Builds a small but complete descriptor universe modeled on an abstract
// collections hierarchy: erased runtime classes, the parametric formers
// erasing to them, special forms, literal primitives, and type variables,
// wired together the way a real host catalogue is.

#![allow(dead_code)]

use typelens::{
    DescriptorId, DescriptorKind, Inspector, Registry, SpecialForm, Strategy,
    TypeSystem,
};

/// A fully wired descriptor table plus its registry.
pub struct Universe {
    pub ts: TypeSystem,
    pub registry: Registry,

    // Literal primitives
    pub str_: DescriptorId,
    pub int: DescriptorId,
    pub bytes: DescriptorId,
    pub none: DescriptorId,
    pub list: DescriptorId,
    pub dict: DescriptorId,

    // Runtime classes
    pub object: DescriptorId,
    pub abc_sized: DescriptorId,
    pub abc_iterable: DescriptorId,
    pub abc_container: DescriptorId,
    pub abc_collection: DescriptorId,
    pub abc_mapping: DescriptorId,
    pub abc_sequence: DescriptorId,
    pub abc_callable: DescriptorId,
    pub tuple_class: DescriptorId,
    pub type_class: DescriptorId,

    // Parametric formers
    pub sized: DescriptorId,
    pub iterable: DescriptorId,
    pub container: DescriptorId,
    pub collection: DescriptorId,
    pub mapping: DescriptorId,
    pub sequence: DescriptorId,
    pub list_of: DescriptorId,

    // Special forms
    pub union: DescriptorId,
    pub optional: DescriptorId,
    pub class_var: DescriptorId,
    pub generic: DescriptorId,
    pub tuple_form: DescriptorId,
    pub callable_form: DescriptorId,
    pub protocol: DescriptorId,
    pub type_var_form: DescriptorId,
    pub new_type_form: DescriptorId,
    pub type_form: DescriptorId,

    // Type variables
    pub t: DescriptorId,
    pub kt: DescriptorId,
    pub vt: DescriptorId,
}

impl Universe {
    pub fn new() -> Self {
        Self::with_strategy(Strategy::Canonical)
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        let ts = TypeSystem::new();

        // Literal primitives
        let str_ = ts.declare("str", DescriptorKind::Class).register();
        let int = ts.declare("int", DescriptorKind::Class).register();
        let bytes = ts.declare("bytes", DescriptorKind::Class).register();
        let none = ts.declare("NoneType", DescriptorKind::Class).register();
        let list = ts.declare("list", DescriptorKind::Class).register();
        let dict = ts.declare("dict", DescriptorKind::Class).register();

        // Runtime classes and their host-supplied linearizations
        let object = ts.declare("object", DescriptorKind::Class).register();
        ts.define_linearization(object, vec![object]);

        let abc_sized = ts
            .declare("abc.Sized", DescriptorKind::Class)
            .bases(&[object])
            .register();
        ts.define_linearization(abc_sized, vec![abc_sized, object]);

        let abc_iterable = ts
            .declare("abc.Iterable", DescriptorKind::Class)
            .bases(&[object])
            .register();
        ts.define_linearization(abc_iterable, vec![abc_iterable, object]);

        let abc_container = ts
            .declare("abc.Container", DescriptorKind::Class)
            .bases(&[object])
            .register();
        ts.define_linearization(abc_container, vec![abc_container, object]);

        let abc_collection = ts
            .declare("abc.Collection", DescriptorKind::Class)
            .bases(&[abc_sized, abc_iterable, abc_container])
            .register();
        ts.define_linearization(
            abc_collection,
            vec![abc_collection, abc_sized, abc_iterable, abc_container, object],
        );

        let abc_mapping = ts
            .declare("abc.Mapping", DescriptorKind::Class)
            .bases(&[abc_collection])
            .register();
        ts.define_linearization(
            abc_mapping,
            vec![
                abc_mapping,
                abc_collection,
                abc_sized,
                abc_iterable,
                abc_container,
                object,
            ],
        );

        let abc_sequence = ts
            .declare("abc.Sequence", DescriptorKind::Class)
            .bases(&[abc_collection])
            .register();
        ts.define_linearization(
            abc_sequence,
            vec![
                abc_sequence,
                abc_collection,
                abc_sized,
                abc_iterable,
                abc_container,
                object,
            ],
        );

        let abc_callable = ts
            .declare("abc.Callable", DescriptorKind::Class)
            .bases(&[object])
            .register();
        ts.define_linearization(abc_callable, vec![abc_callable, object]);

        let tuple_class = ts
            .declare("tuple", DescriptorKind::Class)
            .bases(&[object])
            .register();
        ts.define_linearization(tuple_class, vec![tuple_class, object]);

        let type_class = ts
            .declare("type", DescriptorKind::Class)
            .bases(&[object])
            .register();
        ts.define_linearization(type_class, vec![type_class, object]);

        // Type variables
        let t = ts.declare("T", DescriptorKind::TypeVar).register();
        let kt = ts.declare("KT", DescriptorKind::TypeVar).register();
        let vt = ts.declare("VT", DescriptorKind::TypeVar).register();

        // Parametric formers
        let sized = ts
            .declare("Sized", DescriptorKind::Former)
            .erasure(abc_sized)
            .register();
        let iterable = ts
            .declare("Iterable", DescriptorKind::Former)
            .erasure(abc_iterable)
            .parameters(&[t])
            .register();
        let container = ts
            .declare("Container", DescriptorKind::Former)
            .erasure(abc_container)
            .parameters(&[t])
            .register();
        let collection = ts
            .declare("Collection", DescriptorKind::Former)
            .erasure(abc_collection)
            .parameters(&[t])
            .register();
        let mapping = ts
            .declare("Mapping", DescriptorKind::Former)
            .erasure(abc_mapping)
            .parameters(&[kt, vt])
            .register();
        let sequence = ts
            .declare("Sequence", DescriptorKind::Former)
            .erasure(abc_sequence)
            .parameters(&[t])
            .register();
        let list_of = ts
            .declare("List", DescriptorKind::Former)
            .erasure(list)
            .parameters(&[t])
            .register();

        // Special forms
        let union = ts.declare("Union", DescriptorKind::Former).register();
        let optional = ts.declare("Optional", DescriptorKind::Former).register();
        let class_var = ts.declare("ClassVar", DescriptorKind::Former).register();
        let generic = ts.declare("Generic", DescriptorKind::Former).register();
        let tuple_form = ts
            .declare("Tuple", DescriptorKind::Former)
            .erasure(tuple_class)
            .register();
        let callable_form = ts
            .declare("Callable", DescriptorKind::Former)
            .erasure(abc_callable)
            .register();
        let protocol = ts.declare("Protocol", DescriptorKind::Former).register();
        let type_var_form = ts.declare("TypeVar", DescriptorKind::Former).register();
        let new_type_form = ts.declare("NewType", DescriptorKind::Former).register();
        let type_form = ts
            .declare("Type", DescriptorKind::Former)
            .erasure(type_class)
            .register();

        let registry = Registry::builder(&ts, strategy)
            .former(sized)
            .former(iterable)
            .former(container)
            .former(collection)
            .former(mapping)
            .former(sequence)
            .former(list_of)
            .special(SpecialForm::Union, union)
            .special(SpecialForm::Optional, optional)
            .special(SpecialForm::ClassVar, class_var)
            .special(SpecialForm::Generic, generic)
            .special(SpecialForm::Protocol, protocol)
            .special(SpecialForm::TypeVar, type_var_form)
            .special(SpecialForm::NewType, new_type_form)
            .special_with_class(SpecialForm::Tuple, tuple_form, tuple_class)
            .special_with_class(SpecialForm::Callable, callable_form, abc_callable)
            .special_with_class(SpecialForm::Type, type_form, type_class)
            .literal(str_)
            .literal(int)
            .literal(bytes)
            .literal(none)
            .literal(list)
            .literal(dict)
            .build();

        Self {
            ts,
            registry,
            str_,
            int,
            bytes,
            none,
            list,
            dict,
            object,
            abc_sized,
            abc_iterable,
            abc_container,
            abc_collection,
            abc_mapping,
            abc_sequence,
            abc_callable,
            tuple_class,
            type_class,
            sized,
            iterable,
            container,
            collection,
            mapping,
            sequence,
            list_of,
            union,
            optional,
            class_var,
            generic,
            tuple_form,
            callable_form,
            protocol,
            type_var_form,
            new_type_form,
            type_form,
            t,
            kt,
            vt,
        }
    }

    /// An inspector over this universe.
    pub fn lens(&self) -> Inspector<'_> {
        Inspector::new(&self.ts, &self.registry)
    }

    /// Declares a plain class inheriting one instantiated sequence, with a
    /// consistent host linearization.
    pub fn sequence_child(&self, name: &str, item: DescriptorId) -> DescriptorId {
        let inst = self.ts.instantiate(self.sequence, &[item]);
        let class = self
            .ts
            .declare(name, DescriptorKind::Class)
            .bases(&[self.abc_sequence])
            .orig_bases(&[inst])
            .register();
        self.ts.define_linearization(
            class,
            vec![
                class,
                self.abc_sequence,
                self.abc_collection,
                self.abc_sized,
                self.abc_iterable,
                self.abc_container,
                self.object,
            ],
        );
        class
    }
}
