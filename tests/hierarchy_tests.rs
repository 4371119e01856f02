// Copyright 2025 Cowboy AI, LLC.

//! Subclass tracking and hierarchical facet lookup

mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

use causeway_metamodel::facets::{Facet, Precedence};
use causeway_metamodel::reflection::{annotations, Annotation, ClassKind};
use causeway_metamodel::{
    BeanMetaData, BeanTypeRegistry, ClassDescriptor, ClassRepository, Depth, IntrospectionState,
    ObjectSpecification, SpecificationLoader,
};

const BASE: &str = "shapes.Base";
const CIRCLE: &str = "shapes.Circle";
const SQUARE: &str = "shapes.Square";
const UNIT_CIRCLE: &str = "shapes.UnitCircle";
const DRAWABLE: &str = "shapes.Drawable";

fn view_model(name: &str) -> causeway_metamodel::reflection::ClassBuilder {
    ClassDescriptor::builder(name)
        .annotate(Annotation::new(annotations::DOMAIN_OBJECT).with("nature", "VIEW_MODEL"))
}

fn shape_classes() -> Vec<ClassDescriptor> {
    vec![
        ClassDescriptor::builder(DRAWABLE).kind(ClassKind::Interface).build(),
        ClassDescriptor::builder(BASE).abstract_class().build(),
        view_model(CIRCLE).extends(BASE).implements(DRAWABLE).build(),
        view_model(SQUARE).extends(BASE).build(),
        view_model(UNIT_CIRCLE).extends(CIRCLE).build(),
    ]
}

/// Only Circle and Square are discovered; UnitCircle turns up later
fn shapes_loader() -> Arc<SpecificationLoader> {
    let classes = Arc::new(ClassRepository::with_classes(shape_classes()));
    let beans = BeanTypeRegistry::with_beans(
        [CIRCLE, SQUARE]
            .into_iter()
            .filter_map(|name| classes.get(&key(name)))
            .map(|class| BeanMetaData::classify(&class, false)),
    );
    let loader = SpecificationLoader::builder(classes)
        .bean_types(Arc::new(beans))
        .build();
    loader.create_meta_model().expect("bootstrap");
    loader
}

fn names(specs: &[Arc<ObjectSpecification>]) -> Vec<String> {
    let mut names: Vec<String> = specs.iter().map(|spec| spec.class_key().to_string()).collect();
    names.sort();
    names
}

#[test]
fn direct_subclasses_are_registered_once() {
    let loader = shapes_loader();
    let base = loader.specification(&key(BASE)).expect("base loaded as superclass");

    assert_eq!(names(&base.subclasses(Depth::Direct)), vec![CIRCLE, SQUARE]);

    // introspecting again does not register twice
    let circle = loader.specification(&key(CIRCLE)).unwrap();
    base.register_subclass(&circle);
    assert_eq!(base.subclasses(Depth::Direct).len(), 2);
}

#[test]
fn transitive_subclasses_follow_late_registrations() {
    let loader = shapes_loader();
    let base = loader.specification(&key(BASE)).unwrap();
    let drawable = loader.specification(&key(DRAWABLE)).expect("interface loaded");

    assert_eq!(names(&base.subclasses(Depth::Transitive)), vec![CIRCLE, SQUARE]);
    assert_eq!(names(&drawable.subclasses(Depth::Transitive)), vec![CIRCLE]);

    let unit_circle = loader
        .load_specification(&key(UNIT_CIRCLE), IntrospectionState::TypeIntrospected)
        .unwrap()
        .expect("unit circle");
    let circle = loader.specification(&key(CIRCLE)).unwrap();
    assert!(Arc::ptr_eq(&unit_circle.superclass().unwrap(), &circle));

    // the memo two levels up is recomputed
    assert_eq!(
        names(&base.subclasses(Depth::Transitive)),
        vec![CIRCLE, SQUARE, UNIT_CIRCLE]
    );
    assert_eq!(names(&drawable.subclasses(Depth::Transitive)), vec![CIRCLE, UNIT_CIRCLE]);
    assert_eq!(names(&base.subclasses(Depth::Direct)), vec![CIRCLE, SQUARE]);
}

#[test]
fn interfaces_are_linked_but_not_registrable() {
    let loader = shapes_loader();
    let circle = loader.specification(&key(CIRCLE)).unwrap();
    let interfaces = circle.interfaces();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].class_key(), &key(DRAWABLE));
    assert!(interfaces[0].is_abstract());
    assert!(!interfaces[0].is_registrable());
}

#[derive(Debug)]
struct Marker {
    source: &'static str,
    precedence: Precedence,
}

impl Facet for Marker {
    fn precedence(&self) -> Precedence {
        self.precedence
    }
}

fn marker(source: &'static str, precedence: Precedence) -> Marker {
    Marker { source, precedence }
}

#[test]
fn own_facet_beats_inherited_ones() {
    let loader = shapes_loader();
    let circle = loader.specification(&key(CIRCLE)).unwrap();
    let base = loader.specification(&key(BASE)).unwrap();

    base.facet_holder().add_facet(marker("base", Precedence::High));
    assert_eq!(circle.get_facet::<Marker>().unwrap().source, "base");

    circle.facet_holder().add_facet(marker("circle", Precedence::Inferred));
    assert_eq!(circle.get_facet::<Marker>().unwrap().source, "circle");
}

#[test]
fn interfaces_are_searched_before_the_superclass() {
    let loader = shapes_loader();
    let circle = loader.specification(&key(CIRCLE)).unwrap();
    loader
        .specification(&key(BASE))
        .unwrap()
        .facet_holder()
        .add_facet(marker("base", Precedence::Default));
    loader
        .specification(&key(DRAWABLE))
        .unwrap()
        .facet_holder()
        .add_facet(marker("drawable", Precedence::Default));

    assert_eq!(circle.get_facet::<Marker>().unwrap().source, "drawable");
}

#[test]
fn inherited_facet_beats_own_fallback() {
    let loader = shapes_loader();
    let unit_circle = loader
        .load_specification(&key(UNIT_CIRCLE), IntrospectionState::TypeIntrospected)
        .unwrap()
        .unwrap();
    unit_circle
        .facet_holder()
        .add_facet(marker("unit", Precedence::Fallback));
    assert_eq!(unit_circle.get_facet::<Marker>().unwrap().source, "unit");

    loader
        .specification(&key(BASE))
        .unwrap()
        .facet_holder()
        .add_facet(marker("base", Precedence::Inferred));
    assert_eq!(unit_circle.get_facet::<Marker>().unwrap().source, "base");
}

#[test]
fn first_fallback_seen_wins_when_nothing_better_exists() {
    let loader = shapes_loader();
    let circle = loader.specification(&key(CIRCLE)).unwrap();
    loader
        .specification(&key(DRAWABLE))
        .unwrap()
        .facet_holder()
        .add_facet(marker("drawable", Precedence::Fallback));
    loader
        .specification(&key(BASE))
        .unwrap()
        .facet_holder()
        .add_facet(marker("base", Precedence::Fallback));

    assert_eq!(circle.get_facet::<Marker>().unwrap().source, "drawable");
    assert!(circle.facet_holder().get::<Marker>().is_none());
}

#[test]
fn lazy_mode_leaves_undiscovered_subtypes_alone() {
    let loader = shapes_loader();
    assert!(loader.specification(&key(UNIT_CIRCLE)).is_none());
    assert_eq!(
        loader.specification(&key(CIRCLE)).unwrap().state(),
        IntrospectionState::FullyIntrospected
    );
}
