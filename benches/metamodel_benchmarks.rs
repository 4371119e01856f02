// Copyright 2025 Cowboy AI, LLC.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use causeway_metamodel::reflection::{annotations, Annotation, TypeRef};
use causeway_metamodel::{
    BeanMetaData, BeanTypeRegistry, ClassDescriptor, ClassRepository, IntrospectionMode,
    IntrospectionState, MetaModelConfig, MethodDescriptor, SpecificationLoader, TypeKey,
};

/// `count` entities, each referencing the next through a property and an
/// action
fn generated_domain(count: usize) -> Vec<ClassDescriptor> {
    (0..count)
        .map(|index| {
            let next = format!("bench.Entity{}", (index + 1) % count);
            ClassDescriptor::builder(format!("bench.Entity{index}"))
                .annotate(Annotation::new(annotations::DOMAIN_OBJECT).with("nature", "ENTITY"))
                .method(MethodDescriptor::builder("getName").returns(TypeRef::of("String")))
                .method(MethodDescriptor::builder("hideName").returns(TypeRef::of("boolean")))
                .method(MethodDescriptor::builder("getNext").returns(TypeRef::of(next.as_str())))
                .method(
                    MethodDescriptor::builder("link")
                        .param("other", TypeRef::of(next.as_str()))
                        .annotate(Annotation::new(annotations::ACTION).with("semantics", "IDEMPOTENT")),
                )
                .method(
                    MethodDescriptor::builder("getSiblings")
                        .returns(TypeRef::collection_of("java.util.List", next.as_str())),
                )
                .build()
        })
        .collect()
}

fn loader_for(count: usize, config: MetaModelConfig) -> Arc<SpecificationLoader> {
    let classes = Arc::new(ClassRepository::with_classes(generated_domain(count)));
    let beans = BeanTypeRegistry::with_beans(
        classes
            .all()
            .iter()
            .map(|class| BeanMetaData::classify(class, false)),
    );
    SpecificationLoader::builder(classes)
        .config(config)
        .bean_types(Arc::new(beans))
        .build()
}

fn benchmark_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_meta_model");
    for count in [10, 100, 500] {
        for (label, parallelize) in [("sequential", false), ("parallel", true)] {
            let config = MetaModelConfig {
                mode: IntrospectionMode::Full,
                parallelize,
                ..MetaModelConfig::default()
            };
            group.bench_with_input(BenchmarkId::new(label, count), &count, |b, &count| {
                b.iter(|| {
                    let loader = loader_for(count, config.clone());
                    loader.create_meta_model().unwrap();
                    black_box(loader.all_specifications().len())
                });
            });
        }
    }
    group.finish();
}

fn benchmark_cached_lookup(c: &mut Criterion) {
    let loader = loader_for(100, MetaModelConfig::default());
    loader.create_meta_model().unwrap();
    let key = TypeKey::new("bench.Entity42");

    c.bench_function("load_specification_cached", |b| {
        b.iter(|| {
            loader
                .load_specification(black_box(&key), IntrospectionState::FullyIntrospected)
                .unwrap()
        })
    });

    let spec = loader.specification(&key).unwrap();
    c.bench_function("get_action", |b| b.iter(|| spec.get_action(black_box("link")).unwrap()));
}

criterion_group!(benches, benchmark_bootstrap, benchmark_cached_lookup);
criterion_main!(benches);
