// Mapping generation benchmarks over wide and deeply cyclic type graphs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nestmap::{
    FieldDescriptor, MappingSettings, NativeType, TypeDescriptor, TypeMappingWriter, TypeRegistry,
};

/// One type with `width` scalar fields
fn wide_registry(width: usize) -> TypeRegistry {
    let scalars = [
        NativeType::String,
        NativeType::Int32,
        NativeType::Int64,
        NativeType::Float64,
        NativeType::DateTime,
        NativeType::Bool,
    ];
    let descriptor = (0..width).fold(TypeDescriptor::new("Wide"), |descriptor, i| {
        descriptor.field(FieldDescriptor::new(
            format!("field{}", i),
            scalars[i % scalars.len()].clone(),
        ))
    });
    TypeRegistry::from(vec![descriptor])
}

/// `size` types in a ring, each also pointing at itself and the ring's head
fn ring_registry(size: usize) -> TypeRegistry {
    let descriptors = (0..size)
        .map(|i| {
            TypeDescriptor::new(format!("R{}", i))
                .field(FieldDescriptor::of::<String>("name"))
                .field(FieldDescriptor::new(
                    "next",
                    NativeType::structured(format!("R{}", (i + 1) % size)),
                ))
                .field(FieldDescriptor::new(
                    "children",
                    NativeType::generic("Vec", vec![NativeType::structured(format!("R{}", i))]),
                ))
                .field(FieldDescriptor::new("head", NativeType::structured("R0")))
        })
        .collect::<Vec<_>>();
    TypeRegistry::from(descriptors)
}

fn benchmark_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide");

    for width in [10, 100, 1000].iter() {
        let registry = wide_registry(*width);
        group.bench_with_input(BenchmarkId::new("nestmap", width), width, |b, _| {
            let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
            b.iter(|| black_box(writer.build_mapping("Wide", None).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_cyclic(c: &mut Criterion) {
    let mut group = c.benchmark_group("cyclic");
    let registry = ring_registry(3);

    for max_recursion in [0u32, 1, 2].iter() {
        group.bench_with_input(
            BenchmarkId::new("ring3", max_recursion),
            max_recursion,
            |b, &max_recursion| {
                let settings = MappingSettings::default().with_max_recursion(max_recursion);
                let writer = TypeMappingWriter::new(&registry, settings);
                b.iter(|| black_box(writer.build_mapping("R0", None).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_wide, benchmark_cyclic);
criterion_main!(benches);
