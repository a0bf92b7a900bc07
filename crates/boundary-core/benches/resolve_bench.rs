//! Criterion benchmarks for boundary resolution.

use boundary_core::{BASE_BUILDING, BoundaryReport, BoundaryResolver, BuildingSpace, SystemInstance};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// A property with `floors` floors of `per_floor` tenant suites, half of
/// them leased to the target tenant.
fn make_property(floors: usize, per_floor: usize) -> (Vec<SystemInstance>, Vec<BuildingSpace>) {
    let mut spaces = Vec::with_capacity(floors * per_floor);
    let mut systems = Vec::with_capacity(floors * 2);

    for floor in 0..floors {
        let mut suite_ids = Vec::with_capacity(per_floor);
        for suite in 0..per_floor {
            let id = format!("F{floor}-S{suite}");
            let tenant = if suite % 2 == 0 { "acme" } else { "globex" };
            spaces.push(BuildingSpace::tenant(id.clone(), tenant, floor % 3 != 0));
            suite_ids.push(id);
        }

        systems.push(SystemInstance::new(format!("VAV-{floor}"), "Tenant").serving(suite_ids.clone()));
        let mut riser = suite_ids;
        riser.push(BASE_BUILDING.to_string());
        systems.push(
            SystemInstance::new(format!("RISER-{floor}"), "Landlord")
                .serving(riser)
                .allocated("pro_rata"),
        );
    }

    (systems, spaces)
}

fn bench_resolve(c: &mut Criterion) {
    let (systems, spaces) = make_property(40, 25);

    c.bench_function("resolve_1000_spaces_80_systems", |b| {
        b.iter(|| BoundaryResolver::resolve(black_box(&systems), black_box(&spaces), "acme"));
    });

    c.bench_function("report_1000_spaces_80_systems", |b| {
        b.iter(|| BoundaryReport::build(black_box(&systems), black_box(&spaces), "acme"));
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
