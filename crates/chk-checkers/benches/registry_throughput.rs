use chk_checkers::{same_contents, CheckerRegistry, Value};
use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_ints(len: i64) -> Value {
    Value::from((0..len).rev().collect::<Vec<i64>>())
}

fn bench_dispatch(c: &mut Criterion) {
    let registry = CheckerRegistry::standard();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let within = [
        Value::Time(start),
        Value::Time(start + TimeDelta::seconds(45)),
        Value::Duration(TimeDelta::seconds(60)),
    ];
    let tolerance = [Value::Float(1.0), Value::Int(1), Value::Float(1e-9)];

    c.bench_function("registry_within_duration", |b| {
        b.iter(|| {
            let verdict = registry
                .check("WithinDuration", black_box(&within))
                .expect("dispatch");
            black_box(verdict);
        });
    });
    c.bench_function("registry_equals_with_tolerance", |b| {
        b.iter(|| {
            let verdict = registry
                .check("EqualsWithTolerance", black_box(&tolerance))
                .expect("dispatch");
            black_box(verdict);
        });
    });
}

fn bench_same_contents(c: &mut Criterion) {
    let obtained = sample_ints(256);
    let expected = Value::from((0..256).collect::<Vec<i64>>());
    c.bench_function("same_contents_256", |b| {
        b.iter(|| black_box(same_contents(black_box(&obtained), black_box(&expected))));
    });
}

criterion_group!(benches, bench_dispatch, bench_same_contents);
criterion_main!(benches);
