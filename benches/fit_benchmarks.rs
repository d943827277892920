use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::prelude::*;
use num::complex::Complex64;
use std::time::Duration;

use rlcfit::prelude::*;

fn target(npts: usize) -> (Frequency, Array1<Complex64>) {
    let freq = Frequency::from_log_range(1.0, 1000.0, npts, Scale::Mega);
    let circuit = EqCircuit::with_params(
        CircuitType::Model6,
        Parameters::from_pairs(&[(Slot::R0, 47.0), (Slot::L, 2e-9), (Slot::C0, 1e-12)]),
        &freq.w(),
    );
    let z = circuit.z();
    (freq, z)
}

fn bench_impedance(c: &mut Criterion) {
    let (freq, _) = target(201);
    let w = freq.w();
    let params = Parameters::new([47.0, 1e8, 0.5, 220.0, 2e-9, 3e-12, 5e-12]);

    let mut group = c.benchmark_group("impedance_201_points");
    group.throughput(Throughput::Elements(w.len() as u64));
    for circuit in CircuitType::ALL.iter() {
        let eq = EqCircuit::with_params(*circuit, params.cleaned(*circuit), &w);
        group.bench_with_input(BenchmarkId::new("z", circuit), &eq, |b, eq| {
            b.iter(|| black_box(eq.z()))
        });
    }
    group.finish();
}

fn bench_single_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_fit");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for npts in [51, 201, 801] {
        let (freq, measured) = target(npts);
        let options = FitOptionsBuilder::new().model_id(6).build().unwrap();
        group.throughput(Throughput::Elements(npts as u64));
        group.bench_with_input(
            BenchmarkId::new("model6", npts),
            &(freq, measured, options),
            |b, (freq, measured, options)| {
                b.iter(|| {
                    let mut eq = EqCircuit::with_params(
                        CircuitType::Model6,
                        Parameters::from_pairs(&[
                            (Slot::R0, 40.0),
                            (Slot::L, 1e-9),
                            (Slot::C0, 2e-12),
                        ]),
                        &freq.w(),
                    );
                    black_box(eq.optimize(black_box(measured), options).unwrap())
                });
            },
        );
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let (freq, measured) = target(101);
    let options = FitOptionsBuilder::new()
        .n_elements(2, 3)
        .max_evals(2000)
        .build()
        .unwrap();

    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(30));
    group.sample_size(10);
    group.bench_function("two_and_three_elements", |b| {
        b.iter(|| black_box(search(freq.freq(), black_box(&measured), &options).unwrap()))
    });
    group.finish();
}

criterion_group!(fit_benches, bench_impedance, bench_single_fit, bench_search);
criterion_main!(fit_benches);
