//! Criterion benchmarks for SDT serialization and deserialization.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sdt_core::descriptors::Descriptor;
use sdt_core::sdt::{RunningStatus, Sdt, SdtSerializeOptions, TableKind};

const SERVICE_COUNTS: &[u16] = &[16, 128, 512];

fn make_table(services: u16) -> Sdt {
    let mut sdt = Sdt::new(TableKind::Actual, 3, true, 0x0001, 0x20FA);
    for id in 0..services {
        let s = sdt.service_mut(id);
        s.set_running_status(RunningStatus::Running);
        s.eit_present_following = true;
        s.set_provider("Provider", 0x01);
        s.set_name(&format!("Channel {id}"), 0x01);
        s.descs.add(Descriptor::new_truncated(0x5F, &[0x00, 0x00, 0x00, 0x28]));
    }
    sdt
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdt_serialize");
    group.warm_up_time(Duration::from_millis(200)).measurement_time(Duration::from_secs(2));

    for &count in SERVICE_COUNTS {
        let sdt = make_table(count);
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("default", count), &sdt, |b, sdt| {
            b.iter(|| black_box(sdt.serialize()))
        });
        group.bench_with_input(BenchmarkId::new("small_sections", count), &sdt, |b, sdt| {
            let options = SdtSerializeOptions::with_max_payload(300);
            b.iter(|| black_box(sdt.serialize_with(&options)))
        });
    }
    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdt_deserialize");
    group.warm_up_time(Duration::from_millis(200)).measurement_time(Duration::from_secs(2));

    for &count in SERVICE_COUNTS {
        let sections = make_table(count).serialize();
        let bytes: usize = sections.iter().map(|s| s.payload.len()).sum();
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sections, |b, sections| {
            b.iter(|| black_box(Sdt::from_sections(sections)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_serialize, bench_deserialize);
criterion_main!(benches);
