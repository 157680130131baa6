use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reshield_core::record::{A1cResult, Gender, PatientRecord, PrimaryDiagnosis, Race};
use reshield_core::schema::{expected_columns, FeatureSchema};
use reshield_core::{align, encode_columns};

fn mk_records(n: usize) -> Vec<PatientRecord> {
    (0..n)
        .map(|i| PatientRecord {
            gender: if i % 2 == 0 { Gender::Female } else { Gender::Male },
            race: Race::ALL[i % Race::ALL.len()],
            age_group: (i % 10) as u32,
            time_in_hospital: (i % 14 + 1) as u32,
            num_lab_procedures: (i % 151) as u32,
            num_medications: (i % 101) as u32,
            service_utilization: (i % 21) as u32,
            primary_diagnosis: PrimaryDiagnosis::ALL[i % PrimaryDiagnosis::ALL.len()],
            a1c_result: A1cResult::ALL[i % A1cResult::ALL.len()],
            ..PatientRecord::default()
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let schema = FeatureSchema::new(expected_columns()).unwrap();
    let records = mk_records(1_000);

    c.bench_function("encode_columns", |b| {
        b.iter(|| {
            for record in &records {
                black_box(encode_columns(black_box(record)));
            }
        })
    });

    c.bench_function("align_full_universe", |b| {
        b.iter(|| {
            for record in &records {
                let row = align(black_box(record), &schema);
                black_box(row.len());
            }
        })
    });
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
