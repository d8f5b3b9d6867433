use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::source::first_column;
use gradebook_core::statistics::mean;
use gradebook_core::{MarkKind, SubjectRoster};

fn make_roster(subjects: usize, grades_per_subject: usize) -> SubjectRoster {
    let names: Vec<String> = (0..subjects).map(|i| format!("subject-{i}")).collect();
    let mut roster = SubjectRoster::from_names(names.iter().cloned());
    for name in &names {
        for g in 0..grades_per_subject {
            roster
                .record(name, 2 + (g % 4) as i64, MarkKind::Grade)
                .unwrap();
        }
    }
    roster
}

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");

    for (subjects, grades) in [(5, 10), (20, 50), (50, 200)] {
        group.bench_function(format!("grade subjects={subjects},grades={grades}"), |b| {
            let roster = make_roster(subjects, grades);
            b.iter(|| {
                let mut r = roster.clone();
                r.record(black_box("subject-0"), black_box(4), MarkKind::Grade)
                    .unwrap();
                r.grade_average()
            })
        });
    }

    group.bench_function("test subjects=20,grades=50", |b| {
        let roster = make_roster(20, 50);
        b.iter(|| {
            let mut r = roster.clone();
            r.record(black_box("subject-3"), black_box(77), MarkKind::Test)
                .unwrap();
            r.test_average("subject-3")
        })
    });

    group.finish();
}

fn bench_mean(c: &mut Criterion) {
    let values: Vec<u8> = (0..10_000).map(|i| (i % 101) as u8).collect();
    c.bench_function("mean 10k", |b| {
        b.iter(|| mean(black_box(&values).iter().copied()))
    });
}

fn bench_first_column(c: &mut Criterion) {
    let csv: String = (0..1000)
        .map(|i| format!("\"subject, {i}\",{i},extra\n"))
        .collect();
    c.bench_function("first_column 1000 rows", |b| {
        b.iter(|| first_column(black_box(&csv)))
    });
}

criterion_group!(benches, bench_record, bench_mean, bench_first_column);
criterion_main!(benches);
