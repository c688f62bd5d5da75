use std::hint::black_box;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use goldfish::{Classifier, Config, SessionRecord};

const CONFIG: &str = "\
vaults:
  work: { keywords: [invoice, client] }
  personal: { keywords: [garden] }
consolidation_rules:
  - { name: acme, vault: work, aliases: [acme-api, acme-web] }
  - { name: velona, vault: work, aliases: [] }
  - { name: notes, aliases: [journal] }
";

/// Generate synthetic records that exercise each strategy in turn
fn generate_records(num_records: usize) -> Vec<SessionRecord> {
    (0..num_records)
        .map(|i| {
            let mut record = SessionRecord::new(format!("session-{}", i));
            record.conversation_message_count = 4;
            match i % 4 {
                0 => {
                    record.files_touched = (0..10)
                        .map(|f| format!("/Users/test/Projects/acme/src/module_{}.py", f))
                        .collect();
                }
                1 => {
                    record.files_touched = (0..10)
                        .map(|f| format!("/Users/test/code/project-{}/lib/file_{}.ts", i % 7, f))
                        .collect();
                }
                2 => record.first_user_message = Some("please configure the mcp server".to_string()),
                _ => {
                    record.first_user_message =
                        Some(format!("Can you research distributed consensus variant {}", i))
                }
            }
            record
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let config = Config::from_yaml(CONFIG, Path::new("/memory")).unwrap();
    let classifier = Classifier::new(&config);
    let mut group = c.benchmark_group("classify");

    for size in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let records = generate_records(size);

            b.iter(|| {
                for record in &records {
                    black_box(classifier.classify(black_box(record)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
