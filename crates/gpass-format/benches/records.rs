use encoding_rs::UTF_8;
use gpass_core::Entry;
use gpass_format::{export_entries, import_data};
use secrecy::SecretString;

fn make_entries(count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| Entry {
            name: format!("entry {i}"),
            description: "imported from bench".into(),
            updated: 1_000_000 + i as u64,
            hostname: format!("host{i}.example.org"),
            username: format!("user{i}"),
            password: format!("password-{i:08}"),
        })
        .collect()
}

#[divan::bench(args = [10, 1000, 10000])]
fn bench_import(bencher: divan::Bencher, count: usize) {
    let password = SecretString::from("bench-password");
    let blob = export_entries(&make_entries(count), &password, UTF_8).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(blob.len()))
        .bench(|| import_data(divan::black_box(&blob), divan::black_box(&password), UTF_8).unwrap());
}

#[divan::bench(args = [10, 1000, 10000])]
fn bench_export(bencher: divan::Bencher, count: usize) {
    let password = SecretString::from("bench-password");
    let entries = make_entries(count);
    bencher.bench(|| export_entries(divan::black_box(&entries), &password, UTF_8).unwrap());
}

fn main() {
    divan::main();
}
