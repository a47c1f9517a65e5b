use gpass_crypto::{decrypt, encrypt};
use secrecy::SecretString;

/// Printable record-like text, cycled to `size` bytes.
fn password_file_body(size: usize) -> Vec<u8> {
    b"general\x05mail\x0cwork account\x05alice\x07hunter2"
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_encrypt(bencher: divan::Bencher, size: usize) {
    let password = SecretString::from("bench-password");
    let data = password_file_body(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| encrypt(divan::black_box(&data), divan::black_box(&password)).unwrap());
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_decrypt(bencher: divan::Bencher, size: usize) {
    let password = SecretString::from("bench-password");
    let encrypted = encrypt(&password_file_body(size), &password).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| {
            decrypt(
                divan::black_box(&encrypted),
                divan::black_box(&password),
                None,
            )
            .unwrap()
        });
}

fn main() {
    divan::main();
}
