use criterion::{criterion_group, criterion_main};

mod system;

criterion_group!(
    benches,
    system::shell::bench_tokenize,
    system::shell::bench_dispatch,
    system::shell::bench_poll_lines
);
criterion_main!(benches);
