use criterion::{BatchSize, Criterion, Throughput};
use diagshell::serial::{Error, SerialPort};
use diagshell::system::Platform;
use diagshell::system::builtins::BUILTINS;
use diagshell::system::shell::Shell;
use diagshell::system::tokenizer::tokenize;
use diagshell::time::TickCounter;
use std::hint::black_box;

static TICKS: TickCounter = TickCounter::new();

/// Replays a fixed input and discards everything written
struct ReplayPort {
    rx: &'static [u8],
    pos: usize,
}

impl SerialPort for ReplayPort {
    type Error = Error;

    fn is_ready(&self) -> bool {
        self.pos < self.rx.len()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let byte = *self.rx.get(self.pos).ok_or(Error::NotReady)?;
        self.pos += 1;
        Ok(byte)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        black_box(byte);
        Ok(())
    }
}

struct NullPlatform;

impl Platform for NullPlatform {
    fn reset(&mut self) {}
    fn delay_ms(&mut self, _ms: u32) {}
}

pub fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let line = b"TEST2   AA  0 16 extra extra";
    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(line))));
    group.finish();
}

pub fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for line in [&b"test 0\r"[..], b"TEST2 AA 0 64\r", b"bogus 1 2\r"] {
        let name = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
        group.bench_function(name, |b| {
            let mut shell = Shell::new(&BUILTINS, &TICKS);
            shell.set_echo(false);
            let mut platform = NullPlatform;
            b.iter(|| {
                for &byte in line {
                    let mut port = ReplayPort { rx: b"", pos: 0 };
                    let _ = shell.process_byte(byte, &mut port, &mut platform);
                }
            })
        });
    }
    group.finish();
}

pub fn bench_poll_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll");
    let input: &'static [u8] = b"help\rtest 1\rTEST2 5 10 20\rcls\r";
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("poll_lines", |b| {
        b.iter_batched_ref(
            || {
                (
                    Shell::new(&BUILTINS, &TICKS),
                    ReplayPort { rx: input, pos: 0 },
                )
            },
            |(shell, port)| {
                shell
                    .poll(port, &mut NullPlatform)
                    .expect("Failed to poll");
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
