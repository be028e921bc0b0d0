//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for telnetcodec performance

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use darkwind_telnetcodec::{
    Preference, SharedOptions, TelnetCodec, TelnetCommand, TelnetFrame, TelnetOption,
};
use std::hint::black_box;
use tokio_util::codec::{Decoder, Encoder};

fn drain(codec: &mut TelnetCodec, buffer: &mut BytesMut) -> usize {
    let mut count = 0;
    while let Some(event) = codec.decode(buffer).unwrap() {
        black_box(event);
        count += 1;
    }
    count
}

fn mud_traffic(lines: usize) -> BytesMut {
    let mut server = TelnetCodec::default();
    let mut wire = BytesMut::new();
    for i in 0..lines {
        server
            .encode(
                TelnetFrame::Text(format!("The goblin hits you for {i} damage.\r\n")),
                &mut wire,
            )
            .unwrap();
        if i % 4 == 0 {
            server
                .encode(
                    TelnetFrame::subnegotiate_text(
                        TelnetOption::GMCP,
                        &format!(r#"Char.Vitals {{"hp":{i},"maxhp":100}}"#),
                    ),
                    &mut wire,
                )
                .unwrap();
        }
    }
    wire
}

// ============================================================================
// Decoding Benchmarks
// ============================================================================

fn bench_decode_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_plain_text");

    for size in [100usize, 1000, 10000] {
        group.throughput(Throughput::Bytes(size as u64));
        let data: Vec<u8> = b"abcdefghijklmnopqrstuvwxyz0123456789 \r\n"
            .iter()
            .copied()
            .cycle()
            .take(size)
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let mut codec = TelnetCodec::default();
            b.iter(|| {
                let mut buffer = BytesMut::from(&data[..]);
                drain(&mut codec, &mut buffer)
            });
        });
    }

    group.finish();
}

fn bench_decode_mud_traffic(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_mud_traffic");

    for lines in [10usize, 100, 1000] {
        let wire = mud_traffic(lines);
        group.throughput(Throughput::Bytes(wire.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(lines), &wire, |b, wire| {
            let options = SharedOptions::new();
            options.register(TelnetOption::GMCP, Preference::Wanted);
            let mut codec = TelnetCodec::new(options);
            b.iter(|| {
                let mut buffer = wire.clone();
                drain(&mut codec, &mut buffer)
            });
        });
    }

    group.finish();
}

fn bench_decode_negotiation(c: &mut Criterion) {
    c.bench_function("decode_repeated_do", |b| {
        let mut codec = TelnetCodec::default();
        let bytes: Vec<u8> = [0xFFu8, 0xFD, 0x01].repeat(100);
        b.iter(|| {
            let mut buffer = BytesMut::from(&bytes[..]);
            drain(&mut codec, &mut buffer)
        });
    });
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encode_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_frames");

    group.bench_function("text_line", |b| {
        let mut codec = TelnetCodec::default();
        let mut buffer = BytesMut::with_capacity(1024);
        b.iter(|| {
            buffer.clear();
            codec
                .encode(
                    black_box(TelnetFrame::Text("look at goblin\n".to_string())),
                    &mut buffer,
                )
                .unwrap();
        });
    });

    group.bench_function("text_with_iac", |b| {
        let mut codec = TelnetCodec::default();
        let mut buffer = BytesMut::with_capacity(1024);
        let text: String = "\u{FF}x".repeat(64);
        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(TelnetFrame::Text(text.clone())), &mut buffer)
                .unwrap();
        });
    });

    group.bench_function("negotiation", |b| {
        let mut codec = TelnetCodec::default();
        let mut buffer = BytesMut::with_capacity(16);
        b.iter(|| {
            buffer.clear();
            codec
                .encode(
                    black_box(TelnetFrame::Command(TelnetCommand::Will, TelnetOption::GMCP)),
                    &mut buffer,
                )
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_plain_text,
    bench_decode_mud_traffic,
    bench_decode_negotiation,
    bench_encode_frames
);
criterion_main!(benches);
