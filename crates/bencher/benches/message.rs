use std::hint::black_box;

use bencher::{TestCase, TestFile};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use micro_message::{HttpMessage, Request, Stream, Uri};

static SIMPLE_URIS: TestFile = TestFile::new("simple.txt", include_str!("../resources/uri/simple.txt"));
static COMPLEX_URIS: TestFile = TestFile::new("complex.txt", include_str!("../resources/uri/complex.txt"));

fn create_test_cases() -> Vec<TestCase> {
    vec![TestCase::small("simple_uris", SIMPLE_URIS), TestCase::large("complex_uris", COMPLEX_URIS)]
}

fn parse_all(file: &TestFile) -> Vec<Uri> {
    file.inputs().map(|input| Uri::parse(input).expect("input should be a valid uri")).collect()
}

fn benchmark_uri_parse(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("uri_parse");

    for case in create_test_cases() {
        group.throughput(Throughput::Bytes(case.file().input_len()));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            b.iter(|| {
                for input in case.file().inputs() {
                    black_box(Uri::parse(black_box(input)).expect("input should be a valid uri"));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_uri_render(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("uri_render");

    for case in create_test_cases() {
        let uris = parse_all(case.file());
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &uris, |b, uris| {
            b.iter(|| {
                for uri in uris {
                    black_box(uri.to_string());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_uri_with(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("uri_with");

    for case in create_test_cases() {
        let uris = parse_all(case.file());
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &uris, |b, uris| {
            b.iter(|| {
                for uri in uris {
                    let changed = uri
                        .with_scheme("https")
                        .with_port(Some(8443))
                        .expect("port should be in range")
                        .with_path("/new path/%41")
                        .with_query("a=1&b=2");
                    black_box(changed);
                }
            });
        });
    }

    group.finish();
}

fn benchmark_request_headers(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("request_headers");

    for case in create_test_cases() {
        let count = case.group().header_count();
        let names: Vec<String> = (0..count).map(|i| format!("X-Header-{i}")).collect();
        let uri = Uri::parse("http://example.com:8080/items?page=1").expect("uri should be valid");

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &names, |b, names| {
            b.iter_batched(
                || Request::new("GET", uri.clone()).expect("method should be valid"),
                |mut request| {
                    for name in names {
                        request = request.with_added_header(name, "value").expect("header should be valid");
                    }
                    for name in names {
                        black_box(request.header_line(&name.to_ascii_lowercase()));
                    }
                    black_box(request.without_header(&names[0]));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_stream(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("stream");

    for case in create_test_cases() {
        let content = case.file().content().as_bytes();
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), content, |b, content| {
            b.iter(|| {
                let stream = Stream::memory();
                stream.write(content).expect("memory stream should be writable");
                stream.rewind().expect("memory stream should be seekable");
                black_box(stream.contents().expect("memory stream should be readable"));
            });
        });
    }

    group.finish();
}

criterion_group!(
    message,
    benchmark_uri_parse,
    benchmark_uri_render,
    benchmark_uri_with,
    benchmark_request_headers,
    benchmark_stream
);
criterion_main!(message);
