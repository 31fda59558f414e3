use cornice_cors::constants::{header, method};
use cornice_cors::{
    Cors, Dispatch, Errors, Headers, MethodOptions, OriginPattern, PolicyDescriptor,
    PolicyRegistry, PreflightResult, ServiceOptions,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::sync::LazyLock;

const ROUTE: &str = "/bench";
const ALLOWED_ORIGIN: &str = "https://edge.bench.allowed";

static LARGE_HEADER_LINE: LazyLock<String> = LazyLock::new(|| {
    (0..64)
        .map(|idx| format!("X-Bench-Header-{idx:03}"))
        .collect::<Vec<_>>()
        .join(" ")
});

fn bench_options() -> ServiceOptions {
    ServiceOptions::new()
        .origins([ALLOWED_ORIGIN, "https://*.bench.allowed"])
        .headers(["Content-Type", "X-Trace"])
        .credentials(true)
        .max_age(600)
        .method(method::GET, MethodOptions::new())
        .method(method::POST, MethodOptions::new().headers(["X-Post"]))
        .method(method::DELETE, MethodOptions::new().enabled(false))
}

fn build_cors(options: &ServiceOptions) -> Cors {
    let mut registry = PolicyRegistry::new();
    registry
        .register(ROUTE, options)
        .expect("valid benchmark configuration");
    Cors::new(registry)
}

fn request(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn run(cors: &Cors, verb: &str, request: &Headers) -> Dispatch<()> {
    let mut response = Headers::new();
    let mut errors = Errors::new();
    cors.dispatch(
        ROUTE,
        verb,
        request,
        &mut response,
        &mut errors,
        |_, _| (),
    )
}

fn bench_preflight_processing(c: &mut Criterion) {
    let cors = build_cors(&bench_options());
    let mut group = c.benchmark_group("preflight_processing");

    group.bench_function("accept_allowed_preflight", |b| {
        let request = request(&[
            (header::ORIGIN, ALLOWED_ORIGIN),
            (header::ACCESS_CONTROL_REQUEST_METHOD, method::POST),
            (header::ACCESS_CONTROL_REQUEST_HEADERS, "Content-Type X-Post"),
        ]);
        b.iter(|| {
            match run(&cors, method::OPTIONS, black_box(&request)) {
                Dispatch::Preflight(PreflightResult::Completed) => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.bench_function("reject_disallowed_preflight", |b| {
        let request = request(&[
            (header::ORIGIN, "https://other.host"),
            (header::ACCESS_CONTROL_REQUEST_METHOD, method::GET),
        ]);
        b.iter(|| {
            match run(&cors, method::OPTIONS, black_box(&request)) {
                Dispatch::Rejected => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.bench_function("many_requested_headers", |b| {
        let request = request(&[
            (header::ORIGIN, "https://api.bench.allowed"),
            (header::ACCESS_CONTROL_REQUEST_METHOD, method::GET),
            (header::ACCESS_CONTROL_REQUEST_HEADERS, LARGE_HEADER_LINE.as_str()),
        ]);
        b.iter(|| {
            match run(&cors, method::OPTIONS, black_box(&request)) {
                Dispatch::Preflight(_) => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.finish();
}

fn bench_simple_processing(c: &mut Criterion) {
    let cors = build_cors(&bench_options());
    let mut group = c.benchmark_group("simple_processing");

    group.bench_function("accept_exact_origin", |b| {
        let request = request(&[(header::ORIGIN, ALLOWED_ORIGIN)]);
        b.iter(|| {
            match run(&cors, method::GET, black_box(&request)) {
                Dispatch::Handled(()) => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.bench_function("accept_glob_origin", |b| {
        let request = request(&[(header::ORIGIN, "https://api.bench.allowed")]);
        b.iter(|| {
            match run(&cors, method::GET, black_box(&request)) {
                Dispatch::Handled(()) => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.bench_function("reject_disabled_method", |b| {
        let request = request(&[(header::ORIGIN, ALLOWED_ORIGIN)]);
        b.iter(|| {
            match run(&cors, method::DELETE, black_box(&request)) {
                Dispatch::Rejected => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.bench_function("same_origin_passthrough", |b| {
        let request = Headers::new();
        b.iter(|| {
            match run(&cors, method::GET, black_box(&request)) {
                Dispatch::Handled(()) => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        })
    });

    group.finish();
}

fn bench_origin_list_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("origin_list_scaling");
    group.sample_size(40);

    for size in [8usize, 64, 256] {
        let origins: Vec<String> = (0..size)
            .map(|idx| format!("https://svc{idx:03}.bench.*"))
            .collect();
        let cors = build_cors(
            &ServiceOptions::new()
                .origins(origins)
                .method(method::GET, MethodOptions::new()),
        );
        let last = format!("https://svc{:03}.bench.allowed", size - 1);
        let request = request(&[(header::ORIGIN, last.as_str())]);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, request| {
            b.iter(|| {
                match run(&cors, method::GET, black_box(request)) {
                    Dispatch::Handled(()) => {}
                    other => panic!("unexpected outcome: {other:?}"),
                }
            })
        });
    }

    group.finish();
}

fn bench_policy_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_construction");
    let options = bench_options();

    group.bench_function("build_descriptor", |b| {
        b.iter(|| PolicyDescriptor::from_options(black_box(&options)).expect("valid policy"))
    });

    group.bench_function("compile_glob_pattern", |b| {
        b.iter(|| OriginPattern::new(black_box("https://*.bench.[a-z]*")).expect("valid glob"))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_preflight_processing,
    bench_simple_processing,
    bench_origin_list_scaling,
    bench_policy_construction
);
criterion_main!(benches);
