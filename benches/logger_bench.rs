use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http_access_logger::logging::{format_http_log, LogLevel, LogRecord};

fn classification_benchmark(c: &mut Criterion) {
    c.bench_function("classify_and_filter", |b| {
        b.iter(|| {
            for status in [200u16, 301, 404, 500] {
                let severity = LogLevel::from_status(black_box(status));
                black_box(LogLevel::Warn.permits(severity));
            }
        })
    });
}

fn format_benchmark(c: &mut Criterion) {
    let record = LogRecord {
        method: "POST".to_string(),
        path: "/test/submit".to_string(),
        status_code: 200,
        duration_ms: 12,
        user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_string()),
        ip: Some("203.0.113.9".to_string()),
        timestamp: Utc::now(),
    };

    c.bench_function("format_http_log", |b| {
        b.iter(|| black_box(format_http_log(black_box(&record))))
    });
}

criterion_group!(benches, classification_benchmark, format_benchmark);
criterion_main!(benches);
