use criterion::{black_box, criterion_group, criterion_main, Criterion};
use report_tables::{Table, TableController};

fn create_test_data(rows: usize) -> Table {
    let results = [
        "TCP_MISS/200",
        "TCP_HIT/200",
        "TCP_DENIED/403",
        "TCP_REFRESH_MODIFIED/304",
        "TCP_TUNNEL/200",
    ];
    let hosts = [
        "www.example.com",
        "cdn.example.org",
        "ads.tracker.net",
        "mail.corp.local",
        "updates.vendor.io",
    ];

    let mut table = Table::new("bench").with_header(["Client", "Result", "Bytes", "Host"]);
    for i in 0..rows {
        let client = format!("192.168.{}.{}", (i / 250) % 250, i % 250);
        let bytes = format!("{}", (i * 7919) % 1_000_000);
        table.push_row([
            client.as_str(),
            results[i % results.len()],
            bytes.as_str(),
            hosts[(i / 3) % hosts.len()],
        ]);
    }
    table
}

fn benchmark_search(c: &mut Criterion) {
    let table_10k = create_test_data(10_000);
    let table_50k = create_test_data(50_000);

    let mut group = c.benchmark_group("search");

    group.bench_function("10k_rows", |b| {
        let mut controller = TableController::new(table_10k.clone());
        b.iter(|| controller.search(black_box("tracker")));
    });

    group.bench_function("50k_rows", |b| {
        let mut controller = TableController::new(table_50k.clone());
        b.iter(|| controller.search(black_box("tracker")));
    });

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let table_10k = create_test_data(10_000);
    let table_50k = create_test_data(50_000);

    let mut group = c.benchmark_group("sort");

    group.bench_function("numeric_10k_rows", |b| {
        let mut controller = TableController::new(table_10k.clone());
        b.iter(|| controller.sort_by_column(black_box(2)));
    });

    group.bench_function("text_10k_rows", |b| {
        let mut controller = TableController::new(table_10k.clone());
        b.iter(|| controller.sort_by_column(black_box(3)));
    });

    group.bench_function("numeric_50k_rows", |b| {
        let mut controller = TableController::new(table_50k.clone());
        b.iter(|| controller.sort_by_column(black_box(2)));
    });

    group.finish();
}

fn benchmark_export(c: &mut Criterion) {
    let table = create_test_data(10_000);
    let mut controller = TableController::new(table);
    controller.search("example");

    c.bench_function("export_10k_filtered", |b| {
        b.iter(|| controller.export_csv(black_box("tabla_exportada.csv")));
    });
}

criterion_group!(benches, benchmark_search, benchmark_sort, benchmark_export);
criterion_main!(benches);
