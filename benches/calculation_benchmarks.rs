//! Performance benchmarks for the salon payroll engine.
//!
//! Measures the progressive bracket calculator, a full payroll run over a
//! realistic monthly report, and the same run through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use salon_payroll::api::{AppState, create_router};
use salon_payroll::calculation::{PayrollInput, progressive_bonus, run_payroll};
use salon_payroll::config::ConfigLoader;
use salon_payroll::models::{Grid, Sheet, Workbook};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/salon").expect("Failed to load config")
}

/// Builds a monthly report with a full roster and `sales_rows` product events.
fn create_sheet(name: &str, sales_rows: usize) -> Sheet {
    let mut grid = Grid::default();
    grid.set(4, 4, 7_200_000);
    grid.set(6, 4, 3_800_000);

    let consultants = [
        ("Amy", 2_300_000, 1_400_000),
        ("Bea", 1_750_000, 900_000),
        ("Cat", 1_300_000, 700_000),
        ("Dee", 900_000, 450_000),
        ("Eve", 600_000, 350_000),
    ];
    for (i, (name, performance, consumption)) in consultants.into_iter().enumerate() {
        grid.set(8 + i, 0, name);
        grid.set(8 + i, 2, performance);
        grid.set(8 + i, 6, consumption);
    }

    for i in 0..7 {
        grid.set(8 + i, 10, format!("Therapist A{}", i).as_str());
        grid.set(8 + i, 12, 3000);
        grid.set(8 + i, 13, format!("Therapist B{}", i).as_str());
        grid.set(8 + i, 14, 32000);
        grid.set(8 + i, 15, 2500);
    }
    for i in 0..3 {
        grid.set(8 + i, 16, format!("Nurse {}", i).as_str());
        grid.set(8 + i, 18, 4000);
    }
    for i in 0..4 {
        grid.set(11 + i, 16, format!("Front {}", i).as_str());
        grid.set(11 + i, 18, 1000);
    }

    let names = ["Amy", "Bea", "Cat", "Dee", "Eve"];
    for i in 0..sales_rows {
        grid.set(16 + i, 5, "購產品");
        grid.set(16 + i, 14, names[i % names.len()]);
    }

    Sheet::new(name, grid)
}

fn create_input() -> PayrollInput {
    PayrollInput {
        staff_count: 17,
        manager_name: Some("Amy".to_string()),
        high_target_amount: Some(Decimal::from(6_000_000)),
        sheet_name: None,
    }
}

fn bench_progressive_bonus(c: &mut Criterion) {
    let loader = load_config();
    let brackets = loader.config().brackets();

    c.bench_function("progressive_bonus_store_performance", |b| {
        b.iter(|| {
            progressive_bonus(
                black_box(Decimal::from(7_200_000)),
                black_box(&brackets.store_performance),
            )
        })
    });
}

fn bench_payroll_run(c: &mut Criterion) {
    let loader = load_config();
    let input = create_input();
    let mut group = c.benchmark_group("payroll_run");

    for months in [1usize, 12] {
        let sheets = (0..months)
            .map(|m| create_sheet(&format!("2025{:02}", m + 1), 200))
            .collect();
        let workbook = Workbook::new(sheets);

        group.throughput(Throughput::Elements(months as u64));
        group.bench_with_input(BenchmarkId::from_parameter(months), &workbook, |b, workbook| {
            b.iter(|| run_payroll(black_box(workbook), black_box(&input), loader.config()).unwrap())
        });
    }

    group.finish();
}

fn bench_http_calculate(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());
    let workbook = Workbook::new(vec![create_sheet("202506", 200)]);
    let body = serde_json::json!({
        "workbook": workbook,
        "staff_count": 17,
        "manager_name": "Amy",
        "high_target_amount": "6000000"
    })
    .to_string();

    c.bench_function("http_calculate", |b| {
        b.to_async(&runtime).iter(|| {
            let router = create_router(state.clone());
            let body = body.clone();
            async move {
                router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body))
                            .unwrap(),
                    )
                    .await
                    .unwrap()
            }
        })
    });
}

criterion_group!(
    benches,
    bench_progressive_bonus,
    bench_payroll_run,
    bench_http_calculate
);
criterion_main!(benches);
