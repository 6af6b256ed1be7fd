use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use chrono::Utc;
use stockpile_core::{ProductId, WarehouseId};
use stockpile_infra::{InMemoryMovementLog, InMemoryProductStore, SeedData};
use stockpile_ledger::{BatchUpdate, MovementKind, MovementMetadata, StockLedger};
use stockpile_products::{Product, WarehouseRef};

fn seeded_ledger(
    product_count: usize,
    stock: i64,
) -> (
    StockLedger<Arc<InMemoryProductStore>, Arc<InMemoryMovementLog>>,
    Vec<ProductId>,
) {
    let warehouse = WarehouseRef {
        id: WarehouseId::new(),
        name: "Main Warehouse".to_string(),
        code: "WH-MAIN".to_string(),
    };

    let mut seed = SeedData::new().warehouse(warehouse.clone());
    let mut ids = Vec::with_capacity(product_count);
    for i in 0..product_count {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            sku: format!("SKU-{i:05}"),
            name: format!("Product {i}"),
            category: "General".to_string(),
            unit_of_measure: "pcs".to_string(),
            current_stock: stock,
            min_stock: 10,
            is_active: true,
            warehouse_id: warehouse.id,
            created_at: now,
            updated_at: now,
        };
        ids.push(product.id);
        seed = seed.product(product);
    }

    let store = Arc::new(InMemoryProductStore::with_seed(seed));
    let log = Arc::new(InMemoryMovementLog::new());
    (StockLedger::new(store, log), ids)
}

fn metadata() -> MovementMetadata {
    MovementMetadata::new(
        MovementKind::Receipt {
            supplier: "Bench Supplier".to_string(),
        },
        "RCP-BENCH",
    )
}

fn bench_apply_movement(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_movement");
    group.throughput(Throughput::Elements(1));

    group.bench_function("single_product", |b| {
        let (ledger, ids) = seeded_ledger(1, 1_000_000);
        let id = ids[0];
        b.iter(|| {
            ledger
                .apply_movement(black_box(id), black_box(1), metadata())
                .unwrap()
        });
    });

    group.finish();
}

fn bench_apply_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_batch");
    group.throughput(Throughput::Elements(10));

    group.bench_function("ten_lines", |b| {
        let (ledger, ids) = seeded_ledger(10, 1_000_000);
        b.iter(|| {
            let updates = ids
                .iter()
                .map(|&id| BatchUpdate::new(id, 1))
                .collect::<Vec<_>>();
            ledger.apply_batch(black_box(updates), metadata())
        });
    });

    group.finish();
}

fn bench_stock_levels(c: &mut Criterion) {
    c.bench_function("stock_levels/1000_products", |b| {
        let (ledger, _ids) = seeded_ledger(1000, 50);
        b.iter(|| ledger.stock_levels().unwrap());
    });
}

criterion_group!(
    benches,
    bench_apply_movement,
    bench_apply_batch,
    bench_stock_levels
);
criterion_main!(benches);
