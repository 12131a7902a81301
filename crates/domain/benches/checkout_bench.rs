use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{CartLine, CheckoutTransactor};
use store::{Store, StoreConfig};

fn seeded_transactor(rt: &tokio::runtime::Runtime) -> CheckoutTransactor {
    rt.block_on(async {
        let store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        store.ensure_schema().await.unwrap();
        CheckoutTransactor::new(store)
    })
}

fn cart(lines: usize) -> Vec<CartLine> {
    (0..lines)
        .map(|i| CartLine::new((i % 2) as i64 + 1, 1))
        .collect()
}

fn bench_checkout_single_line(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let transactor = seeded_transactor(&rt);

    c.bench_function("checkout/single_line", |b| {
        b.iter(|| {
            rt.block_on(async {
                transactor.checkout(cart(1)).await.unwrap();
            });
        });
    });
}

fn bench_checkout_cart_sizes(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let transactor = seeded_transactor(&rt);
    let mut group = c.benchmark_group("checkout/cart_size");

    for lines in [10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            b.iter(|| {
                rt.block_on(async {
                    transactor.checkout(cart(lines)).await.unwrap();
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_checkout_single_line, bench_checkout_cart_sizes);
criterion_main!(benches);
