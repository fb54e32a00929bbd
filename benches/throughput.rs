use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use plainrouter::{Dispatcher, HandlerRequest, RawRequest, Router};
use std::hint::black_box;

fn example_router() -> Router {
    let mut router = Router::new();
    let paths = [
        "/",
        "/zoo/animals",
        "/zoo/animals/feeding",
        "/zoo/health",
        "/inventory/feeds/items/batches",
        "/complex/a/b/c/d/e/f/g/h/i",
    ];
    for path in paths {
        router
            .get(path, |_req: &HandlerRequest| "ok")
            .post(path, |req: &HandlerRequest| req.body().to_vec())
            .put(path, |_req: &HandlerRequest| "updated")
            .delete(path, |_req: &HandlerRequest| "deleted");
    }
    router
}

fn bench_lookup(c: &mut Criterion) {
    let router = example_router();
    c.bench_function("route_lookup", |b| {
        let test_paths = [
            (Method::GET, "/zoo/animals"),
            (Method::POST, "/inventory/feeds/items/batches"),
            (Method::DELETE, "/complex/a/b/c/d/e/f/g/h/i"),
            (Method::GET, "/does/not/exist"),
            (Method::PATCH, "/zoo/health"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.lookup(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(example_router());
    c.bench_function("dispatch_raw", |b| {
        b.iter(|| {
            let resp = dispatcher.dispatch_raw(
                RawRequest::new("POST", "/zoo/animals?kind=otter").with_body("splash"),
            );
            black_box(resp.is_ok());
        })
    });
    c.bench_function("dispatch_not_found", |b| {
        b.iter(|| {
            let resp = dispatcher.dispatch_raw(RawRequest::new("GET", "/missing"));
            black_box(resp.is_ok());
        })
    });
}

criterion_group!(benches, bench_lookup, bench_dispatch);
criterion_main!(benches);
