use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use macsign_core::{Context, SignRequest};
use macsign_mltshp::{build_authorization, sign, AccessToken, RequestSigner, SignatureRequest, SigningConfig};
use once_cell::sync::Lazy;

criterion_group!(benches, bench);
criterion_main!(benches);

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success")
});

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("mltshp");
    let token = AccessToken::new("abc123", "s3cr3t");
    let config = SigningConfig::default();

    group.bench_function("sign", |b| {
        let req = SignatureRequest::new(&token, "/api/sharedfile/GA4", &config);
        b.iter(|| {
            sign(&req, 1000000000, "0123456789abcdef0123456789abcdef01").expect("must success")
        })
    });

    group.bench_function("build_authorization", |b| {
        b.iter(|| build_authorization(&token, "/api/sharedfile/GA4", &config).expect("must success"))
    });

    group.bench_function("request_signer", |b| {
        let s = RequestSigner::new();
        let ctx = Context::new();

        b.to_async(&*RUNTIME).iter(|| async {
            let req = http::Request::get("https://mltshp.com/api/sharedfile/GA4")
                .body(())
                .expect("request must be valid");

            let (mut parts, _) = req.into_parts();
            s.sign_request(&ctx, &mut parts, Some(&token), None)
                .await
                .expect("must success")
        })
    });

    group.finish()
}
