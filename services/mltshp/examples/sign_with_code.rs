//! Sign requests with a token from an authorization code, falling back to env.
//!
//! With a code argument the code is exchanged once and the token signs every
//! request. Without one the token is read from `MLTSHP_ACCESS_TOKEN` and
//! `MLTSHP_SECRET`.
//!
//! ```shell
//! export MLTSHP_CLIENT_ID=... MLTSHP_CLIENT_SECRET=... MLTSHP_REDIRECT_URI=...
//! RUST_LOG=debug cargo run --example sign_with_code -- <code>
//! ```

use macsign_core::{Context, OsEnv, Result, Signer};
use macsign_http_send_reqwest::ReqwestHttpSend;
use macsign_mltshp::{
    AuthorizationCodeCredentialProvider, Config, DefaultCredentialProvider, RequestSigner,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let mut provider = DefaultCredentialProvider::new();
    if let Some(code) = std::env::args().nth(1) {
        let config = Config::new().from_env(&ctx);
        provider = provider.push_front(AuthorizationCodeCredentialProvider::new(config, code));
    }
    let signer = Signer::new(ctx.clone(), provider, RequestSigner::new());

    // The second request reuses the token, the code is never sent twice.
    for path in ["/api/user", "/api/sharedfile/GA4"] {
        let req = http::Request::get(format!("https://mltshp.com{path}")).body(())?;
        let (mut parts, _) = req.into_parts();
        signer.sign(&mut parts, None).await?;

        let resp = ctx
            .http_send_as_string(http::Request::from_parts(parts, bytes::Bytes::new()))
            .await?;
        println!("{path}: {} {}", resp.status(), resp.body());
    }

    Ok(())
}
