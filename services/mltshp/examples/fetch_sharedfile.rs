//! Walk through the whole authorization flow against MLTSHP.
//!
//! ```shell
//! export MLTSHP_CLIENT_ID=... MLTSHP_CLIENT_SECRET=... MLTSHP_REDIRECT_URI=...
//! cargo run --example fetch_sharedfile
//! cargo run --example fetch_sharedfile -- <code> GA4
//! ```

use macsign_core::{Context, OsEnv, Result};
use macsign_http_send_reqwest::ReqwestHttpSend;
use macsign_mltshp::{Client, Config};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::new().from_env(&ctx);
    let client = Client::new(ctx, config);

    let mut args = std::env::args().skip(1);
    let Some(code) = args.next() else {
        println!("Grant access first: {}", client.authorize_url()?);
        println!("Then rerun with the code appended to the redirect uri.");
        return Ok(());
    };
    let sharekey = args.next().unwrap_or_else(|| "GA4".to_string());

    let token = client.exchange_token(&code).await?;
    println!("Exchanged code for {token:?}");

    let file: serde_json::Value = client
        .fetch_resource(&token, &format!("/api/sharedfile/{sharekey}"))
        .await?;
    println!("{file:#}");

    Ok(())
}
