use anyhow::Result;
use bytes::Bytes;
use macsign_core::Context;
use macsign_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Token exchanges should not hang forever, bound them with a timeout.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("macsign-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // Unsigned requests are rejected by MLTSHP, which is enough to see the client working.
    let req = http::Request::builder()
        .method("GET")
        .uri("https://mltshp.com/api/user")
        .body(Bytes::new())?;

    match ctx.http_send_as_string(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("Response body: {}", resp.body());
        }
        Err(e) => eprintln!("Request failed: {e}"),
    }

    Ok(())
}
