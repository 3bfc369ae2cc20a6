use macsign::mltshp::{DefaultCredentialProvider, RequestSigner};
use macsign::{default_context, Result, Signer};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Same as `default_signer()`, spelled out.
    let ctx = default_context();
    let signer = Signer::new(
        ctx.clone(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    );

    let mut req = http::Request::builder()
        .method(http::Method::GET)
        .uri("https://mltshp.com/api/user")
        .body(())?
        .into_parts()
        .0;

    // Reads MLTSHP_ACCESS_TOKEN and MLTSHP_SECRET.
    signer.sign(&mut req, None).await?;

    let signed_req = http::Request::from_parts(req, bytes::Bytes::new());
    let resp = ctx.http_send_as_string(signed_req).await?;
    println!("Response status: {}", resp.status());
    println!("{}", resp.body());

    Ok(())
}
