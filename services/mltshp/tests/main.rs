use std::env;
use std::str::FromStr;

use http::{Request, StatusCode};
use log::{debug, warn};
use macsign_core::{Context, Result, Signer};
use macsign_http_send_reqwest::ReqwestHttpSend;
use macsign_mltshp::{AccessToken, Client, Config, RequestSigner, StaticCredentialProvider};
use reqwest::Client as HttpClient;

fn init_token() -> Option<AccessToken> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("MACSIGN_MLTSHP_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let access_token =
        env::var("MACSIGN_MLTSHP_ACCESS_TOKEN").expect("env MACSIGN_MLTSHP_ACCESS_TOKEN must set");
    let secret = env::var("MACSIGN_MLTSHP_SECRET").expect("env MACSIGN_MLTSHP_SECRET must set");

    Some(AccessToken::new(access_token, secret))
}

#[tokio::test]
async fn test_get_user() -> Result<()> {
    let Some(token) = init_token() else {
        warn!("MACSIGN_MLTSHP_TEST is not set, skipped");
        return Ok(());
    };

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::from(token),
        RequestSigner::new(),
    );

    let mut req = Request::new("");
    *req.uri_mut() = http::Uri::from_str("https://mltshp.com/api/user")?;

    let req = {
        let (mut parts, body) = req.into_parts();
        signer
            .sign(&mut parts, None)
            .await
            .expect("sign request must success");
        Request::from_parts(parts, body)
    };
    debug!("signed request: {:?}", req);

    let resp = HttpClient::new()
        .execute(req.try_into().map_err(|e| {
            macsign_core::Error::unexpected("failed to convert request").with_source(e)
        })?)
        .await
        .map_err(|e| macsign_core::Error::transport("failed to execute request").with_source(e))?;

    let status = resp.status();
    debug!("got response: {:?}", resp);
    assert_eq!(StatusCode::OK, status);
    Ok(())
}

#[tokio::test]
async fn test_fetch_resource() -> Result<()> {
    let Some(token) = init_token() else {
        warn!("MACSIGN_MLTSHP_TEST is not set, skipped");
        return Ok(());
    };

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let client = Client::new(ctx, Config::new());

    let user: serde_json::Value = client.fetch_resource(&token, "/api/user").await?;
    debug!("got user: {user}");
    assert!(user.get("name").is_some());
    Ok(())
}

#[tokio::test]
async fn test_fetch_resource_with_wrong_secret() -> Result<()> {
    let Some(token) = init_token() else {
        warn!("MACSIGN_MLTSHP_TEST is not set, skipped");
        return Ok(());
    };
    let token = AccessToken::new(token.access_token, "not-the-secret");

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let client = Client::new(ctx, Config::new());

    let err = client
        .fetch_resource::<serde_json::Value>(&token, "/api/user")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), macsign_core::ErrorKind::RemoteRejected);
    Ok(())
}
