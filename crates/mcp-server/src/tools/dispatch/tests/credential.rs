use super::super::*;
use super::{args, minimal_args, with_token, without_token, TOKEN};
use crate::test_support::{CountingFactory, RecordingBackend};
use crate::tools::dispatch::service::shape_outcome;
use hostex_client::HostexError;
use hostex_protocol::FailureKind;
use serde_json::json;

#[tokio::test]
async fn every_tool_requires_a_credential() {
    let factory = CountingFactory::default();
    let created = factory.created();
    let dispatcher = without_token(factory);
    let names: Vec<&str> = dispatcher.catalog().names().collect();

    for name in names {
        let err = dispatcher
            .invoke(name, args(minimal_args(name)))
            .await
            .expect_err("no credential configured");
        assert!(matches!(err, ToolFailure::MissingCredential), "{name}: {err:?}");
    }
    assert_eq!(created.count(), 0);
}

#[tokio::test]
async fn argument_problems_are_reported_before_the_missing_credential() {
    let dispatcher = without_token(CountingFactory::default());

    let err = dispatcher
        .invoke("hostex_delete_webhook", args(json!({ "webhook_id": "five" })))
        .await
        .expect_err("invalid arguments");
    assert_eq!(err.kind(), FailureKind::InvalidArguments);

    let err = dispatcher
        .invoke("hostex_nope", None)
        .await
        .expect_err("unknown tool");
    assert_eq!(err.kind(), FailureKind::UnknownTool);
}

#[tokio::test]
async fn the_token_never_shows_up_in_error_output() {
    let factory = CountingFactory::with_backend(|| {
        RecordingBackend::default().on("list_room_types", |_| {
            Err(HostexError::Api {
                status: 401,
                code: Some(401),
                message: "Invalid access token".to_string(),
                request_id: None,
            })
        })
    });
    let dispatcher = with_token(factory);

    let outcome = dispatcher.invoke("hostex_list_room_types", None).await;
    let failure = outcome.as_ref().expect_err("backend failure");
    let envelope = serde_json::to_string(&failure.envelope("hostex_list_room_types"))
        .expect("envelope json");
    assert!(!envelope.contains(TOKEN));
    assert!(!format!("{failure:?}").contains(TOKEN));

    let result = shape_outcome("hostex_list_room_types", outcome).expect("tool result");
    let rendered = serde_json::to_string(&result).expect("result json");
    assert!(!rendered.contains(TOKEN));
    assert!(rendered.contains("Invalid access token"));
}
