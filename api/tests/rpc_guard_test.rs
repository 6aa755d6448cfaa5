//! Guard adapters for unary and streaming RPC calls

mod common;

use futures_util::{stream, StreamExt};
use tonic::{
    metadata::{Ascii, MetadataValue},
    Code, GrpcMethod, Request, Status,
};

use common::TestHarness;
use tt_api::rpc::{guard_stream, guard_unary, guard_unary_for, method_path, AUTHORIZATION_KEY};

const CREATE_TASK: &str = "/tasktrack.v1.TaskService/CreateTask";
const SYNC_TASKS: &str = "/tasktrack.v1.TaskService/SyncTasks";

fn create_task_request(message: &'static str) -> Request<&'static str> {
    let mut request = Request::new(message);
    request
        .extensions_mut()
        .insert(GrpcMethod::new("tasktrack.v1.TaskService", "CreateTask"));
    request
}

fn with_bearer<T>(mut request: Request<T>, bearer: &str) -> Request<T> {
    let value: MetadataValue<Ascii> = bearer.parse().unwrap();
    request.metadata_mut().insert(AUTHORIZATION_KEY, value);
    request
}

#[test]
fn test_method_path_from_extension() {
    assert_eq!(method_path(&create_task_request("x")).as_deref(), Some(CREATE_TASK));
    assert_eq!(method_path(&Request::new(())), None);
}

#[tokio::test]
async fn test_unary_with_valid_token_carries_principal() {
    let harness = TestHarness::new(10, 10);
    let (principal, bearer) = harness.bearer();

    let authenticated = guard_unary(&harness.guard, with_bearer(create_task_request("payload"), &bearer))
        .await
        .unwrap();

    assert_eq!(authenticated.principal_id(), Some(principal.id));
    assert_eq!(authenticated.context().operation, CREATE_TASK);
    assert_eq!(authenticated.into_inner(), "payload");
}

#[tokio::test]
async fn test_unary_without_token_is_unauthenticated() {
    let harness = TestHarness::new(10, 10);

    let status = guard_unary(&harness.guard, create_task_request("payload"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), "Authentication required");
}

#[tokio::test]
async fn test_unary_expired_token_is_unauthenticated() {
    let harness = TestHarness::new(10, 10);
    let (_, bearer) = harness.bearer();
    harness.clock.advance_secs(common::TOKEN_TTL + 1);

    let status = guard_unary(&harness.guard, with_bearer(create_task_request("payload"), &bearer))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_unary_without_method_path_is_internal() {
    let harness = TestHarness::new(10, 10);
    let (_, bearer) = harness.bearer();

    let status = guard_unary(&harness.guard, with_bearer(Request::new(()), &bearer))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Internal);
}

#[tokio::test]
async fn test_unary_public_method_skips_verification() {
    let harness = TestHarness::new(10, 10);

    let authenticated = guard_unary_for(&harness.guard, "/tasktrack.v1.AuthService/Login", Request::new(()))
        .await
        .unwrap();
    assert_eq!(authenticated.principal_id(), None);
}

#[tokio::test]
async fn test_unary_limit_is_resource_exhausted() {
    let harness = TestHarness::new(1, 10);
    let (_, bearer) = harness.bearer();

    guard_unary(&harness.guard, with_bearer(create_task_request("one"), &bearer))
        .await
        .unwrap();
    let status = guard_unary(&harness.guard, with_bearer(create_task_request("two"), &bearer))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::ResourceExhausted);
    assert_eq!(status.metadata().get("retry-after").unwrap(), "60");
}

#[tokio::test]
async fn test_stream_messages_share_one_context() {
    let harness = TestHarness::new(10, 10);
    let (principal, bearer) = harness.bearer();
    let inbound = stream::iter(vec![Ok::<_, Status>(1), Ok(2), Ok(3)]);

    let guarded = guard_stream(&harness.guard, SYNC_TASKS, with_bearer(Request::new(inbound), &bearer))
        .await
        .unwrap();
    assert_eq!(guarded.context().operation, SYNC_TASKS);

    let messages: Vec<_> = guarded.collect().await;
    assert_eq!(messages.len(), 3);
    for (expected, message) in (1..=3).zip(messages) {
        let message = message.unwrap();
        assert_eq!(message.principal_id(), Some(principal.id));
        assert_eq!(*message.get_ref(), expected);
    }
}

#[tokio::test]
async fn test_stream_is_charged_once_per_call() {
    let harness = TestHarness::new(1, 10);
    let (_, bearer) = harness.bearer();
    let inbound = stream::iter((0..5).map(Ok::<_, Status>));

    let guarded = guard_stream(&harness.guard, SYNC_TASKS, with_bearer(Request::new(inbound), &bearer))
        .await
        .unwrap();
    assert_eq!(guarded.count().await, 5);

    let second = guard_stream(
        &harness.guard,
        SYNC_TASKS,
        with_bearer(Request::new(stream::iter(vec![Ok::<_, Status>(0)])), &bearer),
    )
    .await;
    assert_eq!(second.unwrap_err().code(), Code::ResourceExhausted);
}

#[tokio::test]
async fn test_stream_rejected_before_reading() {
    let harness = TestHarness::new(10, 10);
    let inbound = stream::iter(vec![Ok::<_, Status>(1)]);

    let status = guard_stream(&harness.guard, SYNC_TASKS, Request::new(inbound))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_stream_errors_pass_through() {
    let harness = TestHarness::new(10, 10);
    let (_, bearer) = harness.bearer();
    let inbound = stream::iter(vec![Ok(1), Err(Status::data_loss("truncated")), Ok(2)]);

    let mut guarded = guard_stream(&harness.guard, SYNC_TASKS, with_bearer(Request::new(inbound), &bearer))
        .await
        .unwrap();

    assert!(guarded.next().await.unwrap().is_ok());
    assert_eq!(guarded.next().await.unwrap().unwrap_err().code(), Code::DataLoss);
    assert!(guarded.next().await.unwrap().is_ok());
    assert!(guarded.next().await.is_none());
}
