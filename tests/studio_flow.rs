// SPDX-License-Identifier: MPL-2.0
//! End-to-end runs of the studio against a stubbed processing service.

use bytes::Bytes;
use sales_studio::service::{ServiceClient, ServiceSettings};
use sales_studio::studio::{
    NotificationSink, NotifyKind, Operation, RequestState, SourceFile, Studio,
};
use std::time::Duration;

#[derive(Debug, Default)]
struct RecordingSink {
    events: Vec<(NotifyKind, String, Option<String>)>,
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, kind: NotifyKind, title: &str, detail: Option<&str>) {
        self.events
            .push((kind, title.to_string(), detail.map(str::to_string)));
    }
}

fn client_for(url: &str) -> ServiceClient {
    ServiceClient::new(&ServiceSettings {
        base_url: url.to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("valid base URL")
}

async fn run(studio: &mut Studio, client: &ServiceClient, op: Operation, sink: &mut RecordingSink) {
    let request = studio.trigger(op).expect("request dispatched");
    assert_eq!(studio.request_state(), RequestState::InFlight(op));
    let outcome = client.submit(request).await;
    studio.settle(outcome, sink);
}

#[tokio::test]
async fn failed_blur_keeps_previous_result() {
    let mut server = mockito::Server::new_async().await;
    let remove = server
        .mock("POST", "/process-image")
        .with_status(200)
        .with_body("R1")
        .create_async()
        .await;
    let blur = server
        .mock("POST", "/process-image-blur")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut studio = Studio::new();
    let mut sink = RecordingSink::default();

    studio.select_file(Some(SourceFile::new("photo.png", Bytes::from_static(b"P"))));
    run(&mut studio, &client, Operation::RemoveBackground, &mut sink).await;

    assert_eq!(studio.result().expect("result").bytes().as_ref(), b"R1");
    assert_eq!(studio.download().expect("download").file_name(), "processed_image.jpg");

    run(&mut studio, &client, Operation::BlurBackground, &mut sink).await;

    remove.assert_async().await;
    blur.assert_async().await;
    assert_eq!(studio.result().expect("result").bytes().as_ref(), b"R1");
    assert_eq!(studio.request_state(), RequestState::Idle);
    assert_eq!(
        sink.events,
        vec![
            (
                NotifyKind::Success,
                "notification-remove-background-success".to_string(),
                None
            ),
            (
                NotifyKind::Failure,
                "notification-transform-error".to_string(),
                None
            ),
        ]
    );

    // Preview and result are the only live images.
    assert_eq!(studio.ledger().live_count(), 2);
    studio.teardown();
    assert_eq!(studio.ledger().live_count(), 0);
}

#[tokio::test]
async fn unreachable_service_reports_check_server_detail() {
    let client = client_for("http://127.0.0.1:9");
    let mut studio = Studio::new();
    let mut sink = RecordingSink::default();

    studio.select_file(Some(SourceFile::new("photo.png", Bytes::from_static(b"P"))));
    run(&mut studio, &client, Operation::RemoveBackground, &mut sink).await;

    assert!(studio.result().is_none());
    assert!(studio.can_trigger());
    assert_eq!(
        sink.events,
        vec![(
            NotifyKind::Failure,
            "notification-transform-error".to_string(),
            Some("notification-transform-error-check-server".to_string())
        )]
    );
}

#[tokio::test]
async fn successive_results_replace_each_other() {
    let mut server = mockito::Server::new_async().await;
    let _remove = server
        .mock("POST", "/process-image")
        .with_status(200)
        .with_body("R1")
        .create_async()
        .await;
    let _blur = server
        .mock("POST", "/process-image-blur")
        .with_status(200)
        .with_body("R2")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let mut studio = Studio::new();
    let mut sink = RecordingSink::default();

    studio.select_file(Some(SourceFile::new("photo.jpg", Bytes::from_static(b"P"))));
    run(&mut studio, &client, Operation::RemoveBackground, &mut sink).await;
    let first = studio.result().expect("first result").id();
    run(&mut studio, &client, Operation::BlurBackground, &mut sink).await;

    assert!(!studio.ledger().is_live(first));
    assert_eq!(studio.result().expect("second result").bytes().as_ref(), b"R2");
    assert_eq!(sink.events.len(), 2);
    assert!(sink.events.iter().all(|(kind, _, _)| *kind == NotifyKind::Success));
}
