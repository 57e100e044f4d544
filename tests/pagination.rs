mod common;

use amara::{pagination, AmaraError, Method, Page, Payload, Query, Resource, ResourceKind};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{builder, client, page};

const TASKS: &str = "/api/teams/acme/tasks/";

async fn mount_three_pages(server: &MockServer) {
    let pages = [
        (0, json!([{"id": 1}, {"id": 2}]), Some("next-2")),
        (2, json!([{"id": 3}, {"id": 4}]), Some("next-4")),
        (4, json!([{"id": 5}, {"id": 6}]), None),
    ];
    for (offset, objects, next) in pages {
        Mock::given(method("GET"))
            .and(path(TASKS))
            .and(query_param("limit", "2"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(objects, offset, 6, next)))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn walks_every_page_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = builder(&server).page_size(2).build().unwrap();
    let records = client.list_tasks("acme", &Query::new(), None).await.unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn limit_in_query_overrides_page_size() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client(&server);
    let payload = client
        .fetch(
            Method::Get,
            &Resource::new(ResourceKind::Tasks).team("acme"),
            Some(&Query::new().limit(2)),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(payload.into_records().len(), 6);
}

#[tokio::test]
async fn total_count_ends_the_walk_even_with_a_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 1}, {"id": 2}]),
            0,
            2,
            Some("stale-cursor"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder(&server).page_size(2).build().unwrap();
    let records = client.list_tasks("acme", &Query::new(), None).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn filter_can_stop_after_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 1}, {"id": 2}]),
            0,
            6,
            Some("next-2"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 2, 6, None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = builder(&server).page_size(2).build().unwrap();
    let mut seen = 0;
    let mut stop = |mut p: Page| {
        seen += 1;
        p.finish();
        p
    };
    let records = client
        .list_tasks("acme", &Query::new(), Some(&mut stop))
        .await
        .unwrap();

    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
    assert_eq!(seen, 1);
}

#[tokio::test]
async fn take_filter_trims_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 1}, {"id": 2}]),
            0,
            6,
            Some("next-2"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 3}, {"id": 4}]),
            2,
            6,
            Some("next-4"),
        )))
        .mount(&server)
        .await;

    let client = builder(&server).page_size(2).build().unwrap();
    let mut take = pagination::take(3);
    let records = client
        .list_tasks("acme", &Query::new(), Some(&mut take))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["id"], 3);
}

#[tokio::test]
async fn scalar_objects_is_a_hard_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!(42), 0, 1, None)))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_tasks("acme", &Query::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AmaraError::MalformedPage(_)));
}

#[tokio::test]
async fn malformed_later_page_discards_earlier_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 1}, {"id": 2}]),
            0,
            4,
            Some("next-2"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(json!("oops"), 2, 4, None)),
        )
        .mount(&server)
        .await;

    let client = builder(&server).page_size(2).build().unwrap();
    let result = client.list_tasks("acme", &Query::new(), None).await;
    assert!(matches!(result, Err(AmaraError::MalformedPage(_))));
}

#[tokio::test]
async fn post_with_objects_is_not_paginated() {
    let server = MockServer::start().await;
    let body = page(json!([{"id": 1}]), 0, 10, Some("next"));
    Mock::given(method("POST"))
        .and(path("/api/teams/acme/tasks/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server)
        .fetch(
            Method::Post,
            &Resource::new(ResourceKind::Tasks).team("acme"),
            None,
            Some(&json!({"video_id": "v1"})),
            None,
        )
        .await
        .unwrap();
    assert_eq!(payload, Payload::Json(body));
}

#[tokio::test]
async fn single_object_get_is_returned_as_is() {
    let server = MockServer::start().await;
    let video = json!({"id": "Yt9t2tn8mFs3", "title": "Demo"});
    Mock::given(method("GET"))
        .and(path("/api/videos/Yt9t2tn8mFs3/"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video.clone()))
        .mount(&server)
        .await;

    let payload = client(&server).get_video("Yt9t2tn8mFs3").await.unwrap();
    assert_eq!(payload.into_json(), video);
}

#[tokio::test]
async fn offset_near_the_top_stops_instead_of_overflowing() {
    let server = MockServer::start().await;
    let start = u64::MAX - 1;
    Mock::given(method("GET"))
        .and(path(TASKS))
        .and(query_param("offset", start.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"offset": start, "next": "more"},
            "objects": [{"id": 1}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server)
        .list_tasks("acme", &Query::new().limit(2).offset(start), None)
        .await
        .unwrap();
    assert_eq!(records, vec![json!({"id": 1})]);
}
