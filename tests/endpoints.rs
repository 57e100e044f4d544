mod common;

use amara::{NewVideo, Query, SubtitleFormat};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client, page};

#[tokio::test]
async fn create_video_skips_unset_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/"))
        .and(body_json(json!({
            "video_url": "https://youtu.be/abc",
            "primary_audio_language_code": "en",
            "team": "acme",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "NEWID"})))
        .expect(1)
        .mount(&server)
        .await;

    let video = client(&server)
        .create_video(&NewVideo {
            video_url: "https://youtu.be/abc".into(),
            primary_audio_language_code: Some("en".into()),
            team: Some("acme".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(video.into_json()["id"], "NEWID");
}

#[tokio::test]
async fn make_url_primary_puts_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/videos/v1/urls/31/"))
        .and(body_json(json!({"primary": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"primary": true})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).make_video_url_primary("v1", "31").await.unwrap();
}

#[tokio::test]
async fn find_videos_by_url_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/"))
        .and(query_param("video_url", "https://youtu.be/abc?t=3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(json!([{"id": "v1"}]), 0, 1, None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let found = client(&server)
        .find_videos_by_url("https://youtu.be/abc?t=3")
        .await
        .unwrap();
    assert_eq!(found, vec![json!({"id": "v1"})]);
}

#[tokio::test]
async fn delete_tasks_removes_each_listed_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams/acme/tasks/"))
        .and(query_param("assignee", "bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 4}, {"id": 5}]),
            0,
            2,
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    for id in ["4", "5"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/teams/acme/tasks/{id}/")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let deleted = client(&server)
        .delete_tasks("acme", &Query::new().param("assignee", "bob"))
        .await
        .unwrap();
    assert_eq!(deleted, vec!["4".to_string(), "5".to_string()]);
}

#[tokio::test]
async fn upload_file_guesses_format_from_extension() {
    let dir = std::env::temp_dir().join(format!("amara-upload-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("captions.vtt");
    let text = "WEBVTT\n\n00:00.000 --> 00:01.000\nHi\n";
    std::fs::write(&file, text).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/v1/languages/en/subtitles/"))
        .and(body_json(json!({"subtitles": text, "sub_format": "vtt"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"version_number": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server)
        .upload_subtitles_file("v1", "en", &file, None)
        .await
        .unwrap();
    assert_eq!(resp.into_json()["version_number"], 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn json_subtitles_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/v1/languages/fr/subtitles/"))
        .and(query_param("sub_format", "json"))
        .and(query_param("version_number", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"start": 0, "end": 1000, "text": "Salut"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let subs = client(&server)
        .get_subtitles("v1", "fr", SubtitleFormat::Json, Some(3))
        .await
        .unwrap();
    assert_eq!(subs.into_records()[0]["text"], "Salut");
}
