//! Quick-start examples for the Amara Rust client.
//!
//! Run with:
//!   AMARA_USERNAME=alice AMARA_API_KEY=0123... cargo run --example quickstart

use std::sync::Arc;

use amara::{
    pagination, ClientBuilder, LogLevel, Logger, NewTask, Query, SubtitleFormat, SubtitleUpload,
    TaskType,
};

struct StderrLogger;

impl Logger for StderrLogger {
    fn log(&self, level: LogLevel, message: &str) {
        eprintln!("[{level}] {message}");
    }
}

#[tokio::main]
async fn main() -> amara::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Create a client (reads AMARA_USERNAME / AMARA_API_KEY from environment)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new()
        .max_retries(3)
        .logger(Arc::new(StderrLogger))
        .build()?;

    // -----------------------------------------------------------------------
    // 2. Look up a video and its languages
    // -----------------------------------------------------------------------
    let video_id = "Yt9t2tn8mFs3";
    let video = client.get_video(video_id).await?.into_json();
    println!("Video: {}", video["title"]);

    for lang in client.list_languages(video_id).await? {
        println!(
            "  {} (complete: {})",
            lang["language_code"], lang["subtitles_complete"]
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // 3. Download subtitles as SRT (returned verbatim)
    // -----------------------------------------------------------------------
    let srt = client
        .get_subtitles(video_id, "en", SubtitleFormat::Srt, None)
        .await?;
    if let Some(text) = srt.as_text() {
        println!("{}", text.lines().take(8).collect::<Vec<_>>().join("\n"));
    }
    println!();

    // -----------------------------------------------------------------------
    // 4. Upload a translation
    // -----------------------------------------------------------------------
    let mut upload = SubtitleUpload::new(
        "1\n00:00:01,000 --> 00:00:03,000\nBonjour\n",
        SubtitleFormat::Srt,
    );
    upload.action = Some("save-draft".into());
    client.upload_subtitles(video_id, "fr", &upload).await?;

    // -----------------------------------------------------------------------
    // 5. Team tasks: create one, then list the first 20 open translate tasks
    // -----------------------------------------------------------------------
    let team = "acme";
    client
        .create_task(
            team,
            &NewTask {
                video_id: video_id.into(),
                language: "de".into(),
                task_type: TaskType::Translate,
                assignee: None,
                priority: Some(1),
            },
        )
        .await?;

    let mut first_twenty = pagination::take(20);
    let tasks = client
        .list_tasks(
            team,
            &Query::new()
                .param("type", TaskType::Translate.as_str())
                .param("open", "true")
                .param("order_by", "-created"),
            Some(&mut first_twenty),
        )
        .await?;
    for task in &tasks {
        println!("  task {} | {} | {}", task["id"], task["language"], task["assignee"]);
    }

    Ok(())
}
