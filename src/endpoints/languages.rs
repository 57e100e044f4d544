use std::path::Path;

use serde_json::{json, Value};

use crate::client::Client;
use crate::errors::Result;
use crate::models::{LanguageUpdate, NewLanguage, Payload, SubtitleFormat, SubtitleUpload};
use crate::query::Query;
use crate::routes::{ContentType, Resource, ResourceKind};
use crate::transport::Method;

fn subtitles(video_id: &str, language: &str) -> Resource {
    Resource::new(ResourceKind::Subtitles)
        .video(video_id)
        .language(language)
}

impl Client {
    /// Every language code the platform knows about.
    pub async fn supported_languages(&self) -> Result<Payload> {
        self.get(Resource::new(ResourceKind::SupportedLanguages), None)
            .await
    }

    pub async fn list_languages(&self, video_id: &str) -> Result<Vec<Value>> {
        self.list(Resource::new(ResourceKind::Languages).video(video_id), None, None)
            .await
    }

    pub async fn get_language(&self, video_id: &str, language: &str) -> Result<Payload> {
        self.get(
            Resource::new(ResourceKind::Language)
                .video(video_id)
                .language(language),
            None,
        )
        .await
    }

    pub async fn create_language(&self, video_id: &str, language: &NewLanguage) -> Result<Payload> {
        self.send_json(
            Method::Post,
            Resource::new(ResourceKind::Languages).video(video_id),
            language,
        )
        .await
    }

    pub async fn update_language(
        &self,
        video_id: &str,
        language: &str,
        update: &LanguageUpdate,
    ) -> Result<Payload> {
        self.send_json(
            Method::Put,
            Resource::new(ResourceKind::Language)
                .video(video_id)
                .language(language),
            update,
        )
        .await
    }

    /// Download subtitles rendered in `format`.
    ///
    /// Anything but [`SubtitleFormat::Json`] is returned as
    /// [`Payload::Text`], exactly as served. `version` selects an older
    /// revision; `None` means the latest.
    pub async fn get_subtitles(
        &self,
        video_id: &str,
        language: &str,
        format: SubtitleFormat,
        version: Option<u32>,
    ) -> Result<Payload> {
        let content = match format {
            SubtitleFormat::Json => ContentType::Json,
            _ => ContentType::Raw,
        };
        let query = Query::new()
            .param("sub_format", format.as_str())
            .opt("version_number", version);
        self.fetch(
            Method::Get,
            &subtitles(video_id, language).with_content(content),
            Some(&query),
            None,
            None,
        )
        .await
    }

    pub async fn upload_subtitles(
        &self,
        video_id: &str,
        language: &str,
        upload: &SubtitleUpload,
    ) -> Result<Payload> {
        self.send_json(Method::Post, subtitles(video_id, language), upload)
            .await
    }

    /// Read a subtitle file and upload it, guessing the format from its
    /// extension unless `format` is given.
    pub async fn upload_subtitles_file(
        &self,
        video_id: &str,
        language: &str,
        path: impl AsRef<Path>,
        format: Option<SubtitleFormat>,
    ) -> Result<Payload> {
        let path = path.as_ref();
        let format = format
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .and_then(SubtitleFormat::from_extension)
            })
            .unwrap_or(SubtitleFormat::Srt);

        let text = tokio::fs::read_to_string(path).await?;
        self.upload_subtitles(video_id, language, &SubtitleUpload::new(text, format))
            .await
    }

    pub async fn list_subtitle_actions(&self, video_id: &str, language: &str) -> Result<Payload> {
        self.get(
            Resource::new(ResourceKind::SubtitleActions)
                .video(video_id)
                .language(language),
            None,
        )
        .await
    }

    /// Run a workflow action such as `"publish"` or `"approve"`.
    pub async fn perform_subtitle_action(
        &self,
        video_id: &str,
        language: &str,
        action: &str,
    ) -> Result<Payload> {
        self.send_json(
            Method::Post,
            Resource::new(ResourceKind::SubtitleActions)
                .video(video_id)
                .language(language),
            &json!({ "action": action }),
        )
        .await
    }

    pub async fn list_subtitle_notes(&self, video_id: &str, language: &str) -> Result<Vec<Value>> {
        self.list(
            Resource::new(ResourceKind::SubtitleNotes)
                .video(video_id)
                .language(language),
            None,
            None,
        )
        .await
    }

    pub async fn add_subtitle_note(
        &self,
        video_id: &str,
        language: &str,
        body: &str,
    ) -> Result<Payload> {
        self.send_json(
            Method::Post,
            Resource::new(ResourceKind::SubtitleNotes)
                .video(video_id)
                .language(language),
            &json!({ "body": body }),
        )
        .await
    }
}
