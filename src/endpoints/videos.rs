use serde_json::{json, Value};

use crate::client::{Client, PageFilter};
use crate::errors::Result;
use crate::models::{NewVideo, NewVideoUrl, Payload, VideoUpdate};
use crate::query::Query;
use crate::routes::{Resource, ResourceKind};
use crate::transport::Method;

impl Client {
    /// List videos. Useful filters: `team`, `project`, `video_url`, `order_by`.
    pub async fn list_videos(
        &self,
        query: &Query,
        filter: Option<&mut PageFilter<'_>>,
    ) -> Result<Vec<Value>> {
        self.list(Resource::new(ResourceKind::Videos), Some(query), filter)
            .await
    }

    pub async fn get_video(&self, video_id: &str) -> Result<Payload> {
        self.get(Resource::new(ResourceKind::Video).video(video_id), None)
            .await
    }

    /// Look up the videos registered for a media URL.
    pub async fn find_videos_by_url(&self, video_url: &str) -> Result<Vec<Value>> {
        let query = Query::new().param("video_url", video_url);
        self.list(Resource::new(ResourceKind::Videos), Some(&query), None)
            .await
    }

    pub async fn create_video(&self, video: &NewVideo) -> Result<Payload> {
        self.send_json(Method::Post, Resource::new(ResourceKind::Videos), video)
            .await
    }

    pub async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> Result<Payload> {
        self.send_json(
            Method::Put,
            Resource::new(ResourceKind::Video).video(video_id),
            update,
        )
        .await
    }

    pub async fn delete_video(&self, video_id: &str) -> Result<Payload> {
        self.delete(Resource::new(ResourceKind::Video).video(video_id))
            .await
    }

    pub async fn list_video_urls(&self, video_id: &str) -> Result<Vec<Value>> {
        self.list(Resource::new(ResourceKind::VideoUrls).video(video_id), None, None)
            .await
    }

    pub async fn add_video_url(&self, video_id: &str, url: &NewVideoUrl) -> Result<Payload> {
        self.send_json(
            Method::Post,
            Resource::new(ResourceKind::VideoUrls).video(video_id),
            url,
        )
        .await
    }

    pub async fn make_video_url_primary(&self, video_id: &str, url_id: &str) -> Result<Payload> {
        self.send_json(
            Method::Put,
            Resource::new(ResourceKind::VideoUrl).video(video_id).url_id(url_id),
            &json!({ "primary": true }),
        )
        .await
    }

    pub async fn delete_video_url(&self, video_id: &str, url_id: &str) -> Result<Payload> {
        self.delete(Resource::new(ResourceKind::VideoUrl).video(video_id).url_id(url_id))
            .await
    }
}
