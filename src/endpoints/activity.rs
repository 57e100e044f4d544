use serde_json::Value;

use crate::client::Client;
use crate::errors::Result;
use crate::models::{Message, Payload};
use crate::query::Query;
use crate::routes::{Resource, ResourceKind};
use crate::transport::Method;

impl Client {
    pub async fn get_user(&self, username: &str) -> Result<Payload> {
        self.get(Resource::new(ResourceKind::User).username(username), None)
            .await
    }

    /// Activity filters: `type`, `before`, `after` (timestamps).
    pub async fn user_activity(&self, username: &str, query: &Query) -> Result<Vec<Value>> {
        self.list(
            Resource::new(ResourceKind::UserActivity).username(username),
            Some(query),
            None,
        )
        .await
    }

    pub async fn team_activity(&self, slug: &str, query: &Query) -> Result<Vec<Value>> {
        self.list(
            Resource::new(ResourceKind::TeamActivity).team(slug),
            Some(query),
            None,
        )
        .await
    }

    pub async fn video_activity(&self, video_id: &str, query: &Query) -> Result<Vec<Value>> {
        self.list(
            Resource::new(ResourceKind::VideoActivity).video(video_id),
            Some(query),
            None,
        )
        .await
    }

    pub async fn send_message(&self, message: &Message) -> Result<Payload> {
        self.send_json(Method::Post, Resource::new(ResourceKind::Message), message)
            .await
    }
}
