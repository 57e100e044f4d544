//! Per-resource convenience methods. Each one shapes parameters and calls
//! [`Client::fetch`].

mod activity;
mod languages;
mod teams;
mod videos;

use serde::Serialize;
use serde_json::Value;

use crate::client::{Client, PageFilter};
use crate::errors::Result;
use crate::models::Payload;
use crate::query::Query;
use crate::routes::Resource;
use crate::transport::Method;

impl Client {
    pub(crate) async fn get(&self, resource: Resource, query: Option<&Query>) -> Result<Payload> {
        self.fetch(Method::Get, &resource, query, None, None).await
    }

    /// GET a list and return every record.
    pub(crate) async fn list(
        &self,
        resource: Resource,
        query: Option<&Query>,
        filter: Option<&mut PageFilter<'_>>,
    ) -> Result<Vec<Value>> {
        Ok(self
            .fetch(Method::Get, &resource, query, None, filter)
            .await?
            .into_records())
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        resource: Resource,
        body: &B,
    ) -> Result<Payload> {
        let body = serde_json::to_value(body)?;
        self.fetch(method, &resource, None, Some(&body), None).await
    }

    pub(crate) async fn delete(&self, resource: Resource) -> Result<Payload> {
        self.fetch(Method::Delete, &resource, None, None, None).await
    }
}
