use serde_json::Value;

use crate::client::{Client, PageFilter};
use crate::errors::Result;
use crate::models::{NewMember, NewTask, Payload, TaskUpdate};
use crate::query::Query;
use crate::routes::{Resource, ResourceKind};
use crate::transport::Method;

fn team(kind: ResourceKind, slug: &str) -> Resource {
    Resource::new(kind).team(slug)
}

impl Client {
    pub async fn list_teams(&self) -> Result<Vec<Value>> {
        self.list(Resource::new(ResourceKind::Teams), None, None).await
    }

    pub async fn get_team(&self, slug: &str) -> Result<Payload> {
        self.get(team(ResourceKind::Team, slug), None).await
    }

    pub async fn list_team_members(&self, slug: &str, query: &Query) -> Result<Vec<Value>> {
        self.list(team(ResourceKind::TeamMembers, slug), Some(query), None)
            .await
    }

    pub async fn add_team_member(&self, slug: &str, member: &NewMember) -> Result<Payload> {
        self.send_json(Method::Post, team(ResourceKind::TeamMembers, slug), member)
            .await
    }

    pub async fn remove_team_member(&self, slug: &str, username: &str) -> Result<Payload> {
        self.delete(team(ResourceKind::TeamMember, slug).username(username))
            .await
    }

    pub async fn list_projects(&self, slug: &str) -> Result<Vec<Value>> {
        self.list(team(ResourceKind::Projects, slug), None, None).await
    }

    pub async fn get_project(&self, slug: &str, project: &str) -> Result<Payload> {
        self.get(team(ResourceKind::Project, slug).project(project), None)
            .await
    }

    /// List team tasks. Useful filters: `type`, `assignee`, `video_id`,
    /// `language`, `open`, `completed`, `completed-after`, `completed-before`,
    /// `order_by`.
    pub async fn list_tasks(
        &self,
        slug: &str,
        query: &Query,
        filter: Option<&mut PageFilter<'_>>,
    ) -> Result<Vec<Value>> {
        self.list(team(ResourceKind::Tasks, slug), Some(query), filter)
            .await
    }

    pub async fn get_task(&self, slug: &str, task_id: &str) -> Result<Payload> {
        self.get(team(ResourceKind::Task, slug).task(task_id), None)
            .await
    }

    pub async fn create_task(&self, slug: &str, task: &NewTask) -> Result<Payload> {
        self.send_json(Method::Post, team(ResourceKind::Tasks, slug), task)
            .await
    }

    pub async fn update_task(
        &self,
        slug: &str,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<Payload> {
        self.send_json(Method::Put, team(ResourceKind::Task, slug).task(task_id), update)
            .await
    }

    pub async fn delete_task(&self, slug: &str, task_id: &str) -> Result<Payload> {
        self.delete(team(ResourceKind::Task, slug).task(task_id))
            .await
    }

    /// Delete every task matching `query`, one request per task.
    ///
    /// Returns the ids that were deleted. Stops at the first failure.
    pub async fn delete_tasks(&self, slug: &str, query: &Query) -> Result<Vec<String>> {
        let tasks = self.list_tasks(slug, query, None).await?;
        let mut deleted = Vec::with_capacity(tasks.len());
        for task in tasks {
            let Some(id) = record_id(&task) else {
                continue;
            };
            self.delete_task(slug, &id).await?;
            deleted.push(id);
        }
        Ok(deleted)
    }

    /// List subtitle requests (jobs). Useful filters: `status`, `video`,
    /// `language`, `assignee`, `sort`.
    pub async fn list_jobs(
        &self,
        slug: &str,
        query: &Query,
        filter: Option<&mut PageFilter<'_>>,
    ) -> Result<Vec<Value>> {
        self.list(team(ResourceKind::Jobs, slug), Some(query), filter)
            .await
    }

    pub async fn get_job(&self, slug: &str, job_id: &str) -> Result<Payload> {
        self.get(team(ResourceKind::Job, slug).job(job_id), None).await
    }

    pub async fn update_job(&self, slug: &str, job_id: &str, update: &Value) -> Result<Payload> {
        self.send_json(Method::Put, team(ResourceKind::Job, slug).job(job_id), update)
            .await
    }

    pub async fn list_applications(&self, slug: &str, query: &Query) -> Result<Vec<Value>> {
        self.list(team(ResourceKind::Applications, slug), Some(query), None)
            .await
    }

    pub async fn get_application(&self, slug: &str, application_id: &str) -> Result<Payload> {
        self.get(
            team(ResourceKind::Application, slug).application(application_id),
            None,
        )
        .await
    }

    /// Set an application's status, e.g. `"Approved"` or `"Denied"`.
    pub async fn update_application(
        &self,
        slug: &str,
        application_id: &str,
        status: &str,
    ) -> Result<Payload> {
        self.send_json(
            Method::Put,
            team(ResourceKind::Application, slug).application(application_id),
            &serde_json::json!({ "status": status }),
        )
        .await
    }
}

/// Task ids come back as numbers or strings depending on the endpoint.
fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
