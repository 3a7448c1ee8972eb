//! reqwest implementation of the gateway.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TaskwireError};
use crate::models::{CreateProject, CreateTask, Project, Task};
use crate::session::Session;

use super::{Gateway, Operation};

/// HTTP gateway over the tracker service.
///
/// A pure translation boundary: one request per call, bearer credential
/// forwarded from the session it was constructed with, and every failure
/// classified into the engine's error taxonomy. Timeout policy, if any,
/// belongs to the [`Client`] passed in via [`HttpGateway::with_client`].
pub struct HttpGateway {
    http: Client,
    base_url: String,
    session: Session,
}

/// Wire shape of task create/edit request bodies.
#[derive(Serialize)]
struct TaskBody<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(rename = "dueDate")]
    due_date: Option<NaiveDate>,
    completed: bool,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, session: Session) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with the bearer credential attached and classify the
    /// outcome: no response is a transport failure, a non-2xx status a remote
    /// failure. Body decoding is left to the caller.
    async fn send(&self, request: RequestBuilder, operation: Operation) -> Result<Response> {
        let response = request
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|e| TaskwireError::Transport {
                operation,
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(%operation, status = status.as_u16(), "gateway response");
        if !status.is_success() {
            return Err(TaskwireError::Remote {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode<T>(response: Response, operation: Operation) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        response.json().await.map_err(|e| TaskwireError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let operation = Operation::ListProjects;
        let request = self.http.get(self.url("/projects"));
        let response = self.send(request, operation).await?;
        Self::decode(response, operation).await
    }

    async fn create_project(&self, draft: &CreateProject) -> Result<Project> {
        let operation = Operation::CreateProject;
        let request = self.http.post(self.url("/projects")).json(draft);
        let response = self.send(request, operation).await?;
        Self::decode(response, operation).await
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>> {
        let operation = Operation::ListTasks;
        let request = self
            .http
            .get(self.url(&format!("/projects/{project_id}/tasks")));
        let response = self.send(request, operation).await?;
        Self::decode(response, operation).await
    }

    async fn create_task(&self, project_id: i64, draft: &CreateTask) -> Result<Task> {
        let operation = Operation::CreateTask;
        let body = TaskBody {
            title: &draft.title,
            description: &draft.description,
            due_date: draft.due_date,
            // Creation always starts incomplete, whatever the caller holds.
            completed: false,
        };
        let request = self
            .http
            .post(self.url(&format!("/projects/{project_id}/tasks")))
            .json(&body);
        let response = self.send(request, operation).await?;
        Self::decode(response, operation).await
    }

    async fn complete_task(&self, project_id: i64, task_id: i64) -> Result<()> {
        let operation = Operation::CompleteTask;
        let request = self
            .http
            .patch(self.url(&format!("/projects/{project_id}/tasks/{task_id}/complete")));
        self.send(request, operation).await?;
        Ok(())
    }

    async fn edit_task(&self, project_id: i64, task: &Task) -> Result<Task> {
        let operation = Operation::EditTask;
        let body = TaskBody {
            title: &task.title,
            description: &task.description,
            due_date: task.due_date,
            completed: task.completed,
        };
        let request = self
            .http
            .patch(self.url(&format!("/projects/{project_id}/tasks/{}", task.id)))
            .json(&body);
        let response = self.send(request, operation).await?;
        Self::decode(response, operation).await
    }

    async fn delete_task(&self, project_id: i64, task_id: i64) -> Result<()> {
        let operation = Operation::DeleteTask;
        let request = self
            .http
            .delete(self.url(&format!("/projects/{project_id}/tasks/{task_id}")));
        self.send(request, operation).await?;
        Ok(())
    }
}
