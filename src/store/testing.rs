//! In-memory gateway fake for store tests.
//!
//! Implements real create/complete/edit/delete semantics over in-memory
//! collections so refresh-after-write behavior can be observed end to end,
//! with hooks for injecting failures, scripting list responses, and gating
//! response order to exercise refresh races.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::{Result, TaskwireError};
use crate::gateway::{Gateway, Operation};
use crate::models::{CreateProject, CreateTask, Project, Task};

pub struct FakeGateway {
    projects: Mutex<Vec<Project>>,
    tasks: Mutex<HashMap<i64, Vec<Task>>>,
    next_id: AtomicI64,
    fail_next: Mutex<HashMap<Operation, TaskwireError>>,
    calls: Mutex<Vec<Operation>>,
    list_task_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    scripted_task_lists: Mutex<VecDeque<Vec<Task>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            projects: Mutex::new(Vec::new()),
            tasks: Mutex::new(HashMap::new()),
            // Seeded fixtures use small ids; assigned ids start well above.
            next_id: AtomicI64::new(100),
            fail_next: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            list_task_gates: Mutex::new(VecDeque::new()),
            scripted_task_lists: Mutex::new(VecDeque::new()),
        }
    }

    pub fn seed_projects(&self, projects: Vec<Project>) {
        *self.projects.lock().unwrap() = projects;
    }

    pub fn seed_tasks(&self, project_id: i64, tasks: Vec<Task>) {
        self.tasks.lock().unwrap().insert(project_id, tasks);
    }

    /// Make the next call of `operation` fail with `error`. One-shot.
    pub fn fail_next(&self, operation: Operation, error: TaskwireError) {
        self.fail_next.lock().unwrap().insert(operation, error);
    }

    /// How many times `operation` has been invoked.
    pub fn calls(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|o| **o == operation)
            .count()
    }

    /// Yield until `operation` has been invoked at least `count` times.
    pub async fn until_calls(&self, operation: Operation, count: usize) {
        while self.calls(operation) < count {
            tokio::task::yield_now().await;
        }
    }

    /// Gate the next `list_tasks` call: it will not return until the
    /// returned sender fires. Gates apply in call order.
    pub fn gate_next_list_tasks(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_task_gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Script the next `list_tasks` response, consumed in call order and
    /// taking precedence over the live task map.
    pub fn script_task_list(&self, tasks: Vec<Task>) {
        self.scripted_task_lists.lock().unwrap().push_back(tasks);
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn begin(&self, operation: Operation) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        match self.fail_next.lock().unwrap().remove(&operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn wait_for_gate(&self) {
        let gate = self.list_task_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.begin(Operation::ListProjects)?;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, draft: &CreateProject) -> Result<Project> {
        self.begin(Operation::CreateProject)?;
        let project = Project {
            id: self.next_id(),
            title: draft.title.clone(),
            description: draft.description.clone(),
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>> {
        self.begin(Operation::ListTasks)?;
        // Claim the scripted response at call time so scripts pair with
        // calls in issuance order even when gates release out of order.
        let scripted = self.scripted_task_lists.lock().unwrap().pop_front();
        self.wait_for_gate().await;
        if let Some(scripted) = scripted {
            return Ok(scripted);
        }
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .get(&project_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_task(&self, project_id: i64, draft: &CreateTask) -> Result<Task> {
        self.begin(Operation::CreateTask)?;
        let task = Task {
            id: self.next_id(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            due_date: draft.due_date,
            completed: false,
        };
        self.tasks
            .lock()
            .unwrap()
            .entry(project_id)
            .or_default()
            .push(task.clone());
        Ok(task)
    }

    async fn complete_task(&self, project_id: i64, task_id: i64) -> Result<()> {
        self.begin(Operation::CompleteTask)?;
        let mut tasks = self.tasks.lock().unwrap();
        match tasks
            .get_mut(&project_id)
            .and_then(|ts| ts.iter_mut().find(|t| t.id == task_id))
        {
            // Idempotent: completing an already-completed task succeeds.
            Some(task) => {
                task.completed = true;
                Ok(())
            }
            None => Err(TaskwireError::Remote {
                operation: Operation::CompleteTask,
                status: 404,
            }),
        }
    }

    async fn edit_task(&self, project_id: i64, task: &Task) -> Result<Task> {
        self.begin(Operation::EditTask)?;
        let mut tasks = self.tasks.lock().unwrap();
        match tasks
            .get_mut(&project_id)
            .and_then(|ts| ts.iter_mut().find(|t| t.id == task.id))
        {
            Some(existing) => {
                existing.title = task.title.clone();
                existing.description = task.description.clone();
                existing.due_date = task.due_date;
                existing.completed = task.completed;
                Ok(existing.clone())
            }
            None => Err(TaskwireError::Remote {
                operation: Operation::EditTask,
                status: 404,
            }),
        }
    }

    async fn delete_task(&self, project_id: i64, task_id: i64) -> Result<()> {
        self.begin(Operation::DeleteTask)?;
        let mut tasks = self.tasks.lock().unwrap();
        let Some(list) = tasks.get_mut(&project_id) else {
            return Err(TaskwireError::Remote {
                operation: Operation::DeleteTask,
                status: 404,
            });
        };
        let before = list.len();
        list.retain(|t| t.id != task_id);
        if list.len() == before {
            return Err(TaskwireError::Remote {
                operation: Operation::DeleteTask,
                status: 404,
            });
        }
        Ok(())
    }
}

/// Build a task fixture with a given id and title.
pub fn task(id: i64, title: &str, completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: String::new(),
        due_date: None,
        completed,
    }
}

/// Build a project fixture with a given id and title.
pub fn project(id: i64, title: &str) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: "a project".to_string(),
    }
}
