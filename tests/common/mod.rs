#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use tokio::sync::oneshot;

use pawfect_care::domain::{RecordKind, RecordStore, SessionContext, StoredRecord, UserIdentity};
use pawfect_care::utils::errors::AppError;

pub const UID: &str = "uid-alice";

pub fn pet_doc(id: &str, name: &str, pet_type: &str, breed: &str, age: i32) -> StoredRecord {
    StoredRecord::new(id, doc! { "name": name, "type": pet_type, "breed": breed, "age": age })
}

pub fn owner_doc(id: &str, name: &str, phone: &str) -> StoredRecord {
    StoredRecord::new(id, doc! {
        "name": name,
        "phone": phone,
        "email": format!("{}@example.com", id),
        "address": "1 Main St",
    })
}

// ----------------------------- SESSION --------------------------------

pub struct FakeSession {
    current: Mutex<Option<UserIdentity>>,
    response: Mutex<Result<UserIdentity, AppError>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub sign_in_calls: AtomicUsize,
    pub sign_up_calls: AtomicUsize,
    pub last_email: Mutex<Option<String>>,
}

impl FakeSession {
    fn build(current: Option<UserIdentity>, response: Result<UserIdentity, AppError>) -> Self {
        FakeSession {
            current: Mutex::new(current),
            response: Mutex::new(response),
            gate: Mutex::new(None),
            sign_in_calls: AtomicUsize::new(0),
            sign_up_calls: AtomicUsize::new(0),
            last_email: Mutex::new(None),
        }
    }

    pub fn signed_in() -> Arc<Self> {
        let identity = UserIdentity::new(UID, "alice@example.com");
        Arc::new(Self::build(Some(identity.clone()), Ok(identity)))
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self::build(None, Ok(UserIdentity::new(UID, "alice@example.com"))))
    }

    pub fn rejecting(error: AppError) -> Arc<Self> {
        Arc::new(Self::build(None, Err(error)))
    }

    /// Requests block until the returned sender fires.
    pub fn gated() -> (Arc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let session = Self::build(None, Ok(UserIdentity::new(UID, "alice@example.com")));
        *session.gate.lock().unwrap() = Some(rx);
        (Arc::new(session), tx)
    }

    pub fn calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst) + self.sign_up_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, email: &str) -> Result<UserIdentity, AppError> {
        *self.last_email.lock().unwrap() = Some(email.to_string());

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let response = self.response.lock().unwrap().clone();
        if let Ok(identity) = &response {
            *self.current.lock().unwrap() = Some(identity.clone());
        }
        response
    }
}

#[async_trait]
impl SessionContext for FakeSession {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<UserIdentity, AppError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(email).await
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<UserIdentity, AppError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(email).await
    }

    fn current_user(&self) -> Option<UserIdentity> {
        self.current.lock().unwrap().clone()
    }

    fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
    }
}

// ----------------------------- STORE --------------------------------

struct Step {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<Vec<StoredRecord>, AppError>,
}

/// Answers `list_records` calls from a queue of scripted steps; an exhausted
/// queue answers with an empty list.
#[derive(Default)]
pub struct ScriptedRecordStore {
    steps: Mutex<VecDeque<Step>>,
    pub list_calls: Mutex<Vec<(String, RecordKind)>>,
    pub created: Mutex<Vec<(String, RecordKind, Document)>>,
    fail_creates: bool,
}

impl ScriptedRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_creates() -> Self {
        ScriptedRecordStore { fail_creates: true, ..Self::default() }
    }

    pub fn then_return(self, records: Vec<StoredRecord>) -> Self {
        self.steps.lock().unwrap().push_back(Step { gate: None, result: Ok(records) });
        self
    }

    pub fn then_fail(self, error: AppError) -> Self {
        self.steps.lock().unwrap().push_back(Step { gate: None, result: Err(error) });
        self
    }

    pub fn queue_return(&self, records: Vec<StoredRecord>) {
        self.steps.lock().unwrap().push_back(Step { gate: None, result: Ok(records) });
    }

    /// The next call returns `records` only once the returned sender fires.
    pub fn then_return_gated(&self, records: Vec<StoredRecord>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step { gate: Some(rx), result: Ok(records) });
        tx
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn listed_kinds(&self) -> Vec<RecordKind> {
        self.list_calls.lock().unwrap().iter().map(|(_, kind)| *kind).collect()
    }
}

#[async_trait]
impl RecordStore for ScriptedRecordStore {
    async fn list_records(&self, user_id: &str, kind: RecordKind) -> Result<Vec<StoredRecord>, AppError> {
        self.list_calls.lock().unwrap().push((user_id.to_string(), kind));

        let step = self.steps.lock().unwrap().pop_front();
        let Some(step) = step else {
            return Ok(Vec::new());
        };

        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.result
    }

    async fn create_record(&self, user_id: &str, kind: RecordKind, fields: Document) -> Result<String, AppError> {
        if self.fail_creates {
            return Err(AppError::Fetch("write rejected".to_string()));
        }
        let mut created = self.created.lock().unwrap();
        created.push((user_id.to_string(), kind, fields));
        Ok(format!("{}-{}", kind.collection_name(), created.len()))
    }
}

pub async fn let_tasks_run() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
