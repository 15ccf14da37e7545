use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::record::{store::list_typed, Record, RecordKind, RecordStore};
use crate::domain::session::SessionContext;
use crate::screens::render::{screen_text, ListView, ToCard};

/// View model of a list screen for one record kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<R> {
    /// No signed-in user at activation; no fetch was issued.
    Unauthenticated,
    Loading,
    Error(String),
    /// Records exactly as the store returned them. Empty is not an error.
    Loaded(Vec<R>)
}

impl<R> ListState<R> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, ListState::Loading)
    }
}

impl<R: Record + ToCard> ListState<R> {
    pub fn render(&self) -> ListView {
        let text = screen_text(R::KIND);
        match self {
            ListState::Loading => ListView::Progress,
            ListState::Unauthenticated => ListView::Message(text.sign_in_required.to_string()),
            ListState::Error(message) => ListView::ErrorText(message.clone()),
            ListState::Loaded(records) if records.is_empty() => ListView::Message(text.empty.to_string()),
            ListState::Loaded(records) => ListView::Cards(records.iter().map(ToCard::to_card).collect()),
        }
    }
}

/// Fetch-then-render lifecycle of a list screen.
///
/// Every [`activate`](ListScreen::activate) starts a new activation: the
/// state goes back to `Loading` and exactly one fetch is issued for the
/// current user. A fetch belonging to an older activation is aborted, and
/// its result is dropped if it still completes, so it can never overwrite
/// fresher state. Failures are not retried.
pub struct ListScreen<R: Record> {
    session: Arc<dyn SessionContext>,
    store: Arc<dyn RecordStore>,
    state: Arc<watch::Sender<ListState<R>>>,
    activation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
    active: bool,
}

impl<R: Record> ListScreen<R> {

    pub fn new(session: Arc<dyn SessionContext>, store: Arc<dyn RecordStore>) -> Self {
        let (state, _) = watch::channel(ListState::Loading);
        ListScreen {
            session,
            store,
            state: Arc::new(state),
            activation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
            active: false,
        }
    }

    pub fn kind(&self) -> RecordKind {
        R::KIND
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<R>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ListState<R> {
        self.state.borrow().clone()
    }

    /// Token of the latest activation; 0 before the first one.
    pub fn activation(&self) -> u64 {
        self.activation.load(Ordering::SeqCst)
    }

    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self) -> u64 {
        self.abort_in_flight();
        self.active = true;

        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.activation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ListState::Loading;
        });

        let user = match self.session.current_user() {
            Some(user) => user,
            None => {
                log::warn!("{} screen activated without a signed-in user", R::KIND.collection_name());
                self.publish(token, ListState::Unauthenticated);
                return token;
            }
        };

        log::debug!("Activation {} of {} screen for user {}", token, R::KIND.collection_name(), user.uid);

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let activation = Arc::clone(&self.activation);

        self.in_flight = Some(tokio::spawn(async move {
            let next = match list_typed::<R>(store.as_ref(), &user.uid).await {
                Ok(records) => {
                    log::info!("Loaded {} {} for user {}", records.len(), R::KIND.collection_name(), user.uid);
                    ListState::Loaded(records)
                },
                Err(e) => {
                    log::error!("Failed to load {} for user {}: {}", R::KIND.collection_name(), user.uid, e);
                    ListState::Error(e.message_or(screen_text(R::KIND).load_failed))
                }
            };

            publish_if_current(&state, &activation, token, next);
        }));

        token
    }

    /// Tears the screen down: the in-flight fetch is cancelled and any late result ignored.
    pub fn deactivate(&mut self) {
        self.activation.fetch_add(1, Ordering::SeqCst);
        self.abort_in_flight();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Waits until the current activation leaves `Loading`; `None` when the
    /// screen is not active.
    pub async fn settled(&self) -> Option<ListState<R>> {
        if !self.active {
            return None;
        }

        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(ListState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        Some(settled)
    }

    pub fn view(&self) -> ListView
    where
        R: ToCard,
    {
        self.state.borrow().render()
    }

    fn publish(&self, token: u64, next: ListState<R>) {
        publish_if_current(&self.state, &self.activation, token, next);
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<R: Record> Drop for ListScreen<R> {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

fn publish_if_current<R>(
    state: &watch::Sender<ListState<R>>,
    activation: &AtomicU64,
    token: u64,
    next: ListState<R>
) {
    state.send_if_modified(|current| {
        if activation.load(Ordering::SeqCst) != token {
            log::debug!("Dropping result of superseded activation {}", token);
            return false;
        }
        *current = next;
        true
    });
}
