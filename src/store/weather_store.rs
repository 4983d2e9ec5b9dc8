use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

use crate::models::WeatherRecord;

/// Store handle shared between the loader and the dashboard.
pub type SharedStore = Rc<RefCell<WeatherStore>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded {
        records: usize,
    },
    Failed(String),
}

impl LoadState {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Notification passed to subscribers after each store change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loading,
    Replaced { records: usize, generation: u64 },
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Owner of the full weather dataset.
///
/// The dataset is only ever swapped as a whole. Readers get a cheap
/// `Arc` clone of the current slice, so a replace never disturbs a reader
/// that is still holding the previous data. Listeners run synchronously in
/// registration order and must not call back into the store.
pub struct WeatherStore {
    records: Arc<[WeatherRecord]>,
    state: LoadState,
    generation: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            state: LoadState::Idle,
            generation: 0,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    pub fn shared() -> SharedStore {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn records(&self) -> Arc<[WeatherRecord]> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Incremented by every replace; lets consumers detect a new dataset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a complete dataset.
    pub fn replace(&mut self, records: Vec<WeatherRecord>) {
        let count = records.len();
        self.records = Arc::from(records);
        self.generation += 1;
        self.state = LoadState::Loaded { records: count };
        debug!(generation = self.generation, records = count, "Dataset replaced");

        self.notify(&StoreEvent::Replaced {
            records: count,
            generation: self.generation,
        });
    }

    pub fn mark_loading(&mut self) {
        self.state = LoadState::Loading;
        self.notify(&StoreEvent::Loading);
    }

    /// Record a load failure. The current dataset is kept.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.state = LoadState::Failed(message.clone());
        self.notify(&StoreEvent::Failed(message));
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, event: &StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new()
    }
}
