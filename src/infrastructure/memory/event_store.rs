//! In-memory event registration store.
//!
//! Emulates SERIALIZABLE isolation with first-committer-wins version checks:
//! every event carries a version that is bumped whenever its registration set
//! changes, a transaction remembers the version of each event it read, and
//! commit fails with `AppError::WriteConflict` if any of them moved. The
//! one-active-registration rule is enforced on insert and again on commit,
//! like a unique index.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    Event, EventRegistration, EventRegistrationStore, EventWithRegistrations,
    NewEventRegistration, RegistrationStatus, RegistrationTransaction,
};
use crate::shared::error::AppError;

const UNIQUE_VIOLATION: &str =
    "duplicate key value violates unique constraint \"ux_event_registrations_active\"";

const SERIALIZATION_FAILURE: &str =
    "could not serialize access due to read/write dependencies among transactions";

#[derive(Debug, Default)]
struct StoreState {
    events: HashMap<i64, Event>,
    registrations: Vec<EventRegistration>,
    versions: HashMap<i64, u64>,
    next_registration_id: i64,
}

impl StoreState {
    fn version(&self, event_id: i64) -> u64 {
        self.versions.get(&event_id).copied().unwrap_or(0)
    }

    fn bump(&mut self, event_id: i64) {
        *self.versions.entry(event_id).or_insert(0) += 1;
    }

    fn next_id(&mut self) -> i64 {
        self.next_registration_id += 1;
        self.next_registration_id
    }

    fn has_active(&self, event_id: i64, customer_id: i64) -> bool {
        self.registrations.iter().any(|r| {
            r.event_id == event_id && r.customer_id == customer_id && r.status.is_active()
        })
    }

    fn registrations_for(&self, event_id: i64) -> Vec<EventRegistration> {
        let mut registrations: Vec<_> = self
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        sort_by_registration_time(&mut registrations);
        registrations
    }

    fn snapshot(&self, event_id: i64) -> Option<EventWithRegistrations> {
        let event = self.events.get(&event_id)?.clone();
        Some(EventWithRegistrations {
            event,
            registrations: self.registrations_for(event_id),
        })
    }
}

fn sort_by_registration_time(registrations: &mut [EventRegistration]) {
    registrations.sort_by(|a, b| {
        a.registered_at
            .cmp(&b.registered_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Thread-safe in-memory event registration store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an event.
    pub fn insert_event(&self, event: Event) {
        let mut state = self.state.lock();
        let id = event.id;
        state.events.insert(id, event);
        state.bump(id);
    }

    /// Every registration of an event, oldest first.
    pub fn registrations(&self, event_id: i64) -> Vec<EventRegistration> {
        self.state.lock().registrations_for(event_id)
    }
}

#[async_trait]
impl EventRegistrationStore for InMemoryEventStore {
    type Transaction = InMemoryRegistrationTransaction;

    async fn begin_serializable(&self) -> Result<Self::Transaction, AppError> {
        Ok(InMemoryRegistrationTransaction {
            state: Arc::clone(&self.state),
            read_versions: HashMap::new(),
            pending: Vec::new(),
        })
    }

    async fn find_event_with_registrations(
        &self,
        event_id: i64,
    ) -> Result<Option<EventWithRegistrations>, AppError> {
        Ok(self.state.lock().snapshot(event_id))
    }

    async fn find_registrations(
        &self,
        event_id: i64,
        customer_id: i64,
    ) -> Result<Vec<EventRegistration>, AppError> {
        let state = self.state.lock();
        Ok(state
            .registrations_for(event_id)
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect())
    }

    async fn update_registration_status(
        &self,
        registration_id: i64,
        status: RegistrationStatus,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock();

        let Some(index) = state
            .registrations
            .iter()
            .position(|r| r.id == registration_id)
        else {
            return Err(AppError::NotFound(format!(
                "Registration {} not found",
                registration_id
            )));
        };

        let (event_id, customer_id) = {
            let r = &state.registrations[index];
            (r.event_id, r.customer_id)
        };
        let reactivating = status.is_active() && !state.registrations[index].status.is_active();
        if reactivating && state.has_active(event_id, customer_id) {
            return Err(AppError::WriteConflict(UNIQUE_VIOLATION.into()));
        }

        state.registrations[index].status = status;
        state.bump(event_id);
        Ok(())
    }
}

/// An open transaction against [`InMemoryEventStore`].
///
/// Writes are buffered until commit. Dropping the transaction discards them.
#[derive(Debug)]
pub struct InMemoryRegistrationTransaction {
    state: Arc<Mutex<StoreState>>,
    read_versions: HashMap<i64, u64>,
    pending: Vec<EventRegistration>,
}

impl InMemoryRegistrationTransaction {
    fn pending_active(&self, event_id: i64, customer_id: i64) -> bool {
        self.pending.iter().any(|r| {
            r.event_id == event_id && r.customer_id == customer_id && r.status.is_active()
        })
    }
}

#[async_trait]
impl RegistrationTransaction for InMemoryRegistrationTransaction {
    async fn load_event_with_registrations(
        &mut self,
        event_id: i64,
    ) -> Result<Option<EventWithRegistrations>, AppError> {
        let mut snapshot = {
            let state = self.state.lock();
            let version = state.version(event_id);
            self.read_versions.entry(event_id).or_insert(version);
            state.snapshot(event_id)
        };

        // A transaction sees its own writes.
        if let Some(snapshot) = snapshot.as_mut() {
            snapshot.registrations.extend(
                self.pending
                    .iter()
                    .filter(|r| r.event_id == event_id)
                    .cloned(),
            );
            sort_by_registration_time(&mut snapshot.registrations);
        }

        Ok(snapshot)
    }

    async fn insert_registration(
        &mut self,
        registration: &NewEventRegistration,
    ) -> Result<EventRegistration, AppError> {
        if registration.status.is_active()
            && self.pending_active(registration.event_id, registration.customer_id)
        {
            return Err(AppError::WriteConflict(UNIQUE_VIOLATION.into()));
        }

        let id = {
            let mut state = self.state.lock();
            if !state.events.contains_key(&registration.event_id) {
                return Err(AppError::NotFound(format!(
                    "Event {} not found",
                    registration.event_id
                )));
            }
            if registration.status.is_active()
                && state.has_active(registration.event_id, registration.customer_id)
            {
                return Err(AppError::WriteConflict(UNIQUE_VIOLATION.into()));
            }
            state.next_id()
        };

        let created = EventRegistration {
            id,
            event_id: registration.event_id,
            customer_id: registration.customer_id,
            registered_at: registration.registered_at,
            status: registration.status,
            payment_status: registration.payment_status,
        };
        self.pending.push(created.clone());

        Ok(created)
    }

    async fn commit(self) -> Result<(), AppError> {
        let mut state = self.state.lock();

        for (event_id, read_version) in &self.read_versions {
            if state.version(*event_id) != *read_version {
                tracing::debug!(event_id, "Serialization failure on commit");
                return Err(AppError::WriteConflict(SERIALIZATION_FAILURE.into()));
            }
        }

        for registration in &self.pending {
            if registration.status.is_active()
                && state.has_active(registration.event_id, registration.customer_id)
            {
                return Err(AppError::WriteConflict(UNIQUE_VIOLATION.into()));
            }
        }

        for registration in self.pending {
            let event_id = registration.event_id;
            state.registrations.push(registration);
            state.bump(event_id);
        }

        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        Ok(())
    }
}
