use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::debug;

use ds_core::ids::{ResourceId, SubscriptionId};
use ds_core::library::EntryKey;
use ds_core::ports::{
    CommandError, EventStreamPort, EventSubscription, HostStateError, HostStatePort,
    IdentityError, IdentityPort, LibraryCommandPort, NewEntry, StateChangedEvent, SubscribeError,
};
use ds_core::privilege::CallerIdentity;

/// In-process hub serving one collection resource.
///
/// Plays every host-side role at once: the keyed state store, the
/// push-event stream, the identity endpoint, and the remote command
/// service. Mutations go through the command port and come back out as a
/// fresh snapshot plus a change event, exactly the loop a real host
/// closes over the network.
///
/// Failure-injection switches let tests exercise the degraded paths.
pub struct MemoryHub {
    resource: ResourceId,
    records: Mutex<Vec<Value>>,
    caller: Mutex<CallerIdentity>,
    subscribers: Mutex<Vec<(SubscriptionId, mpsc::Sender<StateChangedEvent>)>>,

    reject_subscriptions: AtomicBool,
    fail_commands: AtomicBool,
    fail_identity: AtomicBool,
}

impl MemoryHub {
    pub fn new(resource: ResourceId) -> Self {
        Self {
            resource,
            records: Mutex::new(Vec::new()),
            caller: Mutex::new(CallerIdentity::default()),
            subscribers: Mutex::new(Vec::new()),
            reject_subscriptions: AtomicBool::new(false),
            fail_commands: AtomicBool::new(false),
            fail_identity: AtomicBool::new(false),
        }
    }

    /// Replace the stored snapshot without emitting a change event, as an
    /// out-of-band provider update would.
    pub fn seed(&self, records: Vec<Value>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn set_caller(&self, caller: CallerIdentity) {
        *self.caller.lock().unwrap() = caller;
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    pub fn set_reject_subscriptions(&self, reject: bool) {
        self.reject_subscriptions.store(reject, Ordering::SeqCst);
    }

    pub fn set_fail_commands(&self, fail: bool) {
        self.fail_commands.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_identity(&self, fail: bool) {
        self.fail_identity.store(fail, Ordering::SeqCst);
    }

    /// Notify every subscriber that this hub's resource changed.
    pub async fn emit_change(&self) {
        self.emit_change_for(self.resource.clone()).await;
    }

    /// Notify every subscriber about an arbitrary subject, e.g. to model
    /// unrelated resources changing on a shared stream.
    pub async fn emit_change_for(&self, subject: ResourceId) {
        let subscribers: Vec<_> = self.subscribers.lock().unwrap().clone();
        for (id, sender) in subscribers {
            let event = StateChangedEvent {
                subject: subject.clone(),
                occurred_at: Utc::now(),
            };
            if sender.send(event).await.is_err() {
                debug!(%id, "subscriber gone, dropping");
                self.subscribers.lock().unwrap().retain(|(held, _)| *held != id);
            }
        }
    }

    fn check_commands(&self) -> Result<(), CommandError> {
        if self.fail_commands.load(Ordering::SeqCst) {
            Err(CommandError::Unavailable("hub is offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn position_of(records: &[Value], key: &EntryKey) -> Option<usize> {
        let by_field = |field: &str, wanted: &str| {
            records
                .iter()
                .position(|r| r.get(field).and_then(Value::as_str) == Some(wanted))
        };
        match key {
            EntryKey::ExternalId(id) => by_field("external_id", id),
            EntryKey::SecondaryCode(code) => by_field("secondary_code", code),
            EntryKey::Title(title) => by_field("title", title),
            EntryKey::Position(index) => (*index < records.len()).then_some(*index),
        }
    }
}

#[async_trait::async_trait]
impl HostStatePort for MemoryHub {
    async fn collection(&self, resource: &ResourceId) -> Result<Vec<Value>, HostStateError> {
        if *resource != self.resource {
            return Err(HostStateError::UnknownResource(resource.clone()));
        }
        Ok(self.records())
    }
}

#[async_trait::async_trait]
impl IdentityPort for MemoryHub {
    async fn current_caller(&self) -> Result<CallerIdentity, IdentityError> {
        if self.fail_identity.load(Ordering::SeqCst) {
            return Err(IdentityError::QueryFailed("hub is offline".to_string()));
        }
        Ok(self.caller.lock().unwrap().clone())
    }
}

#[async_trait::async_trait]
impl EventStreamPort for MemoryHub {
    async fn subscribe(&self, category: &str) -> Result<EventSubscription, SubscribeError> {
        if self.reject_subscriptions.load(Ordering::SeqCst) {
            return Err(SubscribeError::Rejected(format!(
                "subscriptions to {category} are disabled"
            )));
        }
        let (tx, rx) = mpsc::channel(16);
        let id = SubscriptionId::new();
        self.subscribers.lock().unwrap().push((id, tx));
        debug!(%id, category, "subscription created");
        Ok(EventSubscription { id, events: rx })
    }

    async fn unsubscribe(&self, id: &SubscriptionId) -> Result<(), SubscribeError> {
        // Unknown handles are fine; release must be idempotent.
        self.subscribers.lock().unwrap().retain(|(held, _)| held != id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl LibraryCommandPort for MemoryHub {
    async fn add_entry(&self, entry: &NewEntry) -> Result<(), CommandError> {
        self.check_commands()?;
        let mut record = json!({});
        for (field, value) in [
            ("external_id", &entry.external_id),
            ("title", &entry.title),
            ("year", &entry.year),
            ("secondary_code", &entry.secondary_code),
            ("added_by", &entry.added_by),
        ] {
            if !value.is_empty() {
                record[field] = json!(value);
            }
        }
        self.records.lock().unwrap().push(record);
        self.emit_change().await;
        Ok(())
    }

    async fn remove_entry(&self, key: &EntryKey) -> Result<(), CommandError> {
        self.check_commands()?;
        {
            let mut records = self.records.lock().unwrap();
            let Some(index) = Self::position_of(&records, key) else {
                return Err(CommandError::Rejected(format!("no entry matches {key:?}")));
            };
            records.remove(index);
        }
        self.emit_change().await;
        Ok(())
    }

    async fn remove_at(&self, index: usize) -> Result<(), CommandError> {
        self.check_commands()?;
        {
            let mut records = self.records.lock().unwrap();
            if index >= records.len() {
                return Err(CommandError::Rejected(format!(
                    "index {index} out of bounds"
                )));
            }
            records.remove(index);
        }
        self.emit_change().await;
        Ok(())
    }

    async fn set_field(
        &self,
        key: &EntryKey,
        field: &str,
        value: &str,
    ) -> Result<(), CommandError> {
        self.check_commands()?;
        {
            let mut records = self.records.lock().unwrap();
            let Some(index) = Self::position_of(&records, key) else {
                return Err(CommandError::Rejected(format!("no entry matches {key:?}")));
            };
            records[index][field] = json!(value);
        }
        self.emit_change().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::ports::CATEGORY_STATE_CHANGED;

    fn hub() -> MemoryHub {
        let hub = MemoryHub::new(ResourceId::from("sensor.dvd_library"));
        hub.seed(vec![
            json!({ "title": "The Matrix", "external_id": "tt0133093" }),
            json!({ "title": "Arrival" }),
        ]);
        hub
    }

    #[tokio::test]
    async fn test_collection_is_keyed_by_resource() {
        let hub = hub();
        let ok = hub
            .collection(&ResourceId::from("sensor.dvd_library"))
            .await
            .unwrap();
        assert_eq!(ok.len(), 2);

        let err = hub
            .collection(&ResourceId::from("sensor.other"))
            .await
            .unwrap_err();
        assert!(matches!(err, HostStateError::UnknownResource(_)));
    }

    #[tokio::test]
    async fn test_add_appends_and_emits() {
        let hub = hub();
        let mut sub = hub.subscribe(CATEGORY_STATE_CHANGED).await.unwrap();

        hub.add_entry(&NewEntry {
            title: "Dune".to_string(),
            year: "2021".to_string(),
            ..NewEntry::default()
        })
        .await
        .unwrap();

        assert_eq!(hub.records().len(), 3);
        assert_eq!(hub.records()[2]["title"], json!("Dune"));
        // Empty fields are omitted, not stored as "".
        assert!(hub.records()[2].get("external_id").is_none());

        let event = sub.events.recv().await.unwrap();
        assert_eq!(event.subject, ResourceId::from("sensor.dvd_library"));
    }

    #[tokio::test]
    async fn test_remove_by_identity_and_by_position_are_distinct() {
        let hub = hub();

        hub.remove_entry(&EntryKey::ExternalId("tt0133093".to_string()))
            .await
            .unwrap();
        assert_eq!(hub.records().len(), 1);

        // The remaining record has no external id; identity removal fails...
        let err = hub
            .remove_entry(&EntryKey::ExternalId("tt0133093".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Rejected(_)));

        // ...but positional removal succeeds.
        hub.remove_at(0).await.unwrap();
        assert!(hub.records().is_empty());

        let err = hub.remove_at(0).await.unwrap_err();
        assert!(matches!(err, CommandError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_set_field_updates_record() {
        let hub = hub();
        hub.set_field(&EntryKey::Title("Arrival".to_string()), "box_number", "4")
            .await
            .unwrap();
        assert_eq!(hub.records()[1]["box_number"], json!("4"));
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let hub = hub();
        let sub = hub.subscribe(CATEGORY_STATE_CHANGED).await.unwrap();
        assert_eq!(hub.live_subscriptions(), 1);

        hub.unsubscribe(&sub.id).await.unwrap();
        hub.unsubscribe(&sub.id).await.unwrap();
        assert_eq!(hub.live_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let hub = hub();

        hub.set_reject_subscriptions(true);
        assert!(hub.subscribe(CATEGORY_STATE_CHANGED).await.is_err());

        hub.set_fail_commands(true);
        let err = hub.remove_at(0).await.unwrap_err();
        assert!(matches!(err, CommandError::Unavailable(_)));
        assert_eq!(hub.records().len(), 2);

        hub.set_fail_identity(true);
        assert!(hub.current_caller().await.is_err());
    }
}
