//! The live collection controller.
//!
//! Reacts to exactly three external triggers (a host-binding update, a
//! push-notification event, or a user interaction) and derives an
//! immutable render frame from current state on every one of them. No
//! derived state survives between triggers; consistency comes from
//! recomputing wholesale, never from patching.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, warn};

use ds_core::config::{normalize, ConfigError, HoldAction, PressAction, WidgetConfig};
use ds_core::gesture::{GestureOutcome, GestureTracker, HOLD_DURATION_MS};
use ds_core::library::{apply, project, BoxFacet};
use ds_core::ports::{EventSubscription, NewEntry, RenderFrame, StateChangedEvent};
use ds_core::privilege::PrivilegeState;
use ds_core::subscription::SubscriptionState;
use ds_core::ViewModel;

use crate::deps::WidgetDeps;
use crate::usecases::{
    AddEntry, AddEntryError, AssignBox, AssignBoxError, EnsureSubscription, ReleaseSubscription,
    RemoveEntry, RemoveRequest, ResolvePrivilege,
};

/// What happened to an add-entry submission. `Invalid` and `Failed` both
/// mean the dialog keeps its entered values; only `Added` closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddSubmission {
    Added,
    Invalid(String),
    Failed,
}

/// What happened to a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Cancelled,
    Failed,
}

/// What happened to a box assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned,
    Invalid(String),
    Failed,
}

#[derive(Default)]
struct Filters {
    query: String,
    facet: BoxFacet,
}

#[derive(Default)]
struct PrivilegeCell {
    state: PrivilegeState,
    caller_name: String,
}

#[derive(Default)]
struct GestureCell {
    tracker: GestureTracker,
    pressed: Option<ViewModel>,
}

/// One widget instance's controller.
///
/// Privilege is resolved lazily and exactly once for the instance's
/// lifetime; mutating controls are gated on the cached flag through the
/// frame's `show_add`/`show_delete`. All command failures are caught here
/// or in the use cases; nothing escapes to the host.
pub struct LibraryController {
    deps: WidgetDeps,

    config: StdMutex<WidgetConfig>,
    filters: StdMutex<Filters>,
    gesture: StdMutex<GestureCell>,

    // Held across the port calls so overlapping triggers cannot double
    // resolve or double subscribe.
    privilege: TokioMutex<PrivilegeCell>,
    subscription: TokioMutex<SubscriptionState>,

    resolve_privilege: ResolvePrivilege,
    ensure_subscription: EnsureSubscription,
    release_subscription: ReleaseSubscription,
    add: AddEntry,
    remove: RemoveEntry,
    assign: AssignBox,
}

impl LibraryController {
    /// Build a controller from a validated configuration. Use
    /// [`normalize`] first; a configuration missing its resource id must
    /// never reach this point.
    pub fn new(config: WidgetConfig, deps: WidgetDeps) -> Self {
        let resolve_privilege = ResolvePrivilege::new(deps.identity.clone());
        let ensure_subscription = EnsureSubscription::new(deps.events.clone());
        let release_subscription = ReleaseSubscription::new(deps.events.clone());
        let add = AddEntry::new(deps.commands.clone(), deps.interaction.clone());
        let remove = RemoveEntry::new(deps.commands.clone(), deps.interaction.clone());
        let assign = AssignBox::new(deps.commands.clone(), deps.interaction.clone());

        Self {
            deps,
            config: StdMutex::new(config),
            filters: StdMutex::new(Filters::default()),
            gesture: StdMutex::new(GestureCell::default()),
            privilege: TokioMutex::new(PrivilegeCell::default()),
            subscription: TokioMutex::new(SubscriptionState::Detached),
            resolve_privilege,
            ensure_subscription,
            release_subscription,
            add,
            remove,
            assign,
        }
    }

    /// Replace the configuration wholesale. The search state resets, the
    /// privilege cache and any live subscription survive (privilege is
    /// keyed to the caller, the subscription filters by subject at
    /// delivery time). Invalid input leaves the current configuration in
    /// place.
    pub async fn reconfigure(&self, partial: &Value) -> Result<(), ConfigError> {
        let config = normalize(partial)?;
        *self.config.lock().unwrap() = config;
        *self.filters.lock().unwrap() = Filters::default();
        self.render().await;
        Ok(())
    }

    /// The host binding changed: resolve privilege if still unknown, make
    /// sure the subscription exists, re-render.
    pub async fn on_host_update(self: &Arc<Self>) {
        self.resolve_privilege_once().await;
        self.ensure_subscribed().await;
        self.render().await;
    }

    /// Free-text query changed.
    pub async fn set_query(&self, query: impl Into<String>) {
        self.filters.lock().unwrap().query = query.into();
        self.render().await;
    }

    /// Box facet changed.
    pub async fn set_facet(&self, facet: BoxFacet) {
        self.filters.lock().unwrap().facet = facet;
        self.render().await;
    }

    /// Resolved privilege as of now; `Unknown` counts as unprivileged.
    pub async fn privileged(&self) -> bool {
        self.privilege.lock().await.state.allows()
    }

    /// Submit the add-entry dialog.
    pub async fn submit_add(&self, entry: &NewEntry) -> AddSubmission {
        match self.add.execute(entry).await {
            Ok(()) => {
                self.render().await;
                AddSubmission::Added
            }
            Err(AddEntryError::Validation(err)) => AddSubmission::Invalid(err.to_string()),
            Err(AddEntryError::Remote(_)) => AddSubmission::Failed,
        }
    }

    /// Ask to remove one entry. Never optimistic: on success the next
    /// push event carries the shrunken snapshot and drives the re-render.
    pub async fn request_remove(&self, model: &ViewModel) -> RemoveOutcome {
        match self.remove.execute(model).await {
            Ok(RemoveRequest::Confirmed) => RemoveOutcome::Removed,
            Ok(RemoveRequest::Cancelled) => RemoveOutcome::Cancelled,
            Err(_) => RemoveOutcome::Failed,
        }
    }

    /// Assign a storage-slot number to one entry.
    pub async fn assign_box(&self, model: &ViewModel, value: &str) -> AssignOutcome {
        match self.assign.execute(model, value).await {
            Ok(()) => AssignOutcome::Assigned,
            Err(AssignBoxError::Validation(err)) => AssignOutcome::Invalid(err.to_string()),
            Err(AssignBoxError::Remote(_)) => AssignOutcome::Failed,
        }
    }

    /// Pointer down on a tile: start a gesture cycle and arm the hold
    /// timer.
    pub fn on_press(self: &Arc<Self>, model: ViewModel) {
        let token = {
            let mut cell = self.gesture.lock().unwrap();
            cell.pressed = Some(model);
            cell.tracker.press()
        };

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(HOLD_DURATION_MS)).await;
            controller.on_hold_deadline(token).await;
        });
    }

    /// Pointer up: fires the short action unless the hold deadline beat
    /// it.
    pub async fn on_release(&self) {
        let (outcome, model) = {
            let mut cell = self.gesture.lock().unwrap();
            let outcome = cell.tracker.release();
            (outcome, cell.pressed.take())
        };

        if let (Some(GestureOutcome::Short), Some(model)) = (outcome, model) {
            self.dispatch_short(&model).await;
        }
    }

    /// Pointer left the tile before the cycle resolved: fire nothing.
    pub fn on_leave(&self) {
        let mut cell = self.gesture.lock().unwrap();
        cell.tracker.leave();
        cell.pressed = None;
    }

    /// Release the subscription handle. Idempotent, never throws.
    pub async fn teardown(&self) {
        let released = {
            let mut state = self.subscription.lock().await;
            let (next, released) = state.detach();
            *state = next;
            released
        };
        if let Some(id) = released {
            self.release_subscription.execute(id).await;
        }
    }

    /// Derive a frame from current state and hand it to the renderer.
    ///
    /// Cheap and idempotent; safe to trigger from overlapping sources.
    pub async fn render(&self) {
        let config = self.config.lock().unwrap().clone();
        let (query, facet) = {
            let filters = self.filters.lock().unwrap();
            (filters.query.clone(), filters.facet)
        };

        let records = match self.deps.host.collection(&config.resource_id).await {
            Ok(records) => records,
            Err(err) => {
                debug!(%err, resource_id = %config.resource_id, "host snapshot unavailable, rendering empty");
                Vec::new()
            }
        };

        let models = project(&records);
        let matched_models = apply(&models, &query, facet);
        let matched = matched_models.len();
        let entries = if config.layout.max_items > 0 {
            matched_models
                .into_iter()
                .take(config.layout.max_items)
                .collect()
        } else {
            matched_models
        };

        let (privileged, caller_name) = {
            let cell = self.privilege.lock().await;
            (cell.state.allows(), cell.caller_name.clone())
        };

        let frame = RenderFrame {
            heading: config.heading.clone(),
            caller_name,
            show_add: config.show_add.resolve(privileged),
            show_delete: config.show_delete.resolve(privileged),
            total: models.len(),
            matched,
            entries,
            fields: config.fields,
            layout: config.layout.clone(),
        };

        if let Err(err) = self.deps.renderer.render(frame).await {
            warn!(%err, "renderer failed");
        }
    }

    async fn resolve_privilege_once(&self) {
        let mut cell = self.privilege.lock().await;
        if cell.state.is_resolved() {
            return;
        }
        let resolved = self.resolve_privilege.execute(cell.state).await;
        cell.state = resolved.state;
        cell.caller_name = resolved.caller_name;
    }

    /// Transition Detached → Subscribed when possible; a held handle makes
    /// this a no-op. On success the event pump task is spawned; it ends
    /// when the stream closes.
    async fn ensure_subscribed(self: &Arc<Self>) {
        let mut state = self.subscription.lock().await;
        if state.is_subscribed() {
            return;
        }
        let Some(EventSubscription { id, mut events }) = self.ensure_subscription.execute().await
        else {
            // Stays Detached; a later trigger may attempt again.
            return;
        };
        if let Some(next) = state.attach(id) {
            *state = next;
        }
        drop(state);

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                controller.on_state_event(event).await;
            }
            debug!("change-event stream ended");
        });
    }

    /// One push notification. Events about other resources are discarded
    /// with no side effect; matching ones are the sole re-render trigger
    /// besides host-binding updates and user interaction.
    async fn on_state_event(&self, event: StateChangedEvent) {
        let relevant = self.config.lock().unwrap().resource_id == event.subject;
        if relevant {
            self.render().await;
        }
    }

    async fn on_hold_deadline(&self, token: u64) {
        let (outcome, model) = {
            let mut cell = self.gesture.lock().unwrap();
            let outcome = cell.tracker.hold_elapsed(token);
            (outcome, cell.pressed.clone())
        };

        if let (Some(GestureOutcome::Sustained), Some(model)) = (outcome, model) {
            self.dispatch_sustained(&model).await;
        }
    }

    async fn dispatch_short(&self, model: &ViewModel) {
        let action = self.config.lock().unwrap().press_action;
        match action {
            PressAction::OpenLink => {
                let Some(url) = model.external_url() else {
                    debug!(title = %model.display_title(), "no external link for entry");
                    return;
                };
                if let Err(err) = self.deps.links.open(&url).await {
                    warn!(%err, %url, "opening external link failed");
                }
            }
            PressAction::None => {}
        }
    }

    async fn dispatch_sustained(&self, model: &ViewModel) {
        let action = self.config.lock().unwrap().hold_action;
        match action {
            HoldAction::None => {}
            HoldAction::Delete => {
                let _ = self.request_remove(model).await;
            }
            HoldAction::AssignBox => {
                let message = format!("Box number for \"{}\"", model.display_title());
                match self.deps.interaction.prompt(&message).await {
                    Some(value) => {
                        let _ = self.assign_box(model, &value).await;
                    }
                    None => debug!("box assignment cancelled"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::{
        mock_commands, CountingIdentity, MockCommands, RecordingInteraction, RecordingLinks,
        RecordingRenderer, ScriptedStream, StaticHost,
    };
    use serde_json::json;

    struct Harness {
        controller: Arc<LibraryController>,
        host: Arc<StaticHost>,
        stream: Arc<ScriptedStream>,
        identity: Arc<CountingIdentity>,
        renderer: Arc<RecordingRenderer>,
        interaction: Arc<RecordingInteraction>,
        links: Arc<RecordingLinks>,
    }

    fn harness_with(
        partial: Value,
        records: Vec<Value>,
        commands: MockCommands,
        interaction: RecordingInteraction,
    ) -> Harness {
        let host = Arc::new(StaticHost::new(records));
        let stream = Arc::new(ScriptedStream::default());
        let identity = Arc::new(CountingIdentity::owner("Ada"));
        let renderer = Arc::new(RecordingRenderer::default());
        let interaction = Arc::new(interaction);
        let links = Arc::new(RecordingLinks::default());

        let config = normalize(&partial).unwrap();
        let deps = WidgetDeps {
            host: host.clone(),
            identity: identity.clone(),
            events: stream.clone(),
            commands: Arc::new(commands),
            interaction: interaction.clone(),
            links: links.clone(),
            renderer: renderer.clone(),
        };

        Harness {
            controller: Arc::new(LibraryController::new(config, deps)),
            host,
            stream,
            identity,
            renderer,
            interaction,
            links,
        }
    }

    fn harness(records: Vec<Value>) -> Harness {
        harness_with(
            json!({ "resource_id": "sensor.dvd_library" }),
            records,
            mock_commands(),
            RecordingInteraction::default(),
        )
    }

    fn two_records() -> Vec<Value> {
        vec![
            json!({ "title": "The Matrix", "year": "1999", "external_id": "tt0133093" }),
            json!({ "title": "Arrival", "year": "2016" }),
        ]
    }

    async fn settle() {
        // Let spawned pump/timer tasks run (paused clock auto-advances).
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_host_update_projects_filters_and_renders() {
        let h = harness(two_records());
        h.controller.on_host_update().await;

        let frame = h.renderer.last_frame().unwrap();
        assert_eq!(frame.heading, "DVD Library");
        assert_eq!(frame.total, 2);
        assert_eq!(frame.matched, 2);
        assert_eq!(frame.entries.len(), 2);
        assert_eq!(frame.entries[1].original_index, 1);
        // Owner caller resolves the auto-visibility controls on.
        assert!(frame.show_add);
        assert!(frame.show_delete);
        assert_eq!(frame.caller_name, "Ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_privilege_is_resolved_at_most_once() {
        let h = harness(two_records());
        for _ in 0..3 {
            h.controller.on_host_update().await;
        }
        assert_eq!(h.identity.calls(), 1);
        assert!(h.controller.privileged().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_matching_event_rerenders_foreign_event_is_discarded() {
        let h = harness(two_records());
        h.controller.on_host_update().await;
        assert_eq!(h.renderer.frame_count(), 1);
        assert_eq!(h.stream.live_subscriptions(), 1);

        h.stream.emit("sensor.somewhere_else").await;
        settle().await;
        assert_eq!(h.renderer.frame_count(), 1);

        h.host.set_records(vec![json!({ "title": "Alien" })]);
        h.stream.emit("sensor.dvd_library").await;
        settle().await;
        assert_eq!(h.renderer.frame_count(), 2);
        assert_eq!(h.renderer.last_frame().unwrap().total, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_subscribe_degrades_and_recovers_later() {
        let h = harness(two_records());
        h.stream.set_rejecting(true);
        h.controller.on_host_update().await;
        // Widget still renders from the host binding alone.
        assert_eq!(h.renderer.frame_count(), 1);
        assert_eq!(h.stream.live_subscriptions(), 0);

        h.stream.set_rejecting(false);
        h.controller.on_host_update().await;
        assert_eq!(h.stream.live_subscriptions(), 1);

        // A held handle makes further attempts no-ops.
        h.controller.on_host_update().await;
        assert_eq!(h.stream.live_subscriptions(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_releases_handle_idempotently() {
        let h = harness(two_records());
        h.controller.on_host_update().await;
        assert_eq!(h.stream.live_subscriptions(), 1);

        h.controller.teardown().await;
        h.controller.teardown().await;
        assert_eq!(h.stream.released().len(), 1);
        assert_eq!(h.stream.live_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_and_facet_narrow_the_frame() {
        let h = harness(vec![
            json!({ "title": "The Matrix", "box_number": 1 }),
            json!({ "title": "Arrival", "box_number": 2 }),
        ]);
        h.controller.on_host_update().await;

        h.controller.set_query("matrix").await;
        let frame = h.renderer.last_frame().unwrap();
        assert_eq!(frame.matched, 1);
        assert_eq!(frame.entries[0].title, "The Matrix");
        assert_eq!(frame.total, 2);

        h.controller.set_query("").await;
        h.controller.set_facet(BoxFacet::Box(2)).await;
        let frame = h.renderer.last_frame().unwrap();
        assert_eq!(frame.matched, 1);
        assert_eq!(frame.entries[0].title, "Arrival");
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_items_caps_entries_but_not_matched() {
        let h = harness_with(
            json!({ "resource_id": "sensor.dvd_library", "layout": { "max_items": 1 } }),
            two_records(),
            mock_commands(),
            RecordingInteraction::default(),
        );
        h.controller.on_host_update().await;

        let frame = h.renderer.last_frame().unwrap();
        assert_eq!(frame.matched, 2);
        assert_eq!(frame.entries.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_press_opens_external_link_only() {
        let mut commands = mock_commands();
        commands.expect_remove_entry().times(0);
        commands.expect_remove_at().times(0);
        let h = harness_with(
            json!({ "resource_id": "sensor.dvd_library", "hold_action": "delete" }),
            two_records(),
            commands,
            RecordingInteraction::default(),
        );
        h.controller.on_host_update().await;
        let model = h.renderer.last_frame().unwrap().entries[0].clone();

        h.controller.on_press(model);
        h.controller.on_release().await;
        settle().await;

        assert_eq!(
            h.links.opened(),
            vec!["https://www.imdb.com/title/tt0133093/".to_string()]
        );
        // The stale hold timer must not fire the delete flow afterwards.
        tokio::time::sleep(Duration::from_millis(HOLD_DURATION_MS * 2)).await;
        assert!(h.interaction.confirmations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_fires_configured_action_and_suppresses_release() {
        let mut commands = mock_commands();
        commands.expect_remove_entry().times(0);
        commands.expect_remove_at().times(0);
        let h = harness_with(
            json!({ "resource_id": "sensor.dvd_library", "hold_action": "delete" }),
            two_records(),
            commands,
            RecordingInteraction::declining(),
        );
        h.controller.on_host_update().await;
        let model = h.renderer.last_frame().unwrap().entries[0].clone();

        h.controller.on_press(model);
        tokio::time::sleep(Duration::from_millis(HOLD_DURATION_MS * 2)).await;

        // Sustained action fired once: the (declined) confirmation.
        assert_eq!(h.interaction.confirmations().len(), 1);

        h.controller.on_release().await;
        settle().await;
        assert!(h.links.opened().is_empty());
        assert_eq!(h.interaction.confirmations().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_cancels_the_gesture_cycle() {
        let h = harness_with(
            json!({ "resource_id": "sensor.dvd_library", "hold_action": "delete" }),
            two_records(),
            mock_commands(),
            RecordingInteraction::default(),
        );
        h.controller.on_host_update().await;
        let model = h.renderer.last_frame().unwrap().entries[0].clone();

        h.controller.on_press(model);
        h.controller.on_leave();
        tokio::time::sleep(Duration::from_millis(HOLD_DURATION_MS * 2)).await;
        h.controller.on_release().await;
        settle().await;

        assert!(h.links.opened().is_empty());
        assert!(h.interaction.confirmations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_assign_box_prompts_and_dispatches() {
        let mut commands = mock_commands();
        commands
            .expect_set_field()
            .withf(|key, field, value| {
                *key == ds_core::library::EntryKey::ExternalId("tt0133093".to_string())
                    && field == "box_number"
                    && value == "7"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let h = harness_with(
            json!({ "resource_id": "sensor.dvd_library", "hold_action": "assign_box" }),
            two_records(),
            commands,
            RecordingInteraction::with_prompt_answer("7"),
        );
        h.controller.on_host_update().await;
        let model = h.renderer.last_frame().unwrap().entries[0].clone();

        h.controller.on_press(model);
        tokio::time::sleep(Duration::from_millis(HOLD_DURATION_MS * 2)).await;

        assert_eq!(h.interaction.prompts().len(), 1);
        assert!(h.interaction.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_success_closes_dialog_and_rerenders() {
        let mut commands = mock_commands();
        commands.expect_add_entry().times(1).returning(|_| Ok(()));
        let h = harness_with(
            json!({ "resource_id": "sensor.dvd_library" }),
            two_records(),
            commands,
            RecordingInteraction::default(),
        );
        h.controller.on_host_update().await;
        let before = h.renderer.frame_count();

        let entry = NewEntry {
            title: "Dune".to_string(),
            ..NewEntry::default()
        };
        assert_eq!(h.controller.submit_add(&entry).await, AddSubmission::Added);
        assert_eq!(h.renderer.frame_count(), before + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_rejects_bad_input_and_keeps_going() {
        let h = harness(two_records());
        h.controller.on_host_update().await;

        let err = h.controller.reconfigure(&json!({})).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingResourceId));

        // The old configuration still drives rendering.
        h.controller.render().await;
        assert_eq!(h.renderer.last_frame().unwrap().total, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_resets_search_state() {
        let h = harness(two_records());
        h.controller.on_host_update().await;
        h.controller.set_query("matrix").await;
        assert_eq!(h.renderer.last_frame().unwrap().matched, 1);

        h.controller
            .reconfigure(&json!({ "resource_id": "sensor.dvd_library", "heading": "Shelf" }))
            .await
            .unwrap();
        let frame = h.renderer.last_frame().unwrap();
        assert_eq!(frame.heading, "Shelf");
        assert_eq!(frame.matched, 2);
    }
}
