// Dashboard service - Owns the dashboard state and runs admin commands
use crate::application::clock::Clock;
use crate::application::overlay_store::{LocalOverlay, OverlayStore};
use crate::application::reconciler::reconcile;
use crate::application::remote_store::{RemoteDocument, RemoteStore};
use crate::application::renderer::Renderer;
use crate::application::rotation_scheduler::RotationScheduler;
use crate::domain::announcement::{AnnouncementDraft, AnnouncementRecord};
use crate::domain::class::{ClassDraft, ClassRecord};
use crate::domain::dashboard::DashboardState;
use crate::domain::error::DashboardError;
use crate::domain::record_id::unique_timestamp_id;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Loaded {
    /// Set once the remote store has returned a document
    has_baseline: bool,
    state: DashboardState,
}

#[derive(Clone)]
pub struct DashboardService {
    loaded: Arc<Mutex<Loaded>>,
    remote: Arc<dyn RemoteStore>,
    overlay: Arc<dyn OverlayStore>,
    clock: Arc<dyn Clock>,
    renderer: Arc<dyn Renderer>,
    announcement_rotation: Arc<RotationScheduler>,
    media_rotation: Arc<RotationScheduler>,
}

impl DashboardService {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        overlay: Arc<dyn OverlayStore>,
        clock: Arc<dyn Clock>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            loaded: Arc::new(Mutex::new(Loaded::default())),
            remote,
            overlay,
            clock,
            renderer,
            announcement_rotation: Arc::new(RotationScheduler::new("announcements")),
            media_rotation: Arc::new(RotationScheduler::new("media")),
        }
    }

    /// Full reload: fetch the baseline, rebuild state, render, restart rotations.
    ///
    /// A failed fetch leaves the current state, view and rotations untouched.
    /// Until a baseline has loaded once, the state is built from the local
    /// overlay alone.
    pub async fn reload(&self) {
        let fetched = self.remote.load().await;

        let mut loaded = self.loaded.lock().await;
        let baseline = match fetched {
            Ok(document) => {
                tracing::debug!(
                    "Fetched baseline: {} media, {} classes, {} announcements",
                    document.media.len(),
                    document.classes.len(),
                    document.announcements.len()
                );
                loaded.has_baseline = true;
                document
            }
            Err(e) if loaded.has_baseline => {
                tracing::warn!("Remote load failed, keeping current dashboard: {}", e);
                return;
            }
            Err(e) => {
                tracing::warn!("Remote load failed, starting from local overlay: {}", e);
                RemoteDocument::default()
            }
        };

        let overlay = self.overlay.load().await;
        if overlay.is_empty() {
            tracing::debug!("Local overlay is empty");
        }
        loaded.state = reconcile(&baseline, &overlay, self.clock.now());
        tracing::info!(
            "Dashboard reconciled: {} classes, {} announcements",
            loaded.state.classes.len(),
            loaded.state.announcements.len()
        );

        self.renderer.render_all(&loaded.state);
        self.restart_rotations(&loaded.state);
    }

    /// Re-run `reload` on a fixed period. The first run happens after one period.
    pub fn spawn_refresh(&self, period: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                service.reload().await;
            }
        })
    }

    pub async fn state(&self) -> DashboardState {
        self.loaded.lock().await.state.clone()
    }

    pub fn active_announcement(&self) -> Option<usize> {
        self.announcement_rotation.active()
    }

    pub fn active_media(&self) -> Option<usize> {
        self.media_rotation.active()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub async fn add_class(&self, draft: ClassDraft) -> Result<ClassRecord, DashboardError> {
        let draft = draft.trimmed();
        if draft.name.is_empty() {
            return Err(DashboardError::validation("Enter class name"));
        }

        let mut loaded = self.loaded.lock().await;
        let id = unique_timestamp_id(&loaded.state.classes, self.clock.now().timestamp_millis());
        let record = draft.into_record(id);
        loaded.state.classes.push(record.clone());

        self.classes_changed(&loaded.state).await;
        Ok(record)
    }

    pub async fn update_class(&self, id: &str, draft: ClassDraft) -> Result<ClassRecord, DashboardError> {
        let draft = draft.trimmed();
        if draft.name.is_empty() {
            return Err(DashboardError::validation("Enter class name"));
        }

        let mut loaded = self.loaded.lock().await;
        let class = loaded
            .state
            .class_mut(id)
            .ok_or_else(|| DashboardError::not_found("class", id))?;
        if class.from_schedule {
            return Err(DashboardError::permission(
                "Scheduled classes can only be cancelled or restored; edit the weekly schedule instead.",
            ));
        }
        draft.apply_to(class);
        let record = class.clone();

        self.classes_changed(&loaded.state).await;
        Ok(record)
    }

    pub async fn remove_class(&self, id: &str) -> Result<(), DashboardError> {
        let mut loaded = self.loaded.lock().await;
        let class = loaded
            .state
            .classes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DashboardError::not_found("class", id))?;
        if class.from_schedule {
            return Err(DashboardError::permission(
                "Cannot delete a scheduled class; cancel it or edit the weekly schedule instead.",
            ));
        }
        loaded.state.classes.retain(|c| c.id != id);

        self.classes_changed(&loaded.state).await;
        Ok(())
    }

    /// Flip the cancelled flag. Allowed for scheduled classes too.
    pub async fn toggle_class_cancellation(&self, id: &str) -> Result<ClassRecord, DashboardError> {
        let mut loaded = self.loaded.lock().await;
        let class = loaded
            .state
            .class_mut(id)
            .ok_or_else(|| DashboardError::not_found("class", id))?;
        class.cancelled = !class.cancelled;
        let record = class.clone();

        self.classes_changed(&loaded.state).await;
        Ok(record)
    }

    pub async fn add_announcement(&self, draft: AnnouncementDraft) -> Result<AnnouncementRecord, DashboardError> {
        let draft = draft.trimmed();
        if draft.title.is_empty() || draft.message.is_empty() {
            return Err(DashboardError::validation("Title and message required"));
        }

        let mut loaded = self.loaded.lock().await;
        let id = unique_timestamp_id(&loaded.state.announcements, self.clock.now().timestamp_millis());
        let record = draft.into_record(id);
        loaded.state.announcements.push(record.clone());

        self.announcements_changed(&loaded.state).await;
        Ok(record)
    }

    pub async fn remove_announcement(&self, id: &str) -> Result<(), DashboardError> {
        let mut loaded = self.loaded.lock().await;
        let announcement = loaded
            .state
            .announcements
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| DashboardError::not_found("announcement", id))?;
        if announcement.permanent {
            return Err(DashboardError::permission(
                "Cannot delete permanent announcement from admin (edit the remote document instead).",
            ));
        }
        loaded.state.announcements.retain(|a| a.id != id);

        self.announcements_changed(&loaded.state).await;
        Ok(())
    }

    async fn classes_changed(&self, state: &DashboardState) {
        self.persist_local(state).await;
        self.renderer.render_classes(&state.classes);
        self.push_remote(state);
    }

    async fn announcements_changed(&self, state: &DashboardState) {
        self.persist_local(state).await;
        self.renderer.render_announcements(&state.announcements);
        self.announcement_rotation
            .start(state.announcements.len(), state.settings.announcement_rotation_seconds);
        self.push_remote(state);
    }

    fn restart_rotations(&self, state: &DashboardState) {
        self.announcement_rotation
            .start(state.announcements.len(), state.settings.announcement_rotation_seconds);
        self.media_rotation
            .start(state.media.len(), state.settings.media_rotation_seconds);
        tracing::debug!(
            "Rotations restarted (announcement timer: {}, media timer: {})",
            self.announcement_rotation.has_timer(),
            self.media_rotation.has_timer()
        );
    }

    async fn persist_local(&self, state: &DashboardState) {
        if let Err(e) = self.overlay.save(&LocalOverlay::from_state(state)).await {
            tracing::warn!("Failed to save local overlay: {}", e);
        }
    }

    /// Fire-and-forget: the admin already sees the change locally.
    fn push_remote(&self, state: &DashboardState) {
        let remote = Arc::clone(&self.remote);
        let document = RemoteDocument::from_state(state);
        tokio::spawn(async move {
            match remote.save(&document).await {
                Ok(()) => tracing::info!("Remote document updated"),
                Err(e) => tracing::error!("Error saving remote document: {}", e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::announcement::Severity;
    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct FakeRemote {
        document: StdMutex<Option<RemoteDocument>>,
        saves: StdMutex<Vec<RemoteDocument>>,
    }

    impl FakeRemote {
        fn serving(document: RemoteDocument) -> Self {
            Self {
                document: StdMutex::new(Some(document)),
                saves: StdMutex::new(Vec::new()),
            }
        }

        fn go_offline(&self) {
            *self.document.lock().unwrap() = None;
        }
    }

    #[async_trait]
    impl RemoteStore for FakeRemote {
        async fn load(&self) -> Result<RemoteDocument, DashboardError> {
            self.document
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| DashboardError::Network("connection refused".to_string()))
        }

        async fn save(&self, document: &RemoteDocument) -> Result<(), DashboardError> {
            self.saves.lock().unwrap().push(document.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryOverlay {
        overlay: StdMutex<LocalOverlay>,
    }

    #[async_trait]
    impl OverlayStore for MemoryOverlay {
        async fn load(&self) -> LocalOverlay {
            self.overlay.lock().unwrap().clone()
        }

        async fn save(&self, overlay: &LocalOverlay) -> Result<(), DashboardError> {
            *self.overlay.lock().unwrap() = overlay.clone();
            Ok(())
        }
    }

    struct TestClock {
        now: StdMutex<DateTime<FixedOffset>>,
    }

    impl TestClock {
        fn at(now: DateTime<FixedOffset>) -> Self {
            Self {
                now: StdMutex::new(now),
            }
        }

        fn set(&self, now: DateTime<FixedOffset>) {
            *self.now.lock().unwrap() = now;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<FixedOffset> {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        full: StdMutex<usize>,
        classes: StdMutex<usize>,
        announcements: StdMutex<usize>,
    }

    impl Renderer for CountingRenderer {
        fn render_all(&self, _state: &DashboardState) {
            *self.full.lock().unwrap() += 1;
        }

        fn render_classes(&self, _classes: &[ClassRecord]) {
            *self.classes.lock().unwrap() += 1;
        }

        fn render_announcements(&self, _announcements: &[AnnouncementRecord]) {
            *self.announcements.lock().unwrap() += 1;
        }
    }

    struct Harness {
        service: DashboardService,
        remote: Arc<FakeRemote>,
        overlay: Arc<MemoryOverlay>,
        renderer: Arc<CountingRenderer>,
        clock: Arc<TestClock>,
    }

    fn monday() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
            .unwrap()
    }

    fn baseline() -> RemoteDocument {
        serde_json::from_value(serde_json::json!({
            "settings": {"gymName": "Field House"},
            "media": [{"type": "image", "src": "a.jpg"}, {"type": "video", "src": "b.mp4"}],
            "weekly_schedule": {
                "Monday": [{"event": "Yoga", "time": "9am"}],
                "Tuesday": [{"event": "Pilates", "time": "8am"}, {"event": "Swim", "time": "noon"}]
            },
            "classes": [{"id": "500", "name": "Bootcamp"}],
            "announcements": [{"id": "welcome", "title": "Welcome", "message": "Hi", "permanent": true}]
        }))
        .unwrap()
    }

    fn harness(remote: FakeRemote, overlay: LocalOverlay) -> Harness {
        let remote = Arc::new(remote);
        let overlay_store = Arc::new(MemoryOverlay {
            overlay: StdMutex::new(overlay),
        });
        let renderer = Arc::new(CountingRenderer::default());
        let clock = Arc::new(TestClock::at(monday()));
        let service = DashboardService::new(
            remote.clone(),
            overlay_store.clone(),
            clock.clone(),
            renderer.clone(),
        );
        Harness {
            service,
            remote,
            overlay: overlay_store,
            renderer,
            clock,
        }
    }

    fn draft_class(name: &str) -> ClassDraft {
        ClassDraft {
            name: name.to_string(),
            time: "7pm".to_string(),
            ..Default::default()
        }
    }

    fn draft_announcement(title: &str, message: &str) -> AnnouncementDraft {
        AnnouncementDraft {
            title: title.to_string(),
            message: message.to_string(),
            details: String::new(),
            severity: Severity::Warning,
        }
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_reload_builds_state_and_renders() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let state = h.service.state().await;
        let ids: Vec<&str> = state.classes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["schedule_Monday_0", "500"]);
        assert_eq!(state.settings.display_name, "Field House");
        assert_eq!(*h.renderer.full.lock().unwrap(), 1);
        assert_eq!(h.service.active_media(), Some(0));
        assert_eq!(h.service.active_announcement(), Some(0));
        assert!(h.service.media_rotation.has_timer());
        assert!(!h.service.announcement_rotation.has_timer());
    }

    #[tokio::test]
    async fn test_local_class_survives_remote_failure() {
        let overlay = LocalOverlay {
            classes: vec![draft_class("Pickleball").into_record("42".to_string())],
            announcements: vec![],
        };
        let h = harness(FakeRemote::default(), overlay);
        h.service.reload().await;

        let state = h.service.state().await;
        assert_eq!(state.classes.len(), 1);
        assert_eq!(state.classes[0].name, "Pickleball");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_baseline() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;
        let before = h.service.state().await;

        h.remote.go_offline();
        h.service.reload().await;

        assert_eq!(h.service.state().await, before);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_admin_edits() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;
        h.service.remove_class("500").await.unwrap();
        h.service.toggle_class_cancellation("schedule_Monday_0").await.unwrap();
        let before = h.service.state().await;
        let renders = *h.renderer.full.lock().unwrap();

        h.remote.go_offline();
        h.service.reload().await;

        let after = h.service.state().await;
        let classes: Vec<(&str, bool)> = after
            .classes
            .iter()
            .map(|c| (c.id.as_str(), c.cancelled))
            .collect();
        assert_eq!(classes, vec![("schedule_Monday_0", true)]);
        assert_eq!(after, before);
        assert_eq!(*h.renderer.full.lock().unwrap(), renders);
    }

    #[tokio::test]
    async fn test_reload_after_midnight_resolves_new_day() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;
        let state = h.service.state().await;
        assert!(state.classes.iter().any(|c| c.id == "schedule_Monday_0"));

        // 00:05 Tuesday in the facility's timezone
        h.clock.set(
            FixedOffset::west_opt(6 * 3600)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 20, 0, 5, 0)
                .unwrap(),
        );
        h.service.reload().await;

        let state = h.service.state().await;
        let scheduled: Vec<&str> = state
            .classes
            .iter()
            .filter(|c| c.from_schedule)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(scheduled, vec!["schedule_Tuesday_0", "schedule_Tuesday_1"]);
        assert!(state.classes.iter().all(|c| !c.id.starts_with("schedule_Monday_")));
        assert!(state.classes.iter().any(|c| c.id == "500"));
    }

    #[tokio::test]
    async fn test_add_class_persists_locally_and_remotely() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let added = h.service.add_class(draft_class("  Spin  ")).await.unwrap();
        assert_eq!(added.name, "Spin");
        assert_eq!(added.id, monday().timestamp_millis().to_string());
        assert!(!added.from_schedule);

        let overlay = h.overlay.overlay.lock().unwrap().clone();
        // the baseline admin class is part of the overlay snapshot too
        assert_eq!(overlay.classes.len(), 2);
        assert_eq!(*h.renderer.classes.lock().unwrap(), 1);

        settle().await;
        let saves = h.remote.saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert!(saves[0].classes.iter().all(|c| !c.from_schedule));
        assert!(saves[0].classes.iter().any(|c| c.name == "Spin"));
    }

    #[tokio::test]
    async fn test_same_millisecond_adds_get_distinct_ids() {
        let h = harness(FakeRemote::default(), LocalOverlay::default());
        h.service.reload().await;

        let first = h.service.add_class(draft_class("A")).await.unwrap();
        let second = h.service.add_class(draft_class("B")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_add_class_requires_name() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let err = h.service.add_class(draft_class("   ")).await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(h.service.state().await.classes.len(), 2);
    }

    #[tokio::test]
    async fn test_add_announcement_with_empty_title_is_rejected() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let err = h
            .service
            .add_announcement(draft_announcement("", "Pool closed"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(h.service.state().await.announcements.len(), 1);
        assert_eq!(*h.renderer.announcements.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_announcement_starts_rotation() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;
        assert!(!h.service.announcement_rotation.has_timer());

        let added = h
            .service
            .add_announcement(draft_announcement("Pool closed", "Back Monday"))
            .await
            .unwrap();
        assert!(!added.permanent);
        assert!(h.service.announcement_rotation.has_timer());
        assert_eq!(h.overlay.overlay.lock().unwrap().announcements, vec![added]);
    }

    #[tokio::test]
    async fn test_protected_records_cannot_be_deleted() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;
        let before = h.service.state().await;

        let err = h.service.remove_announcement("welcome").await.unwrap_err();
        assert!(matches!(err, DashboardError::Permission(_)));

        let err = h.service.remove_class("schedule_Monday_0").await.unwrap_err();
        assert!(matches!(err, DashboardError::Permission(_)));

        let err = h
            .service
            .update_class("schedule_Monday_0", draft_class("Renamed"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Permission(_)));

        assert_eq!(h.service.state().await, before);
    }

    #[tokio::test]
    async fn test_scheduled_class_can_be_cancelled() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let toggled = h.service.toggle_class_cancellation("schedule_Monday_0").await.unwrap();
        assert!(toggled.cancelled);
        let toggled = h.service.toggle_class_cancellation("schedule_Monday_0").await.unwrap();
        assert!(!toggled.cancelled);
    }

    #[tokio::test]
    async fn test_update_and_remove_admin_class() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let updated = h
            .service
            .update_class(
                "500",
                ClassDraft {
                    name: "Bootcamp".to_string(),
                    location: "Track".to_string(),
                    cancelled: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.location, "Track");
        assert!(updated.cancelled);

        h.service.remove_class("500").await.unwrap();
        let state = h.service.state().await;
        assert!(state.classes.iter().all(|c| c.id != "500"));
        assert!(h.overlay.overlay.lock().unwrap().classes.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_reported() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;

        let err = h.service.remove_announcement("nope").await.unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { kind: "announcement", .. }));
        let err = h.service.toggle_class_cancellation("nope").await.unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { kind: "class", .. }));
    }

    #[tokio::test]
    async fn test_reload_after_admin_add_does_not_duplicate() {
        let h = harness(FakeRemote::serving(baseline()), LocalOverlay::default());
        h.service.reload().await;
        let added = h.service.add_class(draft_class("Spin")).await.unwrap();
        settle().await;

        // The remote now holds the pushed document, and the overlay holds the same class.
        let pushed = h.remote.saves.lock().unwrap()[0].clone();
        *h.remote.document.lock().unwrap() = Some(pushed);
        h.service.reload().await;

        let state = h.service.state().await;
        assert_eq!(state.classes.iter().filter(|c| c.id == added.id).count(), 1);
        assert_eq!(state.classes.iter().filter(|c| c.from_schedule).count(), 1);
    }
}
