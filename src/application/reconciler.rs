// Reconciler - merges baseline, today's schedule and the local overlay
use crate::application::overlay_store::LocalOverlay;
use crate::application::remote_store::RemoteDocument;
use crate::domain::dashboard::{DashboardState, Settings};
use crate::domain::record_id::{dedup_by_id, Record};
use crate::domain::schedule::resolve_todays_classes;
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;

/// Build the authoritative state. Pure: identical inputs give identical state.
///
/// Classes are today's schedule first, then baseline admin classes, then
/// overlay classes. Announcements are baseline then overlay. A baseline
/// record sharing an id with an overlay record is replaced by it.
pub fn reconcile(
    baseline: &RemoteDocument,
    overlay: &LocalOverlay,
    now: DateTime<FixedOffset>,
) -> DashboardState {
    let overlay_classes = overlay.classes.iter().cloned().map(|mut class| {
        class.from_schedule = false;
        class
    });
    let overlay_announcements = overlay.announcements.iter().cloned().map(|mut announcement| {
        announcement.permanent = false;
        announcement
    });

    // Schedule-tagged baseline classes are stale copies of an earlier pass.
    let baseline_classes: Vec<_> = baseline
        .classes
        .iter()
        .filter(|class| !class.from_schedule)
        .cloned()
        .collect();

    let mut classes = resolve_todays_classes(&baseline.weekly_schedule, now);
    classes.extend(layer(baseline_classes, overlay_classes.collect()));

    DashboardState {
        settings: Settings::default().merged(&baseline.settings),
        media: baseline.media.clone(),
        weekly_schedule: baseline.weekly_schedule.clone(),
        classes: dedup_by_id(classes),
        announcements: dedup_by_id(layer(
            baseline.announcements.clone(),
            overlay_announcements.collect(),
        )),
    }
}

fn layer<R: Record>(baseline: Vec<R>, overlay: Vec<R>) -> Vec<R> {
    let overlay_ids: HashSet<String> = overlay.iter().map(|r| r.id().to_string()).collect();
    baseline
        .into_iter()
        .filter(|record| !overlay_ids.contains(record.id()))
        .chain(overlay)
        .collect()
}
