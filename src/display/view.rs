//! In-memory rendering of the exam page

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::port::{ElementId, ExamPanel, Notification, PresentationPort};
use crate::state::BackgroundVariant;

/// Rendered state of a single element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementView {
    pub text: String,
    pub visible: bool,
    pub enabled: bool,
    pub active: bool,
}

impl Default for ElementView {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: true,
            enabled: true,
            active: false,
        }
    }
}

/// An alert waiting for the user to dismiss it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingNotification {
    pub id: u64,
    pub kind: Notification,
    pub message: &'static str,
}

/// The page as the presentation port left it
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    elements: BTreeMap<ElementId, ElementView>,
    pub panel: Option<ExamPanel>,
    pub zoom: f64,
    pub background: BackgroundVariant,
    pub notifications: Vec<PendingNotification>,
    #[serde(skip)]
    next_notification_id: u64,
}

impl ViewModel {
    /// Create a page with every element visible, enabled and empty
    pub fn new() -> Self {
        Self {
            elements: ElementId::ALL
                .iter()
                .map(|id| (*id, ElementView::default()))
                .collect(),
            panel: None,
            zoom: 1.0,
            background: BackgroundVariant::Default,
            notifications: Vec::new(),
            next_notification_id: 1,
        }
    }

    /// Every element of the page, keyed by id
    pub fn elements(&self) -> &BTreeMap<ElementId, ElementView> {
        &self.elements
    }

    /// Rendered state of one element
    pub fn element(&self, id: ElementId) -> &ElementView {
        // Every id is inserted in `new` and the map is never shrunk
        &self.elements[&id]
    }

    /// Text of one element
    pub fn text(&self, id: ElementId) -> &str {
        &self.element(id).text
    }

    /// Whether one element is shown
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).visible
    }

    /// Whether one element accepts input
    pub fn is_enabled(&self, id: ElementId) -> bool {
        self.element(id).enabled
    }

    /// Remove a pending notification, returning whether it existed
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        before != self.notifications.len()
    }

    /// Count pending notifications of one kind
    pub fn pending(&self, kind: Notification) -> usize {
        self.notifications.iter().filter(|n| n.kind == kind).count()
    }

    fn element_mut(&mut self, id: ElementId) -> &mut ElementView {
        self.elements.entry(id).or_default()
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationPort for ViewModel {
    fn set_text(&mut self, id: ElementId, value: &str) {
        self.element_mut(id).text = value.to_string();
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.element_mut(id).visible = visible;
    }

    fn set_enabled(&mut self, id: ElementId, enabled: bool) {
        self.element_mut(id).enabled = enabled;
    }

    fn set_active(&mut self, id: ElementId, active: bool) {
        self.element_mut(id).active = active;
    }

    fn inject_panel(&mut self, panel: ExamPanel) {
        debug!("Injecting exam panel: {:?}", panel);
        self.panel = Some(panel);
    }

    fn remove_panel(&mut self) {
        self.panel = None;
    }

    fn apply_zoom(&mut self, level: f64) {
        self.zoom = level;
    }

    fn apply_background(&mut self, variant: BackgroundVariant) {
        self.background = variant;
    }

    /// Queue an alert. Like a modal, an alert of the same kind that is
    /// still open absorbs the new one.
    fn notify(&mut self, notification: Notification) {
        if self.pending(notification) > 0 {
            debug!("{:?} alert already open", notification);
            return;
        }
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(PendingNotification {
            id,
            kind: notification,
            message: notification.message(),
        });
    }
}
