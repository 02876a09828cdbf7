use std::sync::Mutex;

use crate::routes::Route;

/// The side effects a page may have on its host besides rendering.
pub trait Ui: Send + Sync {
    /// Blocking notice shown to the user.
    fn alert(&self, message: &str);
    fn navigate(&self, route: Route);
    /// History back.
    fn back(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Alert(String),
    Navigate(Route),
    Back,
}

/// Records every effect in order. Used by tests and by headless runs.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    pub fn went_back(&self) -> bool {
        self.events().contains(&UiEvent::Back)
    }

    fn push(&self, event: UiEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl Ui for RecordingUi {
    fn alert(&self, message: &str) {
        self.push(UiEvent::Alert(message.to_string()));
    }

    fn navigate(&self, route: Route) {
        self.push(UiEvent::Navigate(route));
    }

    fn back(&self) {
        self.push(UiEvent::Back);
    }
}
