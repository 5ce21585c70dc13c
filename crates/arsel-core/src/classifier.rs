//! Recovers user intent from press/drop gestures.
//!
//! List toolkits tend to report add, remove and reorder alike as generic
//! "rows inserted / rows removed" notifications. The UI layer instead
//! translates its native gestures into [`ActionClassifier::on_press`] and
//! [`ActionClassifier::on_drop`], and the classifier decides which list
//! operation the gesture meant.

use arsel_model::ListSide;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Where the current gesture started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierState {
    #[default]
    Idle,
    PressedInAvailable,
    PressedInSelected,
}

/// The list operation a completed gesture stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Add,
    Remove,
    Reorder,
    NoAction,
}

#[derive(Debug, Clone, Default)]
pub struct ActionClassifier {
    state: ClassifierState,
    dropped_on: Option<ListSide>,
}

impl ActionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClassifierState {
        self.state
    }

    /// A press starts a new gesture; a later press replaces an earlier one.
    pub fn on_press(&mut self, source: ListSide) {
        self.state = match source {
            ListSide::Available => ClassifierState::PressedInAvailable,
            ListSide::Selected => ClassifierState::PressedInSelected,
        };
        self.dropped_on = None;
        trace!(state = ?self.state, "press");
    }

    pub fn on_drop(&mut self, target: ListSide) {
        self.dropped_on = Some(target);
        trace!(%target, "drop");
    }

    /// Classify the pending gesture.
    ///
    /// A gesture with a drop is consumed and the classifier returns to
    /// [`ClassifierState::Idle`]; without a drop the press stays pending.
    pub fn classify(&mut self) -> Action {
        let Some(target) = self.dropped_on else {
            return Action::NoAction;
        };
        let action = match (self.state, target) {
            (ClassifierState::PressedInAvailable, ListSide::Selected) => Action::Add,
            (ClassifierState::PressedInSelected, ListSide::Available) => Action::Remove,
            (ClassifierState::PressedInSelected, ListSide::Selected) => Action::Reorder,
            _ => Action::NoAction,
        };
        self.reset();
        action
    }

    pub fn reset(&mut self) {
        self.state = ClassifierState::Idle;
        self.dropped_on = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(press: Option<ListSide>, drop: ListSide) -> Action {
        let mut classifier = ActionClassifier::new();
        if let Some(source) = press {
            classifier.on_press(source);
        }
        classifier.on_drop(drop);
        classifier.classify()
    }

    #[test]
    fn classifies_every_combination() {
        use ListSide::{Available, Selected};
        assert_eq!(gesture(Some(Available), Selected), Action::Add);
        assert_eq!(gesture(Some(Selected), Available), Action::Remove);
        assert_eq!(gesture(Some(Selected), Selected), Action::Reorder);
        assert_eq!(gesture(Some(Available), Available), Action::NoAction);
        assert_eq!(gesture(None, Selected), Action::NoAction);
        assert_eq!(gesture(None, Available), Action::NoAction);
    }

    #[test]
    fn resets_after_a_classified_drop() {
        let mut classifier = ActionClassifier::new();
        classifier.on_press(ListSide::Available);
        classifier.on_drop(ListSide::Selected);
        assert_eq!(classifier.classify(), Action::Add);
        assert_eq!(classifier.state(), ClassifierState::Idle);

        // A stray drop after the gesture must not be read as another add.
        classifier.on_drop(ListSide::Selected);
        assert_eq!(classifier.classify(), Action::NoAction);
    }

    #[test]
    fn press_without_drop_stays_pending() {
        let mut classifier = ActionClassifier::new();
        classifier.on_press(ListSide::Selected);
        assert_eq!(classifier.classify(), Action::NoAction);
        assert_eq!(classifier.state(), ClassifierState::PressedInSelected);
        classifier.on_drop(ListSide::Selected);
        assert_eq!(classifier.classify(), Action::Reorder);
    }

    #[test]
    fn later_press_wins() {
        let mut classifier = ActionClassifier::new();
        classifier.on_press(ListSide::Available);
        classifier.on_press(ListSide::Selected);
        classifier.on_drop(ListSide::Available);
        assert_eq!(classifier.classify(), Action::Remove);
    }
}
