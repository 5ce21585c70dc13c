//! Advisory notices sent to the notification collaborator.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;

use tracing::warn;

/// Human-readable event the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A renamed alias collided with another one and was suffixed.
    AliasDeduplicated { requested: String, accepted: String },
    /// A renamed alias contained invalid characters that were replaced.
    AliasSanitized { requested: String, accepted: String },
    /// Persisted names that no longer resolve in the catalog.
    EntriesSkipped { names: Vec<String> },
    LoadFailed { path: PathBuf, reason: String },
    SaveFailed { path: PathBuf, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AliasDeduplicated {
                requested,
                accepted,
            } => write!(
                f,
                "Duplicate name found: \"{requested}\" will be replaced with \"{accepted}\""
            ),
            Self::AliasSanitized {
                requested,
                accepted,
            } => write!(
                f,
                "Name is invalid, special characters will be replaced with \"_\": \
                 \"{requested}\" will be replaced with \"{accepted}\""
            ),
            Self::EntriesSkipped { names } => {
                write!(f, "Skipped unknown items: {}", names.join(", "))
            }
            Self::LoadFailed { path, reason } => {
                write!(f, "Failed to load file {}: {reason}", path.display())
            }
            Self::SaveFailed { path, reason } => {
                write!(f, "Failed to save file {}: {reason}", path.display())
            }
        }
    }
}

/// Receives notices; purely advisory, nothing is returned.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Default notifier: forwards every notice to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        warn!(%notice, "notice");
    }
}

/// Keeps notices around until the caller drains them.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice);
    }
}
