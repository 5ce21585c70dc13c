#![deny(unsafe_code)]

//! Dual-list selection engine.
//!
//! Keeps an "available" pool and a user-ordered "selected" sequence in sync
//! with a master catalog under add, remove and reorder, with an optional
//! short-list mask and alias validation for the selected entries.

pub mod classifier;
pub mod index;
pub mod naming;
pub mod notice;
pub mod operation;
pub mod options;
pub mod persist;
pub mod session;

pub use classifier::{Action, ActionClassifier, ClassifierState};
pub use index::{DualListIndex, ReplaceOutcome};
pub use naming::{NameCorrection, NameValidator, ValidatedName};
pub use notice::{CollectingNotifier, Notice, Notifier, TracingNotifier};
pub use operation::{Operation, RenameOutcome};
pub use options::SessionOptions;
pub use persist::PairStore;
pub use session::SelectionSession;
