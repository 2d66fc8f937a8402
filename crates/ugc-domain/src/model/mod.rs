//! Domain model types

pub mod catalog;
pub mod form;
pub mod selection;
pub mod snapshot;
pub mod theme;

pub use catalog::{Actor, ActorList, OptionCatalog, OptionRecord};
pub use form::{CharCounter, CounterStatus, FormField, FormFields};
pub use selection::{OptionCard, SelectionState};
pub use snapshot::SessionSnapshot;
pub use theme::Theme;
