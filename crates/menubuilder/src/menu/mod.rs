//! Named navigation menus.
//!
//! Entries are registered against a [`MenuRegistry`] while the application
//! starts. Each request then renders a menu as an HTML list:
//! - entries sorted by priority, then title
//! - entries hidden by their visibility rule omitted
//! - `active`/`inactive` classes from each entry's active rule

mod content;
mod definition;
mod entry;
mod registry;
mod rule;

pub use content::{Content, ContentEntry, ContentProducer};
pub use definition::{ActiveWhen, EntryDefinition, MenuDefinition};
pub use entry::{MenuEntry, MenuItem, compare_items};
pub use registry::{ListKind, MenuOptions, MenuRegistry};
pub use rule::{ActiveState, Predicate, Rule};
