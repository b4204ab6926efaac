//! Declarative menu definitions.
//!
//! Menus can be described in TOML (several menus per file) or as a JSON
//! array of entries for one menu:
//!
//! ```toml
//! [[menu]]
//! name = "main"
//! classes = ["nav"]
//!
//! [[menu.entry]]
//! title = "Home"
//! endpoint = "root"
//! priority = -1
//! ```
//!
//! Entries arrive untyped and are checked one by one, so a malformed entry
//! is reported as a `TypeMismatch` under the registry's error mode.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{DefinitionError, ErrorKind, RegistryError, RegistryResult};
use crate::html::{Attributes, ClassList, is_valid_attr_name};
use crate::menu::entry::{MenuEntry, MenuItem};
use crate::menu::registry::{MenuOptions, MenuRegistry};
use crate::menu::rule::Rule;

/// When a declared entry is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveWhen {
    /// On the entry's own endpoint.
    #[default]
    Endpoint,
    Always,
    Never,
}

/// A serialized [`MenuEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDefinition {
    pub title: String,
    pub endpoint: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub active: ActiveWhen,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub container_classes: Vec<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl EntryDefinition {
    pub fn into_entry(self) -> MenuEntry {
        let active = match self.active {
            ActiveWhen::Endpoint => Rule::matches_endpoint(),
            ActiveWhen::Always => Rule::Always,
            ActiveWhen::Never => Rule::Never,
        };

        let mut entry = MenuEntry::new(self.title, self.endpoint)
            .with_priority(self.priority)
            .with_visible_when(Rule::from(self.visible))
            .with_active_when(active)
            .with_classes(self.classes)
            .with_container_classes(self.container_classes)
            .with_attributes(self.attributes.into_iter().collect());
        if let Some(id) = self.id {
            entry = entry.with_id(id);
        }
        entry
    }
}

/// A serialized menu with its entries.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuDefinition {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether the list element carries the `active` class.
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, rename = "entry")]
    pub entries: Vec<Value>,
}

impl MenuDefinition {
    fn options(&self) -> MenuOptions {
        MenuOptions {
            id: self.id.clone(),
            classes: ClassList::from_iter(&self.classes),
            attributes: self
                .attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect::<Attributes>(),
            visible_when: Rule::from(self.visible),
            active_when: Rule::from(self.active),
        }
    }

    /// Whether anything beyond the name and entries was declared.
    fn declares_options(&self) -> bool {
        self.id.is_some()
            || !self.classes.is_empty()
            || !self.attributes.is_empty()
            || !self.visible
            || !self.active
    }
}

/// First attribute name that cannot be serialized.
fn invalid_attr_name(attributes: &BTreeMap<String, String>) -> Option<&str> {
    attributes
        .keys()
        .map(String::as_str)
        .find(|name| !is_valid_attr_name(name))
}

#[derive(Debug, Deserialize)]
struct MenuFile {
    #[serde(default)]
    menu: Vec<MenuDefinition>,
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl MenuRegistry {
    /// Add an untyped entry definition to an existing menu.
    ///
    /// Fails with `TypeMismatch` when `value` is not an entry object.
    pub fn add_item_value(&mut self, menu: &str, value: &Value) -> RegistryResult<Arc<dyn MenuItem>> {
        if !value.is_object() {
            return Err(self.mode().raise_or_warn(ErrorKind::TypeMismatch {
                menu: menu.to_string(),
                detail: format!("expected an object, found {}", value_kind(value)),
            }));
        }

        let definition = match EntryDefinition::deserialize(value) {
            Ok(definition) => definition,
            Err(e) => {
                return Err(self.mode().raise_or_warn(ErrorKind::TypeMismatch {
                    menu: menu.to_string(),
                    detail: e.to_string(),
                }));
            }
        };

        if let Some(name) = invalid_attr_name(&definition.attributes) {
            return Err(self.mode().raise_or_warn(ErrorKind::TypeMismatch {
                menu: menu.to_string(),
                detail: format!("invalid attribute name {name:?}"),
            }));
        }

        self.add_item(menu, Arc::new(definition.into_entry()))
    }

    /// Load `[[menu]]` tables from TOML, returning the number of entries added.
    ///
    /// Menus that do not exist yet are created with the declared options;
    /// options declared for an existing menu are ignored. Advisory errors
    /// are logged and the offending menu or entry skipped; fatal errors stop
    /// loading.
    pub fn load_toml(&mut self, source: &str) -> Result<usize, DefinitionError> {
        let file: MenuFile = toml::from_str(source)?;

        let mut added = 0;
        for definition in file.menu {
            if let Some(name) = invalid_attr_name(&definition.attributes) {
                skip_advisory(self.mode().raise_or_warn(ErrorKind::TypeMismatch {
                    menu: definition.name.clone(),
                    detail: format!("invalid attribute name {name:?}"),
                }))?;
                continue;
            }

            if self.has_menu(&definition.name) {
                if definition.declares_options() {
                    warn!(menu = %definition.name, "menu already exists, ignoring its declared options");
                }
            } else if let Err(e) = self.create_menu_with(&definition.name, definition.options()) {
                skip_advisory(e)?;
                continue;
            }
            added += self.add_values(&definition.name, &definition.entries)?;
        }

        info!(entries = added, "loaded menu definitions");
        Ok(added)
    }

    /// Load a JSON array of entry definitions into `menu`, creating it if needed.
    pub fn load_json(&mut self, menu: &str, source: &str) -> Result<usize, DefinitionError> {
        let values: Vec<Value> = serde_json::from_str(source)?;
        if !self.has_menu(menu) {
            self.create_menu(menu)?;
        }
        self.add_values(menu, &values)
    }

    fn add_values(&mut self, menu: &str, values: &[Value]) -> Result<usize, DefinitionError> {
        let mut added = 0;
        for value in values {
            match self.add_item_value(menu, value) {
                Ok(_) => added += 1,
                Err(e) => skip_advisory(e)?,
            }
        }
        Ok(added)
    }
}

fn skip_advisory(err: RegistryError) -> Result<(), DefinitionError> {
    if err.is_fatal() {
        return Err(err.into());
    }
    warn!(error = %err, "skipping menu definition");
    Ok(())
}
