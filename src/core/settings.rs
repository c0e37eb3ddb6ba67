//! Settings schema for block configuration
//!
//! Every block service declares its configuration surface as a
//! [`SettingsSchema`]: an ordered set of named settings, each with a default
//! value, a declared kind, and a required flag. Persisted per-block settings
//! are overlaid onto the schema defaults with [`SettingsSchema::resolve`],
//! which guarantees that the resolved mapping covers exactly the declared
//! names: unset settings fall back to defaults and unknown incoming keys are
//! dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::BlockError;

/// Name of the conventional setting holding a block's default template
pub const TEMPLATE_SETTING: &str = "template";

/// Declared kind of a setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// String setting
    String,
    /// Integer setting
    Integer,
    /// Floating point setting
    Number,
    /// Boolean setting
    Boolean,
    /// Enumerated setting (string drawn from a choice list)
    Enum,
    /// Array setting
    Array,
    /// Object setting
    Object,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Enum => "enum",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// A concrete setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// String value
    String(String),
    /// Integer number
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Array of values
    Array(Vec<SettingValue>),
    /// Object with key-value pairs
    Object(HashMap<String, SettingValue>),
    /// Unset value
    Null,
}

impl SettingValue {
    /// Check if the value is null (unset)
    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    /// The kind of this value; `None` for null
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            SettingValue::String(_) => Some(ValueKind::String),
            SettingValue::Integer(_) => Some(ValueKind::Integer),
            SettingValue::Number(_) => Some(ValueKind::Number),
            SettingValue::Boolean(_) => Some(ValueKind::Boolean),
            SettingValue::Array(_) => Some(ValueKind::Array),
            SettingValue::Object(_) => Some(ValueKind::Object),
            SettingValue::Null => None,
        }
    }

    /// Try to view as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            SettingValue::Number(n) => Some(*n as i64),
            _ => None,
        }
    }

    /// Try to convert to a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            SettingValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to view as an array
    pub fn as_array(&self) -> Option<&Vec<SettingValue>> {
        match self {
            SettingValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to view as an object
    pub fn as_object(&self) -> Option<&HashMap<String, SettingValue>> {
        match self {
            SettingValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Integer(i)
    }
}

impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        SettingValue::Number(n)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Boolean(b)
    }
}

/// Declaration of a single setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingDef {
    /// Setting name, unique within a schema
    pub name: String,
    /// Declared value kind
    pub kind: ValueKind,
    /// Default value used when no persisted value is present
    pub default: SettingValue,
    /// Whether a kind-incompatible persisted value is an error
    pub required: bool,
    /// Optional human-readable label for the edit form
    pub label: Option<String>,
    /// Allowed values for enumerated settings
    pub choices: Option<Vec<String>>,
}

impl SettingDef {
    /// Create a new setting declaration
    pub fn new(name: impl Into<String>, kind: ValueKind, default: impl Into<SettingValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: default.into(),
            required: false,
            label: None,
            choices: None,
        }
    }

    /// Mark the setting as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the form label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the choice list (for enumerated settings)
    pub fn with_choices(mut self, choices: Vec<&str>) -> Self {
        self.choices = Some(choices.into_iter().map(String::from).collect());
        self
    }
}

/// Declared, defaulted, typed configuration surface of a block
///
/// Constructed once per block-service type and immutable thereafter, so a
/// single schema instance can be shared across threads and concurrent
/// renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSchema {
    entries: Vec<SettingDef>,
}

impl SettingsSchema {
    /// Build a schema from setting declarations
    ///
    /// Declaration order is preserved and drives form-field order.
    ///
    /// # Errors
    /// `BlockError::DuplicateSetting` if a name repeats.
    pub fn define(entries: Vec<SettingDef>) -> Result<Self, BlockError> {
        let mut seen = std::collections::HashSet::new();
        for def in &entries {
            if !seen.insert(def.name.as_str()) {
                return Err(BlockError::DuplicateSetting(def.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Declared settings in declaration order
    pub fn entries(&self) -> &[SettingDef] {
        &self.entries
    }

    /// Look up a declaration by name
    pub fn get(&self, name: &str) -> Option<&SettingDef> {
        self.entries.iter().find(|d| d.name == name)
    }

    /// Number of declared settings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema declares no settings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The default template reference, if the schema declares one
    pub fn template_default(&self) -> Option<&str> {
        self.get(TEMPLATE_SETTING).and_then(|d| d.default.as_str())
    }

    /// Overlay persisted settings onto the schema defaults
    ///
    /// For each declared name the persisted value is used iff it is present,
    /// non-null, and kind-compatible; otherwise the default applies. Unknown
    /// incoming keys are dropped. The resolved key set always equals the
    /// declared key set. Pure function: identical inputs give identical
    /// output.
    ///
    /// # Errors
    /// `BlockError::TypeMismatch` when a present value's kind is incompatible
    /// and the setting is required. Optional settings fall back to their
    /// default instead.
    pub fn resolve(
        &self,
        persisted: &HashMap<String, SettingValue>,
    ) -> Result<SettingsValues, BlockError> {
        let mut values = HashMap::with_capacity(self.entries.len());

        for def in &self.entries {
            let value = match persisted.get(&def.name) {
                Some(v) => match v.kind() {
                    // Null means unset, fall back to the default.
                    None => def.default.clone(),
                    Some(actual) if kind_compatible(def.kind, actual) => v.clone(),
                    Some(actual) => {
                        if def.required {
                            return Err(BlockError::TypeMismatch {
                                name: def.name.clone(),
                                expected: def.kind,
                                actual,
                            });
                        }
                        tracing::debug!(
                            setting = %def.name,
                            expected = %def.kind,
                            actual = %actual,
                            "ignoring kind-incompatible persisted value"
                        );
                        def.default.clone()
                    }
                },
                None => def.default.clone(),
            };
            values.insert(def.name.clone(), value);
        }

        Ok(SettingsValues { values })
    }
}

/// A persisted value is accepted when its kind matches the declaration.
/// Integers satisfy a Number declaration; enumerated settings carry strings.
fn kind_compatible(declared: ValueKind, actual: ValueKind) -> bool {
    if declared == actual {
        return true;
    }
    matches!(
        (declared, actual),
        (ValueKind::Number, ValueKind::Integer) | (ValueKind::Enum, ValueKind::String)
    )
}

/// Fully resolved settings for one block instance
///
/// Produced by [`SettingsSchema::resolve`]; its key set is exactly the
/// schema's declared key set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsValues {
    values: HashMap<String, SettingValue>,
}

impl SettingsValues {
    /// Get a resolved value by name
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    /// Get a resolved string value by name
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    /// Get a resolved integer value by name
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(|v| v.as_integer())
    }

    /// Get a resolved boolean value by name
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(|v| v.as_bool())
    }

    /// Whether a name is present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of resolved settings
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no settings are present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.values.iter()
    }
}
