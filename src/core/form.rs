//! Form descriptors for block edit forms
//!
//! A [`FormDescriptorBuilder`] turns a settings schema into an ordered
//! sequence of [`FieldDescriptor`]s for an external form-rendering host. The
//! builder is a pure transformation: field order equals schema declaration
//! order, and caller overrides either replace a field in place (on a name
//! collision) or are appended at the end, which is the pattern a specialized block
//! service uses to adjust one field of its parent's form.

use serde::{Deserialize, Serialize};

use super::settings::{SettingDef, SettingsSchema, ValueKind};

/// Widget the form host should render for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Single-line text input
    Text,
    /// Integer input
    Integer,
    /// Checkbox
    Checkbox,
    /// Select dropdown
    Select,
    /// Multi-line text area
    Textarea,
}

/// Validation constraints attached to a form field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Whether the field must be filled in
    pub required: bool,
    /// Minimum numeric value
    pub min: Option<f64>,
    /// Maximum numeric value
    pub max: Option<f64>,
    /// Maximum string length
    pub max_length: Option<usize>,
}

impl FieldConstraints {
    /// Constraints with only the required flag set
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Set the numeric range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set the maximum string length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// A single field of a block edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, equal to the setting name it edits
    pub name: String,
    /// Widget to render
    pub widget: WidgetKind,
    /// Human-readable label
    pub label: String,
    /// Validation constraints
    pub constraints: FieldConstraints,
    /// `(value, label)` pairs for select widgets
    pub choices: Option<Vec<(String, String)>>,
}

impl FieldDescriptor {
    /// Derive a descriptor from a setting declaration
    fn from_setting(def: &SettingDef) -> Self {
        let widget = match def.kind {
            ValueKind::String | ValueKind::Number => WidgetKind::Text,
            ValueKind::Integer => WidgetKind::Integer,
            ValueKind::Boolean => WidgetKind::Checkbox,
            ValueKind::Enum => WidgetKind::Select,
            ValueKind::Array | ValueKind::Object => WidgetKind::Textarea,
        };

        let choices = def
            .choices
            .as_ref()
            .map(|cs| cs.iter().map(|c| (c.clone(), c.clone())).collect());

        Self {
            name: def.name.clone(),
            widget,
            label: def.label.clone().unwrap_or_else(|| def.name.clone()),
            constraints: FieldConstraints {
                required: def.required,
                ..FieldConstraints::default()
            },
            choices,
        }
    }

    /// Replace the choice list
    pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
        self.choices = Some(choices);
        self.widget = WidgetKind::Select;
        self
    }
}

/// Builds the ordered field sequence for a schema
pub struct FormDescriptorBuilder<'a> {
    schema: &'a SettingsSchema,
    overrides: Vec<FieldDescriptor>,
}

impl<'a> FormDescriptorBuilder<'a> {
    /// Start a builder for the given schema
    pub fn new(schema: &'a SettingsSchema) -> Self {
        Self {
            schema,
            overrides: Vec::new(),
        }
    }

    /// Add an override field
    ///
    /// If the name matches a schema-derived field it replaces that field in
    /// place, keeping its original position; otherwise it is appended after
    /// all schema fields. Later overrides win over earlier ones on the same
    /// name.
    pub fn with_override(mut self, field: FieldDescriptor) -> Self {
        self.overrides.push(field);
        self
    }

    /// Produce the field sequence
    pub fn build(self) -> Vec<FieldDescriptor> {
        let mut fields: Vec<FieldDescriptor> = self
            .schema
            .entries()
            .iter()
            .map(FieldDescriptor::from_setting)
            .collect();

        for over in self.overrides {
            match fields.iter().position(|f| f.name == over.name) {
                Some(idx) => fields[idx] = over,
                None => fields.push(over),
            }
        }

        fields
    }
}
