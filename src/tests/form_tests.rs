//! Tests for form descriptor building
//!
//! Field order must be deterministic (schema declaration order), and caller
//! overrides must replace matching fields in place or append at the end.

use crate::core::form::{FieldConstraints, FieldDescriptor, FormDescriptorBuilder, WidgetKind};
use crate::core::settings::{SettingDef, SettingValue, SettingsSchema, ValueKind};

fn schema() -> SettingsSchema {
    SettingsSchema::define(vec![
        SettingDef::new("title", ValueKind::String, SettingValue::Null).with_label("Title"),
        SettingDef::new("number", ValueKind::Integer, 15i64).required(),
        SettingDef::new("mode", ValueKind::Enum, "public").with_choices(vec!["public", "admin"]),
        SettingDef::new("enabled", ValueKind::Boolean, true),
    ])
    .unwrap()
}

fn toggle(name: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        widget: WidgetKind::Checkbox,
        label: name.to_string(),
        constraints: FieldConstraints::default(),
        choices: None,
    }
}

#[test]
fn test_build_follows_declaration_order() {
    let fields = FormDescriptorBuilder::new(&schema()).build();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "number", "mode", "enabled"]);
}

#[test]
fn test_widgets_follow_value_kinds() {
    let fields = FormDescriptorBuilder::new(&schema()).build();

    assert_eq!(fields[0].widget, WidgetKind::Text);
    assert_eq!(fields[1].widget, WidgetKind::Integer);
    assert_eq!(fields[2].widget, WidgetKind::Select);
    assert_eq!(fields[3].widget, WidgetKind::Checkbox);
}

#[test]
fn test_labels_fall_back_to_setting_name() {
    let fields = FormDescriptorBuilder::new(&schema()).build();
    assert_eq!(fields[0].label, "Title");
    assert_eq!(fields[1].label, "number");
}

#[test]
fn test_required_flag_reaches_constraints() {
    let fields = FormDescriptorBuilder::new(&schema()).build();
    assert!(fields[1].constraints.required);
    assert!(!fields[0].constraints.required);
}

#[test]
fn test_choices_become_value_label_pairs() {
    let fields = FormDescriptorBuilder::new(&schema()).build();
    assert_eq!(
        fields[2].choices.as_ref().unwrap(),
        &vec![
            ("public".to_string(), "public".to_string()),
            ("admin".to_string(), "admin".to_string()),
        ]
    );
}

#[test]
fn test_override_with_matching_name_replaces_in_place() {
    let fields = FormDescriptorBuilder::new(&schema())
        .with_override(toggle("mode"))
        .build();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "number", "mode", "enabled"]);
    assert_eq!(fields[2].widget, WidgetKind::Checkbox);
}

#[test]
fn test_override_with_new_name_appends_at_end() {
    let fields = FormDescriptorBuilder::new(&schema())
        .with_override(toggle("featured_only"))
        .build();

    assert_eq!(fields.len(), 5);
    assert_eq!(fields.last().unwrap().name, "featured_only");
}

#[test]
fn test_later_override_wins_on_same_name() {
    let mut second = toggle("mode");
    second.label = "Visibility".to_string();

    let fields = FormDescriptorBuilder::new(&schema())
        .with_override(toggle("mode"))
        .with_override(second)
        .build();

    assert_eq!(fields[2].label, "Visibility");
    assert_eq!(fields.len(), 4);
}

#[test]
fn test_build_is_deterministic() {
    let first = FormDescriptorBuilder::new(&schema())
        .with_override(toggle("featured_only"))
        .build();
    let second = FormDescriptorBuilder::new(&schema())
        .with_override(toggle("featured_only"))
        .build();
    assert_eq!(first, second);
}
