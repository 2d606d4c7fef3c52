//! Dashboard snapshot documents.
//!
//! The exchanged shape is
//! `{ layout: { gridSize, isCompact }, plugins: [ { id, type, title, x, y, width, height, state } ] }`.
//! `save` produces it; `load-json` and persistence consume it.
//!
//! Reading is lenient the way a hand-edited file needs: a missing or
//! out-of-range `gridSize` is ignored, a non-boolean `isCompact` is ignored,
//! plugin entries without a string `type` are skipped, and coordinates may be
//! JSON numbers or numeric strings (rounded to whole pixels). Widgets are
//! renumbered on apply, so an `id` that is not a whole non-negative number
//! reads as 0. Only a non-object document or a non-list `plugins` value
//! rejects the whole snapshot.

use dterm_core::layout::grid_size_from_number;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SnapshotError;
use crate::widget::WidgetId;

/// Layout part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_compact: Option<bool>,
}

/// One widget in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_coord", skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, deserialize_with = "lenient_coord", skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, deserialize_with = "lenient_coord", skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, deserialize_with = "lenient_coord", skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default)]
    pub state: Value,
}

/// A whole dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub layout: LayoutSnapshot,
    pub plugins: Vec<WidgetSnapshot>,
}

fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

fn lenient_coord<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(lenient_number)
        .map(|v| v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<WidgetId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value)
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(WidgetId::MAX))
        .map_or(0, |v| v as WidgetId))
}

impl DashboardSnapshot {
    /// Decode a parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let Value::Object(mut root) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let mut layout = LayoutSnapshot::default();
        if let Some(raw) = root.get("layout") {
            layout.grid_size = raw
                .get("gridSize")
                .and_then(Value::as_f64)
                .and_then(|n| grid_size_from_number(n).ok());
            layout.is_compact = raw.get("isCompact").and_then(Value::as_bool);
        }

        let plugins = match root.remove("plugins") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let total = items.len();
                let decoded: Vec<WidgetSnapshot> = items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect();
                if decoded.len() < total {
                    tracing::warn!(
                        target: "dterm.persistence",
                        skipped = total - decoded.len(),
                        "snapshot entries skipped"
                    );
                }
                decoded
            }
            Some(_) => return Err(SnapshotError::PluginsNotAList),
        };

        Ok(Self { layout, plugins })
    }

    /// Encode as a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Two-space indented JSON, as printed by `save`.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_the_exchange_shape() {
        let snap = DashboardSnapshot {
            layout: LayoutSnapshot {
                grid_size: Some(50),
                is_compact: Some(false),
            },
            plugins: vec![WidgetSnapshot {
                id: 0,
                kind: "todo".into(),
                title: Some("Tasks".into()),
                x: Some(10),
                y: Some(10),
                width: Some(200),
                height: Some(150),
                state: json!({"todos": []}),
            }],
        };
        assert_eq!(
            snap.to_value().unwrap(),
            json!({
                "layout": {"gridSize": 50, "isCompact": false},
                "plugins": [{
                    "id": 0, "type": "todo", "title": "Tasks",
                    "x": 10, "y": 10, "width": 200, "height": 150,
                    "state": {"todos": []}
                }]
            })
        );
        assert!(snap.to_pretty_json().unwrap().contains("\n  \"layout\": {"));
    }

    #[test]
    fn layout_values_are_read_leniently() {
        let snap = DashboardSnapshot::from_value(json!({
            "layout": {"gridSize": 999, "isCompact": "yes"}
        }))
        .unwrap();
        assert_eq!(snap.layout, LayoutSnapshot::default());
        assert!(snap.plugins.is_empty());

        let snap = DashboardSnapshot::from_value(json!({
            "layout": {"gridSize": 20.0, "isCompact": true}
        }))
        .unwrap();
        assert_eq!(snap.layout.grid_size, Some(20));
        assert_eq!(snap.layout.is_compact, Some(true));
    }

    #[test]
    fn bad_entries_are_skipped_and_coordinates_rounded() {
        let snap = DashboardSnapshot::from_value(json!({
            "plugins": [
                {"type": "clock", "x": 10.6, "y": "left", "state": {"is24h": false}},
                {"title": "no type"},
                42
            ]
        }))
        .unwrap();
        assert_eq!(snap.plugins.len(), 1);
        let clock = &snap.plugins[0];
        assert_eq!(clock.kind, "clock");
        assert_eq!(clock.x, Some(11));
        assert_eq!(clock.y, None);
        assert_eq!(clock.title, None);
    }

    #[test]
    fn odd_ids_and_numeric_strings_still_decode() {
        let snap = DashboardSnapshot::from_value(json!({
            "plugins": [
                {"id": "3", "type": "todo", "title": "A"},
                {"id": 1.0, "type": "todo", "title": "B"},
                {"id": -1, "type": "todo", "title": "C"},
                {"id": null, "type": "todo", "title": "D", "x": "120", "y": " 7.6 ", "width": "wide"}
            ]
        }))
        .unwrap();
        let titles: Vec<_> = snap.plugins.iter().map(|p| p.title.as_deref()).collect();
        assert_eq!(titles, [Some("A"), Some("B"), Some("C"), Some("D")]);
        let ids: Vec<_> = snap.plugins.iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 1, 0, 0]);
        let d = &snap.plugins[3];
        assert_eq!((d.x, d.y, d.width), (Some(120), Some(8), None));
    }

    #[test]
    fn rejects_documents_that_are_not_dashboards() {
        assert_eq!(
            DashboardSnapshot::from_value(json!([1, 2])),
            Err(SnapshotError::NotAnObject)
        );
        assert_eq!(
            DashboardSnapshot::from_value(json!({"plugins": {"a": 1}})),
            Err(SnapshotError::PluginsNotAList)
        );
        assert!(DashboardSnapshot::from_value(json!({"plugins": null})).is_ok());
    }
}
