//! Deep merge of two configuration trees where non-empty source values win.

use indexmap::map::Entry;
use tracing::trace;

use crate::value::{ConfigMap, ConfigValue};

/// Merge `source` over `destination`, returning the merged tree.
///
/// Behaviour, for each key of `source` in order:
/// - keys missing from `destination` are appended as-is;
/// - when both sides hold maps, they are merged recursively;
/// - when the source value is empty (see [`ConfigValue::is_empty`]), the
///   destination value is kept;
/// - otherwise the source value replaces the destination value wholesale.
///   Lists are never merged element-wise and type mismatches are not errors.
///
/// Keys present only in `destination` are left untouched.
///
/// # Examples
///
/// ```rust
/// use hcl_merge::{ConfigValue, merge};
/// use serde_json::json;
///
/// let into_map = |value: serde_json::Value| ConfigValue::from(value).into_map().unwrap_or_default();
/// let merged = merge(
///     into_map(json!({"a": {"x": 1, "y": 2}, "name": "svc-a"})),
///     into_map(json!({"a": {"y": 3}, "name": ""})),
/// );
/// assert_eq!(
///     ConfigValue::Map(merged),
///     ConfigValue::from(json!({"a": {"x": 1, "y": 3}, "name": "svc-a"})),
/// );
/// ```
#[must_use]
pub fn merge(mut destination: ConfigMap, source: ConfigMap) -> ConfigMap {
    merge_maps(&mut destination, source, "");
    destination
}

/// Overlay `layer` onto `target` in place, using the rules of [`merge`].
///
/// A map layer only merges into a map target; over any other target it
/// replaces the value, unless the layer is empty.
///
/// ```rust
/// use hcl_merge::ConfigValue;
/// use hcl_merge::merge::merge_value;
/// use serde_json::json;
///
/// let mut target = ConfigValue::from(json!(["a", "b"]));
/// merge_value(&mut target, json!(["c"]).into());
/// assert_eq!(target, ConfigValue::from(json!(["c"])));
///
/// merge_value(&mut target, json!([]).into());
/// assert_eq!(target, ConfigValue::from(json!(["c"])));
/// ```
pub fn merge_value(target: &mut ConfigValue, layer: ConfigValue) {
    merge_at(target, layer, "");
}

fn merge_maps(target: &mut ConfigMap, layer: ConfigMap, path: &str) {
    for (key, value) in layer {
        let key_path = join_path(path, &key);
        match target.entry(key) {
            Entry::Occupied(mut slot) => merge_at(slot.get_mut(), value, &key_path),
            Entry::Vacant(slot) => {
                trace!(key = %key_path, kind = value.kind(), "adding source-only key");
                slot.insert(value);
            }
        }
    }
}

fn merge_at(target: &mut ConfigValue, layer: ConfigValue, path: &str) {
    match (target, layer) {
        (ConfigValue::Map(existing), ConfigValue::Map(incoming)) => {
            merge_maps(existing, incoming, path);
        }
        (existing, incoming) if incoming.is_empty() => {
            trace!(
                key = %path,
                kept = existing.kind(),
                "empty source value does not override"
            );
        }
        (existing, incoming) => {
            trace!(
                key = %path,
                from = existing.kind(),
                to = incoming.kind(),
                "source value replaces destination"
            );
            *existing = incoming;
        }
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}
