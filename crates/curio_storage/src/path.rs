//! Nested property resolution against a single entity.
//!
//! Reads follow a path of map keys and report absence as `None`. Writes
//! auto-vivify: missing intermediate records are created as empty maps on
//! the way down. Only maps are containers for addressing purposes; an
//! array in the middle of a path is treated like a scalar, never indexed
//! into. Both walks are iterative loops, so adversarially deep paths
//! cannot grow the call stack.

use curio_foundation::{Entity, Value};

/// Reads the value at `path`, or `None` if any step is absent or passes
/// through a non-map value.
///
/// An empty path resolves to nothing; a path must name at least one
/// property to address a value.
#[must_use]
pub fn read<'a>(entity: &'a Entity, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = entity.get(first)?;
    for segment in rest {
        let Value::Map(map) = current else {
            return None;
        };
        current = map.get(segment)?;
    }
    Some(current)
}

/// Writes `value` at `path`, creating empty intermediate records as needed.
///
/// The final segment is assigned unconditionally, replacing whatever was
/// there. A non-map value occupying an intermediate segment is itself
/// replaced by `value` and the walk stops there; there are no merge
/// semantics anywhere along the path. An empty path is a no-op.
pub fn write(entity: &mut Entity, path: &[String], value: Value) {
    let map = entity.fields_mut();
    let mut segments = path.iter();
    let Some(mut key) = segments.next() else {
        return;
    };

    let mut map = map;
    for next in segments {
        match map.get(key) {
            Some(Value::Map(_)) => {}
            Some(_) => {
                // A scalar or array sits mid-path; overwrite it here.
                map.insert(key.clone(), value);
                return;
            }
            None => {
                map.insert(key.clone(), Value::map());
            }
        }
        map = match map.get_mut(key) {
            Some(Value::Map(inner)) => inner,
            _ => return,
        };
        key = next;
    }
    map.insert(key.clone(), value);
}
