use tracing::debug;

use crate::metadata::MetadataEntry;

/// Query-string parameter naming the activity class explicitly.
pub const CLASS_PARAMETER: &str = "class";

/// Metadata key binding an activity class to a request-path alias.
pub const ALIAS_KEY: &str = "alias";

/// Alias value reserved for the internal discoverer placeholder activity.
pub const DISCOVERER_VALUE: &str = "discoverer";

/// Pick the activity class to launch for the current navigation context.
///
/// A non-blank explicit parameter wins outright and metadata is never
/// consulted. Otherwise the declared page aliases are walked in registration
/// order and the last entry that qualifies wins: an entry qualifies when the
/// request URL contains its alias value, or through the uniqueness shortcut.
/// The shortcut fires when exactly two entries are declared and the entry is
/// not the discoverer placeholder, covering the common deployment of one real
/// activity plus the discoverer.
pub fn resolve_activity_class(
    explicit: Option<&str>,
    request_url: &str,
    entries: &[MetadataEntry],
) -> Option<String> {
    if let Some(class_name) = explicit {
        if !class_name.trim().is_empty() {
            return Some(class_name.to_string());
        }
    }

    let mut selected: Option<String> = None;
    for entry in entries {
        let is_unique = entries.len() == 2 && entry.value != DISCOVERER_VALUE;
        if is_unique || (entry.key == ALIAS_KEY && request_url.contains(&entry.value)) {
            selected = Some(entry.declaring_type.name().to_string());
        }
    }

    match &selected {
        Some(class_name) => {
            debug!(target = "gantry", class = %class_name, url = %request_url, "resolved activity class");
        }
        None => {
            debug!(target = "gantry", url = %request_url, declared = entries.len(), "no activity class matched");
        }
    }

    selected
}
