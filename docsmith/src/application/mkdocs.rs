//! mkdocs configuration: API Reference navigation
//!
//! After the API pages are written, the `API Reference` entry of the
//! rendered `mkdocs.yml` navigation is replaced with one entry per page.

use serde_yaml::{Mapping, Value};

pub const API_REFERENCE: &str = "API Reference";

/// Navigation title of an API page: file stem without its category prefix.
///
/// `module_sub_pkg.md` → `sub_pkg`, `function_foo.md` → `foo`, `_thing.md` → `thing`.
/// A name without any `_` has no title.
pub fn nav_title(file_name: &str) -> String {
    let without_category = file_name
        .split_once('_')
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    without_category
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(without_category)
        .to_string()
}

/// Replace every `API Reference` section of the top-level `nav` list.
///
/// `pages` are `(file name, link)` pairs in the order they should appear.
/// Returns the number of sections rewritten.
pub fn inject_api_reference(config: &mut Value, pages: &[(String, String)]) -> usize {
    let Some(nav) = config.get_mut("nav").and_then(Value::as_sequence_mut) else {
        return 0;
    };

    let entries: Vec<Value> = pages
        .iter()
        .map(|(file_name, link)| {
            let mut entry = Mapping::new();
            entry.insert(
                Value::String(nav_title(file_name)),
                Value::String(link.clone()),
            );
            Value::Mapping(entry)
        })
        .collect();

    let mut rewritten = 0;
    for section in nav.iter_mut() {
        if let Some(section) = section.as_mapping_mut() {
            if section.contains_key(API_REFERENCE) {
                section.insert(
                    Value::String(API_REFERENCE.to_string()),
                    Value::Sequence(entries.clone()),
                );
                rewritten += 1;
            }
        }
    }
    rewritten
}
