#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn default_matches_consts() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.default_item_size, 40.0);
    assert_eq!(cfg.outline_scale, 1.2);
    assert_eq!(cfg.outline_line_width, 3.0);
}

#[test]
fn lookup_overrides_defaults() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        ("EMOJIART_DEFAULT_ITEM_SIZE", "64"),
        ("EMOJIART_OUTLINE_SCALE", " 1.5 "),
    ]));
    assert_eq!(cfg.default_item_size, 64.0);
    assert_eq!(cfg.outline_scale, 1.5);
    assert_eq!(cfg.outline_line_width, 3.0);
}

#[test]
fn unparsable_values_fall_back() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[("EMOJIART_DEFAULT_ITEM_SIZE", "big")]));
    assert_eq!(cfg.default_item_size, 40.0);
}

#[test]
fn non_positive_values_fall_back() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        ("EMOJIART_DEFAULT_ITEM_SIZE", "0"),
        ("EMOJIART_OUTLINE_LINE_WIDTH", "-2"),
        ("EMOJIART_OUTLINE_SCALE", "inf"),
    ]));
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn env_parse_missing_key_uses_default() {
    let lookup = lookup_from(&[]);
    assert_eq!(env_parse(&lookup, "NOPE", 7_u32), 7);
}

#[test]
fn serde_fills_missing_fields_with_defaults() {
    let cfg: EngineConfig = serde_json::from_str(r#"{ "default_item_size": 20.0 }"#).unwrap();
    assert_eq!(cfg.default_item_size, 20.0);
    assert_eq!(cfg.outline_scale, 1.2);
}
