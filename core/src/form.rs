//! `application/x-www-form-urlencoded` bodies for the track API.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::types::Attributes;

/// Encode pairs as a form body. Pairs are emitted in key order so the same
/// map always produces the same body.
pub fn encode(pairs: &Attributes) -> String {
    let sorted: BTreeMap<&str, &str> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish()
}

/// Flatten an event into the track API's form layout: `name` plus one
/// `data[key]` entry per property.
pub fn event_form(name: &str, properties: &Attributes) -> Attributes {
    let mut form = Attributes::with_capacity(properties.len() + 1);
    form.insert("name".to_string(), name.to_string());
    for (k, v) in properties {
        form.insert(format!("data[{k}]"), v.clone());
    }
    form
}
