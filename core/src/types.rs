//! Domain types shared by the client and its callers.

use std::collections::HashMap;

/// Arbitrary string-keyed customer attributes or event properties.
///
/// Order is irrelevant; the form encoder sorts keys when producing a body.
pub type Attributes = HashMap<String, String>;
