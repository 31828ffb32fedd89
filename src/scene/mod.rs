//! Live-preview backend: an animated vector scene that drives itself once mounted.

pub(crate) mod host;
pub(crate) mod markup;
pub(crate) mod model;
