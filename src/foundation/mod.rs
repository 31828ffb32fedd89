pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod fs;
pub(crate) mod math;
