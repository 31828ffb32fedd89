//! Offline sampling backend: deterministic raster frames at arbitrary sample times.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod plan;
pub(crate) mod svg_raster;
