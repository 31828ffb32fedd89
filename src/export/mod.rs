pub(crate) mod artifact;
pub(crate) mod lottie;
pub(crate) mod raster;
pub(crate) mod save;
pub(crate) mod vector;
