pub(crate) mod ffmpeg;
pub(crate) mod gif;
pub(crate) mod resource;
pub(crate) mod sink;
pub(crate) mod worker;
