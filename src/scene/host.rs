use crate::foundation::color::Color;
use crate::foundation::error::LoaderResult;
use crate::scene::model::{SvgScene, build_scene};
use crate::spiral::options::SpiralOptions;
use crate::spiral::tier::clamp_display_extent;

/// Parameters that change the geometry or colour of a mounted scene.
///
/// Background colour is not part of the key: the container paints it, not the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneKey {
    /// Clamped display extent.
    pub display_extent: u32,
    /// Dot colour.
    pub dot_color: Color,
    /// Period in seconds.
    pub duration: f64,
}

impl SceneKey {
    /// Key for a requested extent and option snapshot.
    pub fn new(display_extent: u32, options: &SpiralOptions) -> Self {
        Self {
            display_extent: clamp_display_extent(display_extent),
            dot_color: options.dot_color,
            duration: options.duration,
        }
    }
}

/// Container a live scene is mounted into.
///
/// Holds at most one scene. Mounting always discards the previous scene and rebuilds from
/// scratch; no diffing is attempted.
#[derive(Debug, Default)]
pub struct PreviewHost {
    mounted: Option<(SceneKey, SvgScene)>,
}

impl PreviewHost {
    /// Empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mounted scene with a freshly built one.
    pub fn mount(
        &mut self,
        display_extent: u32,
        options: &SpiralOptions,
    ) -> LoaderResult<&SvgScene> {
        let key = SceneKey::new(display_extent, options);
        self.mounted = None;
        let scene = build_scene(key.display_extent, options)?;
        let (_, scene) = self.mounted.insert((key, scene));
        Ok(&*scene)
    }

    /// Reactive-effect entry point: rebuild only when the scene key changed.
    ///
    /// Returns `true` when the scene was rebuilt.
    pub fn sync(&mut self, display_extent: u32, options: &SpiralOptions) -> LoaderResult<bool> {
        let key = SceneKey::new(display_extent, options);
        if self.mounted.as_ref().is_some_and(|(k, _)| *k == key) {
            return Ok(false);
        }
        tracing::debug!(extent = key.display_extent, "scene key changed; remounting");
        self.mount(display_extent, options)?;
        Ok(true)
    }

    /// Currently mounted scene, if any.
    pub fn scene(&self) -> Option<&SvgScene> {
        self.mounted.as_ref().map(|(_, s)| s)
    }

    /// Key of the currently mounted scene, if any.
    pub fn key(&self) -> Option<SceneKey> {
        self.mounted.as_ref().map(|(k, _)| *k)
    }

    /// Drop the mounted scene.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/host.rs"]
mod tests;
