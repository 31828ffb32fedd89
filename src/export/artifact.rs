/// Base name shared by every exported file.
pub const ARTIFACT_STEM: &str = "mahana-ai-loader";

/// Suggested file name of the raster loop.
pub const GIF_FILE_NAME: &str = "mahana-ai-loader.gif";
/// Suggested file name of the vector snapshot.
pub const SVG_FILE_NAME: &str = "mahana-ai-loader.svg";
/// Suggested file name of the animation document.
pub const LOTTIE_FILE_NAME: &str = "mahana-ai-loader.json";

/// An encoded export, not yet persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// File contents.
    pub bytes: Vec<u8>,
    /// Suggested file name, without directory.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
}

impl ExportArtifact {
    /// Looping GIF.
    pub fn gif(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: GIF_FILE_NAME.to_owned(),
            mime: "image/gif",
        }
    }

    /// Static SVG document.
    pub fn svg(markup: String) -> Self {
        Self {
            bytes: markup.into_bytes(),
            file_name: SVG_FILE_NAME.to_owned(),
            mime: "image/svg+xml",
        }
    }

    /// Lottie JSON document.
    pub fn lottie(json: Vec<u8>) -> Self {
        Self {
            bytes: json,
            file_name: LOTTIE_FILE_NAME.to_owned(),
            mime: "application/json",
        }
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
