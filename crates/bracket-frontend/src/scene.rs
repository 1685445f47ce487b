//! RON scene export
//!
//! Writes every resolved solid with its world transform and the render
//! settings, one document per render.

use std::io::Write;

use bracket_core::{Placement, RenderSettings, SceneRenderer, Transform};
use serde::{Deserialize, Serialize};

use crate::FrontendError;

/// One solid in an exported scene
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolidRecord {
    pub name: String,
    pub kind: String,
    /// Bounding box size in the solid's local frame
    pub extent: [f64; 3],
    /// Column-major 3x4 world transform (basis columns, then translation)
    pub transform: [f64; 12],
}

impl SolidRecord {
    /// Record of `placement` with its transform moved into the scene frame
    pub fn placed(placement: &Placement<'_>, origin: &Transform) -> Self {
        Self {
            name: placement.name.to_string(),
            kind: placement.kind.to_string(),
            extent: placement.extent.to_array(),
            transform: origin.appended(&placement.transform).to_cols_array(),
        }
    }
}

/// Complete exported scene
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneDocument {
    pub settings: RenderSettings,
    pub solids: Vec<SolidRecord>,
}

/// [`SceneRenderer`] writing a [`SceneDocument`] as pretty RON
pub struct RonSceneWriter<W: Write> {
    writer: W,
    origin: Transform,
}

impl<W: Write> RonSceneWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            origin: Transform::IDENTITY,
        }
    }

    /// Transform applied in front of every placement
    pub fn with_origin(mut self, origin: Transform) -> Self {
        self.origin = origin;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneRenderer for RonSceneWriter<W> {
    type Error = FrontendError;

    fn render(
        &mut self,
        settings: &RenderSettings,
        placements: &[Placement<'_>],
    ) -> Result<(), Self::Error> {
        let document = SceneDocument {
            settings: *settings,
            solids: placements
                .iter()
                .map(|placement| SolidRecord::placed(placement, &self.origin))
                .collect(),
        };
        let text = ron::ser::to_string_pretty(&document, ron::ser::PrettyConfig::default())
            .map_err(|e| FrontendError::Serialize(e.to_string()))?;

        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
