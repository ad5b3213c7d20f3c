//! Fixed-function render state and the three pass configurations.
//!
//! A frame always starts from [`RenderPassState::OPAQUE`]. Translucent and
//! emissive objects are drawn from derived states and the baseline is put
//! back afterwards (see [`crate::scene::frame`] for the scoped guards).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub fn opposite(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

/// Blend factors in use when blending is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendFunc {
    /// `SRC_ALPHA`, `ONE_MINUS_SRC_ALPHA`.
    Alpha,
    /// `ONE`, `ONE`.
    Additive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    Opaque,
    Translucent,
    EmissiveOverlay,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Opaque => f.write_str("opaque"),
            PassKind::Translucent => f.write_str("translucent"),
            PassKind::EmissiveOverlay => f.write_str("emissive"),
        }
    }
}

/// Flavour of an emissive overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emission {
    /// Lighting off, everything else as in the opaque pass (the bulb).
    Unlit,
    /// Lighting off, additive blending, no depth test or depth writes (the halo).
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderPassState {
    pub blend: bool,
    pub blend_func: BlendFunc,
    pub depth_write: bool,
    pub depth_test: bool,
    pub cull: bool,
    pub cull_face: Face,
    pub lighting: bool,
}

impl Default for RenderPassState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl RenderPassState {
    /// Entered at the start of every frame.
    pub const OPAQUE: Self = Self {
        blend: false,
        blend_func: BlendFunc::Alpha,
        depth_write: true,
        depth_test: true,
        cull: false,
        cull_face: Face::Back,
        lighting: true,
    };

    /// Alpha blending on, depth writes off, back faces culled.
    pub fn translucent(self) -> Self {
        Self {
            blend: true,
            blend_func: BlendFunc::Alpha,
            depth_write: false,
            cull: true,
            cull_face: Face::Back,
            ..self
        }
    }

    pub fn emissive(self, emission: Emission) -> Self {
        let unlit = Self {
            lighting: false,
            ..self
        };
        match emission {
            Emission::Unlit => unlit,
            Emission::Glow => Self {
                blend: true,
                blend_func: BlendFunc::Additive,
                depth_write: false,
                depth_test: false,
                ..unlit
            },
        }
    }

    /// Which of the three pass configurations this state corresponds to.
    pub fn kind(&self) -> PassKind {
        if !self.lighting {
            PassKind::EmissiveOverlay
        } else if self.blend {
            PassKind::Translucent
        } else {
            PassKind::Opaque
        }
    }

    /// The parts of the state a pipeline is built from. Lighting is a uniform
    /// and does not take part.
    pub fn pipeline_key(&self) -> PipelineKey {
        PipelineKey {
            blend: self.blend.then_some(self.blend_func),
            depth_write: self.depth_write,
            depth_test: self.depth_test,
            cull: self.cull.then_some(self.cull_face),
        }
    }
}

/// Immutable pipeline configuration derived from a [`RenderPassState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub blend: Option<BlendFunc>,
    pub depth_write: bool,
    pub depth_test: bool,
    pub cull: Option<Face>,
}

impl Default for PipelineKey {
    fn default() -> Self {
        RenderPassState::OPAQUE.pipeline_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let opaque = RenderPassState::OPAQUE;
        assert_eq!(opaque.kind(), PassKind::Opaque);
        assert_eq!(opaque.translucent().kind(), PassKind::Translucent);
        assert_eq!(opaque.emissive(Emission::Glow).kind(), PassKind::EmissiveOverlay);
    }

    #[test]
    fn disabled_blend_and_cull_do_not_split_pipelines() {
        let a = RenderPassState::OPAQUE;
        let b = RenderPassState {
            blend_func: BlendFunc::Additive,
            cull_face: Face::Front,
            ..a
        };
        assert_eq!(a.pipeline_key(), b.pipeline_key());
    }
}
