//! One frame of immediate-mode composition.
//!
//! A [`Frame`] owns the fixed-function state for the duration of a render.
//! It starts in the opaque baseline. Translucent and emissive draws happen
//! inside a [`PassScope`], which hands the frame back in exactly the state it
//! found it when dropped, whichever way the scope is left.

use std::ops::{Deref, DerefMut};

use cgmath::Matrix4;

use super::part::{Look, Part, Section, SectionPass};
use crate::{
    mesh::{MeshKind, RenderTarget},
    pass::{Emission, Face, PassKind, RenderPassState},
    shader::ShaderBinder,
    transform::Transform,
};

pub struct Frame<'a, T: RenderTarget + ?Sized> {
    target: &'a mut T,
    binder: ShaderBinder<'a>,
    state: RenderPassState,
    draws: usize,
}

impl<'a, T: RenderTarget + ?Sized> Frame<'a, T> {
    /// Reset to the opaque baseline and switch lighting on.
    pub fn begin(target: &'a mut T, binder: ShaderBinder<'a>) -> Self {
        let mut frame = Self {
            target,
            binder,
            state: RenderPassState::OPAQUE,
            draws: 0,
        };
        frame.binder.push_lighting(&mut *frame.target, true);
        frame
    }

    pub fn state(&self) -> RenderPassState {
        self.state
    }

    pub fn kind(&self) -> PassKind {
        self.state.kind()
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    fn apply(&mut self, next: RenderPassState) {
        if next.lighting != self.state.lighting {
            self.binder.push_lighting(&mut *self.target, next.lighting);
        }
        self.state = next;
    }

    /// Enter `next` until the returned scope is dropped.
    pub fn scoped(&mut self, next: RenderPassState) -> PassScope<'_, 'a, T> {
        let saved = self.state;
        self.apply(next);
        PassScope { frame: self, saved }
    }

    /// Alpha blended, no depth writes, back faces culled.
    pub fn translucent(&mut self) -> PassScope<'_, 'a, T> {
        let next = self.state.translucent();
        self.scoped(next)
    }

    pub fn emissive(&mut self, emission: Emission) -> PassScope<'_, 'a, T> {
        let next = self.state.emissive(emission);
        self.scoped(next)
    }

    /// Cull `face` until the returned scope is dropped.
    pub fn culled(&mut self, face: Face) -> PassScope<'_, 'a, T> {
        let next = RenderPassState {
            cull: true,
            cull_face: face,
            ..self.state
        };
        self.scoped(next)
    }

    /// Draw both faces until the returned scope is dropped.
    pub fn unculled(&mut self) -> PassScope<'_, 'a, T> {
        let next = RenderPassState {
            cull: false,
            ..self.state
        };
        self.scoped(next)
    }

    pub fn model(&mut self, model: Matrix4<f32>) {
        self.binder.push_transform(&mut *self.target, model);
    }

    pub fn transform(&mut self, transform: &Transform) {
        self.model(transform.to_matrix());
    }

    pub fn flat_color(&mut self, rgba: [f32; 4]) {
        self.binder.push_flat_color(&mut *self.target, rgba);
    }

    pub fn tint(&mut self, rgba: [f32; 4]) {
        self.binder.push_tint(&mut *self.target, rgba);
    }

    pub fn texture(&mut self, tag: &str) {
        self.binder.push_texture(&mut *self.target, tag);
    }

    pub fn material(&mut self, tag: &str) -> bool {
        self.binder.push_material(&mut *self.target, tag)
    }

    pub fn uv_scale(&mut self, u: f32, v: f32) {
        self.binder.push_uv_scale(&mut *self.target, u, v);
    }

    pub fn draw(&mut self, mesh: MeshKind) {
        self.target.draw_mesh(mesh, &self.state);
        self.draws += 1;
    }

    /// Push everything `part` describes and draw it.
    pub fn draw_part(&mut self, part: &Part) {
        match part.cull {
            Some(face) => self.culled(face).compose(part),
            None => self.compose(part),
        }
    }

    fn compose(&mut self, part: &Part) {
        self.transform(&part.transform);
        match part.look {
            Look::Textured {
                material,
                texture,
                uv,
                tint,
            } => {
                self.material(material);
                self.texture(texture);
                self.uv_scale(uv[0], uv[1]);
                if let Some(rgba) = tint {
                    self.tint(rgba);
                }
            }
            Look::Flat { color, material } => {
                self.flat_color(color);
                if let Some(tag) = material {
                    self.material(tag);
                }
            }
        }
        log::trace!("{} ({}) in {} pass", part.name, part.mesh, self.state.kind());
        self.draw(part.mesh);
    }

    pub fn draw_section(&mut self, section: &Section) {
        let mut scope = match section.pass {
            SectionPass::Opaque => {
                let unchanged = self.state;
                self.scoped(unchanged)
            }
            SectionPass::Translucent => self.translucent(),
            SectionPass::Emissive(emission) => self.emissive(emission),
        };
        for part in &section.parts {
            scope.draw_part(part);
        }
    }

    /// End the frame, returning the number of draws issued.
    pub fn finish(self) -> usize {
        self.draws
    }
}

impl<T: RenderTarget + ?Sized> Drop for Frame<'_, T> {
    fn drop(&mut self) {
        if self.state != RenderPassState::OPAQUE {
            log::warn!(
                "frame ended in {:?}, restoring the opaque baseline",
                self.state
            );
            self.apply(RenderPassState::OPAQUE);
        }
    }
}

/// Restores the state a [`Frame`] had before the scope was entered.
pub struct PassScope<'f, 'a, T: RenderTarget + ?Sized> {
    frame: &'f mut Frame<'a, T>,
    saved: RenderPassState,
}

impl<'a, T: RenderTarget + ?Sized> PassScope<'_, 'a, T> {
    /// State that will be restored on drop.
    pub fn saved(&self) -> RenderPassState {
        self.saved
    }
}

impl<'a, T: RenderTarget + ?Sized> Deref for PassScope<'_, 'a, T> {
    type Target = Frame<'a, T>;

    fn deref(&self) -> &Self::Target {
        &*self.frame
    }
}

impl<'a, T: RenderTarget + ?Sized> DerefMut for PassScope<'_, 'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.frame
    }
}

impl<T: RenderTarget + ?Sized> Drop for PassScope<'_, '_, T> {
    fn drop(&mut self) {
        self.frame.apply(self.saved);
    }
}
