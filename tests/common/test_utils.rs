use std::{
    collections::HashMap,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageBuffer, ImageFormat, LumaA, Rgb, Rgba};
use lamplight::{
    mesh::{MeshDrawer, MeshKind},
    pass::RenderPassState,
    registry::{DecodedImage, TextureBackend, TextureHandle},
    shader::{Uniform, UniformSink, UniformValue},
};
use tempfile::TempDir;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Set(Uniform, UniformValue),
    Draw(MeshKind, RenderPassState),
}

#[derive(Clone, Debug)]
pub struct RecordedDraw {
    pub mesh: MeshKind,
    pub state: RenderPassState,
    /// Every uniform as it stood when the draw was issued.
    pub uniforms: HashMap<Uniform, UniformValue>,
}

impl RecordedDraw {
    pub fn get(&self, uniform: Uniform) -> Option<UniformValue> {
        self.uniforms.get(&uniform).copied()
    }
}

/// Stands in for shader and mesh library: remembers every call in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub current: HashMap<Uniform, UniformValue>,
    pub draws: Vec<RecordedDraw>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uniform: Uniform) -> Option<UniformValue> {
        self.current.get(&uniform).copied()
    }

    /// Values written to `uniform`, oldest first.
    pub fn writes_to(&self, uniform: Uniform) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Set(u, v) if *u == uniform => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn last_call(&self) -> Option<&Call> {
        self.calls.last()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl UniformSink for Recorder {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        self.calls.push(Call::Set(uniform, value));
        self.current.insert(uniform, value);
    }
}

impl MeshDrawer for Recorder {
    fn draw_mesh(&mut self, mesh: MeshKind, state: &RenderPassState) {
        self.calls.push(Call::Draw(mesh, *state));
        self.draws.push(RecordedDraw {
            mesh,
            state: *state,
            uniforms: self.current.clone(),
        });
    }
}

/// In-memory texture backend. Handles start at 100 so they never look like
/// slots by accident.
#[derive(Debug, Default)]
pub struct FakeTextures {
    pub uploads: Vec<(String, DecodedImage)>,
    pub binds: Vec<(u32, TextureHandle)>,
    pub released: Vec<TextureHandle>,
}

impl FakeTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.uploads.len() - self.released.len()
    }
}

impl TextureBackend for FakeTextures {
    fn upload(&mut self, tag: &str, image: &DecodedImage) -> TextureHandle {
        self.uploads.push((tag.to_string(), image.clone()));
        TextureHandle(99 + self.uploads.len() as u32)
    }

    fn bind(&mut self, slot: u32, handle: TextureHandle) {
        self.binds.push((slot, handle));
    }

    fn release(&mut self, handle: TextureHandle) {
        self.released.push(handle);
    }
}

pub fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding");
    bytes
}

pub fn rgba_png(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
        width,
        height,
        Rgba(pixel),
    )))
}

pub fn rgb_png(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
    encode_png(DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
        width,
        height,
        Rgb(pixel),
    )))
}

/// Grey plus alpha: two channels, which the registry refuses.
pub fn luma_alpha_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(
        width,
        height,
        LumaA([128, 255]),
    )))
}

/// 1x2 RGBA image, red on top and blue below.
pub fn red_over_blue_png() -> Vec<u8> {
    let mut img = ImageBuffer::from_pixel(1, 2, Rgba([0, 0, 255, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    encode_png(DynamicImage::ImageRgba8(img))
}

/// Fresh directory under the system temp dir, deleted when dropped.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("lamplight-")
        .tempdir()
        .expect("create scratch dir")
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write test file");
    path
}
