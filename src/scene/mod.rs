//! Scene assembly: registries, lights, camera and the object list.
//!
//! A [`Scene`] is prepared once (textures loaded and bound, lights pushed)
//! and then rendered every frame into any [`RenderTarget`].

pub mod frame;
pub mod part;
pub mod room;

use crate::{
    config::SceneConfig,
    lighting::SceneLights,
    mesh::RenderTarget,
    registry::{DecodedImage, MaterialRegistry, TextureBackend, TextureRegistry},
    shader::{ShaderBinder, UniformSink},
    view::Camera,
};

pub use frame::{Frame, PassScope};
pub use part::{Look, Part, Section, SectionPass};

pub struct Scene {
    pub config: SceneConfig,
    pub textures: TextureRegistry,
    pub materials: MaterialRegistry,
    pub lights: SceneLights,
    pub camera: Camera,
    pub sections: Vec<Section>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    /// The lamp room as configured. Materials are defined here; textures
    /// wait for [`prepare`](Self::prepare).
    pub fn new(config: SceneConfig) -> Self {
        let mut materials = MaterialRegistry::builtin();
        for material in &config.materials {
            materials.push(material.clone());
        }
        Self {
            camera: config.camera.to_camera(),
            config,
            textures: TextureRegistry::new(),
            materials,
            lights: SceneLights::room(),
            sections: room::room(),
        }
    }

    /// Load every configured texture, bind them and push the lights.
    ///
    /// A texture that fails to load is skipped; objects using its tag are
    /// drawn untextured. Returns how many textures made it.
    pub fn prepare<B, S>(&mut self, backend: &mut B, sink: &mut S) -> usize
    where
        B: TextureBackend + ?Sized,
        S: UniformSink + ?Sized,
    {
        let loaded = self
            .config
            .textures
            .iter()
            .filter(|spec| {
                let path = self.config.texture_path(spec);
                self.textures.load(&mut *backend, path, &spec.tag).is_ok()
            })
            .count();
        if loaded < self.config.textures.len() {
            log::warn!(
                "{} of {} textures failed to load",
                self.config.textures.len() - loaded,
                self.config.textures.len()
            );
        }
        self.textures.bind_all(backend);
        self.lights.push(sink);
        loaded
    }

    /// [`prepare`](Self::prepare) with decoding spread over tokio's blocking
    /// pool. Upload and slot assignment still happen in manifest order, so
    /// slots come out the same as with the synchronous path.
    pub async fn prepare_async<B, S>(&mut self, backend: &mut B, sink: &mut S) -> usize
    where
        B: TextureBackend + ?Sized,
        S: UniformSink + ?Sized,
    {
        let jobs = self.config.textures.iter().map(|spec| {
            let path = self.config.texture_path(spec);
            let tag = spec.tag.clone();
            tokio::task::spawn_blocking(move || DecodedImage::open(&path, &tag))
        });
        let decoded = futures::future::join_all(jobs).await;

        let mut loaded = 0;
        for (spec, result) in self.config.textures.iter().zip(decoded) {
            let image = match result {
                Ok(Ok(image)) => image,
                Ok(Err(e)) => {
                    log::error!("failed to load texture '{}': {}", spec.tag, e);
                    continue;
                }
                Err(e) => {
                    log::error!("decoding texture '{}' did not finish: {}", spec.tag, e);
                    continue;
                }
            };
            match self.textures.insert(&mut *backend, &image, &spec.tag) {
                Ok(_) => loaded += 1,
                Err(e) => log::error!("failed to load texture '{}': {}", spec.tag, e),
            }
        }
        if loaded < self.config.textures.len() {
            log::warn!(
                "{} of {} textures failed to load",
                self.config.textures.len() - loaded,
                self.config.textures.len()
            );
        }
        self.textures.bind_all(backend);
        self.lights.push(sink);
        loaded
    }

    /// Render at the aspect ratio of the configured output size.
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T) -> usize {
        self.render_with_aspect(target, self.config.render.aspect())
    }

    /// Push the camera and compose every section. Returns the number of draws.
    pub fn render_with_aspect<T: RenderTarget + ?Sized>(&self, target: &mut T, aspect: f32) -> usize {
        self.camera.push(&mut *target, aspect);
        let binder = ShaderBinder::new(&self.textures, &self.materials);
        let mut frame = Frame::begin(target, binder);
        for section in &self.sections {
            frame.draw_section(section);
        }
        let draws = frame.finish();
        log::debug!("frame composed with {} draws", draws);
        draws
    }

    /// Free every texture. The scene can be prepared again afterwards.
    pub fn release<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) {
        self.textures.release(backend);
    }
}
