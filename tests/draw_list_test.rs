use lamplight::{
    gpu::DrawList,
    mesh::{MeshDrawer, MeshKind},
    pass::{BlendFunc, Emission, Face, PipelineKey, RenderPassState},
    registry::{MaterialRegistry, NO_TEXTURE_SLOT, TextureRegistry},
    scene::{Frame, Part, Scene},
    shader::{ShaderBinder, Uniform, UniformSink, UniformValue},
    transform::Transform,
};

#[test]
fn each_draw_keeps_its_own_uniform_snapshot() {
    let mut list = DrawList::new();
    let opaque = RenderPassState::OPAQUE;

    list.set_uniform(Uniform::ObjectColor, UniformValue::Vec4([1.0, 0.0, 0.0, 1.0]));
    list.draw_mesh(MeshKind::Box, &opaque);
    list.set_uniform(Uniform::ObjectColor, UniformValue::Vec4([0.0, 1.0, 0.0, 1.0]));
    list.set_uniform(Uniform::ObjectTexture, UniformValue::Int(3));
    list.draw_mesh(MeshKind::Sphere, &opaque.translucent());

    let [first, second] = list.commands() else {
        panic!("expected two draws, got {}", list.len());
    };
    assert_eq!(first.object.color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(first.object.texture_slot, NO_TEXTURE_SLOT);
    assert_eq!(second.object.color, [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(second.object.texture_slot, 3);
    assert_eq!(second.mesh, MeshKind::Sphere);
    assert_eq!(second.key.blend, Some(BlendFunc::Alpha));
}

#[test]
fn clear_drops_draws_but_keeps_uniforms() {
    let mut list = DrawList::new();
    list.set_uniform(Uniform::UvScale, UniformValue::Vec2([2.0, 2.0]));
    list.draw_mesh(MeshKind::Plane, &RenderPassState::OPAQUE);

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.uniforms().object.uv_scale, [2.0, 2.0]);
}

#[test]
fn the_room_needs_four_pipelines() {
    let scene = Scene::default();
    let mut list = DrawList::new();
    assert_eq!(scene.render(&mut list), 116);

    let keys = list.pipeline_keys();
    let opaque = PipelineKey::default();
    let glass = RenderPassState::OPAQUE.translucent();
    let inner_glass = RenderPassState {
        cull_face: Face::Front,
        ..glass
    };
    let halo = RenderPassState::OPAQUE.emissive(Emission::Glow);

    assert_eq!(keys.len(), 4);
    assert!(keys.contains(&opaque));
    assert!(keys.contains(&glass.pipeline_key()));
    assert!(keys.contains(&inner_glass.pipeline_key()));
    assert!(keys.contains(&halo.pipeline_key()));
}

#[test]
fn room_lights_land_in_the_frame_block() {
    let scene = Scene::default();
    let mut list = DrawList::new();
    scene.lights.push(&mut list);
    scene.render(&mut list);

    let frame = list.uniforms().frame;
    assert_eq!(frame.view_position, [0.5, 8.0, 16.0]);
    assert!(frame.points.iter().all(|p| p.active == 1));
    assert_eq!(frame.points[0].linear, 0.11);
}

#[test]
fn untinted_room_textures_ignore_the_preceding_trim_colour() {
    let scene = Scene::default();
    let mut list = DrawList::new();
    scene.render(&mut list);
    let commands = list.commands();

    // the last cabinet peg is flat black trim, the body right after it is textured
    let peg = &commands[18].object;
    assert_eq!((peg.use_texture, peg.color), (0, [0.05, 0.05, 0.05, 1.0]));
    let body = &commands[19].object;
    assert_eq!((body.use_texture, body.use_tint), (1, 0));

    // the chevron box base follows the gold clasp
    assert_eq!(commands[89].object.color, [0.85, 0.65, 0.2, 1.0]);
    let base = &commands[90].object;
    assert_eq!((base.use_texture, base.use_tint), (1, 0));
}

#[test]
fn only_explicit_tints_reach_textured_draws() {
    let scene = Scene::default();
    let mut list = DrawList::new();
    scene.render(&mut list);

    let tints: Vec<[f32; 4]> = list
        .commands()
        .iter()
        .filter(|c| c.object.use_texture == 1 && c.object.use_tint == 1)
        .map(|c| c.object.color)
        .collect();
    assert!(!tints.is_empty());
    for tint in tints {
        assert!(
            tint == [1.0; 4] || tint == [0.85, 0.90, 1.0, 0.38],
            "unexpected tint {tint:?}"
        );
    }
}

#[test]
fn textured_part_after_a_flat_part_is_untinted() {
    let textures = TextureRegistry::new();
    let materials = MaterialRegistry::builtin();
    let mut list = DrawList::new();
    {
        let mut frame = Frame::begin(&mut list, ShaderBinder::new(&textures, &materials));
        frame.draw_part(&Part::flat(
            "clasp",
            MeshKind::Box,
            Transform::default(),
            [0.85, 0.65, 0.2, 1.0],
        ));
        frame.draw_part(&Part::textured(
            "box",
            MeshKind::Box,
            Transform::default(),
            "boxFurMat",
            "ChevronFur",
            [1.0, 1.0],
        ));
        frame.finish();
    }

    let [flat, textured] = list.commands() else {
        panic!("expected two draws, got {}", list.len());
    };
    assert_eq!((flat.object.use_texture, flat.object.use_tint), (0, 0));
    assert_eq!((textured.object.use_texture, textured.object.use_tint), (1, 0));
}
