mod common;

use common::test_utils::*;
use lamplight::{
    mesh::MeshKind,
    pass::{BlendFunc, Emission, Face, PassKind, RenderPassState},
    registry::{MaterialRegistry, TextureRegistry},
    scene::{Frame, Part, Section, SectionPass},
    shader::{ShaderBinder, Uniform, UniformValue},
    transform::Transform,
};

fn registries() -> (TextureRegistry, MaterialRegistry) {
    (TextureRegistry::new(), MaterialRegistry::builtin())
}

#[test]
fn translucent_round_trip_restores_every_flag() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
    let before = frame.state();
    assert_eq!(before, RenderPassState::OPAQUE);

    {
        let mut glass = frame.translucent();
        assert_eq!(glass.kind(), PassKind::Translucent);
        let state = glass.state();
        assert!(state.blend);
        assert_eq!(state.blend_func, BlendFunc::Alpha);
        assert!(!state.depth_write);
        assert!(state.depth_test);
        assert!(state.cull);
        glass.draw(MeshKind::Cylinder);
    }

    assert_eq!(frame.state(), before);
}

#[test]
fn nested_scopes_unwind_one_level_at_a_time() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));

    {
        let mut outer = frame.translucent();
        let translucent = outer.state();
        {
            let mut inner = outer.emissive(Emission::Glow);
            let glow = inner.state();
            assert_eq!(glow.blend_func, BlendFunc::Additive);
            assert!(!glow.depth_test);
            assert!(!glow.lighting);
            assert_eq!(inner.saved(), translucent);
        }
        assert_eq!(outer.state(), translucent);
    }
    assert_eq!(frame.state(), RenderPassState::OPAQUE);
}

fn draw_until_missing(frame: &mut Frame<'_, Recorder>, meshes: &[Option<MeshKind>]) -> Option<()> {
    let mut glass = frame.translucent();
    for mesh in meshes {
        glass.draw((*mesh)?);
    }
    Some(())
}

#[test]
fn early_return_still_restores() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));

    let done = draw_until_missing(
        &mut frame,
        &[Some(MeshKind::Cylinder), None, Some(MeshKind::Sphere)],
    );
    assert_eq!(done, None);
    assert_eq!(frame.draws(), 1);
    assert_eq!(frame.state(), RenderPassState::OPAQUE);
}

#[test]
fn emissive_toggles_the_lighting_uniform() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    {
        let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
        let mut bulb = frame.emissive(Emission::Unlit);
        bulb.draw(MeshKind::Sphere);
    }

    assert_eq!(
        sink.writes_to(Uniform::UseLighting),
        vec![
            UniformValue::Bool(true),
            UniformValue::Bool(false),
            UniformValue::Bool(true),
        ]
    );
    let bulb = &sink.draws[0];
    assert_eq!(bulb.get(Uniform::UseLighting), Some(UniformValue::Bool(false)));
    // unlit keeps the opaque blend and depth settings
    assert!(!bulb.state.blend);
    assert!(bulb.state.depth_write);
}

#[test]
fn leaked_scope_is_repaired_when_the_frame_ends() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    {
        let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
        std::mem::forget(frame.emissive(Emission::Glow));
        assert_eq!(frame.kind(), PassKind::EmissiveOverlay);
    }
    assert_eq!(
        sink.last_call(),
        Some(&Call::Set(Uniform::UseLighting, UniformValue::Bool(true)))
    );
}

#[test]
fn per_part_cull_face_is_scoped_to_the_part() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    let shade = Section::new(
        "shade",
        SectionPass::Translucent,
        vec![
            Part::flat("a", MeshKind::Cylinder, Transform::default(), [1.0; 4]).culled(Face::Front),
            Part::flat("b", MeshKind::Cylinder, Transform::default(), [1.0; 4]),
        ],
    );
    {
        let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
        frame.draw_section(&shade);
        assert_eq!(frame.state(), RenderPassState::OPAQUE);
    }

    assert_eq!(sink.draws[0].state.cull_face, Face::Front);
    assert_eq!(sink.draws[1].state.cull_face, Face::Back);
    assert!(sink.draws.iter().all(|d| d.state.cull && d.state.blend));
}

#[test]
fn opaque_culling_can_be_switched_per_object() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    {
        let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
        {
            let mut culled = frame.culled(Face::Front);
            culled.draw(MeshKind::Box);
            culled.unculled().draw(MeshKind::Box);
            assert!(culled.state().cull);
        }
        assert_eq!(frame.state(), RenderPassState::OPAQUE);
        frame.draw(MeshKind::Box);
    }

    let (culled, open, after) = (
        &sink.draws[0].state,
        &sink.draws[1].state,
        &sink.draws[2].state,
    );
    assert!(culled.cull);
    assert_eq!(culled.cull_face, Face::Front);
    assert!(!open.cull);
    assert_eq!(culled.pipeline_key().cull, Some(Face::Front));
    assert_eq!(open.pipeline_key().cull, None);
    assert_eq!(*after, RenderPassState::OPAQUE);
}

#[test]
fn culling_inside_translucency_is_undone_with_it() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    {
        let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
        {
            let mut glass = frame.translucent();
            let translucent = glass.state();
            {
                let mut inner = glass.culled(Face::Front);
                assert_eq!(inner.saved(), translucent);
                inner.draw(MeshKind::Sphere);
            }
            assert_eq!(glass.state(), translucent);
        }
        assert_eq!(frame.state(), RenderPassState::OPAQUE);
    }

    let inner = &sink.draws[0].state;
    assert!(inner.blend && inner.cull);
    assert_eq!(inner.cull_face, Face::Front);
}

#[test]
fn finish_reports_the_draw_count() {
    let (textures, materials) = registries();
    let mut sink = Recorder::new();
    let mut frame = Frame::begin(&mut sink, ShaderBinder::new(&textures, &materials));
    frame.draw(MeshKind::Plane);
    frame.draw(MeshKind::Plane);
    assert_eq!(frame.finish(), 2);
}
