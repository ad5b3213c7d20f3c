//! The lamp room, bottom to top.
//!
//! Coordinates are world units with Y up and the cabinet front facing +Z.
//! The shade and the halo are drawn last so blending sees everything opaque.

use super::part::{Part, Section, SectionPass};
use crate::{
    mesh::MeshKind::{self, *},
    pass::{Emission, Face},
    transform::Transform,
};

const BLACK_TRIM: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
const GOLD: [f32; 4] = [0.85, 0.65, 0.2, 1.0];
const PLASTIC: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const GLASS_TINT: [f32; 4] = [0.85, 0.90, 1.0, 0.38];

/// Centre line of the lamp.
const LAMP_Z: f32 = -3.5;

fn at(scale: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(scale, [0.0; 3], position)
}

fn rotated(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(scale, rotation, position)
}

fn trim(name: &'static str, scale: [f32; 3], position: [f32; 3]) -> Part {
    Part::flat(name, Box, at(scale, position), BLACK_TRIM)
}

fn gold(name: &'static str, mesh: MeshKind, transform: Transform) -> Part {
    Part::flat(name, mesh, transform, GOLD)
}

pub fn room() -> Vec<Section> {
    vec![
        Section::new("backdrop", SectionPass::Opaque, backdrop()),
        Section::new("mirror", SectionPass::Opaque, mirror()),
        Section::new("cabinet", SectionPass::Opaque, cabinet()),
        Section::new("clasp", SectionPass::Opaque, clasp()),
        Section::new("decorative box", SectionPass::Opaque, decorative_box()),
        Section::new("lamp base", SectionPass::Opaque, lamp_base()),
        Section::new("lamp stem", SectionPass::Opaque, lamp_stem()),
        Section::new("bulb", SectionPass::Emissive(Emission::Unlit), bulb()),
        Section::new("switch", SectionPass::Opaque, switch()),
        Section::new("glass shade", SectionPass::Translucent, glass_shade()),
        Section::new("halo", SectionPass::Emissive(Emission::Glow), halo()),
    ]
}

fn backdrop() -> Vec<Part> {
    vec![
        Part::textured(
            "floor",
            Plane,
            at([8.0, 1.0, 6.0], [0.0, 0.0, 0.0]),
            "floorMat",
            "Floor",
            [3.0, 3.0],
        ),
        Part::textured(
            "wall",
            Plane,
            rotated([8.0, 1.0, 12.0], [-90.0, 0.0, 0.0], [0.0, 12.0, -6.0]),
            "wallMat",
            "Wall",
            [2.0, 2.0],
        )
        .tinted(WHITE),
    ]
}

/// Zebra tiles around the mirror, rotated so the stripes alternate.
fn mirror() -> Vec<Part> {
    let tiles: [([f32; 2], f32); 12] = [
        ([-1.8, 16.0], -90.0),
        ([-0.6, 16.0], 0.0),
        ([0.6, 16.0], -90.0),
        ([1.8, 16.0], 0.0),
        ([-1.8, 14.8], 180.0),
        ([-1.8, 13.6], 270.0),
        ([-1.8, 12.4], 180.0),
        ([1.8, 14.8], 90.0),
        ([1.8, 13.6], 0.0),
        ([1.8, 12.4], 90.0),
        ([-0.6, 12.4], 90.0),
        ([0.6, 12.4], 180.0),
    ];
    let mut parts: Vec<Part> = tiles
        .iter()
        .map(|&([x, y], rot_z)| {
            Part::textured(
                "frame tile",
                Box,
                rotated([1.2, 1.2, 0.15], [0.0, 0.0, rot_z], [x, y, -5.90]),
                "zebraMat",
                "ZebraFur",
                [1.0, 1.0],
            )
        })
        .collect();
    parts.push(Part::textured(
        "mirror glass",
        Box,
        at([2.4, 2.4, 0.1], [0.0, 14.2, -5.92]),
        "mirrorMat",
        "Mirror",
        [1.0, 1.0],
    ));
    parts
}

fn cabinet() -> Vec<Part> {
    let mut parts = Vec::new();

    for (x, z) in [(-2.8, -0.7), (2.8, -0.7), (-2.8, -5.3), (2.8, -5.3)] {
        parts.push(trim("peg", [0.4, 1.0, 0.4], [x, 0.5, z]));
    }

    parts.push(Part::textured(
        "cabinet body",
        Box,
        at([6.0, 4.5, 5.0], [0.0, 3.25, -3.0]),
        "mirrorMat",
        "Mirror",
        [1.0, 1.0],
    ));
    parts.push(Part::textured(
        "top panel",
        Box,
        at([5.6, 0.325, 4.6], [0.0, 5.66, -3.0]),
        "mirrorMat",
        "Mirror",
        [1.0, 1.0],
    ));

    // overhang around the top panel
    parts.push(trim("overhang front", [6.4, 0.325, 0.5], [0.0, 5.66, -0.445]));
    parts.push(trim("overhang back", [6.4, 0.325, 0.5], [0.0, 5.66, -5.55]));
    parts.push(trim("overhang left", [0.41, 0.325, 4.7], [-3.0, 5.66, -3.0]));
    parts.push(trim("overhang right", [0.41, 0.325, 4.7], [3.0, 5.66, -3.0]));

    parts.push(trim("front edge", [0.2, 4.5, 0.5], [-3.0, 3.25, -0.65]));
    parts.push(trim("front edge", [0.2, 4.5, 0.5], [3.0, 3.25, -0.65]));
    parts.push(trim("bottom edge", [6.0, 0.2, 0.1], [0.0, 1.1, -0.45]));

    for x in [3.0, -3.0] {
        parts.push(trim("side top", [0.2, 0.5, 4.2], [x, 5.3, -3.0]));
        parts.push(trim("side back", [0.2, 4.5, 0.5], [x, 3.25, -5.35]));
        parts.push(trim("side bottom", [0.2, 0.5, 4.2], [x, 1.25, -3.0]));
    }

    parts.push(trim("door frame", [0.2, 4.3, 0.1], [-2.2, 3.35, -0.45]));
    parts.push(trim("door frame", [0.2, 4.3, 0.1], [2.2, 3.35, -0.45]));
    parts.push(trim("door frame", [4.2, 0.2, 0.1], [0.0, 5.1, -0.45]));
    parts.push(trim("door frame", [4.2, 0.2, 0.1], [0.0, 1.6, -0.45]));

    // left door first, then right
    for (outer, inner, centre) in [(-2.0, -0.1, -1.1), (0.1, 2.0, 1.1)] {
        parts.push(trim("door trim", [0.3, 2.7, 0.1], [outer, 3.35, -0.45]));
        parts.push(trim("door trim", [0.3, 2.7, 0.1], [inner, 3.35, -0.45]));
        parts.push(trim("door trim", [2.2, 0.3, 0.1], [centre, 4.84, -0.45]));
        parts.push(trim("door trim", [2.2, 0.3, 0.1], [centre, 1.86, -0.45]));
    }

    for x in [-1.1, 1.1] {
        parts.push(Part::flat(
            "door ring",
            Torus,
            at([0.4, 0.4, 0.25], [x, 3.35, -0.45]),
            BLACK_TRIM,
        ));
    }

    for (x, outer, inner) in [(-1.1, -1.75, -0.45), (1.1, 1.75, 0.45)] {
        parts.push(trim("ring spoke", [0.2, 1.1, 0.1], [x, 4.3, -0.45]));
        parts.push(trim("ring spoke", [0.2, 1.1, 0.1], [x, 2.4, -0.45]));
        parts.push(trim("ring spoke", [0.4, 0.2, 0.1], [outer, 3.35, -0.45]));
        parts.push(trim("ring spoke", [0.4, 0.2, 0.1], [inner, 3.35, -0.45]));
    }

    parts
}

/// Gold clasp where the two doors meet.
fn clasp() -> Vec<Part> {
    let mut parts = Vec::new();

    for x in [-0.125, 0.125] {
        parts.push(gold(
            "clasp plate",
            Pyramid3,
            rotated([0.15; 3], [20.0, 0.0, 180.0], [x, 3.30, -0.435]),
        ));
        parts.push(gold(
            "clasp plate",
            Pyramid3,
            rotated([0.15; 3], [20.0, 0.0, 0.0], [x, 3.35, -0.435]),
        ));
    }

    let rivets = [
        [-0.185, 3.39],
        [-0.06, 3.39],
        [-0.19, 3.26],
        [-0.06, 3.26],
        [0.06, 3.39],
        [0.185, 3.39],
        [0.06, 3.26],
        [0.185, 3.26],
    ];
    for [x, y] in rivets {
        parts.push(gold("rivet", Sphere, Transform::scaled(0.02, [x, y, -0.40])));
    }

    for (side, pins, bar_x, ends) in [
        (-0.125, [-0.13, -0.12], -0.112, [-0.138, -0.114]),
        (0.125, [0.13, 0.12], 0.14, [0.138, 0.114]),
    ] {
        for x in pins {
            parts.push(gold(
                "pin",
                Cylinder,
                rotated([0.005, 0.03, 0.005], [90.0, 0.0, 0.0], [x, 3.33, -0.39]),
            ));
            parts.push(gold(
                "pin loop",
                Torus,
                rotated([0.005; 3], [180.0, 90.0, 0.0], [x, 3.33, -0.36]),
            ));
            parts.push(gold("pin head", Sphere, Transform::scaled(0.0055, [x, 3.33, -0.36])));
        }
        parts.push(gold(
            "pendant loop",
            Torus,
            rotated([0.006; 3], [180.0, 90.0, 0.0], [side, 3.328, -0.36]),
        ));
        parts.push(gold(
            "pendant",
            TaperedCylinder,
            at([0.02, 0.11, 0.000001], [side, 3.215, -0.36]),
        ));
        parts.push(gold(
            "pendant bar",
            Cylinder,
            rotated([0.004, 0.025, 0.004], [0.0, 0.0, 90.0], [bar_x, 3.22, -0.356]),
        ));
        for x in ends {
            parts.push(gold("bar end", Sphere, Transform::scaled(0.0045, [x, 3.22, -0.356])));
        }
    }

    parts
}

fn decorative_box() -> Vec<Part> {
    vec![
        Part::textured(
            "box base",
            Box,
            at([3.6, 1.3, 3.0], [0.0, 6.45, LAMP_Z]),
            "chevronMat",
            "ChevronFur",
            [2.0, 1.0],
        ),
        Part::textured(
            "box lid",
            Box,
            at([3.6, 0.3, 3.0], [0.0, 7.25, LAMP_Z]),
            "boxFurMat",
            "BoxFur",
            [1.0, 1.0],
        ),
    ]
}

/// Stacked copper rings. Each piece gets its own UV scale so the grain does
/// not line up between neighbours.
fn lamp_base() -> Vec<Part> {
    let pieces: [(MeshKind, [f32; 3], f32, f32); 11] = [
        (Cylinder, [1.15, 0.1, 1.15], 7.35, 1.6),
        (Cylinder, [1.1, 0.3, 1.1], 7.41, 1.4),
        (Cylinder, [0.9, 0.1, 0.9], 7.71, 1.7),
        (Cylinder, [0.625, 0.1, 0.625], 7.80, 1.8),
        (Torus, [0.55; 3], 7.94, 1.5),
        (Cylinder, [0.56, 0.05, 0.56], 8.05, 2.0),
        (Cylinder, [0.4, 0.2, 0.4], 8.10, 1.9),
        (Cylinder, [0.5, 0.2, 0.5], 8.30, 1.6),
        (Torus, [0.35; 3], 8.55, 1.7),
        (Cylinder, [0.6, 0.2, 0.6], 8.60, 1.8),
        (Cylinder, [0.4, 0.2, 0.4], 8.8, 2.2),
    ];
    pieces
        .iter()
        .map(|&(mesh, scale, y, uv)| {
            // tori are modelled lying in XY
            let rot_x = if mesh == Torus { 90.0 } else { 0.0 };
            Part::textured(
                "copper base",
                mesh,
                rotated(scale, [rot_x, 0.0, 0.0], [0.0, y, LAMP_Z]),
                "copper",
                "Copper",
                [uv, uv],
            )
            .tinted(WHITE)
        })
        .collect()
}

fn lamp_stem() -> Vec<Part> {
    let plastic = |name, mesh, transform| {
        Part::flat(name, mesh, transform, PLASTIC).with_material("plasticBlack")
    };
    vec![
        plastic("stem", Cylinder, at([0.12, 0.45, 0.12], [0.0, 8.9, LAMP_Z])),
        plastic(
            "stem collar",
            Torus,
            rotated([0.15; 3], [90.0, 0.0, 0.0], [0.0, 9.35, LAMP_Z]),
        ),
        plastic("socket", Cylinder, at([0.18, 0.2, 0.18], [0.0, 9.35, LAMP_Z])),
        plastic("socket", Cylinder, at([0.22, 0.1, 0.22], [0.0, 9.50, LAMP_Z])),
        plastic("socket", Cylinder, at([0.15, 0.2, 0.15], [0.0, 9.60, LAMP_Z])),
        Part::flat(
            "bulb neck",
            Cylinder,
            at([0.08, 0.06, 0.08], [0.0, 9.8, LAMP_Z]),
            [0.4, 0.4, 0.4, 1.0],
        ),
    ]
}

fn bulb() -> Vec<Part> {
    vec![Part::flat(
        "bulb",
        Sphere,
        at([0.22, 0.32, 0.22], [0.0, 10.15, LAMP_Z]),
        [1.3, 1.1, 0.65, 1.0],
    )]
}

fn switch() -> Vec<Part> {
    vec![
        Part::flat(
            "switch stem",
            Cylinder,
            rotated([0.03, 0.8, 0.03], [0.0, 0.0, 90.0], [0.9, 9.55, LAMP_Z]),
            PLASTIC,
        )
        .with_material("plasticBlack"),
        Part::flat(
            "switch cap",
            Cylinder,
            rotated([0.1, 0.05, 0.1], [0.0, 0.0, 90.0], [0.95, 9.55, LAMP_Z]),
            [0.1, 0.1, 0.1, 1.0],
        )
        .with_material("plasticBlack"),
    ]
}

/// Inner funnel, then the inside wall of the shade, then its outside.
fn glass_shade() -> Vec<Part> {
    let glass = |name, mesh, scale, y, uv: f32, face| {
        Part::textured(
            name,
            mesh,
            at(scale, [0.0, y, LAMP_Z]),
            "glass",
            "FrostedGlass",
            [uv, uv],
        )
        .tinted(GLASS_TINT)
        .culled(face)
    };
    vec![
        // negative Y turns the taper upside down
        glass("glass funnel", TaperedCylinder, [0.30, -1.34, 0.30], 9.46, 1.4, Face::Back),
        glass("glass inner", Cylinder, [0.796, 2.52, 0.796], 9.40, 1.1, Face::Front),
        glass("glass outer", Cylinder, [0.8, 2.5, 0.8], 9.40, 1.2, Face::Back),
    ]
}

fn halo() -> Vec<Part> {
    vec![Part::flat(
        "halo",
        Sphere,
        at([0.32, 0.44, 0.32], [0.0, 10.15, LAMP_Z]),
        [0.22, 0.19, 0.08, 1.0],
    )]
}
