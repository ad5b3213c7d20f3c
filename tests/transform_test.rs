use approx::assert_abs_diff_eq;
use lamplight::{
    cgmath::{Matrix4, Vector3, Vector4},
    transform::{Transform, compose},
};

fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
    Vector3::new(x, y, z)
}

fn apply(m: Matrix4<f32>, p: [f32; 3]) -> [f32; 3] {
    let v = m * Vector4::new(p[0], p[1], p[2], 1.0);
    [v.x, v.y, v.z]
}

fn assert_point(actual: [f32; 3], expected: [f32; 3]) {
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-5);
    }
}

#[test]
fn scale_then_rotate_then_translate() {
    let m = compose(v(2.0, 1.0, 1.0), 0.0, 90.0, 0.0, v(1.0, 0.0, 0.0));
    assert_point(apply(m, [1.0, 0.0, 0.0]), [1.0, 0.0, -2.0]);
}

#[test]
fn rotations_apply_x_first_then_y_then_z() {
    let m = compose(v(1.0, 1.0, 1.0), 90.0, 0.0, 90.0, v(0.0, 0.0, 0.0));
    // X turns +Y into +Z, Z leaves +Z alone
    assert_point(apply(m, [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    // X leaves +X alone, Z turns it into +Y
    assert_point(apply(m, [1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);
}

#[test]
fn zero_and_negative_scale_are_accepted() {
    let flat = compose(v(1.0, 0.0, 1.0), 0.0, 0.0, 0.0, v(0.0, 3.0, 0.0));
    assert_point(apply(flat, [5.0, 5.0, 5.0]), [5.0, 3.0, 5.0]);

    let mirrored = Transform::new([1.0, -1.0, 1.0], [0.0; 3], [0.0; 3]).to_matrix();
    assert_point(apply(mirrored, [0.0, 2.0, 0.0]), [0.0, -2.0, 0.0]);
}

#[test]
fn transform_matches_compose() {
    let t = Transform::new([0.5, 2.0, 1.0], [10.0, 20.0, 30.0], [1.0, -2.0, 3.0]);
    let m = compose(v(0.5, 2.0, 1.0), 10.0, 20.0, 30.0, v(1.0, -2.0, 3.0));
    assert_eq!(t.to_matrix(), m);
}
