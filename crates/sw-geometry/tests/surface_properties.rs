// Differential-geometry properties that every surface must satisfy.

use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use sw_geometry::{
    CurvatureSampler, Ellipsoid, EllipticParaboloid, OneSheetedHyperboloid, ShapeParameters,
    SurfaceFrame, SurfaceGeometry,
};
use sw_math::{DVec2, DVec3};

const EPSILON: f64 = 1e-9;

fn surfaces() -> Vec<Box<dyn SurfaceGeometry>> {
    vec![
        Box::new(Ellipsoid::new(ShapeParameters::new(2.0, 1.0, 1.5))),
        Box::new(EllipticParaboloid::new(ShapeParameters::new(1.0, 2.0, 0.7))),
        Box::new(OneSheetedHyperboloid::new(ShapeParameters::new(1.2, 0.8, 1.0))),
    ]
}

/// Coordinates away from every surface's singular set.
fn generic_locals() -> Vec<DVec2> {
    let mut locals = Vec::new();
    for i in 0..6 {
        for j in 0..4 {
            locals.push(DVec2::new(0.3 + i as f64 * 1.05, 0.4 + j as f64 * 0.6));
        }
    }
    locals
}

fn generic_tangents() -> Vec<DVec2> {
    vec![
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
        DVec2::new(0.7, -0.3),
        DVec2::new(-2.0, 1.5),
    ]
}

#[test]
fn tangent_frame_is_non_degenerate() {
    for surface in surfaces() {
        for local in generic_locals() {
            let xu = surface.pushforward(local, DVec2::X);
            let xv = surface.pushforward(local, DVec2::Y);
            assert!(
                xu.cross(xv).length() > 1e-6,
                "{:?} degenerate at {:?}",
                surface.kind(),
                local
            );
        }
    }
}

#[test]
fn pushforward_is_linear() {
    for surface in surfaces() {
        let local = DVec2::new(0.9, 0.8);
        let a = DVec2::new(0.4, -1.1);
        let b = DVec2::new(2.0, 0.3);
        let lhs = surface.pushforward(local, a * 3.0 + b);
        let rhs = surface.pushforward(local, a) * 3.0 + surface.pushforward(local, b);
        assert_abs_diff_eq!(lhs, rhs, epsilon = EPSILON);
    }
}

#[test]
fn pullback_inverts_pushforward() {
    for surface in surfaces() {
        for local in generic_locals() {
            for t in generic_tangents() {
                let round_trip = surface.pullback(local, surface.pushforward(local, t));
                assert_abs_diff_eq!(round_trip, t, epsilon = EPSILON);
            }
        }
    }
}

#[test]
fn pushforward_matches_finite_differences() {
    let h = 1e-6;
    for surface in surfaces() {
        let local = DVec2::new(1.3, 0.7);
        let du = (surface.mapping(local + DVec2::new(h, 0.0))
            - surface.mapping(local - DVec2::new(h, 0.0)))
            / (2.0 * h);
        let dv = (surface.mapping(local + DVec2::new(0.0, h))
            - surface.mapping(local - DVec2::new(0.0, h)))
            / (2.0 * h);
        assert_abs_diff_eq!(surface.pushforward(local, DVec2::X), du, epsilon = 1e-6);
        assert_abs_diff_eq!(surface.pushforward(local, DVec2::Y), dv, epsilon = 1e-6);
    }
}

#[test]
fn unit_normal_is_orthogonal_to_tangents() {
    for surface in surfaces() {
        for local in generic_locals() {
            let n = surface.unit_normal(local);
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
            assert!(n.dot(surface.pushforward(local, DVec2::X)).abs() < EPSILON);
            assert!(n.dot(surface.pushforward(local, DVec2::Y)).abs() < EPSILON);
        }
    }
}

#[test]
fn second_form_matches_finite_differences() {
    let h = 1e-4;
    for surface in surfaces() {
        let local = DVec2::new(0.6, 1.1);
        let n = surface.unit_normal(local);
        let p = |du: f64, dv: f64| surface.mapping(local + DVec2::new(du, dv));
        let xuu = (p(h, 0.0) - 2.0 * p(0.0, 0.0) + p(-h, 0.0)) / (h * h);
        let xvv = (p(0.0, h) - 2.0 * p(0.0, 0.0) + p(0.0, -h)) / (h * h);
        let xuv = (p(h, h) - p(h, -h) - p(-h, h) + p(-h, -h)) / (4.0 * h * h);
        assert_abs_diff_eq!(surface.form2_e(local), xuu.dot(n), epsilon = 1e-5);
        assert_abs_diff_eq!(surface.form2_f(local), xuv.dot(n), epsilon = 1e-5);
        assert_abs_diff_eq!(surface.form2_g(local), xvv.dot(n), epsilon = 1e-5);
    }
}

#[test]
fn normal_curvature_is_even_and_scale_free() {
    for surface in surfaces() {
        for local in generic_locals() {
            let d = surface.pushforward(local, DVec2::new(0.6, -0.2));
            let k = surface.normal_curvature(local, d);
            assert_relative_eq!(k, surface.normal_curvature(local, -d), epsilon = EPSILON);
            assert_relative_eq!(k, surface.normal_curvature(local, d * 7.5), epsilon = EPSILON);
        }
    }
}

#[test]
fn unit_ellipsoid_equator_regression() {
    let unit = Ellipsoid::new(ShapeParameters::uniform(1.0));
    let p = unit.mapping(DVec2::new(0.0, PI / 2.0));
    assert_abs_diff_eq!(p, DVec3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    assert_eq!(unit.surface_point(0.0, PI / 2.0), p);
}

#[test]
fn sphere_is_umbilic_everywhere() {
    for radius in [0.5, 1.0, 3.0] {
        let sphere = Ellipsoid::sphere(radius);
        for local in generic_locals() {
            if sphere.in_singular_region(local).unwrap() {
                continue;
            }
            for t in generic_tangents() {
                let d = sphere.pushforward(local, t);
                assert_relative_eq!(
                    sphere.normal_curvature(local, d),
                    1.0 / radius,
                    epsilon = EPSILON
                );
            }

            let frame = SurfaceFrame::at(&sphere, local);
            let sampler = CurvatureSampler::new(&frame, 24).unwrap();
            assert_relative_eq!(
                sampler.gaussian_curvature(),
                1.0 / (radius * radius),
                epsilon = EPSILON
            );
            assert!(sampler.umbilical_distance().abs() < EPSILON);
        }
    }
}

#[test]
fn sphere_below_equator_keeps_positive_curvature() {
    let sphere = Ellipsoid::sphere(2.0);
    let local = DVec2::new(0.5, 1.5 * PI);
    let d = sphere.pushforward(local, DVec2::new(1.0, 1.0));
    assert_relative_eq!(sphere.normal_curvature(local, d), 0.5, epsilon = EPSILON);
}

#[test]
fn sampler_approaches_exact_principal_curvatures() {
    for surface in surfaces() {
        let local = DVec2::new(0.7, 0.9);
        let (k_max, k_min) = surface.fundamental_forms(local).principal_curvatures();
        let frame = SurfaceFrame::at(surface.as_ref(), local);

        let coarse = CurvatureSampler::new(&frame, 8).unwrap();
        let fine = CurvatureSampler::new(&frame, 720).unwrap();

        let coarse_err = (coarse.principal_max().curvature - k_max).abs()
            + (coarse.principal_min().curvature - k_min).abs();
        let fine_err = (fine.principal_max().curvature - k_max).abs()
            + (fine.principal_min().curvature - k_min).abs();

        assert!(fine_err <= coarse_err + 1e-12);
        assert!(fine_err < 1e-3, "{:?}: error {}", surface.kind(), fine_err);
        assert!(fine.principal_max().curvature <= k_max + EPSILON);
        assert!(fine.principal_min().curvature >= k_min - EPSILON);
    }
}

#[test]
fn sampled_gaussian_sign_matches_surface_type() {
    let local = DVec2::new(0.7, 0.9);
    let signs = [1.0, 1.0, -1.0];
    for (surface, sign) in surfaces().into_iter().zip(signs) {
        let frame = SurfaceFrame::at(surface.as_ref(), local);
        let sampler = CurvatureSampler::new(&frame, 90).unwrap();
        assert!(sampler.gaussian_curvature() * sign > 0.0);
        assert!(surface.fundamental_forms(local).gaussian_curvature() * sign > 0.0);
    }
}

#[test]
fn parameter_updates_reach_frames_on_recompute() {
    let mut ellipsoid = Ellipsoid::sphere(1.0);
    let local = DVec2::new(0.0, PI / 2.0);
    let before = SurfaceFrame::at(&ellipsoid, local).position();
    ellipsoid.set_parameters(ShapeParameters::new(3.0, 1.0, 1.0));
    let after = SurfaceFrame::at(&ellipsoid, local).position();
    assert_abs_diff_eq!(before, DVec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_abs_diff_eq!(after, DVec3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
}
