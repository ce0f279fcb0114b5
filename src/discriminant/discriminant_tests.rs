pub(crate) use super::*;
use crate::distribution::IdGenerator;

fn dist(ids: &mut IdGenerator, mean: &[f64], cov: Matrix<f64>) -> Distribution {
    Distribution::with_parameters(ids, mean.to_vec(), cov, "").expect("valid parameters")
}

fn sym2(a: f64, b: f64, d: f64) -> Matrix<f64> {
    Matrix::from_vec(2, 2, vec![a, b, b, d]).expect("2x2")
}

#[test]
fn test_method_codes() {
    for code in 0..=3 {
        let m = DiscriminantMethod::from_code(code).expect("known code");
        assert_eq!(m.code(), code);
    }
    let err = DiscriminantMethod::from_code(4).expect_err("unknown");
    assert!(matches!(err, GaussBayesError::UnknownMethod { .. }));
    assert!(DiscriminantMethod::from_code(-1).is_err());
}

#[test]
fn test_method_from_str() {
    assert_eq!(
        "linear".parse::<DiscriminantMethod>().expect("known"),
        DiscriminantMethod::Linear
    );
    assert_eq!(
        "min_distance".parse::<DiscriminantMethod>().expect("alias"),
        DiscriminantMethod::MinimumDistance
    );
    assert_eq!(
        "3".parse::<DiscriminantMethod>().expect("numeric code"),
        DiscriminantMethod::Quadratic
    );
    assert!("cubic".parse::<DiscriminantMethod>().is_err());
    assert_eq!(DiscriminantMethod::Quadratic.to_string(), "quadratic");
    assert!(!DiscriminantMethod::Auto.is_concrete());
}

#[test]
fn test_auto_selects_minimum_distance_for_scaled_identity() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], Matrix::from_diag(&[2.0, 2.0]));
    let b = dist(&mut ids, &[3.0, 3.0], Matrix::from_diag(&[2.0005, 2.0]));
    let engine = DiscriminantEngine::default();
    assert_eq!(engine.select_method(&a, &b), DiscriminantMethod::MinimumDistance);
}

#[test]
fn test_auto_selects_linear_for_equal_general_covariance() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], sym2(2.0, 0.5, 1.0));
    let b = dist(&mut ids, &[3.0, 3.0], sym2(2.0, 0.5, 1.0));
    let engine = DiscriminantEngine::default();
    assert_eq!(engine.select_method(&a, &b), DiscriminantMethod::Linear);

    // Diagonal but anisotropic is still linear.
    let c = dist(&mut ids, &[0.0, 0.0], Matrix::from_diag(&[1.0, 4.0]));
    let d = dist(&mut ids, &[1.0, 1.0], Matrix::from_diag(&[1.0, 4.0]));
    assert_eq!(engine.select_method(&c, &d), DiscriminantMethod::Linear);
}

#[test]
fn test_auto_selects_quadratic_for_unequal_covariance() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], Matrix::eye(2));
    let b = dist(&mut ids, &[3.0, 3.0], Matrix::from_diag(&[1.01, 1.0]));
    let engine = DiscriminantEngine::default();
    assert_eq!(engine.select_method(&a, &b), DiscriminantMethod::Quadratic);

    let g = engine
        .derive(DiscriminantMethod::Auto, [&a, &b], [0.5, 0.5])
        .expect("invertible");
    assert_eq!(g.method(), DiscriminantMethod::Quadratic);
}

#[test]
fn test_linear_coefficients() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[2.0, 4.0], Matrix::from_diag(&[2.0, 4.0]));
    let b = dist(&mut ids, &[0.0, 0.0], Matrix::from_diag(&[2.0, 4.0]));
    let g = DiscriminantEngine::default()
        .derive(DiscriminantMethod::Linear, [&a, &b], [0.25, 0.75])
        .expect("invertible");

    let Discriminant::Linear(terms) = &g else {
        panic!("expected linear discriminant, got {:?}", g.method());
    };
    // w = Σ⁻¹μ = [1, 1]; μᵗΣ⁻¹μ = 2 + 4 = 6
    assert!((terms[0].w[0] - 1.0).abs() < 1e-12);
    assert!((terms[0].w[1] - 1.0).abs() < 1e-12);
    assert!((terms[0].w0 - (-3.0 + 0.25_f64.ln())).abs() < 1e-12);
    assert!((terms[1].w0 - 0.75_f64.ln()).abs() < 1e-12);
}

#[test]
fn test_quadratic_matches_closed_form() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[1.0, -1.0], sym2(2.0, 0.3, 1.5));
    let b = dist(&mut ids, &[-2.0, 0.5], sym2(0.5, -0.1, 3.0));
    let priors = [0.4, 0.6];
    let g = DiscriminantEngine::default()
        .derive(DiscriminantMethod::Quadratic, [&a, &b], priors)
        .expect("invertible");

    let x = [0.3, 0.7];
    for (i, d) in [&a, &b].into_iter().enumerate() {
        let inv = d.covariance().inverse().expect("invertible");
        let diff = d.mean().checked_sub(&x).expect("2-D");
        let mahalanobis = inv.quadratic_form(diff.as_slice()).expect("2x2");
        // Gaussian log-density without the 2π term.
        let expected =
            -0.5 * mahalanobis - 0.5 * d.covariance().determinant().ln() + priors[i].ln();
        let actual = g.class_score(i, &x).expect("2-D point");
        assert!((actual - expected).abs() < 1e-9, "class {i}: {actual} vs {expected}");
    }
}

#[test]
fn test_minimum_distance_scores_and_tie_break() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], Matrix::eye(2));
    let b = dist(&mut ids, &[2.0, 0.0], Matrix::eye(2));
    let g = DiscriminantEngine::default()
        .derive(DiscriminantMethod::MinimumDistance, [&a, &b], [0.5, 0.5])
        .expect("no inversion needed");

    // -(1) - (-(9)) = 8
    assert!((g.score(&[-1.0, 0.0]).expect("2-D") - 8.0).abs() < 1e-12);
    // Equidistant point: g = 0 goes to class 1.
    let (decision, score) = g.decide(&[1.0, 0.0]).expect("2-D");
    assert_eq!(score, 0.0);
    assert_eq!(decision, Decision::Second);
    assert_eq!(Decision::from_score(1e-300), Decision::First);
}

#[test]
fn test_singular_covariance_is_reported() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], sym2(1.0, 1.0, 1.0));
    let b = dist(&mut ids, &[1.0, 1.0], sym2(1.0, 1.0, 1.0));
    let engine = DiscriminantEngine::default();

    for method in [DiscriminantMethod::Linear, DiscriminantMethod::Quadratic] {
        let err = engine.derive(method, [&a, &b], [0.5, 0.5]).expect_err("singular");
        assert!(err.is_singular(), "{method}: {err}");
    }
    // Minimum distance never inverts, so it is the fallback.
    assert!(engine
        .derive(DiscriminantMethod::MinimumDistance, [&a, &b], [0.5, 0.5])
        .is_ok());
}

#[test]
fn test_quadratic_rejects_negative_determinant() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], Matrix::from_diag(&[1.0, -1.0]));
    let b = dist(&mut ids, &[1.0, 1.0], Matrix::eye(2));
    let err = DiscriminantEngine::default()
        .derive(DiscriminantMethod::Quadratic, [&a, &b], [0.5, 0.5])
        .expect_err("det < 0");
    assert!(matches!(err, GaussBayesError::SingularCovariance { det } if det < 0.0));
}

#[test]
fn test_derive_is_idempotent() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[1.0, 2.0], sym2(1.2, 0.4, 0.9));
    let b = dist(&mut ids, &[-1.0, 0.0], sym2(0.7, 0.1, 2.2));
    let engine = DiscriminantEngine::default();
    for method in [
        DiscriminantMethod::MinimumDistance,
        DiscriminantMethod::Linear,
        DiscriminantMethod::Quadratic,
    ] {
        let first = engine.derive(method, [&a, &b], [0.3, 0.7]).expect("invertible");
        let second = engine.derive(method, [&a, &b], [0.3, 0.7]).expect("invertible");
        assert_eq!(first, second);
    }
}

#[test]
fn test_derive_validates_inputs() {
    let mut ids = IdGenerator::new();
    let a = dist(&mut ids, &[0.0, 0.0], Matrix::eye(2));
    let b = dist(&mut ids, &[0.0, 0.0, 0.0], Matrix::eye(3));
    let engine = DiscriminantEngine::default();
    assert!(matches!(
        engine.derive(DiscriminantMethod::Auto, [&a, &b], [0.5, 0.5]),
        Err(GaussBayesError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        engine.derive(DiscriminantMethod::Auto, [&a, &a], [0.0, 1.0]),
        Err(GaussBayesError::InvalidArgument { .. })
    ));

    let g = engine
        .derive(DiscriminantMethod::Linear, [&a, &a], [0.5, 0.5])
        .expect("identity");
    assert!(g.score(&[1.0]).is_err());
    assert!(g.class_score(2, &[1.0, 1.0]).is_err());
}
