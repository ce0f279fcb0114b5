//! Property-based tests using proptest.
//!
//! These tests verify invariants of the discriminants, the classifier, and
//! the error bound.

use gaussbayes::prelude::*;
use proptest::prelude::*;

// Symmetric positive definite 2x2 covariances (diagonally dominant).
fn covariance_strategy() -> impl Strategy<Value = Matrix<f64>> {
    (0.5f64..5.0, 0.5f64..5.0, -0.3f64..0.3).prop_map(|(a, d, off)| {
        Matrix::from_vec(2, 2, vec![a, off, off, d]).expect("Test data should be valid")
    })
}

fn mean_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-10.0f64..10.0, 2)
}

fn prior_pair() -> impl Strategy<Value = (f64, f64)> {
    (0.05f64..0.95).prop_map(|p| (p, 1.0 - p))
}

fn class(ids: &mut IdGenerator, mean: Vec<f64>, cov: Matrix<f64>) -> Distribution {
    Distribution::with_parameters(ids, mean, cov, "").expect("Test data should be valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bound_is_symmetric_under_class_swap(
        m0 in mean_strategy(),
        m1 in mean_strategy(),
        c0 in covariance_strategy(),
        c1 in covariance_strategy(),
        (p0, p1) in prior_pair(),
    ) {
        let mut ids = IdGenerator::new();
        let a = class(&mut ids, m0, c0);
        let b = class(&mut ids, m1, c1);

        let forward = bhattacharyya_bound(&a, &b, p0, p1).expect("SPD covariances");
        let backward = bhattacharyya_bound(&b, &a, p1, p0).expect("SPD covariances");
        prop_assert!((forward.k - backward.k).abs() < 1e-9);
        prop_assert!((forward.error_bound - backward.error_bound).abs() < 1e-12);
        prop_assert!(forward.k >= -1e-12);
        prop_assert!(forward.error_bound <= (p0 * p1).sqrt() + 1e-12);
    }

    #[test]
    fn derivation_is_idempotent(
        m0 in mean_strategy(),
        m1 in mean_strategy(),
        c0 in covariance_strategy(),
        c1 in covariance_strategy(),
        (p0, p1) in prior_pair(),
    ) {
        let mut ids = IdGenerator::new();
        let a = class(&mut ids, m0, c0);
        let b = class(&mut ids, m1, c1);
        let engine = DiscriminantEngine::default();

        for method in [DiscriminantMethod::Linear, DiscriminantMethod::Quadratic] {
            let first = engine.derive(method, [&a, &b], [p0, p1]).expect("invertible");
            let second = engine.derive(method, [&a, &b], [p0, p1]).expect("invertible");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn misclassification_counts_match_points(
        m0 in mean_strategy(),
        m1 in mean_strategy(),
        c0 in covariance_strategy(),
        c1 in covariance_strategy(),
        (p0, p1) in prior_pair(),
        seed in any::<u64>(),
    ) {
        let mut ids = IdGenerator::new();
        let mut a = class(&mut ids, m0, c0).with_sampler(GaussianSampler::seeded(seed));
        let mut b = class(&mut ids, m1, c1)
            .with_sampler(GaussianSampler::seeded(seed.wrapping_add(1)));
        a.generate_samples(40, None, None).expect("valid");
        b.generate_samples(40, None, None).expect("valid");

        let classifier = Classifier::new(vec![a, b], Some(vec![p0, p1])).expect("valid priors");
        let result = classifier
            .classify_two_classes(DiscriminantMethod::Auto)
            .expect("SPD covariances");

        let wrong = result.points.iter().filter(|p| p.is_misclassified()).count();
        prop_assert_eq!(result.total_misclassified(), wrong);
        prop_assert_eq!(result.points.len(), 80);
        for point in &result.points {
            let expected = if point.score > 0.0 { result.class_ids[0] } else { result.class_ids[1] };
            prop_assert_eq!(point.assigned, expected);
        }
    }

    #[test]
    fn identical_classes_follow_larger_prior(
        mean in mean_strategy(),
        cov in covariance_strategy(),
        p0 in 0.05f64..0.95,
        seed in any::<u64>(),
    ) {
        prop_assume!((p0 - 0.5).abs() > 1e-6);
        let mut ids = IdGenerator::new();
        let mut a = class(&mut ids, mean.clone(), cov.clone())
            .with_sampler(GaussianSampler::seeded(seed));
        a.generate_samples(20, None, None).expect("valid");
        let mut b = class(&mut ids, mean, cov);
        for sample in a.samples().to_vec() {
            b.add_sample(sample).expect("2-D");
        }
        let (a_id, b_id) = (a.id(), b.id());

        let classifier = Classifier::new(vec![a, b], Some(vec![p0, 1.0 - p0])).expect("valid");
        let winner = if p0 > 0.5 { a_id } else { b_id };
        for method in [DiscriminantMethod::Linear, DiscriminantMethod::Quadratic] {
            let result = classifier.classify_two_classes(method).expect("invertible");
            prop_assert!(result.points.iter().all(|p| p.assigned == winner));
        }
    }

    #[test]
    fn inverse_recovers_identity(cov in covariance_strategy()) {
        let inv = cov.inverse().expect("SPD");
        for x in [[1.0, 0.0], [0.0, 1.0]] {
            let back = cov.matvec(inv.matvec(&x).expect("2").as_slice()).expect("2");
            prop_assert!((back[0] - x[0]).abs() < 1e-9 && (back[1] - x[1]).abs() < 1e-9);
        }
        prop_assert!(inv.is_symmetric(1e-9));
        prop_assert!((cov.determinant() * inv.determinant() - 1.0).abs() < 1e-9);
    }
}
