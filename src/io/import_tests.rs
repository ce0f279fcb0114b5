pub(crate) use super::*;
use crate::distribution::IdGenerator;

#[test]
fn test_read_samples_skips_header() {
    let text = "-1 -2 header that is not numeric\n1\t2\n3\t4\n";
    let samples = read_samples(text.as_bytes(), 2).expect("valid input");
    assert_eq!(samples, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
}

#[test]
fn test_read_samples_groups_across_lines() {
    let text = "header\n1 2 3\n4\n\n5 6 7\n";
    let samples = read_samples(text.as_bytes(), 3).expect("valid input");
    // The trailing "7" never completes a vector.
    assert_eq!(samples, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
}

#[test]
fn test_read_samples_reports_line_of_bad_token() {
    let text = "header\n1\t2\n3\tabc\n";
    let err = read_samples(text.as_bytes(), 2).expect_err("bad token");
    match err {
        GaussBayesError::Parse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("abc"));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_read_samples_empty_and_zero_dims() {
    assert!(read_samples("".as_bytes(), 2).expect("empty").is_empty());
    assert!(read_samples("only a header".as_bytes(), 2)
        .expect("header only")
        .is_empty());
    assert!(matches!(
        read_samples("h\n1 2".as_bytes(), 0),
        Err(GaussBayesError::InvalidArgument { .. })
    ));
}

#[test]
fn test_read_parameters() {
    let text = "# class a\nM\n1.5\n-2\n*\n\nC\n1.0\t0.5\n0.5\t2.0\n*\n";
    let (mean, cov) = read_parameters(text.as_bytes(), 2).expect("valid file");
    assert_eq!(mean.as_slice(), &[1.5, -2.0]);
    assert_eq!(cov.as_slice(), &[1.0, 0.5, 0.5, 2.0]);
}

#[test]
fn test_read_parameters_sigma_alias_and_order() {
    let text = "S\n4 0\n0 9\n*\nM\n0\n0\n*\n";
    let (mean, cov) = read_parameters(text.as_bytes(), 2).expect("valid file");
    assert_eq!(mean.as_slice(), &[0.0, 0.0]);
    assert_eq!(cov.get(1, 1), 9.0);
}

#[test]
fn test_read_parameters_errors() {
    let unterminated = "M\n1\n2\n";
    assert!(matches!(
        read_parameters(unterminated.as_bytes(), 2),
        Err(GaussBayesError::Parse { .. })
    ));

    let missing_cov = "M\n1\n2\n*\n";
    assert!(matches!(
        read_parameters(missing_cov.as_bytes(), 2),
        Err(GaussBayesError::Parse { .. })
    ));

    let wrong_shape = "M\n1\n2\n*\nC\n1 0 0\n0 1 0\n*\n";
    assert!(matches!(
        read_parameters(wrong_shape.as_bytes(), 2),
        Err(GaussBayesError::Parse { .. })
    ));

    let bad_number = "M\n1\ntwo\n*\nC\n1 0\n0 1\n*\n";
    match read_parameters(bad_number.as_bytes(), 2) {
        Err(GaussBayesError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_read_parameters_rejects_asymmetric_covariance() {
    let skewed = "M\n0\n0\n*\nC\n1 5\n0 1\n*\n";
    match read_parameters(skewed.as_bytes(), 2) {
        Err(GaussBayesError::Parse { line, message }) => {
            assert_eq!(line, 5);
            assert!(message.contains("symmetric"), "{message}");
        }
        other => panic!("expected Parse, got {other:?}"),
    }

    let nearly = "M\n0\n0\n*\nC\n1 0.5\n0.5002 1\n*\n";
    let (_, cov) = read_parameters(nearly.as_bytes(), 2).expect("within tolerance");
    assert_eq!(cov.get(1, 0), 0.5002);
}

#[test]
fn test_write_samples_round_trips() {
    let mut ids = IdGenerator::new();
    let mut d = Distribution::empty(&mut ids, 2, "class a").expect("2-D");
    d.add_sample(vec![0.1, -3.25]).expect("2-D");
    d.add_sample(vec![1e-7, 42.0]).expect("2-D");

    let mut buf = Vec::new();
    write_samples(&d, &mut buf).expect("in-memory write");
    let text = String::from_utf8(buf).expect("utf-8");
    assert!(text.starts_with("class a [id: 0]\n"));

    let back = read_samples(text.as_bytes(), 2).expect("own format");
    assert_eq!(back, d.samples());
}
