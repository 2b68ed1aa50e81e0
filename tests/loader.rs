use qgolden::model::loader::{load_params, save_params, write_image, MemPaths};
use qgolden::model::{Params, HIDDEN, IN_DIM};
use qgolden::{Error, GoldenNetwork};
use std::fs;
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target/qgolden-tests").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn zero_set(name: &str) -> MemPaths {
    let paths = MemPaths::in_dir(scratch(name));
    save_params(&paths, &Params::zeros()).unwrap();
    paths
}

#[test]
fn saved_params_load_back() {
    let paths = MemPaths::in_dir(scratch("roundtrip"));
    let mut p = Params::zeros();
    p.b1 = vec![-1, 2, i32::MIN as i64, i32::MAX as i64, 0, 0, 0, 5];
    p.w1 = qgolden::mem::Matrix::from_fn(IN_DIM, HIDDEN, |r, c| ((r * 8 + c) as i64 % 256) - 128);
    save_params(&paths, &p).unwrap();
    assert_eq!(fs::read_to_string(&paths.b1).unwrap().lines().next(), Some("ffffffff"));
    assert_eq!(load_params(&paths).unwrap(), p);
}

#[test]
fn one_line_short_is_shape_mismatch() {
    let paths = zero_set("short");
    write_image(&paths.b1, &[0; HIDDEN - 1], 32).unwrap();
    match load_params(&paths) {
        Err(Error::ShapeMismatch { what, expected, found }) => {
            assert!(what.ends_with("b1_q.mem"), "{what}");
            assert_eq!((expected, found), (HIDDEN, HIDDEN - 1));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn one_line_long_is_shape_mismatch() {
    let paths = zero_set("long");
    write_image(&paths.w1, &vec![0; IN_DIM * HIDDEN + 1], 8).unwrap();
    assert!(matches!(load_params(&paths), Err(Error::ShapeMismatch { expected: 512, found: 513, .. })));
}

#[test]
fn blank_lines_do_not_count() {
    let paths = zero_set("blanks");
    fs::write(&paths.b1, "0\n\n1\n2\n\n3\n4\n5\n6\n7\n\n").unwrap();
    let p = load_params(&paths).unwrap();
    assert_eq!(p.b1, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn every_missing_resource_is_named() {
    let paths = zero_set("missing");
    fs::remove_file(&paths.w2).unwrap();
    fs::remove_file(&paths.b2).unwrap();
    match GoldenNetwork::load(&paths) {
        Err(Error::ResourceMissing { paths: missing }) => assert_eq!(missing, vec![paths.w2.clone(), paths.b2.clone()]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bad_token_names_file_and_line() {
    let paths = zero_set("badtoken");
    fs::write(&paths.b2, "0\n0\n0x5\n0\n0\n0\n0\n0\n0\n0\n").unwrap();
    match load_params(&paths) {
        Err(Error::Parse { resource, line, token, .. }) => {
            assert!(resource.ends_with("b2_q.mem"));
            assert_eq!((line, token.as_str()), (3, "0x5"));
        }
        other => panic!("unexpected {other:?}"),
    }
}
