//! Reads every input format supported by the parameter source back through
//! the typed API: scalars, three-element vectors, a one-element vector, and
//! `key:value` pairs.

use simparams_core::{ErrorKind, Param, Params};

const INIFILE_CONTENT: &str = "\
my_true=true
my_false=false
my_long=8589934593
my_float=1.25
my_double=2.75
my_bool_vec=true,false,true
my_int_vec=1,2,3
my_short_vec=10
my_long_vec=1,2,8589934593
my_double_vec=1.25,2.75,3.25
my_string_vec=AAA,BBB,CC
my_true_pair=key:true
my_false_pair=key:false
my_int_pair=key:10
my_long_pair=key:8589934593
my_double_pair=key:2.75
";

fn define_and_read<T: Param + PartialEq + std::fmt::Debug>(name: &str, expected: T) {
    let mut params = Params::parse(INIFILE_CONTENT).unwrap();
    assert!(params.define::<T>(name, "parameter").ok());
    let actual: T = params.get(name).unwrap();
    assert_eq!(expected, actual);
}

macro_rules! format_case {
    ($test:ident, $ty:ty, $expected:expr) => {
        #[test]
        fn $test() {
            define_and_read::<$ty>(stringify!($test), $expected);
        }
    };
}

format_case!(my_true, bool, true);
format_case!(my_false, bool, false);
format_case!(my_long, i64, 8589934593);
format_case!(my_float, f32, 1.25);
format_case!(my_double, f64, 2.75);

format_case!(my_bool_vec, Vec<bool>, vec![true, false, true]);
format_case!(my_int_vec, Vec<i32>, vec![1, 2, 3]);
format_case!(my_short_vec, Vec<i32>, vec![10]);
format_case!(my_long_vec, Vec<i64>, vec![1, 2, 8589934593]);
format_case!(my_double_vec, Vec<f64>, vec![1.25, 2.75, 3.25]);
format_case!(
    my_string_vec,
    Vec<String>,
    vec!["AAA".to_string(), "BBB".to_string(), "CC".to_string()]
);

format_case!(my_true_pair, (String, bool), ("key".to_string(), true));
format_case!(my_false_pair, (String, bool), ("key".to_string(), false));
format_case!(my_int_pair, (String, i32), ("key".to_string(), 10));
format_case!(my_long_pair, (String, i64), ("key".to_string(), 8589934593));
format_case!(my_double_pair, (String, f64), ("key".to_string(), 2.75));

#[test]
fn every_entry_validates_as_a_string() {
    let mut params = Params::parse(INIFILE_CONTENT).unwrap();
    let names: Vec<String> = params
        .raw_source()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    for name in &names {
        assert!(params.define::<String>(name, "").ok());
    }
    assert!(params.validate().is_empty());
    assert!(params.unused().is_empty());
}

#[test]
fn missing_parameter_without_default() {
    let mut params = Params::parse(INIFILE_CONTENT).unwrap();
    assert!(params.define::<i64>("my_missing", "desc").ok());
    let err = params.get::<i64>("my_missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingValue);
}

#[test]
fn long_does_not_fit_a_short_vector() {
    let mut params = Params::parse(INIFILE_CONTENT).unwrap();
    assert!(params.define::<Vec<i32>>("my_long_vec", "").ok());
    let err = params.get::<Vec<i32>>("my_long_vec").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.ini");
    std::fs::write(&path, INIFILE_CONTENT).unwrap();

    let mut params = Params::from_file(&path).unwrap();
    assert!(params.define::<(String, i64)>("my_long_pair", "").ok());
    assert_eq!(
        params.get::<(String, i64)>("my_long_pair").unwrap(),
        ("key".to_string(), 8589934593)
    );
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.ini");
    let err = Params::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("absent.ini"));
}
