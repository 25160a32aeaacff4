use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("adf-babel")
        .join("tests")
        .join("fixtures")
        .join(name)
}
