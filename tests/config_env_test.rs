//! Environment variable overrides for Settings.
//!
//! Kept in its own test binary so that setting `FBTREE_*` variables cannot
//! race with the file-based config tests.

use std::env;
use std::fs;

use tempfile::TempDir;

use fbtree::config::Settings;

#[test]
fn given_fbtree_env_vars_when_loading_then_they_override_config_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("fbtree.toml");
    fs::write(&path, "tree_file = \"/from/file.bin\"\ncreate_dirs = true\n").unwrap();

    env::set_var("FBTREE_TEST_ROOT", temp.path());
    env::set_var("FBTREE_TREE_FILE", "${FBTREE_TEST_ROOT}/from-env.bin");
    env::set_var("FBTREE_CREATE_DIRS", "false");

    // Act
    let result = Settings::load_from(Some(&path));

    env::remove_var("FBTREE_TREE_FILE");
    env::remove_var("FBTREE_CREATE_DIRS");
    env::remove_var("FBTREE_TEST_ROOT");

    // Assert
    let settings = result.expect("load settings");
    assert_eq!(settings.tree_file, temp.path().join("from-env.bin"));
    assert!(!settings.create_dirs);
}
