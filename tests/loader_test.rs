use kiln::error::Error;
use kiln::loader::{load_template, LocalLoader, TemplateLoader, TemplateSource};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_source_from_string() {
    assert_eq!(
        TemplateSource::from_string("https://github.com/user/template.git"),
        TemplateSource::Git("https://github.com/user/template.git".to_string())
    );
    assert_eq!(
        TemplateSource::from_string("git@github.com:user/template.git"),
        TemplateSource::Git("git@github.com:user/template.git".to_string())
    );
    assert_eq!(
        TemplateSource::from_string("./templates/python"),
        TemplateSource::FileSystem(PathBuf::from("./templates/python"))
    );
}

#[test]
fn test_local_loader() {
    let dir = TempDir::new().unwrap();
    let loaded = LocalLoader::new(dir.path()).load().unwrap();

    assert_eq!(loaded.root(), dir.path().canonicalize().unwrap());
    assert!(!loaded.is_remote());
}

#[test]
fn test_missing_local_template() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = load_template(missing.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, Error::TemplateDoesNotExistsError { .. }));
}
