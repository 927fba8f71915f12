use anyhow::Result;
use classyfd::core::config::LoggingConfig;
use classyfd::core::telemetry::logging::init_logging;
use classyfd::services::fs::utils::{generate_random_name, normalize_path};
use classyfd::{Directory, Error, File, FsEntity};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_construction_normalizes_absolute_path() -> Result<()> {
    let temp_root = tempdir()?;
    let raw = format!("{}//nested/./../target.txt", temp_root.path().display());

    let file = File::new(&raw)?;
    let expected = normalize_path(&std::path::absolute(&raw)?.to_string_lossy());
    assert_eq!(file.path(), Path::new(&expected));
    assert_eq!(file.name(), "target.txt");

    let dir = Directory::new(&raw)?;
    assert_eq!(dir.path(), file.path());

    assert!(matches!(File::new(""), Err(Error::InvalidValue(_))));
    assert!(matches!(Directory::new(""), Err(Error::InvalidValue(_))));
    Ok(())
}

#[test]
fn test_type_conflicts_are_rejected() -> Result<()> {
    let temp_root = tempdir()?;
    let plain = temp_root.path().join("plain.txt");
    fs::write(&plain, "content")?;

    assert!(matches!(
        File::new(temp_root.path()),
        Err(Error::IsADirectory(_))
    ));
    assert!(matches!(Directory::new(&plain), Err(Error::NotADirectory(_))));
    Ok(())
}

#[test]
fn test_rename_round_trip() -> Result<()> {
    let temp_root = tempdir()?;
    let original = temp_root.path().join("a.txt");
    fs::write(&original, "")?;

    let mut file = File::new(&original)?;
    file.rename("b.txt")?;
    assert!(!original.exists());
    assert!(file.exists());

    file.rename("a.txt")?;
    assert!(original.exists());
    assert_eq!(fs::read(&original)?, b"");
    assert_eq!(file.name(), "a.txt");
    Ok(())
}

#[test]
fn test_rename_onto_existing_file() -> Result<()> {
    let temp_root = tempdir()?;
    let a = temp_root.path().join("a.txt");
    let b = temp_root.path().join("b.txt");
    fs::write(&a, "content of a")?;
    fs::write(&b, "content of b")?;

    let mut file = File::new(&a)?;
    let err = file.rename_with("b.txt", false).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
    assert_eq!(fs::read_to_string(&a)?, "content of a");
    assert_eq!(fs::read_to_string(&b)?, "content of b");
    assert_eq!(file.name(), "a.txt");

    file.rename_with("b.txt", true)?;
    assert!(!a.exists());
    assert_eq!(fs::read_to_string(&b)?, "content of a");
    assert_eq!(file.name(), "b.txt");
    Ok(())
}

#[test]
fn test_move_onto_existing_file() -> Result<()> {
    let temp_root = tempdir()?;
    let source_dir = temp_root.path().join("src");
    let target_dir = temp_root.path().join("dst");
    fs::create_dir_all(&source_dir)?;
    fs::create_dir_all(&target_dir)?;
    fs::write(source_dir.join("report.txt"), "new")?;
    fs::write(target_dir.join("final.txt"), "old")?;

    let mut file = File::new(source_dir.join("report.txt"))?;
    assert!(matches!(
        file.move_to(&target_dir, Some("final.txt"), false),
        Err(Error::AlreadyExists(_))
    ));
    assert!(matches!(
        file.move_to(&target_dir, Some("../escape.txt"), false),
        Err(Error::InvalidValue(_))
    ));

    file.move_to(&target_dir, Some("final.txt"), true)?;
    assert_eq!(fs::read_to_string(target_dir.join("final.txt"))?, "new");
    assert!(!source_dir.join("report.txt").exists());
    assert_eq!(file.parent(), Path::new(&normalize_path(&target_dir.to_string_lossy())));
    Ok(())
}

#[test]
fn test_directory_removal_modes() -> Result<()> {
    let temp_root = tempdir()?;
    let target = temp_root.path().join("T");

    fs::create_dir(&target)?;
    let dir = Directory::new(&target)?;
    dir.remove_with(true)?;
    assert!(!target.exists());

    fs::create_dir(&target)?;
    fs::write(target.join("inside.txt"), "data")?;
    let err = dir.remove_with(true).unwrap_err();
    #[cfg(unix)]
    assert!(matches!(
        err,
        Error::Io(ref e) if e.raw_os_error() == Some(nix::errno::Errno::ENOTEMPTY as i32)
    ));
    #[cfg(not(unix))]
    assert!(matches!(err, Error::Io(_)));
    assert!(target.join("inside.txt").exists());

    dir.remove_with(false)?;
    assert!(!target.exists());
    Ok(())
}

#[test]
fn test_random_name_is_unused() -> Result<()> {
    let temp_root = tempdir()?;
    for _ in 0..8 {
        let name = generate_random_name(temp_root.path());
        assert_eq!(name.len(), 32);
        assert!(name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        let path = temp_root.path().join(&name);
        assert!(!path.exists());
        fs::write(&path, "")?;
    }
    Ok(())
}

#[test]
fn test_entities_work_through_the_trait() -> Result<()> {
    init_logging(&LoggingConfig::default());
    init_logging(&LoggingConfig::default());

    let temp_root = tempdir()?;
    fs::write(temp_root.path().join("f.txt"), "12")?;
    fs::create_dir(temp_root.path().join("d"))?;

    let entities: Vec<Box<dyn FsEntity>> = vec![
        Box::new(File::new(temp_root.path().join("f.txt"))?),
        Box::new(Directory::new(temp_root.path().join("d"))?),
    ];
    let sizes = entities
        .iter()
        .map(|e| e.size())
        .collect::<classyfd::Result<Vec<u64>>>()?;
    assert_eq!(sizes, vec![2, 0]);

    for entity in &entities {
        assert!(entity.exists());
        entity.remove()?;
        assert!(!entity.exists());
    }
    Ok(())
}
