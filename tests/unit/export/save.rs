use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "spiral_loader_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn artifact() -> ExportArtifact {
    ExportArtifact::gif(b"GIF89a-test".to_vec())
}

#[test]
fn download_writes_suggested_name_and_leaves_no_partial() {
    let dir = temp_dir("download");
    let mut dl = DownloadSave::new(&dir);
    let outcome = dl.save(&artifact()).unwrap();

    let expected = dir.join("mahana-ai-loader.gif");
    assert_eq!(outcome, SaveOutcome::Saved(expected.clone()));
    assert_eq!(std::fs::read(&expected).unwrap(), b"GIF89a-test");
    assert!(!staged_path(&expected).exists());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn cancelled_picker_is_not_an_error() {
    let mut asked = Vec::new();
    let mut picker = PickerSave::new(|name: &str| {
        asked.push(name.to_owned());
        Ok(None)
    });
    let dir = temp_dir("cancel_fallback");
    let mut fallback = DownloadSave::new(&dir);
    let outcome = persist(&artifact(), Some(&mut picker), &mut fallback).unwrap();
    assert_eq!(outcome, SaveOutcome::Cancelled);
    drop(picker);
    assert_eq!(asked, vec!["mahana-ai-loader.gif".to_owned()]);
    // The fallback is not consulted when a picker exists.
    assert!(!dir.exists());
}

#[test]
fn picker_destination_wins_over_fallback() {
    let dir = temp_dir("picker");
    let chosen = dir.join("nested").join("custom.gif");
    let target = chosen.clone();
    let mut picker = PickerSave::new(move |_: &str| Ok(Some(target.clone())));
    let mut fallback = DownloadSave::new(dir.join("unused"));
    let outcome = persist(&artifact(), Some(&mut picker), &mut fallback).unwrap();
    assert_eq!(outcome, SaveOutcome::Saved(chosen.clone()));
    assert!(chosen.exists());
    assert!(!dir.join("unused").exists());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn no_picker_falls_back_to_download() {
    let dir = temp_dir("fallback");
    let mut fallback = DownloadSave::new(&dir);
    let outcome = persist(&artifact(), None, &mut fallback).unwrap();
    assert_eq!(outcome, SaveOutcome::Saved(dir.join("mahana-ai-loader.gif")));
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn failed_write_cleans_up_staged_file() {
    let dir = temp_dir("failed_write");
    // A directory squatting on the destination makes the final rename fail.
    let dest = dir.join("mahana-ai-loader.gif");
    std::fs::create_dir_all(dest.join("occupied")).unwrap();

    let err = write_staged(&dest, b"data").unwrap_err();
    assert!(matches!(err, LoaderError::SaveFailed(_)), "{err}");
    assert!(!staged_path(&dest).exists());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn picker_errors_propagate() {
    let mut picker = PickerSave::new(|_: &str| Err(LoaderError::save("dialog crashed")));
    assert!(matches!(
        picker.save(&artifact()),
        Err(LoaderError::SaveFailed(_))
    ));
}

#[test]
fn staged_path_appends_partial_suffix() {
    assert_eq!(
        staged_path(Path::new("/tmp/out/a.gif")),
        PathBuf::from("/tmp/out/a.gif.partial")
    );
}
