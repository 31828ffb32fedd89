use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LoaderError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LoaderError::surface("x")
            .to_string()
            .contains("surface unavailable:")
    );
    assert!(
        LoaderError::worker("x")
            .to_string()
            .contains("encoder worker unavailable:")
    );
    assert!(
        LoaderError::encoding("x")
            .to_string()
            .contains("encoding failed:")
    );
    assert!(LoaderError::save("x").to_string().contains("save failed:"));
    assert!(
        LoaderError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LoaderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_kind() {
    let err: LoaderError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, LoaderError::Serde(_)));
}
