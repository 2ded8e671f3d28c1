/// Environment override test
/// Kept in its own test binary so the variables cannot leak into other tests
use std::fs;
use tapedeck_cli::AppConfig;
use tempfile::TempDir;

/// Test TAPEDECK_ variables override file values
#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tapedeck.toml");
    fs::write(
        &path,
        "[player]\nvolume = 0.9\n\n[[tracks]]\nid = 1\ntitle = \"drive\"\nartist = \"Kai Angel\"\nsrc = \"drive.mp3\"\n",
    )
    .unwrap();

    std::env::set_var("TAPEDECK_PLAYER__VOLUME", "0.25");
    std::env::set_var("TAPEDECK_SIMULATION__BLOCK_AUTOPLAY", "true");

    let config = AppConfig::load(Some(&path)).unwrap();

    std::env::remove_var("TAPEDECK_PLAYER__VOLUME");
    std::env::remove_var("TAPEDECK_SIMULATION__BLOCK_AUTOPLAY");

    assert_eq!(config.player.volume, 0.25);
    assert!(config.simulation.block_autoplay);
    assert_eq!(config.tracks[0].title, "drive");
}
