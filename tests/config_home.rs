mod support;

use betaboard_overlay::app_dirs::APP_DIR_NAME;
use betaboard_overlay::config::{self, AppSettings, CONFIG_FILE_NAME};
use support::betaboard_env::BetaboardEnvGuard;
use tempfile::tempdir;

#[test]
fn config_home_env_relocates_settings() {
    let base = tempdir().unwrap();
    let _guard = BetaboardEnvGuard::set_config_home(base.path().to_path_buf());

    assert_eq!(config::load_or_default().unwrap(), AppSettings::default());
    let path = config::config_path().unwrap();
    assert_eq!(path, base.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME));

    std::fs::write(
        &path,
        "[playback]\ntarget_frequency_hz = 0.0\n\n[overlay]\nborder_color = [0, 0, 255]\n",
    )
    .unwrap();
    let settings = config::load_or_default().unwrap();
    assert_eq!(settings.playback.target_frequency_hz, 100.0);
    assert_eq!(settings.overlay.border_color, [0, 0, 255]);
}
