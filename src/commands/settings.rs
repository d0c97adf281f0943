use crate::core::{
    environment::Environment,
    error::Result,
    print_detail, print_section_header, print_success,
    settings::SettingsStore,
};

pub fn execute_settings_show() -> Result<()> {
    let settings = SettingsStore::default_location().load()?;

    print_section_header("Settings");
    print_detail("Blender version", &settings.blender_version);
    print_detail(
        "Custom path",
        if settings.custom_path.is_empty() {
            "(default addons directory)"
        } else {
            &settings.custom_path
        },
    );
    print_detail(
        "Auto backup",
        if settings.auto_backup { "on" } else { "off" },
    );
    println!();
    Ok(())
}

pub fn execute_settings_set(
    blender_version: Option<String>,
    custom_path: Option<String>,
    auto_backup: Option<bool>,
) -> Result<()> {
    let store = SettingsStore::default_location();
    let mut settings = store.load()?;

    if let Some(version) = blender_version {
        // Resolving validates the version format before anything is persisted
        Environment::resolve(&version, &settings.custom_path)?;
        settings.blender_version = version;
    }
    if let Some(path) = custom_path {
        if !path.is_empty() && !std::path::Path::new(&path).exists() {
            log::warn!("Custom path '{}' does not exist yet", path);
        }
        settings.custom_path = path;
    }
    if let Some(enabled) = auto_backup {
        settings.auto_backup = enabled;
    }

    store.save(&settings)?;
    print_success("Settings saved");
    println!();
    Ok(())
}
