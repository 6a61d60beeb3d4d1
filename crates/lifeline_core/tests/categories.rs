use lifeline_core::db::open_db_in_memory;
use lifeline_core::{
    CategoryError, CategoryService, SettingsRepository, SqliteSettingsRepository, UserSettings,
};

#[test]
fn settings_default_when_missing_and_roundtrip_as_json() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);
    assert_eq!(repo.load_settings().unwrap(), UserSettings::default());

    let mut settings = UserSettings::default();
    settings.background_url = Some("bg.png".to_string());
    repo.save_settings(&settings).unwrap();
    repo.save_settings(&settings).unwrap();
    assert_eq!(repo.load_settings().unwrap(), settings);

    let payload: String = conn
        .query_row("SELECT payload FROM user_settings WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json["background_url"], "bg.png");
}

#[test]
fn add_rename_and_remove_custom_categories() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteSettingsRepository::new(&conn));

    let merged = service
        .add_category("Road Trips", "Road trips", Some("family"))
        .unwrap();
    assert_eq!(merged.len(), 7);
    assert_eq!(merged["roadtrips"].color, "orange");

    let merged = service.rename_category("career", "Work").unwrap();
    assert_eq!(merged["career"].label, "Work");
    assert_eq!(merged["career"].color, "green");

    assert!(matches!(
        service.add_category("roadtrips", "Again", None).unwrap_err(),
        CategoryError::Duplicate(_)
    ));

    let merged = service.remove_category("career").unwrap();
    assert_eq!(merged["career"].label, "Career");
    assert!(matches!(
        service.remove_category("career").unwrap_err(),
        CategoryError::BuiltIn(_)
    ));

    let merged = service.remove_category("roadtrips").unwrap();
    assert_eq!(merged.len(), 6);
}

#[test]
fn category_limit_is_ten() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteSettingsRepository::new(&conn));

    for key in ["one", "two", "three", "four"] {
        service.add_category(key, key, None).unwrap();
    }
    assert_eq!(service.categories().unwrap().len(), 10);
    assert!(matches!(
        service.add_category("five", "five", None).unwrap_err(),
        CategoryError::LimitReached(10)
    ));
}

#[test]
fn invalid_input_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteSettingsRepository::new(&conn));

    assert!(matches!(
        service.add_category("!!!", "x", None).unwrap_err(),
        CategoryError::InvalidKey(_)
    ));
    assert!(matches!(
        service.add_category("ok", "  ", None).unwrap_err(),
        CategoryError::EmptyLabel
    ));
    assert!(matches!(
        service.rename_category("nope", "x").unwrap_err(),
        CategoryError::Unknown(_)
    ));
}

#[test]
fn background_is_trimmed_and_clearable() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteSettingsRepository::new(&conn));

    service.set_background(Some(" sky.jpg ")).unwrap();
    assert_eq!(
        service.settings().unwrap().background_url.as_deref(),
        Some("sky.jpg")
    );
    service.set_background(None).unwrap();
    assert_eq!(service.settings().unwrap().background_url, None);
}
