//! Category configuration service.
//!
//! # Responsibility
//! - Merge built-in and user categories once per settings change.
//! - Enforce the category limit and key normalization.
//!
//! # Invariants
//! - Keys are lowercase ASCII alphanumerics.
//! - Only custom categories can be removed; built-ins can only be relabeled.

use crate::model::category::{
    default_categories, merge_categories, CategoryMap, CustomCategory, FALLBACK_CATEGORY,
    MAX_CATEGORIES,
};
use crate::model::settings::UserSettings;
use crate::repo::event_repo::RepoError;
use crate::repo::settings_repo::SettingsRepository;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NON_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid key regex"));

#[derive(Debug)]
pub enum CategoryError {
    /// Key is empty after normalization.
    InvalidKey(String),
    /// Label is empty after trimming.
    EmptyLabel,
    /// Category key already exists.
    Duplicate(String),
    /// Adding would exceed `MAX_CATEGORIES`.
    LimitReached(usize),
    /// Key names no known category.
    Unknown(String),
    /// Built-in categories cannot be removed.
    BuiltIn(String),
    Repo(RepoError),
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(raw) => write!(f, "invalid category key: `{raw}`"),
            Self::EmptyLabel => write!(f, "category label cannot be empty"),
            Self::Duplicate(key) => write!(f, "category already exists: {key}"),
            Self::LimitReached(max) => write!(f, "category limit of {max} reached"),
            Self::Unknown(key) => write!(f, "unknown category: {key}"),
            Self::BuiltIn(key) => write!(f, "built-in category cannot be removed: {key}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CategoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CategoryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct CategoryService<S: SettingsRepository> {
    settings: S,
}

impl<S: SettingsRepository> CategoryService<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    /// Returns built-in categories merged with the user's custom ones.
    pub fn categories(&self) -> Result<CategoryMap, CategoryError> {
        let settings = self.settings.load_settings()?;
        Ok(merge_categories(
            &default_categories(),
            &settings.custom_categories,
        ))
    }

    /// Adds a custom category inheriting `base_category`'s color.
    pub fn add_category(
        &self,
        raw_key: &str,
        label: &str,
        base_category: Option<&str>,
    ) -> Result<CategoryMap, CategoryError> {
        let key = normalize_key(raw_key)
            .ok_or_else(|| CategoryError::InvalidKey(raw_key.to_string()))?;
        let label = require_label(label)?;
        let mut settings = self.settings.load_settings()?;
        let merged = merge_categories(&default_categories(), &settings.custom_categories);

        if merged.contains_key(key.as_str()) {
            return Err(CategoryError::Duplicate(key));
        }
        if merged.len() >= MAX_CATEGORIES {
            return Err(CategoryError::LimitReached(MAX_CATEGORIES));
        }

        settings.custom_categories.insert(
            key,
            CustomCategory {
                label,
                base_category: base_category.unwrap_or(FALLBACK_CATEGORY).to_string(),
            },
        );
        self.persist(&settings)
    }

    /// Changes the label of any category.
    ///
    /// Relabeling a built-in stores an override based on itself so its color
    /// is kept.
    pub fn rename_category(&self, key: &str, label: &str) -> Result<CategoryMap, CategoryError> {
        let label = require_label(label)?;
        let mut settings = self.settings.load_settings()?;

        if let Some(custom) = settings.custom_categories.get_mut(key) {
            custom.label = label;
        } else if default_categories().contains_key(key) {
            settings.custom_categories.insert(
                key.to_string(),
                CustomCategory {
                    label,
                    base_category: key.to_string(),
                },
            );
        } else {
            return Err(CategoryError::Unknown(key.to_string()));
        }
        self.persist(&settings)
    }

    /// Removes a custom category. A relabeled built-in reverts to its
    /// default label.
    pub fn remove_category(&self, key: &str) -> Result<CategoryMap, CategoryError> {
        let mut settings = self.settings.load_settings()?;
        let is_builtin = default_categories().contains_key(key);
        if settings.custom_categories.shift_remove(key).is_none() {
            return Err(if is_builtin {
                CategoryError::BuiltIn(key.to_string())
            } else {
                CategoryError::Unknown(key.to_string())
            });
        }
        self.persist(&settings)
    }

    /// Sets or clears the timeline background image.
    pub fn set_background(&self, url: Option<&str>) -> Result<(), CategoryError> {
        let mut settings = self.settings.load_settings()?;
        settings.background_url = url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self.settings.save_settings(&settings)?;
        Ok(())
    }

    pub fn settings(&self) -> Result<UserSettings, CategoryError> {
        Ok(self.settings.load_settings()?)
    }

    fn persist(&self, settings: &UserSettings) -> Result<CategoryMap, CategoryError> {
        self.settings.save_settings(settings)?;
        Ok(merge_categories(
            &default_categories(),
            &settings.custom_categories,
        ))
    }
}

/// Lowercases `raw` and drops everything outside `[a-z0-9]`.
pub fn normalize_key(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let key = NON_KEY_RE.replace_all(&lowered, "").into_owned();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

fn require_label(label: &str) -> Result<String, CategoryError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}
