//! ドキュメントフォルダ設定
//!
//! `{ "docsDir": "default" | "<絶対パス>" }` の1レコードだけを保存する。
//! 読み込めない・壊れている場合は既定値で置き換えて書き戻す。変更時は丸ごと上書き。

use crate::error::{prefs::Result, PrefsError};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "charge-edit";
const DEFAULT_KEYWORD: &str = "default";

/// 既定のドキュメントフォルダか、ユーザー指定のフォルダか
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocsDir {
    #[default]
    Default,
    Custom(PathBuf),
}

impl DocsDir {
    /// ユーザー入力から作成（`~` と環境変数を展開し、絶対パスのみ受け付ける）
    pub fn custom_from_input(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PrefsError::EmptyPath);
        }
        let expanded = shellexpand::full(trimmed)
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| trimmed.to_string());
        let path = PathBuf::from(expanded);
        if !path.is_absolute() {
            return Err(PrefsError::RelativePath {
                path: path.display().to_string(),
            });
        }
        Ok(DocsDir::Custom(path))
    }
}

impl Serialize for DocsDir {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DocsDir::Default => serializer.serialize_str(DEFAULT_KEYWORD),
            DocsDir::Custom(path) => serializer.serialize_str(&path.to_string_lossy()),
        }
    }
}

impl<'de> Deserialize<'de> for DocsDir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == DEFAULT_KEYWORD {
            return Ok(DocsDir::Default);
        }
        let path = PathBuf::from(&raw);
        if !path.is_absolute() {
            return Err(de::Error::custom(format!("docsDir must be absolute: {}", raw)));
        }
        Ok(DocsDir::Custom(path))
    }
}

/// 保存されるレコード
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub docs_dir: DocsDir,
}

/// 設定ファイルの読み書き
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    current: Preferences,
}

impl PreferenceStore {
    /// 既定の設定ファイル位置（`<config dir>/charge-edit/preferences.json`）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("preferences.json"))
    }

    /// 読み込み。失敗時は既定値を使い、既定値を書き戻す
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match read_record(&path) {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!(
                    "preferences at {} unusable ({}); falling back to defaults",
                    path.display(),
                    err
                );
                let defaults = Preferences::default();
                if let Err(err) = write_record(&path, &defaults) {
                    log::warn!("could not write default preferences: {}", err);
                }
                defaults
            }
        };
        Self { path, current }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &Preferences {
        &self.current
    }

    pub fn docs_dir(&self) -> &DocsDir {
        &self.current.docs_dir
    }

    /// ドキュメントフォルダを変更してレコード全体を書き直す
    pub fn set_docs_dir(&mut self, docs_dir: DocsDir) -> Result<()> {
        let updated = Preferences { docs_dir };
        write_record(&self.path, &updated)?;
        log::info!("documents folder set to {:?}", updated.docs_dir);
        self.current = updated;
        Ok(())
    }

    /// 実際に使うフォルダ
    pub fn resolve_docs_dir(&self) -> Option<PathBuf> {
        match &self.current.docs_dir {
            DocsDir::Default => default_docs_dir(),
            DocsDir::Custom(path) => Some(path.clone()),
        }
    }
}

/// 既定のドキュメントフォルダ（`<data dir>/charge-edit/documents`）
pub fn default_docs_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("documents"))
}

fn read_record(path: &Path) -> Result<Preferences> {
    let bytes = fs::read(path).map_err(|err| PrefsError::Io {
        message: err.to_string(),
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_record(path: &Path, prefs: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| PrefsError::Io {
            message: err.to_string(),
        })?;
    }
    let json = serde_json::to_vec_pretty(prefs)?;
    fs::write(path, json).map_err(|err| PrefsError::Io {
        message: err.to_string(),
    })
}
