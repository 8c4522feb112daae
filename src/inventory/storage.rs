use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::codec::{self, CodecError};
use super::components::Inventory;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed inventory record {path}: {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("could not move corrupt record {path} to {backup}: {source}")]
    Quarantine {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writes to {path} are disabled for this session")]
    Locked { path: PathBuf },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Codec { .. })
    }

    /// 磁盘上仍留着无法读取的旧记录，继续写入会覆盖它
    pub fn record_at_risk(&self) -> bool {
        matches!(self, Self::Quarantine { .. })
    }
}

/// 启动时背包是怎么来的
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 读到已有文件
    Loaded,
    /// 首次运行，用默认目录初始化
    Seeded,
    /// 文件损坏，已挪到 `backup` 并重新初始化
    Recovered { backup: PathBuf },
}

/// 背包文件；整份读、整份写
#[derive(Resource, Debug, Clone)]
pub struct InventoryFile {
    path: PathBuf,
    locked: bool,
}

impl InventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), locked: false }
    }

    /// 本次运行不再写盘
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件不存在时返回 `Ok(None)`
    pub fn read(&self) -> Result<Option<Inventory>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let counts = codec::decode(&text).map_err(|source| StorageError::Codec {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(Inventory::from_counts(counts)))
    }

    /// 覆盖写入整张表，必要时创建目录
    pub fn write(&self, inventory: &Inventory) -> Result<(), StorageError> {
        if self.locked {
            return Err(StorageError::Locked { path: self.path.clone() });
        }
        let text = codec::encode(inventory.counts()).map_err(|source| StorageError::Codec {
            path: self.path.clone(),
            source,
        })?;
        self.ensure_dir()?;
        fs::write(&self.path, text).map_err(|e| StorageError::io(&self.path, e))
    }

    /// 读取背包；没有文件就用目录初始化并写出，文件损坏就挪开后重新初始化。
    /// 初始化内容编码失败时不会留下空文件
    pub fn load_or_seed<'a>(
        &self,
        catalog: impl IntoIterator<Item = &'a str>,
    ) -> Result<(Inventory, LoadOutcome), StorageError> {
        let outcome = match self.read() {
            Ok(Some(inventory)) => return Ok((inventory, LoadOutcome::Loaded)),
            Ok(None) => LoadOutcome::Seeded,
            Err(err) if err.is_malformed() => {
                warn!("{err}");
                LoadOutcome::Recovered { backup: self.quarantine()? }
            }
            Err(err) => return Err(err),
        };

        let mut inventory = Inventory::default();
        inventory.seed(catalog);
        self.write(&inventory)?;
        Ok((inventory, outcome))
    }

    /// 把坏文件改名为 `<file>.corrupt`
    fn quarantine(&self) -> Result<PathBuf, StorageError> {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".corrupt");
        let backup = self.path.with_file_name(name);
        match fs::rename(&self.path, &backup) {
            Ok(()) => Ok(backup),
            Err(source) => Err(StorageError::Quarantine {
                path: self.path.clone(),
                backup,
                source,
            }),
        }
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: [&str; 3] = ["apple", "bread", "old_key"];

    fn temp_file(dir: &tempfile::TempDir) -> InventoryFile {
        InventoryFile::new(dir.path().join("save").join("Inventory.txt"))
    }

    #[test]
    fn first_run_seeds_catalog_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir);

        let (inv, outcome) = file.load_or_seed(CATALOG).unwrap();
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert_eq!(inv.len(), CATALOG.len());
        assert!(inv.counts().values().all(|c| *c == 0));

        // 再次启动读到同样的 N 项
        let (again, outcome) = file.load_or_seed(CATALOG).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(again, inv);
    }

    #[test]
    fn saving_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir);
        let mut inv = Inventory::default();
        inv.increase_by("apple", 3);
        inv.decrease("bread");

        file.write(&inv).unwrap();
        let first = fs::read(file.path()).unwrap();
        file.write(&inv).unwrap();
        let second = fs::read(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"apple:3,bread:-1");
    }

    #[test]
    fn empty_file_loads_as_empty_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir);
        fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        fs::write(file.path(), "").unwrap();

        let (inv, outcome) = file.load_or_seed(CATALOG).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert!(inv.is_empty());
    }

    #[test]
    fn corrupt_record_is_moved_aside_and_reseeded() {
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir);
        fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        fs::write(file.path(), "apple:3,bread").unwrap();

        let (inv, outcome) = file.load_or_seed(CATALOG).unwrap();
        let LoadOutcome::Recovered { backup } = outcome else {
            panic!("expected recovery, got {outcome:?}");
        };
        assert_eq!(fs::read_to_string(&backup).unwrap(), "apple:3,bread");
        assert_eq!(inv.get("apple"), Some(0));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "apple:0,bread:0,old_key:0");
    }

    #[test]
    fn failed_seed_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let file = temp_file(&dir);

        let err = file.load_or_seed(["apple", "a:b"]).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Codec { source: CodecError::ReservedCharacter(_), .. }
        ));
        assert!(!file.path().exists());

        // 下次启动仍然走首次初始化
        let (inv, outcome) = file.load_or_seed(CATALOG).unwrap();
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert_eq!(inv.len(), CATALOG.len());
    }

    #[test]
    fn blocked_quarantine_keeps_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = temp_file(&dir);
        fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        fs::write(file.path(), "apple:oops").unwrap();
        // 备份位置被一个非空目录占住，改名必然失败
        let blocker = file.path().with_file_name("Inventory.txt.corrupt");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let err = file.load_or_seed(CATALOG).unwrap_err();
        assert!(err.record_at_risk());
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "apple:oops");

        file.lock();
        let mut inv = Inventory::default();
        inv.increment("apple");
        assert!(matches!(file.write(&inv), Err(StorageError::Locked { .. })));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "apple:oops");
    }

    #[test]
    fn read_reports_codec_errors() {
        let dir = tempfile::tempdir().unwrap();
        let file = InventoryFile::new(dir.path().join("Inventory.txt"));
        fs::write(file.path(), "apple:x").unwrap();
        let err = file.read().unwrap_err();
        assert!(err.is_malformed());
    }
}
