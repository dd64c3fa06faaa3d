// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable storage for the session.
//!
//! Exactly two values are persisted: the auth token and the serialized
//! user record. They are saved and cleared together; reading them back
//! and deciding whether they form a valid session is the store's job.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File holding the bearer token.
pub const TOKEN_FILE: &str = "auth_token";
/// File holding the JSON user record.
pub const USER_FILE: &str = "auth_user.json";
const LOCK_FILE: &str = "session.lock";

/// Persisted values as read back, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSession {
    pub token: Option<String>,
    pub user: Option<String>,
}

/// Key-value storage that survives restarts.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> io::Result<RawSession>;
    fn save(&self, token: &str, user_json: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    fn load(&self) -> io::Result<RawSession> {
        (**self).load()
    }

    fn save(&self, token: &str, user_json: &str) -> io::Result<()> {
        (**self).save(token, user_json)
    }

    fn clear(&self) -> io::Result<()> {
        (**self).clear()
    }
}

/// Session files in a state directory, guarded by an exclusive file lock.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock(&self) -> io::Result<File> {
        use fs2::FileExt;

        fs::create_dir_all(&self.dir)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn write_synced(&self, name: &str, contents: &str) -> io::Result<()> {
        let mut file = File::create(self.dir.join(name))?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn remove_optional(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> io::Result<RawSession> {
        if !self.dir.exists() {
            return Ok(RawSession::default());
        }
        let _lock = self.lock()?;
        Ok(RawSession {
            token: read_optional(&self.dir.join(TOKEN_FILE))?,
            user: read_optional(&self.dir.join(USER_FILE))?,
        })
    }

    fn save(&self, token: &str, user_json: &str) -> io::Result<()> {
        let _lock = self.lock()?;
        // The token goes last: a crash in between leaves no token, which
        // restore treats as logged out.
        remove_optional(&self.dir.join(TOKEN_FILE))?;
        self.write_synced(USER_FILE, user_json)?;
        self.write_synced(TOKEN_FILE, token)
    }

    fn clear(&self) -> io::Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = self.lock()?;
        remove_optional(&self.dir.join(TOKEN_FILE))?;
        remove_optional(&self.dir.join(USER_FILE))
    }
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<RawSession>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with arbitrary (possibly inconsistent) values.
    pub fn with_raw(raw: RawSession) -> Self {
        MemoryStorage {
            data: Mutex::new(raw),
        }
    }

    pub fn raw(&self) -> RawSession {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> io::Result<RawSession> {
        Ok(self.raw())
    }

    fn save(&self, token: &str, user_json: &str) -> io::Result<()> {
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = RawSession {
            token: Some(token.to_string()),
            user: Some(user_json.to_string()),
        };
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = RawSession::default();
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
