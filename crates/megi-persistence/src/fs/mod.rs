//! `DraftStore` sobre el sistema de archivos: un JSON por clave.
//!
//! `save` escribe a un archivo temporal en el mismo directorio y lo renombra
//! encima del destino, así un lector nunca ve un draft a medio escribir. Un
//! archivo ilegible se reporta como error de serialización; el engine lo
//! degrada a "sin draft".

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use megi_core::draft::{Draft, DraftKey, DraftStore, DraftStoreError};

use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    /// Crea el directorio si no existe.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ruta del archivo de una clave. Todo byte fuera de `[A-Za-z0-9._-]` se
    /// escribe como `%XX`, así dos claves distintas nunca comparten archivo.
    pub fn path_for(&self, key: &DraftKey) -> PathBuf {
        self.dir.join(format!("{}.json", encode_file_stem(key.as_str())))
    }

    /// Claves presentes en el directorio (orden alfabético).
    pub fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()).and_then(decode_file_stem) {
                Some(key) => keys.push(key),
                None => debug!("fs keys: skipping {}", path.display()),
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn read(&self, key: &DraftKey) -> Result<Option<Draft>, PersistenceError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let draft: Draft = serde_json::from_slice(&bytes)?;
        if draft.key != *key {
            warn!("fs load: {} holds draft for key={}, ignoring", path.display(), draft.key);
            return Ok(None);
        }
        Ok(Some(draft))
    }

    fn write(&self, draft: &Draft) -> Result<(), PersistenceError> {
        let path = self.path_for(&draft.key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, draft)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        debug!("fs save key={} path={}", draft.key, path.display());
        Ok(())
    }

    fn remove(&self, key: &DraftKey) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &DraftKey) -> Result<Option<Draft>, DraftStoreError> {
        Ok(self.read(key)?)
    }

    fn save(&mut self, draft: &Draft) -> Result<(), DraftStoreError> {
        Ok(self.write(draft)?)
    }

    fn clear(&mut self, key: &DraftKey) -> Result<(), DraftStoreError> {
        Ok(self.remove(key)?)
    }
}

fn encode_file_stem(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' => out.push(byte as char),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

fn decode_file_stem(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = stem.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
