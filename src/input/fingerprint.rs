use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::input::InputError;

/// FNV-1a 64 digest of a backing file's raw bytes, used as the memo key for a
/// normalized dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub hash: u64,
    pub len: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}:{}", self.hash, self.len)
    }
}

pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, InputError> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; 8192];
    let mut hasher = Fnv64::new();
    let mut len = 0u64;
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        len += n as u64;
    }
    Ok(Fingerprint {
        hash: hasher.finish(),
        len,
    })
}

struct Fnv64 {
    hash: u64,
}

impl Fnv64 {
    fn new() -> Self {
        Self {
            hash: 0xcbf29ce484222325,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let mut h = self.hash;
        for &b in data {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.hash = h;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}
