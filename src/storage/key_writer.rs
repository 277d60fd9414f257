//! Key file writing utilities

use crate::domain::KeyEntry;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes normalized `key=value` lines
pub struct KeyWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> KeyWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Append one entry followed by a line terminator
    pub fn write_entry(&mut self, entry: &KeyEntry) -> io::Result<()> {
        writeln!(self.out, "{}", entry.render())?;
        self.written += 1;
        Ok(())
    }

    /// Number of entries written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl KeyWriter<BufWriter<File>> {
    /// Create (or truncate) a staging file, owner-only on Unix
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(path)?;

        // `mode` only applies to new files; a leftover keeps its old bits
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(Self::new(BufWriter::new(file)))
    }

    /// Flush buffered entries and sync the staging file to disk
    pub fn finish(self) -> io::Result<()> {
        let file = self.out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

/// Replace `destination` with the contents of `staging`.
///
/// The bytes are copied into a temporary file next to `destination` which is
/// then renamed over it, so a reader (or a crash) only ever sees the old file
/// or the complete new one. On Unix the installed file is owner-only.
pub fn install(staging: &Path, destination: &Path) -> io::Result<()> {
    let dir = destination.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", destination.display()),
        )
    })?;

    let mut source = File::open(staging)?;
    let mut temp = tempfile::Builder::new()
        .prefix(".install-")
        .tempfile_in(dir)?;
    io::copy(&mut source, temp.as_file_mut())?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    temp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}
