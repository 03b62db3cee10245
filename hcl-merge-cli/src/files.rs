//! Reading input documents and replacing the output file.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use hcl_merge::Document;
use tracing::debug;

use crate::error::CliError;

/// Reads the document at `path`, labelled with the path for error messages.
pub fn read_document(path: &Utf8Path) -> Result<Document, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    let (dir, name) = open_parent(path).map_err(read_error)?;
    let text = dir.read_to_string(name).map_err(read_error)?;
    debug!(%path, bytes = text.len(), "read document");
    Ok(Document::new(path.as_str(), text))
}

/// Replaces the file at `path` with `contents`.
///
/// The bytes are written and synced to `.<name>.tmp` in the same directory,
/// which is then renamed over `path`. The target is never left half-written;
/// on failure the temporary file is removed.
pub fn write_atomically(path: &Utf8Path, contents: &[u8]) -> Result<(), CliError> {
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    let (dir, name) = open_parent(path).map_err(write_error)?;
    let staging = staging_name(name);
    let outcome = stage(&dir, &staging, contents).and_then(|()| dir.rename(&staging, &dir, name));
    if let Err(err) = outcome {
        if let Err(cleanup) = dir.remove_file(&staging) {
            debug!(file = %staging, error = %cleanup, "temporary file was not removed");
        }
        return Err(write_error(err));
    }
    debug!(%path, bytes = contents.len(), "wrote document");
    Ok(())
}

fn stage(dir: &Dir, name: &str, contents: &[u8]) -> io::Result<()> {
    let mut file = dir.open_with(
        name,
        OpenOptions::new().write(true).create(true).truncate(true),
    )?;
    file.write_all(contents)?;
    file.sync_all()
}

fn staging_name(name: &str) -> String {
    format!(".{name}.tmp")
}

fn open_parent(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path does not name a file")
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
    let dir = Dir::open_ambient_dir(&parent, ambient_authority())?;
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::{read_document, staging_name, write_atomically};
    use crate::error::CliError;
    use anyhow::{Context, Result, bail, ensure};
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workdir() -> TempDir {
        #[expect(clippy::expect_used, reason = "test fixtures may panic")]
        tempfile::tempdir().expect("create temporary directory")
    }

    fn utf8_path(dir: &TempDir, name: &str) -> Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(dir.path().join(name))
            .map_err(|path| anyhow::anyhow!("non-UTF-8 temp path {}", path.display()))
    }

    #[rstest]
    fn writes_then_reads_back(workdir: TempDir) -> Result<()> {
        let path = utf8_path(&workdir, "merged.hcl")?;
        write_atomically(&path, b"port = 9090\n")?;
        let document = read_document(&path)?;
        ensure!(document.text() == "port = 9090\n");
        ensure!(document.label() == path.as_str());
        ensure!(!workdir.path().join(staging_name("merged.hcl")).exists());
        Ok(())
    }

    #[rstest]
    fn replaces_existing_output(workdir: TempDir) -> Result<()> {
        let path = utf8_path(&workdir, "merged.hcl")?;
        std::fs::write(&path, "stale = true\nwith = \"more bytes than the new file\"\n")?;
        write_atomically(&path, b"fresh = 1\n")?;
        let written = std::fs::read_to_string(&path).context("read output")?;
        ensure!(written == "fresh = 1\n", "unexpected output {written:?}");
        Ok(())
    }

    #[rstest]
    fn missing_input_names_the_path(workdir: TempDir) -> Result<()> {
        let path = utf8_path(&workdir, "absent.hcl")?;
        let Err(err) = read_document(&path) else {
            bail!("reading a missing file must fail");
        };
        ensure!(matches!(&err, CliError::Read { path: reported, .. } if *reported == path));
        ensure!(err.to_string().contains("absent.hcl"));
        Ok(())
    }

    #[rstest]
    fn missing_output_directory_is_a_write_error(workdir: TempDir) -> Result<()> {
        let path = utf8_path(&workdir, "missing/merged.hcl")?;
        ensure!(matches!(
            write_atomically(&path, b"x = 1\n"),
            Err(CliError::Write { .. })
        ));
        Ok(())
    }
}
