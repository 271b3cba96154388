use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Input bytes, either mapped or owned. Dereferences to `&[u8]`.
pub enum FileData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Files below this size are read into a Vec; mapping them costs more
/// than the copy it saves.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Open read-only, asking Linux not to touch atime when we own the file.
#[cfg(target_os = "linux")]
fn open_input(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    match std::fs::OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NOATIME)
        .open(path)
    {
        Err(ref e) if e.raw_os_error() == Some(libc::EPERM) => File::open(path),
        r => r,
    }
}

#[cfg(not(target_os = "linux"))]
fn open_input(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Read a whole file: mmap for large regular files, one exact-size read
/// otherwise. Special files (pipes, devices) are drained with read_to_end.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let mut file = open_input(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if !metadata.file_type().is_file() {
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        return Ok(FileData::Owned(buf));
    }
    if len == 0 {
        return Ok(FileData::Owned(Vec::new()));
    }

    if len >= MMAP_THRESHOLD {
        // SAFETY: read-only private mapping; the file is not modified by us.
        if let Ok(mmap) = unsafe { MmapOptions::new().map(&file) } {
            #[cfg(target_os = "linux")]
            {
                let _ = mmap.advise(memmap2::Advice::Sequential);
            }
            return Ok(FileData::Mmap(mmap));
        }
    }

    let mut buf = vec![0u8; len as usize];
    let n = read_full(&mut file, &mut buf)?;
    buf.truncate(n);
    Ok(FileData::Owned(buf))
}

/// Read all of standard input.
pub fn read_stdin() -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(64 * 1024);
    io::stdin().lock().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Fill `buf` from `reader` until it is full or EOF, retrying on EINTR.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_file_small() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"SGVsbG8=\n").unwrap();
        let data = read_file(f.path()).unwrap();
        assert_eq!(&*data, b"SGVsbG8=\n");
        assert!(matches!(data, FileData::Owned(_)));
    }

    #[test]
    fn test_read_file_empty() {
        let f = NamedTempFile::new().unwrap();
        let data = read_file(f.path()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_read_file_large_is_complete() {
        let content: Vec<u8> = (0..MMAP_THRESHOLD as usize + 17).map(|i| (i % 251) as u8).collect();
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&content).unwrap();
        f.flush().unwrap();
        let data = read_file(f.path()).unwrap();
        assert_eq!(data.len(), content.len());
        assert_eq!(&*data, &content[..]);
    }

    #[test]
    fn test_read_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("absent.b64")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
