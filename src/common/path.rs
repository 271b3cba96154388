use thiserror::Error;

/// Why [`make_full_name`] refused to build a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("missing file name")]
    MissingFileName,

    #[error("path too long: need {needed} bytes, have {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },
}

#[inline]
fn is_separator(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

/// Join `dir` and `file` into `dest` as a NUL-terminated path.
///
/// A `/` is inserted only when `dir` is non-empty and does not already end
/// in `/` or `\`. Returns the path length without the terminator. On error
/// `dest` is left untouched.
pub fn make_full_name(dest: &mut [u8], dir: Option<&str>, file: &str) -> Result<usize, PathError> {
    if file.is_empty() {
        return Err(PathError::MissingFileName);
    }

    let dir = dir.unwrap_or("").as_bytes();
    let sep = !dir.is_empty() && !dir.last().is_some_and(|&b| is_separator(b));
    let len = dir.len() + usize::from(sep) + file.len();

    if len + 1 > dest.len() {
        return Err(PathError::CapacityExceeded {
            needed: len + 1,
            capacity: dest.len(),
        });
    }

    dest[..dir.len()].copy_from_slice(dir);
    let mut wp = dir.len();
    if sep {
        dest[wp] = b'/';
        wp += 1;
    }
    dest[wp..len].copy_from_slice(file.as_bytes());
    dest[len] = 0;
    Ok(len)
}
