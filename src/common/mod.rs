pub mod io;
pub mod path;

/// Reset SIGPIPE to default behavior (SIG_DFL) so a closed pipe ends the
/// process quietly, like the shell tools it sits next to. Rust sets SIGPIPE
/// to SIG_IGN by default. Call at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix
/// that Rust's Display impl appends.
pub fn io_error_msg(e: &std::io::Error) -> String {
    match e.raw_os_error() {
        Some(raw) => {
            let msg = std::io::Error::from_raw_os_error(raw).to_string();
            msg.replace(&format!(" (os error {})", raw), "")
        }
        None => e.to_string(),
    }
}

/// Binary-prefix units, largest first: (shift, suffix).
const BYTE_UNITS: [(u32, char); 6] = [
    (60, 'E'),
    (50, 'P'),
    (40, 'T'),
    (30, 'G'),
    (20, 'M'),
    (10, 'K'),
];

/// Render a byte count for diagnostics, e.g. `"4M bytes"`.
///
/// The largest power-of-1024 unit that divides `n` exactly is used; counts
/// with no such unit print in full (`1073741825 bytes`).
pub fn format_byte_count(n: u64) -> String {
    let mut digits = itoa::Buffer::new();
    for (shift, unit) in BYTE_UNITS {
        let divisor = 1u64 << shift;
        if n >= divisor && n & (divisor - 1) == 0 {
            return format!("{}{} bytes", digits.format(n >> shift), unit);
        }
    }
    format!("{} bytes", digits.format(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_byte_count_units() {
        assert_eq!(format_byte_count(1 << 10), "1K bytes");
        assert_eq!(format_byte_count(1 << 20), "1M bytes");
        assert_eq!(format_byte_count(1 << 30), "1G bytes");
        assert_eq!(format_byte_count(1 << 40), "1T bytes");
        assert_eq!(format_byte_count(1 << 50), "1P bytes");
        assert_eq!(format_byte_count(1 << 60), "1E bytes");
    }

    #[test]
    fn test_format_byte_count_inexact() {
        assert_eq!(format_byte_count((1 << 30) + 1), "1073741825 bytes");
        assert_eq!(format_byte_count(1536), "1536 bytes");
        assert_eq!(format_byte_count(u64::MAX), "18446744073709551615 bytes");
    }

    #[test]
    fn test_format_byte_count_small_and_multiples() {
        assert_eq!(format_byte_count(0), "0 bytes");
        assert_eq!(format_byte_count(5), "5 bytes");
        assert_eq!(format_byte_count(3 << 20), "3M bytes");
        assert_eq!(format_byte_count(2048 + 1024), "3K bytes");
        assert_eq!(format_byte_count(1 << 61), "2E bytes");
    }

    #[test]
    fn test_io_error_msg_strips_os_suffix() {
        let e = std::io::Error::from_raw_os_error(libc::ENOENT);
        let msg = io_error_msg(&e);
        assert!(!msg.contains("os error"));
        assert!(!msg.is_empty());

        let custom = std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid input");
        assert_eq!(io_error_msg(&custom), "invalid input");
    }
}
