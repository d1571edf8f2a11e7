//! crates/diag/src/sink.rs
//! Output target resolution and line dispatch.

use std::fs::File;
use std::io::{self, Write};

/// Where accepted log lines go.
///
/// The default is the console. A file target is opened once during
/// initialization from the expanded `NCCL_DEBUG_FILE` template; `File` does
/// no userspace buffering, so every line reaches the kernel in one write and
/// concurrent writers interleave at line granularity only.
#[derive(Debug)]
pub(crate) enum OutputTarget {
    /// Standard output.
    Stdout,
    /// A log file opened for writing.
    File(File),
}

impl OutputTarget {
    /// Reports whether the target is a file rather than the console.
    pub(crate) const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Writes one fully rendered line in a single call.
    ///
    /// Write errors are swallowed: logging is fire-and-forget and must never
    /// surface a fault to the call site. With `mirror_to_stderr` the line is
    /// additionally copied to the error stream, used for warnings when the
    /// primary target is a file.
    pub(crate) fn write_line(&self, line: &str, mirror_to_stderr: bool) {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(line.as_bytes());
                let _ = out.flush();
            }
            Self::File(file) => {
                let _ = (&*file).write_all(line.as_bytes());
            }
        }
        if mirror_to_stderr {
            let mut err = io::stderr().lock();
            let _ = err.write_all(line.as_bytes());
            let _ = err.flush();
        }
    }

    /// Opens a file target from an already-expanded path.
    ///
    /// Returns `None` when the path is empty or the file cannot be created;
    /// the caller keeps the console target in that case.
    pub(crate) fn open_file(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        File::create(path).ok().map(Self::File)
    }
}

/// Expands an `NCCL_DEBUG_FILE` path template.
///
/// `%h` expands to the hostname, `%p` to the process id and `%%` to a
/// literal `%`. Any other `%x` sequence, and a trailing lone `%`, pass
/// through verbatim.
pub(crate) fn expand_path_template(template: &str, hostname: &str, pid: u32) -> String {
    use std::fmt::Write as _;

    let mut path = String::with_capacity(template.len() + hostname.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            path.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => path.push('%'),
            Some('h') => path.push_str(hostname),
            Some('p') => {
                let _ = write!(path, "{pid}");
            }
            Some(other) => {
                path.push('%');
                path.push(other);
            }
            None => path.push('%'),
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;

    #[test]
    fn expands_hostname_and_pid() {
        assert_eq!(
            expand_path_template("log.%h.%p", "node1", 1234),
            "log.node1.1234"
        );
    }

    #[test]
    fn double_percent_is_literal() {
        assert_eq!(expand_path_template("100%%done", "node1", 1), "100%done");
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(expand_path_template("a%zb", "node1", 1), "a%zb");
    }

    #[test]
    fn trailing_percent_passes_through() {
        assert_eq!(expand_path_template("log%", "node1", 1), "log%");
    }

    #[test]
    fn plain_template_is_unchanged() {
        assert_eq!(expand_path_template("debug.log", "node1", 1), "debug.log");
    }

    #[test]
    fn open_file_rejects_empty_path() {
        assert!(OutputTarget::open_file("").is_none());
    }

    #[test]
    fn open_file_failure_yields_none() {
        assert!(OutputTarget::open_file("/nonexistent-dir/sub/debug.log").is_none());
    }

    #[test]
    fn file_target_receives_whole_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("debug.log");
        let target =
            OutputTarget::open_file(path.to_str().expect("utf-8 path")).expect("file target");
        assert!(target.is_file());

        target.write_line("first line\n", false);
        target.write_line("second line\n", false);

        let mut contents = String::new();
        File::open(&path)
            .expect("reopen")
            .read_to_string(&mut contents)
            .expect("read");
        assert_eq!(contents, "first line\nsecond line\n");
    }
}
