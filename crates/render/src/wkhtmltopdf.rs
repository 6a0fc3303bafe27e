use crate::error::{ErrorKind, Result};
use crate::options::RenderOptions;
use exn::ResultExt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Locations the official wkhtmltox packages install into when the binary
/// is not on `PATH`.
const INSTALL_LOCATIONS: &[&str] = &["/usr/local/bin/wkhtmltopdf", "/opt/wkhtmltox/bin/wkhtmltopdf"];

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Represents a wkhtmltopdf executable.
#[derive(Debug)]
pub(crate) struct Wkhtmltopdf {
    path: PathBuf,
}
impl Wkhtmltopdf {
    pub(crate) fn discover() -> Result<Self> {
        if let Ok(path) = which::which("wkhtmltopdf") {
            return Ok(Self { path });
        }
        tracing::info!("wkhtmltopdf executable not found in PATH; checking package install locations");
        for location in INSTALL_LOCATIONS {
            let path = Path::new(location);
            if path.is_file() {
                return Ok(Self { path: path.to_path_buf() });
            }
        }
        exn::bail!(ErrorKind::RendererNotFound);
    }

    /// Uses an explicit binary (from configuration) instead of discovery.
    pub(crate) fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "configured renderer binary does not exist");
            exn::bail!(ErrorKind::RendererNotFound);
        }
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// First line of `wkhtmltopdf --version`, e.g. `wkhtmltopdf 0.12.6`.
    pub(crate) fn version(&self) -> Result<String> {
        let output = Command::new(&self.path).arg("--version").output().or_raise(|| ErrorKind::Io)?;
        if !output.status.success() {
            // A binary that cannot even report its version is not usable.
            exn::bail!(ErrorKind::RendererNotFound);
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Runs one conversion: `wkhtmltopdf <options> <input> <output>`.
    ///
    /// The child is killed once `timeout` elapses. Exit statuses map onto
    /// [`ErrorKind::RenderFailed`] (non-zero code, stderr attached) and
    /// [`ErrorKind::RenderKilled`] (signal death, no code to report).
    pub(crate) fn execute(
        &self,
        options: &RenderOptions,
        user_style_sheet: Option<&Path>,
        input: &Path,
        output: &Path,
        timeout: Duration,
    ) -> Result<()> {
        let args = options.to_args(user_style_sheet);
        tracing::debug!(binary = %self.path.display(), ?args, "invoking wkhtmltopdf");
        let mut child = Command::new(&self.path)
            .args(&args)
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .or_raise(|| ErrorKind::Io)?;

        // Drain stderr on its own thread; wkhtmltopdf writes progress there
        // and a full pipe would stall the child indefinitely.
        let stderr_pipe = child.stderr.take();
        let collector = std::thread::spawn(move || {
            let mut buffer = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buffer);
            }
            buffer
        });

        let deadline = Instant::now() + timeout;
        let status = loop {
            if let Some(status) = child.try_wait().or_raise(|| ErrorKind::Io)? {
                break status;
            }
            if Instant::now() >= deadline {
                tracing::warn!(timeout_secs = timeout.as_secs(), "renderer deadline exceeded; killing child");
                let _ = child.kill();
                let _ = child.wait();
                let _ = collector.join();
                exn::bail!(ErrorKind::RenderTimeout);
            }
            std::thread::sleep(POLL_INTERVAL);
        };
        let stderr = collector.join().unwrap_or_default();

        if status.success() {
            tracing::debug!(output = %output.display(), "wkhtmltopdf finished");
            return Ok(());
        }
        match status.code() {
            Some(code) => exn::bail!(ErrorKind::RenderFailed { code, stderr: stderr.trim().to_string() }),
            None => exn::bail!(ErrorKind::RenderKilled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_binary_must_exist() {
        let err = Wkhtmltopdf::at("/definitely/not/a/real/binary").unwrap_err();
        assert!(matches!(&*err, ErrorKind::RendererNotFound));
    }

    #[test]
    fn explicit_binary_is_accepted_when_present() {
        // Any plain file will do; execution is not attempted here.
        let file = tempfile::NamedTempFile::new().unwrap();
        let wkhtmltopdf = Wkhtmltopdf::at(file.path()).unwrap();
        assert_eq!(wkhtmltopdf.path(), file.path());
    }
}
