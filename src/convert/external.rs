//! External DWG converter adapter
//!
//! Binary DWG content is not parsed here; it is handed to an installed
//! converter that produces DXF. The primary tool is the ODA File
//! Converter, the secondary is LibreDWG's `dwg2dxf`. Each conversion
//! runs in its own staging directory and is killed when it exceeds the
//! configured deadline.

use crate::error::{PreviewError, Result};
use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// Well-known ODA File Converter install locations
static ODA_CANDIDATES: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("/usr/bin/ODAFileConverter"),
        PathBuf::from("/usr/local/bin/ODAFileConverter"),
        PathBuf::from("/opt/ODAFileConverter/ODAFileConverter"),
        PathBuf::from("C:\\Program Files\\ODA\\ODAFileConverter\\ODAFileConverter.exe"),
    ]
});

/// How often a running converter is polled against its deadline
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Adapter around the external DWG to DXF converters
#[derive(Debug, Clone, Default)]
pub struct ExternalConverter {
    /// Explicit ODA converter path; overrides probing when set
    tool_path: Option<PathBuf>,
}

impl ExternalConverter {
    /// Create an adapter that probes well-known install locations
    pub fn new() -> Self {
        ExternalConverter::default()
    }

    /// Create an adapter with an explicit primary tool path
    pub fn with_tool_path(tool_path: Option<PathBuf>) -> Self {
        ExternalConverter { tool_path }
    }

    /// Convert a DWG file to DXF, trying the primary tool first and the
    /// secondary on any recoverable failure. Returns the path of the
    /// produced DXF file, placed under `staging_root`; the caller owns
    /// its removal.
    pub fn convert(&self, input: &Path, staging_root: &Path, deadline: Duration) -> Result<PathBuf> {
        match self.convert_with_oda(input, staging_root, deadline) {
            Ok(path) => Ok(path),
            Err(primary) if primary.is_recoverable() => {
                warn!(error = %primary, "primary converter failed, trying dwg2dxf");
                self.convert_with_dwg2dxf(input, staging_root, deadline)
                    .map_err(|secondary| {
                        warn!(error = %secondary, "secondary converter failed");
                        secondary
                    })
            }
            Err(e) => Err(e),
        }
    }

    /// Locate the ODA File Converter binary
    fn find_oda(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.tool_path {
            return path.exists().then(|| path.clone());
        }
        ODA_CANDIDATES.iter().find(|p| p.exists()).cloned()
    }

    /// Run the ODA File Converter through a per-job staging directory
    pub fn convert_with_oda(
        &self,
        input: &Path,
        staging_root: &Path,
        deadline: Duration,
    ) -> Result<PathBuf> {
        let tool = self.find_oda().ok_or_else(|| {
            PreviewError::ToolUnavailable("ODAFileConverter not installed".to_string())
        })?;

        let job = StagingJob::create(staging_root)?;
        let result = self.run_oda(&tool, input, &job, staging_root, deadline);
        job.remove();
        result
    }

    fn run_oda(
        &self,
        tool: &Path,
        input: &Path,
        job: &StagingJob,
        staging_root: &Path,
        deadline: Duration,
    ) -> Result<PathBuf> {
        let file_name = input
            .file_name()
            .ok_or_else(|| PreviewError::ToolFailed(format!("no file name: {}", input.display())))?;
        fs::copy(input, job.in_dir.join(file_name))?;

        // ODAFileConverter <in> <out> <version> <type> <recurse> <audit>
        let mut command = Command::new(tool);
        command
            .arg(&job.in_dir)
            .arg(&job.out_dir)
            .arg("ACAD2018")
            .arg("DXF")
            .arg("0")
            .arg("1")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        debug!(tool = %tool.display(), input = %input.display(), "running ODA converter");
        run_with_deadline(command, "ODAFileConverter", deadline)?;

        let produced = find_dxf(&job.out_dir)?.ok_or_else(|| {
            PreviewError::ToolFailed("ODAFileConverter produced no DXF output".to_string())
        })?;

        // Copy the result out before the job directory goes away.
        let target = staging_root.join(format!("{}.dxf", job.id));
        fs::copy(&produced, &target)?;
        Ok(target)
    }

    /// Run LibreDWG's `dwg2dxf`, resolved from PATH
    pub fn convert_with_dwg2dxf(
        &self,
        input: &Path,
        staging_root: &Path,
        deadline: Duration,
    ) -> Result<PathBuf> {
        let tool = find_in_path("dwg2dxf").ok_or_else(|| {
            PreviewError::ToolUnavailable("dwg2dxf not found in PATH".to_string())
        })?;

        let job = StagingJob::create(staging_root)?;
        let result = (|| {
            let output = job.out_dir.join("converted.dxf");
            let mut command = Command::new(&tool);
            command
                .arg("-o")
                .arg(&output)
                .arg(input)
                .stdout(Stdio::null())
                .stderr(Stdio::null());

            debug!(tool = %tool.display(), input = %input.display(), "running dwg2dxf");
            run_with_deadline(command, "dwg2dxf", deadline)?;

            if !output.exists() {
                return Err(PreviewError::ToolFailed(
                    "dwg2dxf produced no DXF output".to_string(),
                ));
            }
            let target = staging_root.join(format!("{}.dxf", job.id));
            fs::copy(&output, &target)?;
            Ok(target)
        })();
        job.remove();
        result
    }
}

/// Per-job staging directory with `in/` and `out/` subdirectories
struct StagingJob {
    id: String,
    dir: PathBuf,
    in_dir: PathBuf,
    out_dir: PathBuf,
}

impl StagingJob {
    fn create(staging_root: &Path) -> Result<Self> {
        let id = format!("job-{}", Uuid::new_v4());
        let dir = staging_root.join(&id);
        let in_dir = dir.join("in");
        let out_dir = dir.join("out");
        fs::create_dir_all(&in_dir)?;
        fs::create_dir_all(&out_dir)?;
        Ok(StagingJob {
            id,
            dir,
            in_dir,
            out_dir,
        })
    }

    /// Remove the job directory; conversion results have already been
    /// copied out by the time this runs.
    fn remove(&self) {
        if let Err(e) = fs::remove_dir_all(&self.dir) {
            warn!(path = %self.dir.display(), error = %e, "failed to remove staging directory");
        }
    }
}

/// Spawn the command and poll it against the deadline, killing it on
/// expiry.
fn run_with_deadline(mut command: Command, tool: &str, deadline: Duration) -> Result<()> {
    let mut child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreviewError::ToolUnavailable(format!("{}: {}", tool, e))
        } else {
            PreviewError::ToolFailed(format!("{}: {}", tool, e))
        }
    })?;

    let started = Instant::now();
    loop {
        match child.try_wait()? {
            Some(status) => {
                if status.success() {
                    return Ok(());
                }
                return Err(PreviewError::ToolFailed(format!(
                    "{} exited with {}",
                    tool, status
                )));
            }
            None => {
                if started.elapsed() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(PreviewError::ToolTimeout {
                        tool: tool.to_string(),
                        secs: deadline.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

/// First `.dxf` file in a directory
fn find_dxf(dir: &Path) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_dxf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("dxf"))
            .unwrap_or(false);
        if path.is_file() && is_dxf {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Resolve an executable name against the PATH environment variable
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let adapter =
            ExternalConverter::with_tool_path(Some(PathBuf::from("/nonexistent/oda-converter")));
        let err = adapter
            .convert_with_oda(
                Path::new("/tmp/in.dwg"),
                Path::new("/tmp/staging"),
                Duration::from_secs(1),
            )
            .unwrap_err();
        assert!(matches!(err, PreviewError::ToolUnavailable(_)));
    }

    #[test]
    fn test_find_in_path_misses_nonsense() {
        assert!(find_in_path("definitely-not-a-real-binary-name-42").is_none());
    }
}
