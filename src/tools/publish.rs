//! Build-then-upload in one step.
use std::fs;
use std::path::{Path, PathBuf};

use super::{BuildOptions, Toolchain, UploadOptions};
use crate::error::ToolError;

/// Build into a scoped temporary directory and upload whatever was produced.
///
/// The directory is removed when this returns, whether or not the upload
/// succeeded. Returns the file names that were uploaded.
///
/// # Errors
///
/// Returns [`ToolError::NoArtifacts`] when the build leaves the output
/// directory empty, or the build or upload failure otherwise.
pub fn publish(
    toolchain: &Toolchain<'_>,
    build: &BuildOptions,
    upload: &UploadOptions,
) -> Result<Vec<String>, ToolError> {
    let outdir = tempfile::Builder::new()
        .prefix("psycho-dist-")
        .tempdir()
        .map_err(|source| ToolError::Io {
            path: std::env::temp_dir(),
            source,
        })?;

    let build = BuildOptions {
        outdir: Some(outdir.path().to_path_buf()),
        ..build.clone()
    };
    toolchain.build(&build)?;

    let artifacts = collect_artifacts(outdir.path())?;
    if artifacts.is_empty() {
        return Err(ToolError::NoArtifacts {
            dir: outdir.path().to_path_buf(),
        });
    }
    toolchain.upload(upload, &artifacts)?;

    Ok(artifacts
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect())
}

/// Regular files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`ToolError::Io`] if the directory cannot be listed.
pub fn collect_artifacts(dir: &Path) -> Result<Vec<PathBuf>, ToolError> {
    let io_err = |source| ToolError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::exec::{ExecResult, Executor};

    /// Writes the given artifact names into `--outdir` when `build` runs and
    /// records the argv of every call.
    #[derive(Debug)]
    struct FakeBuild {
        artifacts: Vec<&'static str>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeBuild {
        fn new(artifacts: Vec<&'static str>) -> Self {
            Self {
                artifacts,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }

        fn handle(&self, args: &[&str]) -> Result<ExecResult, ToolError> {
            self.calls
                .lock()
                .unwrap()
                .push(args.iter().map(|a| (*a).to_string()).collect());
            if args.get(1) == Some(&"build")
                && let Some(pos) = args.iter().position(|a| *a == "--outdir")
            {
                let outdir = Path::new(args[pos + 1]);
                for name in &self.artifacts {
                    fs::write(outdir.join(name), b"artifact").unwrap();
                }
            }
            Ok(ExecResult {
                success: true,
                code: Some(0),
                ..ExecResult::default()
            })
        }
    }

    impl Executor for FakeBuild {
        fn run(&self, _program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
            self.handle(args)
        }

        fn run_in(
            &self,
            _dir: &Path,
            _program: &str,
            args: &[&str],
        ) -> Result<ExecResult, ToolError> {
            self.handle(args)
        }

        fn run_unchecked(&self, _program: &str, args: &[&str]) -> Result<ExecResult, ToolError> {
            self.handle(args)
        }

        fn which(&self, _program: &str) -> Option<PathBuf> {
            None
        }
    }

    #[test]
    fn uploads_every_artifact_in_sorted_order() {
        let exec = FakeBuild::new(vec!["demo-0.1.0.tar.gz", "demo-0.1.0-py3-none-any.whl"]);
        let tc = Toolchain::new("python3", Path::new("."), &exec);
        let uploaded = publish(&tc, &BuildOptions::default(), &UploadOptions::default()).unwrap();
        assert_eq!(
            uploaded,
            vec!["demo-0.1.0-py3-none-any.whl", "demo-0.1.0.tar.gz"]
        );

        let calls = exec.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(&calls[0][..3], &["-m", "build", "--outdir"]);
        let upload = &calls[1];
        assert_eq!(&upload[..3], &["-m", "twine", "upload"]);
        assert!(upload[3].ends_with("demo-0.1.0-py3-none-any.whl"));
        assert!(upload[4].ends_with("demo-0.1.0.tar.gz"));
    }

    #[test]
    fn temporary_outdir_is_removed_afterwards() {
        let exec = FakeBuild::new(vec!["demo-0.1.0.tar.gz"]);
        let tc = Toolchain::new("python3", Path::new("."), &exec);
        publish(&tc, &BuildOptions::default(), &UploadOptions::default()).unwrap();
        let outdir = exec.calls()[0][3].clone();
        assert!(!Path::new(&outdir).exists(), "{outdir} should be removed");
    }

    #[test]
    fn empty_build_is_no_artifacts_and_skips_upload() {
        let exec = FakeBuild::new(vec![]);
        let tc = Toolchain::new("python3", Path::new("."), &exec);
        let err = publish(&tc, &BuildOptions::default(), &UploadOptions::default()).unwrap_err();
        assert!(matches!(err, ToolError::NoArtifacts { .. }), "got: {err}");
        assert_eq!(exec.calls().len(), 1, "twine must not run");
    }

    #[test]
    fn build_options_are_kept_but_outdir_is_replaced() {
        let exec = FakeBuild::new(vec!["demo-0.1.0.tar.gz"]);
        let tc = Toolchain::new("python3", Path::new("."), &exec);
        let build = BuildOptions {
            sdist: true,
            outdir: Some(PathBuf::from("dist")),
            ..BuildOptions::default()
        };
        publish(&tc, &build, &UploadOptions::default()).unwrap();
        let args = &exec.calls()[0];
        assert!(args.contains(&"--sdist".to_string()));
        assert!(!args.contains(&"dist".to_string()));
    }

    #[test]
    fn collect_artifacts_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.whl"), b"").unwrap();
        fs::write(dir.path().join("a.tar.gz"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let files = collect_artifacts(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.tar.gz"), dir.path().join("b.whl")]
        );
    }
}
