//! Options for `python -m twine upload`.
use std::path::PathBuf;

/// Flags for `twine upload`. Absent options produce no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct UploadOptions {
    /// `--repository`: a section of `~/.pypirc`.
    pub repository: Option<String>,
    /// `--repository-url`.
    pub repository_url: Option<String>,
    /// `--attestations`.
    pub attestations: bool,
    /// `--sign`.
    pub sign: bool,
    /// `--sign-with`.
    pub sign_with: Option<String>,
    /// `--identity`.
    pub identity: Option<String>,
    /// `--username`.
    pub username: Option<String>,
    /// `--password`.
    pub password: Option<String>,
    /// `--non-interactive`.
    pub non_interactive: bool,
    /// `--comment`.
    pub comment: Option<String>,
    /// `--skip-existing`.
    pub skip_existing: bool,
    /// `--cert`.
    pub cert: Option<PathBuf>,
    /// `--client-cert`.
    pub client_cert: Option<PathBuf>,
    /// `--verbose`.
    pub verbose: bool,
    /// `--disable-progress-bar`.
    pub disable_progress_bar: bool,
}

impl UploadOptions {
    /// Argument list (without the `upload` subcommand or file names).
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        let mut value = |flag: &str, v: Option<String>| {
            if let Some(v) = v {
                args.push(flag.to_string());
                args.push(v);
            }
        };
        value("--repository", self.repository.clone());
        value("--repository-url", self.repository_url.clone());
        value("--sign-with", self.sign_with.clone());
        value("--identity", self.identity.clone());
        value("--username", self.username.clone());
        value("--password", self.password.clone());
        value("--comment", self.comment.clone());
        value("--cert", self.cert.as_ref().map(|p| p.to_string_lossy().into_owned()));
        value(
            "--client-cert",
            self.client_cert.as_ref().map(|p| p.to_string_lossy().into_owned()),
        );
        let switches = [
            (self.attestations, "--attestations"),
            (self.sign, "--sign"),
            (self.non_interactive, "--non-interactive"),
            (self.skip_existing, "--skip-existing"),
            (self.verbose, "--verbose"),
            (self.disable_progress_bar, "--disable-progress-bar"),
        ];
        args.extend(
            switches
                .into_iter()
                .filter(|(on, _)| *on)
                .map(|(_, flag)| flag.to_string()),
        );
        args
    }
}
