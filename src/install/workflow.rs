use regex::Regex;

use crate::api::adapter::{ApiPayload, StaticDataSource};
use crate::install::command;
use crate::model::config::MarketConfig;

/// Install phases, in emit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installing,
    Success,
    Error(String),
}

/// UI-side observer for install progress; rendering lives with the caller.
pub trait InstallNotifier {
    fn notify(&mut self, plugin: &str, status: &InstallStatus);
}

/// Silent default for callers with no surface to paint.
impl InstallNotifier for () {
    fn notify(&mut self, _plugin: &str, _status: &InstallStatus) {}
}

/// Final install result. `success: false` is the one place in the crate
/// where a failure stays distinguishable from an empty success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub success: bool,
    pub message: String,
}

/// Simulated install pipeline: builds and parses install commands and runs
/// the download-then-report sequence. Nothing is written to disk.
#[derive(Debug)]
pub struct Installer {
    cli: String,
    command_re: Regex,
}

impl Installer {
    pub fn new(cli: impl Into<String>) -> Self {
        let cli = cli.into();
        let command_re = command::command_regex(&cli);
        Installer { cli, command_re }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(config.install.cli.clone())
    }

    pub fn cli(&self) -> &str {
        &self.cli
    }

    /// `"<cli> install <name>"`: the string the copy button puts on the
    /// clipboard.
    pub fn install_command(&self, name: &str) -> String {
        command::build_command(&self.cli, name)
    }

    /// Inverse of [`Installer::install_command`]. Accepts only the exact
    /// grammar, case-insensitive on the verb; anything else is `None`.
    pub fn parse_install_command(&self, text: &str) -> Option<String> {
        self.command_re
            .captures(text)
            .map(|captures| captures[1].to_string())
    }

    /// Run the simulated install: emit `Installing`, fetch the download
    /// endpoint, then emit `Success` or `Error` and return the outcome.
    pub fn install(
        &self,
        name: &str,
        source: &StaticDataSource,
        notifier: &mut dyn InstallNotifier,
    ) -> InstallOutcome {
        notifier.notify(name, &InstallStatus::Installing);

        let rejection = match source.download_plugin(name) {
            ApiPayload::Detail(doc) if doc.success => None,
            ApiPayload::Download(ack) if ack.success => None,
            ApiPayload::Detail(doc) => Some(doc.message),
            ApiPayload::Download(ack) => Some(Some(ack.message)),
            _ => Some(None),
        };

        match rejection {
            None => {
                // Simulated unpack; no file is written.
                tracing::debug!("unpack simulated for plugin {name}");
                notifier.notify(name, &InstallStatus::Success);
                InstallOutcome {
                    success: true,
                    message: format!("插件 {name} 安装成功"),
                }
            }
            Some(message) => {
                let reason = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "下载失败".to_string());
                tracing::warn!("install failed for plugin {name}: {reason}");
                notifier.notify(name, &InstallStatus::Error(reason.clone()));
                InstallOutcome {
                    success: false,
                    message: reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<InstallStatus>);

    impl InstallNotifier for Recorder {
        fn notify(&mut self, _plugin: &str, status: &InstallStatus) {
            self.0.push(status.clone());
        }
    }

    fn installer() -> Installer {
        Installer::new("gb")
    }

    #[test]
    fn command_round_trips_for_valid_names() {
        let installer = installer();
        for name in ["dark-theme-pro", "gb_parser", "X", &"a".repeat(50)] {
            let command = installer.install_command(name);
            assert_eq!(installer.parse_install_command(&command).as_deref(), Some(name));
        }
    }

    #[test]
    fn parse_is_case_insensitive_on_the_verb() {
        let installer = installer();
        assert_eq!(
            installer.parse_install_command("GB Install Dark-Theme-Pro").as_deref(),
            Some("Dark-Theme-Pro")
        );
    }

    #[test]
    fn parse_rejects_anything_but_the_exact_grammar() {
        let installer = installer();
        assert_eq!(installer.parse_install_command("gb install"), None);
        assert_eq!(installer.parse_install_command("gb install two words"), None);
        assert_eq!(installer.parse_install_command("npm install foo"), None);
        assert_eq!(installer.parse_install_command("say gb install foo"), None);
        assert_eq!(installer.parse_install_command("gb install foo!"), None);
    }

    #[test]
    fn install_emits_installing_then_success() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("plugin_code-snippets.json"),
            r#"{"success": true,
                "data": {"id": "code-snippets", "name": "Code Snippets",
                         "downloads": 8732, "category": "tool"}}"#,
        )
        .unwrap();

        let source = StaticDataSource::new(dir.path());
        let mut recorder = Recorder::default();
        let outcome = installer().install("code-snippets", &source, &mut recorder);

        assert!(outcome.success);
        assert_eq!(outcome.message, "插件 code-snippets 安装成功");
        assert_eq!(
            recorder.0,
            vec![InstallStatus::Installing, InstallStatus::Success]
        );
    }

    #[test]
    fn install_succeeds_via_fallback_when_no_file_backs_the_plugin() {
        let source = StaticDataSource::new("/definitely/not/a/data/root");
        let mut recorder = Recorder::default();
        let outcome = installer().install("ghost", &source, &mut recorder);

        // The generated acknowledgement reports success, so the simulation
        // completes.
        assert!(outcome.success);
        assert_eq!(
            recorder.0,
            vec![InstallStatus::Installing, InstallStatus::Success]
        );
    }

    #[test]
    fn install_surfaces_rejection_documents_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("plugin_pulled.json"),
            r#"{"success": false, "message": "插件已下架"}"#,
        )
        .unwrap();

        let source = StaticDataSource::new(dir.path());
        let mut recorder = Recorder::default();
        let outcome = installer().install("pulled", &source, &mut recorder);

        assert!(!outcome.success);
        assert_eq!(outcome.message, "插件已下架");
        assert_eq!(
            recorder.0,
            vec![
                InstallStatus::Installing,
                InstallStatus::Error("插件已下架".to_string())
            ]
        );
    }

    #[test]
    fn install_defaults_the_reason_when_the_document_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("plugin_silent.json"),
            r#"{"success": false}"#,
        )
        .unwrap();

        let source = StaticDataSource::new(dir.path());
        let outcome = installer().install("silent", &source, &mut ());

        assert!(!outcome.success);
        assert_eq!(outcome.message, "下载失败");
    }
}
