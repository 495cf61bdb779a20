use std::path::PathBuf;

use clap::Parser;

use crate::connector::ContainerConfig;
use crate::domain::PersonaKind;

#[derive(Parser, Debug)]
#[command(name = "claygent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub verbose: bool,

    /// Persona variant: playful, professional, or concise
    #[arg(short, long, default_value = "playful")]
    pub persona: PersonaKind,

    /// TOML secrets file consulted when PERPLEXITY_API_KEY is unset
    #[arg(long, default_value = "~/.claygent/secrets.toml")]
    pub secrets_file: String,

    /// Completion API base URL (defaults to PERPLEXITY_BASE_URL or the public endpoint)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (defaults to PERPLEXITY_TIMEOUT_SECS or 30)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            persona: self.persona,
            secrets_file: PathBuf::from(expand_tilde(&self.secrets_file)),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            api_key: None,
        }
    }
}

pub fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn defaults_to_playful_persona() {
        let cli = Cli::try_parse_from(["claygent"]).unwrap();
        assert_eq!(cli.persona, PersonaKind::Playful);
        assert!(!cli.verbose);
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn accepts_persona_and_overrides() {
        let cli = Cli::try_parse_from([
            "claygent",
            "--persona",
            "professional",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout-secs",
            "5",
            "--secrets-file",
            "/tmp/secrets.toml",
        ])
        .unwrap();

        let config = cli.container_config();
        assert_eq!(config.persona, PersonaKind::Professional);
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.secrets_file, PathBuf::from("/tmp/secrets.toml"));
    }

    #[test]
    fn unknown_persona_is_rejected() {
        let res = Cli::try_parse_from(["claygent", "--persona", "grumpy"]);
        assert!(res.is_err());
    }

    #[test]
    fn no_subcommands_are_accepted() {
        let res = Cli::try_parse_from(["claygent", "search", "pricing"]);
        assert!(res.is_err(), "the chat surface takes no subcommands");
    }

    #[test]
    fn expand_tilde_leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/etc/secrets.toml"), "/etc/secrets.toml");
        assert_eq!(expand_tilde("relative/~file"), "relative/~file");
    }
}
