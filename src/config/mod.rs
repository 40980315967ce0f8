use std::path::{Path, PathBuf};

/// Log directory used when neither the flag nor the config names one,
/// relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = ".claude/hooks/logs";

/// Top-level configuration loaded from a KDL file.
///
/// ```kdl
/// logs {
///     dir ".claude/hooks/logs"
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub logs: LogConfig,
}

/// Where the audit logs live.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
}

/// Errors that can occur when loading or parsing a config file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    #[diagnostic(code(dox_hooks::config::not_found))]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    #[diagnostic(code(dox_hooks::config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    #[diagnostic(code(dox_hooks::config::parse))]
    ParseError(String),
    #[error("invalid config: {0}")]
    #[diagnostic(
        code(dox_hooks::config::invalid),
        help("expected `logs {{ dir \"<path>\" }}`")
    )]
    ValidationError(String),
}

impl Config {
    /// Load a config from a KDL file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a KDL string into a Config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let doc: kdl::KdlDocument = content
            .parse()
            .map_err(|e: kdl::KdlError| ConfigError::ParseError(e.to_string()))?;
        Self::from_document(&doc)
    }

    fn from_document(doc: &kdl::KdlDocument) -> Result<Self, ConfigError> {
        let logs = match doc.get("logs").and_then(|n| n.children()) {
            Some(children) => LogConfig::from_children(children)?,
            None => LogConfig::default(),
        };
        Ok(Config { logs })
    }

    /// Pick the audit-log directory: explicit flag, then config, then default.
    /// Relative paths are joined onto `cwd`.
    pub fn resolve_log_dir(&self, flag: Option<&Path>, cwd: &Path) -> PathBuf {
        let dir = flag
            .or(self.logs.dir.as_deref())
            .unwrap_or(Path::new(DEFAULT_LOG_DIR));
        cwd.join(dir)
    }
}

impl LogConfig {
    fn from_children(children: &kdl::KdlDocument) -> Result<Self, ConfigError> {
        let dirs: Vec<&kdl::KdlNode> = children
            .nodes()
            .iter()
            .filter(|n| n.name().value() == "dir")
            .collect();

        let node = match dirs.as_slice() {
            [] => return Ok(LogConfig::default()),
            [node] => node,
            _ => {
                return Err(ConfigError::ValidationError(
                    "logs.dir may only be given once".into(),
                ))
            }
        };

        let mut values = node.entries().iter().map(|e| e.value().as_string());
        match (values.next(), values.next()) {
            (Some(Some(dir)), None) if !dir.is_empty() => Ok(LogConfig {
                dir: Some(PathBuf::from(dir)),
            }),
            _ => Err(ConfigError::ValidationError(
                "logs.dir takes exactly one non-empty string".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_log_dir() {
        let config = Config::parse(
            r#"
            logs {
                dir "/var/log/dox"
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.logs.dir, Some(PathBuf::from("/var/log/dox")));
    }

    #[test]
    fn parse_empty_kdl_file() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_logs_without_dir() {
        let config = Config::parse("logs {\n}").unwrap();
        assert!(config.logs.dir.is_none());
    }

    #[test]
    fn unrelated_nodes_are_ignored() {
        let config = Config::parse(r#"other "value""#).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_kdl_returns_parse_error() {
        let result = Config::parse("this is { not valid { kdl");
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn non_string_dir_is_rejected() {
        let result = Config::parse("logs {\n dir 42\n}");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn repeated_dir_is_rejected() {
        let result = Config::parse("logs {\n dir \"a\"\n dir \"b\"\n}");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn dir_with_two_values_is_rejected() {
        let result = Config::parse("logs {\n dir \"a\" \"b\"\n}");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    // --- Log dir resolution ---

    #[test]
    fn flag_wins_over_config() {
        let config = Config {
            logs: LogConfig {
                dir: Some("from-config".into()),
            },
        };
        let dir = config.resolve_log_dir(Some(Path::new("/abs/flag")), Path::new("/work"));
        assert_eq!(dir, PathBuf::from("/abs/flag"));
    }

    #[test]
    fn config_dir_is_relative_to_cwd() {
        let config = Config {
            logs: LogConfig {
                dir: Some("audit".into()),
            },
        };
        let dir = config.resolve_log_dir(None, Path::new("/work"));
        assert_eq!(dir, PathBuf::from("/work/audit"));
    }

    #[test]
    fn default_dir_under_cwd() {
        let dir = Config::default().resolve_log_dir(None, Path::new("/work"));
        assert_eq!(dir, PathBuf::from("/work/.claude/hooks/logs"));
    }

    // --- File loading ---

    #[test]
    fn load_nonexistent_file_returns_not_found() {
        let result = Config::load(Path::new("/tmp/does-not-exist-dox-12345.kdl"));
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn load_valid_file_from_disk() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "logs {{\n    dir \"audit-logs\"\n}}").unwrap();

        let config = Config::load(tmpfile.path()).unwrap();
        assert_eq!(config.logs.dir, Some(PathBuf::from("audit-logs")));
    }

    #[test]
    fn load_file_with_invalid_kdl_returns_parse_error() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "invalid {{ kdl {{ syntax").unwrap();

        let result = Config::load(tmpfile.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }
}
