//! Command-line argument construction for Copilot CLI invocations.

use crate::types::{CopilotConfig, ToolPermissions};
use std::ffi::OsString;

/// Builds the argument list for a non-interactive `copilot --prompt` run.
#[must_use]
pub fn build_args(prompt: &str, config: &CopilotConfig) -> Vec<OsString> {
    let mut args = Vec::new();

    args.push(OsString::from("--prompt"));
    args.push(OsString::from(prompt));

    if let Some(ref model) = config.model {
        args.push(OsString::from("--model"));
        args.push(OsString::from(model));
    }

    if config.silent {
        args.push(OsString::from("--silent"));
    }

    match &config.tools {
        ToolPermissions::None => {}
        ToolPermissions::AllowAll => args.push(OsString::from("--allow-all-tools")),
        ToolPermissions::Explicit { allow, deny } => {
            for tool in allow {
                args.push(OsString::from("--allow-tool"));
                args.push(OsString::from(tool));
            }
            for tool in deny {
                args.push(OsString::from("--deny-tool"));
                args.push(OsString::from(tool));
            }
        }
    }

    for dir in &config.add_dirs {
        args.push(OsString::from("--add-dir"));
        args.push(dir.clone().into_os_string());
    }

    if let Some(ref level) = config.log_level {
        args.push(OsString::from("--log-level"));
        args.push(OsString::from(level));
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn as_strs(args: &[OsString]) -> Vec<&str> {
        args.iter().filter_map(|s| s.to_str()).collect()
    }

    #[test]
    fn test_prompt_is_passed_as_flag_value() {
        let args = build_args("System: be terse\n\nUser: hi", &CopilotConfig::default());
        let args_str = as_strs(&args);

        assert_eq!(args_str[0], "--prompt");
        assert_eq!(args_str[1], "System: be terse\n\nUser: hi");
    }

    #[test]
    fn test_default_config_is_silent_without_tools() {
        let args = build_args("p", &CopilotConfig::default());
        let args_str = as_strs(&args);

        assert!(args_str.contains(&"--silent"));
        assert!(!args_str.contains(&"--allow-all-tools"));
        assert!(!args_str.contains(&"--allow-tool"));
        assert!(!args_str.contains(&"--model"));
    }

    #[test]
    fn test_model_flag() {
        let config = CopilotConfig {
            model: Some("gpt-4.1".to_string()),
            ..CopilotConfig::default()
        };
        let args = build_args("p", &config);
        let args_str = as_strs(&args);

        assert!(
            args_str.windows(2).any(|w| w[0] == "--model" && w[1] == "gpt-4.1"),
            "Expected '--model gpt-4.1' but got: {args_str:?}"
        );
    }

    #[test]
    fn test_explicit_tool_lists() {
        let config = CopilotConfig {
            tools: ToolPermissions::Explicit {
                allow: vec!["shell(git)".to_string()],
                deny: vec!["shell(rm)".to_string(), "write".to_string()],
            },
            ..CopilotConfig::default()
        };
        let args = build_args("p", &config);
        let args_str = as_strs(&args);

        assert!(args_str
            .windows(2)
            .any(|w| w[0] == "--allow-tool" && w[1] == "shell(git)"));
        assert_eq!(
            args_str.iter().filter(|a| **a == "--deny-tool").count(),
            2,
            "Expected one '--deny-tool' per entry but got: {args_str:?}"
        );
    }

    #[test]
    fn test_allow_all_and_extra_dirs() {
        let config = CopilotConfig {
            tools: ToolPermissions::AllowAll,
            add_dirs: vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")],
            log_level: Some("debug".to_string()),
            silent: false,
            ..CopilotConfig::default()
        };
        let args = build_args("p", &config);
        let args_str = as_strs(&args);

        assert!(args_str.contains(&"--allow-all-tools"));
        assert!(args_str.windows(2).any(|w| w[0] == "--add-dir" && w[1] == "/tmp/b"));
        assert!(args_str.windows(2).any(|w| w[0] == "--log-level" && w[1] == "debug"));
        assert!(!args_str.contains(&"--silent"));
    }
}
