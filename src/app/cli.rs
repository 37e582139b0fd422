use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Classify,
    Batch,
    Prompt,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "classify" => CliVerb::Classify,
        "batch" => CliVerb::Batch,
        "prompt" => CliVerb::Prompt,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

/// Flags accepted by every command, plus whatever positional arguments remain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub out: Option<PathBuf>,
    pub positional: Vec<String>,
}

pub fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value_for("--config")?)),
            "--env-file" => options.env_file = Some(PathBuf::from(value_for("--env-file")?)),
            "--log-file" => options.log_file = Some(PathBuf::from(value_for("--log-file")?)),
            "--out" => options.out = Some(PathBuf::from(value_for("--out")?)),
            "--timeout-secs" => {
                let raw = value_for("--timeout-secs")?;
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --timeout-secs `{raw}`"))?;
                options.timeout_secs = Some(secs);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            _ => options.positional.push(arg.clone()),
        }
    }
    Ok(options)
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  classify <file|->                    Classify one conversation request".to_string(),
        "  batch <file> [--out <file>]          Classify a JSON array of requests".to_string(),
        "  prompt <file|->                      Print the prompt turns without calling the backend"
            .to_string(),
        "Options:".to_string(),
        "  --config <yaml>                      Settings file (endpoint, model, num_predict, timeout_secs)"
            .to_string(),
        "  --env-file <path>                    KEY=VALUE file consulted after the environment"
            .to_string(),
        "  --log-file <path>                    Also append JSON log lines to this file".to_string(),
        "  --timeout-secs <n>                   Bound the backend call".to_string(),
    ]
}

pub fn help_text() -> String {
    let mut lines = vec!["Usage: convclass <command> [options]".to_string()];
    lines.extend(cli_help_lines());
    lines.join("\n")
}
