use crate::app::cli::{help_text, parse_cli_options, parse_cli_verb, CliVerb};
use crate::app::command_support::{CliError, CommandOutcome};

pub mod batch;
pub mod classify;
pub mod prompt;

pub fn run_cli(args: Vec<String>) -> Result<CommandOutcome, CliError> {
    if args.is_empty() {
        return Ok(CommandOutcome::ok(help_text()));
    }

    let options = parse_cli_options(&args[1..]).map_err(CliError::Usage)?;
    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Classify => classify::cmd_classify(&options),
        CliVerb::Batch => batch::cmd_batch(&options),
        CliVerb::Prompt => prompt::cmd_prompt(&options),
        CliVerb::Help => Ok(CommandOutcome::ok(help_text())),
        CliVerb::Unknown => Err(CliError::Usage(format!("unknown command `{}`", args[0]))),
    }
}
