use super::classify::failure_outcome;
use crate::app::cli::CliOptions;
use crate::app::command_support::{
    build_classifier, pretty, read_json_input, single_input_path, CliError, CommandOutcome,
};

/// Shows exactly what would be sent to the backend, without sending it.
pub fn cmd_prompt(options: &CliOptions) -> Result<CommandOutcome, CliError> {
    let source = single_input_path(options, "usage: prompt <file|->")?;
    let request = read_json_input(&source)?;
    let classifier = build_classifier(options)?;
    Ok(match classifier.compose(&request) {
        Ok((_, prompt)) => CommandOutcome::ok(pretty(&prompt)),
        Err(err) => failure_outcome(&err),
    })
}
