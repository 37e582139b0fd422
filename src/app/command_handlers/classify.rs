use crate::app::cli::CliOptions;
use crate::app::command_support::{
    build_classifier, pretty, read_json_input, single_input_path, CliError, CommandOutcome,
};
use crate::shared::ClassifyError;

pub fn cmd_classify(options: &CliOptions) -> Result<CommandOutcome, CliError> {
    let source = single_input_path(options, "usage: classify <file|->")?;
    let request = read_json_input(&source)?;
    let classifier = build_classifier(options)?;
    Ok(match classifier.classify(&request) {
        Ok(response) => CommandOutcome::ok(pretty(&response)),
        Err(err) => failure_outcome(&err),
    })
}

pub(crate) fn failure_outcome(err: &ClassifyError) -> CommandOutcome {
    CommandOutcome {
        stdout: pretty(&err.to_body()),
        stderr: Some(format!("classification failed ({}): {err}", err.kind())),
        exit_code: err.kind().exit_code(),
    }
}
