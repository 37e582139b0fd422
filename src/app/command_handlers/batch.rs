use crate::app::cli::CliOptions;
use crate::app::command_support::{
    build_classifier, pretty, read_json_input, single_input_path, CliError, CommandOutcome,
};
use crate::conversation::request::CONVERSATION_NUMBER_KEY;
use crate::shared::fs_atomic::atomic_write_file;
use serde_json::Value;

/// Classifies every request in a JSON array. Per-request failures are
/// reported inline and do not stop the batch.
pub fn cmd_batch(options: &CliOptions) -> Result<CommandOutcome, CliError> {
    let source = single_input_path(options, "usage: batch <file> [--out <file>]")?;
    let Value::Array(requests) = read_json_input(&source)? else {
        return Err(CliError::Usage(format!(
            "{source} must contain a JSON array of requests"
        )));
    };
    let classifier = build_classifier(options)?;

    let total = requests.len();
    let mut failed = 0usize;
    let mut results = Vec::with_capacity(total);
    for mut request in requests {
        stringify_conversation_number(&mut request);
        match classifier.classify(&request) {
            Ok(response) => results.push(response.to_value()),
            Err(err) => {
                failed += 1;
                results.push(serde_json::json!({ "error": err.to_string() }));
            }
        }
    }

    let rendered = pretty(&results);
    let stdout = match &options.out {
        Some(path) => {
            atomic_write_file(path, rendered.as_bytes()).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            format!("wrote {total} results to {}", path.display())
        }
        None => rendered,
    };
    Ok(CommandOutcome {
        stdout,
        stderr: Some(format!(
            "classified {} of {total} conversations ({failed} failed)",
            total - failed
        )),
        exit_code: 0,
    })
}

/// Exports frequently carry numeric conversation ids.
pub fn stringify_conversation_number(request: &mut Value) {
    let Some(object) = request.as_object_mut() else {
        return;
    };
    if let Some(Value::Number(number)) = object.get(CONVERSATION_NUMBER_KEY) {
        let text = number.to_string();
        object.insert(CONVERSATION_NUMBER_KEY.to_string(), Value::String(text));
    }
}
