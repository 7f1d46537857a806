use anyhow::Result;
use pyfind_domain::PythonSpec;
use serde_json::{json, Value};

use crate::config::context::CommandContext;
use crate::discovery::{Builtin, CandidateSource, Discover};
use crate::ExecutionOutcome;

const NOT_FOUND_HINT: &str =
    "install a matching Python, or pass --python with an absolute interpreter path";

#[derive(Clone, Debug, Default)]
pub struct FindRequest {
    pub python: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ExplainRequest {
    pub python: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NamesRequest {
    pub python: Option<String>,
}

/// Resolves the requested interpreter.
///
/// # Errors
/// Returns an error if the result cannot be serialized.
pub fn find_interpreter(ctx: &CommandContext, request: &FindRequest) -> Result<ExecutionOutcome> {
    let options = ctx.discovery_options(request.python.as_deref());
    let discover = Builtin::new(&options, ctx.effects());
    tracing::debug!(%discover, "resolving interpreter");
    match discover.run() {
        Some(info) => Ok(ExecutionOutcome::success(
            info.to_string(),
            json!({
                "spec": options.python,
                "interpreter": serde_json::to_value(&info)?,
            }),
        )),
        None => Ok(not_found(&options.python, Value::Null)),
    }
}

/// Walks the candidate order for the requested interpreter, reporting the
/// verdict for each candidate.
///
/// # Errors
/// Returns an error if the explanation cannot be serialized.
pub fn explain_interpreter(
    ctx: &CommandContext,
    request: &ExplainRequest,
) -> Result<ExecutionOutcome> {
    let options = ctx.discovery_options(request.python.as_deref());
    let discover = Builtin::new(&options, ctx.effects());
    tracing::debug!(%discover, "explaining interpreter resolution");
    let explanation = discover.explain();
    let lines = explanation
        .evaluated
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let verdict = candidate.rejected.as_ref().map_or_else(
                || "selected".to_string(),
                |mismatch| format!("rejected: {mismatch}"),
            );
            format!(
                "{:>2}. [{}] {} ({verdict})",
                idx + 1,
                source_label(candidate.source),
                candidate.info
            )
        })
        .collect::<Vec<_>>();
    let details = serde_json::to_value(&explanation)?;
    if explanation.selected.is_none() {
        return Ok(not_found(&options.python, details));
    }
    Ok(ExecutionOutcome::success(
        format!("candidates for `{}`:\n{}", options.python, lines.join("\n")),
        details,
    ))
}

/// Shows how a request parses and which names would be searched on `PATH`.
/// Nothing is executed, so an unspecified request shows the generic default
/// rather than the host interpreter.
///
/// # Errors
/// Returns an error if the parsed spec cannot be serialized.
pub fn interpreter_names(ctx: &CommandContext, request: &NamesRequest) -> Result<ExecutionOutcome> {
    let options = ctx.request_without_probe(request.python.as_deref());
    let spec = PythonSpec::parse(&options.python);
    let names: Vec<Value> = spec
        .generate_names(ctx.effects().case_sensitive_fs())
        .map(|(name, strict)| json!({ "name": name, "strict_implementation_match": strict }))
        .collect();
    let summary = names
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(ExecutionOutcome::success(
        format!("search names for `{}`:\n{summary}", options.python),
        json!({
            "spec": serde_json::to_value(&spec)?,
            "names": names,
        }),
    ))
}

fn not_found(spec: &str, explanation: Value) -> ExecutionOutcome {
    let mut details = json!({
        "spec": spec,
        "hint": NOT_FOUND_HINT,
    });
    if !explanation.is_null() {
        details["explanation"] = explanation;
    }
    ExecutionOutcome::user_error(format!("no interpreter satisfies `{spec}`"), details)
}

fn source_label(source: CandidateSource) -> &'static str {
    match source {
        CandidateSource::Current => "current",
        CandidateSource::AbsolutePath => "path",
        CandidateSource::Launcher => "launcher",
        CandidateSource::ExactName => "exact name",
        CandidateSource::GeneratedName => "generated name",
    }
}
