//! jq filters applied to input documents before validation.
use std::fmt;

use anyhow::{Context, Result, anyhow};
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run `filter_src` over `input`; every output becomes a document to validate.
pub fn run_filter(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| filter_error(filter_src, "parse error", errs.into_iter().map(|(_, err)| err)))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| filter_error(filter_src, "undefined name", errs.into_iter().flat_map(|(_, names)| names)))?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut documents = Vec::new();
    for (i, output) in outputs.enumerate() {
        let output = output.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val displays as JSON text
        let document = serde_json::from_str::<Value>(&output.to_string())
            .with_context(|| format!("jq output #{i} is not JSON"))?;
        documents.push(document);
    }
    Ok(documents)
}

/// One error for every problem jaq reported while loading or compiling.
fn filter_error<E: fmt::Debug>(
    filter_src: &str,
    stage: &str,
    problems: impl IntoIterator<Item = E>,
) -> anyhow::Error {
    let details = problems.into_iter().map(|p| format!("{p:?}")).collect::<Vec<_>>();
    anyhow!("jq {stage} in `{filter_src}`: {}", details.join("; "))
}
