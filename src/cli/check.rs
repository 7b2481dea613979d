//! Run qsdsl values through the parser, resolver and serializer

use tracing::debug;

use super::{CliError, Kind};
use crate::ast::{SortField, SortTarget};
use crate::convert::{filter_from_json, filter_to_json, sort_from_json, sort_to_json};
use crate::{OperatorsConfig, ParseOptions, Resolver, SerializeOptions, Serializer};

/// Options for the check and canonical commands
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Filter or sort
    pub kind: Kind,
    /// The query-string value, as it appears after `filter=` or `sort=`
    pub value: String,
    pub parse: ParseOptions,
}

/// Parse and resolve a value, returning its AST as JSON
pub fn execute_check(operators: &OperatorsConfig, options: &CheckOptions) -> Result<serde_json::Value, CliError> {
    debug!(kind = ?options.kind, "check");
    let json = match options.kind {
        Kind::Filter => {
            let filter = crate::parse_filter_with_options(operators, &options.value, &options.parse)?;
            filter_to_json(&filter)?
        }
        Kind::Sort => {
            let sort = crate::parse_sort_with_options(operators, &options.value, &options.parse)?;
            sort_to_json(&sort)?
        }
    };
    Ok(json)
}

/// Parse and resolve a value, returning its canonical spelling
pub fn execute_canonical(operators: &OperatorsConfig, options: &CheckOptions) -> Result<String, CliError> {
    debug!(kind = ?options.kind, "canonical");
    let serializer = Serializer::new(SerializeOptions::from(&options.parse));
    let out = match options.kind {
        Kind::Filter => {
            let filter = crate::parse_filter_with_options(operators, &options.value, &options.parse)?;
            serializer.serialize_filter(&filter)?
        }
        Kind::Sort => {
            let sort = crate::parse_sort_with_options(operators, &options.value, &options.parse)?;
            serializer.serialize_sort(&sort)?
        }
    };
    Ok(out)
}

/// Validate a JSON AST against the registry and serialize it
pub fn execute_serialize(
    operators: &OperatorsConfig,
    kind: Kind,
    input: &str,
    options: &ParseOptions,
) -> Result<String, CliError> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    let resolver = Resolver::new(operators).with_max_depth(options.max_depth());
    let serializer = Serializer::new(SerializeOptions::from(options));

    let out = match kind {
        Kind::Filter => {
            let filter = filter_from_json(&json)?
                .into_iter()
                .map(|exp| resolver.finalize(exp))
                .collect::<crate::Result<Vec<_>>>()?;
            serializer.serialize_filter(&filter)?
        }
        Kind::Sort => {
            let sort = sort_from_json(&json)?
                .into_iter()
                .map(|field| -> crate::Result<SortField> {
                    let target = match field.target {
                        SortTarget::Expression(exp) => SortTarget::Expression(resolver.finalize(exp)?),
                        other => other,
                    };
                    Ok(SortField {
                        direction: field.direction,
                        target,
                    })
                })
                .collect::<crate::Result<Vec<_>>>()?;
            serializer.serialize_sort(&sort)?
        }
    };
    Ok(out)
}
