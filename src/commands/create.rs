use anyhow::{Result, anyhow};
use log::info;
use std::io::Write;

use crate::classifier::{Classifier, NodeOutcome, NodeRequest};
use crate::http::Transport;

use super::print_json;

/// Parses a `KEY=VALUE` parameter. The value may itself contain `=`.
pub fn parse_parameter(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(anyhow!("Invalid parameter '{}'. Expected KEY=VALUE.", s)),
    }
}

/// Creates a class and prints the registry's record of it.
#[tracing::instrument(skip(classifier, out))]
pub async fn create_class<T: Transport, W: Write>(
    classifier: &Classifier<T>,
    name: &str,
    out: &mut W,
) -> Result<()> {
    let class = classifier.create_class(name).await?;
    print_json(out, &class)
}

/// Creates a node and prints it. On a conflict the `{"status": ...}` object is
/// printed and the conflict is returned as an error.
#[tracing::instrument(skip(classifier, request, out), fields(node = %request.name))]
pub async fn create_node<T: Transport, W: Write>(
    classifier: &Classifier<T>,
    request: &NodeRequest,
    out: &mut W,
) -> Result<()> {
    match classifier.create_node(request).await? {
        NodeOutcome::Created(node) => {
            info!("Node {} registered", node.name);
            print_json(out, &node)
        }
        NodeOutcome::Conflict(conflict) => {
            print_json(out, &conflict.status())?;
            Err(anyhow!(conflict.to_string()))
        }
    }
}
