use anyhow::{Result, bail};
use std::io::Write;

use crate::classifier::Classifier;
use crate::entity::EntityKind;
use crate::http::Transport;

use super::print_json;

/// Prints the entity of `kind` named `name`, failing when there is none.
#[tracing::instrument(skip(classifier, out))]
pub async fn find<T: Transport, W: Write>(
    classifier: &Classifier<T>,
    kind: EntityKind,
    name: &str,
    out: &mut W,
) -> Result<()> {
    match classifier.find(kind, name).await? {
        Some(entity) => print_json(out, &entity),
        None => bail!("No {} named '{}'", kind, name),
    }
}
