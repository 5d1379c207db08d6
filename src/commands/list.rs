use anyhow::Result;
use std::io::Write;

use crate::classifier::Classifier;
use crate::entity::EntityKind;
use crate::http::Transport;

use super::print_json;

/// Prints every entity of `kind` as a JSON array.
#[tracing::instrument(skip(classifier, out))]
pub async fn list<T: Transport, W: Write>(
    classifier: &Classifier<T>,
    kind: EntityKind,
    out: &mut W,
) -> Result<()> {
    let entities = classifier.list(kind).await?;
    print_json(out, &entities)
}
