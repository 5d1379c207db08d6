//! Registry client: generic entity operations and node reconciliation.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::ConnectionOptions;
use crate::entity::{Entity, EntityId, EntityKind, Parameter, parameter_attributes};
use crate::error::ClassifierError;
use crate::http::{HttpTransport, Transport};

/// Declared state of a node to be registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRequest {
    pub name: String,
    /// Class names in the order their ids should be assigned
    pub classes: Vec<String>,
    pub parameters: BTreeMap<String, String>,
    /// Group names in the order their ids should be assigned
    pub groups: Vec<String>,
}

impl NodeRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Policy guard that stopped a node from being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    NodeExists { node: String },
    /// Classes created earlier in the same call are left in place.
    MissingGroup { group: String, node: String },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::NodeExists { node } => write!(f, "Node {} already exists", node),
            Conflict::MissingGroup { group, node } => {
                write!(f, "Parent Group {} for node {} does not exist", group, node)
            }
        }
    }
}

impl Conflict {
    /// `{"status": "<message>"}`
    pub fn status(&self) -> serde_json::Value {
        json!({ "status": self.to_string() })
    }
}

/// Result of [`Classifier::create_node`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    Created(Entity),
    Conflict(Conflict),
}

#[derive(Serialize)]
struct NodeBody<'a> {
    name: &'a str,
    assigned_node_group_ids: Vec<EntityId>,
    parameter_attributes: Vec<Parameter>,
    assigned_node_class_ids: Vec<EntityId>,
}

/// Client bound to one registry. Holds no entity cache: every lookup re-queries.
pub struct Classifier<T: Transport> {
    transport: T,
}

impl Classifier<HttpTransport> {
    /// Builds a client over HTTP. Performs no network I/O.
    pub fn connect(options: &ConnectionOptions) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(options)?))
    }
}

impl<T: Transport> Classifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Lists every entity of `kind`.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let label = format!("Listing {}", kind.info().plural);
        let response = self.transport.get(&kind.path(), &label).await?;

        if !response.is_success() {
            return Err(ClassifierError::Transport(format!(
                "{}: unexpected HTTP {}: {}",
                label, response.status, response.body
            ))
            .into());
        }

        let entities: Vec<Entity> = serde_json::from_str(&response.body)
            .map_err(|e| ClassifierError::Protocol(format!("{}: {}", label, e)))?;

        debug!("{}: {} found", label, entities.len());
        Ok(entities)
    }

    /// Finds the first entity of `kind` named exactly `name`.
    #[tracing::instrument(skip(self))]
    pub async fn find(&self, kind: EntityKind, name: &str) -> Result<Option<Entity>> {
        let entities = self.list(kind).await?;
        Ok(entities.into_iter().find(|entity| entity.name == name))
    }

    pub async fn find_node(&self, name: &str) -> Result<Option<Entity>> {
        self.find(EntityKind::Node, name).await
    }

    pub async fn find_class(&self, name: &str) -> Result<Option<Entity>> {
        self.find(EntityKind::NodeClass, name).await
    }

    pub async fn find_group(&self, name: &str) -> Result<Option<Entity>> {
        self.find(EntityKind::NodeGroup, name).await
    }

    /// Posts `body` to the collection of `kind`; the registry must answer 201.
    #[tracing::instrument(skip(self, body))]
    pub async fn create(
        &self,
        kind: EntityKind,
        name: &str,
        body: &serde_json::Value,
    ) -> Result<Entity> {
        let label = format!("Creating {} {}", kind, name);
        let response = self.transport.post(&kind.path(), &label, body).await?;

        if response.status != 201 {
            return Err(ClassifierError::CreationConflict {
                status: response.status,
                body: response.body,
            })
            .context(label);
        }

        let entity: Entity = serde_json::from_str(&response.body)
            .map_err(|e| ClassifierError::Protocol(format!("{}: {}", label, e)))?;

        info!("Created {} {} (id {})", kind, entity.name, entity.id);
        Ok(entity)
    }

    pub async fn create_class(&self, name: &str) -> Result<Entity> {
        let body = EntityKind::NodeClass.wrap(json!({ "name": name }));
        self.create(EntityKind::NodeClass, name, &body).await
    }

    /// Registers a node with its classes, parameters and groups.
    ///
    /// Missing classes are created. A missing group, or an already registered
    /// node, yields a [`Conflict`] instead. Requests are issued one at a time in
    /// this order: node lookup, per-class lookup (and create), per-group lookup,
    /// node create. Classes created before a missing group is found stay created.
    #[tracing::instrument(skip(self, request), fields(node = %request.name))]
    pub async fn create_node(&self, request: &NodeRequest) -> Result<NodeOutcome> {
        if request.name.is_empty() {
            return Err(ClassifierError::InvalidRequest("node name is empty".to_string()).into());
        }

        if self.find_node(&request.name).await?.is_some() {
            debug!("Node {} already exists", request.name);
            return Ok(NodeOutcome::Conflict(Conflict::NodeExists {
                node: request.name.clone(),
            }));
        }

        let mut class_ids = Vec::with_capacity(request.classes.len());
        for class in &request.classes {
            let entity = match self.find_class(class).await? {
                Some(entity) => entity,
                None => self.create_class(class).await?,
            };
            class_ids.push(entity.id);
        }

        let mut group_ids = Vec::with_capacity(request.groups.len());
        for group in &request.groups {
            match self.find_group(group).await? {
                Some(entity) => group_ids.push(entity.id),
                None => {
                    debug!("Group {} not found for node {}", group, request.name);
                    return Ok(NodeOutcome::Conflict(Conflict::MissingGroup {
                        group: group.clone(),
                        node: request.name.clone(),
                    }));
                }
            }
        }

        let fields = NodeBody {
            name: &request.name,
            assigned_node_group_ids: group_ids,
            parameter_attributes: parameter_attributes(&request.parameters),
            assigned_node_class_ids: class_ids,
        };
        let body = EntityKind::Node.wrap(serde_json::to_value(fields)?);

        let node = self.create(EntityKind::Node, &request.name, &body).await?;
        Ok(NodeOutcome::Created(node))
    }
}
