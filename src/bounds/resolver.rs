//! County boundary resolver.

use thiserror::Error;
use tracing::{debug, warn};

use super::source::{BoundarySource, SourceError, StaticSource};
use crate::config::SourceConfig;
use crate::models::{FeatureCollection, RegionId};
use crate::topology::{DecodeError, Decoder, Topology};

/// Why a county has no boundaries to show.
#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("invalid county GEOID {0:?}")]
    InputInvalid(String),

    #[error(transparent)]
    SourceUnavailable(#[from] SourceError),

    #[error(transparent)]
    DocumentMalformed(#[from] DocumentError),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("topology has no objects")]
    MissingObjects,

    #[error("object {0:?} not found in topology")]
    MissingObject(String),

    #[error("failed to decode topology: {0}")]
    Decode(#[from] DecodeError),
}

/// Resolves a county GEOID to its boundary features.
///
/// Stateless: every call fetches and decodes afresh, and concurrent calls
/// share nothing but the source.
pub struct BoundaryResolver<S = StaticSource> {
    source: S,
    config: SourceConfig,
}

impl BoundaryResolver<StaticSource> {
    /// Resolver backed by the default filesystem/HTTP source
    pub fn from_config(config: SourceConfig) -> Result<Self, SourceError> {
        Ok(Self::new(StaticSource::new()?, config))
    }
}

impl<S: BoundarySource> BoundaryResolver<S> {
    pub fn new(source: S, config: SourceConfig) -> Self {
        Self { source, config }
    }

    /// Boundaries for `geoid`, or `None` when nothing can be shown.
    pub async fn resolve(&self, geoid: &str) -> Option<FeatureCollection> {
        match self.try_resolve(geoid).await {
            Ok(collection) => Some(collection),
            Err(Unavailable::SourceUnavailable(e)) if !e.is_not_found() => {
                warn!(geoid = %geoid, "Boundaries unavailable: {}", e);
                None
            }
            Err(e) => {
                debug!(geoid = %geoid, "Boundaries unavailable: {}", e);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but keeps the reason for a miss.
    pub async fn try_resolve(&self, geoid: &str) -> Result<FeatureCollection, Unavailable> {
        let id =
            RegionId::parse(geoid).ok_or_else(|| Unavailable::InputInvalid(geoid.to_string()))?;

        let location = self.config.location(&id);
        let bytes = self.source.fetch(&location).await?;
        let topology = Topology::from_slice(&bytes).map_err(DocumentError::from)?;

        let collection = collection_from_topology(&topology, &self.config.object_name(&id))?;
        debug!(
            geoid = %id,
            "Resolved {} boundary features from {}",
            collection.len(),
            location
        );
        Ok(collection)
    }
}

/// Decode one named object of a topology into a feature collection.
///
/// A GeometryCollection yields one feature per member, in order, each
/// carrying the member's own properties. Any other object yields its single
/// feature.
pub fn collection_from_topology(
    topology: &Topology,
    object_name: &str,
) -> Result<FeatureCollection, DocumentError> {
    if topology.objects.is_none() {
        return Err(DocumentError::MissingObjects);
    }
    let object = topology
        .object(object_name)?
        .ok_or_else(|| DocumentError::MissingObject(object_name.to_string()))?;

    // Decoder::feature takes each member's properties as its own, so
    // collection members need no extra copy here.
    let features = Decoder::new(topology).decode(&object)?.into_features();
    Ok(FeatureCollection::new(features))
}
