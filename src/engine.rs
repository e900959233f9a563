//! The render engine: explicit, caller-driven entry point for the whole
//! pipeline. The caller mutates a [`MapConfig`] and calls [`Renderer::render`];
//! nothing here re-triggers itself on configuration changes.

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use crate::codec::Granularity;
use crate::config::MapConfig;
use crate::dataset::{Dataset, load_dataset};
use crate::error::{Error, Result};
use crate::join::join;
use crate::render::{RenderableFeature, map_to_renderable};
use crate::scale::{ColorScale, ScaleSpec};
use crate::topology::{Topology, load_topology};

/// Executes render requests. Topologies are cached per URL (they are
/// immutable once loaded); datasets are rebuilt on every request.
#[derive(Debug, Default)]
pub struct Renderer {
    topologies: Mutex<HashMap<String, Arc<Topology>>>,
    epoch: AtomicU64,
}

/// Everything the presenter needs for one drawn map: the styled features,
/// the scale (for legends), and the raw topology (for outline rendering).
#[derive(Debug)]
pub struct RenderOutput {
    pub title: String,
    pub topology: Arc<Topology>,
    pub granularity: Granularity,
    pub dataset: Dataset,
    pub scale: ColorScale,
}

impl RenderOutput {
    /// Join and style the features of the active granularity collection.
    ///
    /// Joined values are ephemeral: this recomputes them from the retained
    /// dataset and topology, preserving collection order.
    pub fn features(&self) -> Result<Vec<RenderableFeature<'_>>> {
        let collection = self.topology.collection(self.granularity.object_name())?;
        let joined = join(&self.dataset, collection, self.granularity);
        Ok(map_to_renderable(&joined, &self.scale))
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pipeline for `config`.
    ///
    /// The dataset and topology load concurrently. If another render is
    /// requested while this one is in flight, this one returns
    /// [`Error::Superseded`] and commits nothing: a slow superseded request
    /// can never overwrite a newer one.
    pub fn render(&self, config: &MapConfig) -> Result<RenderOutput> {
        let ticket = self.begin();

        let cached = self.cached_topology(&config.topology_url);
        let (dataset, topology) = std::thread::scope(|scope| {
            let loader = scope.spawn(|| {
                load_dataset(&config.dataset_url, &config.key_column, &config.value_column)
            });
            let topology = match cached {
                Some(topology) => Ok(topology),
                None => load_topology(&config.topology_url).map(Arc::new),
            };
            let dataset = loader
                .join()
                .unwrap_or_else(|_| Err(Error::load("[render] dataset loader panicked")));
            (dataset, topology)
        });
        let dataset = dataset?;
        let topology = topology?;

        if !self.is_current(ticket) {
            return Err(Error::Superseded);
        }
        self.topologies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(config.topology_url.clone(), Arc::clone(&topology));

        let collection = topology.collection(config.granularity.object_name())?;
        let values: Vec<Option<f64>> = join(&dataset, collection, config.granularity)
            .iter()
            .map(|j| j.value)
            .collect();
        let scale = ColorScale::build(
            &values,
            &ScaleSpec::new(config.transform, config.palette),
        );

        Ok(RenderOutput {
            title: config.title.clone(),
            topology,
            granularity: config.granularity,
            dataset,
            scale,
        })
    }

    fn cached_topology(&self, url: &str) -> Option<Arc<Topology>> {
        self.topologies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(url)
            .cloned()
    }

    /// Take an epoch ticket for a new render request.
    fn begin(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// A ticket stays current until a newer request begins.
    fn is_current(&self, ticket: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_tickets_are_not_current() {
        let renderer = Renderer::new();

        let first = renderer.begin();
        assert!(renderer.is_current(first));

        let second = renderer.begin();
        assert!(!renderer.is_current(first), "older request must be discarded");
        assert!(renderer.is_current(second));
    }
}
