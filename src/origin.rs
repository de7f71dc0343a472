//! Adapters for pasted content whose source encodes weight and slant on a
//! descendant rather than on the element carrying the source marker.
//!
//! A docs-style paste typically looks like
//! `<b id="docs-internal-guid-…" style="font-weight:normal"><span style="font-weight:700">…`,
//! so the wrapper's own tag and declaration say little about the real style.

use crate::config::Config;
use crate::declaration::Declarations;
use crate::document::StyleSignals;
use crate::tree::Element;

pub trait OriginAdapter {
    fn name(&self) -> &str;

    /// Whether `element` carries this source's marker.
    fn detects(&self, element: &Element) -> bool;

    /// Style signals the marked element should resolve with.
    fn extract(&self, element: &Element, config: &Config) -> StyleSignals;
}

/// Reads signals from the first styled descendant of an element whose
/// attribute values contain `token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescendantSignalAdapter {
    token: String,
}

impl DescendantSignalAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl OriginAdapter for DescendantSignalAdapter {
    fn name(&self) -> &str {
        &self.token
    }

    fn detects(&self, element: &Element) -> bool {
        !self.token.is_empty()
            && element
                .attrs
                .values()
                .any(|value| value.contains(self.token.as_str()))
    }

    fn extract(&self, element: &Element, config: &Config) -> StyleSignals {
        element
            .descendants()
            .map(|descendant| Declarations::parse(descendant.style()))
            .find(|declarations| !declarations.is_empty())
            .map(|declarations| {
                StyleSignals::from_declarations(&declarations, config.weight.bold_threshold)
            })
            .unwrap_or_default()
    }
}

/// Registered adapters, consulted in order.
#[derive(Default)]
pub struct OriginAdapters {
    adapters: Vec<Box<dyn OriginAdapter>>,
}

impl OriginAdapters {
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::default();
        for marker in &config.origin.markers {
            registry.register(DescendantSignalAdapter::new(marker.clone()));
        }
        registry
    }

    pub fn register(&mut self, adapter: impl OriginAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Signals from the first adapter that recognizes `element`.
    pub fn signals_for(&self, element: &Element, config: &Config) -> Option<StyleSignals> {
        let adapter = self.adapters.iter().find(|a| a.detects(element))?;
        let signals = adapter.extract(element, config);
        tracing::debug!(
            adapter = adapter.name(),
            tag = %element.tag,
            ?signals,
            "origin marker detected"
        );
        Some(signals)
    }
}
