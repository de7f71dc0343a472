mod config;
mod declaration;
mod document;
mod error;
mod origin;
mod render;
mod resolver;
mod tree;

pub use config::{
    Config, DEFAULT_CONFIG_TOML, DisplayConfig, OriginConfig, TagsConfig, WeightConfig,
};
pub use declaration::Declarations;
pub use document::{Document, Paragraph, StyleFlags, StyleLabel, StyleSignals, StyledRun};
pub use error::{Error, Result};
pub use origin::{DescendantSignalAdapter, OriginAdapter, OriginAdapters};
pub use render::{to_json, to_json_pretty};
pub use resolver::Resolver;
pub use tree::{Descendants, Element, MarkupNode};

/// Parse markup into the owned node tree the resolver walks.
pub fn parse(markup: &str) -> Vec<MarkupNode> {
    tree::parse(markup)
}

/// Resolve markup into styled paragraphs using the shipped style table.
pub fn resolve(markup: &str) -> Document {
    resolve_with_config(markup, &Config::default())
}

/// Resolve markup into styled paragraphs with a custom style table.
pub fn resolve_with_config(markup: &str, config: &Config) -> Document {
    let nodes = parse(markup);
    Resolver::new(config).resolve(&nodes)
}
