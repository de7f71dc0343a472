use crate::config::Config;
use crate::declaration::Declarations;
use crate::document::{Document, Paragraph, StyleFlags, StyleSignals, StyledRun};
use crate::origin::OriginAdapters;
use crate::tree::{Element, MarkupNode};

/// Walks a markup tree and resolves every text node to a styled run.
pub struct Resolver<'a> {
    config: &'a Config,
    origins: OriginAdapters,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            origins: OriginAdapters::from_config(config),
        }
    }

    /// Use a custom adapter registry instead of the configured markers.
    pub fn with_origins(config: &'a Config, origins: OriginAdapters) -> Self {
        Self { config, origins }
    }

    pub fn resolve(&self, nodes: &[MarkupNode]) -> Document {
        let mut builder = ParagraphBuilder::default();
        let mut stack: Vec<Step<'_>> = nodes
            .iter()
            .rev()
            .map(|node| Step::Visit(node, StyleFlags::NORMAL))
            .collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::CloseBlock => builder.break_paragraph(),
                Step::Visit(MarkupNode::Text(text), inherited) => {
                    builder.push(StyledRun::new(inherited.label(), text.as_str()));
                }
                Step::Visit(MarkupNode::Element(element), inherited) => {
                    let declarations = Declarations::parse(element.style());
                    if self.is_block(element, &declarations) {
                        builder.break_paragraph();
                        stack.push(Step::CloseBlock);
                    }

                    let flags = self.element_flags(element, &declarations, inherited);
                    stack.extend(
                        element
                            .children
                            .iter()
                            .rev()
                            .map(|child| Step::Visit(child, flags)),
                    );
                }
            }
        }
        builder.finish()
    }

    /// Inherited flags, then structural defaults, then definite inline signals.
    ///
    /// Structural defaults come from the tag table, except on an origin-marked
    /// element reached before any style is established, where the origin
    /// adapter's signals take precedence per axis.
    fn element_flags(
        &self,
        element: &Element,
        declarations: &Declarations,
        inherited: StyleFlags,
    ) -> StyleFlags {
        let tag_defaults = StyleSignals {
            bold: self.config.is_bold_tag(&element.tag).then_some(true),
            italic: self.config.is_italic_tag(&element.tag).then_some(true),
        };
        let structural = match inherited {
            StyleFlags::NORMAL => match self.origins.signals_for(element, self.config) {
                Some(origin) => StyleSignals {
                    bold: origin.bold.or(tag_defaults.bold),
                    italic: origin.italic.or(tag_defaults.italic),
                },
                None => tag_defaults,
            },
            _ => tag_defaults,
        };
        let inline =
            StyleSignals::from_declarations(declarations, self.config.weight.bold_threshold);
        inherited.apply(structural).apply(inline)
    }

    fn is_block(&self, element: &Element, declarations: &Declarations) -> bool {
        match declarations.display() {
            Some(display) => self.config.is_block_display(display),
            None => self.config.is_block_tag(&element.tag),
        }
    }
}

// Pending work for the depth-first walk; an explicit stack keeps deep
// nesting off the call stack. Flags are copied into each child's step.
enum Step<'n> {
    Visit(&'n MarkupNode, StyleFlags),
    CloseBlock,
}

/// Accumulates runs into paragraphs between block boundaries.
#[derive(Debug, Default)]
struct ParagraphBuilder {
    paragraphs: Vec<Paragraph>,
    current: Vec<StyledRun>,
}

impl ParagraphBuilder {
    fn push(&mut self, run: StyledRun) {
        if run.content.trim().is_empty() {
            return;
        }
        tracing::trace!(style = %run.style, content = %run.content, "run");
        self.current.push(run);
    }

    fn break_paragraph(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.current);
        tracing::debug!(runs = content.len(), "paragraph boundary");
        self.paragraphs.push(Paragraph { content });
    }

    fn finish(mut self) -> Document {
        self.break_paragraph();
        Document::new(self.paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StyleLabel;

    fn styles(doc: &Document) -> Vec<Vec<(StyleLabel, &str)>> {
        doc.iter()
            .map(|p| {
                p.content
                    .iter()
                    .map(|run| (run.style, run.content.as_str()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn builder_drops_blank_runs_and_empty_paragraphs() {
        let mut builder = ParagraphBuilder::default();
        builder.push(StyledRun::new(StyleLabel::Normal, "  \n"));
        builder.break_paragraph();
        builder.break_paragraph();
        builder.push(StyledRun::new(StyleLabel::Bold, "x"));
        let doc = builder.finish();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraphs()[0].content.len(), 1);
    }

    #[test]
    fn hand_built_tree_without_attributes() {
        let config = Config::default();
        let tree = vec![MarkupNode::element(
            "div",
            [],
            vec![
                MarkupNode::element("em", [], vec![MarkupNode::text("a")]),
                MarkupNode::element("custom-tag", [], vec![]),
                MarkupNode::text("b"),
            ],
        )];
        let doc = Resolver::new(&config).resolve(&tree);
        assert_eq!(
            styles(&doc),
            vec![vec![(StyleLabel::Italic, "a"), (StyleLabel::Normal, "b")]]
        );
    }

    #[test]
    fn sibling_branches_do_not_share_state() {
        let config = Config::default();
        let tree = vec![MarkupNode::element(
            "p",
            [],
            vec![
                MarkupNode::element(
                    "span",
                    [("style", "font-weight: 800")],
                    vec![MarkupNode::text("heavy")],
                ),
                MarkupNode::element("span", [], vec![MarkupNode::text("plain")]),
            ],
        )];
        let doc = Resolver::new(&config).resolve(&tree);
        assert_eq!(
            styles(&doc),
            vec![vec![(StyleLabel::Bold, "heavy"), (StyleLabel::Normal, "plain")]]
        );
    }

    #[test]
    fn display_declaration_overrides_tag() {
        let config = Config::default();
        let tree = vec![
            MarkupNode::element(
                "div",
                [("style", "display: inline")],
                vec![MarkupNode::text("a")],
            ),
            MarkupNode::element(
                "span",
                [("style", "display:flex")],
                vec![MarkupNode::text("b")],
            ),
            MarkupNode::text("c"),
        ];
        let doc = Resolver::new(&config).resolve(&tree);
        assert_eq!(
            styles(&doc),
            vec![
                vec![(StyleLabel::Normal, "a")],
                vec![(StyleLabel::Normal, "b")],
                vec![(StyleLabel::Normal, "c")],
            ]
        );
    }

    #[test]
    fn long_element_chain_resolves_without_recursion() {
        let config = Config::default();
        let mut node = MarkupNode::text("deep");
        for _ in 0..100_000 {
            node = MarkupNode::element("span", [], vec![node]);
        }
        let tree = vec![MarkupNode::element("strong", [], vec![node])];
        let doc = Resolver::new(&config).resolve(&tree);
        assert_eq!(styles(&doc), vec![vec![(StyleLabel::Bold, "deep")]]);
    }

    #[test]
    fn origin_signals_yield_to_inline_declaration() {
        let config = Config::default();
        let tree = vec![MarkupNode::element(
            "b",
            [
                ("id", "docs-internal-guid-1"),
                ("style", "font-weight:normal"),
            ],
            vec![
                MarkupNode::element(
                    "span",
                    [("style", "font-weight:700")],
                    vec![MarkupNode::text("T")],
                ),
                MarkupNode::text(" tail"),
            ],
        )];
        let doc = Resolver::new(&config).resolve(&tree);
        assert_eq!(
            styles(&doc),
            vec![vec![(StyleLabel::Bold, "T"), (StyleLabel::Normal, " tail")]]
        );
    }

    #[test]
    fn custom_origin_registry() {
        struct Always;
        impl crate::origin::OriginAdapter for Always {
            fn name(&self) -> &str {
                "always"
            }
            fn detects(&self, element: &Element) -> bool {
                element.tag == "span"
            }
            fn extract(&self, _: &Element, _: &Config) -> StyleSignals {
                StyleSignals {
                    bold: None,
                    italic: Some(true),
                }
            }
        }

        let config = Config::default();
        let mut origins = OriginAdapters::default();
        origins.register(Always);
        let tree = vec![MarkupNode::element("span", [], vec![MarkupNode::text("x")])];
        let doc = Resolver::with_origins(&config, origins).resolve(&tree);
        assert_eq!(styles(&doc), vec![vec![(StyleLabel::Italic, "x")]]);
    }
}
