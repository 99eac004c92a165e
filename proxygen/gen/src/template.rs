//! Single-pass source templates.
//!
//! A [`Template`] is parsed once into literal text and named slots
//! (`{{name}}`). Rendering walks the segments once, filling each slot from an
//! ordered list of `(name, value)` pairs supplied through [`Fill`]. Slots with
//! no value render as empty text.
//!
//! ## Examples
//!
//! ```
//! use proxygen_gen::template::Template;
//!
//! let template = Template::parse("class {{name}} : Base<{{name}}> {}");
//! let text = template.fill().slot("name", "BookClientProxy").render();
//!
//! assert_eq!(text, "class BookClientProxy : Base<BookClientProxy> {}");
//! ```

const SLOT_OPEN: &str = "{{";
const SLOT_CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// An immutable, pre-parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `source`, splitting out every `{{name}}` slot.
    ///
    /// An unterminated `{{` is kept as literal text.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find(SLOT_OPEN) {
            let after_open = &rest[open + SLOT_OPEN.len()..];
            let Some(close) = after_open.find(SLOT_CLOSE) else {
                break;
            };

            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            segments.push(Segment::Slot(after_open[..close].trim().to_string()));
            rest = &after_open[close + SLOT_CLOSE.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Self { segments }
    }

    /// Starts filling this template.
    pub fn fill(&self) -> Fill<'_> {
        Fill {
            template: self,
            slots: Vec::new(),
        }
    }
}

/// Ordered slot values for one rendering of a [`Template`].
#[derive(Debug)]
pub struct Fill<'t> {
    template: &'t Template,
    slots: Vec<(String, String)>,
}

impl Fill<'_> {
    /// Sets the value of slot `name`. The first value given for a name wins.
    pub fn slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.push((name.into(), value.into()));
        self
    }

    /// Sets the value of slot `name` from a generator function.
    pub fn slot_with<F>(self, name: impl Into<String>, generate: F) -> Self
    where
        F: FnOnce() -> String,
    {
        let value = generate();
        self.slot(name, value)
    }

    /// Renders the template in a single pass over its segments.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.template.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(name) => {
                    if let Some((_, value)) = self.slots.iter().find(|(slot, _)| slot == name) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}
