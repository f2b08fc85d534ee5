//! Selector AST: SelectorList, Selector, CompoundSelector, components.

/// How an attribute selector compares the attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOp {
    /// `[name]`: attribute is present.
    Exists,
    /// `[name=value]`
    Equals(String),
    /// `[name^=value]`
    Prefix(String),
    /// `[name$=value]`
    Suffix(String),
    /// `[name*=value]`
    Substring(String),
    /// `[name~=value]`: whitespace-separated word match.
    Includes(String),
}

/// An attribute selector: `[name]`, `[name="value"]`, `[name^="-"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub op: AttributeOp,
}

/// Supported pseudo-classes.
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    /// `:not(a, b)`: matches when none of the inner compounds match.
    Not(Vec<CompoundSelector>),
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:empty`
    Empty,
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches the tag name (e.g. `button`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[role="tab"]`.
    Attribute(AttributeSelector),
    /// Pseudo-class: `:not(...)`, `:first-child`.
    PseudoClass(PseudoClass),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A compound selector: simple selectors without combinators.
///
/// `button.primary:not([disabled])` is one `CompoundSelector` with three
/// components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component.
    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A complex selector: compound selectors joined by combinators.
///
/// `#tabNav > [role="tablist"] button` is parts
/// `[Compound(#tabNav), Combinator(Child), Compound([role=tablist]),
/// Combinator(Descendant), Compound(button)]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

/// A comma-separated selector group, as accepted by `querySelectorAll`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Whether the list holds no selectors.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Number of comma-separated selectors.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }
}
