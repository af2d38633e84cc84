//! Immutable wrap chains over a base description.
//!
//! A chain is built bottom-up: a base first, then each `wrap` adds one layer
//! that owns everything beneath it. Describing a layer renders the base
//! followed by every label from the innermost layer outwards, joined with
//! `" with "`. Layers are reference counted, so cloning a chain or keeping an
//! inner layer alive is cheap and never copies the structure.
//!
//! Traversal and teardown are iterative; chain depth is bounded by memory,
//! not by the call stack.

use crate::decoration::ingredient::Ingredient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::sync::{Arc, OnceLock};

const SEPARATOR: &str = " with ";

/// One layer of a decoration chain; see the module docs.
#[derive(Clone)]
pub struct Decoration(Arc<Node>);

enum Node {
    Base(String),
    Decorated { inner: Decoration, ingredient: String },
}

/// Borrowed view of a single layer, for callers that match on its shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer<'a> {
    Base(&'a str),
    Decorated {
        inner: &'a Decoration,
        ingredient: &'a str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Structured form of a chain: its parts plus the rendered description.
pub struct DescriptionSummary {
    pub base: String,
    pub ingredients: Vec<String>,
    pub description: String,
}

impl Decoration {
    pub fn base(description: impl Into<String>) -> Self {
        Decoration(Arc::new(Node::Base(description.into())))
    }

    /// New outer layer owning `self` and contributing `ingredient`.
    pub fn wrap(self, ingredient: impl Into<String>) -> Self {
        Decoration(Arc::new(Node::Decorated {
            inner: self,
            ingredient: ingredient.into(),
        }))
    }

    pub fn add(self, ingredient: Ingredient) -> Self {
        self.wrap(ingredient.as_str())
    }

    /// Base plus `ingredients` applied in order, first one innermost.
    pub fn from_recipe<I, S>(base: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ingredients
            .into_iter()
            .fold(Decoration::base(base), |chain, ingredient| chain.wrap(ingredient))
    }

    pub fn layer(&self) -> Layer<'_> {
        match &*self.0 {
            Node::Base(description) => Layer::Base(description.as_str()),
            Node::Decorated { inner, ingredient } => Layer::Decorated {
                inner,
                ingredient: ingredient.as_str(),
            },
        }
    }

    /// The layer this one decorates; `None` for a base.
    pub fn inner(&self) -> Option<&Decoration> {
        match &*self.0 {
            Node::Base(_) => None,
            Node::Decorated { inner, .. } => Some(inner),
        }
    }

    /// Label contributed by this layer; `None` for a base.
    pub fn ingredient(&self) -> Option<&str> {
        match &*self.0 {
            Node::Base(_) => None,
            Node::Decorated { ingredient, .. } => Some(ingredient.as_str()),
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(&*self.0, Node::Base(_))
    }

    /// Layers from this one down to the base.
    pub fn layers(&self) -> Layers<'_> {
        Layers { next: Some(self) }
    }

    pub fn base_description(&self) -> &str {
        let mut current = self;
        loop {
            match &*current.0 {
                Node::Base(description) => return description.as_str(),
                Node::Decorated { inner, .. } => current = inner,
            }
        }
    }

    /// Number of decorating layers above the base.
    pub fn depth(&self) -> usize {
        self.layers().filter(|layer| !layer.is_base()).count()
    }

    /// Contributed labels, innermost first.
    pub fn ingredients(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.layers().filter_map(Decoration::ingredient).collect();
        labels.reverse();
        labels
    }

    pub fn describe(&self) -> String {
        let mut description = self.base_description().to_string();
        for label in self.ingredients() {
            description.push_str(SEPARATOR);
            description.push_str(label);
        }
        description
    }

    pub fn summary(&self) -> DescriptionSummary {
        DescriptionSummary {
            base: self.base_description().to_string(),
            ingredients: self.ingredients().into_iter().map(str::to_string).collect(),
            description: self.describe(),
        }
    }
}

/// Iterator returned by [`Decoration::layers`].
pub struct Layers<'a> {
    next: Option<&'a Decoration>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a Decoration;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner();
        Some(current)
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoration")
            .field("base", &self.base_description())
            .field("ingredients", &self.ingredients())
            .finish()
    }
}

impl PartialEq for Decoration {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.base_description() == other.base_description()
                && self.layers().count() == other.layers().count()
                && self
                    .layers()
                    .zip(other.layers())
                    .all(|(a, b)| a.ingredient() == b.ingredient()))
    }
}

impl Eq for Decoration {}

// Stand-in swapped into a layer while it is being torn down.
fn detached() -> Arc<Node> {
    static DETACHED: OnceLock<Arc<Node>> = OnceLock::new();
    Arc::clone(DETACHED.get_or_init(|| Arc::new(Node::Base(String::new()))))
}

impl Drop for Node {
    fn drop(&mut self) {
        let Node::Decorated { inner, .. } = self else {
            return;
        };
        let mut next = mem::replace(&mut inner.0, detached());
        // Stop at the first layer someone else still holds.
        while let Ok(mut node) = Arc::try_unwrap(next) {
            match &mut node {
                Node::Decorated { inner, .. } => next = mem::replace(&mut inner.0, detached()),
                Node::Base(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_alone_has_no_separator() {
        let coffee = Decoration::base("Coffee");
        assert_eq!(coffee.describe(), "Coffee");
        assert_eq!(coffee.depth(), 0);
        assert!(coffee.ingredients().is_empty());
    }

    #[test]
    fn labels_render_innermost_first() {
        let drink = Decoration::base("Coffee")
            .wrap("carmel")
            .wrap("milk")
            .wrap("sugar");
        assert_eq!(drink.describe(), "Coffee with carmel with milk with sugar");
        assert_eq!(drink.depth(), 3);
        assert_eq!(drink.ingredient(), Some("sugar"));
    }

    #[test]
    fn inner_layer_describes_like_standalone() {
        let drink = Decoration::from_recipe("Tea", ["milk", "sugar"]);
        let inner = drink.inner().expect("decorated layer has inner");
        assert_eq!(inner.describe(), "Tea with milk");
        assert_eq!(inner, &Decoration::base("Tea").wrap("milk"));
        assert_eq!(drink.describe(), drink.describe());
    }

    #[test]
    fn layer_view_matches_shape() {
        let drink = Decoration::base("Coffee").add(Ingredient::Milk);
        match drink.layer() {
            Layer::Decorated { inner, ingredient } => {
                assert_eq!(ingredient, "milk");
                assert_eq!(inner.layer(), Layer::Base("Coffee"));
            }
            Layer::Base(_) => panic!("expected decorated layer"),
        }
    }

    #[test]
    fn shared_inner_survives_outer_drop() {
        let base = Decoration::base("Coffee").wrap("milk");
        let kept = base.clone();
        let outer = base.wrap("sugar");
        drop(outer);
        assert_eq!(kept.describe(), "Coffee with milk");
    }

    #[test]
    fn equality_compares_structure() {
        let a = Decoration::from_recipe("Coffee", ["milk"]);
        let b = Decoration::base("Coffee").wrap("milk");
        let c = Decoration::base("Coffee").wrap("sugar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(Decoration::base("Coffee"), a);
    }

    #[test]
    fn summary_carries_parts_and_text() {
        let summary = Decoration::from_recipe("Coffee", ["carmel", "milk"]).summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "base": "Coffee",
                "ingredients": ["carmel", "milk"],
                "description": "Coffee with carmel with milk"
            })
        );
    }
}
