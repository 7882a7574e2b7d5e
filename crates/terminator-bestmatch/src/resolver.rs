use crate::catalog::CandidateCatalog;
use crate::element::{Attribute, UIElement};
use crate::errors::AutomationError;
use crate::matcher::{self, BestMatch, MatchConfig};
use tracing::{debug, info, instrument};

/// Resolves friendly names (`"lblNewItemEdit"`, `"Button_Minimize"`) to
/// descendants of one root element.
///
/// The candidate catalog is built on first use and kept until [`rebuild`] or
/// [`invalidate`] is called. It is never refreshed on its own, so a caller
/// that knows the UI changed has to ask for a rebuild.
///
/// Not synchronized: share one resolver across threads only behind a lock.
///
/// [`rebuild`]: NameResolver::rebuild
/// [`invalidate`]: NameResolver::invalidate
#[derive(Debug)]
pub struct NameResolver {
    root: UIElement,
    config: MatchConfig,
    catalog: Option<CandidateCatalog>,
}

impl NameResolver {
    pub fn new(root: UIElement) -> Result<Self, AutomationError> {
        Self::with_config(root, MatchConfig::default())
    }

    pub fn with_config(root: UIElement, config: MatchConfig) -> Result<Self, AutomationError> {
        config.validate()?;
        if !root.is_valid() {
            return Err(AutomationError::InvalidRoot(format!(
                "{} is not attached to a tree",
                root.describe()
            )));
        }
        Ok(Self {
            root,
            config,
            catalog: None,
        })
    }

    pub fn root(&self) -> &UIElement {
        &self.root
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn is_built(&self) -> bool {
        self.catalog.is_some()
    }

    /// The cached catalog, built now if this is the first call.
    pub fn catalog(&mut self) -> Result<&CandidateCatalog, AutomationError> {
        match self.catalog {
            Some(ref catalog) => Ok(catalog),
            None => self.rebuild(),
        }
    }

    /// Walk the tree again and replace the cached catalog.
    #[instrument(level = "debug", skip(self), fields(root = %self.root.describe()))]
    pub fn rebuild(&mut self) -> Result<&CandidateCatalog, AutomationError> {
        let catalog = CandidateCatalog::build(&self.root)?;
        info!(
            "Indexed {} elements as {} candidates",
            catalog.elements().len(),
            catalog.len()
        );
        Ok(self.catalog.insert(catalog))
    }

    /// Drop the cached catalog; the next lookup rebuilds it.
    pub fn invalidate(&mut self) {
        if self.catalog.take().is_some() {
            debug!("Candidate catalog invalidated");
        }
    }

    /// Best match for `name` with its score, for diagnostics.
    pub fn find_best_match(&mut self, name: &str) -> Result<BestMatch, AutomationError> {
        let config = self.config;
        let catalog = self.catalog()?;
        matcher::find_best_match(name, catalog, &config)
    }

    /// Resolve `name` to the descendant it most likely refers to.
    pub fn resolve_by_name(&mut self, name: &str) -> Result<UIElement, AutomationError> {
        self.find_best_match(name).map(|found| found.element)
    }

    /// Dotted attribute access: a literal attribute of the root if it has
    /// one called `name`, otherwise the descendant `name` resolves to.
    ///
    /// A name that is neither fails with `AttributeNotFound`.
    pub fn attribute(&mut self, name: &str) -> Result<Attribute, AutomationError> {
        if let Some(value) = self.root.try_get_literal_attribute(name)? {
            return Ok(Attribute::Literal(value));
        }
        match self.resolve_by_name(name) {
            Ok(element) => Ok(Attribute::Element(element)),
            Err(AutomationError::NoMatch { best_score, .. }) => {
                Err(AutomationError::AttributeNotFound {
                    name: name.to_string(),
                    best_score,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Names that currently lead to `element`.
    pub fn queries_producing(&mut self, element: &UIElement) -> Result<Vec<String>, AutomationError> {
        Ok(self.catalog()?.queries_producing(element))
    }

    /// Follow a relative path such as `"lblNewItem.Edit"`.
    ///
    /// The first segment is resolved by name. Each further segment moves to
    /// the first following sibling whose control type matches it, ignoring
    /// case.
    pub fn find_relative(&mut self, path: &str) -> Result<UIElement, AutomationError> {
        let mut segments = path.split('.').map(str::trim);
        let first = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| AutomationError::InvalidArgument(format!("empty path '{path}'")))?;

        let mut current = self.resolve_by_name(first)?;
        for segment in segments {
            let wanted = segment.to_lowercase();
            let mut sibling = current.next_sibling()?;
            loop {
                match sibling {
                    Some(candidate) if candidate.control_type()?.to_lowercase() == wanted => {
                        current = candidate;
                        break;
                    }
                    Some(candidate) => sibling = candidate.next_sibling()?,
                    None => {
                        return Err(AutomationError::ElementNotFound(format!(
                            "no '{segment}' sibling after {} in path '{path}'",
                            current.describe()
                        )))
                    }
                }
            }
        }
        Ok(current)
    }
}
