use crate::keys::StatKey;
use core::fmt::{Display, Formatter, Result as FmtResult};

/// Separator between the components of a joined category path
pub const PATH_SEPARATOR: &str = "-";

/// Position of a key within the three-level category hierarchy
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryPath {
    pub super_category: String,
    pub sub: Option<String>,
    pub subsub: Option<String>,
}

impl CategoryPath {
    #[must_use]
    pub fn new(super_category: impl Into<String>, sub: Option<&str>, subsub: Option<&str>) -> Self {
        Self {
            super_category: super_category.into(),
            sub: sub.map(ToString::to_string),
            subsub: subsub.map(ToString::to_string),
        }
    }

    /// The path recorded on a key, if it has been categorized
    #[must_use]
    pub fn of(key: &StatKey) -> Option<Self> {
        key.super_category.as_deref().map(|super_category| Self::new(super_category, key.sub.as_deref(), key.subsub.as_deref()))
    }

    /// The path itself and each of its ancestors, shallowest first
    ///
    /// A `subsub` only counts when a `sub` is present.
    #[must_use]
    pub fn prefixes(&self) -> Vec<Self> {
        let mut prefixes = vec![Self::new(&*self.super_category, None, None)];
        if let Some(sub) = &self.sub {
            prefixes.push(Self::new(&*self.super_category, Some(sub.as_str()), None));
            if let Some(subsub) = &self.subsub {
                prefixes.push(Self::new(&*self.super_category, Some(sub.as_str()), Some(subsub.as_str())));
            }
        }
        prefixes
    }

    /// Record this path on a key
    pub fn assign_to(&self, key: &mut StatKey) {
        key.super_category = Some(self.super_category.clone());
        key.sub.clone_from(&self.sub);
        key.subsub.clone_from(&self.subsub);
    }
}

/// Renders the present components joined with [`PATH_SEPARATOR`], e.g. `Disk-Activity`
impl Display for CategoryPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.super_category)?;
        for component in [&self.sub, &self.subsub].into_iter().flatten() {
            write!(f, "{PATH_SEPARATOR}{component}")?;
        }
        Ok(())
    }
}
