/// Role or container names handed to user construction and membership calls.
///
/// Replaces "a single name or a sequence of names" with an explicit input:
/// callers say which one they mean, or use the `From` conversions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Names {
    /// Nothing given; the configured default applies
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl Names {
    /// Names given explicitly, or `None` when the default should apply.
    ///
    /// An empty name or an empty `Many` counts as "not given".
    pub fn explicit(&self) -> Option<Vec<String>> {
        match self {
            Names::None => None,
            Names::One(name) if name.is_empty() => None,
            Names::One(name) => Some(vec![name.clone()]),
            Names::Many(names) if names.is_empty() => None,
            Names::Many(names) => Some(names.clone()),
        }
    }

    /// Explicit names, else the default when it is non-empty, else nothing.
    pub fn resolve(&self, default: Option<&str>) -> Vec<String> {
        if let Some(names) = self.explicit() {
            return names;
        }
        match default {
            Some(name) if !name.is_empty() => vec![name.to_owned()],
            _ => Vec::new(),
        }
    }
}

impl From<&str> for Names {
    fn from(value: &str) -> Self {
        Names::One(value.to_owned())
    }
}

impl From<String> for Names {
    fn from(value: String) -> Self {
        Names::One(value)
    }
}

impl From<Vec<String>> for Names {
    fn from(value: Vec<String>) -> Self {
        Names::Many(value)
    }
}

impl From<Vec<&str>> for Names {
    fn from(value: Vec<&str>) -> Self {
        Names::Many(value.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Names {
    fn from(value: &[&str]) -> Self {
        Names::Many(value.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(value: [&str; N]) -> Self {
        Names::Many(value.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<T: Into<Names>> From<Option<T>> for Names {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
