use crate::core::error::CvssError;
use crate::core::metrics::{self, MetricKey};

/// Snapshot of the eight metric choices. `None` means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    values: [Option<String>; 8],
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from a caller-supplied mapping.
    ///
    /// Keys must be one of the eight metric keys. Abbreviations are stored
    /// verbatim and checked when the selection is scored.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, CvssError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut selection = Self::new();
        for (key, abbrev) in pairs {
            let key: MetricKey = key.parse()?;
            selection.values[key.index()] = abbrev.map(str::to_string);
        }
        Ok(selection)
    }

    pub fn get(&self, key: MetricKey) -> Option<&str> {
        self.values[key.index()].as_deref()
    }

    pub fn set(&mut self, key: MetricKey, abbrev: &str) -> Result<(), CvssError> {
        let option = metrics::option(key, abbrev)?;
        self.values[key.index()] = Some(option.abbrev.to_string());
        Ok(())
    }

    pub fn unset(&mut self, key: MetricKey) {
        self.values[key.index()] = None;
    }

    /// Selects `abbrev`, or clears the metric when it is already selected.
    /// Returns the resulting value.
    pub fn toggle(&mut self, key: MetricKey, abbrev: &str) -> Result<Option<&str>, CvssError> {
        if self.get(key) == Some(abbrev) {
            self.unset(key);
        } else {
            self.set(key, abbrev)?;
        }
        Ok(self.get(key))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn missing(&self) -> Vec<MetricKey> {
        MetricKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_none())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, Option<&str>)> + '_ {
        MetricKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}
