use crate::metadata::{keys, Metadata, MetadataCodec};

/// A named analytics event.
///
/// The attributes reach the analytics sink unchanged, reserved names
/// included.
pub trait AnalyticsEvent {
    /// Event name, e.g. `"purchase"`.
    fn name(&self) -> &str;

    /// Event parameters.
    fn attributes(&self) -> Option<Metadata> {
        None
    }
}

/// A ready-made [`AnalyticsEvent`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Event name.
    pub name: String,
    /// Event parameters.
    pub attributes: Metadata,
}

impl Event {
    /// Creates an event without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Event {
            name: name.into(),
            attributes: Metadata::new(),
        }
    }

    /// Adds a parameter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl AnalyticsEvent for Event {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> Option<Metadata> {
        Some(self.attributes.clone())
    }
}

/// A screen view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
pub struct AnalyticsScreen {
    /// Name of the screen, e.g. `"Home"`.
    pub screen_name: String,
    /// Class implementing the screen, e.g. `"HomeViewController"`.
    pub screen_class: String,
}

impl AnalyticsScreen {
    /// Creates a screen descriptor.
    pub fn new(screen_name: impl Into<String>, screen_class: impl Into<String>) -> Self {
        AnalyticsScreen {
            screen_name: screen_name.into(),
            screen_class: screen_class.into(),
        }
    }
}

impl MetadataCodec for AnalyticsScreen {
    fn encode(&self) -> Metadata {
        Metadata::new()
            .with(keys::SCREEN_NAME, self.screen_name.as_str())
            .with(keys::SCREEN_CLASS, self.screen_class.as_str())
    }

    fn decode(metadata: &Metadata) -> Self {
        AnalyticsScreen {
            screen_name: metadata
                .get(keys::SCREEN_NAME)
                .unwrap_or_default()
                .to_owned(),
            screen_class: metadata
                .get(keys::SCREEN_CLASS)
                .unwrap_or_default()
                .to_owned(),
        }
    }
}
