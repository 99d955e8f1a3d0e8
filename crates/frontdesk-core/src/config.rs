/// Trait for loading configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field `foo_bar` is read from `FOO_BAR`.
/// Use `#[serde(default = "...")]` for optional settings.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load from the process environment, returning the first missing or malformed variable.
    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of `(NAME, value)` pairs.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }

    /// Load at startup.
    ///
    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(e) => panic!("failed to load config from environment: {e}"),
        }
    }
}
