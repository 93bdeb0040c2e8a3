//! Extension traits for ZDK core types

use crate::{Environment, ModelRegistry, ProcessEnvironment, ProviderRegistrar, Result, ZConfig};

/// Extension trait for ZConfig to simplify provider activation
///
/// This trait provides convenience methods on ZConfig for activating the
/// built-in providers without manually building a [`ProviderRegistrar`].
///
/// # Example
/// ```no_run
/// use zdk_core::{ModelRole, ZConfig, ZConfigExt};
///
/// # fn example() -> zdk_core::Result<()> {
/// let config = ZConfig::load()?;
///
/// // Activate every provider whose credential is set
/// let registry = config.activate_providers()?;
/// let premium = registry.resolve(ModelRole::Premium)?;
/// # Ok(())
/// # }
/// ```
pub trait ZConfigExt {
    /// Activate the built-in providers against the process environment
    fn activate_providers(&self) -> Result<ModelRegistry>;

    /// Activate the built-in providers against an explicit environment view
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    /// use zdk_core::{ZConfig, ZConfigExt};
    ///
    /// let env: HashMap<String, String> = HashMap::new();
    /// let registry = ZConfig::test_defaults().activate_providers_with(&env).unwrap();
    /// assert!(registry.is_empty());
    /// ```
    fn activate_providers_with(&self, environment: &dyn Environment) -> Result<ModelRegistry>;

    /// Tags of the built-in providers whose credential gate currently holds
    fn available_providers(&self, environment: &dyn Environment) -> Vec<&'static str>;
}

impl ZConfigExt for ZConfig {
    fn activate_providers(&self) -> Result<ModelRegistry> {
        self.activate_providers_with(&ProcessEnvironment)
    }

    fn activate_providers_with(&self, environment: &dyn Environment) -> Result<ModelRegistry> {
        ProviderRegistrar::with_default_backends().activate(self, environment)
    }

    fn available_providers(&self, environment: &dyn Environment) -> Vec<&'static str> {
        ProviderRegistrar::with_default_backends().available_providers(environment)
    }
}
