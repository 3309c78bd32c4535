#![forbid(unsafe_code)]

//! Ordered tab registry.
//!
//! Registration order is display order. The registry is frozen when an
//! engine starts from it; later registrations fail with
//! [`EngineError::AlreadyRunning`].

use crate::content::{TabContent, TabContext, TabFactory};
use crate::error::EngineError;

struct TabDescriptor {
    name: String,
    sub_tabs: Vec<String>,
    factory: TabFactory,
}

/// Ordered set of tab descriptors with unique names.
#[derive(Default)]
pub struct TabRegistry {
    tabs: Vec<TabDescriptor>,
    frozen: bool,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tab at the end of the display order.
    ///
    /// `sub_tabs` may be empty.
    pub fn register<F, I, S>(
        &mut self,
        name: impl Into<String>,
        factory: F,
        sub_tabs: I,
    ) -> Result<(), EngineError>
    where
        F: Fn(&TabContext) -> Box<dyn TabContent> + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if self.frozen {
            return Err(EngineError::AlreadyRunning(name));
        }
        if self.index_of(&name).is_some() {
            return Err(EngineError::DuplicateName(name));
        }
        let sub_tabs = sub_tabs.into_iter().map(Into::into).collect();
        self.tabs.push(TabDescriptor {
            name,
            sub_tabs,
            factory: Box::new(factory),
        });
        Ok(())
    }

    /// Tab names in registration order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.tabs.iter().map(|t| t.name.as_str())
    }

    /// Sub-tab names of a registered tab.
    pub fn sub_tabs(&self, name: &str) -> Result<&[String], EngineError> {
        self.tabs
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.sub_tabs.as_slice())
            .ok_or_else(|| EngineError::UnknownTab(name.to_owned()))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Whether an engine has started from this registry.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Build a fresh content instance for a registered tab.
    pub fn instantiate(
        &self,
        name: &str,
        ctx: &TabContext,
    ) -> Result<Box<dyn TabContent>, EngineError> {
        self.tabs
            .iter()
            .find(|t| t.name == name)
            .map(|t| (t.factory)(ctx))
            .ok_or_else(|| EngineError::UnknownTab(name.to_owned()))
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }
}

impl std::fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabRegistry")
            .field("tabs", &self.names().collect::<Vec<_>>())
            .field("frozen", &self.frozen)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Probe, probe_context};

    fn factory(_: &TabContext) -> Box<dyn TabContent> {
        Box::new(Probe::default())
    }

    #[test]
    fn preserves_registration_order() {
        let mut reg = TabRegistry::new();
        reg.register("STAT", factory, ["STATUS", "SPECIAL"]).unwrap();
        reg.register("INV", factory, ["WEAPONS"]).unwrap();
        reg.register("RADIO", factory, Vec::<String>::new()).unwrap();
        assert_eq!(reg.names().collect::<Vec<_>>(), ["STAT", "INV", "RADIO"]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.index_of("RADIO"), Some(2));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut reg = TabRegistry::new();
        reg.register("STAT", factory, ["A"]).unwrap();
        let err = reg.register("STAT", factory, ["B"]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateName("STAT".into()));
        assert_eq!(reg.sub_tabs("STAT").unwrap(), ["A".to_string()]);
    }

    #[test]
    fn sub_tabs_of_unknown_tab() {
        let reg = TabRegistry::new();
        assert_eq!(
            reg.sub_tabs("MAP").unwrap_err(),
            EngineError::UnknownTab("MAP".into())
        );
    }

    #[test]
    fn empty_sub_tab_list_is_valid() {
        let mut reg = TabRegistry::new();
        reg.register("RADIO", factory, Vec::<&str>::new()).unwrap();
        assert!(reg.sub_tabs("RADIO").unwrap().is_empty());
    }

    #[test]
    fn frozen_registry_rejects_registration() {
        let mut reg = TabRegistry::new();
        reg.register("STAT", factory, ["A"]).unwrap();
        reg.freeze();
        let err = reg.register("INV", factory, ["B"]).unwrap_err();
        assert_eq!(err, EngineError::AlreadyRunning("INV".into()));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn instantiate_unknown() {
        let reg = TabRegistry::new();
        let ctx = probe_context("MAP");
        assert!(matches!(
            reg.instantiate("MAP", &ctx),
            Err(EngineError::UnknownTab(_))
        ));
    }
}
