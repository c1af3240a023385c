//! Reduce the resolved modules to the ones to reformat

use super::ResolvedModules;
use crate::{interfaces::ModuleSelector, types::ModuleInfo};

pub struct SelectionCoordinator;

impl SelectionCoordinator {
    /// Pick the modules to reformat.
    ///
    /// A single module is selected without asking. With several, the
    /// selector gets the non-root names and whether a root option exists; a
    /// cancelled answer selects nothing.
    pub fn select(resolved: &ResolvedModules, selector: &dyn ModuleSelector) -> Vec<ModuleInfo> {
        match resolved.len() {
            0 => return Vec::new(),
            1 => return resolved.values().cloned().collect(),
            _ => {}
        }

        let root = resolved.values().find(|m| m.is_root_module);
        let candidates: Vec<String> = resolved
            .values()
            .filter(|m| !m.is_root_module)
            .map(|m| m.name.clone())
            .collect();

        let response = selector.select(&candidates, root.is_some());
        if !response.confirmed {
            tracing::debug!("Module selection cancelled");
            return Vec::new();
        }

        if let Some(root) = root.filter(|_| response.apply_to_root) {
            return vec![root.clone()];
        }

        response
            .chosen
            .iter()
            .filter_map(|name| {
                let module = resolved.get(name).filter(|m| !m.is_root_module);
                if module.is_none() {
                    tracing::warn!("Ignoring unknown module '{}'", name);
                }
                module.cloned()
            })
            .collect()
    }
}
