use anyhow::Result;
use spotless_applier_core::{ModuleInfo, ModuleResolver, interfaces::ProjectModel, services::DiskFileSystem};

use crate::cli::ProjectArgs;
use crate::display::format_module;
use crate::host::ProjectContext;

pub fn modules_command(args: &ProjectArgs, json: bool) -> Result<()> {
    let project = ProjectContext::load(args)?;
    let resolved = ModuleResolver::new(&DiskFileSystem)
        .resolve(&project.model.modules(), project.model.base_path());
    let modules: Vec<ModuleInfo> = resolved.into_values().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    if modules.is_empty() {
        println!("❌ No Gradle or Maven modules found in {}", project.root.display());
        return Ok(());
    }

    println!("📦 Found {} module(s) in {}", modules.len(), project.root.display());
    let width = modules.iter().map(|m| m.name.len()).max().unwrap_or(0);
    for module in &modules {
        println!("   {}", format_module(module, width));
    }

    Ok(())
}
