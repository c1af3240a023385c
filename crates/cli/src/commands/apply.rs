use anyhow::{Context, Result, bail};
use futures::future::join_all;
use spotless_applier_core::{TaskHandle, interfaces::ModuleSelector};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::ApplyArgs;
use crate::display::format_spec;
use crate::host::{ConsoleNotifier, FlagSelector, ProjectContext, PromptSelector};

pub async fn apply_command(args: ApplyArgs) -> Result<()> {
    let project = ProjectContext::load(&args.project)?;
    debug!("Applying spotless in {}", project.root.display());

    let file = args
        .file
        .as_deref()
        .map(ProjectContext::absolute_file)
        .transpose()?;

    let notifier = Arc::new(ConsoleNotifier::new());
    let applier = project.applier(notifier.clone(), selector_for(&args));

    if args.dry_run {
        let launcher = project.launcher();
        let specs = applier.plan(file).context("Failed to build spotless command")?;
        if specs.is_empty() {
            println!("Nothing to reformat");
        }
        for spec in specs {
            let (program, argv) = launcher.command_line(&spec)?;
            println!("{}", format_spec(&program, &argv));
            println!("Working directory: {}", spec.working_dir.display());
        }
        return Ok(());
    }

    let handles = applier.run(file);
    if handles.is_empty() {
        if notifier.had_error() {
            bail!("No spotless task was launched");
        }
        info!("Nothing to reformat");
        return Ok(());
    }

    let total = handles.len();
    let outcomes = join_all(handles.into_iter().map(TaskHandle::wait)).await;
    let failed = outcomes.iter().filter(|outcome| !outcome.success).count();

    if failed > 0 {
        bail!("{failed} of {total} spotless task(s) failed");
    }
    Ok(())
}

fn selector_for(args: &ApplyArgs) -> Box<dyn ModuleSelector> {
    let explicit = args.root || args.all || !args.modules.is_empty();
    if explicit || args.non_interactive || !std::io::stdin().is_terminal() {
        Box::new(FlagSelector {
            modules: args.modules.clone(),
            root: args.root,
            all: args.all,
        })
    } else {
        Box::new(PromptSelector)
    }
}
