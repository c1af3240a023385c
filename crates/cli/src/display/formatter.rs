use spotless_applier_core::ModuleInfo;

/// One line per module: name, tool, path and a root marker.
pub fn format_module(module: &ModuleInfo, name_width: usize) -> String {
    format!(
        "{:<width$}  {:<6}  {}{}",
        module.name,
        module.kind.name(),
        module.root_path.display(),
        if module.is_root_module { "  (root)" } else { "" },
        width = name_width
    )
}

/// Shell-like rendering of a launch command line.
pub fn format_spec(program: &str, args: &[String]) -> String {
    let mut cmd = String::from(program);
    for arg in args {
        cmd.push(' ');
        if arg.contains(' ') {
            cmd.push_str(&format!("'{arg}'"));
        } else {
            cmd.push_str(arg);
        }
    }
    cmd
}
