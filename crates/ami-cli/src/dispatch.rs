use std::path::Path;

use anyhow::{anyhow, Context, Result};

use ami_core::{probe, resolve_in, ManifestStore, MANIFEST_FILE};
use ami_env::{
    activate_script, find_system_interpreter, install_from_manifest, install_packages,
    list_packages, locate, locate_pip, probe_installed, provision, uninstall_packages, EnvError,
    PackageProbe, PipInvocation, ProjectLayout,
};

use crate::completion::write_completions_script;
use crate::render::{current_output_style, print_status, OutputStyle};
use crate::{Cli, Commands};

pub fn run_cli(cli: Cli) -> Result<()> {
    let root = match cli.project_root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let layout = ProjectLayout::new(root);
    let style = current_output_style();

    match cli.command {
        Commands::Init => run_init(&layout, style),
        Commands::Install { names } => run_install(&layout, style, &names),
        Commands::Uninstall { names } => run_uninstall(&layout, style, &names),
        Commands::Run { script, args } => run_script(&layout, &script, &args),
        Commands::List => {
            let pip = require_pip(&layout)?;
            list_packages(&pip)?;
            Ok(())
        }
        Commands::Activate => run_activate(&layout),
        Commands::Doctor => run_doctor(&layout, style),
        Commands::Completions { shell } => write_completions_script(shell, &mut std::io::stdout()),
    }
}

fn require_pip(layout: &ProjectLayout) -> Result<PipInvocation> {
    Ok(locate_pip(layout)?.ok_or(EnvError::PipNotFound)?)
}

/// Detect-then-create: creation is deliberately not idempotent, so the
/// existence check happens here, through the path resolver.
fn ensure_manifest(layout: &ProjectLayout, style: OutputStyle) -> Result<ManifestStore> {
    let (path, exists) = resolve_in(layout.root(), MANIFEST_FILE)
        .context("failed to check for an existing manifest")?;
    let store = ManifestStore::new(path);
    if !exists {
        store.create()?;
        print_status(style, "ok", &format!("created {MANIFEST_FILE}"));
    }
    Ok(store)
}

fn run_init(layout: &ProjectLayout, style: OutputStyle) -> Result<()> {
    match locate(layout)? {
        Some(environment) => {
            print_status(
                style,
                "ok",
                &format!(
                    "virtual environment already present: {}",
                    environment.root.display()
                ),
            );
        }
        None => {
            print_status(style, "..", "creating virtual environment");
            let environment = provision(layout)?;
            print_status(
                style,
                "ok",
                &format!(
                    "virtual environment created: {}",
                    environment.root.display()
                ),
            );
        }
    }
    ensure_manifest(layout, style)?;
    Ok(())
}

fn run_install(layout: &ProjectLayout, style: OutputStyle, names: &[String]) -> Result<()> {
    let pip = require_pip(layout)?;

    if names.is_empty() {
        let store = ManifestStore::new(layout.manifest_path());
        let entries = store.read_all()?;
        if entries.is_empty() {
            print_status(style, "warn", "manifest has no entries; nothing to install");
            return Ok(());
        }
        install_from_manifest(&pip, layout)?;
        print_status(
            style,
            "ok",
            &format!("installed {} packages from {MANIFEST_FILE}", entries.len()),
        );
        return Ok(());
    }

    install_packages(&pip, names)?;
    let store = ensure_manifest(layout, style)?;
    let appended = store.merge(names)?;
    for name in &appended {
        print_status(style, "ok", &format!("added {name} to {MANIFEST_FILE}"));
    }
    if appended.is_empty() {
        print_status(style, "ok", "manifest already up to date");
    }
    Ok(())
}

fn run_uninstall(layout: &ProjectLayout, style: OutputStyle, names: &[String]) -> Result<()> {
    let pip = require_pip(layout)?;

    let mut installed = Vec::new();
    for name in names {
        match probe_installed(&pip, name)? {
            PackageProbe::Installed => installed.push(name.clone()),
            PackageProbe::NotInstalled => {
                print_status(style, "warn", &format!("{name} is not installed"));
            }
        }
    }
    if !installed.is_empty() {
        uninstall_packages(&pip, &installed)?;
    }

    let store = ManifestStore::new(layout.manifest_path());
    let removed = store.remove(names)?;
    for name in &removed {
        print_status(style, "ok", &format!("removed {name} from {MANIFEST_FILE}"));
    }
    if removed.is_empty() {
        print_status(style, "ok", "manifest unchanged");
    }
    Ok(())
}

fn run_script(layout: &ProjectLayout, script: &str, args: &[String]) -> Result<()> {
    let environment = locate(layout)?.ok_or(EnvError::EnvironmentNotFound)?;
    let status = environment.run_script(script, args)?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

fn run_activate(layout: &ProjectLayout) -> Result<()> {
    let environment = locate(layout)?.ok_or(EnvError::EnvironmentNotFound)?;
    let script = activate_script(&environment.root);
    if !probe(&script).context("failed to check for the activation script")? {
        return Err(anyhow!(
            "activation script not found at {}",
            script.display()
        ));
    }
    for line in format_activate_lines(&script, cfg!(windows)) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_activate_lines(script: &Path, windows: bool) -> Vec<String> {
    let invocation = if windows {
        format!("  {}", script.display())
    } else {
        format!("  source {}", script.display())
    };
    vec![
        "To activate the virtual environment, run:".to_string(),
        invocation,
    ]
}

fn run_doctor(layout: &ProjectLayout, style: OutputStyle) -> Result<()> {
    match find_system_interpreter() {
        Ok(path) => print_status(
            style,
            "ok",
            &format!("system interpreter: {}", path.display()),
        ),
        Err(EnvError::InterpreterNotFound) => {
            print_status(style, "err", "system interpreter: not found on PATH");
        }
        Err(err) => return Err(err.into()),
    }

    match locate(layout)? {
        Some(environment) => print_status(
            style,
            "ok",
            &format!("virtual environment: {}", environment.root.display()),
        ),
        None => print_status(
            style,
            "warn",
            "virtual environment: not found (run `ami init`)",
        ),
    }

    match locate_pip(layout)? {
        Some(pip) => print_status(style, "ok", &format!("pip: {}", pip.describe())),
        None => print_status(style, "warn", "pip: not found (run `ami init`)"),
    }

    let (path, exists) = resolve_in(layout.root(), MANIFEST_FILE)
        .context("failed to check for an existing manifest")?;
    if exists {
        print_status(style, "ok", &format!("manifest: {}", path.display()));
    } else {
        print_status(
            style,
            "warn",
            &format!("manifest: {MANIFEST_FILE} not found (run `ami init`)"),
        );
    }
    Ok(())
}
