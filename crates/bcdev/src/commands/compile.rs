//! Compile command - run one compile and print the verdict

use crate::cli::{CompileArgs, GlobalArgs};
use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::{Result, bail};
use bcdev_al::{CompileRequest, CompileVerdict};
use colored::Colorize;

pub fn run(global: &GlobalArgs, args: CompileArgs) -> Result<()> {
    let ctx = Context::new(global)?;

    let request = build_request(
        args.project,
        args.package_cache,
        args.out,
        args.assembly_probing_paths,
    )
    .with_defaults(&ctx.config.compile);
    request.validate()?;

    ctx.adapter.initialize();
    let verdict = ctx.adapter.compile(&request);

    if args.json {
        print_json(&verdict)?;
    } else {
        print_verdict(&verdict)?;
    }

    if !verdict.success {
        bail!("Compilation failed");
    }
    Ok(())
}

fn build_request(
    project: String,
    package_cache: Option<String>,
    out: Option<String>,
    probing_paths: Vec<String>,
) -> CompileRequest {
    let mut request = CompileRequest::new(project);
    if let Some(dir) = package_cache {
        request = request.package_cache_path(dir);
    }
    if let Some(file) = out {
        request = request.output_path(file);
    }
    if !probing_paths.is_empty() {
        request = request.assembly_probing_paths(probing_paths);
    }
    request
}

fn print_verdict(verdict: &CompileVerdict) -> std::io::Result<()> {
    if verdict.success {
        print_text(&format!("{} Compilation succeeded", "✓".green()))?;
    } else {
        print_text(&format!("{} Compilation failed", "✗".red()))?;
    }
    print_text("")?;
    print_text(&verdict.output)?;

    if let Some(errors) = &verdict.errors {
        print_text("")?;
        print_text(&format!("{} ({}):", "Diagnostics".bold(), errors.len()))?;
        for error in errors {
            print_text(&format!("  - {}", error))?;
        }
    }
    Ok(())
}
