//! glstubs CLI - generates compile-failing stubs for deprecated OpenGL symbols.
//!
//! Reads `gl-deprecated.h` and `glew.h` from a Blender checkout, keeps the
//! symbols `source/blender` still uses, and writes `stubs.c` plus a
//! `stubs.err` listing names glew.h has no prototype for.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use glstubs_core::{
    init_plain_logging, init_structured_logging, load_config, load_config_file, log_error,
    log_warn, print_json, print_plain, Glstubs, GlstubsConfig, GlstubsError, StubReport,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stub out deprecated OpenGL symbols used by Blender")]
pub struct Cli {
    /// Full path to the Blender source checkout
    blender_dir: PathBuf,

    /// Directory to write stubs.c and stubs.err to (default: current directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Config file (default: ./glstubs.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stub every deprecated symbol, not just those source/blender mentions
    #[arg(long)]
    no_usage_filter: bool,

    /// Skip glew.h prototypes with unknown return types instead of failing
    #[arg(long)]
    skip_unknown_types: bool,

    /// File-name glob to scan, repeatable (replaces the defaults)
    #[arg(long, value_name = "GLOB")]
    include: Vec<String>,

    /// Directory/file-name glob to skip, repeatable (replaces the defaults)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when some names could not be resolved
    #[arg(long)]
    check: bool,

    /// Emit structured JSON logs on stderr
    #[arg(long)]
    log_json: bool,
}

/// Loads the explicit config file, or `glstubs.toml` from the working directory.
fn resolve_config(explicit: Option<&Path>) -> Result<GlstubsConfig> {
    match explicit {
        Some(path) => Ok(load_config_file(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_config(&cwd)?.unwrap_or_default())
        }
    }
}

fn build(cli: &Cli, config: GlstubsConfig) -> Glstubs {
    let mut builder = Glstubs::new(&cli.blender_dir)
        .with_config(config)
        .includes(cli.include.iter().cloned())
        .excludes(cli.exclude.iter().cloned());

    if cli.no_usage_filter {
        builder = builder.filter_unused(false);
    }
    if cli.skip_unknown_types {
        builder = builder.skip_unknown_types(true);
    }
    if let Some(dir) = &cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if !cli.json {
        builder = builder.on_progress(|stage| println!("{}", stage));
    }
    builder
}

fn run(cli: &Cli) -> Result<StubReport> {
    let config = resolve_config(cli.config.as_deref())?;
    build(cli, config).run()
}

/// Exit status for a failed run.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<GlstubsError>()
        .map(GlstubsError::exit_code)
        .unwrap_or(1)
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] glstubs internal error: {}", info);
        eprintln!("[PANIC] Output files may be missing or incomplete.");
    }));

    let cli = Cli::parse();

    if cli.log_json {
        init_structured_logging();
    } else {
        init_plain_logging();
    }

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            if cli.log_json {
                log_error(&format!("{:#}", e));
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(exit_code_for(&e));
        }
    };

    if cli.json {
        print_json(&report);
    } else {
        print_plain(&report);
    }

    if cli.check && report.has_unresolved() {
        log_warn(&format!("unresolved names: {}", report.unresolved.join(", ")));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glstubs_core::InputKind;
    use std::ffi::OsStr;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir()
            .join("glstubs_cli_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).ok();
        }
        fs::create_dir_all(&temp_dir).unwrap();
        temp_dir
    }

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    // --- argument parsing ---

    #[test]
    fn test_requires_blender_dir() {
        assert!(Cli::try_parse_from(["glstubs"]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "glstubs",
            "/src/blender",
            "--no-usage-filter",
            "--exclude",
            "extern",
            "--exclude",
            "tests",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.blender_dir, PathBuf::from("/src/blender"));
        assert!(cli.no_usage_filter);
        assert_eq!(cli.exclude, vec!["extern", "tests"]);
        assert!(cli.json);
        assert!(!cli.check);
    }

    #[test]
    fn test_glob_flags_before_blender_dir() {
        let cli = Cli::try_parse_from([
            "glstubs",
            "--exclude",
            "tests",
            "--include",
            "*.c",
            "/src/blender",
        ])
        .unwrap();
        assert_eq!(cli.blender_dir, PathBuf::from("/src/blender"));
        assert_eq!(cli.exclude, vec!["tests"]);
        assert_eq!(cli.include, vec!["*.c"]);
    }

    // --- exit codes ---

    #[test]
    fn test_exit_code_not_a_directory() {
        let dir = create_temp_dir("not_dir");
        let file = dir.join("file.txt");
        create_file(&file, "");
        let cli = Cli::try_parse_from([OsStr::new("glstubs"), file.as_os_str()]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn test_exit_code_missing_header() {
        let dir = create_temp_dir("missing");
        let cli = Cli::try_parse_from([OsStr::new("glstubs"), dir.as_os_str()]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GlstubsError>(),
            Some(GlstubsError::MissingInput {
                kind: InputKind::GlDeprecated,
                ..
            })
        ));
        assert_eq!(exit_code_for(&err), 3);
    }

    #[test]
    fn test_generic_error_exit_code() {
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }

    // --- end to end ---

    #[test]
    fn test_run_with_explicit_config() {
        let dir = create_temp_dir("e2e");
        create_file(
            &dir.join("intern/glew-mx/intern/gl-deprecated.h"),
            "#define glAccum DO_NOT_USE_glAccum\n#define glNoProto DO_NOT_USE_glNoProto\n",
        );
        create_file(
            &dir.join("extern/glew/include/GL/glew.h"),
            "GLAPI void GLAPIENTRY glAccum (GLenum op, GLfloat value);\n",
        );
        let out = dir.join("out");
        let config = dir.join("custom.toml");
        create_file(
            &config,
            &format!("filter_unused = false\n\n[output]\ndir = {:?}\n", out.display().to_string()),
        );

        let cli = Cli::try_parse_from([
            OsStr::new("glstubs"),
            dir.as_os_str(),
            OsStr::new("--config"),
            config.as_os_str(),
            OsStr::new("--json"),
        ])
        .unwrap();
        let report = run(&cli).unwrap();

        assert_eq!(report.resolved.len(), 1);
        assert_eq!(report.unresolved, vec!["glNoProto"]);
        assert_eq!(fs::read_to_string(out.join("stubs.err")).unwrap(), "glNoProto");
        assert!(out.join("stubs.c").exists());
    }
}
