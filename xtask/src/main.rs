use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for render-frames")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy with warnings denied
    Clippy,
    /// Run tests, optionally restricted to one library module
    Test {
        /// Module filter, e.g. `timing` or `capture`
        module: Option<String>,
        /// Also run the PNG-less build
        #[arg(long)]
        no_png: bool,
    },
    /// Run benchmarks
    Bench,
    /// Render the frames with the built-in pattern generator
    Render {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy => run_clippy(),
        Commands::Test { module, no_png } => run_test(module.as_deref(), no_png),
        Commands::Bench => cargo(&["bench"]),
        Commands::Render { release } => run_render(release),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", run_clippy, verbose)?;
    run_task("Test", || run_test(None, true), verbose)?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn run_clippy() -> Result<()> {
    cargo(&["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"])
}

fn run_test(module: Option<&str>, no_png: bool) -> Result<()> {
    match module {
        Some(name) => {
            println!("{} Running {} tests...", "→".blue(), name.bold());
            cargo(&["test", "--all-features", "--lib", name])?;
        }
        None => cargo(&["test", "--all-features"])?,
    }

    if no_png {
        println!("{} Running tests without PNG support...", "→".blue());
        cargo(&["test", "--no-default-features"])?;
    }

    Ok(())
}

fn run_render(release: bool) -> Result<()> {
    println!("{}", "=== Render Frames ===".bold().blue());

    let config = Path::new("render_frames.toml");
    if config.exists() {
        println!("{} Config: {}", "→".blue(), config.display().to_string().cyan());
    } else {
        println!("{} Config: {}", "→".blue(), "defaults".yellow());
    }

    let start = Instant::now();

    if release {
        cargo(&["run", "--release", "--bin", "render-frames"])?;
    } else {
        cargo(&["run", "--bin", "render-frames"])?;
    }

    println!(
        "\n{} Frames rendered in {}",
        "✓".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();
    let result = task();

    match &result {
        Ok(_) if verbose => println!(
            "{} ({:.2}s)",
            "✓".green().bold(),
            start.elapsed().as_secs_f64()
        ),
        Ok(_) => println!("{}", "✓".green().bold()),
        Err(_) => println!("{}", "✗".red().bold()),
    }

    result
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed with exit code: {}", args.join(" "), status);
    }

    Ok(())
}
