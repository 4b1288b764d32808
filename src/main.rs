//! kiln's entry point: parses arguments, collects the project configuration
//! and runs the selected generation workflow.

use std::path::Path;

use kiln::{
    answers::{load_answers, AnswerSource},
    cli::{get_args, Args},
    collector::{collect_project_config, Defaults},
    config::ProjectConfig,
    error::{default_error_handler, Result},
    loader::load_template,
    logger::init_logger,
    processor::ensure_output_dir,
    prompt::DialoguerPrompter,
    reconcile::{check_dependencies, select_workflow, GenerationReport, Reconciler, Workflow},
    renderer::MiniJinjaRenderer,
    tools::SystemToolchain,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir()?.canonicalize()?;
    let tools = SystemToolchain::new(&working_dir);
    let prompter = DialoguerPrompter::new();
    let engine = MiniJinjaRenderer::new();

    println!("Python project template setup");
    if !args.skip_env_setup {
        check_dependencies(&tools, &prompter)?;
    }

    let template = load_template(&args.template)?;
    let preloaded = load_answers(AnswerSource::from_args(args.stdin, args.answers.as_deref()))?;
    let defaults = Defaults::detect(&tools, std::env::var("USER").ok());
    let config = collect_project_config(&prompter, &defaults, &preloaded)?;

    let output_dir = ensure_output_dir(&args.output_dir)?.canonicalize()?;
    let workflow =
        select_workflow(args.mode, &template, &working_dir, &output_dir, config.project_name())?;
    match &workflow {
        Workflow::NewDirectory { target } => println!("Creating project in '{}'", target.display()),
        Workflow::InPlace { root } => println!("Transforming '{}' in place", root.display()),
    }

    let report = Reconciler::new(&config, template.root(), &prompter, &tools, &engine)
        .force(args.force)
        .env_setup(!args.skip_env_setup)
        .run(&workflow)?;

    print_next_steps(&config, &report, &working_dir, args.skip_env_setup);
    Ok(())
}

fn print_next_steps(
    config: &ProjectConfig,
    report: &GenerationReport,
    working_dir: &Path,
    skipped_env_setup: bool,
) {
    println!(
        "Project '{}' created in '{}' ({} files written, {} template paths removed)",
        config.project_name(),
        report.project_dir.display(),
        report.written,
        report.removed
    );

    println!("\nNext steps:");
    if report.project_dir != working_dir {
        println!("  cd {}", report.project_dir.display());
    }
    if skipped_env_setup {
        println!("  just setup");
    }
    println!("  just test");
    println!("  just info");
    if config.features().ci {
        println!(
            "  git remote add origin git@github.com:{}/{}.git",
            config.identity().github_username,
            config.project_slug()
        );
        println!("  git push -u origin develop");
    }
}
