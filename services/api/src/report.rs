use capability_maturity::assessment::report::build_report;
use capability_maturity::assessment::{AssessmentReport, ScoreImporter};
use capability_maturity::config::FrameworkSource;
use capability_maturity::error::AppError;
use capability_maturity::framework::Framework;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessmentReportArgs {
    /// CSV export with `Process ID,Score` columns
    #[arg(long)]
    pub(crate) scores_csv: PathBuf,
    /// Optional CSV export with `Category ID,Manual Score,Is Manual` columns
    #[arg(long)]
    pub(crate) overrides_csv: Option<PathBuf>,
    /// Alternative taxonomy as JSON (defaults to the standard framework)
    #[arg(long)]
    pub(crate) framework: Option<PathBuf>,
    /// Include per-category scores under each domain
    #[arg(long)]
    pub(crate) categories: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FrameworkShowArgs {
    /// Alternative taxonomy as JSON (defaults to the standard framework)
    #[arg(long)]
    pub(crate) framework: Option<PathBuf>,
    /// List the processes of every category
    #[arg(long)]
    pub(crate) processes: bool,
}

fn load_framework(path: Option<PathBuf>) -> Result<Framework, AppError> {
    let source = path.map_or(FrameworkSource::Standard, FrameworkSource::File);
    Ok(source.load()?)
}

pub(crate) fn run_assessment_report(args: AssessmentReportArgs) -> Result<(), AppError> {
    let AssessmentReportArgs {
        scores_csv,
        overrides_csv,
        framework,
        categories,
    } = args;

    let framework = load_framework(framework)?;
    let importer = ScoreImporter::new(&framework);

    let scores = importer.scores_from_path(&scores_csv)?;
    let overrides = match overrides_csv {
        Some(path) => importer.overrides_from_path(path)?,
        None => Default::default(),
    };

    let report = build_report(&framework, &scores.scores, &overrides.overrides);
    println!("Capability maturity report");
    println!(
        "Source: {} (generated {})",
        scores_csv.display(),
        Local::now().format("%Y-%m-%d %H:%M")
    );
    for line in render_report(&report, categories) {
        println!("{line}");
    }

    let skipped: Vec<&String> = scores.skipped.iter().chain(&overrides.skipped).collect();
    if !skipped.is_empty() {
        println!("\nSkipped identifiers not in the framework");
        for id in skipped {
            println!("- {id}");
        }
    }

    Ok(())
}

pub(crate) fn run_framework_show(args: FrameworkShowArgs) -> Result<(), AppError> {
    let framework = load_framework(args.framework)?;

    println!(
        "Process taxonomy: {} domains, {} categories, {} processes",
        framework.domains().len(),
        framework.categories().count(),
        framework.process_count()
    );
    for domain in framework.domains() {
        println!("\n{} [{}]", domain.title, domain.id);
        if !domain.description.is_empty() {
            println!("  {}", domain.description);
        }
        for category in &domain.categories {
            println!(
                "- {} [{}] ({} processes)",
                category.title,
                category.id,
                category.processes.len()
            );
            if args.processes {
                for process in &category.processes {
                    println!("    - {} [{}]", process.name, process.id);
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn render_report(report: &AssessmentReport, categories: bool) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Global maturity: {} ({})",
            report.global_display, report.global_label
        ),
        format!("Completion: {}%", report.completion_percentage),
        String::new(),
        "Domains".to_string(),
    ];

    for domain in &report.domains {
        lines.push(format!(
            "- {}: {} ({})",
            domain.title, domain.display, domain.band_label
        ));
        if !categories {
            continue;
        }
        for category in &domain.categories {
            let marker = match (category.overridden, category.is_manual) {
                (true, true) => " [manual]",
                (true, false) if category.score != category.computed_score => " [stored]",
                _ => "",
            };
            lines.push(format!(
                "    - {}: {}{} | {}/{} processes rated",
                category.title,
                category.display,
                marker,
                category.scored_processes,
                category.total_processes
            ));
        }
    }

    lines
}
