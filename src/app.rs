use crate::analysis::{growth, normalize, project, window};
use crate::collectors::disk_usage;
use crate::config::RunOptions;
use crate::error::AppError;
use crate::util::{history, mailer, report};
use chrono::Local;
use tracing::{info, warn};

/// One batch run: load history, fold in today's samples, persist, report.
///
/// Persisting is the single durability point. Everything before it only
/// touches memory, so any abort up to that call leaves the previous
/// history file untouched; the report is printed and delivered only
/// afterwards, never from unsaved state.
pub fn run(opts: &RunOptions) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let mut history = history::load(&opts.history_file)?;

    let mut analyzed = Vec::new();
    for fs in &opts.filesystems {
        let series = history.series_mut(fs);

        if opts.collect {
            match disk_usage::collect(fs, today) {
                Ok(mut sample) => {
                    sample.delta = series.delta_for(sample.date, sample.used);
                    series.merge(sample);
                }
                // Without any recorded history there is nothing to report.
                Err(err) if series.is_empty() => return Err(err.into()),
                Err(err) => warn!("{err}; reporting from recorded history only"),
            }
        }

        if series.is_empty() {
            warn!("{fs}: nothing recorded yet, skipping");
            continue;
        }

        let normalized = normalize::normalize(series);
        *series = normalized;
        analyzed.push((fs.clone(), growth::analyze(series)));
    }

    history::persist(&history, &opts.history_file)?;
    info!("history saved to {}", opts.history_file.display());

    let mut body = report::banner(today);
    let mut sections = Vec::new();
    for (fs, entries) in &analyzed {
        let recent = window::trailing(entries, today, opts.window_days);
        let stats = project::project(&recent);
        sections.push(report::generate(fs, &window::reversed(&recent), &stats, today));
    }
    body.push_str(&sections.join("\n"));

    if !opts.quiet {
        print!("{body}");
    }
    if opts.send {
        mailer::send(&body, &opts.mail);
    }
    Ok(())
}
