use crate::config::MailConfig;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Hand the finished report to the local MTA via `sendmail -t`.
/// Best-effort: by the time this runs the history is already saved, so
/// delivery problems are logged and never fail the run.
pub fn send(report: &str, cfg: &MailConfig) {
    if cfg.recipient.is_empty() {
        warn!("mail requested but no recipient configured");
        return;
    }

    let host = hostname();
    let subject = if cfg.environment.is_empty() {
        format!("File system growth report on {host}")
    } else {
        format!("{} file system growth report on {host}", cfg.environment)
    };
    let message = format!(
        "To: {}\nFrom: {}\nSubject: {}\n\n{}\n/fsgrowth reporter on {}\n",
        cfg.recipient, cfg.sender, subject, report, host
    );

    let child = Command::new("sendmail")
        .arg("-t")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let mut child = match child {
        Ok(child) => child,
        Err(err) => {
            warn!("sendmail not available: {err}");
            return;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(err) = stdin.write_all(message.as_bytes()) {
            warn!("failed to feed sendmail: {err}");
        }
    }
    match child.wait() {
        Ok(status) if status.success() => info!("report mailed to {}", cfg.recipient),
        Ok(status) => warn!("sendmail exited with {status}"),
        Err(err) => warn!("sendmail did not finish: {err}"),
    }
}

fn hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}
