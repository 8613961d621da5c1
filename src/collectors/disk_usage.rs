use crate::error::CollectError;
use crate::models::sample::Sample;
use chrono::NaiveDate;
use nix::sys::statvfs::statvfs;
use std::path::Path;

/// Stat a mounted filesystem and reduce it to a whole-GiB sample dated
/// `date`.
///
/// `free` counts blocks available to unprivileged writers (f_bavail) and
/// `used` excludes the root-reserved slack, matching df, so used + free
/// can fall slightly short of total.
pub fn collect(mount: &str, date: NaiveDate) -> Result<Sample, CollectError> {
    let stat = statvfs(Path::new(mount)).map_err(|source| CollectError {
        path: mount.into(),
        source,
    })?;

    let frsize = stat.fragment_size() as u64;
    let total_bytes = stat.blocks() * frsize;
    let free_bytes  = stat.blocks_available() * frsize;
    let used_bytes  = (stat.blocks() - stat.blocks_free()) * frsize;

    Ok(Sample::from_bytes(date, mount, total_bytes, used_bytes, free_bytes))
}
