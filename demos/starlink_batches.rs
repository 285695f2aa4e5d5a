use std::env;

use camino::Utf8Path;
use sattrain::clustering::ClusterParams;
use sattrain::sattrain::Sattrain;
use sattrain::sattrain_errors::SattrainError;

/// Split a `GROUP-LAUNCH` command-line token into its numeric parts.
///
/// Arguments
/// -----------------
/// * `token`: The launch name as typed by the user, e.g. `"4-7"`.
///
/// Return
/// ----------
/// * `Ok((group, launch))` — both parts parsed as unsigned integers.
/// * `Err(SattrainError::UnknownLaunch)` — if the token is not `N-M`.
///
/// See also
/// ------------
/// * [`Sattrain::launch_groups`] – Consumes the parsed pair.
fn parse_launch_token(token: &str) -> Result<(u32, u32), SattrainError> {
    let mut parts = token.splitn(2, '-');
    let group = parts.next().and_then(|p| p.parse::<u32>().ok());
    let launch = parts.next().and_then(|p| p.parse::<u32>().ok());
    match (group, launch) {
        (Some(g), Some(l)) => Ok((g, l)),
        _ => Err(SattrainError::UnknownLaunch(token.to_string())),
    }
}

/// Decompose one cataloged launch into orbital planes and deployment batches.
/// Usage:
///   starlink_batches [GROUP-LAUNCH] [--verbose]
/// Example:
///   starlink_batches 1-2 --verbose
fn main() -> Result<(), SattrainError> {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let verbose = if let Some(pos) = args.iter().position(|a| a == "--verbose") {
        args.remove(pos);
        true
    } else {
        false
    };

    let token = args.first().cloned().unwrap_or_else(|| "1-2".to_string());
    let (group, launch) = parse_launch_token(&token)?;

    let sattrain = Sattrain::from_files(
        Utf8Path::new("tests/data/starlink_batches.tle"),
        Utf8Path::new("tests/data/launches.json"),
        ClusterParams::default(),
    )?;

    // Cluster at the element-set epoch so the report is reproducible.
    let Some(first_tle) = sattrain.tles().first() else {
        eprintln!("[starlink_batches] TLE file is empty, nothing to cluster");
        return Ok(());
    };

    let groups = sattrain.launch_groups(group, launch, first_tle.epoch)?;

    if verbose {
        eprintln!("[starlink_batches] launch = {token}, epoch = {}", first_tle.epoch);
        eprintln!("[starlink_batches] {}", sattrain.params());
        eprintln!("[starlink_batches] {groups}");
    }

    println!("{groups:#}");

    Ok(())
}
