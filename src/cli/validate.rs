use anyhow::Result;
use log::info;

use jobatlas::dataset::DataPaths;
use jobatlas::schema::TableKind;
use jobatlas::validator::validate_paths;

/// Validate every configured snapshot table
pub fn run(paths: DataPaths) -> Result<()> {
    info!("jobatlas Validator");
    info!("==================");
    for kind in TableKind::ALL {
        if let Some(path) = paths.path(kind) {
            info!("{:<10} {}", kind.name(), path.display());
        }
    }

    let source = paths
        .path(TableKind::Density)
        .and_then(|p| p.parent())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "configured tables".to_string());

    let report = validate_paths(&paths, source);
    println!("{}", report.format_colored());

    // Exit with error code if validation failed
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
