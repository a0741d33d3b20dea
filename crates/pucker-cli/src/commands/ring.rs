use crate::cli::RingArgs;
use crate::error::{CliError, Result};
use nalgebra::Vector3;
use ringpucker::core::analysis::{RingAnalysis, analyze_ring, analyze_ring_oriented};
use ringpucker::core::io::{traits::CoordinateFile, xyz::XyzFile};
use ringpucker::core::systems::registry::RingIndexRegistry;
use ringpucker::engine::error::EngineError;
use tracing::info;

const CUSTOM_SYSTEM: &str = "custom";

pub async fn run(args: RingArgs) -> Result<()> {
    let (registry, system) = resolve_selection(&args)?;
    let towards = parse_direction(args.towards.as_deref())?;

    info!("Loading input structure from {:?}", &args.input);
    let structure = XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let ring = registry
        .select_ring(&system, &structure)
        .map_err(EngineError::from)?;
    let analysis = match towards {
        Some(direction) => analyze_ring_oriented(&ring, &direction),
        None => analyze_ring(&ring),
    }
    .map_err(EngineError::from)?;

    print_analysis(&args, &system, &analysis);
    Ok(())
}

fn resolve_selection(args: &RingArgs) -> Result<(RingIndexRegistry, String)> {
    if let Some(indices) = &args.indices {
        let mut registry = RingIndexRegistry::empty();
        registry
            .insert(CUSTOM_SYSTEM, indices)
            .map_err(|e| CliError::Argument(e.to_string()))?;
        return Ok((registry, CUSTOM_SYSTEM.to_string()));
    }

    let system = args
        .system
        .clone()
        .ok_or_else(|| CliError::Argument("Either --system or --indices is required.".to_string()))?;
    let mut registry = RingIndexRegistry::builtin();
    if let Some(path) = &args.registry {
        registry
            .extend_from_file(path)
            .map_err(EngineError::from)?;
    }
    Ok((registry, system))
}

fn parse_direction(values: Option<&[f64]>) -> Result<Option<Vector3<f64>>> {
    match values {
        None => Ok(None),
        Some([x, y, z]) => {
            let direction = Vector3::new(*x, *y, *z);
            if direction.norm() == 0.0 || !direction.iter().all(|c| c.is_finite()) {
                return Err(CliError::Argument(
                    "--towards needs a finite, non-zero direction.".to_string(),
                ));
            }
            Ok(Some(direction))
        }
        Some(other) => Err(CliError::Argument(format!(
            "--towards takes exactly three components, got {}.",
            other.len()
        ))),
    }
}

fn print_analysis(args: &RingArgs, system: &str, analysis: &RingAnalysis) {
    let normal = analysis.normal;
    println!("Ring puckering of {} ({})", args.input.display(), system);
    println!(
        "  Mean-plane normal : ({:.4}, {:.4}, {:.4})",
        normal.x, normal.y, normal.z
    );
    println!("  Q                 : {:.4} Å", analysis.amplitude());
    println!(
        "  q2, q3            : {:.4}, {:.4} Å",
        analysis.descriptor.q2(),
        analysis.descriptor.q3()
    );
    println!("  θ                 : {:.2}°", analysis.angles.theta);
    println!("  φ                 : {:.2}°", analysis.angles.phi);
    println!(
        "  Conformation      : {} ({}), {:.2}° from reference (θ = {:.0}°, φ = {:.0}°)",
        analysis.conformation(),
        analysis.conformation().abbreviation(),
        analysis.classification.distance_degrees(),
        analysis.classification.reference.theta,
        analysis.classification.reference.phi
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn ring_args(extra: &[&str]) -> RingArgs {
        let mut argv = vec!["pucker", "ring", "mol.xyz"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Ring(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn explicit_indices_build_a_custom_entry() {
        let (registry, system) = resolve_selection(&ring_args(&["-i", "5,4,3,2,1,0"])).unwrap();
        assert_eq!(system, CUSTOM_SYSTEM);
        assert_eq!(registry.get(CUSTOM_SYSTEM), Some(&[5, 4, 3, 2, 1, 0]));
    }

    #[test]
    fn invalid_indices_are_argument_errors() {
        for indices in ["0,1,2", "0,1,2,3,4,4"] {
            let result = resolve_selection(&ring_args(&["-i", indices]));
            assert!(matches!(result, Err(CliError::Argument(_))));
        }
    }

    #[test]
    fn named_system_uses_builtin_registry() {
        let (registry, system) = resolve_selection(&ring_args(&["-s", "cAlaAla"])).unwrap();
        assert_eq!(system, "cAlaAla");
        assert_eq!(registry.get("cAlaAla"), Some(&[4, 3, 2, 1, 0, 5]));
    }

    #[test]
    fn direction_requires_three_finite_components() {
        assert_eq!(parse_direction(None).unwrap(), None);
        assert_eq!(
            parse_direction(Some(&[0.0, 0.0, 2.0][..])).unwrap(),
            Some(Vector3::new(0.0, 0.0, 2.0))
        );
        assert!(parse_direction(Some(&[0.0, 1.0][..])).is_err());
        assert!(parse_direction(Some(&[0.0, 0.0, 0.0][..])).is_err());
        assert!(parse_direction(Some(&[f64::NAN, 0.0, 1.0][..])).is_err());
    }
}
