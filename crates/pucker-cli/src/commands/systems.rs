use crate::cli::SystemsArgs;
use crate::error::Result;
use ringpucker::core::systems::registry::RingIndexRegistry;
use ringpucker::engine::error::EngineError;

pub async fn run(args: SystemsArgs) -> Result<()> {
    let registry = load_registry(&args)?;

    if registry.is_empty() {
        println!("No systems registered.");
        return Ok(());
    }

    println!("{:<16} Ring atom indices", "System");
    for (name, indices) in registry.iter() {
        let indices: Vec<String> = indices.iter().map(usize::to_string).collect();
        println!("{:<16} [{}]", name, indices.join(", "));
    }
    Ok(())
}

fn load_registry(args: &SystemsArgs) -> Result<RingIndexRegistry> {
    let mut registry = if args.no_builtin {
        RingIndexRegistry::empty()
    } else {
        RingIndexRegistry::builtin()
    };
    if let Some(path) = &args.registry {
        registry
            .extend_from_file(path)
            .map_err(EngineError::from)?;
    }
    Ok(registry)
}
