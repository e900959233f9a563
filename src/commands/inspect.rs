use anyhow::{Context, Result};

use crate::cli::{Cli, InspectArgs};
use crate::codec::Granularity;
use crate::dataset::load_dataset;
use crate::topology::load_topology;

pub fn run(cli: &Cli, args: &InspectArgs) -> Result<()> {
    let granularity: Granularity = args.granularity.parse()?;

    if cli.verbose > 0 {
        eprintln!("[inspect] data={} topology={}", args.data, args.topology);
    }

    let dataset = load_dataset(&args.data, &args.key_column, &args.value_column)
        .with_context(|| format!("loading dataset {}", args.data))?;
    let topology = load_topology(&args.topology)
        .with_context(|| format!("loading topology {}", args.topology))?;

    println!("dataset: {} keys, {} rows dropped", dataset.len(), dataset.dropped());

    let mut names = topology.objects.keys().cloned().collect::<Vec<_>>();
    names.sort();
    for name in &names {
        let collection = &topology.objects[name];
        println!("object {:?}: {} features", name, collection.geometries.len());
    }

    let collection = topology.collection(granularity.object_name())?;
    let unmatched = granularity.unmatched_keys(dataset.keys(), collection);
    println!(
        "join at {}: {} of {} dataset keys match no feature",
        granularity,
        unmatched,
        dataset.len()
    );

    Ok(())
}
