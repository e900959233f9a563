use anyhow::{Context, Result, bail};

use crate::cli::{Cli, RenderArgs};
use crate::config::MapConfig;
use crate::engine::Renderer;
use crate::svg::write_svg;

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    if !args.force && args.output.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", args.output.display());
    }

    let config = MapConfig {
        title: args.title.clone(),
        dataset_url: args.data.clone(),
        key_column: args.key_column.clone(),
        value_column: args.value_column.clone(),
        topology_url: args.topology.clone(),
        granularity: args.granularity.parse()?,
        transform: args.transform.parse()?,
        palette: args.palette.parse()?,
        legend_steps: args.legend_steps,
        stroke_color: args.stroke_color.clone(),
    };

    if cli.verbose > 0 {
        eprintln!("[render] data={} topology={}", config.dataset_url, config.topology_url);
        eprintln!(
            "[render] granularity={} transform={} -> {}",
            args.granularity,
            args.transform,
            args.output.display()
        );
    }

    let renderer = Renderer::new();
    let output = renderer
        .render(&config)
        .with_context(|| format!("rendering {}", config.dataset_url))?;

    if cli.verbose > 0 {
        let collection = output.topology.collection(config.granularity.object_name())?;
        let unmatched = config.granularity.unmatched_keys(output.dataset.keys(), collection);
        eprintln!(
            "[render] dataset: {} keys ({} rows dropped), {} features",
            output.dataset.len(),
            output.dataset.dropped(),
            collection.geometries.len()
        );
        if unmatched > 0 {
            eprintln!(
                "[render] warning: {unmatched} dataset keys match no {} feature (granularity mismatch?)",
                config.granularity
            );
        }
    }

    write_svg(&args.output, &output, &config)
        .with_context(|| format!("writing {}", args.output.display()))?;

    if cli.verbose > 0 {
        eprintln!("[render] wrote {}", args.output.display());
    }

    Ok(())
}
