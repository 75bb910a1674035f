use anyhow::Result;
use flopplot_cli::{
    banner, build_cli, config_from_matches, init_logging, is_verbose, load_versions, run_plot,
    PlotRequest,
};
use flopplot_render::PlottersRenderer;

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    init_logging(is_verbose(&matches));

    match matches.subcommand() {
        Some(("list", args)) => {
            let config = config_from_matches(args)?;
            let versions = load_versions(&config, &[])?;
            print!("{}", banner(&versions));
        }
        Some(("plot", args)) => {
            let request = PlotRequest::from_matches(args)?;
            let versions = load_versions(&request.config, &request.select)?;
            let renderer = PlottersRenderer::from_config(&request.config);

            for path in run_plot(&request, &versions, &renderer)? {
                println!("{}", path.display());
            }
        }
        _ => build_cli().print_help()?,
    }
    Ok(())
}
