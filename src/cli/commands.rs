use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::batch::{self, BatchJob};
use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::ViewerResult;
use crate::exitcode;
use crate::render::check_canvas;
use crate::server::{self, AppState};
use crate::source::HttpTreeSource;

/// Runs the selected subcommand and returns the process exit code.
pub fn execute_command(cli: &Cli) -> ViewerResult<i32> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "loaded settings");
    match &cli.command {
        Commands::Serve { listen, base_url } => _serve(settings, listen.as_deref(), base_url.as_deref()),
        Commands::Batch { amount, dir } => _batch(settings, *amount, dir.as_deref()),
        Commands::Generate {
            amount,
            stars,
            radius,
            dir,
        } => _generate(&settings, *amount, *stars, *radius, dir.as_deref()),
    }
}

#[instrument(skip(settings))]
fn _serve(mut settings: Settings, listen: Option<&str>, base_url: Option<&str>) -> ViewerResult<i32> {
    if let Some(listen) = listen {
        settings.server.listen = listen.to_string();
    }
    if let Some(base_url) = base_url {
        settings.source.base_url = base_url.to_string();
    }
    let addr = settings.listen_addr()?;
    check_canvas(settings.render.svg_size, settings.render.max_canvas_side)?;

    let source = HttpTreeSource::new(&settings.source.base_url, settings.fetch_timeout())?;
    let state = Arc::new(AppState {
        registry: settings.registry(),
        source,
        renderer: settings.renderer(),
        canvas_side: settings.render.svg_size,
        max_canvas_side: settings.render.max_canvas_side,
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, state))?;
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn _batch(settings: Settings, amount: usize, dir: Option<&Path>) -> ViewerResult<i32> {
    check_canvas(settings.render.png_size, settings.render.max_canvas_side)?;
    let job = BatchJob {
        dir: batch_dir(&settings, dir),
        renderer: settings.renderer(),
        canvas_side: settings.render.png_size,
        max_canvas_side: settings.render.max_canvas_side,
    };
    // Each failure is already logged by the job.
    let report = job.run(amount, &settings.registry());
    Ok(report
        .failed
        .first()
        .map_or(exitcode::OK, |(_, e)| e.exit_code()))
}

#[instrument(skip(settings))]
fn _generate(settings: &Settings, amount: usize, stars: usize, radius: f64, dir: Option<&Path>) -> ViewerResult<i32> {
    batch::generate(&batch_dir(settings, dir), amount, stars, radius)?;
    Ok(exitcode::OK)
}

fn batch_dir(settings: &Settings, dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(|| settings.batch.dir.clone(), Path::to_path_buf)
}
