#![deny(warnings)]
#![warn(unused_extern_crates)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unreachable)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::trivially_copy_pass_by_ref)]

use std::process::ExitCode;
use std::time::Duration;

use analog_clock::renderer::{ClockRenderer, LogRenderer, TextRenderer, render_updates};
use analog_clock::{cli::Cli, prelude::*};

async fn run_clock<R>(
    source: LocalClock,
    period: Duration,
    renderer: &mut R,
    ticks: Option<u64>,
) -> Result<(), ClockError>
where
    R: ClockRenderer<Error = ClockError>,
{
    let mut scheduler = TickScheduler::new(source, period)?;
    let updates = scheduler.subscribe();
    scheduler.set_visibility(Visibility::Visible).await;

    let result = tokio::select! {
        rendered = render_updates(updates, renderer, ticks) => rendered.map(|frames| {
            debug!("Rendered {frames} frames");
        }),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping");
            Ok(())
        }
    };

    scheduler.set_visibility(Visibility::Hidden).await;
    result
}

fn cli_main() -> Result<(), ExitCode> {
    let cliopts = Cli::parse();

    let level = if cliopts.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    #[allow(clippy::expect_used)]
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init()
        .expect("Failed to initialize logger");

    let period = cliopts
        .tick_period()
        .inspect_err(|err| error!("Invalid tick period: {err}"))?;
    let rows = cliopts
        .face_rows()
        .inspect_err(|err| error!("Invalid face size: {err}"))?;

    if let Some(at) = cliopts.at {
        let angles = AngleState::from_time(at);
        let result = if cliopts.face {
            TextRenderer::new(std::io::stdout(), rows)
                .with_color(!cliopts.no_color)
                .render(&angles)
        } else {
            LogRenderer.render(&angles)
        };
        return result.map_err(ExitCode::from);
    }

    // the local offset lookup refuses to run once other threads are around,
    // which is why the runtime below stays on the current thread
    let source = if cliopts.utc {
        LocalClock::utc()
    } else {
        LocalClock::host()
    };
    info!("Showing time at UTC offset {}", source.offset());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .map_err(ClockError::from)?;

    runtime
        .block_on(async {
            if cliopts.face {
                let mut renderer = TextRenderer::new(std::io::stdout(), rows)
                    .with_clear(true)
                    .with_color(!cliopts.no_color);
                run_clock(source, period, &mut renderer, cliopts.ticks).await
            } else {
                run_clock(source, period, &mut LogRenderer, cliopts.ticks).await
            }
        })
        .inspect_err(|err| error!("Clock stopped: {err}"))?;
    Ok(())
}

fn main() -> Result<(), ExitCode> {
    cli_main()
}
