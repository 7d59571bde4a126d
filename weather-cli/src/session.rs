//! Interactive lookup session.
//!
//! Reads one query per input line and redraws the current view whenever the
//! state changes. Lookups run as spawned tasks and report back over a
//! channel, so input keeps flowing while requests are outstanding.

use std::{io::Write, sync::Arc};

use anyhow::Context;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tracing::debug;
use weather_core::{FetchError, Submission, WeatherApp, WeatherData, WeatherSource, view_state};

type Outcome = Result<WeatherData, FetchError>;

pub async fn run<R>(
    source: Arc<dyn WeatherSource>,
    input: R,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut app = WeatherApp::new();
    let mut lines = input.lines();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Outcome>();
    let mut in_flight = 0usize;
    let mut input_open = true;

    writeln!(out, "WeatherApp")?;
    draw(out, &app)?;

    // After end of input, outstanding lookups still land before exiting.
    while input_open || in_flight > 0 {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read query from input")? {
                    Some(text) => {
                        app.set_query(text);
                        if let Some(submission) = app.submit() {
                            in_flight += 1;
                            spawn_lookup(Arc::clone(&source), submission, done_tx.clone());
                            draw(out, &app)?;
                        }
                    }
                    None => input_open = false,
                }
            }
            Some(outcome) = done_rx.recv() => {
                in_flight -= 1;
                app.complete(outcome);
                draw(out, &app)?;
            }
            else => break,
        }
    }

    Ok(())
}

fn spawn_lookup(
    source: Arc<dyn WeatherSource>,
    submission: Submission,
    done: mpsc::UnboundedSender<Outcome>,
) {
    tokio::spawn(async move {
        let outcome = source.current(&submission.query).await;
        if done.send(outcome).is_err() {
            debug!(query = %submission.query, "session ended before lookup finished");
        }
    });
}

fn draw(out: &mut impl Write, app: &WeatherApp) -> anyhow::Result<()> {
    writeln!(out)?;
    write!(out, "{}", view_state(app))?;
    write!(out, "Search Location... ")?;
    out.flush().context("Failed to flush output")
}
