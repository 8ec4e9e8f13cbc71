use tracing::warn;

use crate::api::sth::{FetchError, SignalSample, SthClient};
use crate::models::{Signal, SignalSeries, Window};
use crate::utils::{normalize_timestamp, TimeError};

/// Fetch all three signals and assemble a replacement window.
///
/// The commit is all-or-nothing: if any signal errors or comes back empty,
/// returns `Ok(None)` and the caller keeps its current (stale) window. A
/// timestamp that matches neither known layout is the one tick-fatal case:
/// it propagates as `TimeError` so that a window with unparseable timestamps
/// is never committed.
pub async fn refresh_window(client: &SthClient, last_n: u32) -> Result<Option<Window>, TimeError> {
    let (temperature, humidity, luminosity) = tokio::join!(
        client.fetch_signal(Signal::Temperature.attribute(), last_n),
        client.fetch_signal(Signal::Humidity.attribute(), last_n),
        client.fetch_signal(Signal::Luminosity.attribute(), last_n),
    );

    // Log each signal's outcome before deciding; a failed temperature fetch
    // must not hide a failed humidity fetch.
    let temperature = keep_samples(Signal::Temperature, temperature);
    let humidity = keep_samples(Signal::Humidity, humidity);
    let luminosity = keep_samples(Signal::Luminosity, luminosity);

    let (Some(temperature), Some(humidity), Some(luminosity)) = (temperature, humidity, luminosity)
    else {
        return Ok(None);
    };

    Ok(Some(Window {
        temperature: build_series(temperature, last_n)?,
        humidity: build_series(humidity, last_n)?,
        luminosity: build_series(luminosity, last_n)?,
    }))
}

/// Downgrade a fetch result to `Option`, logging errors and empty responses.
/// "Fetch failed" and "no data" are logged distinctly but both leave the
/// window stale for this tick.
fn keep_samples(
    signal: Signal,
    result: Result<Vec<SignalSample>, FetchError>,
) -> Option<Vec<SignalSample>> {
    match result {
        Ok(samples) if samples.is_empty() => {
            warn!("No {} data returned this tick", signal.attribute());
            None
        }
        Ok(samples) => Some(samples),
        Err(e) => {
            warn!("Failed to fetch {}: {}", signal.attribute(), e);
            None
        }
    }
}

/// Normalize every timestamp to Lisbon time and keep the trailing `last_n`
/// entries in their original order.
fn build_series(samples: Vec<SignalSample>, last_n: u32) -> Result<SignalSeries, TimeError> {
    let mut series = SignalSeries::default();
    for sample in samples {
        series.timestamps.push(normalize_timestamp(&sample.recv_time)?);
        series.values.push(sample.value);
    }
    series.truncate_to_last(last_n as usize);
    Ok(series)
}
