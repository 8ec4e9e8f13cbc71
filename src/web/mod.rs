//! Dashboard web surface: the HTML shell and the charts JSON endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::models::Window;
use crate::services::chart_service::{self, ChartSpec};

/// Latest committed window, written by the scheduler loop and read by the
/// HTTP handlers. Always replaced wholesale under the write lock.
pub type SharedWindow = Arc<RwLock<Window>>;

/// Serve the dashboard until the process exits
pub async fn run_server(bind_addr: &str, window: SharedWindow) -> std::io::Result<()> {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/charts", get(charts_handler))
        .layer(CorsLayer::permissive())
        .with_state(window);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Dashboard live at http://{}", bind_addr);
    axum::serve(listener, app).await
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The three chart specs built from the current window, in display order
async fn charts_handler(State(window): State<SharedWindow>) -> Json<Vec<ChartSpec>> {
    let window = window.read().await;
    Json(chart_service::dashboard_charts(&window))
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sensor Data Viewer</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f5f5f5;
        }
        h1 { text-align: center; color: #333; }
        .chart {
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            margin-bottom: 20px;
            height: 420px;
        }
        .status { text-align: center; color: #666; font-size: 14px; }
    </style>
</head>
<body>
    <h1>Sensor Data Viewer</h1>

    <div id="chart-temperature" class="chart"></div>
    <div id="chart-humidity" class="chart"></div>
    <div id="chart-luminosity" class="chart"></div>
    <div class="status" id="status">Loading...</div>

    <script>
        const divs = ['chart-temperature', 'chart-humidity', 'chart-luminosity'];

        async function refresh() {
            try {
                const response = await fetch('/api/charts');
                const charts = await response.json();
                charts.forEach((chart, i) => {
                    if (i < divs.length) {
                        Plotly.react(divs[i], chart.data, chart.layout, { responsive: true });
                    }
                });
                const points = charts.length ? charts[0].data[0].x.length : 0;
                document.getElementById('status').textContent =
                    points > 0
                        ? `${points} samples per signal, updated ${new Date().toLocaleTimeString()}`
                        : 'Waiting for first fetch cycle...';
            } catch (err) {
                console.error('Error:', err);
                document.getElementById('status').textContent = 'Error: ' + err;
            }
        }

        refresh();
        setInterval(refresh, 10000);
    </script>
</body>
</html>
"##;
