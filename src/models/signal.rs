//! The three monitored signals and their fixed presentation parameters

/// One of the device's monitored attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Temperature,
    Humidity,
    Luminosity,
}

impl Signal {
    /// Display order on the dashboard
    pub const ALL: [Signal; 3] = [Signal::Temperature, Signal::Humidity, Signal::Luminosity];

    /// STH attribute name, also used as the trace name
    pub fn attribute(&self) -> &'static str {
        match self {
            Signal::Temperature => "temperature",
            Signal::Humidity => "humidity",
            Signal::Luminosity => "luminosity",
        }
    }

    /// Trace line color
    pub fn color(&self) -> &'static str {
        match self {
            Signal::Temperature => "red",
            Signal::Humidity => "blue",
            Signal::Luminosity => "orange",
        }
    }

    /// Y-axis label
    pub fn y_title(&self) -> &'static str {
        match self {
            Signal::Temperature => "Temperature (°C)",
            Signal::Humidity => "Humidity (%)",
            Signal::Luminosity => "Luminosity (%)",
        }
    }

    /// Static threshold band drawn as dashed min/max lines
    pub fn band(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Signal::Temperature => (Some(15.0), Some(25.0)),
            Signal::Humidity => (Some(30.0), Some(50.0)),
            Signal::Luminosity => (Some(0.0), Some(30.0)),
        }
    }
}
